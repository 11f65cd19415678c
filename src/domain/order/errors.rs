use std::fmt;

// ============================================================================
// Order Validation Errors
// ============================================================================
//
// Every rule is checked on each validation pass; all violated rules are
// reported together, always in the order id, price, tax, final price.
//
// ============================================================================

/// A single broken order rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    InvalidId,
    InvalidPrice,
    InvalidTax,
    /// price + tax overflowed, or final_price no longer equals it
    InvalidFinalPrice,
}

impl Violation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::InvalidId => "invalid id",
            Violation::InvalidPrice => "invalid price",
            Violation::InvalidTax => "invalid tax",
            Violation::InvalidFinalPrice => "invalid final price",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns `None` when nothing was violated
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn single(violation: Violation) -> Self {
        Self { violations: vec![violation] }
    }

    /// `Ok` when nothing was violated
    pub fn check(violations: Vec<Violation>) -> Result<(), Self> {
        match Self::from_violations(violations) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}
