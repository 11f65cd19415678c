use rust_decimal::Decimal;

use super::errors::{ValidationError, Violation};

// ============================================================================
// Order Entity
// ============================================================================
//
// Invariant: final_price == price + tax for every Order that exists outside
// of this module. Fields are private so the id cannot change after creation
// and final_price cannot be supplied by a caller.
//
// Amounts carry at most MAX_SCALE decimal places and never exceed
// MAX_AMOUNT, so price, tax and their sum fit the NUMERIC(20, 4) storage
// columns without rounding.
//
// ============================================================================

/// Decimal places allowed on price and tax
pub const MAX_SCALE: u32 = 4;

/// Largest accepted price or tax: 999,999,999,999.9999
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_874_919_423, 2_328_306, 0, false, MAX_SCALE);

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: String,
    price: Decimal,
    tax: Decimal,
    final_price: Decimal,
}

impl Order {
    /// Validate the inputs, then derive the final price
    pub fn new(id: impl Into<String>, price: Decimal, tax: Decimal) -> Result<Self, ValidationError> {
        let mut order = Self {
            id: id.into(),
            price,
            tax,
            final_price: Decimal::ZERO,
        };
        ValidationError::check(order.input_violations())?;
        order.calculate_final_price()?;
        Ok(order)
    }

    /// Recompute final_price from price and tax
    pub fn calculate_final_price(&mut self) -> Result<(), ValidationError> {
        self.final_price = self
            .price
            .checked_add(self.tax)
            .ok_or_else(|| ValidationError::single(Violation::InvalidFinalPrice))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = self.input_violations();
        if self.price.checked_add(self.tax) != Some(self.final_price) {
            violations.push(Violation::InvalidFinalPrice);
        }
        ValidationError::check(violations)
    }

    fn input_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.id.is_empty() {
            violations.push(Violation::InvalidId);
        }
        if self.price <= Decimal::ZERO || !within_bounds(self.price) {
            violations.push(Violation::InvalidPrice);
        }
        if self.tax < Decimal::ZERO || !within_bounds(self.tax) {
            violations.push(Violation::InvalidTax);
        }

        violations
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn final_price(&self) -> Decimal {
        self.final_price
    }
}

// Trailing zeros don't count against the scale: 1.50000 == 1.5
fn within_bounds(amount: Decimal) -> bool {
    amount <= MAX_AMOUNT && amount.normalize().scale() <= MAX_SCALE
}

// ============================================================================
// Unit Tests
// ============================================================================
