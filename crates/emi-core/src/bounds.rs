//! Permitted ranges for interactive inputs.
//!
//! Out-of-range values are clamped, not rejected. Values entered on a
//! control are also snapped onto the range's step grid measured from `min`;
//! values derived from other inputs are only bounded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::EmiResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: Decimal,
    pub max: Decimal,
    /// Grid spacing; zero disables snapping.
    pub step: Decimal,
    /// Value used when the caller supplies none. `None` means the value is
    /// derived from other inputs.
    #[serde(default)]
    pub default: Option<Decimal>,
}

impl InputRange {
    pub fn new(min: Decimal, max: Decimal, step: Decimal, default: Option<Decimal>) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    pub fn validate(&self, field: &str) -> EmiResult<()> {
        if self.min > self.max {
            return Err(EmiError::invalid(
                field,
                format!("Bound min {} exceeds max {}", self.min, self.max),
            ));
        }
        if self.step < Decimal::ZERO {
            return Err(EmiError::invalid(field, "Bound step cannot be negative"));
        }
        Ok(())
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into `[min, max]` without snapping.
    pub fn bound(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }

    /// Clamp into `[min, max]` then snap to the nearest step.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        let bounded = self.bound(value);
        if self.step.is_zero() {
            return bounded;
        }
        let steps = ((bounded - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}

/// Ranges for every input of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub house_price: InputRange,
    pub loan_to_value_percent: InputRange,
    pub principal: InputRange,
    pub annual_rate_percent: InputRange,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            // 2 Cr to 10 Cr in 20 L steps
            house_price: InputRange::new(
                dec!(20_000_000),
                dec!(100_000_000),
                dec!(2_000_000),
                Some(dec!(30_000_000)),
            ),
            loan_to_value_percent: InputRange::new(dec!(10), dec!(100), dec!(5), Some(dec!(80))),
            // 50 L to 10 Cr in 10 L steps
            principal: InputRange::new(
                dec!(5_000_000),
                dec!(100_000_000),
                dec!(1_000_000),
                None,
            ),
            annual_rate_percent: InputRange::new(dec!(5.0), dec!(15.0), dec!(0.1), Some(dec!(8.5))),
        }
    }
}

impl InputBounds {
    pub fn validate(&self) -> EmiResult<()> {
        self.house_price.validate("house_price")?;
        self.loan_to_value_percent.validate("loan_to_value_percent")?;
        self.principal.validate("principal")?;
        self.annual_rate_percent.validate("annual_rate_percent")
    }
}
