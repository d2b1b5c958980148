//! Discount codes.
//!
//! Payment is mocked end to end, so the code directory is a fixed table
//! rather than anything redeemable against a backend.

use serde::{Deserialize, Serialize};

use lumina_core::{DomainError, DomainResult};

/// What an accepted code does to the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discount {
    PercentOff(u8),
    FreeShipping,
}

impl Discount {
    /// Validate a code as typed. Codes are case-insensitive and trimmed.
    pub fn lookup(code: &str) -> DomainResult<Discount> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("please enter a discount code"));
        }
        match code.as_str() {
            "SAVE10" => Ok(Discount::PercentOff(10)),
            "SAVE20" => Ok(Discount::PercentOff(20)),
            "FREESHIP" => Ok(Discount::FreeShipping),
            _ => Err(DomainError::validation("invalid discount code")),
        }
    }

    /// The message flashed when the code is applied.
    pub fn applied_message(&self) -> String {
        match self {
            Discount::PercentOff(percent) => format!("{percent}% discount applied!"),
            Discount::FreeShipping => "Free shipping applied!".to_string(),
        }
    }
}
