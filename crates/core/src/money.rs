//! Money representation.
//!
//! Prices are carried in the smallest currency unit (cents). The snapshot
//! files are sloppy about the JSON type of `price` ("19.99", 19.99, even
//! "$1,299.00"), so parsing is lenient and never fails: anything that does
//! not read as a non-negative decimal normalizes to zero with a warning.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount of money in cents.
///
/// Serializes as a decimal string ("19.99") so persisted documents look
/// like the snapshot files and round-trip through the lenient parser.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Build from whole dollars and cents, e.g. `Price::from_dollars(19, 99)`.
    pub fn from_dollars(dollars: u64, cents: u64) -> Self {
        Self(dollars * 100 + cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Line total for a quantity of units.
    pub fn times(&self, quantity: u32) -> Price {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Reduce by a whole-number percentage, rounding the discount down.
    pub fn minus_percent(&self, percent: u8) -> Price {
        let off = self.0.saturating_mul(u64::from(percent.min(100))) / 100;
        Self(self.0 - off)
    }

    /// Parse a price from free-form text: an optional leading `$`,
    /// thousands separators, then a decimal number. Returns `None` for
    /// anything else (including negatives).
    pub fn parse(text: &str) -> Option<Price> {
        let cleaned: String = text
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        let value: f64 = cleaned.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Some(Self((value * 100.0).round() as u64))
    }
}

impl core::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}.{:02}", self.0 / 100, self.0 % 100))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Whole(u64),
            Decimal(f64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Whole(n) => Some(Price(n.saturating_mul(100))),
            Raw::Decimal(v) if v.is_finite() && v >= 0.0 => {
                Some(Price((v * 100.0).round() as u64))
            }
            Raw::Decimal(_) => None,
            Raw::Text(s) => Price::parse(&s),
        };

        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!("unparseable price in source data; normalizing to zero");
            Price::ZERO
        }))
    }
}
