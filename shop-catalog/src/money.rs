use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// An amount in the smallest currency unit (cents for EUR/USD).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn minor_units(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn checked_mul(self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(Money(12000) - Money(2000), Money(10000));
        assert_eq!(Money(500).min(Money(300)), Money(300));
    }

    #[test]
    fn test_checked_arithmetic_at_the_bounds() {
        assert_eq!(Money(i64::MAX - 1).checked_add(Money(1)), Some(Money(i64::MAX)));
        assert_eq!(Money(i64::MAX).checked_add(Money(1)), None);
        assert_eq!(Money(i64::MIN).checked_sub(Money(1)), None);
        assert_eq!(Money(1200).checked_mul(3), Some(Money(3600)));
        assert_eq!(Money(i64::MAX / 2 + 1).checked_mul(2), None);
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Money(12000).to_string(), "120.00");
        assert_eq!(Money(5).to_string(), "0.05");
        assert_eq!(Money(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Money(4999)).unwrap(), "4999");
        let parsed: Money = serde_json::from_str("120").unwrap();
        assert_eq!(parsed, Money(120));
    }
}
