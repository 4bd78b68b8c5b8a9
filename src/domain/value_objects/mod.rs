//! Value Objects for the storefront

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Phone number reduced to its digits, the login identity of a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strips every non-digit character. `+998 (90) 123-45-67` becomes `998901234567`.
    pub fn normalize(raw: &str) -> Result<Self, PhoneNumberError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() { return Err(PhoneNumberError::Empty); }
        Ok(Self(digits))
    }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("phone number has no digits")]
    Empty,
}

/// Whole so'm amount. Prices and discounts never carry fractions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn new(amount: i64) -> Self { Self(amount) }
    pub fn amount(&self) -> i64 { self.0 }

    /// Price after a discount, floored at zero.
    pub fn discounted(&self, discount: Money) -> Money { Money((self.0 - discount.0).max(0)) }

    pub fn add(&self, other: Money) -> Money { Money(self.0.saturating_add(other.0)) }
    pub fn multiply(&self, qty: i64) -> Money { Money(self.0.saturating_mul(qty)) }
}

impl fmt::Display for Money {
    /// Groups thousands with spaces: `1250000` renders as `1 250 000 so'm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 { grouped.push(' '); }
            grouped.push(ch);
        }
        if self.0 < 0 { f.write_str("-")?; }
        write!(f, "{grouped} so'm")
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("discount cannot be negative")]
    NegativeDiscount,
    #[error("discount {discount} exceeds price {price}")]
    DiscountExceedsPrice { price: Money, discount: Money },
}

/// A reseller discount is valid when it keeps the price at or above zero.
pub fn check_discount(price: Money, discount: Money) -> Result<(), PricingError> {
    if discount.amount() < 0 { return Err(PricingError::NegativeDiscount); }
    if discount > price { return Err(PricingError::DiscountExceedsPrice { price, discount }); }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_strips_non_digits() {
        let phone = PhoneNumber::normalize("+998 (90) 123-45-67").unwrap();
        assert_eq!(phone.as_str(), "998901234567");
    }

    #[test]
    fn test_phone_without_digits() {
        assert_eq!(PhoneNumber::normalize(" - ( ) "), Err(PhoneNumberError::Empty));
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1_250_000).to_string(), "1 250 000 so'm");
        assert_eq!(Money::new(999).to_string(), "999 so'm");
        assert_eq!(Money::new(-45_000).to_string(), "-45 000 so'm");
    }

    #[test]
    fn test_discounted() {
        assert_eq!(Money::new(100_000).discounted(Money::new(15_000)), Money::new(85_000));
        assert_eq!(Money::new(10).discounted(Money::new(50)), Money::ZERO);
    }

    #[test]
    fn test_check_discount() {
        assert!(check_discount(Money::new(100), Money::new(100)).is_ok());
        assert_eq!(check_discount(Money::new(100), Money::new(-1)), Err(PricingError::NegativeDiscount));
        assert!(matches!(check_discount(Money::new(100), Money::new(101)), Err(PricingError::DiscountExceedsPrice { .. })));
    }
}
