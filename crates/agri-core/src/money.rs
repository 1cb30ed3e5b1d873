//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    52.5 + 220.0 + 0.1 + 0.2 drifts in the last digits  ❌               │
//! │                                                                         │
//! │  Surcharges make it worse: 1.05 and 1.15 are not exact in binary,      │
//! │  so every line total carries a tiny error that adds up across a cart.  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹45.50 is stored as 4550 paise                                      │
//! │    Surcharges are basis points, so line totals stay integers too       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agri_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(4550); // ₹45.50
//!
//! // Arithmetic operations
//! let doubled = price * 2;                      // ₹91.00
//! let total = price + Money::from_paise(500);   // ₹50.50
//! assert_eq!(total.to_string(), "₹50.50");
//!
//! // Parsing a displayed amount gives the same value back
//! let parsed: Money = "₹1,23,456.70".parse().unwrap();
//! assert_eq!(parsed.paise(), 12_345_670);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Currency symbol used for display.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Currency
// =============================================================================

/// Currency of every amount in the marketplace.
///
/// The reference marketplace only trades in Indian rupees; the enum exists so
/// a quote carries its currency explicitly instead of implying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => RUPEE_SYMBOL,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Dashboard deltas and adjustments may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare integer**: the frontend receives paise
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price_per_unit ──┬──► Pricing Engine ──► Line total (exact)   │
/// │                           │                                             │
/// │                           └──► Listing filter (max price)              │
/// │                                                                         │
/// │  Exact cart total ──► rounded once ──► Order.total_amount              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use agri_core::money::Money;
    ///
    /// let price = Money::from_paise(4550); // ₹45.50
    /// assert_eq!(price.paise(), 4550);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    ///
    /// ## Example
    /// ```rust
    /// use agri_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_paise(45, 50).paise(), 4550);
    /// assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    /// ```
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity, without any surcharge.
    ///
    /// ## Example
    /// ```rust
    /// use agri_core::money::Money;
    ///
    /// let per_kg = Money::from_paise(4000); // ₹40.00
    /// assert_eq!(per_kg.multiply_quantity(3).paise(), 12000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the value as fractional rupees. Display/comparison only.
    #[inline]
    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Groups an integer the en-IN way: the last three digits, then pairs.
///
/// `1234567` becomes `12,34,567`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        pairs.push(pair);
        rest = front;
    }
    pairs.push(rest);
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}

/// Display renders the amount the way the en-IN locale formats INR.
///
/// ```rust
/// use agri_core::money::Money;
///
/// assert_eq!(Money::from_paise(27250).to_string(), "₹272.50");
/// assert_eq!(Money::from_paise(123_456_789).to_string(), "₹12,34,567.89");
/// assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            RUPEE_SYMBOL,
            group_indian(magnitude / 100),
            magnitude % 100
        )
    }
}

/// Parses the output of [`Money`]'s `Display` (and a few common variants).
///
/// ## Accepted Forms
/// - `₹1,23,456.70`, `-₹5.50`
/// - `Rs 45.5`, `Rs. 45.50`, `INR 45.50`
/// - `45`, `45.5`, `1234.00`
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FIELD: &str = "amount";

        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };

        let s = [RUPEE_SYMBOL, "Rs.", "Rs", "INR"]
            .iter()
            .find_map(|prefix| s.strip_prefix(prefix))
            .unwrap_or(s)
            .trim_start();

        if s.is_empty() {
            return Err(ValidationError::Required {
                field: FIELD.to_string(),
            });
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (s, None),
        };

        if whole.is_empty() || whole.starts_with(',') || whole.ends_with(',') {
            return Err(ValidationError::invalid_format(FIELD, "missing rupee digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit() || c == ',') {
            return Err(ValidationError::invalid_format(FIELD, "unexpected character"));
        }

        let digits: String = whole.chars().filter(|c| *c != ',').collect();
        let rupees: i64 = digits
            .parse()
            .map_err(|_| ValidationError::invalid_format(FIELD, "rupee part is too large"))?;

        let paise = match fraction {
            None => 0,
            Some(frac) if (1..=2).contains(&frac.len()) && frac.chars().all(|c| c.is_ascii_digit()) => {
                let value: i64 = frac
                    .parse()
                    .map_err(|_| ValidationError::invalid_format(FIELD, "bad paise digits"))?;
                if frac.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    FIELD,
                    "expected one or two digits after the decimal point",
                ))
            }
        };

        let total = rupees
            .checked_mul(100)
            .and_then(|p| p.checked_add(paise))
            .ok_or_else(|| ValidationError::invalid_format(FIELD, "amount is too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
