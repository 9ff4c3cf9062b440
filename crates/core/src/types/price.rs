//! Type-safe price representation using decimal arithmetic.
//!
//! Prices in the Larek store are whole or fractional amounts of a single
//! in-game currency ("synapses"). The API sends them as plain JSON numbers,
//! and a product without a price is sent as `null`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the store currency, as shown after an amount.
pub const CURRENCY_LABEL: &str = "synapses";

/// Label shown in place of a price for products that cannot be bought.
pub const PRICELESS_LABEL: &str = "Priceless";

/// A price in synapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of synapses.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format an optional price the way cards display it.
    ///
    /// `None` renders as [`PRICELESS_LABEL`].
    #[must_use]
    pub fn label(price: Option<Self>) -> String {
        price.map_or_else(|| PRICELESS_LABEL.to_string(), |p| p.to_string())
    }

    /// The amount with a space between thousands groups, without the currency.
    ///
    /// ```
    /// use web_larek_core::Price;
    ///
    /// assert_eq!(Price::from_units(1_500).grouped(), "1 500");
    /// assert_eq!(Price::from_units(750).grouped(), "750");
    /// ```
    #[must_use]
    pub fn grouped(&self) -> String {
        let normalized = self.0.normalize().to_string();
        let (sign, unsigned) = normalized
            .strip_prefix('-')
            .map_or(("", normalized.as_str()), |rest| ("-", rest));
        let (int_part, frac_part) = unsigned
            .split_once('.')
            .map_or((unsigned, None), |(i, f)| (i, Some(f)));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        match frac_part {
            Some(frac) => format!("{sign}{grouped}.{frac}"),
            None => format!("{sign}{grouped}"),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_LABEL}", self.grouped())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
