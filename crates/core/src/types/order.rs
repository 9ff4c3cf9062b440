//! Orders submitted to `POST /order`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::{OrderId, ProductId};
use super::phone::Phone;
use super::price::Price;

/// How the customer pays.
///
/// The order form names its buttons `card` and `cash`; the API calls the
/// card option `online`. Both spellings parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(rename = "online", alias = "card")]
    Card,
    Cash,
}

/// Error returned when a payment method name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(pub String);

impl PaymentMethod {
    /// Name of the order form button that selects this method.
    #[must_use]
    pub const fn button_name(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "card" | "online" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            other => Err(PaymentMethodError(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.button_name())
    }
}

/// The user-editable fields of an order.
///
/// `Payment` and `Address` belong to the delivery step, `Email` and `Phone`
/// to the contacts step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl OrderField {
    /// Fields filled in on the delivery step.
    pub const DELIVERY: [Self; 2] = [Self::Payment, Self::Address];
    /// Fields filled in on the contacts step.
    pub const CONTACTS: [Self; 2] = [Self::Email, Self::Phone];

    /// Field name as used by form inputs and the wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for OrderField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "address" => Ok(Self::Address),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(format!("unknown order field: {other}")),
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete, validated order ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub payment: PaymentMethod,
    pub address: String,
    pub email: Email,
    pub phone: Phone,
    pub total: Price,
    pub items: Vec<ProductId>,
}

/// Response to a submitted order.
///
/// The API has answered both `{ id, total }` and `{ total, success }`, so the
/// identifying fields are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub total: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}
