//! Larek API access.
//!
//! [`LarekApi`] is the seam between the storefront and the network: the
//! storefront only ever awaits it from `load_catalog` and `process_requests`,
//! so tests substitute a scripted implementation.

mod client;

use std::future::Future;

use thiserror::Error;
use web_larek_core::{Order, OrderResult, ProductList};

pub use client::LarekClient;

/// Errors from the Larek API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body did not decode.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Message suitable for showing to the customer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(_) => "The store could not be reached".to_string(),
            Self::Parse(_) => "The store sent an unexpected response".to_string(),
        }
    }
}

/// Operations the storefront needs from the API.
pub trait LarekApi {
    /// `GET /product/`.
    fn get_products(&self) -> impl Future<Output = Result<ProductList, ApiError>>;

    /// `POST /order`.
    fn submit_order(&self, order: &Order) -> impl Future<Output = Result<OrderResult, ApiError>>;
}

/// Work queued by bus handlers for the next `process_requests` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    SubmitOrder(Order),
}
