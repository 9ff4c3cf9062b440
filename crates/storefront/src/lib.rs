//! Web Larek storefront library.
//!
//! A headless rendition of the Larek shop front: a small DOM, view components
//! over it, a typed event bus, the application state and the API client, all
//! tied together by [`Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod events;
pub mod state;

pub use api::{ApiError, LarekApi, LarekClient};
pub use app::Storefront;
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
