//! Web Larek Core - Shared domain types.
//!
//! This crate provides the types shared by every Web Larek component:
//! - `storefront` - Headless storefront (DOM, event bus, state, API client)
//! - `cli` - Command-line front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no DOM, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, phones,
//!   products and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
