//! Nordora Core - Shared types library.
//!
//! This crate provides common types used across all Nordora components:
//! - `storefront` - Catalog, cart, store and session logic
//! - `cli` - Terminal front end for shoppers and stock managers
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, products, cart lines and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
