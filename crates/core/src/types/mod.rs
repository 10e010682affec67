//! Core types for Nordora.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod role;

pub use cart::CartLine;
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{Product, ProductDraft, ValidationErrors, sanitize_input};
pub use role::Role;
