//! Domain models for storefront.
//!
//! Types stored alongside the catalog and cart that are not part of the
//! shared core crate.

pub mod session;

pub use session::{CurrentUser, Session};
