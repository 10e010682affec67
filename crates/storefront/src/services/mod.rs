//! Services for storefront.
//!
//! # Services
//!
//! - `auth` - Staff sign-in for the stock screen and session lifetime

pub mod auth;
