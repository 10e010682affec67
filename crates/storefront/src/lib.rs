//! Nordora storefront library.
//!
//! Client-side state for the furniture storefront: a typed persistence
//! adapter over on-device key/value storage, the product catalog with its
//! bundled seed, the shopping cart, and a single [`store::Store`] that
//! applies actions, persists the result and notifies subscribed views.
//! Staff sign-in for the stock screen lives in [`services::auth`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod format;
pub mod models;
pub mod services;
pub mod storage;
pub mod store;
