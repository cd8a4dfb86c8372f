//! TechStore Core - Shared types library.
//!
//! This crate provides common types used across all TechStore components:
//! - `storefront` - Catalog, cart, and filter state management
//! - `cli` - Command-line tools for browsing and cart sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no framework
//! dependencies. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   [`types::Product`] record every other component consumes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
