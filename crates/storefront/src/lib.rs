//! TechStore Storefront - catalog, cart, and filter state management.
//!
//! This crate is the framework-agnostic core of a client-rendered storefront.
//! It owns three components:
//!
//! - [`catalog`] - read-only queries over the static product list
//! - [`query`] - composition of category, price-bucket, and free-text filters
//!   into a single result set, round-trippable to a shareable query string
//! - [`cart`] - the mutable cart aggregate with derived totals, subscriptions,
//!   and persistence to a durable key-value slot
//!
//! # Architecture
//!
//! Everything here runs synchronously on a single thread: a presentation
//! layer reads the [`catalog::Catalog`], filters it through a
//! [`query::FilterState`], and routes every cart mutation through the
//! [`cart::CartStore`], which is the sole writer of cart state. There is no
//! server, no database, and no concurrency coordination.
//!
//! Stores are explicitly constructed and injected (see [`state::AppState`]);
//! there is no ambient global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod persist;
pub mod query;
pub mod state;

pub use error::{Result, StoreError};
