//! Storefront client: backend API, session container and the shop and
//! console workflows built on them.

pub mod api;
pub mod config;
pub mod console;
pub mod errors;
pub mod notify;
pub mod observability;
pub mod scope;
pub mod session;
pub mod shop;
