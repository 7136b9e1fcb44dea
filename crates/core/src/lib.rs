//! Storefront
//!
//! Domain types and synchronous logic for a two-sided shop client: catalog
//! snapshots and collection queries, the shopping cart, pricing, checkout,
//! orders, admin product drafts and the durable key-value mirror.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod profile;
pub mod storage;
pub mod token;

#[cfg(test)]
mod fixtures;
