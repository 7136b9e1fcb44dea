//! Admin console workflows. Every call carries the session token.

pub mod orders;
pub mod products;
