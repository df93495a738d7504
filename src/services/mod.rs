//! Computations layered on top of the loaded lists.
//!
//! Nothing here talks to the network. Controllers call these after a load,
//! and the dashboard calls them on whatever data it has.

/// Totals over transactions and wishlist items
pub mod aggregate;
/// Financial health scores and goal progress
pub mod health;
/// Payment registration draft
pub mod payment;
