//! Personal-finance front-end core.
//!
//! Keeps page-level lists of accounts, categories, subcategories, transactions
//! and wishlists in sync with a REST API, and mediates create, update, delete
//! and payment edits through per-page form drafts.
//!
//! # Layout
//!
//! - `config`: environment-driven settings, resolved once
//! - `gateway`: REST and in-memory access to collections
//! - `models`: typed records, form fields, validation
//! - `controller`: the per-page sync controller and its pages
//! - `services`: totals, health scores, payment drafts
//! - `app`: shared context that hands out page controllers

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod http;
pub mod models;
pub mod services;

pub use app::AppContext;
pub use config::Config;
pub use error::AppError;
