//! REST client for the print-shop API.
//!
//! Wraps the shop, upload, job, and download endpoints using [`reqwest`],
//! and exposes the [`backend::ShopBackend`] trait so the sync flows can be
//! driven against stubs in tests.

pub mod backend;
pub mod client;
pub mod download;

pub use backend::ShopBackend;
pub use client::{ApiError, PrintShopApi};
