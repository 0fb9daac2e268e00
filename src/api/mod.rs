//! API client for the music catalog service.
//!
//! [`CatalogApi`] wraps the HTTP endpoints (`songs`, `artists`, `albums`,
//! `categories`) and handles base URL fallback.

pub mod catalog;

pub use catalog::CatalogApi;
