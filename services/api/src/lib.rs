//! services/api/src/lib.rs
//!
//! Library surface of the API service, shared by the `api` and `openapi`
//! binaries.

pub mod adapters;
pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod web;
