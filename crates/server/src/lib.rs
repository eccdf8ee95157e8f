//! Kabelindo server library.
//!
//! Exposes the application modules so the CLI and integration tests can reuse
//! repositories, services, and configuration.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod services;
pub mod state;
