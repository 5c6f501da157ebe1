//! Frosteva storefront library.
//!
//! Catalog, checkout, and back-office JSON service. This crate provides the
//! storefront as a library so it can be tested in-process and reused by the
//! command-line client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
