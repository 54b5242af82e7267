//! Longbox Core - Shared types library.
//!
//! This crate provides common types used across all Longbox components:
//! - `server` - HTTP API for barcode lookup and collection management
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated UPCs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
