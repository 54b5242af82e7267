//! Core types for Longbox.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod upc;

pub use id::*;
pub use upc::{Upc, UpcError};
