//! External collaborators and domain services.
//!
//! - [`auth`] - password hashing and bearer-token issuance/verification
//! - [`metron`] - Metron comic catalog lookup (strict: failures propagate)
//! - [`barcode`] - barcode recognition service (lenient: failures yield `None`)

pub mod auth;
pub mod barcode;
pub mod metron;
