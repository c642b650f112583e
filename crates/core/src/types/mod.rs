//! Core types for Rinkside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cents;
pub mod email;
pub mod id;
pub mod status;

pub use cents::Cents;
pub use email::{Email, EmailError};
pub use id::*;
pub use status::{CartStatus, OrderStatus};
