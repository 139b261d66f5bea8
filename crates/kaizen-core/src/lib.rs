//! Core types and trait definitions for the Kaizen idea portal.
//!
//! This crate has no HTTP or database dependencies.
//! All other crates depend on it; storage is reached only through the
//! [`store::KeyValueStore`] trait and classification through
//! [`classify::Classifier`].

pub mod card;
pub mod classify;
pub mod config;
pub mod employee;
pub mod error;
pub mod location;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod submission;
pub mod wall;

mod serde_util;

pub use error::{Error, Result};
