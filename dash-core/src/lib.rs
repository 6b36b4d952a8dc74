//! Core types for the behavior analytics dashboard.
//!
//! This crate provides:
//! - `filters`: the `FilterState` value object and its field enums
//! - `query`: URL query-string encoding and defensive parsing
//! - `cookie`: JSON encoding of the persisted filter cookie
//! - `dates`: ISO date helpers and ordered date ranges
//! - `config`: runtime/compile-time configuration
//! - `error`: the `FilterError` type shared by the codecs

pub mod config;
pub mod cookie;
pub mod dates;
pub mod error;
pub mod filters;
pub mod query;

pub use config::DashboardConfig;
pub use error::{FilterError, Result};
pub use filters::{AgeGroup, FilterChange, FilterField, FilterState, Gender, PartialFilters, Series};
