//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: data and simple helpers only, no I/O.
//!
//! The central type is [`tenant::TenantConfig`], an immutable branding snapshot
//! for one hostname. Updates never mutate a snapshot in place; they go through
//! [`tenant::TenantConfigPatch`] and produce a new value.

pub mod config;
pub mod constants;
pub mod features;
pub mod state;
pub mod tenant;
