//! Domain types and workflow state machines for the shiftboard backend.
//!
//! This crate has zero internal deps so the store and API layers (and any
//! future CLI tooling) can both build on it.

pub mod availability;
pub mod error;
pub mod shift;
pub mod shift_request;
pub mod staff;
pub mod timeoff;
pub mod types;
