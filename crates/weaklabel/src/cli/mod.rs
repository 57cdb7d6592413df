//! Command handlers.

pub mod config;
pub mod label;
pub mod rank;
pub mod vocab;
