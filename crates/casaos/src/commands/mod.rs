//! Command handlers.

pub mod apps;
