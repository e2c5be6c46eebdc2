//! Command handlers — wire infrastructure into application services.

pub mod setup;
