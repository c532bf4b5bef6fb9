//! Library crate for wlc-rs exposing reusable modules.
pub mod checker;
pub mod config;
pub mod probe;
pub mod progress;
pub mod runner;
pub mod score;
pub mod sites;
pub mod transport;
pub mod types;
