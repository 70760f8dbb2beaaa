// src/application/mod.rs
//
// Application Layer - composition root

pub mod state;

pub use state::{AppConfig, AppState};
