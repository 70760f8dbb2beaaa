// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

pub mod movie;
pub mod query_key;
pub mod result_state;

pub use movie::Movie;
pub use query_key::QueryKey;
pub use result_state::ResultState;
