// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod factories;
pub mod project_service;

pub use factories::*;
pub use project_service::*;
