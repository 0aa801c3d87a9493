// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod projects;

pub use health::config as health_config;
pub use projects::config as projects_config;
pub use projects::json_config;
