// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod customization;
pub mod photo;
pub mod project;

pub use customization::*;
pub use photo::*;
pub use project::*;
