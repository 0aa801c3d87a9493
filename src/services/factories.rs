// src/services/factories.rs
// DOCUMENTATION: Replaceable sources of time and identifiers
// PURPOSE: Keep project creation deterministic under test

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Wall clock used for created_at / updated_at
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Generator for project and photo identifiers
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random UUID v4 strings
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
