// src/models/photo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo owned by exactly one project
/// `url` is usually a base64 data URL and is never inspected here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub created_at: DateTime<Utc>,
}

/// Request to add a photo; ids and timestamps are assigned server side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePhotoRequest {
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl CreatePhotoRequest {
    pub fn into_photo(self, id: String, created_at: DateTime<Utc>) -> Photo {
        Photo {
            id,
            url: self.url,
            name: self.name,
            type_: self.type_,
            created_at,
        }
    }
}
