// src/models/project.rs
// DOCUMENTATION: Core data structures for collage projects
// PURPOSE: Serialization models shared by the API and the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{CreatePhotoRequest, Customization, Photo};
use crate::db::Document;

/// Layout used when a project is created without one
pub const DEFAULT_LAYOUT: &str = "strip-4";

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

/// A complete project document
/// DOCUMENTATION: Same JSON shape in the store and in API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Application level identifier (UUID v4 string)
    pub id: String,

    pub name: String,

    /// Insertion order is the default collage order
    #[serde(default)]
    pub photos: Vec<Photo>,

    /// Opaque layout template key, e.g. "strip-4" or "grid-2x2"
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Optional filter preset id, e.g. "vintage-1"
    #[serde(default)]
    pub filter: Option<String>,

    #[serde(default)]
    pub customization: Customization,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Serialize into a storable document
    pub fn to_document(&self) -> Result<Document, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(serde::ser::Error::custom("project did not serialize to an object")),
        }
    }

    /// Rebuild a project from a stored document
    pub fn from_document(doc: Document) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(doc))
    }
}

/// Request DTO for creating a new project
/// DOCUMENTATION: Body of POST /api/projects
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name (required)
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Initial photos, each gets a fresh id
    #[serde(default)]
    pub photos: Vec<CreatePhotoRequest>,

    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default)]
    pub filter: Option<String>,

    /// Defaults apply when absent
    #[serde(default)]
    pub customization: Option<Customization>,
}

/// Request DTO for updating an existing project
/// DOCUMENTATION: Body of PUT /api/projects/{id}
/// Only provided fields are written. `photos` and `customization` replace the
/// stored value wholesale. A null value counts as not provided, so `filter`
/// cannot be cleared once set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub photos: Option<Vec<CreatePhotoRequest>>,

    pub layout: Option<String>,

    pub filter: Option<String>,

    pub customization: Option<Customization>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateProjectRequest = serde_json::from_value(json!({ "name": "Trip" })).unwrap();

        assert_eq!(req.name, "Trip");
        assert!(req.photos.is_empty());
        assert_eq!(req.layout, DEFAULT_LAYOUT);
        assert_eq!(req.filter, None);
        assert_eq!(req.customization, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_requires_name() {
        let missing = serde_json::from_value::<CreateProjectRequest>(json!({ "layout": "grid-2x2" }));
        assert!(missing.is_err());

        let empty: CreateProjectRequest = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_update_request_null_means_absent() {
        let req: UpdateProjectRequest =
            serde_json::from_value(json!({ "name": "Renamed", "filter": null })).unwrap();

        assert_eq!(req.name.as_deref(), Some("Renamed"));
        assert_eq!(req.filter, None);
        assert!(req.photos.is_none());
        assert!(req.validate().is_ok());

        let blank = UpdateProjectRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_document_conversion_keeps_shape() {
        let now = Utc::now();
        let project = Project {
            id: "proj-1".to_string(),
            name: "Wedding Memories".to_string(),
            photos: vec![],
            layout: "grid-2x2".to_string(),
            filter: None,
            customization: Customization::default(),
            created_at: now,
            updated_at: now,
        };

        let doc = project.to_document().unwrap();
        assert_eq!(doc["id"], "proj-1");
        assert!(doc["filter"].is_null());
        assert_eq!(doc["customization"]["spacing"], 10);

        let back = Project::from_document(doc).unwrap();
        assert_eq!(back, project);
    }
}
