// src/services/project_service.rs
// DOCUMENTATION: Business logic for collage projects
// PURPOSE: Intermediary between handlers and the document store

use crate::db::{Document, DocumentStore};
use crate::errors::ProjectsError;
use crate::models::{CreatePhotoRequest, CreateProjectRequest, Photo, Project, UpdateProjectRequest};
use crate::services::{Clock, IdGenerator, SystemClock, UuidGenerator};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Collection holding project documents
pub const PROJECTS_COLLECTION: &str = "projects";

/// Project CRUD plus photo list mutation
/// DOCUMENTATION: Every mutation is a read followed by a partial write with no
/// locking in between, so concurrent writers to one project are last-write-wins.
#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_factories(store, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    pub fn with_factories(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }

    /// Release the store at shutdown
    pub async fn close(&self) {
        self.store.close().await;
    }

    /// All projects in the store's insertion order
    pub async fn list_projects(&self) -> Result<Vec<Project>, ProjectsError> {
        let docs = self.store.find_all().await?;

        docs.into_iter()
            .map(|doc| Project::from_document(doc).map_err(ProjectsError::from))
            .collect()
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ProjectsError> {
        let doc = self
            .store
            .find_one(id)
            .await?
            .ok_or_else(|| ProjectsError::ProjectNotFound(id.to_string()))?;

        Ok(Project::from_document(doc)?)
    }

    /// Create a project, assigning ids to it and to every supplied photo
    pub async fn create_project(&self, req: CreateProjectRequest) -> Result<Project, ProjectsError> {
        req.validate()?;

        let now = self.clock.now();
        let project = Project {
            id: self.ids.next_id(),
            name: req.name,
            photos: self.new_photos(req.photos, now),
            layout: req.layout,
            filter: req.filter,
            customization: req.customization.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_one(project.to_document()?).await?;

        log::info!(
            "Created project {} with {} photos",
            project.id,
            project.photos.len()
        );
        Ok(project)
    }

    /// Write only the supplied fields plus updated_at, then read back
    pub async fn update_project(
        &self,
        id: &str,
        req: UpdateProjectRequest,
    ) -> Result<Project, ProjectsError> {
        req.validate()?;
        self.ensure_exists(id).await?;

        let now = self.clock.now();
        let mut fields = Document::new();
        set_field(&mut fields, "updated_at", &now)?;

        if let Some(name) = req.name {
            set_field(&mut fields, "name", &name)?;
        }
        if let Some(photos) = req.photos {
            // Replacement, not a merge: every photo gets a new id
            set_field(&mut fields, "photos", &self.new_photos(photos, now))?;
        }
        if let Some(layout) = req.layout {
            set_field(&mut fields, "layout", &layout)?;
        }
        if let Some(filter) = req.filter {
            set_field(&mut fields, "filter", &filter)?;
        }
        if let Some(customization) = req.customization {
            set_field(&mut fields, "customization", &customization)?;
        }

        log::debug!("Updating project {} fields {:?}", id, fields.keys().collect::<Vec<_>>());
        self.store.update_one(id, fields).await?;

        self.get_project(id).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ProjectsError> {
        self.ensure_exists(id).await?;

        let deleted = self.store.delete_one(id).await?;
        if deleted == 0 {
            return Err(ProjectsError::ProjectNotFound(id.to_string()));
        }

        log::info!("Deleted project {}", id);
        Ok(())
    }

    /// Append photos after the existing ones, in input order
    pub async fn add_photos(
        &self,
        id: &str,
        photos: Vec<CreatePhotoRequest>,
    ) -> Result<Project, ProjectsError> {
        let project = self.get_project(id).await?;

        let now = self.clock.now();
        let added = photos.len();
        let mut all_photos = project.photos;
        all_photos.extend(self.new_photos(photos, now));

        self.write_photos(id, &all_photos, now).await?;

        log::info!("Added {} photos to project {}", added, id);
        self.get_project(id).await
    }

    /// Remove the photo with `photo_id`, keeping the others in place
    pub async fn remove_photo(&self, id: &str, photo_id: &str) -> Result<(), ProjectsError> {
        let project = self.get_project(id).await?;

        let before = project.photos.len();
        let remaining: Vec<Photo> = project
            .photos
            .into_iter()
            .filter(|photo| photo.id != photo_id)
            .collect();

        if remaining.len() == before {
            return Err(ProjectsError::PhotoNotFound {
                project_id: id.to_string(),
                photo_id: photo_id.to_string(),
            });
        }

        let now = self.clock.now();
        self.write_photos(id, &remaining, now).await?;

        log::info!("Removed photo {} from project {}", photo_id, id);
        Ok(())
    }

    async fn ensure_exists(&self, id: &str) -> Result<(), ProjectsError> {
        match self.store.find_one(id).await? {
            Some(_) => Ok(()),
            None => Err(ProjectsError::ProjectNotFound(id.to_string())),
        }
    }

    async fn write_photos(
        &self,
        id: &str,
        photos: &[Photo],
        now: DateTime<Utc>,
    ) -> Result<(), ProjectsError> {
        let mut fields = Document::new();
        set_field(&mut fields, "photos", &photos)?;
        set_field(&mut fields, "updated_at", &now)?;

        self.store.update_one(id, fields).await?;
        Ok(())
    }

    fn new_photos(&self, photos: Vec<CreatePhotoRequest>, now: DateTime<Utc>) -> Vec<Photo> {
        photos
            .into_iter()
            .map(|photo| photo.into_photo(self.ids.next_id(), now))
            .collect()
    }
}

fn set_field<T: Serialize + ?Sized>(
    fields: &mut Document,
    key: &str,
    value: &T,
) -> Result<(), ProjectsError> {
    fields.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::models::{Customization, DEFAULT_LAYOUT};
    use crate::services::factories::testing::{SequentialIds, SteppingClock};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio_test::assert_ok;

    fn service() -> ProjectService {
        service_over(Arc::new(MemoryDocumentStore::new()))
    }

    fn service_over(store: Arc<dyn DocumentStore>) -> ProjectService {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        ProjectService::with_factories(
            store,
            Arc::new(SteppingClock::new(start)),
            Arc::new(SequentialIds::default()),
        )
    }

    /// Memory store where another writer removes the project between our
    /// read and our write
    struct RacingStore {
        inner: MemoryDocumentStore,
        delete_matches_nothing: bool,
        gone_after_update: AtomicBool,
    }

    impl RacingStore {
        fn new(delete_matches_nothing: bool) -> Self {
            Self {
                inner: MemoryDocumentStore::new(),
                delete_matches_nothing,
                gone_after_update: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for RacingStore {
        async fn find_all(&self) -> Result<Vec<Document>, ProjectsError> {
            self.inner.find_all().await
        }

        async fn find_one(&self, id: &str) -> Result<Option<Document>, ProjectsError> {
            if self.gone_after_update.load(Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_one(id).await
        }

        async fn insert_one(&self, doc: Document) -> Result<(), ProjectsError> {
            self.inner.insert_one(doc).await
        }

        async fn update_one(&self, id: &str, fields: Document) -> Result<u64, ProjectsError> {
            let matched = self.inner.update_one(id, fields).await?;
            self.gone_after_update.store(true, Ordering::SeqCst);
            Ok(matched)
        }

        async fn delete_one(&self, id: &str) -> Result<u64, ProjectsError> {
            if self.delete_matches_nothing {
                return Ok(0);
            }
            self.inner.delete_one(id).await
        }
    }

    fn photo(name: &str) -> CreatePhotoRequest {
        CreatePhotoRequest {
            url: format!("data:image/jpeg;base64,{}", name),
            name: name.to_string(),
            type_: "image/jpeg".to_string(),
        }
    }

    fn create(name: &str, photos: Vec<CreatePhotoRequest>) -> CreateProjectRequest {
        CreateProjectRequest {
            name: name.to_string(),
            photos,
            layout: DEFAULT_LAYOUT.to_string(),
            filter: None,
            customization: None,
        }
    }

    fn photo_ids(project: &Project) -> Vec<String> {
        project.photos.iter().map(|p| p.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_create_applies_default_customization() {
        let svc = service();
        let project = svc.create_project(create("Trip", vec![])).await.unwrap();

        assert_eq!(project.customization, Customization::default());
        assert_eq!(project.customization.border_color, "#ffffff");
        assert_eq!(project.customization.spacing, 10);
        assert_eq!(project.customization.text_position, "bottom");
        assert_eq!(project.layout, "strip-4");
        assert_eq!(project.filter, None);
        assert!(project.photos.is_empty());
        assert_eq!(project.created_at, project.updated_at);
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let svc = service();
        let project = svc
            .create_project(create("Trip", vec![photo("a"), photo("b")]))
            .await
            .unwrap();

        assert!(!project.id.is_empty());
        let mut seen: HashSet<String> = photo_ids(&project).into_iter().collect();
        assert_eq!(seen.len(), 2);
        assert!(seen.insert(project.id.clone()));
        assert!(project.photos.iter().all(|p| p.created_at == project.created_at));
    }

    #[tokio::test]
    async fn test_get_returns_what_was_created() {
        let svc = service();
        let custom = Customization {
            text: "Sarah & John".to_string(),
            spacing: 15,
            ..Default::default()
        };
        let req = CreateProjectRequest {
            name: "Wedding Memories".to_string(),
            photos: vec![photo("one")],
            layout: "grid-2x2".to_string(),
            filter: Some("cinematic-1".to_string()),
            customization: Some(custom.clone()),
        };

        let created = svc.create_project(req).await.unwrap();
        let fetched = svc.get_project(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.customization, custom);
        assert_eq!(fetched.filter.as_deref(), Some("cinematic-1"));
        assert_eq!(fetched.photos[0].name, "one");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let svc = service();
        let err = svc.create_project(create("", vec![])).await.unwrap_err();
        assert!(matches!(err, ProjectsError::ValidationError(_)));
        assert!(svc.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let svc = service();
        let a = svc.create_project(create("A", vec![])).await.unwrap();
        let b = svc.create_project(create("B", vec![])).await.unwrap();

        let ids: Vec<String> = svc
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_update_name_only_leaves_rest() {
        let svc = service();
        let req = CreateProjectRequest {
            filter: Some("vintage-1".to_string()),
            ..create("Trip", vec![photo("a")])
        };
        let created = svc.create_project(req).await.unwrap();

        let patch = UpdateProjectRequest {
            name: Some("Road Trip".to_string()),
            ..Default::default()
        };
        let updated = svc.update_project(&created.id, patch).await.unwrap();

        assert_eq!(updated.name, "Road Trip");
        assert_eq!(updated.photos, created.photos);
        assert_eq!(updated.layout, created.layout);
        assert_eq!(updated.filter, created.filter);
        assert_eq!(updated.customization, created.customization);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_photos_replaces_list() {
        let svc = service();
        let created = svc
            .create_project(create("Trip", vec![photo("a"), photo("b"), photo("c")]))
            .await
            .unwrap();
        let old_ids: HashSet<String> = photo_ids(&created).into_iter().collect();

        let patch = UpdateProjectRequest {
            photos: Some(vec![photo("a"), photo("z")]),
            ..Default::default()
        };
        let updated = svc.update_project(&created.id, patch).await.unwrap();

        assert_eq!(updated.photos.len(), 2);
        assert!(photo_ids(&updated).iter().all(|id| !old_ids.contains(id)));
        assert_eq!(updated.photos[1].name, "z");
    }

    #[tokio::test]
    async fn test_update_replaces_customization_and_keeps_filter_on_null() {
        let svc = service();
        let req = CreateProjectRequest {
            filter: Some("modern-2".to_string()),
            ..create("Trip", vec![])
        };
        let created = svc.create_project(req).await.unwrap();

        let patch = UpdateProjectRequest {
            layout: Some("grid-3x2".to_string()),
            customization: Some(Customization {
                text_size: 24,
                ..Default::default()
            }),
            filter: None,
            ..Default::default()
        };
        let updated = svc.update_project(&created.id, patch).await.unwrap();

        assert_eq!(updated.layout, "grid-3x2");
        assert_eq!(updated.customization.text_size, 24);
        assert_eq!(updated.filter.as_deref(), Some("modern-2"));
    }

    #[tokio::test]
    async fn test_add_photos_appends_in_order() {
        let svc = service();
        let created = svc
            .create_project(create("Trip", vec![photo("e1")]))
            .await
            .unwrap();

        let updated = svc
            .add_photos(&created.id, vec![photo("p1"), photo("p2")])
            .await
            .unwrap();

        let names: Vec<&str> = updated.photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["e1", "p1", "p2"]);
        assert_eq!(updated.photos[0].id, created.photos[0].id);

        let ids: HashSet<String> = photo_ids(&updated).into_iter().collect();
        assert_eq!(ids.len(), 3);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_remove_photo_once() {
        let svc = service();
        let created = svc
            .create_project(create("Trip", vec![photo("a"), photo("b"), photo("c")]))
            .await
            .unwrap();
        let target = created.photos[1].id.clone();

        assert_ok!(svc.remove_photo(&created.id, &target).await);

        let after = svc.get_project(&created.id).await.unwrap();
        let names: Vec<&str> = after.photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(after.updated_at > created.updated_at);

        let err = svc.remove_photo(&created.id, &target).await.unwrap_err();
        assert!(matches!(err, ProjectsError::PhotoNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let svc = service();
        let created = svc.create_project(create("Trip", vec![])).await.unwrap();

        assert_ok!(svc.delete_project(&created.id).await);

        let err = svc.get_project(&created.id).await.unwrap_err();
        assert!(matches!(err, ProjectsError::ProjectNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found_everywhere() {
        let svc = service();
        let missing = "does-not-exist";

        let errors = vec![
            svc.get_project(missing).await.unwrap_err(),
            svc.update_project(missing, UpdateProjectRequest::default())
                .await
                .unwrap_err(),
            svc.delete_project(missing).await.unwrap_err(),
            svc.add_photos(missing, vec![photo("a")]).await.unwrap_err(),
            svc.remove_photo(missing, "photo").await.unwrap_err(),
        ];

        for err in errors {
            assert!(matches!(err, ProjectsError::ProjectNotFound(_)), "{:?}", err);
        }
    }

    #[tokio::test]
    async fn test_trip_scenario() {
        let svc = service();
        let trip = svc.create_project(create("Trip", vec![])).await.unwrap();
        assert!(trip.photos.is_empty());

        let with_photos = svc
            .add_photos(&trip.id, vec![photo("first"), photo("second")])
            .await
            .unwrap();
        assert_eq!(with_photos.photos.len(), 2);

        let first_id = with_photos.photos[0].id.clone();
        svc.remove_photo(&trip.id, &first_id).await.unwrap();

        let after = svc.get_project(&trip.id).await.unwrap();
        assert_eq!(after.photos.len(), 1);
        assert_eq!(after.photos[0].name, "second");

        svc.delete_project(&trip.id).await.unwrap();
        assert!(svc.get_project(&trip.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_matching_nothing_is_not_found() {
        let svc = service_over(Arc::new(RacingStore::new(true)));
        let created = svc.create_project(create("Trip", vec![])).await.unwrap();

        let err = svc.delete_project(&created.id).await.unwrap_err();
        assert!(matches!(err, ProjectsError::ProjectNotFound(ref id) if *id == created.id));
    }

    #[tokio::test]
    async fn test_update_read_back_of_vanished_project_is_not_found() {
        let svc = service_over(Arc::new(RacingStore::new(false)));
        let created = svc.create_project(create("Trip", vec![])).await.unwrap();

        let patch = UpdateProjectRequest {
            name: Some("Road Trip".to_string()),
            ..Default::default()
        };
        let err = svc.update_project(&created.id, patch).await.unwrap_err();
        assert!(matches!(err, ProjectsError::ProjectNotFound(ref id) if *id == created.id));
    }
}
