// src/handlers/projects.rs
// DOCUMENTATION: HTTP handlers for project operations
// PURPOSE: Parse requests, call the service, return responses

use crate::errors::ProjectsError;
use crate::models::{CreatePhotoRequest, CreateProjectRequest, UpdateProjectRequest};
use crate::services::ProjectService;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

/// GET /api/
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "SnapStyle Studio API is running!" }))
}

/// GET /api/projects
pub async fn list_projects(
    service: web::Data<ProjectService>,
) -> Result<impl Responder, ProjectsError> {
    let projects = service
        .list_projects()
        .await
        .map_err(ProjectsError::masked("Failed to fetch projects"))?;
    Ok(HttpResponse::Ok().json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    service: web::Data<ProjectService>,
    path: web::Path<String>,
) -> Result<impl Responder, ProjectsError> {
    let project = service
        .get_project(&path.into_inner())
        .await
        .map_err(ProjectsError::masked("Failed to fetch project"))?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/projects
pub async fn create_project(
    service: web::Data<ProjectService>,
    req: web::Json<CreateProjectRequest>,
) -> Result<impl Responder, ProjectsError> {
    let project = service
        .create_project(req.into_inner())
        .await
        .map_err(ProjectsError::masked("Failed to create project"))?;
    Ok(HttpResponse::Created().json(project))
}

/// PUT /api/projects/{id}
/// Partial update, see UpdateProjectRequest
pub async fn update_project(
    service: web::Data<ProjectService>,
    path: web::Path<String>,
    req: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, ProjectsError> {
    let project = service
        .update_project(&path.into_inner(), req.into_inner())
        .await
        .map_err(ProjectsError::masked("Failed to update project"))?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    service: web::Data<ProjectService>,
    path: web::Path<String>,
) -> Result<impl Responder, ProjectsError> {
    service
        .delete_project(&path.into_inner())
        .await
        .map_err(ProjectsError::masked("Failed to delete project"))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Project deleted successfully" })))
}

/// POST /api/projects/{id}/photos
/// Body is a JSON array of photos to append
pub async fn add_photos(
    service: web::Data<ProjectService>,
    path: web::Path<String>,
    req: web::Json<Vec<CreatePhotoRequest>>,
) -> Result<impl Responder, ProjectsError> {
    let project = service
        .add_photos(&path.into_inner(), req.into_inner())
        .await
        .map_err(ProjectsError::masked("Failed to add photos to project"))?;
    Ok(HttpResponse::Ok().json(project))
}

/// DELETE /api/projects/{id}/photos/{photo_id}
pub async fn remove_photo(
    service: web::Data<ProjectService>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, ProjectsError> {
    let (project_id, photo_id) = path.into_inner();
    service
        .remove_photo(&project_id, &photo_id)
        .await
        .map_err(ProjectsError::masked("Failed to remove photo from project"))?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Photo removed successfully" })))
}

/// JSON extractor settings: body limit and 400 on malformed bodies
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req: &HttpRequest| {
            log::warn!("Rejected request body: {}", err);
            ProjectsError::ValidationError(err.to_string()).into()
        })
}

/// Configuration for project routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("", web::get().to(root))
            .route("/", web::get().to(root))
            .route("/projects", web::get().to(list_projects))
            .route("/projects", web::post().to(create_project))
            .route("/projects/{id}", web::get().to(get_project))
            .route("/projects/{id}", web::put().to(update_project))
            .route("/projects/{id}", web::delete().to(delete_project))
            .route("/projects/{id}/photos", web::post().to(add_photos))
            .route(
                "/projects/{id}/photos/{photo_id}",
                web::delete().to(remove_photo),
            ),
    );
}
