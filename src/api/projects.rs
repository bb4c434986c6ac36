// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Project showcase handlers. Mutations are creator-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Project, ProjectCategory, ProjectStatus},
    state::AppState,
    store::ProjectFilter,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub github_repo: Option<String>,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProjectCategory>,
    pub github_repo: Option<String>,
    pub team_members: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsQuery {
    pub category: Option<ProjectCategory>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub projects: Vec<Project>,
}

/// GitHub repository URL shape: `https://github.com/{owner}/{repo}`, with an
/// optional `.git` suffix.
fn is_valid_github_repo(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("https://github.com/") else {
        return false;
    };
    let rest = rest.strip_suffix(".git").unwrap_or(rest);
    let mut segments = rest.split('/');
    let (Some(owner), Some(repo), None) = (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    let valid_segment =
        |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid_segment(owner) && valid_segment(repo)
}

fn check_github_repo(repo: Option<&str>) -> Result<(), ApiError> {
    match repo {
        Some(url) if !url.is_empty() && !is_valid_github_repo(url) => {
            Err(ApiError::bad_request("Invalid GitHub repository URL"))
        }
        _ => Ok(()),
    }
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    tag = "Projects",
    security(("bearer" = [])),
    responses(
        (status = 201, body = ProjectResponse),
        (status = 400, description = "Invalid project data")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    Auth(current): Auth,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Project name is required"));
    }
    if request.description.trim().is_empty() {
        return Err(ApiError::bad_request("Project description is required"));
    }
    check_github_repo(request.github_repo.as_deref())?;

    let now = Utc::now();
    let project = Project {
        id: Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description,
        category: request.category,
        creator: current.id,
        team_members: request.team_members,
        github_repo: request.github_repo.filter(|r| !r.is_empty()),
        tags: request.tags,
        status: ProjectStatus::Planning,
        created_at: now,
        updated_at: now,
    };

    let project = state.store.write().await.insert_project(project)?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            success: true,
            project,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/projects",
    params(ListProjectsQuery),
    tag = "Projects",
    responses((status = 200, body = ProjectListResponse))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let filter = ProjectFilter {
        category: query.category,
        tag: query.tag,
        search: query.search,
    };
    let (projects, total) = state.store.read().await.list_projects(&filter, page, limit);

    Ok(Json(ProjectListResponse {
        success: true,
        count: projects.len(),
        total,
        page,
        total_pages: total.div_ceil(limit),
        projects,
    }))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    tag = "Projects",
    responses(
        (status = 200, body = ProjectResponse),
        (status = 404, description = "Project not found")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.store.read().await.project(&id)?;
    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    tag = "Projects",
    security(("bearer" = [])),
    responses(
        (status = 200, body = ProjectResponse),
        (status = 403, description = "Not the project creator"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn update_project(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    check_github_repo(request.github_repo.as_deref())?;

    let mut store = state.store.write().await;
    let project = store.project(&id)?;
    if project.creator != current.id {
        return Err(ApiError::forbidden("Not authorized to update this project"));
    }

    let project = store.update_project(&id, |project| {
        if let Some(name) = request.name {
            project.name = name;
        }
        if let Some(description) = request.description {
            project.description = description;
        }
        if let Some(category) = request.category {
            project.category = category;
        }
        if let Some(github_repo) = request.github_repo {
            project.github_repo = if github_repo.is_empty() {
                None
            } else {
                Some(github_repo)
            };
        }
        if let Some(team_members) = request.team_members {
            project.team_members = team_members;
        }
        if let Some(tags) = request.tags {
            project.tags = tags;
        }
        if let Some(status) = request.status {
            project.status = status;
        }
    })?;

    Ok(Json(ProjectResponse {
        success: true,
        project,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = String, Path, description = "Project ID")),
    tag = "Projects",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 403, description = "Not the project creator"),
        (status = 404, description = "Project not found")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Auth(current): Auth,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = state.store.write().await;
    let project = store.project(&id)?;
    if project.creator != current.id {
        return Err(ApiError::forbidden("Not authorized to delete this project"));
    }
    store.delete_project(&id)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Project deleted successfully",
    })))
}
