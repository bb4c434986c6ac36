// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! Admin-only handlers: dashboard counters, user and project listings, and a
//! snapshot of recent system events. Every route requires a caller on the
//! admin allow-list.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::AdminOnly,
    error::ApiError,
    models::{Project, SystemEvent, UserView},
    state::AppState,
    store::ProjectFilter,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_projects: usize,
    pub total_tokens: usize,
    /// Users registered since midnight UTC.
    pub new_users_today: usize,
    /// Users whose accounts changed within the last seven days.
    pub active_users: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub success: bool,
    pub stats: DashboardStats,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub success: bool,
    pub users: Vec<UserView>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsPage {
    pub success: bool,
    pub projects: Vec<Project>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LogsQuery {
    pub level: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: Vec<SystemEvent>,
}

fn page_params(query: &ListQuery) -> (usize, usize) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    (page, limit)
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "Admin",
    security(("bearer" = [])),
    responses(
        (status = 200, body = DashboardResponse),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
) -> Result<Json<DashboardResponse>, ApiError> {
    let now = Utc::now();
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let week_ago = now - Duration::days(7);

    let store = state.store.read().await;
    Ok(Json(DashboardResponse {
        success: true,
        stats: DashboardStats {
            total_users: store.user_count(),
            total_projects: store.project_count(),
            total_tokens: store.token_count(),
            new_users_today: store.users_created_since(midnight),
            active_users: store.users_active_since(week_ago),
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(ListQuery),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = UsersPage))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    Query(query): Query<ListQuery>,
) -> Result<Json<UsersPage>, ApiError> {
    let (page, limit) = page_params(&query);
    let (users, total) =
        state
            .store
            .read()
            .await
            .list_users(query.search.as_deref(), page, limit);

    Ok(Json(UsersPage {
        success: true,
        users: users.iter().map(UserView::from).collect(),
        total,
        page,
        total_pages: total.div_ceil(limit),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/projects",
    params(ListQuery),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = ProjectsPage))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProjectsPage>, ApiError> {
    let (page, limit) = page_params(&query);
    let filter = ProjectFilter {
        search: query.search.clone(),
        ..ProjectFilter::default()
    };
    let (projects, total) = state.store.read().await.list_projects(&filter, page, limit);

    Ok(Json(ProjectsPage {
        success: true,
        projects,
        total,
        page,
        total_pages: total.div_ceil(limit),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/system/logs",
    params(LogsQuery),
    tag = "Admin",
    security(("bearer" = [])),
    responses((status = 200, body = LogsResponse))
)]
pub async fn system_logs(
    State(state): State<AppState>,
    AdminOnly(_): AdminOnly,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let mut logs = state.store.read().await.recent_events(limit);
    if let Some(level) = &query.level {
        logs.retain(|event| event.level.eq_ignore_ascii_case(level));
    }

    Ok(Json(LogsResponse {
        success: true,
        logs,
    }))
}
