// SPDX-License-Identifier: MIT
//
// Copyright (C) 2026 DevLaunch

//! HTTP API surface.
//!
//! All routes are nested under `/api`. Route groups carry their own rate
//! limit budgets; interactive docs are served at `/docs`.

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        Project, ProjectCategory, ProjectStatus, SystemEvent, Token, TokenMetadata, TokenStatus,
        TradingInfo, TransactionRecord, TransactionStatus, TransactionType, User, UserView,
    },
    rate_limit,
    state::AppState,
};

pub mod admin;
pub mod github;
pub mod health;
pub mod projects;
pub mod tokens;
pub mod users;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_auth,
        ));

    let profile_routes = Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/{id}", get(users::get_user))
        .route("/{id}/tokens", get(users::user_tokens))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_general,
        ));

    let project_routes = Router::new()
        .route("/", post(projects::create_project).get(projects::list_projects))
        .route(
            "/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_general,
        ));

    let token_routes = Router::new()
        .route("/", post(tokens::register_token).get(tokens::list_tokens))
        .route("/trending", get(tokens::trending))
        .route("/search", get(tokens::search_tokens))
        .route(
            "/{id_or_address}",
            get(tokens::get_token)
                .put(tokens::update_token)
                .delete(tokens::delete_token),
        )
        .route(
            "/{id_or_address}/trading-pair",
            post(tokens::create_trading_pair),
        )
        .route("/{id_or_address}/stats", get(tokens::token_stats))
        .route("/{id_or_address}/trades", get(tokens::token_trades))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_general,
        ));

    let wallet_read_routes = Router::new()
        .route("/balance", get(wallet::sol_balance))
        .route("/token-balance/{mint}", get(wallet::token_balance))
        .route("/validate-address", post(wallet::validate_address))
        .route("/token-info/{mint}", get(wallet::token_info))
        .route("/transactions", get(wallet::transactions))
        .route("/trades", get(wallet::trade_history))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_wallet,
        ));

    let wallet_write_routes = Router::new()
        .route("/create-token", post(wallet::create_token))
        .route("/transfer-sol", post(wallet::transfer_sol))
        .route("/transfer-token", post(wallet::transfer_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_strict,
        ));

    let github_routes = Router::new()
        .route("/login", get(github::login))
        .route("/callback", get(github::callback))
        .route("/link", get(github::auth_link).post(github::link_account))
        .route("/user", get(github::github_user))
        .route("/repos", get(github::github_repos))
        .route("/unlink", post(github::unlink))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_auth,
        ));

    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route("/projects", get(admin::list_projects))
        .route("/system/logs", get(admin::system_logs))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::limit_general,
        ));

    let api_routes = Router::new()
        .route("/health", get(health::health_check))
        .nest("/users", user_routes.merge(profile_routes))
        .nest("/projects", project_routes)
        .nest("/tokens", token_routes)
        .nest("/wallet", wallet_read_routes.merge(wallet_write_routes))
        .nest("/github", github_routes)
        .nest("/admin", admin_routes)
        .with_state(state.clone());

    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: &str) -> CorsLayer {
    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers(tower_http::cors::Any),
        Err(_) => CorsLayer::permissive(),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::register,
        users::login,
        users::me,
        users::update_me,
        users::get_user,
        users::user_tokens,
        projects::create_project,
        projects::list_projects,
        projects::get_project,
        projects::update_project,
        projects::delete_project,
        tokens::register_token,
        tokens::list_tokens,
        tokens::search_tokens,
        tokens::get_token,
        tokens::update_token,
        tokens::delete_token,
        tokens::create_trading_pair,
        tokens::token_stats,
        tokens::token_trades,
        tokens::trending,
        wallet::sol_balance,
        wallet::token_balance,
        wallet::validate_address,
        wallet::create_token,
        wallet::token_info,
        wallet::transactions,
        wallet::trade_history,
        wallet::transfer_sol,
        wallet::transfer_token,
        github::login,
        github::callback,
        github::auth_link,
        github::link_account,
        github::github_user,
        github::github_repos,
        github::unlink,
        admin::dashboard,
        admin::list_users,
        admin::list_projects,
        admin::system_logs
    ),
    components(
        schemas(
            User,
            UserView,
            Project,
            ProjectCategory,
            ProjectStatus,
            Token,
            TokenStatus,
            TokenMetadata,
            TradingInfo,
            TransactionRecord,
            TransactionType,
            TransactionStatus,
            SystemEvent
        )
    ),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Users", description = "Registration, login, and profiles"),
        (name = "Projects", description = "Developer project showcase"),
        (name = "Tokens", description = "Token registry and trading"),
        (name = "Wallet", description = "Solana wallet and transfer operations"),
        (name = "GitHub", description = "GitHub OAuth and account linking"),
        (name = "Admin", description = "Platform administration")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::for_tests());
        let _ = app.into_make_service();
    }

    #[test]
    fn documented_surface_matches_the_router() {
        let doc = ApiDoc::openapi();

        // balance endpoints are caller-scoped, not parameterized by wallet
        assert!(doc.paths.paths.contains_key("/api/wallet/balance"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/wallet/token-balance/{mint}"));
        assert!(doc.paths.paths.contains_key("/api/wallet/trades"));
        assert!(doc
            .paths
            .paths
            .contains_key("/api/tokens/{id_or_address}/trades"));

        let unlink = doc.paths.paths.get("/api/github/unlink").unwrap();
        assert!(unlink.post.is_some());
        assert!(unlink.delete.is_none());
    }

    #[test]
    fn cors_layer_accepts_configured_origin() {
        let _ = cors_layer("http://localhost:3000");
        let _ = cors_layer("\u{0}invalid");
    }
}
