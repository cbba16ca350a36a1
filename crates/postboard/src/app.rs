use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        auth::{login, register},
        comments::{
            create_comment, delete_comment, get_comment, get_thread, list_post_comments,
            list_replies, update_comment,
        },
        feed::get_feed,
        health::livez,
        posts::{create_post, delete_post, get_post, list_posts, update_post},
        users::{get_user, list_user_posts},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// A request that outlives `request_timeout` is answered with 408 and its
/// handler future is dropped, which abandons any repository call in flight.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    // API routes with CORS
    let api_routes = Router::new()
        // User routes
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/posts", get(list_user_posts))
        // Post routes
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/posts/{id}/comments",
            get(list_post_comments).post(create_comment),
        )
        .route("/posts/{id}/thread", get(get_thread))
        // Comment routes
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .route("/comments/{id}/replies", get(list_replies))
        .route("/feed", get(get_feed))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
