use axum::{
    http::{header, HeaderName, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::{require_token, AUTH_TOKEN_HEADER};
use crate::state::AppState;

/// Full application router with global middleware applied
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(public::home::health))
        .route("/api", get(public::home::root))
        .route("/api/", get(public::home::root))
        .merge(user_routes())
        .merge(product_routes(state.clone()))
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/user/register", post(auth::register))
        .route("/api/user/login", post(auth::login))
}

/// Reads are public; writes pass through the token gate first
fn product_routes(state: AppState) -> Router<AppState> {
    let gate = from_fn_with_state(state, require_token);

    Router::new()
        .route(
            "/api/products",
            get(public::products::list)
                .merge(post(protected::products::create).route_layer(gate.clone())),
        )
        .route(
            "/api/products/:id",
            get(public::products::get)
                .merge(put(protected::products::update).route_layer(gate.clone()))
                .merge(delete(protected::products::delete).route_layer(gate)),
        )
}

fn cors_layer() -> CorsLayer {
    let auth_token = HeaderName::from_static(AUTH_TOKEN_HEADER);

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::OPTIONS,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([
            auth_token.clone(),
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers([auth_token])
}
