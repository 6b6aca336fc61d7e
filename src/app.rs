use axum::{
    middleware,
    routing::{delete, get, patch, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::permissions::*;
use crate::auth::{KeySource, TokenValidator};
use crate::config::AppConfig;
use crate::database::CastingStore;
use crate::handlers::{actors, movies, public};
use crate::middleware::{require_permission, PermissionGuard};

/// Shared, cheaply cloneable request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CastingStore>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn CastingStore>, keys: Arc<dyn KeySource>) -> Self {
        let validator = Arc::new(TokenValidator::new(&config.auth, keys));
        Self {
            config: Arc::new(config),
            store,
            validator,
        }
    }

    /// Wraps one method route in the authorization guard for `permission`.
    fn guarded(&self, route: MethodRouter<AppState>, permission: &'static str) -> MethodRouter<AppState> {
        route.route_layer(middleware::from_fn_with_state(
            PermissionGuard::new(self.validator.clone(), permission),
            require_permission,
        ))
    }
}

pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;

    let router = Router::new()
        // Public
        .route("/", get(public::greeting))
        .route("/health", get(public::health))
        // Guarded
        .merge(actor_routes(&state))
        .merge(movie_routes(&state))
        .fallback(public::not_found)
        .layer(TraceLayer::new_for_http());

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn actor_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/actors",
            state
                .guarded(get(actors::list), READ_ACTORS)
                .merge(state.guarded(post(actors::create), CREATE_ACTORS))
                .fallback(public::method_not_allowed),
        )
        .route(
            "/actors/:id",
            state
                .guarded(patch(actors::update), UPDATE_ACTORS)
                .merge(state.guarded(delete(actors::delete), DELETE_ACTORS))
                .fallback(public::method_not_allowed),
        )
}

fn movie_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            state
                .guarded(get(movies::list), READ_MOVIES)
                .merge(state.guarded(post(movies::create), CREATE_MOVIES))
                .fallback(public::method_not_allowed),
        )
        .route(
            "/movies/:id",
            state
                .guarded(patch(movies::update), UPDATE_MOVIES)
                .merge(state.guarded(delete(movies::delete), DELETE_MOVIES))
                .fallback(public::method_not_allowed),
        )
}
