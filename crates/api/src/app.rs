use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use domain::models::{
    AboutContent, CollectionItem, Education, Experience, Profile, Project, ResumeAttachment,
    SingletonItem, SiteSettings, Skill,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin_session, security_headers_middleware,
    trace_id, LoginRateLimiter, SecurityHeaders,
};
use crate::routes::{auth, content, health};
use crate::services::{AdminAuthService, CookieHelper};
use crate::stores::{HasCollection, HasSingleton, Stores};

#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub config: Arc<Config>,
    pub auth: Arc<AdminAuthService>,
    pub cookies: CookieHelper,
    pub login_limiter: Option<Arc<LoginRateLimiter>>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Self {
        let auth = AdminAuthService::new(
            stores.admins.clone(),
            stores.sessions.clone(),
            config.session.ttl_secs,
        );

        // None when login_attempts_per_minute is 0
        let login_limiter =
            LoginRateLimiter::new(config.security.login_attempts_per_minute).map(Arc::new);

        Self {
            cookies: CookieHelper::new(config.session.clone()),
            auth: Arc::new(auth),
            stores,
            config: Arc::new(config),
            login_limiter,
        }
    }
}

/// Mounts list/create and get/update/delete for one collection kind.
fn admin_collection<T>(router: Router<AppState>, path: &str) -> Router<AppState>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    router
        .route(
            path,
            get(content::list_all::<T>).post(content::create::<T>),
        )
        .route(
            &format!("{}/:id", path),
            get(content::get_by_id::<T>)
                .put(content::update::<T>)
                .delete(content::delete::<T>),
        )
}

/// Mounts get/upsert for one singleton kind.
fn admin_singleton<T>(router: Router<AppState>, path: &str) -> Router<AppState>
where
    T: SingletonItem,
    Stores: HasSingleton<T>,
{
    router.route(
        path,
        get(content::get_singleton::<T>).post(content::upsert_singleton::<T>),
    )
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development). Browsers will not
        // send the session cookie cross-origin in this mode.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
            .allow_credentials(true)
    }
}

pub fn create_app(config: Config, stores: Stores) -> Router {
    let state = AppState::new(config, stores);
    let config = state.config.clone();

    // Admin routes behind the session gate
    let mut admin_routes = Router::new().route("/api/admin/me", get(auth::me));
    admin_routes = admin_singleton::<Profile>(admin_routes, "/api/admin/profile");
    admin_routes = admin_singleton::<AboutContent>(admin_routes, "/api/admin/about");
    admin_routes = admin_singleton::<SiteSettings>(admin_routes, "/api/admin/settings");
    admin_routes = admin_collection::<Skill>(admin_routes, "/api/admin/skills");
    admin_routes = admin_collection::<Project>(admin_routes, "/api/admin/projects");
    admin_routes = admin_collection::<Experience>(admin_routes, "/api/admin/experience");
    admin_routes = admin_collection::<Education>(admin_routes, "/api/admin/education");
    admin_routes =
        admin_collection::<ResumeAttachment>(admin_routes, "/api/admin/resume-attachments");
    let admin_routes = admin_routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_admin_session,
    ));

    // Session management (no session required)
    let auth_routes = Router::new()
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/setup", post(auth::setup));

    // Public site (read-only, active/published rows only)
    let public_routes = Router::new()
        .route("/api/public/profile", get(content::get_singleton::<Profile>))
        .route("/api/public/about", get(content::get_singleton::<AboutContent>))
        .route("/api/public/settings", get(content::get_singleton::<SiteSettings>))
        .route("/api/public/skills", get(content::list_public::<Skill>))
        .route("/api/public/projects", get(content::list_public::<Project>))
        .route(
            "/api/public/projects/:slug",
            get(content::get_published_project),
        )
        .route("/api/public/experience", get(content::list_public::<Experience>))
        .route("/api/public/education", get(content::list_public::<Education>))
        .route(
            "/api/public/resume-attachments",
            get(content::list_public::<ResumeAttachment>),
        );

    // Operational endpoints
    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    let security_headers = SecurityHeaders {
        hsts_enabled: config.security.hsts_enabled,
    };

    Router::new()
        .merge(ops_routes)
        .merge(public_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn_with_state(
            security_headers,
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors_layer(&config))
        .with_state(state)
}
