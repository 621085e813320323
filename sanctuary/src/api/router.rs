use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use sanctuary_core::auth::{ADMIN, CONGREGATION, LEADERSHIP};
use sanctuary_core::settings::rate_limiting::RateLimitTier;
use sanctuary_core::validation::FieldError;

use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::error::{AppError, ErrorBody};
use crate::api::handlers::auth::{
    __path_login_handler, __path_logout_handler, __path_session_handler, login_handler,
    logout_handler, session_handler,
};
use crate::api::handlers::dashboard::{__path_dashboard_stats_handler, dashboard_stats_handler};
use crate::api::handlers::donations::{
    __path_create_donation_handler, __path_delete_donation_handler, __path_get_donation_handler,
    __path_list_donations_handler, __path_update_donation_handler, create_donation_handler,
    delete_donation_handler, get_donation_handler, list_donations_handler,
    update_donation_handler,
};
use crate::api::handlers::events::{
    __path_create_event_handler, __path_delete_event_handler, __path_get_event_handler,
    __path_get_published_event_handler, __path_list_events_handler,
    __path_list_published_events_handler, __path_update_event_handler, create_event_handler,
    delete_event_handler, get_event_handler, get_published_event_handler, list_events_handler,
    list_published_events_handler, update_event_handler,
};
use crate::api::handlers::health::{__path_health_checker_handler, health_checker_handler};
use crate::api::handlers::live_streams::{
    __path_create_live_stream_handler, __path_delete_live_stream_handler,
    __path_get_live_stream_handler, __path_list_live_streams_handler,
    __path_list_public_live_streams_handler, __path_update_live_stream_handler,
    create_live_stream_handler, delete_live_stream_handler, get_live_stream_handler,
    list_live_streams_handler, list_public_live_streams_handler, update_live_stream_handler,
};
use crate::api::handlers::members::{
    __path_create_member_handler, __path_delete_member_handler, __path_get_member_handler,
    __path_list_members_handler, __path_update_member_handler, create_member_handler,
    delete_member_handler, get_member_handler, list_members_handler, update_member_handler,
};
use crate::api::handlers::ministries::{
    __path_create_ministry_handler, __path_delete_ministry_handler, __path_get_ministry_handler,
    __path_list_active_ministries_handler, __path_list_ministries_handler,
    __path_update_ministry_handler, create_ministry_handler, delete_ministry_handler,
    get_ministry_handler, list_active_ministries_handler, list_ministries_handler,
    update_ministry_handler,
};
use crate::api::handlers::pastoral_visits::{
    __path_create_pastoral_visit_handler, __path_delete_pastoral_visit_handler,
    __path_get_pastoral_visit_handler, __path_list_pastoral_visits_handler,
    __path_update_pastoral_visit_handler, create_pastoral_visit_handler,
    delete_pastoral_visit_handler, get_pastoral_visit_handler, list_pastoral_visits_handler,
    update_pastoral_visit_handler,
};
use crate::api::handlers::users::{
    __path_create_user_handler, __path_delete_user_handler, __path_get_user_handler,
    __path_list_users_handler, __path_update_user_handler, create_user_handler,
    delete_user_handler, get_user_handler, list_users_handler, update_user_handler,
};
use crate::api::handlers::visitors::{
    __path_create_visitor_handler, __path_delete_visitor_handler, __path_get_visitor_handler,
    __path_list_visitors_handler, __path_submit_visitor_handler, __path_update_visitor_handler,
    create_visitor_handler, delete_visitor_handler, get_visitor_handler, list_visitors_handler,
    submit_visitor_handler, update_visitor_handler,
};
use crate::app_state::SharedAppState;

use super::middleware::{require_role, require_session};
use super::rate_limiting::RateLimitLayer;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,
        list_published_events_handler,
        get_published_event_handler,
        list_public_live_streams_handler,
        list_active_ministries_handler,
        submit_visitor_handler,
        login_handler,
        logout_handler,
        session_handler,
        dashboard_stats_handler,
        list_events_handler,
        get_event_handler,
        create_event_handler,
        update_event_handler,
        delete_event_handler,
        list_members_handler,
        get_member_handler,
        create_member_handler,
        update_member_handler,
        delete_member_handler,
        list_donations_handler,
        get_donation_handler,
        create_donation_handler,
        update_donation_handler,
        delete_donation_handler,
        list_live_streams_handler,
        get_live_stream_handler,
        create_live_stream_handler,
        update_live_stream_handler,
        delete_live_stream_handler,
        list_pastoral_visits_handler,
        get_pastoral_visit_handler,
        create_pastoral_visit_handler,
        update_pastoral_visit_handler,
        delete_pastoral_visit_handler,
        list_ministries_handler,
        get_ministry_handler,
        create_ministry_handler,
        update_ministry_handler,
        delete_ministry_handler,
        list_visitors_handler,
        get_visitor_handler,
        create_visitor_handler,
        update_visitor_handler,
        delete_visitor_handler,
        list_users_handler,
        get_user_handler,
        create_user_handler,
        update_user_handler,
        delete_user_handler,
    ),
    components(
        schemas(ErrorBody, FieldError)
    ),
    tags(
        (name = "public", description = "Public site endpoints"),
        (name = "auth", description = "Sessions"),
        (name = "dashboard", description = "Staff dashboard"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
            components.add_security_scheme(
                "sessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    sanctuary_core::settings::session::DEFAULT_COOKIE_NAME,
                ))),
            );
        }
    }
}

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let api = ApiDoc::openapi();
        let limits = &state.settings.rate_limiting;
        let store = state.rate_limits.clone();

        // Layers added last run first: rate limit, then session, then the
        // per-route role gate.
        let admin_router = Router::new()
            .route(
                "/api/v1/auth/session",
                get(session_handler).route_layer(middleware::from_fn(require_role(CONGREGATION))),
            )
            .route(
                "/api/v1/admin/dashboard/stats",
                get(dashboard_stats_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            // events
            .route(
                "/api/v1/admin/events",
                get(list_events_handler)
                    .post(create_event_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/events/{id}",
                get(get_event_handler)
                    .patch(update_event_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/events/{id}",
                delete(delete_event_handler).route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // members
            .route(
                "/api/v1/admin/members",
                get(list_members_handler)
                    .post(create_member_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/members/{id}",
                get(get_member_handler)
                    .patch(update_member_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/members/{id}",
                delete(delete_member_handler).route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // donations are admin only
            .route(
                "/api/v1/admin/donations",
                get(list_donations_handler)
                    .post(create_donation_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            .route(
                "/api/v1/admin/donations/{id}",
                get(get_donation_handler)
                    .patch(update_donation_handler)
                    .delete(delete_donation_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // live streams
            .route(
                "/api/v1/admin/live-streams",
                get(list_live_streams_handler)
                    .post(create_live_stream_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/live-streams/{id}",
                get(get_live_stream_handler)
                    .patch(update_live_stream_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/live-streams/{id}",
                delete(delete_live_stream_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // pastoral visits
            .route(
                "/api/v1/admin/pastoral-visits",
                get(list_pastoral_visits_handler)
                    .post(create_pastoral_visit_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/pastoral-visits/{id}",
                get(get_pastoral_visit_handler)
                    .patch(update_pastoral_visit_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/pastoral-visits/{id}",
                delete(delete_pastoral_visit_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // ministries: every signed-in role may read
            .route(
                "/api/v1/admin/ministries",
                get(list_ministries_handler)
                    .route_layer(middleware::from_fn(require_role(CONGREGATION))),
            )
            .route(
                "/api/v1/admin/ministries",
                post(create_ministry_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/ministries/{id}",
                get(get_ministry_handler)
                    .route_layer(middleware::from_fn(require_role(CONGREGATION))),
            )
            .route(
                "/api/v1/admin/ministries/{id}",
                patch(update_ministry_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/ministries/{id}",
                delete(delete_ministry_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // visitors
            .route(
                "/api/v1/admin/visitors",
                get(list_visitors_handler)
                    .post(create_visitor_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/visitors/{id}",
                get(get_visitor_handler)
                    .patch(update_visitor_handler)
                    .route_layer(middleware::from_fn(require_role(LEADERSHIP))),
            )
            .route(
                "/api/v1/admin/visitors/{id}",
                delete(delete_visitor_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            // users
            .route(
                "/api/v1/admin/users",
                get(list_users_handler)
                    .post(create_user_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            .route(
                "/api/v1/admin/users/{id}",
                get(get_user_handler)
                    .patch(update_user_handler)
                    .delete(delete_user_handler)
                    .route_layer(middleware::from_fn(require_role(ADMIN))),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .route_layer(RateLimitLayer::new(
                store.clone(),
                RateLimitTier::Strict,
                limits,
            ));

        let login_router = Router::new()
            .route("/api/v1/auth/login", post(login_handler))
            .route_layer(RateLimitLayer::new(
                store.clone(),
                RateLimitTier::AuthStrict,
                limits,
            ));

        let public_router = Router::new()
            .route("/api/v1/health", get(health_checker_handler))
            .route("/api/v1/events", get(list_published_events_handler))
            .route("/api/v1/events/{id}", get(get_published_event_handler))
            .route("/api/v1/live-streams", get(list_public_live_streams_handler))
            .route("/api/v1/ministries", get(list_active_ministries_handler))
            .route("/api/v1/visitors", post(submit_visitor_handler))
            .route("/api/v1/auth/logout", post(logout_handler))
            .route_layer(RateLimitLayer::new(store, RateLimitTier::Default, limits));

        Router::new()
            .merge(admin_router)
            .merge(login_router)
            .merge(public_router)
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
            .merge(Redoc::with_url("/redoc", api.clone()))
            .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
            .fallback(|| async { AppError::NotFound })
            .layer(DefaultBodyLimit::max(state.settings.api.max_body_size))
            .with_state(state.clone())
    }
}
