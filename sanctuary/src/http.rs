use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{api::router::ApiRoutes, app_state::SharedAppState};

fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    // Credentials need an explicit origin; without one the API stays same-origin.
    match allowed_origin.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => cors.allow_origin(origin).allow_credentials(true),
        Some(Err(e)) => {
            warn!("Ignoring invalid api.cors_allowed_origin: {}", e);
            cors
        }
        None => cors,
    }
}

pub async fn setup_http_server(
    app_state: SharedAppState,
    bind_address: &str,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    let app = ApiRoutes::create(app_state.clone())
        .layer(cors_layer(
            app_state.settings.api.cors_allowed_origin.as_deref(),
        ))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("API server listening on {}", listener.local_addr()?);

    let stop_flag = app_state.stop_flag.clone();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                stop_flag.wait().await;
                info!("Stop flag was set, shutting down HTTP server gracefully");
            })
            .await?;
        info!("HTTP server is down");
        Ok(())
    });

    Ok(handle)
}
