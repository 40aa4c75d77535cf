pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Build the complete HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let customer_routes = Router::new()
        .route(
            "/storefront-api/customer",
            post(handlers::register).get(handlers::get_customer),
        )
        .route("/storefront-api/customer/login", post(handlers::login))
        .route("/storefront-api/customer/logout", post(handlers::logout))
        .route("/storefront-api/customer/orders", get(handlers::list_orders))
        .route("/storefront-api/customer/email", put(handlers::save_email))
        .route("/storefront-api/customer/password", put(handlers::save_password))
        .route("/storefront-api/customer/profile", put(handlers::save_profile))
        .route("/storefront-api/customer/addresses", get(handlers::list_addresses))
        .route("/storefront-api/customer/address", post(handlers::save_address))
        .route(
            "/storefront-api/customer/address/{id}",
            get(handlers::get_address).delete(handlers::delete_address),
        )
        .route(
            "/storefront-api/customer/default-billing-address/{id}",
            put(handlers::set_default_billing_address),
        )
        .route(
            "/storefront-api/customer/default-shipping-address/{id}",
            put(handlers::set_default_shipping_address),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::customer_context_middleware,
        ));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .merge(customer_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        anyhow::anyhow!("failed to bind {}: {}", addr, e)
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
