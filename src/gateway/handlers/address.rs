//! Address book endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::account::requests::AddressSaveRequest;
use crate::account::{AccountError, CustomerAddress, ErrorResponse};
use crate::core_types::AddressId;
use crate::gateway::state::AppState;
use crate::gateway::types::{Envelope, ValidatedJson};
use crate::session::CustomerContext;

#[utoipa::path(
    get,
    path = "/storefront-api/customer/addresses",
    responses(
        (status = 200, description = "All addresses of the customer", body = Envelope<Vec<CustomerAddress>>),
        (status = 403, description = "Not logged in", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn list_addresses(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<Json<Envelope<serde_json::Value>>, AccountError> {
    let addresses = state.accounts.list_addresses(&ctx).await?;
    Ok(Json(Envelope::normalize(&addresses)?))
}

#[utoipa::path(
    get,
    path = "/storefront-api/customer/address/{id}",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address detail", body = Envelope<CustomerAddress>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn get_address(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<serde_json::Value>>, AccountError> {
    let address = state.accounts.get_address(&ctx, &id).await?;
    Ok(Json(Envelope::normalize(&address)?))
}

/// Create an address, or update it when `id` is given
#[utoipa::path(
    post,
    path = "/storefront-api/customer/address",
    request_body = AddressSaveRequest,
    responses(
        (status = 200, description = "Saved; data is the address id", body = Envelope<String>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn save_address(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    ValidatedJson(req): ValidatedJson<AddressSaveRequest>,
) -> Result<Json<Envelope<AddressId>>, AccountError> {
    let id = state.accounts.save_address(&ctx, req).await?;
    Ok(Json(Envelope::new(id)))
}

#[utoipa::path(
    delete,
    path = "/storefront-api/customer/address/{id}",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Deleted; data is the address id", body = Envelope<String>),
        (status = 400, description = "Malformed id or default address", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn delete_address(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AddressId>>, AccountError> {
    let id = state.accounts.delete_address(&ctx, &id).await?;
    Ok(Json(Envelope::new(id)))
}
