//! Customer account endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::account::requests::{
    EmailSaveRequest, LoginRequest, PasswordSaveRequest, ProfileSaveRequest, RegistrationRequest,
};
use crate::account::{AccountError, Customer, ErrorResponse};
use crate::core_types::{AddressId, CustomerId};
use crate::gateway::state::AppState;
use crate::gateway::types::{ContextTokenResponse, Envelope, ValidatedJson};
use crate::session::{CONTEXT_TOKEN_HEADER, CustomerContext};

/// Log in with email and password
///
/// Returns the new context token in the body and in the
/// `x-sw-context-token` response header.
#[utoipa::path(
    post,
    path = "/storefront-api/customer/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ContextTokenResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Bad credentials", body = ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Response, AccountError> {
    let token = state.accounts.login(&ctx, req).await?;
    let header = HeaderValue::from_str(&token).map_err(AccountError::internal)?;

    let mut response = Json(ContextTokenResponse::new(token)).into_response();
    response.headers_mut().insert(CONTEXT_TOKEN_HEADER, header);
    Ok(response)
}

/// Log out, revoking the current context token
#[utoipa::path(
    post,
    path = "/storefront-api/customer/logout",
    responses((status = 204, description = "Logged out")),
    security(("context_token" = [])),
    tag = "Customer"
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<StatusCode, AccountError> {
    state.accounts.logout(&ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a customer (or guest) with a billing address
#[utoipa::path(
    post,
    path = "/storefront-api/customer",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registered; data is the customer id", body = Envelope<String>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = "Customer"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegistrationRequest>,
) -> Result<Json<Envelope<CustomerId>>, AccountError> {
    let customer_id = state.accounts.register(req).await?;
    Ok(Json(Envelope::new(customer_id)))
}

/// Logged-in customer
#[utoipa::path(
    get,
    path = "/storefront-api/customer",
    responses(
        (status = 200, description = "Customer detail", body = Envelope<Customer>),
        (status = 403, description = "Not logged in", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Customer"
)]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
) -> Result<Json<Envelope<serde_json::Value>>, AccountError> {
    let customer = state.accounts.get_customer(&ctx).await?;
    Ok(Json(Envelope::normalize(&customer)?))
}

/// Make an address the default billing address
#[utoipa::path(
    put,
    path = "/storefront-api/customer/default-billing-address/{id}",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Default changed; data is the address id", body = Envelope<String>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn set_default_billing_address(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AddressId>>, AccountError> {
    let id = state.accounts.set_default_billing_address(&ctx, &id).await?;
    Ok(Json(Envelope::new(id)))
}

/// Make an address the default shipping address
#[utoipa::path(
    put,
    path = "/storefront-api/customer/default-shipping-address/{id}",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Default changed; data is the address id", body = Envelope<String>),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Address not found", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Address"
)]
pub async fn set_default_shipping_address(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AddressId>>, AccountError> {
    let id = state.accounts.set_default_shipping_address(&ctx, &id).await?;
    Ok(Json(Envelope::new(id)))
}

#[utoipa::path(
    put,
    path = "/storefront-api/customer/email",
    request_body = EmailSaveRequest,
    responses(
        (status = 204, description = "Email changed"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Customer"
)]
pub async fn save_email(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    ValidatedJson(req): ValidatedJson<EmailSaveRequest>,
) -> Result<StatusCode, AccountError> {
    state.accounts.save_email(&ctx, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/storefront-api/customer/password",
    request_body = PasswordSaveRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Customer"
)]
pub async fn save_password(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    ValidatedJson(req): ValidatedJson<PasswordSaveRequest>,
) -> Result<StatusCode, AccountError> {
    state.accounts.save_password(&ctx, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/storefront-api/customer/profile",
    request_body = ProfileSaveRequest,
    responses(
        (status = 204, description = "Profile saved"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Customer"
)]
pub async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    ValidatedJson(req): ValidatedJson<ProfileSaveRequest>,
) -> Result<StatusCode, AccountError> {
    state.accounts.save_profile(&ctx, req).await?;
    Ok(StatusCode::NO_CONTENT)
}
