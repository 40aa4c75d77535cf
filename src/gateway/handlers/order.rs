use std::sync::Arc;

use axum::{Extension, Json, extract::State};

use crate::account::{AccountError, ErrorResponse};
use crate::criteria::{PageRequest, Pagination};
use crate::gateway::state::AppState;
use crate::gateway::types::{Envelope, PageQuery};
use crate::order::Order;
use crate::session::CustomerContext;

/// Orders of the logged-in customer, newest first
///
/// `page` defaults to 1; `limit` to the configured default (10).
#[utoipa::path(
    get,
    path = "/storefront-api/customer/orders",
    params(PageRequest),
    responses(
        (status = 200, description = "One page of orders", body = Envelope<Vec<Order>>),
        (status = 400, description = "page or limit out of range", body = ErrorResponse),
        (status = 403, description = "Not logged in", body = ErrorResponse)
    ),
    security(("context_token" = [])),
    tag = "Order"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<CustomerContext>,
    PageQuery(page): PageQuery,
) -> Result<Json<Envelope<serde_json::Value>>, AccountError> {
    let pagination = Pagination::from_request(page, state.default_order_limit)?;
    let orders = state.orders.list_orders(&ctx, pagination).await?;
    Ok(Json(Envelope::normalize(&orders.elements)?))
}
