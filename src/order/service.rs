use std::sync::Arc;

use super::models::Order;
use super::query::build_order_query;
use super::repository::OrderRepository;
use crate::account::AccountError;
use crate::criteria::{Pagination, SearchResult};
use crate::session::CustomerContext;

/// Order history of the logged-in customer
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn list_orders(
        &self,
        context: &CustomerContext,
        pagination: Pagination,
    ) -> Result<SearchResult<Order>, AccountError> {
        let criteria = build_order_query(context, pagination)?;
        let result = self.orders.search(&criteria).await?;
        tracing::debug!(
            customer_id = ?context.customer_id(),
            page = pagination.page(),
            limit = pagination.limit(),
            returned = result.elements.len(),
            "Listed orders"
        );
        Ok(result)
    }
}
