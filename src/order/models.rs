//! Read models for customer orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{CustomerId, OrderId, OrderLineItemId};
use crate::criteria::{FilterValue, SearchField, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderState {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Open => "open",
            OrderState::InProgress => "in_progress",
            OrderState::Completed => "completed",
            OrderState::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(OrderState::Open),
            "in_progress" => Some(OrderState::InProgress),
            "completed" => Some(OrderState::Completed),
            "cancelled" => Some(OrderState::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub position: i32,
    #[schema(example = "Main product")]
    pub label: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "19.99")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "39.98")]
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[schema(example = "10042")]
    pub order_number: String,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub state: OrderState,
    #[schema(example = "EUR")]
    pub currency: String,
    #[schema(value_type = String, example = "44.97")]
    pub amount_total: Decimal,
    #[schema(value_type = String, example = "37.79")]
    pub amount_net: Decimal,
    #[schema(value_type = String, example = "4.99")]
    pub shipping_total: Decimal,
    pub line_items: Vec<OrderLineItem>,
}

/// Fields an order search can filter and sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    OrderNumber,
    CustomerId,
    OrderDate,
    State,
    AmountTotal,
}

impl SearchField for OrderField {
    fn path(self) -> &'static str {
        match self {
            OrderField::Id => "order.id",
            OrderField::OrderNumber => "order.orderNumber",
            OrderField::CustomerId => "order.orderCustomer.customerId",
            OrderField::OrderDate => "order.date",
            OrderField::State => "order.stateMachineState",
            OrderField::AmountTotal => "order.amountTotal",
        }
    }

    fn column(self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::OrderNumber => "order_number",
            OrderField::CustomerId => "customer_id",
            OrderField::OrderDate => "order_date",
            OrderField::State => "state",
            OrderField::AmountTotal => "amount_total",
        }
    }

    fn primary_key() -> Self {
        OrderField::Id
    }
}

impl Searchable<OrderField> for Order {
    fn field_value(&self, field: OrderField) -> FilterValue {
        match field {
            OrderField::Id => self.id.as_uuid().into(),
            OrderField::OrderNumber => self.order_number.clone().into(),
            OrderField::CustomerId => self.customer_id.as_uuid().into(),
            OrderField::OrderDate => self.order_date.into(),
            OrderField::State => self.state.as_str().into(),
            OrderField::AmountTotal => self.amount_total.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip_names() {
        for state in [
            OrderState::Open,
            OrderState::InProgress,
            OrderState::Completed,
            OrderState::Cancelled,
        ] {
            assert_eq!(OrderState::parse(state.as_str()), Some(state));
            let json = serde_json::to_value(state).unwrap();
            assert_eq!(json, state.as_str());
        }
        assert_eq!(OrderState::parse("shipped"), None);
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(OrderField::CustomerId.path(), "order.orderCustomer.customerId");
        assert_eq!(OrderField::OrderDate.path(), "order.date");
        assert_eq!(OrderField::OrderDate.column(), "order_date");
        assert_eq!(OrderField::primary_key(), OrderField::Id);
    }
}
