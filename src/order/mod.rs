//! Customer order history

pub mod models;
pub mod query;
pub mod repository;
pub mod service;

pub use models::{Order, OrderField, OrderLineItem, OrderState};
pub use query::build_order_query;
pub use repository::{OrderRepository, PgOrderRepository};
pub use service::OrderService;
