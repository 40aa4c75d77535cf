//! Storefront Account API
//!
//! Customer-facing account service: login with context tokens, registration,
//! profile and password changes, the address book and the order history.
//!
//! # Modules
//!
//! - [`core_types`] - Identifier newtypes (CustomerId, AddressId, ...)
//! - [`criteria`] - Typed search descriptor: filters, sorting, pagination
//! - [`account`] - Customers, addresses and the account service
//! - [`order`] - Order read model and the order overview query
//! - [`session`] - Context tokens and server-side sessions
//! - [`store`] - In-memory storage backend
//! - [`db`] - PostgreSQL pool and migrations
//! - [`gateway`] - axum HTTP layer and OpenAPI docs

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod logging;

pub mod account;
pub mod criteria;
pub mod db;
pub mod gateway;
pub mod order;
pub mod session;
pub mod store;

// Convenient re-exports at crate root
pub use account::{AccountError, AccountService};
pub use core_types::{AddressId, CountryId, CustomerId, OrderId, SessionId};
pub use criteria::{Criteria, Pagination, SearchResult, TotalCountMode};
pub use order::{OrderService, build_order_query};
pub use session::CustomerContext;
