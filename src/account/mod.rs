//! Customer accounts
//!
//! Registration, login, profile and the address book. Storage sits behind
//! the repository traits so the service runs on PostgreSQL or in memory.

pub mod error;
pub mod models;
pub mod repository;
pub mod requests;
pub mod service;

pub use error::{AccountError, ErrorResponse};
pub use models::{AddressData, Customer, CustomerAddress, ProfileData};
pub use repository::{
    AddressRepository, CustomerRepository, DefaultAddressKind, EmailClaim, PgAccountRepository,
};
pub use service::AccountService;
