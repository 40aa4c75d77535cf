pub mod address;
pub mod customer;
pub mod health;
pub mod order;

pub use address::{delete_address, get_address, list_addresses, save_address};
pub use customer::{
    get_customer, login, logout, register, save_email, save_password, save_profile,
    set_default_billing_address, set_default_shipping_address,
};
pub use health::{HealthResponse, health_check};
pub use order::list_orders;
