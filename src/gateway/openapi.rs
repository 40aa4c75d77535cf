//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::models::{Customer, CustomerAddress};
use crate::account::requests::{
    AddressInput, AddressSaveRequest, EmailSaveRequest, LoginRequest, PasswordSaveRequest,
    ProfileSaveRequest, RegistrationRequest,
};
use crate::account::ErrorResponse;
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ContextTokenResponse;
use crate::order::{Order, OrderLineItem, OrderState};
use crate::session::CONTEXT_TOKEN_HEADER;

/// Context token header security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "context_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    CONTEXT_TOKEN_HEADER,
                    "Context token returned by POST /storefront-api/customer/login",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Account API",
        version = "1.0.0",
        description = "Customer login, registration, profile, address book and order history.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::customer::login,
        crate::gateway::handlers::customer::logout,
        crate::gateway::handlers::customer::register,
        crate::gateway::handlers::customer::get_customer,
        crate::gateway::handlers::customer::save_email,
        crate::gateway::handlers::customer::save_password,
        crate::gateway::handlers::customer::save_profile,
        crate::gateway::handlers::customer::set_default_billing_address,
        crate::gateway::handlers::customer::set_default_shipping_address,
        crate::gateway::handlers::address::list_addresses,
        crate::gateway::handlers::address::get_address,
        crate::gateway::handlers::address::save_address,
        crate::gateway::handlers::address::delete_address,
        crate::gateway::handlers::order::list_orders,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            ContextTokenResponse,
            Customer,
            CustomerAddress,
            Order,
            OrderLineItem,
            OrderState,
            LoginRequest,
            RegistrationRequest,
            AddressInput,
            AddressSaveRequest,
            EmailSaveRequest,
            PasswordSaveRequest,
            ProfileSaveRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Customer", description = "Login, registration and profile"),
        (name = "Address", description = "Address book (login required)"),
        (name = "Order", description = "Order history (login required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Storefront Account API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json = ApiDoc::openapi().to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Storefront Account API"));
    }

    #[test]
    fn test_storefront_paths_registered() {
        let paths = ApiDoc::openapi().paths;
        for path in [
            "/api/v1/health",
            "/storefront-api/customer",
            "/storefront-api/customer/login",
            "/storefront-api/customer/logout",
            "/storefront-api/customer/orders",
            "/storefront-api/customer/addresses",
            "/storefront-api/customer/address",
            "/storefront-api/customer/address/{id}",
            "/storefront-api/customer/default-billing-address/{id}",
            "/storefront-api/customer/default-shipping-address/{id}",
        ] {
            assert!(paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("context_token"));
    }
}
