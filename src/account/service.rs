//! Customer account operations
//!
//! Every operation except login and registration runs on behalf of the
//! customer in the request's [`CustomerContext`].

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use super::error::AccountError;
use super::models::{Customer, CustomerAddress};
use super::repository::{AddressRepository, CustomerRepository, DefaultAddressKind, EmailClaim};
use super::requests::{
    AddressSaveRequest, EmailSaveRequest, LoginRequest, PasswordSaveRequest, ProfileSaveRequest,
    RegistrationRequest,
};
use crate::core_types::{AddressId, CustomerId, parse_uuid};
use crate::session::{CustomerContext, SessionManager};

/// Emails are compared case-insensitively and without surrounding blanks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AccountError::internal(format!("Hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            false
        }
    }
}

fn parse_address_id(raw: &str) -> Result<AddressId, AccountError> {
    Ok(AddressId::from_uuid(parse_uuid(raw)?))
}

pub struct AccountService {
    customers: Arc<dyn CustomerRepository>,
    addresses: Arc<dyn AddressRepository>,
    sessions: Arc<SessionManager>,
}

impl AccountService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        addresses: Arc<dyn AddressRepository>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            customers,
            addresses,
            sessions,
        }
    }

    /// Check credentials and open a new session. Returns the context token.
    ///
    /// Unknown email, guest account, inactive account and wrong password all
    /// fail the same way.
    pub async fn login(
        &self,
        context: &CustomerContext,
        req: LoginRequest,
    ) -> Result<String, AccountError> {
        let email = normalize_email(&req.username);
        let customer = self
            .customers
            .find_registered_by_email(&email)
            .await?
            .filter(Customer::can_login)
            .ok_or(AccountError::BadCredentials)?;

        let hash = customer.password_hash.as_deref().unwrap_or_default();
        if !verify_password(&req.password, hash) {
            tracing::info!(customer_id = %customer.id, "Login rejected");
            return Err(AccountError::BadCredentials);
        }

        self.sessions.close(context).await?;
        let (token, _) = self.sessions.open(customer.id).await?;
        tracing::info!(customer_id = %customer.id, "Customer logged in");
        Ok(token)
    }

    pub async fn logout(&self, context: &CustomerContext) -> Result<(), AccountError> {
        self.sessions.close(context).await?;
        if let Some(customer_id) = context.customer_id() {
            tracing::info!(customer_id = %customer_id, "Customer logged out");
        }
        Ok(())
    }

    pub async fn register(&self, req: RegistrationRequest) -> Result<CustomerId, AccountError> {
        let password_hash = match req.checked_password().map_err(|e| AccountError::Validation(e.to_string()))? {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let email = normalize_email(&req.email);
        if !req.guest && self.customers.email_in_use(&email, None).await? {
            return Err(AccountError::EmailTaken);
        }

        let customer_id = CustomerId::new();
        let billing = req
            .billing_address
            .into_data()
            .into_address(AddressId::new(), customer_id);
        let shipping = req
            .shipping_address
            .map(|a| a.into_data().into_address(AddressId::new(), customer_id));

        let customer = Customer {
            id: customer_id,
            salutation: req.salutation,
            title: req.title,
            first_name: req.first_name,
            last_name: req.last_name,
            email,
            guest: req.guest,
            active: true,
            birthday: req.birthday,
            default_billing_address_id: Some(billing.id),
            default_shipping_address_id: Some(shipping.as_ref().map_or(billing.id, |s| s.id)),
            password_hash,
            created_at: Utc::now(),
            updated_at: None,
        };

        let addresses: Vec<CustomerAddress> = std::iter::once(billing).chain(shipping).collect();
        if self.customers.create(&customer, &addresses).await? == EmailClaim::Taken {
            return Err(AccountError::EmailTaken);
        }

        tracing::info!(customer_id = %customer_id, guest = customer.guest, "Customer registered");
        Ok(customer_id)
    }

    pub async fn get_customer(&self, context: &CustomerContext) -> Result<Customer, AccountError> {
        let customer_id = context.require_customer()?;
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or(AccountError::CustomerNotFound(customer_id))
    }

    pub async fn list_addresses(
        &self,
        context: &CustomerContext,
    ) -> Result<Vec<CustomerAddress>, AccountError> {
        let customer_id = context.require_customer()?;
        Ok(self.addresses.list_by_customer(customer_id).await?)
    }

    pub async fn get_address(
        &self,
        context: &CustomerContext,
        raw_id: &str,
    ) -> Result<CustomerAddress, AccountError> {
        let customer_id = context.require_customer()?;
        let id = parse_address_id(raw_id)?;
        self.addresses
            .find(customer_id, id)
            .await?
            .ok_or(AccountError::AddressNotFound(id))
    }

    /// Update the address named by `req.id`, or create a new one.
    pub async fn save_address(
        &self,
        context: &CustomerContext,
        req: AddressSaveRequest,
    ) -> Result<AddressId, AccountError> {
        let customer_id = context.require_customer()?;
        let data = req.address.into_data();

        match req.id.as_deref() {
            Some(raw) => {
                let id = parse_address_id(raw)?;
                if !self.addresses.update(customer_id, id, &data).await? {
                    return Err(AccountError::AddressNotFound(id));
                }
                tracing::debug!(customer_id = %customer_id, address_id = %id, "Address updated");
                Ok(id)
            }
            None => {
                let address = data.into_address(AddressId::new(), customer_id);
                self.addresses.insert(&address).await?;
                tracing::debug!(customer_id = %customer_id, address_id = %address.id, "Address created");
                Ok(address.id)
            }
        }
    }

    pub async fn delete_address(
        &self,
        context: &CustomerContext,
        raw_id: &str,
    ) -> Result<AddressId, AccountError> {
        context.require_customer()?;
        let id = parse_address_id(raw_id)?;
        let customer = self.get_customer(context).await?;

        if customer.is_default_address(id) {
            return Err(AccountError::CannotDeleteDefaultAddress(id));
        }
        if !self.addresses.delete(customer.id, id).await? {
            return Err(AccountError::AddressNotFound(id));
        }
        tracing::debug!(customer_id = %customer.id, address_id = %id, "Address deleted");
        Ok(id)
    }

    pub async fn set_default_billing_address(
        &self,
        context: &CustomerContext,
        raw_id: &str,
    ) -> Result<AddressId, AccountError> {
        self.set_default_address(context, raw_id, DefaultAddressKind::Billing)
            .await
    }

    pub async fn set_default_shipping_address(
        &self,
        context: &CustomerContext,
        raw_id: &str,
    ) -> Result<AddressId, AccountError> {
        self.set_default_address(context, raw_id, DefaultAddressKind::Shipping)
            .await
    }

    async fn set_default_address(
        &self,
        context: &CustomerContext,
        raw_id: &str,
        kind: DefaultAddressKind,
    ) -> Result<AddressId, AccountError> {
        let customer_id = context.require_customer()?;
        let id = parse_address_id(raw_id)?;

        if self.addresses.find(customer_id, id).await?.is_none() {
            return Err(AccountError::AddressNotFound(id));
        }
        self.customers
            .set_default_address(customer_id, kind, id)
            .await?;
        tracing::debug!(customer_id = %customer_id, address_id = %id, ?kind, "Default address changed");
        Ok(id)
    }

    /// Change the login email. Requires the current password.
    pub async fn save_email(
        &self,
        context: &CustomerContext,
        req: EmailSaveRequest,
    ) -> Result<(), AccountError> {
        let customer = self.get_customer(context).await?;
        let hash = customer.password_hash.as_deref().unwrap_or_default();
        if !verify_password(&req.password, hash) {
            return Err(AccountError::BadCredentials);
        }

        let email = normalize_email(&req.email);
        if self.customers.email_in_use(&email, Some(customer.id)).await? {
            return Err(AccountError::EmailTaken);
        }
        if self.customers.update_email(customer.id, &email).await? == EmailClaim::Taken {
            return Err(AccountError::EmailTaken);
        }
        tracing::info!(customer_id = %customer.id, "Email changed");
        Ok(())
    }

    pub async fn save_password(
        &self,
        context: &CustomerContext,
        req: PasswordSaveRequest,
    ) -> Result<(), AccountError> {
        let customer_id = context.require_customer()?;
        let hash = hash_password(&req.password)?;
        self.customers.update_password(customer_id, &hash).await?;
        tracing::info!(customer_id = %customer_id, "Password changed");
        Ok(())
    }

    pub async fn save_profile(
        &self,
        context: &CustomerContext,
        req: ProfileSaveRequest,
    ) -> Result<(), AccountError> {
        let customer_id = context.require_customer()?;
        self.customers
            .update_profile(customer_id, &req.into_data())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::models::ProfileData;
    use crate::account::repository::RepoResult;
    use crate::account::requests::AddressInput;
    use crate::config::SessionConfig;
    use crate::core_types::{CountryId, SessionId};
    use crate::session::ContextTokenService;
    use crate::store::MemoryStore;

    struct Harness {
        service: AccountService,
        sessions: Arc<SessionManager>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let sessions = Arc::new(SessionManager::new(
            ContextTokenService::new(&SessionConfig::default()).unwrap(),
            store.clone(),
        ));
        Harness {
            service: AccountService::new(store.clone(), store, sessions.clone()),
            sessions,
        }
    }

    fn address_input(street: &str) -> AddressInput {
        AddressInput {
            salutation: "mr".to_string(),
            first_name: "Max".to_string(),
            last_name: "Mustermann".to_string(),
            company: None,
            department: None,
            street: street.to_string(),
            zipcode: "48624".to_string(),
            city: "Schöppingen".to_string(),
            country_id: CountryId::new(),
            phone_number: None,
            additional_address_line1: None,
            additional_address_line2: None,
        }
    }

    fn registration(email: &str, password: Option<&str>) -> RegistrationRequest {
        RegistrationRequest {
            salutation: "mr".to_string(),
            title: None,
            first_name: "Max".to_string(),
            last_name: "Mustermann".to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
            guest: false,
            birthday: None,
            billing_address: address_input("Ebbinghoff 10"),
            shipping_address: None,
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn logged_in(h: &Harness, email: &str) -> CustomerContext {
        h.service
            .register(registration(email, Some("password123")))
            .await
            .unwrap();
        let token = h
            .service
            .login(&CustomerContext::anonymous(), login_request(email, "password123"))
            .await
            .unwrap();
        h.sessions.resolve(Some(&token)).await.unwrap()
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Max@Example.COM "), "max@example.com");
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("password123").unwrap();
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
        assert!(!verify_password("password123", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_register_sets_billing_as_both_defaults() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;

        let customer = h.service.get_customer(&ctx).await.unwrap();
        let addresses = h.service.list_addresses(&ctx).await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(customer.default_billing_address_id, Some(addresses[0].id));
        assert_eq!(customer.default_shipping_address_id, Some(addresses[0].id));
    }

    #[tokio::test]
    async fn test_register_with_separate_shipping_address() {
        let h = harness();
        let mut req = registration("split@example.com", Some("password123"));
        req.shipping_address = Some(address_input("Lieferweg 2"));
        h.service.register(req).await.unwrap();

        let token = h
            .service
            .login(&CustomerContext::anonymous(), login_request("split@example.com", "password123"))
            .await
            .unwrap();
        let ctx = h.sessions.resolve(Some(&token)).await.unwrap();
        let customer = h.service.get_customer(&ctx).await.unwrap();
        assert_ne!(customer.default_billing_address_id, customer.default_shipping_address_id);
        assert_eq!(h.service.list_addresses(&ctx).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_case_insensitive() {
        let h = harness();
        h.service
            .register(registration("max@example.com", Some("password123")))
            .await
            .unwrap();
        let err = h
            .service
            .register(registration("MAX@example.com", Some("password123")))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_requires_password_unless_guest() {
        let h = harness();
        let err = h
            .service
            .register(registration("short@example.com", Some("short")))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let mut guest = registration("guest@example.com", None);
        guest.guest = true;
        h.service.register(guest).await.unwrap();

        let err = h
            .service
            .login(&CustomerContext::anonymous(), login_request("guest@example.com", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::BadCredentials));
    }

    #[tokio::test]
    async fn test_bad_credentials_are_indistinguishable() {
        let h = harness();
        logged_in(&h, "max@example.com").await;

        let anon = CustomerContext::anonymous();
        let wrong_password = h
            .service
            .login(&anon, login_request("max@example.com", "wrong-password"))
            .await
            .unwrap_err();
        let unknown_email = h
            .service
            .login(&anon, login_request("nobody@example.com", "password123"))
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.code(), unknown_email.code());
    }

    #[tokio::test]
    async fn test_login_revokes_previous_session() {
        let h = harness();
        h.service
            .register(registration("max@example.com", Some("password123")))
            .await
            .unwrap();
        let anon = CustomerContext::anonymous();
        let first_token = h
            .service
            .login(&anon, login_request("max@example.com", "password123"))
            .await
            .unwrap();
        let first = h.sessions.resolve(Some(&first_token)).await.unwrap();
        assert!(first.is_logged_in());

        let second_token = h
            .service
            .login(&first, login_request("max@example.com", "password123"))
            .await
            .unwrap();

        assert!(!h.sessions.resolve(Some(&first_token)).await.unwrap().is_logged_in());
        assert!(h.sessions.resolve(Some(&second_token)).await.unwrap().is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let h = harness();
        h.service
            .register(registration("max@example.com", Some("password123")))
            .await
            .unwrap();
        let token = h
            .service
            .login(&CustomerContext::anonymous(), login_request("max@example.com", "password123"))
            .await
            .unwrap();
        let ctx = h.sessions.resolve(Some(&token)).await.unwrap();

        h.service.logout(&ctx).await.unwrap();
        h.service.logout(&ctx).await.unwrap();
        assert!(!h.sessions.resolve(Some(&token)).await.unwrap().is_logged_in());
    }

    #[tokio::test]
    async fn test_default_address_cannot_be_deleted() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;
        let default_id = h.service.list_addresses(&ctx).await.unwrap()[0].id;

        let err = h
            .service
            .delete_address(&ctx, &default_id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::CannotDeleteDefaultAddress(_)));

        let extra = h
            .service
            .save_address(
                &ctx,
                AddressSaveRequest {
                    id: None,
                    address: address_input("Nebenstr. 5"),
                },
            )
            .await
            .unwrap();
        assert_eq!(h.service.delete_address(&ctx, &extra.to_string()).await.unwrap(), extra);
        assert_eq!(h.service.list_addresses(&ctx).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_address_ids_are_validated_first() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;

        let err = h.service.get_address(&ctx, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidIdentifier(_)));

        let err = h
            .service
            .set_default_shipping_address(&ctx, "1234")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidIdentifier(_)));

        let err = h
            .service
            .get_address(&ctx, &AddressId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AddressNotFound(_)));
    }

    /// Reports every email as free, like a request that lost the race
    /// between the uniqueness check and the write.
    struct StaleEmailCheck(Arc<MemoryStore>);

    #[async_trait::async_trait]
    impl CustomerRepository for StaleEmailCheck {
        async fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
            self.0.find_by_id(id).await
        }
        async fn find_registered_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
            self.0.find_registered_by_email(email).await
        }
        async fn email_in_use(&self, _: &str, _: Option<CustomerId>) -> RepoResult<bool> {
            Ok(false)
        }
        async fn create(
            &self,
            customer: &Customer,
            addresses: &[CustomerAddress],
        ) -> RepoResult<EmailClaim> {
            CustomerRepository::create(&*self.0, customer, addresses).await
        }
        async fn update_profile(&self, id: CustomerId, profile: &ProfileData) -> RepoResult<()> {
            self.0.update_profile(id, profile).await
        }
        async fn update_email(&self, id: CustomerId, email: &str) -> RepoResult<EmailClaim> {
            self.0.update_email(id, email).await
        }
        async fn update_password(&self, id: CustomerId, password_hash: &str) -> RepoResult<()> {
            self.0.update_password(id, password_hash).await
        }
        async fn set_default_address(
            &self,
            id: CustomerId,
            kind: DefaultAddressKind,
            address_id: AddressId,
        ) -> RepoResult<()> {
            self.0.set_default_address(id, kind, address_id).await
        }
    }

    #[tokio::test]
    async fn test_email_conflict_at_write_is_email_taken() {
        let store = Arc::new(MemoryStore::new());
        let sessions = Arc::new(SessionManager::new(
            ContextTokenService::new(&SessionConfig::default()).unwrap(),
            store.clone(),
        ));
        let service = AccountService::new(
            Arc::new(StaleEmailCheck(store.clone())),
            store,
            sessions.clone(),
        );

        service
            .register(registration("max@example.com", Some("password123")))
            .await
            .unwrap();
        let err = service
            .register(registration("max@example.com", Some("password123")))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));

        service
            .register(registration("erika@example.com", Some("password123")))
            .await
            .unwrap();
        let token = service
            .login(&CustomerContext::anonymous(), login_request("erika@example.com", "password123"))
            .await
            .unwrap();
        let erika = sessions.resolve(Some(&token)).await.unwrap();
        let err = service
            .save_email(
                &erika,
                EmailSaveRequest {
                    email: "max@example.com".to_string(),
                    email_confirmation: "max@example.com".to_string(),
                    password: "password123".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn test_delete_address_validates_id_before_customer_lookup() {
        let h = harness();
        let unknown = CustomerContext::authenticated(SessionId::new(), CustomerId::new());

        let err = h.service.delete_address(&unknown, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidIdentifier(_)));

        let err = h
            .service
            .delete_address(&unknown, &AddressId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn test_foreign_address_is_not_found() {
        let h = harness();
        let alice = logged_in(&h, "alice@example.com").await;
        let bob = logged_in(&h, "bob@example.com").await;
        let alice_address = h.service.list_addresses(&alice).await.unwrap()[0].id;

        let err = h
            .service
            .set_default_billing_address(&bob, &alice_address.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AddressNotFound(_)));

        let err = h
            .service
            .save_address(
                &bob,
                AddressSaveRequest {
                    id: Some(alice_address.to_string()),
                    address: address_input("Hijack 1"),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AddressNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_default_shipping() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;
        let new_id = h
            .service
            .save_address(
                &ctx,
                AddressSaveRequest {
                    id: None,
                    address: address_input("Lieferweg 2"),
                },
            )
            .await
            .unwrap();

        h.service
            .set_default_shipping_address(&ctx, &new_id.as_uuid().hyphenated().to_string())
            .await
            .unwrap();
        let customer = h.service.get_customer(&ctx).await.unwrap();
        assert_eq!(customer.default_shipping_address_id, Some(new_id));
        assert_ne!(customer.default_billing_address_id, Some(new_id));
    }

    #[tokio::test]
    async fn test_save_email_checks_password_and_uniqueness() {
        let h = harness();
        logged_in(&h, "taken@example.com").await;
        let ctx = logged_in(&h, "max@example.com").await;

        let req = |email: &str, password: &str| EmailSaveRequest {
            email: email.to_string(),
            email_confirmation: email.to_string(),
            password: password.to_string(),
        };

        let err = h
            .service
            .save_email(&ctx, req("new@example.com", "wrong-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::BadCredentials));

        let err = h
            .service
            .save_email(&ctx, req("Taken@Example.com", "password123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));

        h.service
            .save_email(&ctx, req("New@Example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(h.service.get_customer(&ctx).await.unwrap().email, "new@example.com");
    }

    #[tokio::test]
    async fn test_save_password_then_login_with_new_password() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;

        h.service
            .save_password(
                &ctx,
                PasswordSaveRequest {
                    password: "new-password-1".to_string(),
                    password_confirmation: "new-password-1".to_string(),
                },
            )
            .await
            .unwrap();

        let anon = CustomerContext::anonymous();
        assert!(
            h.service
                .login(&anon, login_request("max@example.com", "password123"))
                .await
                .is_err()
        );
        assert!(
            h.service
                .login(&anon, login_request("max@example.com", "new-password-1"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_save_profile() {
        let h = harness();
        let ctx = logged_in(&h, "max@example.com").await;
        h.service
            .save_profile(
                &ctx,
                ProfileSaveRequest {
                    salutation: "mrs".to_string(),
                    title: Some("Dr.".to_string()),
                    first_name: "Erika".to_string(),
                    last_name: "Musterfrau".to_string(),
                    birthday: None,
                },
            )
            .await
            .unwrap();
        let customer = h.service.get_customer(&ctx).await.unwrap();
        assert_eq!(customer.first_name, "Erika");
        assert_eq!(customer.title.as_deref(), Some("Dr."));
    }

    #[tokio::test]
    async fn test_anonymous_is_rejected_everywhere() {
        let h = harness();
        let anon = CustomerContext::anonymous();
        assert!(matches!(
            h.service.get_customer(&anon).await,
            Err(AccountError::Unauthenticated)
        ));
        assert!(matches!(
            h.service.list_addresses(&anon).await,
            Err(AccountError::Unauthenticated)
        ));
        assert!(matches!(
            h.service.delete_address(&anon, "x").await,
            Err(AccountError::Unauthenticated)
        ));
        assert!(h.service.logout(&anon).await.is_ok());
    }
}
