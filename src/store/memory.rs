//! In-memory storage
//!
//! Implements every repository trait over `RwLock`-guarded maps. Used when
//! no PostgreSQL URL is configured and by the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::models::{AddressData, Customer, CustomerAddress, ProfileData};
use crate::account::repository::{
    AddressRepository, CustomerRepository, DefaultAddressKind, EmailClaim, RepoResult,
};
use crate::core_types::{AddressId, CustomerId, SessionId};
use crate::criteria::{Criteria, SearchResult};
use crate::order::{Order, OrderField, OrderRepository};
use crate::session::{Session, SessionRepository};

#[derive(Default)]
pub struct MemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    addresses: RwLock<HashMap<AddressId, CustomerAddress>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders are read-only through the API; this is how they get in.
    pub async fn insert_order(&self, order: Order) {
        self.orders.write().await.push(order);
    }
}

fn unique_violation(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("duplicate {}", what))
}

/// Whether a registered customer other than `except` holds `email`
fn email_held(customers: &HashMap<CustomerId, Customer>, email: &str, except: CustomerId) -> bool {
    customers
        .values()
        .any(|c| !c.guest && c.email == email && c.id != except)
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_registered_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| !c.guest && c.email == email)
            .cloned())
    }

    async fn email_in_use(&self, email: &str, except: Option<CustomerId>) -> RepoResult<bool> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .any(|c| !c.guest && c.email == email && Some(c.id) != except))
    }

    async fn create(
        &self,
        customer: &Customer,
        addresses: &[CustomerAddress],
    ) -> RepoResult<EmailClaim> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.id) {
            return Err(unique_violation("customer"));
        }
        if !customer.guest && email_held(&customers, &customer.email, customer.id) {
            return Ok(EmailClaim::Taken);
        }
        let mut stored = self.addresses.write().await;
        for address in addresses {
            stored.insert(address.id, address.clone());
        }
        customers.insert(customer.id, customer.clone());
        Ok(EmailClaim::Claimed)
    }

    async fn update_profile(&self, id: CustomerId, profile: &ProfileData) -> RepoResult<()> {
        if let Some(c) = self.customers.write().await.get_mut(&id) {
            c.salutation = profile.salutation.clone();
            c.title = profile.title.clone();
            c.first_name = profile.first_name.clone();
            c.last_name = profile.last_name.clone();
            c.birthday = profile.birthday;
            c.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn update_email(&self, id: CustomerId, email: &str) -> RepoResult<EmailClaim> {
        let mut customers = self.customers.write().await;
        let guest = customers.get(&id).is_none_or(|c| c.guest);
        if !guest && email_held(&customers, email, id) {
            return Ok(EmailClaim::Taken);
        }
        if let Some(c) = customers.get_mut(&id) {
            c.email = email.to_string();
            c.updated_at = Some(Utc::now());
        }
        Ok(EmailClaim::Claimed)
    }

    async fn update_password(&self, id: CustomerId, password_hash: &str) -> RepoResult<()> {
        if let Some(c) = self.customers.write().await.get_mut(&id) {
            c.password_hash = Some(password_hash.to_string());
            c.updated_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn set_default_address(
        &self,
        id: CustomerId,
        kind: DefaultAddressKind,
        address_id: AddressId,
    ) -> RepoResult<()> {
        if let Some(c) = self.customers.write().await.get_mut(&id) {
            match kind {
                DefaultAddressKind::Billing => c.default_billing_address_id = Some(address_id),
                DefaultAddressKind::Shipping => c.default_shipping_address_id = Some(address_id),
            }
            c.updated_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for MemoryStore {
    async fn list_by_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<CustomerAddress>> {
        let mut list: Vec<CustomerAddress> = self
            .addresses
            .read()
            .await
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn find(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<Option<CustomerAddress>> {
        Ok(self
            .addresses
            .read()
            .await
            .get(&id)
            .filter(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn insert(&self, address: &CustomerAddress) -> RepoResult<()> {
        let mut addresses = self.addresses.write().await;
        if addresses.contains_key(&address.id) {
            return Err(unique_violation("address"));
        }
        addresses.insert(address.id, address.clone());
        Ok(())
    }

    async fn update(&self, customer_id: CustomerId, id: AddressId, data: &AddressData) -> RepoResult<bool> {
        let mut addresses = self.addresses.write().await;
        match addresses.get_mut(&id) {
            Some(a) if a.customer_id == customer_id => {
                let created_at = a.created_at;
                *a = data.clone().into_address(id, customer_id);
                a.created_at = created_at;
                a.updated_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<bool> {
        let mut addresses = self.addresses.write().await;
        if addresses.get(&id).is_some_and(|a| a.customer_id == customer_id) {
            addresses.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        self.sessions.write().await.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_active(&self, id: SessionId) -> RepoResult<Option<Session>> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&id)
            .filter(|s| s.is_active())
            .cloned())
    }

    async fn revoke(&self, id: SessionId) -> RepoResult<()> {
        if let Some(s) = self.sessions.write().await.get_mut(&id) {
            s.revoked_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn search(&self, criteria: &Criteria<OrderField>) -> RepoResult<SearchResult<Order>> {
        let orders = self.orders.read().await;
        Ok(criteria.apply(orders.as_slice()))
    }
}

#[cfg(test)]
pub(crate) fn sample_order(customer_id: CustomerId, order_date: chrono::DateTime<Utc>) -> Order {
    use crate::core_types::{OrderId, OrderLineItemId};
    use crate::order::{OrderLineItem, OrderState};
    use rust_decimal::Decimal;

    let id = OrderId::new();
    Order {
        id,
        order_number: id.to_string()[..8].to_string(),
        customer_id,
        order_date,
        state: OrderState::Open,
        currency: "EUR".to_string(),
        amount_total: Decimal::new(2499, 2),
        amount_net: Decimal::new(2100, 2),
        shipping_total: Decimal::new(499, 2),
        line_items: vec![OrderLineItem {
            id: OrderLineItemId::new(),
            position: 1,
            label: "Main product".to_string(),
            quantity: 1,
            unit_price: Decimal::new(2000, 2),
            total_price: Decimal::new(2000, 2),
        }],
    }
}
