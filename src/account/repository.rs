//! Repository layer for customers and their address book
//!
//! The traits abstract storage so the account service runs against
//! PostgreSQL in production and the in-memory store in tests.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{AddressData, Customer, CustomerAddress, ProfileData};
use crate::core_types::{AddressId, CustomerId};

pub type RepoResult<T> = Result<T, sqlx::Error>;

/// Partial unique index over the emails of registered customers
pub const REGISTERED_EMAIL_INDEX: &str = "customers_registered_email_uq";

/// Outcome of a write that assigns an email to a registered customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailClaim {
    Claimed,
    /// Another registered customer already holds the email
    Taken,
}

/// True when `err` is the unique violation on [`REGISTERED_EMAIL_INDEX`].
pub fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some(REGISTERED_EMAIL_INDEX)
        }
        _ => false,
    }
}

fn claim_email(result: RepoResult<()>) -> RepoResult<EmailClaim> {
    match result {
        Ok(()) => Ok(EmailClaim::Claimed),
        Err(e) if is_email_conflict(&e) => Ok(EmailClaim::Taken),
        Err(e) => Err(e),
    }
}

/// Which default address slot of a customer to change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAddressKind {
    Billing,
    Shipping,
}

impl DefaultAddressKind {
    fn column(self) -> &'static str {
        match self {
            DefaultAddressKind::Billing => "default_billing_address_id",
            DefaultAddressKind::Shipping => "default_shipping_address_id",
        }
    }
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>>;

    /// Registered (non-guest) customer by normalized email
    async fn find_registered_by_email(&self, email: &str) -> RepoResult<Option<Customer>>;

    /// Whether a registered customer other than `except` uses this email
    async fn email_in_use(&self, email: &str, except: Option<CustomerId>) -> RepoResult<bool>;

    /// Store a new customer together with its initial addresses, atomically.
    /// Nothing is stored when the email is [`EmailClaim::Taken`].
    async fn create(
        &self,
        customer: &Customer,
        addresses: &[CustomerAddress],
    ) -> RepoResult<EmailClaim>;

    async fn update_profile(&self, id: CustomerId, profile: &ProfileData) -> RepoResult<()>;

    async fn update_email(&self, id: CustomerId, email: &str) -> RepoResult<EmailClaim>;

    async fn update_password(&self, id: CustomerId, password_hash: &str) -> RepoResult<()>;

    async fn set_default_address(
        &self,
        id: CustomerId,
        kind: DefaultAddressKind,
        address_id: AddressId,
    ) -> RepoResult<()>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn list_by_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<CustomerAddress>>;

    /// Address `id` if it belongs to `customer_id`
    async fn find(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<Option<CustomerAddress>>;

    async fn insert(&self, address: &CustomerAddress) -> RepoResult<()>;

    /// Returns false when no address `id` belongs to `customer_id`
    async fn update(&self, customer_id: CustomerId, id: AddressId, data: &AddressData) -> RepoResult<bool>;

    /// Returns false when no address `id` belongs to `customer_id`
    async fn delete(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<bool>;
}

// ============================================================================
// PostgreSQL Implementation
// ============================================================================

const CUSTOMER_COLUMNS: &str = r#"id, salutation, title, first_name, last_name, email, guest, active,
       birthday, default_billing_address_id, default_shipping_address_id,
       password_hash, created_at, updated_at"#;

const ADDRESS_COLUMNS: &str = r#"id, customer_id, salutation, first_name, last_name, company,
       department, street, zipcode, city, country_id, phone_number,
       additional_address_line1, additional_address_line2, created_at, updated_at"#;

/// PostgreSQL-backed customer and address repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn insert_address<'e, E>(executor: E, address: &CustomerAddress) -> RepoResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"INSERT INTO customer_addresses
               (id, customer_id, salutation, first_name, last_name, company, department,
                street, zipcode, city, country_id, phone_number,
                additional_address_line1, additional_address_line2, created_at)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"#,
    )
    .bind(address.id)
    .bind(address.customer_id)
    .bind(&address.salutation)
    .bind(&address.first_name)
    .bind(&address.last_name)
    .bind(&address.company)
    .bind(&address.department)
    .bind(&address.street)
    .bind(&address.zipcode)
    .bind(&address.city)
    .bind(address.country_id)
    .bind(&address.phone_number)
    .bind(&address.additional_address_line1)
    .bind(&address.additional_address_line2)
    .bind(address.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait]
impl CustomerRepository for PgAccountRepository {
    async fn find_by_id(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn find_registered_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE email = $1 AND guest = FALSE",
            CUSTOMER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn email_in_use(&self, email: &str, except: Option<CustomerId>) -> RepoResult<bool> {
        let (in_use,): (bool,) = sqlx::query_as(
            r#"SELECT EXISTS(
                   SELECT 1 FROM customers
                   WHERE email = $1 AND guest = FALSE AND ($2::uuid IS NULL OR id <> $2)
               )"#,
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(in_use)
    }

    async fn create(
        &self,
        customer: &Customer,
        addresses: &[CustomerAddress],
    ) -> RepoResult<EmailClaim> {
        let mut tx = self.pool.begin().await?;

        // Defaults reference addresses, which reference the customer: insert
        // without defaults first, then link them.
        let inserted = sqlx::query(
            r#"INSERT INTO customers
                   (id, salutation, title, first_name, last_name, email, guest, active,
                    birthday, password_hash, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(customer.id)
        .bind(&customer.salutation)
        .bind(&customer.title)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.guest)
        .bind(customer.active)
        .bind(customer.birthday)
        .bind(&customer.password_hash)
        .bind(customer.created_at)
        .execute(&mut *tx)
        .await
        .map(|_| ());
        if claim_email(inserted)? == EmailClaim::Taken {
            return Ok(EmailClaim::Taken);
        }

        for address in addresses {
            insert_address(&mut *tx, address).await?;
        }

        sqlx::query(
            r#"UPDATE customers
               SET default_billing_address_id = $2, default_shipping_address_id = $3
               WHERE id = $1"#,
        )
        .bind(customer.id)
        .bind(customer.default_billing_address_id)
        .bind(customer.default_shipping_address_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(EmailClaim::Claimed)
    }

    async fn update_profile(&self, id: CustomerId, profile: &ProfileData) -> RepoResult<()> {
        sqlx::query(
            r#"UPDATE customers
               SET salutation = $2, title = $3, first_name = $4, last_name = $5,
                   birthday = $6, updated_at = $7
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(&profile.salutation)
        .bind(&profile.title)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.birthday)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_email(&self, id: CustomerId, email: &str) -> RepoResult<EmailClaim> {
        let updated = sqlx::query("UPDATE customers SET email = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(email)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map(|_| ());
        claim_email(updated)
    }

    async fn update_password(&self, id: CustomerId, password_hash: &str) -> RepoResult<()> {
        sqlx::query("UPDATE customers SET password_hash = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_default_address(
        &self,
        id: CustomerId,
        kind: DefaultAddressKind,
        address_id: AddressId,
    ) -> RepoResult<()> {
        sqlx::query(&format!(
            "UPDATE customers SET {} = $2, updated_at = $3 WHERE id = $1",
            kind.column()
        ))
        .bind(id)
        .bind(address_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for PgAccountRepository {
    async fn list_by_customer(&self, customer_id: CustomerId) -> RepoResult<Vec<CustomerAddress>> {
        sqlx::query_as::<_, CustomerAddress>(&format!(
            "SELECT {} FROM customer_addresses WHERE customer_id = $1 ORDER BY created_at, id",
            ADDRESS_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn find(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<Option<CustomerAddress>> {
        sqlx::query_as::<_, CustomerAddress>(&format!(
            "SELECT {} FROM customer_addresses WHERE id = $1 AND customer_id = $2",
            ADDRESS_COLUMNS
        ))
        .bind(id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert(&self, address: &CustomerAddress) -> RepoResult<()> {
        insert_address(&self.pool, address).await
    }

    async fn update(&self, customer_id: CustomerId, id: AddressId, data: &AddressData) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"UPDATE customer_addresses
               SET salutation = $3, first_name = $4, last_name = $5, company = $6,
                   department = $7, street = $8, zipcode = $9, city = $10,
                   country_id = $11, phone_number = $12, additional_address_line1 = $13,
                   additional_address_line2 = $14, updated_at = $15
               WHERE id = $1 AND customer_id = $2"#,
        )
        .bind(id)
        .bind(customer_id)
        .bind(&data.salutation)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.company)
        .bind(&data.department)
        .bind(&data.street)
        .bind(&data.zipcode)
        .bind(&data.city)
        .bind(data.country_id)
        .bind(&data.phone_number)
        .bind(&data.additional_address_line1)
        .bind(&data.additional_address_line2)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, customer_id: CustomerId, id: AddressId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM customer_addresses WHERE id = $1 AND customer_id = $2")
            .bind(id)
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
