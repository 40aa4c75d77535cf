//! Data models for customer accounts

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core_types::{AddressId, CountryId, CustomerId};

/// Customer account
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[schema(example = "mr")]
    pub salutation: String,
    pub title: Option<String>,
    #[schema(example = "Max")]
    pub first_name: String,
    #[schema(example = "Mustermann")]
    pub last_name: String,
    #[schema(example = "max@example.com")]
    pub email: String,
    pub guest: bool,
    pub active: bool,
    pub birthday: Option<NaiveDate>,
    pub default_billing_address_id: Option<AddressId>,
    pub default_shipping_address_id: Option<AddressId>,
    /// argon2 PHC string; guests have none
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Only active, registered customers with a password may log in.
    pub fn can_login(&self) -> bool {
        self.active && !self.guest && self.password_hash.is_some()
    }

    pub fn is_default_address(&self, address_id: AddressId) -> bool {
        self.default_billing_address_id == Some(address_id)
            || self.default_shipping_address_id == Some(address_id)
    }
}

/// Entry of a customer's address book
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub department: Option<String>,
    #[schema(example = "Ebbinghoff 10")]
    pub street: String,
    #[schema(example = "48624")]
    pub zipcode: String,
    #[schema(example = "Schöppingen")]
    pub city: String,
    pub country_id: CountryId,
    pub phone_number: Option<String>,
    pub additional_address_line1: Option<String>,
    pub additional_address_line2: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Address fields as written by the account service
#[derive(Debug, Clone, PartialEq)]
pub struct AddressData {
    pub salutation: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub department: Option<String>,
    pub street: String,
    pub zipcode: String,
    pub city: String,
    pub country_id: CountryId,
    pub phone_number: Option<String>,
    pub additional_address_line1: Option<String>,
    pub additional_address_line2: Option<String>,
}

impl AddressData {
    pub fn into_address(self, id: AddressId, customer_id: CustomerId) -> CustomerAddress {
        CustomerAddress {
            id,
            customer_id,
            salutation: self.salutation,
            first_name: self.first_name,
            last_name: self.last_name,
            company: self.company,
            department: self.department,
            street: self.street,
            zipcode: self.zipcode,
            city: self.city,
            country_id: self.country_id,
            phone_number: self.phone_number,
            additional_address_line1: self.additional_address_line1,
            additional_address_line2: self.additional_address_line2,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Profile fields changed through the profile endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub salutation: String,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
}
