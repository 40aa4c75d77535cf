//! Typed request bodies, one per account operation
//!
//! Each request is validated at the HTTP boundary (see
//! [`crate::gateway::types::ValidatedJson`]) before it reaches the service.

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::models::{AddressData, ProfileData};
use crate::core_types::CountryId;

/// Minimum length of a customer password
pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Customer email address
    #[serde(alias = "email")]
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "max@example.com")]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Postal address as submitted by the customer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "mr")]
    pub salutation: String,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    #[validate(length(max = 255))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 50))]
    pub zipcode: String,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    pub country_id: CountryId,
    #[validate(length(max = 40))]
    pub phone_number: Option<String>,
    #[validate(length(max = 255))]
    pub additional_address_line1: Option<String>,
    #[validate(length(max = 255))]
    pub additional_address_line2: Option<String>,
}

impl AddressInput {
    pub fn into_data(self) -> AddressData {
        AddressData {
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
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 50))]
    pub salutation: String,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Required unless `guest` is set
    pub password: Option<String>,
    #[serde(default)]
    pub guest: bool,
    pub birthday: Option<NaiveDate>,
    #[validate(nested)]
    pub billing_address: AddressInput,
    /// Falls back to the billing address when omitted
    #[validate(nested)]
    pub shipping_address: Option<AddressInput>,
}

impl RegistrationRequest {
    /// The password, if the account needs one and it is acceptable.
    pub fn checked_password(&self) -> Result<Option<&str>, &'static str> {
        match (self.guest, self.password.as_deref()) {
            (true, _) => Ok(None),
            (false, Some(p)) if p.chars().count() >= PASSWORD_MIN_LENGTH => Ok(Some(p)),
            (false, _) => Err("password: must be at least 8 characters"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressSaveRequest {
    /// Existing address to update; a new address is created when omitted
    pub id: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressInput,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailSaveRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(must_match(other = "email", message = "does not match email"))]
    pub email_confirmation: String,
    /// Current password
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordSaveRequest {
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "does not match password"))]
    pub password_confirmation: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSaveRequest {
    #[validate(length(min = 1, max = 50))]
    pub salutation: String,
    #[validate(length(max = 100))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
    pub birthday: Option<NaiveDate>,
}

impl ProfileSaveRequest {
    pub fn into_data(self) -> ProfileData {
        ProfileData {
            salutation: self.salutation,
            title: self.title,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address_json() -> serde_json::Value {
        json!({
            "salutation": "mr",
            "firstName": "Max",
            "lastName": "Mustermann",
            "street": "Ebbinghoff 10",
            "zipcode": "48624",
            "city": "Schöppingen",
            "countryId": "0190c2d1b4a77c1e9f3b2a6d8e5f4c3b"
        })
    }

    #[test]
    fn test_login_accepts_email_alias() {
        let req: LoginRequest =
            serde_json::from_value(json!({"email": "a@b.c", "password": "x"})).unwrap();
        assert_eq!(req.username, "a@b.c");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_rejects_empty() {
        let req: LoginRequest =
            serde_json::from_value(json!({"username": "", "password": ""})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_registration_nested_address_validated() {
        let mut billing = address_json();
        billing["street"] = json!("");
        let req: RegistrationRequest = serde_json::from_value(json!({
            "salutation": "mr",
            "firstName": "Max",
            "lastName": "Mustermann",
            "email": "max@example.com",
            "password": "password123",
            "billingAddress": billing,
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_registration_password_rules() {
        let mut req: RegistrationRequest = serde_json::from_value(json!({
            "salutation": "mr",
            "firstName": "Max",
            "lastName": "Mustermann",
            "email": "max@example.com",
            "billingAddress": address_json(),
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.guest);
        assert!(req.checked_password().is_err());

        req.password = Some("short".into());
        assert!(req.checked_password().is_err());

        req.password = Some("password123".into());
        assert_eq!(req.checked_password(), Ok(Some("password123")));

        req.guest = true;
        req.password = None;
        assert_eq!(req.checked_password(), Ok(None));
    }

    #[test]
    fn test_address_save_request_flattened() {
        let mut body = address_json();
        body["id"] = json!("0190c2d1b4a77c1e9f3b2a6d8e5f4c3c");
        let req: AddressSaveRequest = serde_json::from_value(body).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.id.as_deref(), Some("0190c2d1b4a77c1e9f3b2a6d8e5f4c3c"));
        assert_eq!(req.address.city, "Schöppingen");
    }

    #[test]
    fn test_address_rejects_bad_country_id() {
        let mut body = address_json();
        body["countryId"] = json!("germany");
        assert!(serde_json::from_value::<AddressSaveRequest>(body).is_err());
    }

    #[test]
    fn test_email_confirmation_must_match() {
        let req: EmailSaveRequest = serde_json::from_value(json!({
            "email": "new@example.com",
            "emailConfirmation": "other@example.com",
            "password": "password123"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email_confirmation"));
    }

    #[test]
    fn test_password_rules() {
        let empty: PasswordSaveRequest = serde_json::from_value(json!({
            "password": "",
            "passwordConfirmation": ""
        }))
        .unwrap();
        assert!(empty.validate().is_err());

        let ok: PasswordSaveRequest = serde_json::from_value(json!({
            "password": "new-password",
            "passwordConfirmation": "new-password"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_profile_birthday_is_iso_date() {
        let req: ProfileSaveRequest = serde_json::from_value(json!({
            "salutation": "mrs",
            "firstName": "Erika",
            "lastName": "Musterfrau",
            "birthday": "1990-04-01"
        }))
        .unwrap();
        let data = req.into_data();
        assert_eq!(data.birthday, NaiveDate::from_ymd_opt(1990, 4, 1));
    }
}
