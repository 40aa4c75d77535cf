//! Request extractors that reject with [`AccountError`] bodies

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::account::AccountError;
use crate::criteria::PageRequest;

/// JSON body that has been deserialized and validated.
///
/// Handlers never see a request that failed its `validator` rules.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e| AccountError::InvalidParameter(e.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// `page` and `limit` query parameters
#[derive(Debug)]
pub struct PageQuery(pub PageRequest);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(req) = Query::<PageRequest>::from_request_parts(parts, state)
            .await
            .map_err(|e| AccountError::InvalidParameter(e.body_text()))?;
        Ok(Self(req))
    }
}
