use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::HashMap;

use super::{query_params::QueryParams, server::api_entities::api_error::ApiError};

/// Extractor for `filter[...]`, `offset` and `limit` query parameters
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub QueryParams);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let query_map: HashMap<String, String> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::BadRequest(format!("invalid query string: {e}")))?;

        QueryParams::from_query_map(&query_map)
            .map(QueryParamsExtractor)
            .map_err(ApiError::BadRequest)
    }
}
