use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const DEVICE_ID_HEADER: &str = "x-device-id";
const MAX_DEVICE_ID_LEN: usize = 128;

/// Device the request came from, stored in request extensions. Clients
/// without the header see every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceContext {
    pub device_id: Option<String>,
}

fn parse_device_id(raw: Option<&str>) -> Result<Option<String>, ApiError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if value.len() > MAX_DEVICE_ID_LEN
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(ApiError::BadRequest(format!(
            "{DEVICE_ID_HEADER} must be at most {MAX_DEVICE_ID_LEN} characters of [A-Za-z0-9._-]"
        )));
    }

    Ok(Some(value.to_string()))
}

/// Reads the optional `X-Device-Id` header into a [`DeviceContext`].
pub async fn device_middleware(mut req: Request, next: Next) -> Response {
    let header = req
        .headers()
        .get(DEVICE_ID_HEADER)
        .map(|h| h.to_str().map_err(|_| ()));

    let device_id = match header {
        Some(Err(())) => {
            return ApiError::BadRequest(format!("{DEVICE_ID_HEADER} must be ASCII"))
                .into_response();
        }
        Some(Ok(value)) => parse_device_id(Some(value)),
        None => Ok(None),
    };

    match device_id {
        Ok(device_id) => {
            req.extensions_mut().insert(DeviceContext { device_id });
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
