use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use serde::Serialize;

/// Successful response; the payload is wrapped as `{"data": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T: Serialize> {
    OK(T),
    Created(T),
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        match self {
            Response::OK(data) => (StatusCode::OK, Json(Envelope { data })).into_response(),
            Response::Created(data) => {
                (StatusCode::CREATED, Json(Envelope { data })).into_response()
            }
        }
    }
}
