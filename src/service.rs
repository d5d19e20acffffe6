use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Box<str>),
    #[error("Not Found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize)]
struct HttpErrorBody {
    error: Box<str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::BadRequest(msg) => (axum::http::StatusCode::BAD_REQUEST, Some(msg)),
            Error::NotFound => (axum::http::StatusCode::NOT_FOUND, None),
        };

        match message {
            Some(error) => (status, axum::Json(HttpErrorBody { error })).into_response(),
            None => status.into_response(),
        }
    }
}
