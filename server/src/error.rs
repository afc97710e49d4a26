use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Every way a request can fail. Each variant maps to one status code and a
/// plain-text body; nothing is retried and nothing outlives the request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Please use POST method to shorten URLs.")]
    ShortenMethod,

    #[error("Failed to read your request.")]
    UnreadableBody,

    #[error("Invalid JSON. Make sure you send {{'url': 'your_long_url'}}.")]
    InvalidJson,

    #[error("URL cannot be empty.")]
    EmptyUrl,

    #[error("URL must start with http:// or https://.")]
    UnsupportedScheme,

    #[error("Please use GET method to access short URLs.")]
    RedirectMethod,

    #[error("Short code not found in URL.")]
    MissingCode,

    #[error("Short URL not found in our records.")]
    UnknownCode,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ShortenMethod | ApiError::RedirectMethod => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnreadableBody => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidJson
            | ApiError::EmptyUrl
            | ApiError::UnsupportedScheme
            | ApiError::MissingCode => StatusCode::BAD_REQUEST,
            ApiError::UnknownCode => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
