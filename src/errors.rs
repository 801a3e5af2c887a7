use actix_web::{
    error,
    http::StatusCode,
    HttpResponse,
};
use derive_more::{Display, Error};

#[derive(Debug, Clone, Display, Error, serde::Deserialize, serde::Serialize)]
pub enum ApiError {
    #[display(fmt = "internal error")]
    Internal,

    #[display(fmt = "not found")]
    NotFound,

    #[display(fmt = "invalid request data")]
    Validation,

    #[display(fmt = "booking for this course already exists")]
    DuplicateBooking,

    #[display(fmt = "review for this course already exists")]
    DuplicateReview,

    #[display(fmt = "no booking for this course")]
    NotEnrolled,

    #[display(fmt = "booking is not confirmed")]
    BookingNotConfirmed,

    #[display(fmt = "operation is not permitted")]
    Permission,

    #[display(fmt = "authentication error")]
    AuthError,

    #[display(fmt = "token decoding error")]
    DecodeError,

    #[display(fmt = "token expired")]
    TokenExpired,
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::DuplicateBooking => StatusCode::BAD_REQUEST,
            ApiError::DuplicateReview => StatusCode::BAD_REQUEST,
            ApiError::NotEnrolled => StatusCode::BAD_REQUEST,
            ApiError::BookingNotConfirmed => StatusCode::BAD_REQUEST,
            ApiError::Permission => StatusCode::FORBIDDEN,
            ApiError::AuthError => StatusCode::UNAUTHORIZED,
            ApiError::DecodeError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
        }
    }
}
