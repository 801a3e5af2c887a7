use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::models::{BookingStatus, Role};

#[derive(Debug, Deserialize, Clone)]
pub struct NewUserDto {
    pub username: String,
    pub email: Option<String>,
    pub pwd: String,
    pub pwd_confirm: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginUserRequest {
    pub username: String,
    pub pwd: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn new(user_id: i64, username: &str, role: Role, exp: usize) -> Self {
        Self {
            user_id,
            username: username.to_string(),
            role,
            exp,
        }
    }
}

/// patch type for the user table, only the mutable fields
#[derive(Debug, Clone)]
pub struct UpdateUserDto {
    pub pwd_hash: Option<String>,
    pub email: Option<String>,
    pub is_approved: Option<bool>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApproveUserDto {
    pub is_approved: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewCourseDto {
    pub title: String,
    pub descr: String,
    pub subject: String,
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateCourseDto {
    pub title: Option<String>,
    pub descr: Option<String>,
    pub subject: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub published: Option<bool>,
}

impl UpdateCourseDto {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.descr.is_none()
            && self.subject.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.published.is_none()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewBookingDto {
    pub course_id: i64,
    pub session_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingStatusDto {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewReviewDto {
    pub rating: u8,
    pub review_text: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CourseFilterQuery {
    pub subject: Option<String>,
    pub category: Option<String>,
    pub tutor_id: Option<i64>,
}
