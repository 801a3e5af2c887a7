use log::info;

use crate::errors::ApiError;
use crate::models::{Booking, Course, Notification, Review};
use crate::service::auth::UserAuthData;
use crate::store::{self, Store};
use crate::ADMIN_USER_ID;

/// Mutations that fan a notification out to a user other than the one
/// performing them. The whole routing table lives in `dispatch`, one
/// arm per mutation kind, instead of inline notification calls spread
/// over the handlers.
pub enum Fanout<'a> {
    CourseCreated { course: &'a Course },
    BookingCreated { booking: &'a Booking, course: &'a Course },
    BookingConfirmed { booking: &'a Booking, course: &'a Course },
    BookingRejected { booking: &'a Booking, course: &'a Course },
    ReviewCreated { review: &'a Review, course: &'a Course },
    TutorApproved { tutor_id: i64 },
}

pub fn dispatch(event: Fanout, store: &Store) {
    let (user_id, kind, message, related_id) = match event {
        Fanout::CourseCreated { course } => (
            ADMIN_USER_ID,
            "course",
            format!("new course '{}' was created by tutor #{}", course.title, course.tutor_id),
            Some(course.id),
        ),
        Fanout::BookingCreated { booking, course } => (
            course.tutor_id,
            "booking",
            format!("new booking for your course '{}'", course.title),
            Some(booking.id),
        ),
        Fanout::BookingConfirmed { booking, course } => (
            booking.student_id,
            "booking",
            format!("your booking for '{}' was confirmed", course.title),
            Some(booking.id),
        ),
        Fanout::BookingRejected { booking, course } => (
            booking.student_id,
            "booking",
            format!("your booking for '{}' was rejected", course.title),
            Some(booking.id),
        ),
        Fanout::ReviewCreated { review, course } => (
            course.tutor_id,
            "review",
            format!("your course '{}' received a {}-star review", course.title, review.rating),
            Some(review.id),
        ),
        Fanout::TutorApproved { tutor_id } => (
            tutor_id,
            "approval",
            "your tutor account was approved".to_string(),
            None,
        ),
    };
    let notification = store::notification::create(user_id, kind, message, related_id, store);
    info!("notification {} dispatched to user {}", notification.id, user_id);
}

pub async fn for_user(user_auth_data: &UserAuthData, store: &Store) -> Result<Vec<Notification>, ApiError> {
    Ok(store::notification::for_user(user_auth_data.user_id, store))
}

pub async fn mark_read(id: i64, user_auth_data: &UserAuthData, store: &Store) -> Result<Notification, ApiError> {
    let notification = match store::notification::get_by_id(id, store) {
        Some(notification) => notification,
        None => return Err(ApiError::NotFound)
    };
    if notification.user_id != user_auth_data.user_id {
        return Err(ApiError::Permission);
    }
    match store::notification::mark_read(id, store) {
        Some(notification) => Ok(notification),
        None => Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[actix_rt::test]
    async fn mark_read_is_owner_only() {
        let s = Store::new();
        let n = store::notification::create(7, "booking", "msg".to_string(), None, &s);

        let stranger = UserAuthData {
            user_id: 8,
            username: "stranger".to_string(),
            role: Role::Student,
        };
        let res = mark_read(n.id, &stranger, &s).await;
        assert!(matches!(res, Err(ApiError::Permission)));

        let owner = UserAuthData {
            user_id: 7,
            username: "owner".to_string(),
            role: Role::Student,
        };
        let n = mark_read(n.id, &owner, &s).await.unwrap();
        assert!(n.is_read);
    }
}
