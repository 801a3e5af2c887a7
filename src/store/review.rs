use chrono::Utc;

use crate::errors::ApiError;
use crate::models::{BookingStatus, Review};
use crate::store::{course, Store};

/// A review needs a confirmed booking for the same (student, course)
/// pair and only one review per pair may exist. On success the course
/// rating is recomputed.
pub fn create_if_eligible(
    student_id: i64,
    course_id: i64,
    rating: u8,
    review_text: Option<String>,
    store: &Store,
) -> Result<Review, ApiError> {
    let booking = super::booking::find_pair(student_id, course_id, store)
        .ok_or(ApiError::NotEnrolled)?;
    if booking.status != BookingStatus::Confirmed {
        return Err(ApiError::BookingNotConfirmed);
    }
    let mut reviews = store.reviews.write().unwrap();
    if reviews
        .find(|r| r.student_id == student_id && r.course_id == course_id)
        .is_some()
    {
        return Err(ApiError::DuplicateReview);
    }
    let review = reviews.insert_with(|id| Review {
        id,
        course_id,
        student_id,
        rating,
        review_text,
        created_at: Utc::now(),
    });
    // recompute_rating reads this table, release the write lock first
    drop(reviews);
    course::recompute_rating(course_id, store);
    Ok(review)
}

pub fn get_by_id(id: i64, store: &Store) -> Option<Review> {
    store.reviews.read().unwrap().get(id)
}

pub fn find_pair(student_id: i64, course_id: i64, store: &Store) -> Option<Review> {
    store
        .reviews
        .read()
        .unwrap()
        .find(|r| r.student_id == student_id && r.course_id == course_id)
}

pub fn by_course(course_id: i64, store: &Store) -> Vec<Review> {
    store.reviews.read().unwrap().filter(|r| r.course_id == course_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NewCourseDto;
    use crate::models::Role;
    use crate::store;

    fn setup(s: &Store) -> (i64, i64) {
        let tutor = store::user::create("tutor".to_string(), None, "h".to_string(), Role::Tutor, s);
        let student = store::user::create("student".to_string(), None, "h".to_string(), Role::Student, s);
        let course = store::course::create(
            NewCourseDto {
                title: "algebra".to_string(),
                descr: "descr".to_string(),
                subject: "math".to_string(),
                category: "exact".to_string(),
                price: 25.0,
            },
            tutor.id,
            s,
        );
        (student.id, course.id)
    }

    #[test]
    fn review_requires_a_confirmed_booking() {
        let s = Store::new();
        let (student_id, course_id) = setup(&s);

        // no booking at all
        let res = create_if_eligible(student_id, course_id, 5, None, &s);
        assert!(matches!(res, Err(ApiError::NotEnrolled)));

        // booking exists but is still pending
        let booking = store::booking::create_if_absent(student_id, course_id, None, &s).unwrap();
        let res = create_if_eligible(student_id, course_id, 5, None, &s);
        assert!(matches!(res, Err(ApiError::BookingNotConfirmed)));

        // confirmed booking, review goes through exactly once
        store::booking::set_status(booking.id, BookingStatus::Confirmed, &s).unwrap();
        let review = create_if_eligible(student_id, course_id, 5, None, &s).unwrap();
        assert_eq!(review.rating, 5);

        let res = create_if_eligible(student_id, course_id, 3, None, &s);
        assert!(matches!(res, Err(ApiError::DuplicateReview)));
    }

    #[test]
    fn rating_is_the_mean_of_remaining_reviews() {
        let s = Store::new();
        let (student_id, course_id) = setup(&s);
        let other = store::user::create("student2".to_string(), None, "h".to_string(), Role::Student, &s);

        let course = store::course::get_by_id(course_id, &s).unwrap();
        assert_eq!(course.average_rating, 0.0);

        let booking = store::booking::create_if_absent(student_id, course_id, None, &s).unwrap();
        store::booking::set_status(booking.id, BookingStatus::Confirmed, &s).unwrap();
        create_if_eligible(student_id, course_id, 5, None, &s).unwrap();
        assert_eq!(store::course::get_by_id(course_id, &s).unwrap().average_rating, 5.0);

        let booking = store::booking::create_if_absent(other.id, course_id, None, &s).unwrap();
        store::booking::set_status(booking.id, BookingStatus::Confirmed, &s).unwrap();
        create_if_eligible(other.id, course_id, 2, None, &s).unwrap();
        assert_eq!(store::course::get_by_id(course_id, &s).unwrap().average_rating, 3.5);
    }
}
