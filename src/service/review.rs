use crate::dto::NewReviewDto;
use crate::errors::ApiError;
use crate::models::{Review, Role};
use crate::service::auth::UserAuthData;
use crate::service::notification::{self, Fanout};
use crate::store::{self, Store};

pub async fn create(
    course_id: i64,
    dto: NewReviewDto,
    user_auth_data: &UserAuthData,
    store: &Store,
) -> Result<Review, ApiError> {
    if user_auth_data.role != Role::Student {
        return Err(ApiError::Permission);
    }
    if !(1..=5).contains(&dto.rating) {
        return Err(ApiError::Validation);
    }
    let course = match store::course::get_by_id(course_id, store) {
        Some(course) => course,
        None => return Err(ApiError::NotFound)
    };
    let review = store::review::create_if_eligible(
        user_auth_data.user_id,
        course_id,
        dto.rating,
        dto.review_text,
        store,
    )?;
    notification::dispatch(Fanout::ReviewCreated { review: &review, course: &course }, store);
    Ok(review)
}

pub async fn for_course(course_id: i64, store: &Store) -> Result<Vec<Review>, ApiError> {
    if store::course::get_by_id(course_id, store).is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(store::review::by_course(course_id, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NewCourseDto;
    use crate::models::BookingStatus;

    fn auth_for(user_id: i64, role: Role) -> UserAuthData {
        UserAuthData {
            user_id,
            username: format!("user{}", user_id),
            role,
        }
    }

    fn setup(s: &Store) -> (i64, i64, i64) {
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
        (tutor.id, student.id, course.id)
    }

    #[actix_rt::test]
    async fn review_updates_the_rating_and_notifies_the_tutor() {
        let s = Store::new();
        let (tutor_id, student_id, course_id) = setup(&s);
        let booking = store::booking::create_if_absent(student_id, course_id, None, &s).unwrap();
        store::booking::set_status(booking.id, BookingStatus::Confirmed, &s).unwrap();

        let review = create(
            course_id,
            NewReviewDto { rating: 5, review_text: Some("great".to_string()) },
            &auth_for(student_id, Role::Student),
            &s,
        ).await.unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(store::course::get_by_id(course_id, &s).unwrap().average_rating, 5.0);

        let notifications = store::notification::for_user(tutor_id, &s);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "review");
        assert_eq!(notifications[0].related_id, Some(review.id));
    }

    #[actix_rt::test]
    async fn rating_outside_one_to_five_is_rejected() {
        let s = Store::new();
        let (_, student_id, course_id) = setup(&s);
        for rating in [0u8, 6u8] {
            let res = create(
                course_id,
                NewReviewDto { rating, review_text: None },
                &auth_for(student_id, Role::Student),
                &s,
            ).await;
            assert!(matches!(res, Err(ApiError::Validation)));
        }
    }
}
