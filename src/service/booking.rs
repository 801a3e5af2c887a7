use crate::dto::{BookingStatusDto, NewBookingDto};
use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus, Role};
use crate::service::auth::UserAuthData;
use crate::service::notification::{self, Fanout};
use crate::store::{self, course::Filter, Store};

pub async fn create(user_auth_data: &UserAuthData, dto: NewBookingDto, store: &Store) -> Result<Booking, ApiError> {
    if user_auth_data.role != Role::Student {
        return Err(ApiError::Permission);
    }
    let course = match store::course::get_by_id(dto.course_id, store) {
        Some(course) => course,
        None => return Err(ApiError::NotFound)
    };
    let booking = store::booking::create_if_absent(
        user_auth_data.user_id,
        dto.course_id,
        dto.session_date,
        store,
    )?;
    notification::dispatch(Fanout::BookingCreated { booking: &booking, course: &course }, store);
    Ok(booking)
}

pub async fn get_by_id(id: i64, store: &Store) -> Result<Booking, ApiError> {
    match store::booking::get_by_id(id, store) {
        Some(booking) => Ok(booking),
        None => Err(ApiError::NotFound)
    }
}

/// the course-owning tutor moves a pending booking to Confirmed or
/// Rejected, the student is notified either way
pub async fn set_status(
    id: i64,
    dto: BookingStatusDto,
    user_auth_data: &UserAuthData,
    store: &Store,
) -> Result<Booking, ApiError> {
    let booking = match store::booking::get_by_id(id, store) {
        Some(booking) => booking,
        None => return Err(ApiError::NotFound)
    };
    let course = match store::course::get_by_id(booking.course_id, store) {
        Some(course) => course,
        None => return Err(ApiError::NotFound)
    };
    if user_auth_data.user_id != course.tutor_id {
        return Err(ApiError::Permission);
    }
    // only the Pending -> Confirmed/Rejected transitions exist
    if booking.status != BookingStatus::Pending || dto.status == BookingStatus::Pending {
        return Err(ApiError::Validation);
    }
    let updated = match store::booking::set_status(id, dto.status, store) {
        Some(booking) => booking,
        None => return Err(ApiError::NotFound)
    };
    match updated.status {
        BookingStatus::Confirmed => {
            notification::dispatch(Fanout::BookingConfirmed { booking: &updated, course: &course }, store)
        }
        BookingStatus::Rejected => {
            notification::dispatch(Fanout::BookingRejected { booking: &updated, course: &course }, store)
        }
        BookingStatus::Pending => {}
    }
    Ok(updated)
}

pub async fn for_student(user_auth_data: &UserAuthData, store: &Store) -> Result<Vec<Booking>, ApiError> {
    Ok(store::booking::by_student(user_auth_data.user_id, store))
}

/// bookings on every course the tutor owns
pub async fn for_tutor(user_auth_data: &UserAuthData, store: &Store) -> Result<Vec<Booking>, ApiError> {
    if user_auth_data.role != Role::Tutor {
        return Err(ApiError::Permission);
    }
    let course_ids: Vec<i64> = store::course::filter(Filter::Tutor(user_auth_data.user_id), store)
        .iter()
        .map(|c| c.id)
        .collect();
    Ok(store::booking::by_courses(&course_ids, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::NewCourseDto;
    use crate::store;

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
    async fn booking_a_course_twice_fails_and_notifies_the_tutor_once() {
        let s = Store::new();
        let (tutor_id, student_id, course_id) = setup(&s);

        let auth = auth_for(student_id, Role::Student);
        let booking = create(&auth, NewBookingDto { course_id, session_date: None }, &s).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);

        let res = create(&auth, NewBookingDto { course_id, session_date: None }, &s).await;
        assert!(matches!(res, Err(ApiError::DuplicateBooking)));

        let notifications = store::notification::for_user(tutor_id, &s);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "booking");
    }

    #[actix_rt::test]
    async fn only_the_course_owner_may_confirm_a_booking() {
        let s = Store::new();
        let (tutor_id, student_id, course_id) = setup(&s);
        let booking = create(
            &auth_for(student_id, Role::Student),
            NewBookingDto { course_id, session_date: None },
            &s,
        ).await.unwrap();

        let res = set_status(
            booking.id,
            BookingStatusDto { status: BookingStatus::Confirmed },
            &auth_for(student_id, Role::Student),
            &s,
        ).await;
        assert!(matches!(res, Err(ApiError::Permission)));

        let updated = set_status(
            booking.id,
            BookingStatusDto { status: BookingStatus::Confirmed },
            &auth_for(tutor_id, Role::Tutor),
            &s,
        ).await.unwrap();
        assert_eq!(updated.status, BookingStatus::Confirmed);

        // the student learned about the confirmation
        let notifications = store::notification::for_user(student_id, &s);
        assert_eq!(notifications.len(), 1);

        // no transition leaves a non-pending state
        let res = set_status(
            booking.id,
            BookingStatusDto { status: BookingStatus::Rejected },
            &auth_for(tutor_id, Role::Tutor),
            &s,
        ).await;
        assert!(matches!(res, Err(ApiError::Validation)));
    }

    #[actix_rt::test]
    async fn booking_an_absent_course_is_not_found() {
        let s = Store::new();
        let (_, student_id, _) = setup(&s);
        let res = create(
            &auth_for(student_id, Role::Student),
            NewBookingDto { course_id: 404, session_date: None },
            &s,
        ).await;
        assert!(matches!(res, Err(ApiError::NotFound)));
    }
}
