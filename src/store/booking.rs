use chrono::{DateTime, Utc};

use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus};
use crate::store::Store;

/// At most one booking per (student, course) pair: the lookup and the
/// insert happen under one table lock.
pub fn create_if_absent(
    student_id: i64,
    course_id: i64,
    session_date: Option<DateTime<Utc>>,
    store: &Store,
) -> Result<Booking, ApiError> {
    let mut bookings = store.bookings.write().unwrap();
    if bookings
        .find(|b| b.student_id == student_id && b.course_id == course_id)
        .is_some()
    {
        return Err(ApiError::DuplicateBooking);
    }
    Ok(bookings.insert_with(|id| Booking {
        id,
        course_id,
        student_id,
        status: BookingStatus::Pending,
        booking_time: Utc::now(),
        session_date,
    }))
}

pub fn get_by_id(id: i64, store: &Store) -> Option<Booking> {
    store.bookings.read().unwrap().get(id)
}

pub fn find_pair(student_id: i64, course_id: i64, store: &Store) -> Option<Booking> {
    store
        .bookings
        .read()
        .unwrap()
        .find(|b| b.student_id == student_id && b.course_id == course_id)
}

pub fn by_student(student_id: i64, store: &Store) -> Vec<Booking> {
    store.bookings.read().unwrap().filter(|b| b.student_id == student_id)
}

pub fn by_course(course_id: i64, store: &Store) -> Vec<Booking> {
    store.bookings.read().unwrap().filter(|b| b.course_id == course_id)
}

pub fn by_courses(course_ids: &[i64], store: &Store) -> Vec<Booking> {
    store
        .bookings
        .read()
        .unwrap()
        .filter(|b| course_ids.contains(&b.course_id))
}

pub fn set_status(id: i64, status: BookingStatus, store: &Store) -> Option<Booking> {
    store.bookings.write().unwrap().patch(id, |booking| {
        booking.status = status;
    })
}
