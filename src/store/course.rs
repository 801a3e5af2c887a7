use chrono::Utc;
use log::info;

use crate::dto::{NewCourseDto, UpdateCourseDto};
use crate::models::Course;
use crate::store::Store;

pub enum Filter {
    Subject(String),
    Category(String),
    Tutor(i64),
}

pub fn create(dto: NewCourseDto, tutor_id: i64, store: &Store) -> Course {
    store.courses.write().unwrap().insert_with(|id| Course {
        id,
        title: dto.title,
        descr: dto.descr,
        subject: dto.subject,
        category: dto.category,
        price: dto.price,
        tutor_id,
        average_rating: 0.0,
        published: false,
        created_at: Utc::now(),
    })
}

pub fn get_by_id(id: i64, store: &Store) -> Option<Course> {
    store.courses.read().unwrap().get(id)
}

pub fn get_all(store: &Store) -> Vec<Course> {
    store.courses.read().unwrap().all()
}

pub fn filter(filters: Filter, store: &Store) -> Vec<Course> {
    let courses = store.courses.read().unwrap();
    match filters {
        Filter::Subject(subject) => courses.filter(|c| c.subject == subject),
        Filter::Category(category) => courses.filter(|c| c.category == category),
        Filter::Tutor(tutor_id) => courses.filter(|c| c.tutor_id == tutor_id),
    }
}

pub fn set_fields(id: i64, course_fields: UpdateCourseDto, store: &Store) -> Option<Course> {
    store.courses.write().unwrap().patch(id, |course| {
        if let Some(v) = course_fields.title {
            course.title = v;
        }
        if let Some(v) = course_fields.descr {
            course.descr = v;
        }
        if let Some(v) = course_fields.subject {
            course.subject = v;
        }
        if let Some(v) = course_fields.category {
            course.category = v;
        }
        if let Some(v) = course_fields.price {
            course.price = v;
        }
        if let Some(v) = course_fields.published {
            course.published = v;
        }
    })
}

/// Cascade delete: bookings first, then reviews, then the course
/// itself. The three steps take their table locks in sequence, there
/// is no transaction boundary around them; the store is volatile and
/// rebuilt from scratch on restart.
pub fn delete(id: i64, store: &Store) -> bool {
    if store.courses.read().unwrap().get(id).is_none() {
        return false;
    }
    let removed_bookings = store.bookings.write().unwrap().remove_where(|b| b.course_id == id);
    let removed_reviews = store.reviews.write().unwrap().remove_where(|r| r.course_id == id);
    info!(
        "course {} cascade removed {} bookings and {} reviews",
        id, removed_bookings, removed_reviews
    );
    store.courses.write().unwrap().remove(id)
}

/// mean of the remaining review ratings written back into the course
/// record, 0 when no reviews remain
pub fn recompute_rating(course_id: i64, store: &Store) -> Option<Course> {
    let ratings: Vec<u8> = store
        .reviews
        .read()
        .unwrap()
        .filter(|r| r.course_id == course_id)
        .iter()
        .map(|r| r.rating)
        .collect();
    let average = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
    };
    store.courses.write().unwrap().patch(course_id, |course| {
        course.average_rating = average;
    })
}
