use crate::dto::{NewCourseDto, UpdateCourseDto};
use crate::errors::ApiError;
use crate::models::{Course, Role};
use crate::service::auth::UserAuthData;
use crate::service::notification::{self, Fanout};
use crate::store::{self, course::Filter, Store};

pub async fn create(user_auth_data: &UserAuthData, dto: NewCourseDto, store: &Store) -> Result<Course, ApiError> {
   if user_auth_data.role != Role::Tutor {
      return Err(ApiError::Permission);
   }
   let tutor = match store::user::get_by_id(user_auth_data.user_id, store) {
      Some(user) => user,
      None => return Err(ApiError::AuthError)
   };
   if !tutor.is_approved {
      return Err(ApiError::Permission);
   }
   if dto.title.trim().is_empty() || dto.price < 0.0 {
      return Err(ApiError::Validation);
   }
   let course = store::course::create(dto, user_auth_data.user_id, store);
   notification::dispatch(Fanout::CourseCreated { course: &course }, store);
   Ok(course)
}

pub async fn get_all(store: &Store) -> Result<Vec<Course>, ApiError> {
   Ok(store::course::get_all(store))
}

pub async fn get_by_id(id: i64, store: &Store) -> Result<Course, ApiError> {
   match store::course::get_by_id(id, store) {
      Some(course) => Ok(course),
      None => Err(ApiError::NotFound)
   }
}

pub async fn filter(filters: Filter, store: &Store) -> Result<Vec<Course>, ApiError> {
   Ok(store::course::filter(filters, store))
}

pub async fn update(
   id: i64,
   course_fields: UpdateCourseDto,
   user_auth_data: &UserAuthData,
   store: &Store
) -> Result<Course, ApiError> {
   let course = match store::course::get_by_id(id, store) {
      Some(course) => course,
      None => return Err(ApiError::NotFound)
   };
   if user_auth_data.user_id != course.tutor_id {
      return Err(ApiError::Permission);
   }
   if course_fields.is_empty() {
      return Err(ApiError::Validation);
   }
   if let Some(price) = course_fields.price {
      if price < 0.0 {
         return Err(ApiError::Validation);
      }
   }
   match store::course::set_fields(id, course_fields, store) {
      Some(course) => Ok(course),
      None => Err(ApiError::NotFound)
   }
}

/// cascade: bookings and reviews of the course go first, then the
/// course itself
pub async fn delete(id: i64, user_auth_data: &UserAuthData, store: &Store) -> Result<bool, ApiError> {
   let course = match store::course::get_by_id(id, store) {
      Some(course) => course,
      None => return Err(ApiError::NotFound)
   };
   if user_auth_data.role != Role::Admin && user_auth_data.user_id != course.tutor_id {
      return Err(ApiError::Permission);
   }
   Ok(store::course::delete(id, store))
}
