use actix_web::{Responder, web, get, post, put, delete, HttpResponse, HttpRequest, HttpMessage};

use crate::dto::{CourseFilterQuery, NewCourseDto, UpdateCourseDto};
use crate::errors::ApiError;
use crate::service::{self, auth::UserAuthData};
use crate::store::{course::Filter, Store};

#[post("/create")]
pub async fn create(req: HttpRequest, new_course_dto: web::Json<NewCourseDto>, store: web::Data<Store>) -> impl Responder {
   let new_course = new_course_dto.into_inner();
   match req.extensions().get::<UserAuthData>() {
      Some(user_auth_data) => {
         let response_result = service::course::create(user_auth_data, new_course, store.get_ref())
            .await;
         match response_result {
            Ok(course) => HttpResponse::Created().json(course),
            Err(err) => HttpResponse::from_error(err)
         }
      },
      None => HttpResponse::from_error(ApiError::AuthError)
   }
}

#[put("/update/{id}")]
pub async fn update(
   id: web::Path<i64>,
   update_course_dto: web::Json<UpdateCourseDto>,
   req: HttpRequest,
   store: web::Data<Store>
) -> impl Responder {
   let course_fields = update_course_dto.into_inner();
   match req.extensions().get::<UserAuthData>() {
      Some(user_auth_data) => {
         let update_res = service::course::update(
            id.into_inner(),
            course_fields,
            user_auth_data,
            store.get_ref()
         ).await;
         match update_res {
            Ok(course) => HttpResponse::Ok().json(course),
            Err(err) => HttpResponse::from_error(err)
         }
      },
      None => HttpResponse::from_error(ApiError::AuthError)
   }
}

#[delete("/delete/{id}")]
pub async fn delete_course(id: web::Path<i64>, req: HttpRequest, store: web::Data<Store>) -> impl Responder {
   match req.extensions().get::<UserAuthData>() {
      Some(user_auth_data) => {
         let res = service::course::delete(id.into_inner(), user_auth_data, store.get_ref())
            .await;
         match res {
            Ok(_) => HttpResponse::Ok().json("course deleted"),
            Err(err) => HttpResponse::from_error(err)
         }
      },
      None => HttpResponse::from_error(ApiError::AuthError)
   }
}

#[get("/")]
pub async fn get_all(query: web::Query<CourseFilterQuery>, store: web::Data<Store>) -> impl Responder {
   let query = query.into_inner();
   let res = if let Some(subject) = query.subject {
      service::course::filter(Filter::Subject(subject), store.get_ref()).await
   } else if let Some(category) = query.category {
      service::course::filter(Filter::Category(category), store.get_ref()).await
   } else if let Some(tutor_id) = query.tutor_id {
      service::course::filter(Filter::Tutor(tutor_id), store.get_ref()).await
   } else {
      service::course::get_all(store.get_ref()).await
   };
   match res {
      Ok(courses) => HttpResponse::Ok().json(courses),
      Err(err) => HttpResponse::from_error(err)
   }
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
   let res = service::course::get_by_id(id.into_inner(), store.get_ref())
      .await;
   match res {
      Ok(course) => HttpResponse::Ok().json(course),
      Err(err) => HttpResponse::from_error(err)
   }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(create);
   cfg.service(update);
   cfg.service(delete_course);
   cfg.service(get_all);
   cfg.service(get_by_id);
}
