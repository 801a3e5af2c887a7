use actix_web::{Responder, web, get, post, HttpResponse, HttpRequest, HttpMessage};

use crate::dto::NewReviewDto;
use crate::errors::ApiError;
use crate::service::{self, auth::UserAuthData};
use crate::store::Store;

// POST /courses/{id}/review
#[post("/{id}/review")]
pub async fn create(
    req: HttpRequest,
    course_id: web::Path<i64>,
    dto: web::Json<NewReviewDto>,
    store: web::Data<Store>
) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::review::create(
                course_id.into_inner(),
                dto.into_inner(),
                user_auth_data,
                store.get_ref()
            ).await;
            match response {
                Ok(review) => HttpResponse::Created().json(review),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

// GET /courses/{id}/reviews
#[get("/{id}/reviews")]
pub async fn get_for_course(course_id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
    let response = service::review::for_course(course_id.into_inner(), store.get_ref()).await;
    match response {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(err) => HttpResponse::from_error(err)
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
    cfg.service(get_for_course);
}
