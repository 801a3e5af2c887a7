use actix_web::{Responder, web, get, post, put, HttpResponse, HttpRequest, HttpMessage};

use crate::dto::{BookingStatusDto, NewBookingDto};
use crate::errors::ApiError;
use crate::service::{self, auth::UserAuthData};
use crate::store::Store;

#[post("/create")]
pub async fn create(req: HttpRequest, new_booking_dto: web::Json<NewBookingDto>, store: web::Data<Store>) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::booking::create(
                user_auth_data,
                new_booking_dto.into_inner(),
                store.get_ref()
            ).await;
            match response {
                Ok(booking) => HttpResponse::Created().json(booking),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

// the student side of the ledger
#[get("/my")]
pub async fn for_student(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::booking::for_student(user_auth_data, store.get_ref()).await;
            match response {
                Ok(bookings) => HttpResponse::Ok().json(bookings),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

// bookings on the courses the authenticated tutor owns
#[get("/incoming")]
pub async fn for_tutor(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::booking::for_tutor(user_auth_data, store.get_ref()).await;
            match response {
                Ok(bookings) => HttpResponse::Ok().json(bookings),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
    let response = service::booking::get_by_id(id.into_inner(), store.get_ref()).await;
    match response {
        Ok(booking) => HttpResponse::Ok().json(booking),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[put("/{id}/status")]
pub async fn set_status(
    req: HttpRequest,
    id: web::Path<i64>,
    dto: web::Json<BookingStatusDto>,
    store: web::Data<Store>
) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::booking::set_status(
                id.into_inner(),
                dto.into_inner(),
                user_auth_data,
                store.get_ref()
            ).await;
            match response {
                Ok(booking) => HttpResponse::Ok().json(booking),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
    cfg.service(for_student);
    cfg.service(for_tutor);
    cfg.service(set_status);
    cfg.service(get_by_id);
}
