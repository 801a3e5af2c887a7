use actix_web::{Responder, web, get, put, HttpResponse, HttpRequest, HttpMessage};

use crate::dto::ApproveUserDto;
use crate::errors::ApiError;
use crate::service::{self, auth::UserAuthData};
use crate::store::Store;

#[get("/")]
pub async fn get_all(store: web::Data<Store>) -> impl Responder {
    let response = service::user::get_all(store.get_ref()).await;
    match response {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
    let response = service::user::get_by_id(id.into_inner(), store.get_ref()).await;
    match response {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[get("/{id}/bookings")]
pub async fn get_user_bookings(id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
    let response = service::user::get_user_bookings(id.into_inner(), store.get_ref()).await;
    match response {
        Ok(bookings) => HttpResponse::Ok().json(bookings),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[put("/{id}/approval")]
pub async fn set_approval(
    req: HttpRequest,
    id: web::Path<i64>,
    dto: web::Json<ApproveUserDto>,
    store: web::Data<Store>
) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::user::set_approval(
                id.into_inner(),
                dto.into_inner(),
                user_auth_data,
                store.get_ref()
            ).await;
            match response {
                Ok(user) => HttpResponse::Ok().json(user),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(set_approval);
    cfg.service(get_user_bookings);
    cfg.service(get_all);
    cfg.service(get_by_id);
}
