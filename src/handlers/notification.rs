use actix_web::{Responder, web, get, put, HttpResponse, HttpRequest, HttpMessage};

use crate::errors::ApiError;
use crate::service::{self, auth::UserAuthData};
use crate::store::Store;

#[get("/")]
pub async fn for_user(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::notification::for_user(user_auth_data, store.get_ref()).await;
            match response {
                Ok(notifications) => HttpResponse::Ok().json(notifications),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

#[put("/{id}/read")]
pub async fn mark_read(req: HttpRequest, id: web::Path<i64>, store: web::Data<Store>) -> impl Responder {
    match req.extensions().get::<UserAuthData>() {
        Some(user_auth_data) => {
            let response = service::notification::mark_read(
                id.into_inner(),
                user_auth_data,
                store.get_ref()
            ).await;
            match response {
                Ok(notification) => HttpResponse::Ok().json(notification),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(for_user);
    cfg.service(mark_read);
}
