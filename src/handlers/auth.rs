use actix_web::{Responder, web, post, HttpResponse, HttpRequest};
use log::{error, info};

use crate::dto::{LoginUserRequest, NewUserDto};
use crate::errors::ApiError;
use crate::service;
use crate::store::Store;

#[post("/register")]
pub async fn register(dto: web::Json<NewUserDto>, store: web::Data<Store>) -> impl Responder {
    let response = service::user::register(dto.into_inner(), store.get_ref()).await;
    match response {
        Ok(user) => {
            info!("RESPONSE /AUTH/REGISTER: user {}", user.id);
            HttpResponse::Created().json(user)
        },
        Err(err) => {
            error!("[{:} : {:}] REGISTER FAILED: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

#[post("/login")]
pub async fn login(dto: web::Json<LoginUserRequest>, store: web::Data<Store>) -> impl Responder {
    let response = service::auth::jwt::login(store.get_ref(), dto.into_inner()).await;
    match response {
        Ok(tokens) => HttpResponse::Ok().json(tokens),
        Err(err) => {
            error!("[{:} : {:}] LOGIN FAILED: {:?}", file!(), line!(), err);
            HttpResponse::from_error(err)
        }
    }
}

#[post("/refresh")]
pub async fn refresh(req: HttpRequest, store: web::Data<Store>) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);
    match token {
        Some(token) => {
            let response = service::auth::jwt::refresh(token.to_string(), store.get_ref()).await;
            match response {
                Ok(tokens) => HttpResponse::Ok().json(tokens),
                Err(err) => HttpResponse::from_error(err)
            }
        },
        None => HttpResponse::from_error(ApiError::AuthError)
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register);
    cfg.service(login);
    cfg.service(refresh);
}
