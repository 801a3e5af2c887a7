pub mod store;
pub mod handlers;
pub mod service;
pub mod models;
pub mod dto;
pub mod errors;

use std::env;
use std::sync::Arc;

use actix_web::{HttpServer, App, web};
use dotenv::dotenv;
use log::info;

use service::auth::AuthMiddleware;
use service::log::LoggerMiddleware;
use store::Store;

const ACCESS_TOKEN_EXP: usize = 60 * 60;
const REFRESH_TOKEN_EXP: usize = 5 * 24 * 60 * 60;

// the bootstrap admin is the first row of the user table
const ADMIN_USER_ID: i64 = 1;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    service::log::init_logger();

    let store = Arc::new(Store::new());
    service::user::bootstrap_admin(&store);

    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("starting server on {}", bind_addr);

    let app_store = store.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(app_store.clone()))
            .wrap(LoggerMiddleware)
            .service(
                web::scope("/auth")
                    .configure(handlers::auth::init_routes)
            )
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware {
                        store: app_store.clone()
                    })
                    .configure(handlers::user::init_routes)
            )
            .service(
                web::scope("/courses")
                    .wrap(AuthMiddleware {
                        store: app_store.clone()
                    })
                    .configure(handlers::course::init_routes)
                    .configure(handlers::review::init_routes)
            )
            .service(
                web::scope("/bookings")
                    .wrap(AuthMiddleware {
                        store: app_store.clone()
                    })
                    .configure(handlers::booking::init_routes)
            )
            .service(
                web::scope("/notifications")
                    .wrap(AuthMiddleware {
                        store: app_store.clone()
                    })
                    .configure(handlers::notification::init_routes)
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
