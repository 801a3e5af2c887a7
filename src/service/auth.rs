use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform}, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::errors::ApiError;
use crate::models::Role;
use crate::store::{self, Store};

use self::jwt::TokenType;

pub struct UserAuthData {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

pub struct AuthMiddleware {
    pub store: Arc<Store>,
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
    where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            store: self.store.clone()
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    store: Arc<Store>
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
    where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.headers().get("Authorization").is_none() {
            // anonymous request, the handlers decide whether that is acceptable
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res)
            });
        }
        match jwt::validate(&req, TokenType::Access, "Bearer ") {
            Ok(claims) => {
                // the token subject must still exist in the store; role and
                // approval state are taken from the live record, not the claims
                match store::user::get_by_id(claims.user_id, &self.store) {
                    Some(user) => {
                        req.extensions_mut().insert(UserAuthData {
                            user_id: user.id,
                            username: user.username,
                            role: user.role,
                        });
                        let fut = self.service.call(req);
                        Box::pin(async move {
                            let res = fut.await?;
                            Ok(res)
                        })
                    },
                    None => Box::pin(async move {
                        Err(ApiError::AuthError.into())
                    })
                }
            },
            Err(err) => Box::pin(async move {
                Err(err.into())
            })
        }
    }
}


pub mod jwt {
    use std::env::{self, VarError};
    use actix_web::dev::ServiceRequest;
    use chrono::Utc;
    use dotenv::dotenv;
    use jsonwebtoken::{Header, Algorithm, EncodingKey, encode, decode, DecodingKey, Validation, TokenData};

    use crate::dto::{self, AuthTokensResponse, Claims, UpdateUserDto};
    use crate::errors::ApiError;
    use crate::models::Role;
    use crate::service::crypto;
    use crate::store::{self, Store};
    use crate::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};

    pub enum TokenType {
        Refresh,
        Access
    }

    pub fn get_secret(token_type: &TokenType) -> Result<String, VarError> {
        dotenv().ok();
        let env_key = match token_type {
            TokenType::Refresh => "JWT_REFRESH_TOKEN",
            TokenType::Access => "JWT_ACCESS_TOKEN"
        };
        env::var(env_key)
    }

    pub fn decode_claims(token_type: &TokenType, token: &str) -> Result<TokenData<Claims>, ApiError> {
        let secret = get_secret(token_type).map_err(|_| ApiError::Internal)?;
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked by validate() against the claim itself
        validation.validate_exp = false;
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| ApiError::DecodeError)
    }

    pub fn create(token_type: &TokenType, user_id: i64, username: &str, role: Role, exp: usize) -> Result<String, ApiError> {
        let exp_timestamp = Utc::now().timestamp() as usize + exp;
        let secret = get_secret(token_type).map_err(|_| ApiError::Internal)?;
        let header: Header = Header::new(Algorithm::HS256);
        let claims: Claims = Claims::new(user_id, username, role, exp_timestamp);
        let key: EncodingKey = EncodingKey::from_secret(secret.as_ref());
        encode(&header, &claims, &key).map_err(|_| ApiError::Internal)
    }

    /// checks the token attached to **`req`**</br>
    /// returns the decoded claims, **`ApiError::TokenExpired`** for a stale
    /// token or **`ApiError::DecodeError`** if the jwt decoding fails
    pub fn validate(req: &ServiceRequest, token_type: TokenType, prefix: &str) -> Result<Claims, ApiError> {
        let token = parse_request(req, prefix)?;
        let data = decode_claims(&token_type, &token)?;
        if (Utc::now().timestamp() as usize) < data.claims.exp {
            Ok(data.claims)
        } else {
            Err(ApiError::TokenExpired)
        }
    }

    pub fn parse_request(req: &ServiceRequest, prefix: &str) -> Result<String, ApiError> {
        if let Some(auth_header) = req.headers().get("Authorization") {
            if let Ok(auth_value) = auth_header.to_str() {
                if let Some(token) = auth_value.strip_prefix(prefix) {
                    return Ok(token.trim().to_string());
                }
            }
        }
        Err(ApiError::AuthError)
    }

    /// verifies the credentials, issues a fresh access/refresh token pair
    /// and stores both on the user record
    pub async fn login(store: &Store, req: dto::LoginUserRequest) -> Result<AuthTokensResponse, ApiError> {
        let user = match store::user::get_by_username(&req.username, store) {
            Some(user) => user,
            None => return Err(ApiError::AuthError)
        };
        if user.pwd_hash != crypto::get_sha3_256_hash(&req.pwd) {
            return Err(ApiError::AuthError);
        }
        let access_token = create(&TokenType::Access, user.id, &user.username, user.role, ACCESS_TOKEN_EXP)?;
        let refresh_token = create(&TokenType::Refresh, user.id, &user.username, user.role, REFRESH_TOKEN_EXP)?;
        let updated_user_fields = UpdateUserDto {
            pwd_hash: None,
            email: None,
            is_approved: None,
            access_token: Some(access_token.clone()),
            refresh_token: Some(refresh_token.clone()),
        };
        match store::user::set_fields(user.id, updated_user_fields, store) {
            Some(_) => Ok(AuthTokensResponse { access_token, refresh_token }),
            None => Err(ApiError::Internal)
        }
    }

    /// exchanges a valid refresh token for a new access token
    pub async fn refresh(token: String, store: &Store) -> Result<AuthTokensResponse, ApiError> {
        let data = decode_claims(&TokenType::Refresh, &token)?;
        if (Utc::now().timestamp() as usize) >= data.claims.exp {
            return Err(ApiError::TokenExpired);
        }
        let user = match store::user::get_by_id(data.claims.user_id, store) {
            Some(user) => user,
            None => return Err(ApiError::AuthError)
        };
        // the refresh token must be the one issued at login
        if user.refresh_token.as_deref() != Some(token.as_str()) {
            return Err(ApiError::AuthError);
        }
        let access_token = create(&TokenType::Access, user.id, &user.username, user.role, ACCESS_TOKEN_EXP)?;
        let updated_user_fields = UpdateUserDto {
            pwd_hash: None,
            email: None,
            is_approved: None,
            access_token: Some(access_token.clone()),
            refresh_token: None,
        };
        match store::user::set_fields(user.id, updated_user_fields, store) {
            Some(_) => Ok(AuthTokensResponse { access_token, refresh_token: token }),
            None => Err(ApiError::Internal)
        }
    }
}
