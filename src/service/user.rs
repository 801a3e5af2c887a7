use std::env;

use log::info;

use crate::dto::{ApproveUserDto, NewUserDto, UpdateUserDto};
use crate::errors::ApiError;
use crate::models::{Booking, Role, User};
use crate::service::auth::UserAuthData;
use crate::service::crypto;
use crate::service::notification::{self, Fanout};
use crate::store::{self, Store};

pub async fn register(dto: NewUserDto, store: &Store) -> Result<User, ApiError> {
    let NewUserDto { username, email, pwd, pwd_confirm, role } = dto;
    if username.trim().is_empty() || pwd.is_empty() {
        return Err(ApiError::Validation);
    }
    if store::user::exists(&username, store) {
        return Err(ApiError::Validation);
    }
    let pwd_hash: String = crypto::get_sha3_256_hash(&pwd);
    let pwd_confirm_hash: String = crypto::get_sha3_256_hash(&pwd_confirm);
    if pwd_hash != pwd_confirm_hash {
        return Err(ApiError::Validation);
    }
    let user = store::user::create(username, email, pwd_hash, role, store);
    info!("registered user {} with role {:?}", user.id, user.role);
    Ok(user)
}

pub async fn get_all(store: &Store) -> Result<Vec<User>, ApiError> {
    Ok(store::user::get_all(store))
}

pub async fn get_by_id(id: i64, store: &Store) -> Result<User, ApiError> {
    match store::user::get_by_id(id, store) {
        Some(user) => Ok(user),
        None => Err(ApiError::NotFound)
    }
}

/// admin flips the approval flag, the tutor gets a notification
pub async fn set_approval(
    id: i64,
    dto: ApproveUserDto,
    user_auth_data: &UserAuthData,
    store: &Store,
) -> Result<User, ApiError> {
    if user_auth_data.role != Role::Admin {
        return Err(ApiError::Permission);
    }
    let updated_user_fields = UpdateUserDto {
        pwd_hash: None,
        email: None,
        is_approved: Some(dto.is_approved),
        access_token: None,
        refresh_token: None,
    };
    let user = match store::user::set_fields(id, updated_user_fields, store) {
        Some(user) => user,
        None => return Err(ApiError::NotFound)
    };
    if dto.is_approved {
        notification::dispatch(Fanout::TutorApproved { tutor_id: user.id }, store);
    }
    Ok(user)
}

// /users/{id}/bookings
pub async fn get_user_bookings(id: i64, store: &Store) -> Result<Vec<Booking>, ApiError> {
    if store::user::get_by_id(id, store).is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(store::booking::by_student(id, store))
}

/// the fixed account new-course notifications are routed to
pub fn bootstrap_admin(store: &Store) -> User {
    let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let pwd = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".to_string());
    let pwd_hash = crypto::get_sha3_256_hash(&pwd);
    let admin = store::user::create(username, None, pwd_hash, Role::Admin, store);
    info!("bootstrap admin user id: {}", admin.id);
    admin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user_dto(username: &str, role: Role) -> NewUserDto {
        NewUserDto {
            username: username.to_string(),
            email: None,
            pwd: "secret".to_string(),
            pwd_confirm: "secret".to_string(),
            role,
        }
    }

    #[actix_rt::test]
    async fn fresh_tutor_is_not_approved_until_admin_action() {
        let s = Store::new();
        let admin = bootstrap_admin(&s);
        let tutor = register(new_user_dto("tutor", Role::Tutor), &s).await.unwrap();
        assert!(!tutor.is_approved);
        let student = register(new_user_dto("student", Role::Student), &s).await.unwrap();
        assert!(student.is_approved);

        let auth = UserAuthData {
            user_id: admin.id,
            username: admin.username.clone(),
            role: Role::Admin,
        };
        let tutor = set_approval(tutor.id, ApproveUserDto { is_approved: true }, &auth, &s)
            .await
            .unwrap();
        assert!(tutor.is_approved);

        // the tutor was notified about the approval
        let notifications = store::notification::for_user(tutor.id, &s);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "approval");
    }

    #[actix_rt::test]
    async fn only_admins_may_flip_approval() {
        let s = Store::new();
        let tutor = register(new_user_dto("tutor", Role::Tutor), &s).await.unwrap();
        let student = register(new_user_dto("student", Role::Student), &s).await.unwrap();

        let auth = UserAuthData {
            user_id: student.id,
            username: student.username.clone(),
            role: Role::Student,
        };
        let res = set_approval(tutor.id, ApproveUserDto { is_approved: true }, &auth, &s).await;
        assert!(matches!(res, Err(ApiError::Permission)));
    }

    #[actix_rt::test]
    async fn duplicate_username_is_rejected() {
        let s = Store::new();
        register(new_user_dto("sam", Role::Student), &s).await.unwrap();
        let res = register(new_user_dto("sam", Role::Student), &s).await;
        assert!(matches!(res, Err(ApiError::Validation)));
    }

    #[actix_rt::test]
    async fn mismatched_password_confirmation_is_rejected() {
        let s = Store::new();
        let mut dto = new_user_dto("sam", Role::Student);
        dto.pwd_confirm = "other".to_string();
        let res = register(dto, &s).await;
        assert!(matches!(res, Err(ApiError::Validation)));
    }
}
