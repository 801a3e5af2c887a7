use crate::dto::UpdateUserDto;
use crate::models::{Role, User};
use crate::store::Store;

pub fn create(username: String, email: Option<String>, pwd_hash: String, role: Role, store: &Store) -> User {
    // fresh tutors wait for admin approval, everyone else starts approved
    let is_approved = role != Role::Tutor;
    store.users.write().unwrap().insert_with(|id| User {
        id,
        username,
        email,
        pwd_hash,
        role,
        is_approved,
        access_token: None,
        refresh_token: None,
    })
}

pub fn get_by_id(id: i64, store: &Store) -> Option<User> {
    store.users.read().unwrap().get(id)
}

pub fn get_all(store: &Store) -> Vec<User> {
    store.users.read().unwrap().all()
}

pub fn exists(username: &str, store: &Store) -> bool {
    store.users.read().unwrap().find(|u| u.username == username).is_some()
}

pub fn get_by_username(username: &str, store: &Store) -> Option<User> {
    store.users.read().unwrap().find(|u| u.username == username)
}

pub fn set_fields(id: i64, user_fields: UpdateUserDto, store: &Store) -> Option<User> {
    store.users.write().unwrap().patch(id, |user| {
        if let Some(v) = user_fields.pwd_hash {
            user.pwd_hash = v;
        }
        if let Some(v) = user_fields.email {
            user.email = Some(v);
        }
        if let Some(v) = user_fields.is_approved {
            user.is_approved = v;
        }
        if let Some(v) = user_fields.access_token {
            user.access_token = Some(v);
        }
        if let Some(v) = user_fields.refresh_token {
            user.refresh_token = Some(v);
        }
    })
}
