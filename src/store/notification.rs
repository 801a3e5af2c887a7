use chrono::Utc;

use crate::models::Notification;
use crate::store::Store;

pub fn create(user_id: i64, kind: &str, message: String, related_id: Option<i64>, store: &Store) -> Notification {
    store.notifications.write().unwrap().insert_with(|id| Notification {
        id,
        user_id,
        message,
        kind: kind.to_string(),
        related_id,
        is_read: false,
        created_at: Utc::now(),
    })
}

pub fn get_by_id(id: i64, store: &Store) -> Option<Notification> {
    store.notifications.read().unwrap().get(id)
}

/// newest first
pub fn for_user(user_id: i64, store: &Store) -> Vec<Notification> {
    let mut rows = store
        .notifications
        .read()
        .unwrap()
        .filter(|n| n.user_id == user_id);
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows
}

pub fn mark_read(id: i64, store: &Store) -> Option<Notification> {
    store.notifications.write().unwrap().patch(id, |notification| {
        notification.is_read = true;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_user_is_sorted_newest_first() {
        let s = Store::new();
        create(7, "booking", "first".to_string(), None, &s);
        create(7, "booking", "second".to_string(), None, &s);
        create(8, "booking", "other user".to_string(), None, &s);

        let rows = for_user(7, &s);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].message, "second");
        assert_eq!(rows[1].message, "first");
    }

    #[test]
    fn mark_read_flips_the_flag() {
        let s = Store::new();
        let n = create(7, "approval", "approved".to_string(), None, &s);
        assert!(!n.is_read);
        let n = mark_read(n.id, &s).unwrap();
        assert!(n.is_read);
        assert!(mark_read(999, &s).is_none());
    }
}
