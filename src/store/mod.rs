pub mod user;
pub mod course;
pub mod booking;
pub mod review;
pub mod notification;

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::models::{Booking, Course, Notification, Review, User};

/// One table per entity kind: rows keyed by the surrogate id plus the
/// counter the next id is taken from. Ids are monotonic and never
/// reused while the process lives, so key order is insertion order.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn insert_with<F>(&mut self, build: F) -> T
    where
        F: FnOnce(i64) -> T,
    {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// snapshot copy, later mutation of the table is not visible
    /// through the returned vector
    pub fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn filter<P>(&self, pred: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }

    pub fn find<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.values().find(|row| pred(row)).cloned()
    }

    pub fn patch<F>(&mut self, id: i64, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        match self.rows.get_mut(&id) {
            Some(row) => {
                apply(row);
                Some(row.clone())
            }
            None => None,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn remove_where<P>(&mut self, pred: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let ids: Vec<i64> = self
            .rows
            .iter()
            .filter(|(_, row)| pred(row))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.rows.remove(id);
        }
        ids.len()
    }
}

/// The single source of truth for entity state during the process
/// lifetime. Constructed once in `main` and injected into handlers and
/// middleware, a fresh instance per test.
pub struct Store {
    pub users: RwLock<Table<User>>,
    pub courses: RwLock<Table<Course>>,
    pub bookings: RwLock<Table<Booking>>,
    pub reviews: RwLock<Table<Review>>,
    pub notifications: RwLock<Table<Notification>>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            users: RwLock::new(Table::new()),
            courses: RwLock::new(Table::new()),
            bookings: RwLock::new(Table::new()),
            reviews: RwLock::new(Table::new()),
            notifications: RwLock::new(Table::new()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store;

    #[test]
    fn assigned_ids_are_monotonic_and_unique() {
        let s = Store::new();
        let a = store::user::create("a".to_string(), None, "h".to_string(), Role::Student, &s);
        let b = store::user::create("b".to_string(), None, "h".to_string(), Role::Student, &s);
        let c = store::user::create("c".to_string(), None, "h".to_string(), Role::Tutor, &s);
        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn get_all_returns_a_snapshot() {
        let s = Store::new();
        store::user::create("a".to_string(), None, "h".to_string(), Role::Student, &s);
        let before = store::user::get_all(&s);
        store::user::create("b".to_string(), None, "h".to_string(), Role::Student, &s);
        assert_eq!(before.len(), 1);
        assert_eq!(store::user::get_all(&s).len(), 2);
    }

    #[test]
    fn get_all_preserves_insertion_order() {
        let s = Store::new();
        for name in ["a", "b", "c"] {
            store::user::create(name.to_string(), None, "h".to_string(), Role::Student, &s);
        }
        let names: Vec<String> = store::user::get_all(&s)
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
