// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory user and item store.
//!
//! This is the identity collaborator of the auth core: it answers "does a
//! record with this identity exist" and "can it be created". It is shared
//! through [`AppState`](crate::state::AppState) behind a `RwLock`; nothing
//! in the credential path touches it.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{Item, ItemRequest, NewUser, UpdateUserRequest, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    UserNotFound,
    #[error("item not found")]
    ItemNotFound,
    #[error("username or email already exists")]
    DuplicateUser,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

#[derive(Default)]
pub struct InMemoryStore {
    users: BTreeMap<u64, UserRecord>,
    items: BTreeMap<u64, Item>,
    next_user_id: u64,
    next_item_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    pub fn user_exists(&self, user_id: u64) -> bool {
        self.users.contains_key(&user_id)
    }

    pub fn create_user(&mut self, new_user: NewUser) -> StoreResult<User> {
        let taken = self.users.values().any(|record| {
            record.user.username == new_user.username || record.user.email == new_user.email
        });
        if taken {
            return Err(StoreError::DuplicateUser);
        }

        self.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: self.next_user_id,
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: new_user.password_hash,
            },
        );
        Ok(user)
    }

    pub fn get_user(&self, user_id: u64) -> StoreResult<User> {
        self.users
            .get(&user_id)
            .map(|record| record.user.clone())
            .ok_or(StoreError::UserNotFound)
    }

    /// User and stored password hash for a login attempt.
    pub fn credentials_for(&self, username: &str) -> Option<(User, String)> {
        self.users
            .values()
            .find(|record| record.user.username == username)
            .map(|record| (record.user.clone(), record.password_hash.clone()))
    }

    pub fn list_users(&self, limit: usize, offset: usize) -> Vec<User> {
        self.users
            .values()
            .skip(offset)
            .take(limit)
            .map(|record| record.user.clone())
            .collect()
    }

    pub fn update_user(&mut self, user_id: u64, update: UpdateUserRequest) -> StoreResult<User> {
        if let Some(email) = &update.email {
            let taken = self
                .users
                .values()
                .any(|record| record.user.id != user_id && &record.user.email == email);
            if taken {
                return Err(StoreError::DuplicateUser);
            }
        }

        let record = self
            .users
            .get_mut(&user_id)
            .ok_or(StoreError::UserNotFound)?;
        let user = &mut record.user;
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub fn delete_user(&mut self, user_id: u64) -> StoreResult<()> {
        self.users
            .remove(&user_id)
            .map(|_| ())
            .ok_or(StoreError::UserNotFound)
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    pub fn list_items(&self, limit: usize, offset: usize) -> Vec<Item> {
        self.items.values().skip(offset).take(limit).cloned().collect()
    }

    pub fn get_item(&self, item_id: u64) -> StoreResult<Item> {
        self.items
            .get(&item_id)
            .cloned()
            .ok_or(StoreError::ItemNotFound)
    }

    pub fn create_item(&mut self, request: ItemRequest) -> Item {
        self.next_item_id += 1;
        let now = Utc::now();
        let item = Item {
            id: self.next_item_id,
            title: request.title,
            description: request.description,
            price: request.price,
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn update_item(&mut self, item_id: u64, request: ItemRequest) -> StoreResult<Item> {
        let item = self
            .items
            .get_mut(&item_id)
            .ok_or(StoreError::ItemNotFound)?;
        item.title = request.title;
        item.description = request.description;
        item.price = request.price;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    pub fn delete_item(&mut self, item_id: u64) -> StoreResult<()> {
        self.items
            .remove(&item_id)
            .map(|_| ())
            .ok_or(StoreError::ItemNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::user(),
        }
    }

    fn item(title: &str, price: f64) -> ItemRequest {
        ItemRequest {
            title: title.into(),
            description: String::new(),
            price,
        }
    }

    #[test]
    fn create_user_assigns_sequential_ids() {
        let mut store = InMemoryStore::new();
        let a = store.create_user(new_user("alice", "a@x.io")).unwrap();
        let b = store.create_user(new_user("bob", "b@x.io")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(store.user_exists(2));
        assert!(!store.user_exists(3));
    }

    #[test]
    fn duplicate_username_or_email_conflicts() {
        let mut store = InMemoryStore::new();
        store.create_user(new_user("alice", "a@x.io")).unwrap();
        assert_eq!(
            store.create_user(new_user("alice", "other@x.io")),
            Err(StoreError::DuplicateUser)
        );
        assert_eq!(
            store.create_user(new_user("other", "a@x.io")),
            Err(StoreError::DuplicateUser)
        );
    }

    #[test]
    fn credentials_for_returns_hash() {
        let mut store = InMemoryStore::new();
        store.create_user(new_user("alice", "a@x.io")).unwrap();
        let (user, hash) = store.credentials_for("alice").unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(hash, "hash");
        assert!(store.credentials_for("mallory").is_none());
    }

    #[test]
    fn update_user_changes_only_given_fields() {
        let mut store = InMemoryStore::new();
        let user = store.create_user(new_user("alice", "a@x.io")).unwrap();
        let updated = store
            .update_user(
                user.id,
                UpdateUserRequest {
                    role: Some(Role::admin()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.role, Role::admin());
        assert_eq!(updated.email, "a@x.io");
    }

    #[test]
    fn update_user_rejects_taken_email() {
        let mut store = InMemoryStore::new();
        store.create_user(new_user("alice", "a@x.io")).unwrap();
        let bob = store.create_user(new_user("bob", "b@x.io")).unwrap();
        let result = store.update_user(
            bob.id,
            UpdateUserRequest {
                email: Some("a@x.io".into()),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(StoreError::DuplicateUser));
    }

    #[test]
    fn list_users_pages() {
        let mut store = InMemoryStore::new();
        for i in 0..5 {
            store
                .create_user(new_user(&format!("u{i}"), &format!("u{i}@x.io")))
                .unwrap();
        }
        let page: Vec<u64> = store.list_users(2, 1).iter().map(|u| u.id).collect();
        assert_eq!(page, vec![2, 3]);
    }

    #[test]
    fn item_lifecycle() {
        let mut store = InMemoryStore::new();
        let created = store.create_item(item("Lamp", 19.99));
        assert_eq!(store.get_item(created.id).unwrap().title, "Lamp");

        let updated = store.update_item(created.id, item("Desk lamp", 24.5)).unwrap();
        assert_eq!(updated.title, "Desk lamp");
        assert_eq!(updated.created_at, created.created_at);

        store.delete_item(created.id).unwrap();
        assert_eq!(store.get_item(created.id), Err(StoreError::ItemNotFound));
        assert_eq!(store.delete_item(created.id), Err(StoreError::ItemNotFound));
    }

    #[test]
    fn delete_missing_user_is_not_found() {
        let mut store = InMemoryStore::new();
        assert_eq!(store.delete_user(9), Err(StoreError::UserNotFound));
    }
}
