//! Users store: the administrator's user list.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::resource::Resource;
use crate::domain::ports::AdminApi;
use crate::domain::{DomainError, Role, User, UserId};

/// State for user administration.
pub struct UserStore {
    api: Arc<dyn AdminApi>,
    users: Resource<User>,
}

impl UserStore {
    /// Empty store backed by `api`.
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            users: Resource::default(),
        }
    }

    /// Users and their fetch state.
    pub fn users(&self) -> &Resource<User> {
        &self.users
    }

    /// Load every user, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_users(&mut self) -> Result<(), DomainError> {
        self.users.begin();
        match self.api.fetch_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                self.users.replace(users);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "fetching users failed");
                let error = err.into_store_error("Failed to fetch users");
                self.users.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Delete a user; the entry is removed once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn delete_user(&mut self, id: UserId) -> Result<(), DomainError> {
        self.users.begin();
        match self.api.delete_user(id).await {
            Ok(()) => {
                debug!(user_id = %id, "user deleted");
                self.users.settle();
                self.users.items_mut().retain(|user| user.id != id);
                Ok(())
            }
            Err(err) => {
                warn!(user_id = %id, error = %err, "deleting user failed");
                let error = err.into_store_error("Failed to delete user");
                self.users.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        self.users.clear_error();
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.users = Resource::default();
    }

    /// Listed users holding `role`.
    pub fn by_role(&self, role: Role) -> Vec<&User> {
        self.users.items().iter().filter(|user| user.role == role).collect()
    }

    /// Number of listed users per role; every role is present.
    pub fn count_by_role(&self) -> BTreeMap<Role, usize> {
        let mut counts: BTreeMap<Role, usize> = Role::ALL.into_iter().map(|role| (role, 0)).collect();
        for user in self.users.items() {
            *counts.entry(user.role).or_default() += 1;
        }
        counts
    }
}
