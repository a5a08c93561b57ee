//! In-memory repository for user accounts.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::user::{
    domain::{Email, User, UserId, UserStatus, Username},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
///
/// Timestamps are stamped from the injected clock on insert and update.
/// Clones share the same underlying state.
pub struct InMemoryUserRepository<C> {
    state: Arc<RwLock<InMemoryUserState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryUserRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    email_index: HashMap<Email, UserId>,
}

impl<C: Clock + Send + Sync> InMemoryUserRepository<C> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryUserState::default())),
            clock,
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Rejects a username or email already held by a different user.
fn ensure_unique(state: &InMemoryUserState, user: &User) -> UserRepositoryResult<()> {
    if let Some(owner) = state.username_index.get(user.username())
        && *owner != user.id()
    {
        return Err(UserRepositoryError::DuplicateUsername(
            user.username().clone(),
        ));
    }
    if let Some(owner) = state.email_index.get(user.email())
        && *owner != user.id()
    {
        return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
    }
    Ok(())
}

fn index_user(state: &mut InMemoryUserState, user: &User) {
    state
        .username_index
        .insert(user.username().clone(), user.id());
    state.email_index.insert(user.email().clone(), user.id());
}

fn contains_ignore_case(haystack: Option<&str>, fragment: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&fragment.to_lowercase()))
}

fn collect_sorted<'a>(users: impl Iterator<Item = &'a User>) -> Vec<User> {
    let mut found: Vec<User> = users.cloned().collect();
    found.sort_by(|left, right| left.username().as_str().cmp(right.username().as_str()));
    found
}

#[async_trait]
impl<C: Clock + Send + Sync> UserRepository for InMemoryUserRepository<C> {
    async fn store(&self, user: &User) -> UserRepositoryResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        ensure_unique(&state, user)?;

        let mut stored = user.clone();
        stored.stamp_created(self.clock.utc());
        index_user(&mut state, &stored);
        state.users.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<User> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous = state
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .clone();
        if previous.version() != user.version() {
            return Err(UserRepositoryError::VersionConflict {
                id: user.id(),
                expected: previous.version(),
                found: user.version(),
            });
        }
        ensure_unique(&state, user)?;

        state.username_index.remove(previous.username());
        state.email_index.remove(previous.email());

        let mut stored = user.clone();
        if let Some(created_at) = previous.created_at() {
            stored.stamp_created(created_at);
        }
        stored.stamp_updated(self.clock.utc());
        index_user(&mut state, &stored);
        state.users.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(removed) = state.users.remove(&id) else {
            return Ok(false);
        };
        state.username_index.remove(removed.username());
        state.email_index.remove(removed.email());
        Ok(true)
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .username_index
            .get(username)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> UserRepositoryResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.username_index.contains_key(username))
    }

    async fn exists_by_email(&self, email: &Email) -> UserRepositoryResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.email_index.contains_key(email))
    }

    async fn find_by_status(&self, status: UserStatus) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(
            state.users.values().filter(|user| user.status() == status),
        ))
    }

    async fn search_by_username(&self, fragment: &str) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(state.users.values().filter(|user| {
            contains_ignore_case(Some(user.username().as_str()), fragment)
        })))
    }

    async fn search_by_first_name(&self, fragment: &str) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(state.users.values().filter(|user| {
            contains_ignore_case(user.first_name(), fragment)
        })))
    }

    async fn search_by_last_name(&self, fragment: &str) -> UserRepositoryResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_sorted(state.users.values().filter(|user| {
            contains_ignore_case(user.last_name(), fragment)
        })))
    }

    async fn count_by_status(&self, status: UserStatus) -> UserRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .users
            .values()
            .filter(|user| user.status() == status)
            .count())
    }
}
