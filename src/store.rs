//! Auth Store
//!
//! Single source of truth for the session. All durable-storage reads and
//! writes for the session live here; no other module touches storage keys
//! directly. The API client only calls [`read_token`] and [`clear_session`].

use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use reactive_stores::Store;
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// User record as JSON.
pub const USER_KEY: &str = "user";
/// Combined snapshot read by the route guard.
pub const SNAPSHOT_KEY: &str = "auth-storage";

/// Session state. Anonymous is `user == None && token == None`;
/// `is_authenticated` is derived from `user`, so the two can never disagree.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
    }
}

#[derive(Serialize, Deserialize)]
struct AuthSnapshot {
    user: Option<User>,
    token: Option<String>,
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
}

pub type AuthStore = Store<AuthState>;

pub fn use_auth_store() -> AuthStore {
    expect_context::<AuthStore>()
}

/// Rebuild the session from durable storage on startup.
pub fn load_session() -> AuthState {
    AuthState {
        user: LocalStorage::get::<User>(USER_KEY).ok(),
        token: read_token(),
    }
}

/// Token for the Authorization header; `None` when anonymous.
pub fn read_token() -> Option<String> {
    LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten()
}

/// Remove every persisted session key. Called on logout and by the API
/// client's 401 interceptor.
pub fn clear_session() {
    LocalStorage::delete(TOKEN_KEY);
    LocalStorage::delete(USER_KEY);
    LocalStorage::delete(SNAPSHOT_KEY);
}

pub fn store_set_token(store: &AuthStore, token: Option<String>) {
    match &token {
        Some(t) => {
            let _ = LocalStorage::raw().set_item(TOKEN_KEY, t);
        }
        None => LocalStorage::delete(TOKEN_KEY),
    }
    store.write().set_token(token);
    persist_snapshot(&store.read());
}

pub fn store_set_user(store: &AuthStore, user: Option<User>) {
    match &user {
        Some(u) => {
            let _ = LocalStorage::set(USER_KEY, u);
        }
        None => LocalStorage::delete(USER_KEY),
    }
    store.write().set_user(user);
    persist_snapshot(&store.read());
}

/// Clear both in-memory state and storage in one step.
pub fn store_logout(store: &AuthStore) {
    clear_session();
    store.write().logout();
}

fn persist_snapshot(state: &AuthState) {
    let _ = LocalStorage::set(
        SNAPSHOT_KEY,
        &AuthSnapshot {
            user: state.user.clone(),
            token: state.token.clone(),
            is_authenticated: state.is_authenticated(),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: "u1".into(),
            email: format!("{name}@example.com"),
            name: name.into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn starts_anonymous() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.token, None);
    }

    #[test]
    fn is_authenticated_tracks_user_through_all_transitions() {
        let mut state = AuthState::default();

        state.set_token(Some("tok".into()));
        assert!(!state.is_authenticated());

        state.set_user(Some(user("arjun")));
        assert!(state.is_authenticated());

        state.set_token(None);
        assert!(state.is_authenticated());

        state.set_user(None);
        assert!(!state.is_authenticated());

        state.set_user(Some(user("priya")));
        state.logout();
        assert!(!state.is_authenticated());
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
    }

    #[test]
    fn logout_clears_both_fields_atomically() {
        let mut state = AuthState {
            user: Some(user("arjun")),
            token: Some("tok".into()),
        };
        state.logout();
        assert_eq!(state, AuthState::default());
    }
}
