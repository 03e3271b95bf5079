//! Page State Store
//!
//! Uses Leptos reactive_stores for the little state widgets share: who is
//! looking at the page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::AuthState;

#[derive(Clone, Debug, Default, Store)]
pub struct PageState {
    /// `None` until `/login` has answered
    pub auth: Option<AuthState>,
    /// Set when the login check itself failed
    pub auth_error: Option<String>,
}

/// Type alias for the store
pub type PageStore = Store<PageState>;

/// Get the page store from context
pub fn use_page_store() -> PageStore {
    expect_context::<PageStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_set_auth(store: &PageStore, auth: AuthState) {
    store.auth().set(Some(auth));
    store.auth_error().set(None);
}

pub fn store_set_auth_error(store: &PageStore, message: String) {
    store.auth_error().set(Some(message));
}

/// Tracked read of the viewer's login state; `false` until known
pub fn viewer_logged_in(store: &PageStore) -> bool {
    store.auth().with(|a| a.as_ref().map(|a| a.is_logged_in).unwrap_or(false))
}

/// Tracked read of the whole auth state
pub fn auth_state(store: &PageStore) -> Option<AuthState> {
    store.auth().get()
}

pub fn auth_error(store: &PageStore) -> Option<String> {
    store.auth_error().get()
}
