// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use checkin_report_persistence::{
    LOGGED_IN_KEY, MemorySessionStore, PersistenceError, SessionStore, StoredUser,
    USER_PROFILE_KEY,
};

use crate::{ApiError, DEFAULT_DISPLAY_NAME, SessionContext};

/// Accepts single writes but fails every grouped write.
#[derive(Debug, Default)]
struct GroupedWriteFails {
    inner: MemorySessionStore,
}

impl SessionStore for GroupedWriteFails {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.inner.set(key, value)
    }

    fn set_many(&mut self, _entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        Err(PersistenceError::Io(String::from("disk full")))
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.inner.remove(key)
    }
}

fn ana() -> StoredUser {
    StoredUser {
        name: String::from("Ana Ruiz"),
        email: String::from("ana@example.com"),
    }
}

#[test]
fn test_restore_empty_store() {
    let session: SessionContext<MemorySessionStore> =
        SessionContext::restore(MemorySessionStore::new()).unwrap();

    assert!(!session.is_logged_in());
    assert_eq!(session.user(), None);
    assert_eq!(session.display_name(), DEFAULT_DISPLAY_NAME);
}

#[test]
fn test_login_writes_flag_and_profile() {
    let mut session: SessionContext<MemorySessionStore> =
        SessionContext::restore(MemorySessionStore::new()).unwrap();

    session.login(ana()).unwrap();

    assert!(session.is_logged_in());
    assert_eq!(session.display_name(), "Ana Ruiz");
    assert_eq!(
        session.store().get(LOGGED_IN_KEY).unwrap().as_deref(),
        Some("true")
    );
    let stored: serde_json::Value =
        serde_json::from_str(&session.store().get(USER_PROFILE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        stored,
        serde_json::json!({"name": "Ana Ruiz", "email": "ana@example.com"})
    );
}

#[test]
fn test_restore_reads_previous_login() {
    let mut first: SessionContext<MemorySessionStore> =
        SessionContext::restore(MemorySessionStore::new()).unwrap();
    first.login(ana()).unwrap();
    let store: MemorySessionStore = first.store().clone();

    let restored: SessionContext<MemorySessionStore> = SessionContext::restore(store).unwrap();

    assert!(restored.is_logged_in());
    assert_eq!(restored.user(), Some(&ana()));
}

#[test]
fn test_logout_clears_both_keys() {
    let mut session: SessionContext<MemorySessionStore> =
        SessionContext::restore(MemorySessionStore::new()).unwrap();
    session.login(ana()).unwrap();

    session.logout().unwrap();

    assert!(!session.is_logged_in());
    assert_eq!(session.display_name(), DEFAULT_DISPLAY_NAME);
    assert!(session.store().is_empty());
}

#[test]
fn test_corrupt_profile_is_removed() {
    let mut store: MemorySessionStore = MemorySessionStore::new();
    store.set(LOGGED_IN_KEY, "true").unwrap();
    store.set(USER_PROFILE_KEY, "{oops").unwrap();

    let session: SessionContext<MemorySessionStore> = SessionContext::restore(store).unwrap();

    assert!(session.is_logged_in());
    assert_eq!(session.user(), None);
    assert_eq!(session.store().get(USER_PROFILE_KEY).unwrap(), None);
}

#[test]
fn test_profile_with_mistyped_fields() {
    let mut store: MemorySessionStore = MemorySessionStore::new();
    store
        .set(USER_PROFILE_KEY, r#"{"name": 42, "email": "ana@example.com"}"#)
        .unwrap();

    let session: SessionContext<MemorySessionStore> = SessionContext::restore(store).unwrap();

    assert_eq!(
        session.user(),
        Some(&StoredUser {
            name: String::new(),
            email: String::from("ana@example.com"),
        })
    );
    assert_eq!(session.display_name(), DEFAULT_DISPLAY_NAME);
    assert!(!session.is_logged_in());
}

#[test]
fn test_flag_other_than_true_is_logged_out() {
    let mut store: MemorySessionStore = MemorySessionStore::new();
    store.set(LOGGED_IN_KEY, "yes").unwrap();

    let session: SessionContext<MemorySessionStore> = SessionContext::restore(store).unwrap();

    assert!(!session.is_logged_in());
}

#[test]
fn test_failed_login_write_leaves_session_logged_out() {
    let mut session: SessionContext<GroupedWriteFails> =
        SessionContext::restore(GroupedWriteFails::default()).unwrap();

    let result: Result<(), ApiError> = session.login(ana());

    assert!(matches!(result, Err(ApiError::Session(_))));
    assert!(!session.is_logged_in());
    assert_eq!(session.user(), None);
    assert_eq!(session.store().get(LOGGED_IN_KEY).unwrap(), None);
    assert_eq!(session.store().get(USER_PROFILE_KEY).unwrap(), None);
}
