use crate::errors::SidebarError;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub const SIDEBAR_COOKIE_NAME: &str = "sidebar_state";
pub const SIDEBAR_COOKIE_PATH: &str = "/";
/// One week, in seconds.
pub const SIDEBAR_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 7;

/// A single key/value write, shaped like a cookie assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age: u64,
}

impl PreferenceCookie {
    pub fn sidebar_state(open: bool) -> Self {
        Self {
            name: SIDEBAR_COOKIE_NAME.to_string(),
            value: open.to_string(),
            path: SIDEBAR_COOKIE_PATH.to_string(),
            max_age: SIDEBAR_COOKIE_MAX_AGE,
        }
    }

    /// `Some(bool)` when the value is exactly `"true"` or `"false"`.
    pub fn as_bool(&self) -> Option<bool> {
        self.value.parse().ok()
    }
}

impl fmt::Display for PreferenceCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; path={}; max-age={}",
            self.name, self.value, self.path, self.max_age
        )
    }
}

/// Write side of the preference shim. Reading the value back at session
/// start belongs to the host.
pub trait PreferenceStore {
    fn write(&mut self, cookie: &PreferenceCookie) -> Result<(), SidebarError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl PreferenceStore for NoopStore {
    fn write(&mut self, _cookie: &PreferenceCookie) -> Result<(), SidebarError> {
        Ok(())
    }
}

/// Records every write. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    writes: Rc<RefCell<Vec<PreferenceCookie>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<PreferenceCookie> {
        self.writes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.borrow().is_empty()
    }

    pub fn last(&self) -> Option<PreferenceCookie> {
        self.writes.borrow().last().cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn write(&mut self, cookie: &PreferenceCookie) -> Result<(), SidebarError> {
        self.writes.borrow_mut().push(cookie.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_formats_like_document_cookie() {
        let cookie = PreferenceCookie::sidebar_state(false);
        assert_eq!(
            cookie.to_string(),
            "sidebar_state=false; path=/; max-age=604800"
        );
        assert_eq!(cookie.as_bool(), Some(false));
    }

    #[test]
    fn memory_store_clones_share_log() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer
            .write(&PreferenceCookie::sidebar_state(true))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.last().and_then(|c| c.as_bool()), Some(true));
    }
}
