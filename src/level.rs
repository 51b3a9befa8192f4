//! Access Levels and Permission Gate
//!
//! Three client-selected tiers (guest / user / admin), a static permission
//! map, and the gate that persists the current selection.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::LevelStorage;

/// Client-selected privilege tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Guest,
    User,
    Admin,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 3] = [AccessLevel::Guest, AccessLevel::User, AccessLevel::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Guest => "guest",
            AccessLevel::User => "user",
            AccessLevel::Admin => "admin",
        }
    }

    /// Strict parse: only the exact lowercase tokens are accepted
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(AccessLevel::Guest),
            "user" => Some(AccessLevel::User),
            "admin" => Some(AccessLevel::Admin),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessLevel::Guest => "Guest",
            AccessLevel::User => "User",
            AccessLevel::Admin => "Admin",
        }
    }

    pub fn permissions(&self) -> &'static [Action] {
        match self {
            AccessLevel::Guest => &[Action::Read],
            AccessLevel::User => &[Action::Read, Action::Create, Action::Update, Action::Delete],
            AccessLevel::Admin => &[Action::Read, Action::Create, Action::Update, Action::Delete, Action::Debug],
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        self.permissions().contains(&action)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gated UI/repository action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Debug,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::Read, Action::Create, Action::Update, Action::Delete, Action::Debug];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Debug => "debug",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission check against an optional level; unset behaves as guest
pub fn level_allows(level: Option<AccessLevel>, action: Action) -> bool {
    level.unwrap_or(AccessLevel::Guest).allows(action)
}

/// Persisted level selection plus the single authorization predicate
pub struct LevelGate<S: LevelStorage> {
    storage: S,
    current: Cell<Option<AccessLevel>>,
}

impl<S: LevelStorage> LevelGate<S> {
    /// Restore the persisted level; an unknown stored value is treated as unset
    pub fn new(storage: S) -> Self {
        let current = storage.load().as_deref().and_then(AccessLevel::parse);
        Self {
            storage,
            current: Cell::new(current),
        }
    }

    pub fn set_level(&self, value: &str) -> bool {
        match AccessLevel::parse(value) {
            Some(level) => {
                self.storage.save(level.as_str());
                self.current.set(Some(level));
                tracing::info!(level = %level, "access level selected");
                true
            }
            None => {
                tracing::warn!(value, "rejected unknown access level");
                false
            }
        }
    }

    pub fn get_level(&self) -> Option<AccessLevel> {
        self.current.get()
    }

    /// Forget the persisted level. The caller reloads the page afterwards.
    pub fn clear_level(&self) {
        self.storage.clear();
        self.current.set(None);
    }

    pub fn can_perform(&self, action: Action) -> bool {
        level_allows(self.current.get(), action)
    }

    pub fn is_selected(&self) -> bool {
        self.current.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_permissions_are_monotonic() {
        let levels = AccessLevel::ALL;
        for (i, lower) in levels.iter().enumerate() {
            for higher in &levels[i..] {
                for action in Action::ALL {
                    if lower.allows(action) {
                        assert!(higher.allows(action), "{higher} lacks {action} granted to {lower}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_permission_map() {
        assert!(AccessLevel::Guest.allows(Action::Read));
        assert!(!AccessLevel::Guest.allows(Action::Create));
        assert!(AccessLevel::User.allows(Action::Delete));
        assert!(!AccessLevel::User.allows(Action::Debug));
        assert!(AccessLevel::Admin.allows(Action::Debug));
    }

    #[test]
    fn test_unset_level_defaults_to_guest() {
        let gate = LevelGate::new(MemoryStorage::default());
        assert_eq!(gate.get_level(), None);
        assert!(!gate.is_selected());
        assert!(gate.can_perform(Action::Read));
        assert!(!gate.can_perform(Action::Update));
    }

    #[test]
    fn test_set_level_persists() {
        let storage = MemoryStorage::default();
        let gate = LevelGate::new(storage.clone());
        assert!(gate.set_level("user"));
        assert_eq!(gate.get_level(), Some(AccessLevel::User));
        assert_eq!(storage.load().as_deref(), Some("user"));

        let restored = LevelGate::new(storage);
        assert_eq!(restored.get_level(), Some(AccessLevel::User));
    }

    #[test]
    fn test_set_level_rejects_unknown_values() {
        let gate = LevelGate::new(MemoryStorage::with_value("admin"));
        for bad in ["", "root", "Admin", " user", "superuser"] {
            assert!(!gate.set_level(bad));
            assert_eq!(gate.get_level(), Some(AccessLevel::Admin));
        }
    }

    #[test]
    fn test_clear_level_returns_to_unselected() {
        let storage = MemoryStorage::with_value("guest");
        let gate = LevelGate::new(storage.clone());
        assert!(gate.is_selected());
        gate.clear_level();
        assert!(!gate.is_selected());
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_corrupt_stored_level_is_unset() {
        let gate = LevelGate::new(MemoryStorage::with_value("owner"));
        assert_eq!(gate.get_level(), None);
    }
}
