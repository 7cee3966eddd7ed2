//! # Enforcement Mode
//!
//! A single process-wide switch that turns type checks off. While it is
//! off, every check reports success unless the caller forces a strict
//! check ([`Strictness::Forced`](crate::check::Strictness::Forced)).
//!
//! ## Hazard
//!
//! The switch is shared by everything in the process. Toggling it affects
//! in-flight checks on other threads that read it afterwards; there is no
//! scoping or isolation. Prefer [`with_enforcement`] / [`EnforcementGuard`]
//! over manual save/restore, and prefer an explicit
//! [`Checker`](crate::check::Checker) when a component should not depend
//! on the global at all.

use std::sync::atomic::{AtomicBool, Ordering};

static ENFORCE: AtomicBool = AtomicBool::new(true);

/// Where a [`Checker`](crate::check::Checker) takes its enforcement setting from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnforcementMode {
    /// Read the process-wide switch on every check.
    #[default]
    Global,
    /// Always enforce.
    Enabled,
    /// Never enforce (forced checks still run).
    Disabled,
}

impl EnforcementMode {
    /// Resolve to a concrete on/off value.
    pub fn is_enforced(self) -> bool {
        match self {
            Self::Global => is_enforced(),
            Self::Enabled => true,
            Self::Disabled => false,
        }
    }
}

impl From<bool> for EnforcementMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Current value of the process-wide switch. Defaults to `true`.
pub fn is_enforced() -> bool {
    ENFORCE.load(Ordering::SeqCst)
}

/// Set the process-wide switch, returning the previous value.
pub fn set_enforced(enabled: bool) -> bool {
    let previous = ENFORCE.swap(enabled, Ordering::SeqCst);
    if previous != enabled {
        tracing::debug!(enabled, "type enforcement toggled");
    }
    previous
}

/// Restores the previous enforcement setting when dropped.
#[must_use = "enforcement is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct EnforcementGuard {
    previous: bool,
}

impl EnforcementGuard {
    /// Set the switch to `enabled` until the guard is dropped.
    pub fn set(enabled: bool) -> Self {
        Self {
            previous: set_enforced(enabled),
        }
    }

    /// The value that will be restored.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for EnforcementGuard {
    fn drop(&mut self) {
        set_enforced(self.previous);
    }
}

/// Run `f` with the switch set to `enabled`, restoring it afterwards
/// (also on panic).
pub fn with_enforcement<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    let _guard = EnforcementGuard::set(enabled);
    f()
}

/// Run `f` with enforcement switched on.
pub fn strictly<R>(f: impl FnOnce() -> R) -> R {
    with_enforcement(true, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global switch is exercised in tests/enforcement.rs, which runs in
    // its own process.

    #[test]
    fn explicit_modes_ignore_the_global() {
        assert!(EnforcementMode::Enabled.is_enforced());
        assert!(!EnforcementMode::Disabled.is_enforced());
    }

    #[test]
    fn mode_from_bool() {
        assert_eq!(EnforcementMode::from(true), EnforcementMode::Enabled);
        assert_eq!(EnforcementMode::from(false), EnforcementMode::Disabled);
        assert_eq!(EnforcementMode::default(), EnforcementMode::Global);
    }
}
