//! Mirrors OS foreground/background transitions into shared state.

use lifeline_core::{ActivityState, AppStore};

/// Writes the OS activity state through to the store.
#[derive(Debug, Clone)]
pub struct AppActivityObserver {
    store: AppStore,
}

impl AppActivityObserver {
    /// Create the observer and seed the store with the current OS state.
    pub fn new(store: AppStore, current: &ActivityState) -> Self {
        let observer = Self { store };
        observer.on_change(current);
        observer
    }

    /// Record a transition. Active iff the state is `"active"`.
    pub fn on_change(&self, state: &ActivityState) {
        let active = state.is_active();
        tracing::debug!(state = %state, active, "app activity changed");
        self.store.set_active(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_from_current_state() {
        let store = AppStore::default();
        let _observer = AppActivityObserver::new(store.clone(), &ActivityState::Active);
        assert!(store.is_active());
    }

    #[test]
    fn follows_transitions() {
        let store = AppStore::default();
        let observer = AppActivityObserver::new(store.clone(), &ActivityState::Background);
        assert!(!store.is_active());

        observer.on_change(&ActivityState::Active);
        assert!(store.is_active());

        observer.on_change(&ActivityState::Inactive);
        assert!(!store.is_active());
    }
}
