//! Lifecycle invariants checked against recorded runs.
//!
//! A [`LifecycleSnapshot`] pairs the shared store with the platform effects
//! the [`crate::SimDriver`] has recorded. Each [`Invariant`] inspects one
//! snapshot and reports a [`Violation`] when the run broke a rule, such as a
//! second cold start or an untagged device token.
//!
//! ```ignore
//! let snapshot = LifecycleSnapshot::capture(&store, platform, driver.effects());
//! InvariantRegistry::standard().check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    DeviceTokenTagged, QueueOnlyWhileInitializing, SingleColdStart, VersionClearedBeforeRestart,
};
pub use snapshot::LifecycleSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// Rule over a single [`LifecycleSnapshot`].
pub trait Invariant {
    /// Stable name used in violation reports.
    fn name(&self) -> &'static str;

    /// Inspect `state`, returning a [`Violation`] if the rule is broken.
    fn check(&self, state: &LifecycleSnapshot) -> InvariantResult;
}

/// Ordered set of invariants run together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|inv| inv.name())).finish()
    }
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Registry with no invariants.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Registry holding every lifecycle rule the harness ships:
    /// [`SingleColdStart`], [`VersionClearedBeforeRestart`],
    /// [`DeviceTokenTagged`] and [`QueueOnlyWhileInitializing`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SingleColdStart);
        registry.add(VersionClearedBeforeRestart);
        registry.add(DeviceTokenTagged);
        registry.add(QueueOnlyWhileInitializing);
        registry
    }

    /// Register `invariant` after the existing ones.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every invariant and collect all violations.
    ///
    /// # Errors
    ///
    /// Returns the violations in registration order if any rule is broken.
    pub fn check_all(&self, state: &LifecycleSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Fail the current test if any invariant is broken, naming `context`.
    ///
    /// # Panics
    ///
    /// Panics with every violation listed.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, state: &LifecycleSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("lifecycle invariants broken {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Registered invariant count.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
