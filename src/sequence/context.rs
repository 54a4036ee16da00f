//! Capture slots and per-attempt match contexts.

use std::fmt;

/// A named capture slot.
///
/// Slots are compared by name, so two `Slot::new("x")` values refer to the
/// same binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    name: &'static str,
}

impl Slot {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Slot bindings for one match attempt.
///
/// A binding records the *position* of an item in the matched sequence, so
/// two structurally equal instructions at different positions never satisfy
/// the same read. Contexts are values: binding returns a new context and
/// leaves the original untouched, which lets the matcher backtrack without
/// undoing writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    bindings: Vec<(Slot, usize)>,
}

impl Context {
    /// An empty context.
    pub fn start() -> Self {
        Self::default()
    }

    /// A copy of this context with `slot` bound to `position`.
    #[must_use]
    pub fn bind(&self, slot: Slot, position: usize) -> Self {
        let mut bindings: Vec<(Slot, usize)> = self
            .bindings
            .iter()
            .filter(|(bound, _)| *bound != slot)
            .copied()
            .collect();
        bindings.push((slot, position));
        Self { bindings }
    }

    /// Position bound to `slot`, if any.
    pub fn get(&self, slot: Slot) -> Option<usize> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == slot)
            .map(|(_, position)| *position)
    }

    pub fn is_bound(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
