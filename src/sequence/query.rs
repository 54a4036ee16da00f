//! Pattern builder and compilation.

use super::context::Slot;
use super::matcher::SequenceMatcher;
use super::predicate::Match;
use crate::core::{Error, Result};

/// One element of a compiled pattern.
#[derive(Debug, Clone)]
pub(crate) enum Step<T> {
    /// Consume one item satisfying the predicate.
    Match(Match<T>),
    /// Consume one item satisfying the predicate and bind its position.
    Capture { test: Match<T>, slot: Slot },
    /// Consume the item whose position is bound to the slot.
    SameAs(Slot),
    /// Consume between `min` and `max` items satisfying the predicate.
    Repeat {
        test: Match<T>,
        min: usize,
        max: Option<usize>,
    },
}

/// Settings applied to a pattern at compile time.
#[derive(Debug, Clone)]
pub struct QueryParams<T> {
    pub(crate) ignores: Match<T>,
    pub(crate) seeded: Vec<Slot>,
}

impl<T: 'static> Default for QueryParams<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> QueryParams<T> {
    pub fn new() -> Self {
        Self {
            ignores: Match::never(),
            seeded: Vec::new(),
        }
    }

    /// Items matching `ignores` are skipped transparently by every step.
    pub fn with_ignores(mut self, ignores: Match<T>) -> Self {
        self.ignores = ignores;
        self
    }

    /// Declare a slot the caller binds in the context before matching.
    pub fn with_seeded(mut self, slot: Slot) -> Self {
        self.seeded.push(slot);
        self
    }
}

/// Builder for a sequence pattern.
///
/// ```
/// use retequiv::sequence::{any, Context, Match, QueryParams, SequenceQuery, Slot};
///
/// const END: Slot = Slot::new("end");
///
/// let matcher = SequenceQuery::new()
///     .zero_or_more(any())
///     .then(Match::new(|n: &i32| *n == 0))
///     .same_as(END)
///     .compile(QueryParams::new().with_seeded(END))
///     .unwrap();
///
/// let items = [5, 0, 9];
/// assert!(matcher.matches(&items, &Context::start().bind(END, 2)));
/// assert!(!matcher.matches(&items, &Context::start().bind(END, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct SequenceQuery<T> {
    steps: Vec<Step<T>>,
}

impl<T: 'static> Default for SequenceQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SequenceQuery<T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Next item must satisfy `test`.
    pub fn then(mut self, test: Match<T>) -> Self {
        self.steps.push(Step::Match(test));
        self
    }

    /// Next item may be anything.
    pub fn then_any(self) -> Self {
        self.then(Match::any())
    }

    /// Next item must satisfy `test`; its position is bound to `slot`.
    pub fn capture(mut self, test: Match<T>, slot: Slot) -> Self {
        self.steps.push(Step::Capture { test, slot });
        self
    }

    /// Next item must be the very item bound to `slot`.
    pub fn same_as(mut self, slot: Slot) -> Self {
        self.steps.push(Step::SameAs(slot));
        self
    }

    pub fn zero_or_more(self, test: Match<T>) -> Self {
        self.repeat(test, 0, None)
    }

    pub fn one_or_more(self, test: Match<T>) -> Self {
        self.repeat(test, 1, None)
    }

    pub fn optional(self, test: Match<T>) -> Self {
        self.repeat(test, 0, Some(1))
    }

    /// Between `min` and `max` consecutive items satisfying `test`; `None`
    /// leaves the repetition unbounded.
    pub fn repeat(mut self, test: Match<T>, min: usize, max: Option<usize>) -> Self {
        self.steps.push(Step::Repeat { test, min, max });
        self
    }

    /// Validate the pattern and freeze it for repeated matching.
    pub fn compile(self, params: QueryParams<T>) -> Result<SequenceMatcher<T>> {
        if self.steps.is_empty() {
            return Err(Error::malformed_pattern("pattern has no steps"));
        }

        let mut written = params.seeded.clone();
        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Capture { slot, .. } => written.push(*slot),
                Step::SameAs(slot) if !written.contains(slot) => {
                    return Err(Error::malformed_pattern(format!(
                        "step {index} reads slot `{slot}` before it is written"
                    )));
                }
                Step::Repeat {
                    min,
                    max: Some(max),
                    ..
                } if min > max => {
                    return Err(Error::malformed_pattern(format!(
                        "step {index} repeats at least {min} but at most {max} times"
                    )));
                }
                _ => {}
            }
        }

        Ok(SequenceMatcher::new(self.steps, params.ignores))
    }
}
