//! Compiled pattern evaluation.

use super::context::Context;
use super::predicate::Match;
use super::query::Step;

/// A compiled pattern, reusable across any number of match attempts.
#[derive(Debug, Clone)]
pub struct SequenceMatcher<T> {
    steps: Vec<Step<T>>,
    ignores: Match<T>,
}

impl<T: 'static> SequenceMatcher<T> {
    pub(crate) fn new(steps: Vec<Step<T>>, ignores: Match<T>) -> Self {
        Self { steps, ignores }
    }

    /// True if some run of `items` satisfies the pattern, starting from
    /// the bindings in `context`.
    pub fn matches(&self, items: &[T], context: &Context) -> bool {
        self.find(items, context).is_some()
    }

    /// Like [`matches`](Self::matches), returning the context with every
    /// capture made by the successful attempt.
    pub fn find(&self, items: &[T], context: &Context) -> Option<Context> {
        let found = self
            .start_positions(items)
            .into_iter()
            .find_map(|start| self.match_from(&self.steps, items, start, context.clone()));

        tracing::trace!(
            steps = self.steps.len(),
            items = items.len(),
            matched = found.is_some(),
            "sequence match attempt"
        );
        found
    }

    fn start_positions(&self, items: &[T]) -> Vec<usize> {
        // A leading unbounded wildcard already scans every start.
        if self.begins_with_skip() {
            return vec![0];
        }
        std::iter::once(0)
            .chain((1..items.len()).filter(|&i| !self.ignores.test(&items[i])))
            .collect()
    }

    fn begins_with_skip(&self) -> bool {
        matches!(
            self.steps.first(),
            Some(Step::Repeat { test, min: 0, max: None }) if test.is_wildcard()
        )
    }

    /// First non-ignored position at or after `from`.
    fn next_real(&self, items: &[T], from: usize) -> Option<usize> {
        (from..items.len()).find(|&i| !self.ignores.test(&items[i]))
    }

    fn match_from(
        &self,
        steps: &[Step<T>],
        items: &[T],
        position: usize,
        context: Context,
    ) -> Option<Context> {
        let Some((step, rest)) = steps.split_first() else {
            return Some(context);
        };

        match step {
            Step::Repeat { test, min, max } => {
                // Shortest run first, then progressively longer ones.
                let mut cursor = position;
                let mut count = 0;
                loop {
                    if count >= *min {
                        if let Some(done) = self.match_from(rest, items, cursor, context.clone())
                        {
                            return Some(done);
                        }
                    }
                    if max.is_some_and(|max| count >= max) {
                        return None;
                    }
                    let index = self.next_real(items, cursor)?;
                    if !test.test(&items[index]) {
                        return None;
                    }
                    cursor = index + 1;
                    count += 1;
                }
            }
            Step::Match(test) => {
                let index = self.next_real(items, position)?;
                if !test.test(&items[index]) {
                    return None;
                }
                self.match_from(rest, items, index + 1, context)
            }
            Step::Capture { test, slot } => {
                let index = self.next_real(items, position)?;
                if !test.test(&items[index]) {
                    return None;
                }
                self.match_from(rest, items, index + 1, context.bind(*slot, index))
            }
            Step::SameAs(slot) => {
                let index = self.next_real(items, position)?;
                if context.get(*slot) != Some(index) {
                    return None;
                }
                self.match_from(rest, items, index + 1, context)
            }
        }
    }
}
