//! Single-item predicates used as pattern steps.

use std::fmt;
use std::sync::Arc;

/// A predicate over one item of the matched sequence.
///
/// Cheap to clone; the same predicate can appear in many patterns.
pub struct Match<T> {
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
    wildcard: bool,
}

impl<T> Clone for Match<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
            wildcard: self.wildcard,
        }
    }
}

impl<T> fmt::Debug for Match<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("wildcard", &self.wildcard)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Match<T> {
    pub fn new(test: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            test: Arc::new(test),
            wildcard: false,
        }
    }

    /// Matches every item.
    pub fn any() -> Self {
        Self {
            test: Arc::new(|_| true),
            wildcard: true,
        }
    }

    /// Matches no item.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn test(&self, item: &T) -> bool {
        (self.test)(item)
    }

    pub fn and(self, other: Match<T>) -> Self {
        Self::new(move |item| self.test(item) && other.test(item))
    }

    pub fn or(self, other: Match<T>) -> Self {
        let wildcard = self.wildcard || other.wildcard;
        Self {
            test: Arc::new(move |item| self.test(item) || other.test(item)),
            wildcard,
        }
    }

    pub fn negate(self) -> Self {
        Self::new(move |item| !self.test(item))
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

/// Shorthand for [`Match::any`].
pub fn any<T: 'static>() -> Match<T> {
    Match::any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinators() {
        let even = Match::new(|n: &i32| n % 2 == 0);
        let positive = Match::new(|n: &i32| *n > 0);

        let both = even.clone().and(positive.clone());
        assert!(both.test(&4));
        assert!(!both.test(&-4));
        assert!(!both.test(&3));

        let either = even.clone().or(positive);
        assert!(either.test(&-4));
        assert!(either.test(&3));
        assert!(!either.test(&-3));

        let odd = even.negate();
        assert!(odd.test(&3));
        assert!(!odd.test(&2));
    }

    #[test]
    fn test_wildcard_flag() {
        assert!(any::<i32>().is_wildcard());
        assert!(Match::<i32>::never().or(any()).is_wildcard());
        assert!(!Match::new(|_: &i32| true).is_wildcard());
        assert!(!any::<i32>().negate().is_wildcard());
    }
}
