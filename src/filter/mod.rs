//! Mutation interceptors: filters applied to a class's mutation candidates
//! before any test runs.
//!
//! An interceptor visits one class at a time:
//!
//! 1. [`begin`](MutationInterceptor::begin) builds a [`UnitScope`] for the class,
//! 2. [`intercept`](MutationInterceptor::intercept) receives candidate batches
//!    and returns the candidates to keep,
//! 3. [`end`](MutationInterceptor::end) releases the scope.
//!
//! Interceptors never store the class themselves, so one instance can serve
//! many classes concurrently.

mod compound;
pub mod equivalent;
mod registry;
mod scope;

pub use compound::CompoundInterceptor;
pub use equivalent::{
    BoxedTrueReturnFilter, EmptyFactory, EmptyObjectReturnFilter, EquivalentReturnFilterFactory,
    NullReturnFilter, PrimitiveReturnFilter,
};
pub use registry::{
    default_registry, Feature, FeatureStatus, FeatureToggles, FilterRegistry, InterceptorFactory,
    InterceptorParams,
};
pub use scope::UnitScope;

use crate::bytecode::ClassTree;
use crate::core::Result;
use crate::mutation::{Mutater, MutationDetails};

/// What an interceptor does to the candidates it sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptorKind {
    /// Rewrites candidates.
    Modify,
    /// Removes candidates.
    Filter,
    /// Observes candidates without changing them.
    Report,
}

/// A stage in the mutation filtering pipeline.
pub trait MutationInterceptor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn kind(&self) -> InterceptorKind {
        InterceptorKind::Filter
    }

    /// Start visiting `unit`.
    fn begin<'a>(&self, unit: &'a ClassTree) -> UnitScope<'a> {
        UnitScope::new(unit)
    }

    /// Return the subset of `mutations` this interceptor keeps.
    ///
    /// Fails when a candidate cannot be resolved against the scope's class.
    fn intercept(
        &self,
        scope: &UnitScope<'_>,
        mutations: Vec<MutationDetails>,
        mutater: &dyn Mutater,
    ) -> Result<Vec<MutationDetails>>;

    /// Finish visiting the scope's class.
    fn end(&self, scope: UnitScope<'_>) {
        tracing::trace!(interceptor = self.name(), unit = %scope.unit().name, "end");
    }
}

/// Keep the candidates for which `is_equivalent` returns false.
///
/// Errors from `is_equivalent` abort the whole batch.
pub(crate) fn retain_non_equivalent<F>(
    filter: &'static str,
    mutations: Vec<MutationDetails>,
    mut is_equivalent: F,
) -> Result<Vec<MutationDetails>>
where
    F: FnMut(&MutationDetails) -> Result<bool>,
{
    let mut kept = Vec::with_capacity(mutations.len());
    for mutation in mutations {
        if is_equivalent(&mutation)? {
            tracing::debug!(
                filter,
                location = %mutation.location,
                mutator = %mutation.mutator,
                index = mutation.instruction_index,
                "filtered equivalent mutant"
            );
        } else {
            kept.push(mutation);
        }
    }
    Ok(kept)
}
