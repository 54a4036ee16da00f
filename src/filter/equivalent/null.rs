//! `null` returned from a reference method.

use super::preceding;
use crate::bytecode::matchers::is_null_constant;
use crate::core::Result;
use crate::filter::{retain_non_equivalent, MutationInterceptor, UnitScope};
use crate::mutation::{Mutater, MutationDetails, ReturnMutator};

/// Removes null return mutants of methods that already return `null`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReturnFilter;

impl MutationInterceptor for NullReturnFilter {
    fn name(&self) -> &'static str {
        "null-returns"
    }

    fn intercept(
        &self,
        scope: &UnitScope<'_>,
        mutations: Vec<MutationDetails>,
        _mutater: &dyn Mutater,
    ) -> Result<Vec<MutationDetails>> {
        retain_non_equivalent(self.name(), mutations, |mutation| {
            if !mutation.is_from(&[ReturnMutator::NullReturns]) {
                return Ok(false);
            }
            Ok(is_null_constant(preceding(scope, mutation)?))
        })
    }
}
