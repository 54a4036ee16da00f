//! Zero returned from a primitive method.

use super::preceding;
use crate::bytecode::matchers::is_zero_constant;
use crate::core::Result;
use crate::filter::{retain_non_equivalent, MutationInterceptor, UnitScope};
use crate::mutation::{Mutater, MutationDetails, ReturnMutator};

const TARGETS: [ReturnMutator; 2] = [ReturnMutator::PrimitiveReturns, ReturnMutator::FalseReturns];

/// Removes zero and `false` return mutants of methods that already return
/// a zero constant.
///
/// `false` is the int constant `0` in bytecode, so both mutators share the
/// same check.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimitiveReturnFilter;

impl MutationInterceptor for PrimitiveReturnFilter {
    fn name(&self) -> &'static str {
        "primitive-returns"
    }

    fn intercept(
        &self,
        scope: &UnitScope<'_>,
        mutations: Vec<MutationDetails>,
        _mutater: &dyn Mutater,
    ) -> Result<Vec<MutationDetails>> {
        retain_non_equivalent(self.name(), mutations, |mutation| {
            if !mutation.is_from(&TARGETS) {
                return Ok(false);
            }
            Ok(is_zero_constant(preceding(scope, mutation)?))
        })
    }
}
