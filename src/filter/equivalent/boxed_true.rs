//! `true` returned from a boolean or `Boolean` method.

use std::sync::OnceLock;

use super::{boxed_return, idiom_ends_at, method_of};
use crate::bytecode::matchers::int_constant;
use crate::bytecode::{Instruction, MethodTree};
use crate::core::Result;
use crate::filter::{retain_non_equivalent, MutationInterceptor, UnitScope};
use crate::mutation::{Mutater, MutationDetails, ReturnMutator};
use crate::sequence::SequenceMatcher;

/// `1; Boolean.valueOf(..); <mutated return>`
fn boxed_true() -> &'static SequenceMatcher<Instruction> {
    static PATTERN: OnceLock<SequenceMatcher<Instruction>> = OnceLock::new();
    PATTERN.get_or_init(|| boxed_return(int_constant(1)))
}

/// Removes `true` return mutants of methods that already return `true`,
/// either as the primitive `1` or boxed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxedTrueReturnFilter;

impl BoxedTrueReturnFilter {
    fn is_equivalent(method: &MethodTree, index: usize) -> Result<bool> {
        let previous = method.real_instruction_before(index)?;
        if previous.as_constant().and_then(|c| c.as_int()) == Some(1) {
            return Ok(true);
        }
        idiom_ends_at(boxed_true(), method, index)
    }
}

impl MutationInterceptor for BoxedTrueReturnFilter {
    fn name(&self) -> &'static str {
        "true-returns"
    }

    fn intercept(
        &self,
        scope: &UnitScope<'_>,
        mutations: Vec<MutationDetails>,
        _mutater: &dyn Mutater,
    ) -> Result<Vec<MutationDetails>> {
        retain_non_equivalent(self.name(), mutations, |mutation| {
            if !mutation.is_from(&[ReturnMutator::TrueReturns]) {
                return Ok(false);
            }
            let method = method_of(scope, mutation)?;
            Self::is_equivalent(method, mutation.instruction_index)
        })
    }
}
