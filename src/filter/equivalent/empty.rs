//! "Empty" values returned from reference methods.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::{boxed_return, idiom_ends_at, method_of};
use crate::bytecode::matchers::{is_empty_string_constant, zero_constant};
use crate::bytecode::{Instruction, MethodCall, MethodTree};
use crate::core::Result;
use crate::filter::{retain_non_equivalent, MutationInterceptor, UnitScope};
use crate::mutation::{Mutater, MutationDetails, ReturnMutator};
use crate::sequence::SequenceMatcher;

const TARGETS: [ReturnMutator; 2] = [ReturnMutator::EmptyReturns, ReturnMutator::FalseReturns];

/// A static method that returns an empty value when called without
/// arguments, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmptyFactory {
    /// Internal name of the declaring type.
    pub owner: String,
    pub name: String,
}

impl EmptyFactory {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Factories for the empty values the `EMPTY_RETURNS` mutator produces.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("java/util/Optional", "empty"),
            Self::new("java/util/Collections", "emptyList"),
            Self::new("java/util/Collections", "emptySet"),
            Self::new("java/util/List", "of"),
            Self::new("java/util/Set", "of"),
        ]
    }

    fn is_called_by(&self, call: &MethodCall) -> bool {
        call.owner == self.owner && call.name == self.name
    }
}

/// `<zero>; <wrapper>.valueOf(..); <mutated return>`
fn boxed_zero() -> &'static SequenceMatcher<Instruction> {
    static PATTERN: OnceLock<SequenceMatcher<Instruction>> = OnceLock::new();
    PATTERN.get_or_init(|| boxed_return(zero_constant()))
}

/// Removes empty-value and `false` return mutants of methods that already
/// return an empty value.
///
/// Recognized idioms, each identified by the instructions right before the
/// mutated return:
/// - a boxed zero (`Integer.valueOf(0)`, `Long.valueOf(0L)`, ...),
/// - the empty string `""`,
/// - a zero-argument call to one of the configured [`EmptyFactory`] methods.
#[derive(Debug, Clone)]
pub struct EmptyObjectReturnFilter {
    factories: Vec<EmptyFactory>,
}

impl Default for EmptyObjectReturnFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyObjectReturnFilter {
    /// Create a filter recognizing the default factories.
    pub fn new() -> Self {
        Self::with_factories(EmptyFactory::defaults())
    }

    pub fn with_factories(factories: Vec<EmptyFactory>) -> Self {
        Self { factories }
    }

    pub fn factories(&self) -> &[EmptyFactory] {
        &self.factories
    }

    /// True if `insn` calls a known factory without arguments.
    ///
    /// Calls whose descriptor does not parse are never recognized.
    pub fn is_empty_factory_call(&self, insn: &Instruction) -> bool {
        insn.as_call().is_some_and(|call| {
            self.factories.iter().any(|f| f.is_called_by(call))
                && call.arity().is_ok_and(|arity| arity == 0)
        })
    }

    fn is_equivalent(&self, method: &MethodTree, index: usize) -> Result<bool> {
        if idiom_ends_at(boxed_zero(), method, index)? {
            return Ok(true);
        }
        let previous = method.real_instruction_before(index)?;
        Ok(is_empty_string_constant(previous) || self.is_empty_factory_call(previous))
    }
}

impl MutationInterceptor for EmptyObjectReturnFilter {
    fn name(&self) -> &'static str {
        "empty-returns"
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
            let method = method_of(scope, mutation)?;
            self.is_equivalent(method, mutation.instruction_index)
        })
    }
}
