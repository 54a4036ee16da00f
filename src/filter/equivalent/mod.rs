//! Filters for trivially equivalent return-value mutants.
//!
//! A return mutator replaces the value a method returns with a fixed one:
//! zero, `false`, `true`, `null` or an "empty" object. When the method
//! already returns exactly that value, the mutant behaves identically to the
//! original and no test can kill it.
//!
//! Each filter here targets one family of return mutators and recognizes a
//! small set of instruction idioms that load the replacement value right
//! before the mutated return:
//!
//! | Filter                      | Mutators                             | Idioms                                     |
//! |-----------------------------|--------------------------------------|--------------------------------------------|
//! | [`PrimitiveReturnFilter`]   | `PRIMITIVE_RETURNS`, `FALSE_RETURNS` | `0`, `0L`, `0.0f`, `0.0`                   |
//! | [`NullReturnFilter`]        | `NULL_RETURNS`                       | `null`                                     |
//! | [`EmptyObjectReturnFilter`] | `EMPTY_RETURNS`, `FALSE_RETURNS`     | boxed zero, `""`, empty collection factory |
//! | [`BoxedTrueReturnFilter`]   | `TRUE_RETURNS`                       | `1`, `Boolean.valueOf(true)`               |
//!
//! Anything not recognized is kept. The filters never execute code.

mod boxed_true;
mod empty;
mod null;
mod primitive;

pub use boxed_true::BoxedTrueReturnFilter;
pub use empty::{EmptyFactory, EmptyObjectReturnFilter};
pub use null::NullReturnFilter;
pub use primitive::PrimitiveReturnFilter;

use super::registry::{Feature, InterceptorFactory, InterceptorParams};
use super::{CompoundInterceptor, MutationInterceptor, UnitScope};
use crate::bytecode::matchers::{any_instruction, boxing_call, not_an_instruction};
use crate::bytecode::{Instruction, MethodTree};
use crate::core::Result;
use crate::mutation::MutationDetails;
use crate::sequence::{Context, Match, QueryParams, SequenceMatcher, SequenceQuery, Slot};

/// Bound to the position of the mutated instruction before every match.
const MUTATED_INSTRUCTION: Slot = Slot::new("mutated_instruction");

/// Name of the feature that enables the return-value filters.
pub const FEATURE_NAME: &str = "FRETEQUIV";

/// Pattern for `<constant>; <wrapper>.valueOf(..); <mutated return>`.
fn boxed_return(constant: Match<Instruction>) -> SequenceMatcher<Instruction> {
    SequenceQuery::new()
        .zero_or_more(any_instruction())
        .then(constant)
        .then(boxing_call())
        .same_as(MUTATED_INSTRUCTION)
        .compile(
            QueryParams::new()
                .with_ignores(not_an_instruction())
                .with_seeded(MUTATED_INSTRUCTION),
        )
        .expect("valid boxed return pattern")
}

/// True if `matcher` matches a run of `method` that ends at `index`.
fn idiom_ends_at(
    matcher: &SequenceMatcher<Instruction>,
    method: &MethodTree,
    index: usize,
) -> Result<bool> {
    method.instruction(index)?;
    let context = Context::start().bind(MUTATED_INSTRUCTION, index);
    Ok(matcher.matches(method.instructions(), &context))
}

/// The method holding `mutation`, resolved against the scope's class.
fn method_of<'a>(scope: &UnitScope<'a>, mutation: &MutationDetails) -> Result<&'a MethodTree> {
    scope.method(&mutation.location)
}

/// The nearest executable instruction before the mutated one.
fn preceding<'a>(scope: &UnitScope<'a>, mutation: &MutationDetails) -> Result<&'a Instruction> {
    method_of(scope, mutation)?.real_instruction_before(mutation.instruction_index)
}

/// Provides [`FEATURE_NAME`]: all four return-value filters, chained.
#[derive(Debug, Default, Clone, Copy)]
pub struct EquivalentReturnFilterFactory;

impl InterceptorFactory for EquivalentReturnFilterFactory {
    fn description(&self) -> &'static str {
        "Trivially equivalent return value filter"
    }

    fn provides(&self) -> Feature {
        Feature::named(FEATURE_NAME)
            .with_on_by_default(true)
            .with_description(
                "Filters return mutants that replace a value with the value already returned",
            )
    }

    fn create_interceptor(&self, params: &InterceptorParams) -> Box<dyn MutationInterceptor> {
        Box::new(CompoundInterceptor::new(vec![
            Box::new(PrimitiveReturnFilter),
            Box::new(EmptyObjectReturnFilter::with_factories(
                params.empty_factories.clone(),
            )),
            Box::new(NullReturnFilter),
            Box::new(BoxedTrueReturnFilter),
        ]))
    }
}
