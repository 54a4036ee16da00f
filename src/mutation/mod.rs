//! Mutation candidates and the mutators that produce them.
//!
//! Mutant generation itself happens elsewhere; this module only models what
//! the generator hands to the filters: a batch of [`MutationDetails`] per
//! class, each naming its mutator by id, and a [`Mutater`] handle.

mod mutant;
mod mutator;

pub use mutant::MutationDetails;
pub use mutator::{Mutater, NoopMutater, ReturnMutator};
