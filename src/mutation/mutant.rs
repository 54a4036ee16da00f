//! Mutation candidates as handed over by the mutant generator.

use serde::{Deserialize, Serialize};

use super::ReturnMutator;
use crate::bytecode::Location;

/// A candidate mutation of one instruction in one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationDetails {
    /// Method containing the mutated instruction.
    pub location: Location,
    /// Globally unique id of the mutator that produced this candidate.
    pub mutator: String,
    /// Index of the mutated instruction in the method's instruction list.
    pub instruction_index: usize,
    /// Human-readable description of the mutation.
    #[serde(default)]
    pub description: String,
    /// Source line, when the generator knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl MutationDetails {
    pub fn new(
        location: Location,
        mutator: impl Into<String>,
        instruction_index: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            location,
            mutator: mutator.into(),
            instruction_index,
            description: description.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// The return-value mutator that produced this candidate, if it is one.
    pub fn return_mutator(&self) -> Option<ReturnMutator> {
        ReturnMutator::from_id(&self.mutator)
    }

    /// True if this candidate was produced by one of `mutators`.
    pub fn is_from(&self, mutators: &[ReturnMutator]) -> bool {
        self.return_mutator()
            .is_some_and(|mutator| mutators.contains(&mutator))
    }
}
