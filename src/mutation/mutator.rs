//! Mutator identifiers and the mutation-application handle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MutationDetails;
use crate::bytecode::MethodTree;

/// The return-value mutators whose output can be trivially equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnMutator {
    /// Replaces a primitive return value with its type's zero.
    PrimitiveReturns,
    /// Replaces a boolean return value with `false`.
    FalseReturns,
    /// Replaces a boolean return value with `true`.
    TrueReturns,
    /// Replaces an object return value with `null`.
    NullReturns,
    /// Replaces an object return value with an "empty" value of its type.
    EmptyReturns,
}

impl ReturnMutator {
    pub const ALL: [ReturnMutator; 5] = [
        Self::PrimitiveReturns,
        Self::FalseReturns,
        Self::TrueReturns,
        Self::NullReturns,
        Self::EmptyReturns,
    ];

    /// Stable id carried by [`MutationDetails::mutator`].
    pub fn id(self) -> &'static str {
        match self {
            Self::PrimitiveReturns => "PRIMITIVE_RETURNS",
            Self::FalseReturns => "FALSE_RETURNS",
            Self::TrueReturns => "TRUE_RETURNS",
            Self::NullReturns => "NULL_RETURNS",
            Self::EmptyReturns => "EMPTY_RETURNS",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

impl fmt::Display for ReturnMutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReturnMutator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown return mutator: {s}"))
    }
}

/// Applies mutations to produce mutated method bodies.
///
/// Filters receive this handle but decide equivalence from the unmutated
/// body alone.
pub trait Mutater: Send + Sync {
    /// The mutated body for `mutation`, if the engine can build it.
    fn mutate(&self, mutation: &MutationDetails) -> Option<MethodTree>;
}

/// A mutater for callers that only have the unmutated class at hand.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMutater;

impl Mutater for NoopMutater {
    fn mutate(&self, _mutation: &MutationDetails) -> Option<MethodTree> {
        None
    }
}
