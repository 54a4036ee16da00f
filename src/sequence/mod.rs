//! Sequence matching over instruction lists.
//!
//! A pattern is built once with [`SequenceQuery`], compiled into a
//! [`SequenceMatcher`] and then evaluated against many sequences. Each
//! evaluation takes a [`Context`] seeded with known bindings, typically the
//! position of the mutated instruction, so a pattern can ask "does this
//! idiom end exactly here?".
//!
//! # Semantics
//!
//! - The search is unanchored: the pattern may match any contiguous run.
//! - Items matching the ignore predicate of [`QueryParams`] are skipped
//!   before every step, so labels and line markers never break a run.
//! - Repetitions try the shortest run first and grow it one item at a time
//!   until the rest of the pattern matches or the bound is reached.
//! - Captures bind the *position* of an item. [`SequenceQuery::same_as`]
//!   compares positions, never values.
//!
//! Compiling a pattern that reads a slot neither written by an earlier step
//! nor declared with [`QueryParams::with_seeded`] is an error.

mod context;
mod matcher;
mod predicate;
mod query;

pub use context::{Context, Slot};
pub use matcher::SequenceMatcher;
pub use predicate::{any, Match};
pub use query::{QueryParams, SequenceQuery};
