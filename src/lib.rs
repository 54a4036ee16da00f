//! retequiv - Trivially equivalent return-value mutant filter.
//!
//! Mutation testing tools replace method return values with fixed ones:
//! zero, `true`/`false`, `null`, or an empty object. When a method already
//! returns that value, the mutant cannot be killed by any test. This crate
//! recognizes those cases from the method's instructions alone and removes
//! the mutants before any test runs.
//!
//! The pieces:
//!
//! - [`sequence`]: a small pattern-matching engine over instruction lists,
//! - [`bytecode`]: the instruction model the patterns run on,
//! - [`filter`]: the interceptors and the feature registry (`FRETEQUIV`),
//! - [`core::Analyzer`]: batch filtering of JSON unit files.
//!
//! # Example
//!
//! ```
//! use retequiv::bytecode::{ClassTree, Instruction, Location, MethodTree, Opcode};
//! use retequiv::filter::{default_registry, FeatureToggles, InterceptorParams, MutationInterceptor};
//! use retequiv::mutation::{MutationDetails, NoopMutater};
//!
//! let location = Location::new("com/example/Foo", "count", "()I");
//! let class = ClassTree::new(
//!     "com/example/Foo",
//!     vec![MethodTree::new(
//!         location.clone(),
//!         vec![Instruction::int(0), Instruction::op(Opcode::IReturn)],
//!     )],
//! );
//! let mutations = vec![MutationDetails::new(location, "PRIMITIVE_RETURNS", 1, "")];
//!
//! let filter = default_registry()
//!     .create_enabled(&FeatureToggles::default(), &InterceptorParams::default());
//! let scope = filter.begin(&class);
//! let kept = filter.intercept(&scope, mutations, &NoopMutater).unwrap();
//! filter.end(scope);
//!
//! assert!(kept.is_empty());
//! ```

pub mod bytecode;
pub mod cli;
pub mod config;
pub mod core;
pub mod filter;
pub mod mutation;
pub mod output;
pub mod sequence;

pub use core::{Analyzer, Error, Result};
