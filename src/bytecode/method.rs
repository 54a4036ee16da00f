//! Method bodies and the classes that own them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Instruction;
use crate::core::{Error, Result};

/// Identifies one method within one class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Internal class name, e.g. `com/example/Foo`.
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(rename = "method")]
    pub method_name: String,
    pub descriptor: String,
}

impl Location {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}{}",
            self.class_name, self.method_name, self.descriptor
        )
    }
}

/// The unmutated instruction list of a single method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodTree {
    pub location: Location,
    pub instructions: Vec<Instruction>,
}

impl MethodTree {
    pub fn new(location: Location, instructions: Vec<Instruction>) -> Self {
        Self {
            location,
            instructions,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Instruction at `index`.
    pub fn instruction(&self, index: usize) -> Result<&Instruction> {
        self.instructions
            .get(index)
            .ok_or_else(|| Error::InstructionOutOfRange {
                location: self.location.clone(),
                index,
                len: self.instructions.len(),
            })
    }

    /// Position of the nearest instruction before `index` that is not a
    /// label, line number or frame.
    pub fn real_index_before(&self, index: usize) -> Result<usize> {
        self.instruction(index)?;
        self.instructions[..index]
            .iter()
            .rposition(|insn| !insn.is_pseudo())
            .ok_or_else(|| Error::NoPrecedingInstruction {
                location: self.location.clone(),
                index,
            })
    }

    /// The nearest executable instruction before `index`.
    pub fn real_instruction_before(&self, index: usize) -> Result<&Instruction> {
        let position = self.real_index_before(index)?;
        Ok(&self.instructions[position])
    }
}

/// A class: the unit a batch of mutations is filtered against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTree {
    /// Internal class name.
    pub name: String,
    pub methods: Vec<MethodTree>,
}

impl ClassTree {
    pub fn new(name: impl Into<String>, methods: Vec<MethodTree>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    pub fn methods(&self) -> &[MethodTree] {
        &self.methods
    }
}
