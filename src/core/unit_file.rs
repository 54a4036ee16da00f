//! Interchange format: one class and its mutation candidates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Error, Result};
use crate::bytecode::ClassTree;
use crate::mutation::MutationDetails;

/// A class with the candidates generated for it, as read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitFile {
    /// Path the unit was loaded from.
    #[serde(skip)]
    pub path: PathBuf,
    /// The unmutated class.
    pub class: ClassTree,
    /// Candidates to filter, in generation order.
    #[serde(default)]
    pub mutations: Vec<MutationDetails>,
}

impl UnitFile {
    /// Load a unit file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let mut unit = Self::from_json(&content)?;
        unit.path = path.to_path_buf();
        Ok(unit)
    }

    /// Parse a unit from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Create from an in-memory class.
    pub fn new(class: ClassTree, mutations: Vec<MutationDetails>) -> Self {
        Self {
            path: PathBuf::new(),
            class,
            mutations,
        }
    }
}
