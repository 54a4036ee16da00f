//! JVM method descriptor parsing.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::core::{Error, Result};

/// A field type as it appears in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    /// Reference type by internal name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => f.write_str("B"),
            Self::Char => f.write_str("C"),
            Self::Double => f.write_str("D"),
            Self::Float => f.write_str("F"),
            Self::Int => f.write_str("I"),
            Self::Long => f.write_str("J"),
            Self::Short => f.write_str("S"),
            Self::Boolean => f.write_str("Z"),
            Self::Object(name) => write!(f, "L{name};"),
            Self::Array(inner) => write!(f, "[{inner}"),
        }
    }
}

/// Parsed form of a descriptor such as `(I[Ljava/lang/String;)V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub arguments: Vec<FieldType>,
    /// `None` for `void`.
    pub returns: Option<FieldType>,
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let mut chars = descriptor.chars().peekable();
        if chars.next() != Some('(') {
            return Err(Error::invalid_descriptor(format!(
                "{descriptor}: expected '('"
            )));
        }

        let mut arguments = Vec::new();
        loop {
            match chars.peek() {
                Some(')') => {
                    chars.next();
                    break;
                }
                Some(_) => arguments.push(parse_field_type(&mut chars, descriptor)?),
                None => {
                    return Err(Error::invalid_descriptor(format!(
                        "{descriptor}: unterminated argument list"
                    )))
                }
            }
        }

        let returns = if chars.peek() == Some(&'V') {
            chars.next();
            None
        } else {
            Some(parse_field_type(&mut chars, descriptor)?)
        };

        if chars.next().is_some() {
            return Err(Error::invalid_descriptor(format!(
                "{descriptor}: trailing characters after return type"
            )));
        }

        Ok(Self { arguments, returns })
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for arg in &self.arguments {
            write!(f, "{arg}")?;
        }
        f.write_str(")")?;
        match &self.returns {
            Some(ty) => write!(f, "{ty}"),
            None => f.write_str("V"),
        }
    }
}

fn parse_field_type(chars: &mut Peekable<Chars<'_>>, descriptor: &str) -> Result<FieldType> {
    let ty = match chars.next() {
        Some('B') => FieldType::Byte,
        Some('C') => FieldType::Char,
        Some('D') => FieldType::Double,
        Some('F') => FieldType::Float,
        Some('I') => FieldType::Int,
        Some('J') => FieldType::Long,
        Some('S') => FieldType::Short,
        Some('Z') => FieldType::Boolean,
        Some('[') => FieldType::Array(Box::new(parse_field_type(chars, descriptor)?)),
        Some('L') => {
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some(';') => break,
                    Some(c) => name.push(c),
                    None => {
                        return Err(Error::invalid_descriptor(format!(
                            "{descriptor}: unterminated object type"
                        )))
                    }
                }
            }
            if name.is_empty() {
                return Err(Error::invalid_descriptor(format!(
                    "{descriptor}: empty object type"
                )));
            }
            FieldType::Object(name)
        }
        Some(other) => {
            return Err(Error::invalid_descriptor(format!(
                "{descriptor}: unexpected '{other}'"
            )))
        }
        None => {
            return Err(Error::invalid_descriptor(format!(
                "{descriptor}: missing type"
            )))
        }
    };
    Ok(ty)
}
