//! Instruction predicates for building sequence patterns.

use super::{FieldType, Instruction, InvokeKind, MethodCall};
use crate::sequence::Match;

/// Internal names of the primitive wrapper types.
pub const WRAPPER_TYPES: &[&str] = &[
    "java/lang/Boolean",
    "java/lang/Byte",
    "java/lang/Character",
    "java/lang/Short",
    "java/lang/Integer",
    "java/lang/Long",
    "java/lang/Float",
    "java/lang/Double",
];

/// Any instruction, pseudo or not.
pub fn any_instruction() -> Match<Instruction> {
    Match::any()
}

/// Labels, line numbers and frames.
pub fn not_an_instruction() -> Match<Instruction> {
    Match::new(Instruction::is_pseudo)
}

/// Constant load of int, long, float or double zero.
pub fn zero_constant() -> Match<Instruction> {
    Match::new(is_zero_constant)
}

pub fn int_constant(value: i32) -> Match<Instruction> {
    Match::new(move |insn: &Instruction| {
        insn.as_constant().and_then(|c| c.as_int()) == Some(value)
    })
}

/// Static `valueOf` on a wrapper type taking a single primitive.
pub fn boxing_call() -> Match<Instruction> {
    Match::new(|insn: &Instruction| insn.as_call().is_some_and(is_boxing_call))
}

pub fn is_zero_constant(insn: &Instruction) -> bool {
    insn.as_constant().is_some_and(|c| c.is_numeric_zero())
}

pub fn is_null_constant(insn: &Instruction) -> bool {
    insn.as_constant().is_some_and(|c| c.is_null())
}

pub fn is_empty_string_constant(insn: &Instruction) -> bool {
    insn.as_constant().is_some_and(|c| c.is_empty_string())
}

pub fn is_boxing_call(call: &MethodCall) -> bool {
    if call.invoke != InvokeKind::Static
        || call.name != "valueOf"
        || !WRAPPER_TYPES.contains(&call.owner.as_str())
    {
        return false;
    }
    call.signature().is_ok_and(|sig| {
        matches!(sig.arguments.as_slice(), [arg] if arg.is_primitive())
            && sig.returns == Some(FieldType::Object(call.owner.clone()))
    })
}
