//! Linear instruction model for JVM-style method bodies.
//!
//! A method body is an ordered list of [`Instruction`]s as produced by a
//! class-file parser. Besides executable instructions the list carries
//! pseudo-instructions (labels, line numbers, stack-map frames) that have no
//! runtime effect and are skipped when reasoning about instruction order.
//!
//! Constant loads are normalized: `iconst_0`, `bipush 0` and `ldc 0` all
//! become `Instruction::Const { value: Constant::Int(0) }`. Invocations,
//! `invokedynamic` included, become [`Instruction::Call`]. Every other JVM
//! opcode is an [`Opcode`].

mod descriptor;
pub mod matchers;
mod method;

pub use descriptor::{FieldType, MethodDescriptor};
pub use method::{ClassTree, Location, MethodTree};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// A single node in a method's instruction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Operation without operands (`ireturn`, `dup`, `iadd`, `aaload`, ...).
    Op { opcode: Opcode },
    /// Local variable load or store, and `ret`.
    Var { opcode: Opcode, slot: u16 },
    /// Conditional or unconditional branch to a label.
    Jump { opcode: Opcode, label: u32 },
    /// Instruction with a type operand (`new`, `anewarray`, `checkcast`, `instanceof`).
    Type { opcode: Opcode, descriptor: String },
    /// Field access.
    Field {
        opcode: Opcode,
        owner: String,
        name: String,
        descriptor: String,
    },
    /// Instruction with an immediate int operand (`newarray` and its array type code).
    IntOperand { opcode: Opcode, operand: i32 },
    /// Local variable increment.
    Iinc { slot: u16, increment: i16 },
    /// `tableswitch` or `lookupswitch`. `keys` is empty for a table switch.
    Switch {
        opcode: Opcode,
        default: u32,
        #[serde(default)]
        keys: Vec<i32>,
        labels: Vec<u32>,
    },
    /// `multianewarray`.
    MultiArray { descriptor: String, dimensions: u8 },
    /// Constant load.
    Const { value: Constant },
    /// Method invocation.
    Call(MethodCall),
    /// Branch target marker.
    Label { id: u32 },
    /// Source line marker.
    Line { line: u32 },
    /// Stack map frame.
    Frame,
}

impl Instruction {
    pub fn op(opcode: Opcode) -> Self {
        Self::Op { opcode }
    }

    pub fn var(opcode: Opcode, slot: u16) -> Self {
        Self::Var { opcode, slot }
    }

    pub fn constant(value: Constant) -> Self {
        Self::Const { value }
    }

    pub fn int(value: i32) -> Self {
        Self::constant(Constant::Int(value))
    }

    pub fn null() -> Self {
        Self::constant(Constant::Null)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Constant::String(value.into()))
    }

    pub fn invoke_static(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self::Call(MethodCall::new(InvokeKind::Static, owner, name, descriptor))
    }

    pub fn invoke_virtual(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self::Call(MethodCall::new(InvokeKind::Virtual, owner, name, descriptor))
    }

    pub fn label(id: u32) -> Self {
        Self::Label { id }
    }

    pub fn line(line: u32) -> Self {
        Self::Line { line }
    }

    /// Returns true for labels, line numbers and frames.
    pub fn is_pseudo(&self) -> bool {
        matches!(self, Self::Label { .. } | Self::Line { .. } | Self::Frame)
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Const { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&MethodCall> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op { opcode } => write!(f, "{opcode}"),
            Self::Var { opcode, slot } => write!(f, "{opcode} {slot}"),
            Self::Jump { opcode, label } => write!(f, "{opcode} L{label}"),
            Self::Type { opcode, descriptor } => write!(f, "{opcode} {descriptor}"),
            Self::Field {
                opcode,
                owner,
                name,
                descriptor,
            } => write!(f, "{opcode} {owner}.{name}:{descriptor}"),
            Self::IntOperand { opcode, operand } => write!(f, "{opcode} {operand}"),
            Self::Iinc { slot, increment } => write!(f, "iinc {slot} {increment}"),
            Self::Switch {
                opcode,
                default,
                labels,
                ..
            } => write!(f, "{opcode} default L{default} ({} targets)", labels.len()),
            Self::MultiArray {
                descriptor,
                dimensions,
            } => write!(f, "multianewarray {descriptor} {dimensions}"),
            Self::Const { value } => write!(f, "const {value}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Label { id } => write!(f, "L{id}:"),
            Self::Line { line } => write!(f, "line {line}"),
            Self::Frame => write!(f, "frame"),
        }
    }
}

/// Literal carried by a constant load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Constant {
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl Constant {
    /// Returns true for the zero value of int, long, float and double.
    ///
    /// Negative zero is a distinct value and does not count.
    pub fn is_numeric_zero(&self) -> bool {
        match self {
            Self::Int(v) => *v == 0,
            Self::Long(v) => *v == 0,
            Self::Float(v) => v.to_bits() == 0,
            Self::Double(v) => v.to_bits() == 0,
            Self::Null | Self::String(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, Self::String(s) if s.is_empty())
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v:?}F"),
            Self::Double(v) => write!(f, "{v:?}D"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// How a method is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvokeKind {
    Static,
    Virtual,
    Interface,
    Special,
    Dynamic,
}

/// A method invocation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
    pub invoke: InvokeKind,
    /// Internal name of the owning type, e.g. `java/util/Optional`.
    /// Empty for `invokedynamic` call sites.
    #[serde(default)]
    pub owner: String,
    pub name: String,
    /// JVM method descriptor, e.g. `(I)Ljava/lang/Integer;`.
    pub descriptor: String,
}

impl MethodCall {
    pub fn new(
        invoke: InvokeKind,
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            invoke,
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Parse the call's descriptor.
    pub fn signature(&self) -> Result<MethodDescriptor> {
        MethodDescriptor::parse(&self.descriptor)
    }

    /// Number of declared arguments, excluding the receiver.
    pub fn arity(&self) -> Result<usize> {
        Ok(self.signature()?.arity())
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self.invoke {
            InvokeKind::Static => "invokestatic",
            InvokeKind::Virtual => "invokevirtual",
            InvokeKind::Interface => "invokeinterface",
            InvokeKind::Special => "invokespecial",
            InvokeKind::Dynamic => {
                return write!(f, "invokedynamic {}{}", self.name, self.descriptor);
            }
        };
        write!(
            f,
            "{mnemonic} {}.{}{}",
            self.owner, self.name, self.descriptor
        )
    }
}

/// Generates [`Opcode`] and its mnemonic lookups from one table.
macro_rules! opcodes {
    ($($(#[$meta:meta])* $variant:ident => $mnemonic:literal,)+) => {
        /// JVM opcodes other than constant loads and invocations.
        ///
        /// Serialized as the lowercase JVM mnemonic (`if_icmpge`, `aaload`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum Opcode {
            $($(#[$meta])* $variant,)+
        }

        impl Opcode {
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $(Self::$variant => $mnemonic,)+
                }
            }

            pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
                match mnemonic {
                    $($mnemonic => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

opcodes! {
    // === Control ===
    Nop => "nop",
    Goto => "goto",
    GotoW => "goto_w",
    Jsr => "jsr",
    JsrW => "jsr_w",
    Ret => "ret",
    TableSwitch => "tableswitch",
    LookupSwitch => "lookupswitch",
    IReturn => "ireturn",
    LReturn => "lreturn",
    FReturn => "freturn",
    DReturn => "dreturn",
    AReturn => "areturn",
    Return => "return",
    AThrow => "athrow",

    // === Locals ===
    ILoad => "iload",
    LLoad => "lload",
    FLoad => "fload",
    DLoad => "dload",
    ALoad => "aload",
    IStore => "istore",
    LStore => "lstore",
    FStore => "fstore",
    DStore => "dstore",
    AStore => "astore",

    // === Arrays ===
    IALoad => "iaload",
    LALoad => "laload",
    FALoad => "faload",
    DALoad => "daload",
    AALoad => "aaload",
    BALoad => "baload",
    CALoad => "caload",
    SALoad => "saload",
    IAStore => "iastore",
    LAStore => "lastore",
    FAStore => "fastore",
    DAStore => "dastore",
    AAStore => "aastore",
    BAStore => "bastore",
    CAStore => "castore",
    SAStore => "sastore",
    NewArray => "newarray",
    ANewArray => "anewarray",
    ArrayLength => "arraylength",

    // === Stack ===
    Pop => "pop",
    Pop2 => "pop2",
    Dup => "dup",
    DupX1 => "dup_x1",
    DupX2 => "dup_x2",
    Dup2 => "dup2",
    Dup2X1 => "dup2_x1",
    Dup2X2 => "dup2_x2",
    Swap => "swap",

    // === Arithmetic ===
    IAdd => "iadd",
    LAdd => "ladd",
    FAdd => "fadd",
    DAdd => "dadd",
    ISub => "isub",
    LSub => "lsub",
    FSub => "fsub",
    DSub => "dsub",
    IMul => "imul",
    LMul => "lmul",
    FMul => "fmul",
    DMul => "dmul",
    IDiv => "idiv",
    LDiv => "ldiv",
    FDiv => "fdiv",
    DDiv => "ddiv",
    IRem => "irem",
    LRem => "lrem",
    FRem => "frem",
    DRem => "drem",
    INeg => "ineg",
    LNeg => "lneg",
    FNeg => "fneg",
    DNeg => "dneg",
    IShl => "ishl",
    LShl => "lshl",
    IShr => "ishr",
    LShr => "lshr",
    IUShr => "iushr",
    LUShr => "lushr",
    IAnd => "iand",
    LAnd => "land",
    IOr => "ior",
    LOr => "lor",
    IXor => "ixor",
    LXor => "lxor",

    // === Conversions ===
    I2L => "i2l",
    I2F => "i2f",
    I2D => "i2d",
    L2I => "l2i",
    L2F => "l2f",
    L2D => "l2d",
    F2I => "f2i",
    F2L => "f2l",
    F2D => "f2d",
    D2I => "d2i",
    D2L => "d2l",
    D2F => "d2f",
    I2B => "i2b",
    I2C => "i2c",
    I2S => "i2s",

    // === Comparisons ===
    LCmp => "lcmp",
    FCmpL => "fcmpl",
    FCmpG => "fcmpg",
    DCmpL => "dcmpl",
    DCmpG => "dcmpg",
    IfEq => "ifeq",
    IfNe => "ifne",
    IfLt => "iflt",
    IfGe => "ifge",
    IfGt => "ifgt",
    IfLe => "ifle",
    IfICmpEq => "if_icmpeq",
    IfICmpNe => "if_icmpne",
    IfICmpLt => "if_icmplt",
    IfICmpGe => "if_icmpge",
    IfICmpGt => "if_icmpgt",
    IfICmpLe => "if_icmple",
    IfACmpEq => "if_acmpeq",
    IfACmpNe => "if_acmpne",
    IfNull => "ifnull",
    IfNonNull => "ifnonnull",

    // === Objects ===
    New => "new",
    CheckCast => "checkcast",
    InstanceOf => "instanceof",
    GetField => "getfield",
    PutField => "putfield",
    GetStatic => "getstatic",
    PutStatic => "putstatic",
    MonitorEnter => "monitorenter",
    MonitorExit => "monitorexit",
}

impl FromStr for Opcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_mnemonic(s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown opcode `{s}`")))
    }
}

impl TryFrom<String> for Opcode {
    type Error = Error;

    fn try_from(mnemonic: String) -> Result<Self> {
        mnemonic.parse()
    }
}

impl From<Opcode> for &'static str {
    fn from(opcode: Opcode) -> Self {
        opcode.mnemonic()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
