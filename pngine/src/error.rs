//! Errors surfaced while assembling a parsed s-expression tree into a
//! PNGB buffer.

use core::fmt;

use pngine_asm::EmitFault;
use pngine_container::{BuilderError, ContainerError};

/// Any failure raised while resolving a `$<prefix>:<u16>` resource-id
/// atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum InvalidResourceId {
    /// The atom did not start with `$`.
    #[cfg_attr(feature = "std", error("resource id `{0}` is missing its leading `$`"))]
    MissingSigil(alloc::string::String),
    /// The prefix before `:` did not match any known resource namespace.
    #[cfg_attr(feature = "std", error("resource id `{0}` has an unknown prefix"))]
    UnknownPrefix(alloc::string::String),
    /// The part after `:` was missing or not a valid number.
    #[cfg_attr(feature = "std", error("resource id `{0}` has a missing or non-numeric index"))]
    NonNumericIndex(alloc::string::String),
    /// The index parsed but is `>= 256`, outside `MAX_RESOURCES`.
    #[cfg_attr(
        feature = "std",
        error("resource id `{0}` has index {1}, which is >= the 256-resource limit")
    )]
    IndexOutOfRange(alloc::string::String, u32),
}

#[cfg(not(feature = "std"))]
impl fmt::Display for InvalidResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Any failure raised while assembling a parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum AssembleError {
    /// A top-level form used a keyword this core does not recognize.
    #[cfg_attr(feature = "std", error("unknown top-level form `{0}`"))]
    UnknownForm(alloc::string::String),
    /// A form's argument list did not match the shape its keyword
    /// requires (wrong arity, wrong element kind in a fixed position).
    #[cfg_attr(feature = "std", error("malformed `{form}` form: {detail}"))]
    InvalidFormStructure {
        /// The form keyword being parsed.
        form: &'static str,
        /// What was expected instead.
        detail: &'static str,
    },
    /// A form referenced a resource id no earlier form had defined.
    #[cfg_attr(feature = "std", error("undefined resource referenced: {0}"))]
    UndefinedResource(alloc::string::String),
    /// A form defined a resource id that an earlier form already defined.
    #[cfg_attr(feature = "std", error("resource {0} redefined"))]
    DuplicateResource(alloc::string::String),
    /// A resource-id atom failed to parse; see [`InvalidResourceId`].
    #[cfg_attr(feature = "std", error("invalid resource id: {0}"))]
    InvalidResourceId(InvalidResourceId),
    /// A position that must hold an atom held something else.
    #[cfg_attr(feature = "std", error("expected an atom in `{0}`"))]
    ExpectedAtom(&'static str),
    /// A position that must hold a string literal held something else.
    #[cfg_attr(feature = "std", error("expected a string literal in `{0}`"))]
    ExpectedString(&'static str),
    /// A position that must hold a numeric literal held something else.
    #[cfg_attr(feature = "std", error("expected a number in `{0}`"))]
    ExpectedNumber(&'static str),
    /// A position that must hold a list held something else.
    #[cfg_attr(feature = "std", error("expected a list in `{0}`"))]
    ExpectedList(&'static str),
    /// An emitter precondition tripped while translating a form.
    #[cfg_attr(feature = "std", error("emitter rejected generated bytecode: {0}"))]
    EmitFault(EmitFault),
    /// A builder-level capacity error (string table, data section, WGSL
    /// table) tripped while translating a form.
    #[cfg_attr(feature = "std", error("builder rejected generated data: {0}"))]
    Builder(BuilderError),
}

#[cfg(not(feature = "std"))]
impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<InvalidResourceId> for AssembleError {
    fn from(e: InvalidResourceId) -> Self {
        Self::InvalidResourceId(e)
    }
}

impl From<EmitFault> for AssembleError {
    fn from(e: EmitFault) -> Self {
        Self::EmitFault(e)
    }
}

impl From<BuilderError> for AssembleError {
    fn from(e: BuilderError) -> Self {
        Self::Builder(e)
    }
}

/// Failure decoding a PNGB buffer back through the container layer; a
/// thin re-export so callers of this crate need only one error type at
/// the assemble/deserialize boundary.
pub type DecodeError = ContainerError;
