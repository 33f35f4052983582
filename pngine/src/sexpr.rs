//! The minimal s-expression AST contract the assembler consumes.
//!
//! The PBSF lexer/parser that produces this tree is a pre-built
//! collaborator and lives outside this core; only the shape of its
//! output — a tree of atoms, strings, numbers and nested lists — is
//! assumed here.

use alloc::string::String;
use alloc::vec::Vec;

/// One node of a parsed s-expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Sexpr {
    /// A bare identifier, keyword, or resource-id token (e.g. `shader`,
    /// `:texture`, `$buf:0`).
    Atom(String),
    /// A double-quoted string literal, already unescaped.
    Str(String),
    /// A numeric literal. PBSF numbers are integral in every position
    /// this core reads them from (sizes, counts, indices).
    Num(i64),
    /// A parenthesized form: `(head arg*)`.
    List(Vec<Sexpr>),
}

impl Sexpr {
    /// Convenience constructor for an atom from a `&str`.
    pub fn atom(s: &str) -> Self {
        Self::Atom(String::from(s))
    }

    /// Convenience constructor for a string literal from a `&str`.
    pub fn str(s: &str) -> Self {
        Self::Str(String::from(s))
    }

    /// The atom's text, if this is an [`Sexpr::Atom`].
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(s) => Some(s),
            _ => None,
        }
    }

    /// The string literal's text, if this is an [`Sexpr::Str`].
    pub fn as_str_lit(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value, if this is an [`Sexpr::Num`].
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The list elements, if this is an [`Sexpr::List`].
    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The atom naming this list's form (its first element), if this is
    /// a non-empty [`Sexpr::List`] headed by an atom.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// This list's arguments: every element after the head.
    pub fn args(&self) -> &[Sexpr] {
        match self.as_list() {
            Some([_head, rest @ ..]) => rest,
            _ => &[],
        }
    }
}
