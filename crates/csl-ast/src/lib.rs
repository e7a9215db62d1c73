//! Schema representation for the Config Schema Language.
//!
//! The parser lowers a token stream into a [`Document`]: a list of
//! [`ConfigSchema`] roots plus an [`Arena`] that owns every type, key
//! definition, and expression node. Nodes reference each other through
//! integer ids ([`TypeId`], [`KeyId`], [`ExprId`]) instead of shared
//! pointers, so the whole document drops atomically when its cache entry
//! is replaced.
//!
//! All nodes are immutable once the parser returns; consumers (printer,
//! HTML generator, language server) only read.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod arena;
mod ast;
mod expr;

pub use arena::{Arena, ExprId, KeyId, TypeId};
pub use ast::{
    walk_tables, Annotation, ConfigSchema, Constraint, Document, KeyDefinition, LiteralValue,
    Primitive, PrimitiveType, TableType, TypeKind, TypeNode,
};
pub use expr::{BinaryOp, ExprKind, ExprNode, FunctionArgValue, UnaryOp};

/// A reference to the definition an identifier token resolves to: either a
/// schema (by index into [`Document::schemas`]) or a key definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionRef {
    /// Index into the document's schema list.
    Schema(usize),
    /// Key definition id in the document arena.
    Key(KeyId),
}
