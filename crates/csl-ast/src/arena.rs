//! Arena storage for schema nodes.

use crate::ast::{KeyDefinition, TypeNode};
use crate::expr::ExprNode;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Raw index into the owning arena vector.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Id of a [`TypeNode`] in an [`Arena`].
    TypeId
);
arena_id!(
    /// Id of a [`KeyDefinition`] in an [`Arena`].
    KeyId
);
arena_id!(
    /// Id of an [`ExprNode`] in an [`Arena`].
    ExprId
);

/// Owns every type, key, and expression node of a parsed document.
///
/// Allocation only grows the arena; nodes are never removed. Ids stay
/// valid for the lifetime of the arena.
#[derive(Debug, Default, Clone)]
pub struct Arena {
    types: Vec<TypeNode>,
    keys: Vec<KeyDefinition>,
    exprs: Vec<ExprNode>,
}

impl Arena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a type node.
    pub fn alloc_type(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(node);
        id
    }

    /// Allocates a key definition.
    pub fn alloc_key(&mut self, key: KeyDefinition) -> KeyId {
        let id = KeyId(self.keys.len() as u32);
        self.keys.push(key);
        id
    }

    /// Allocates an expression node.
    pub fn alloc_expr(&mut self, expr: ExprNode) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Borrows a type node.
    pub fn ty(&self, id: TypeId) -> &TypeNode {
        &self.types[id.index()]
    }

    /// Borrows a key definition.
    pub fn key(&self, id: KeyId) -> &KeyDefinition {
        &self.keys[id.index()]
    }

    /// Borrows an expression node.
    pub fn expr(&self, id: ExprId) -> &ExprNode {
        &self.exprs[id.index()]
    }

    /// Mutable access to a type node, used while the parser assembles
    /// tables incrementally.
    pub fn ty_mut(&mut self, id: TypeId) -> &mut TypeNode {
        &mut self.types[id.index()]
    }

    /// Iterates over all key definitions with their ids.
    pub fn keys(&self) -> impl Iterator<Item = (KeyId, &KeyDefinition)> {
        self.keys.iter().enumerate().map(|(i, k)| (KeyId(i as u32), k))
    }

    /// Number of allocated type nodes.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
