//! Schema, table, key, annotation, and constraint nodes.

use crate::arena::{Arena, ExprId, KeyId, TypeId};
use csl_span::Region;
use csl_token::TypeDescriptor;

/// A parsed source document: schema roots plus the arena owning all nodes.
#[derive(Debug, Default, Clone)]
pub struct Document {
    /// Top-level `config` schemas in source order.
    pub schemas: Vec<ConfigSchema>,
    /// Node storage shared by every schema in the document.
    pub arena: Arena,
}

impl Document {
    /// Looks up a schema by name.
    pub fn schema_by_name(&self, name: &str) -> Option<(usize, &ConfigSchema)> {
        self.schemas.iter().enumerate().find(|(_, s)| s.name == name)
    }

    /// The table type backing a schema root.
    ///
    /// Returns `None` if the root node is not a table (parse recovery can
    /// leave an invalid root behind).
    pub fn root_table(&self, schema: &ConfigSchema) -> Option<&TableType> {
        match &self.arena.ty(schema.root).kind {
            TypeKind::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// A named, outermost `config` block owning a root table.
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    /// Schema name as written (decoded if backtick-quoted).
    pub name: String,
    /// Root table type id.
    pub root: TypeId,
    /// Region of the whole `config` block.
    pub region: Region,
    /// Region of the name token.
    pub name_region: Region,
}

/// A type node in the arena; every variant carries its source region.
#[derive(Debug, Clone)]
pub struct TypeNode {
    /// The variant payload.
    pub kind: TypeKind,
    /// Source region of the type expression.
    pub region: Region,
}

/// Tagged type variant.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Built-in scalar, possibly narrowed to literal values.
    Primitive(PrimitiveType),
    /// Brace-enclosed key set.
    Table(TableType),
    /// `T[]`
    Array {
        /// Element type.
        element: TypeId,
    },
    /// `A | B | ...` — members are flattened, never unions themselves.
    Union {
        /// At least two member type ids.
        members: Vec<TypeId>,
    },
    /// `any{}`
    AnyTable,
    /// `any[]`
    AnyArray,
    /// Placeholder produced during parse recovery.
    Invalid,
}

/// The built-in scalar categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `datetime`
    Datetime,
    /// `duration`
    Duration,
}

impl Primitive {
    /// The keyword spelling of this primitive.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Datetime => "datetime",
            Primitive::Duration => "duration",
        }
    }

    /// Parses a type keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "string" => Primitive::String,
            "number" => Primitive::Number,
            "boolean" => Primitive::Boolean,
            "datetime" => Primitive::Datetime,
            "duration" => Primitive::Duration,
            _ => return None,
        })
    }

    /// The primitive a literal descriptor belongs to.
    pub fn of_descriptor(descriptor: TypeDescriptor) -> Option<Self> {
        descriptor.primitive_name().and_then(Self::from_keyword)
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal's source text plus its lexer classification.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralValue {
    /// Literal exactly as written, including quotes for strings.
    pub text: String,
    /// Lexer classification.
    pub descriptor: TypeDescriptor,
}

/// A primitive type, open (`string`) or narrowed to an enum of literals
/// (`"dev" | "prod"` contributes one literal each).
#[derive(Debug, Clone)]
pub struct PrimitiveType {
    /// Which scalar category.
    pub primitive: Primitive,
    /// Non-empty exactly when this denotes a literal enum member.
    pub allowed_values: Vec<LiteralValue>,
    /// Local annotations attached to the type.
    pub annotations: Vec<Annotation>,
}

/// A brace-enclosed set of key definitions with at most one wildcard and
/// any number of constraints.
#[derive(Debug, Clone, Default)]
pub struct TableType {
    /// Explicitly named keys, in declaration order.
    pub explicit_keys: Vec<KeyId>,
    /// The `*` key, if declared.
    pub wildcard_key: Option<KeyId>,
    /// Constraints from the table's `constraints { }` block.
    pub constraints: Vec<Constraint>,
}

/// A single key declaration inside a table.
#[derive(Debug, Clone)]
pub struct KeyDefinition {
    /// Key name (decoded if backtick-quoted); `*` for wildcards.
    pub name: String,
    /// True for the `*` key.
    pub is_wildcard: bool,
    /// True when declared with `?`.
    pub is_optional: bool,
    /// Declared (or inferred) value type.
    pub ty: TypeId,
    /// Global annotations attached to the key.
    pub annotations: Vec<Annotation>,
    /// Default literal, when declared with `= literal`.
    pub default_value: Option<LiteralValue>,
    /// Region of the name token.
    pub name_region: Region,
    /// Region of the whole declaration.
    pub definition_region: Region,
}

/// An `@name(args...)` decorator.
///
/// Whether an annotation is global (attached to keys) or local (attached
/// to types and expressions) is decided by name: [`Annotation::is_global_name`].
#[derive(Debug, Clone)]
pub struct Annotation {
    /// Annotation name without the `@`.
    pub name: String,
    /// Argument expressions.
    pub args: Vec<ExprId>,
    /// Region from the `@` through the closing parenthesis.
    pub region: Region,
}

impl Annotation {
    /// True for names in the global annotation set.
    pub fn is_global_name(name: &str) -> bool {
        name == "deprecated"
    }
}

/// A constraint inside a `constraints { }` block.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// `conflicts a with b;`
    Conflict {
        /// Left operand.
        first: ExprId,
        /// Right operand.
        second: ExprId,
        /// Whole constraint region.
        region: Region,
    },
    /// `requires a => b;`
    Dependency {
        /// The key whose presence triggers the requirement.
        dependent: ExprId,
        /// The required condition.
        condition: ExprId,
        /// Whole constraint region.
        region: Region,
    },
    /// `validate expr;`
    Validate {
        /// The validated expression.
        expr: ExprId,
        /// Whole constraint region.
        region: Region,
    },
}

impl Constraint {
    /// Source region of the constraint.
    pub fn region(&self) -> Region {
        match self {
            Constraint::Conflict { region, .. }
            | Constraint::Dependency { region, .. }
            | Constraint::Validate { region, .. } => *region,
        }
    }
}

/// Depth-first walk over every table type reachable from `root` through
/// explicit keys and the wildcard, calling `visit` with the path of key
/// names from the root.
pub fn walk_tables<'a>(
    arena: &'a Arena,
    root: TypeId,
    visit: &mut dyn FnMut(&[String], TypeId, &'a TableType),
) {
    fn descend<'a>(
        arena: &'a Arena,
        ty: TypeId,
        path: &mut Vec<String>,
        visit: &mut dyn FnMut(&[String], TypeId, &'a TableType),
    ) {
        match &arena.ty(ty).kind {
            TypeKind::Table(table) => {
                visit(path, ty, table);
                let key_ids =
                    table.explicit_keys.iter().copied().chain(table.wildcard_key);
                for key_id in key_ids {
                    let key = arena.key(key_id);
                    path.push(key.name.clone());
                    descend(arena, key.ty, path, visit);
                    path.pop();
                }
            }
            TypeKind::Array { element } => descend(arena, *element, path, visit),
            TypeKind::Union { members } => {
                for member in members {
                    descend(arena, *member, path, visit);
                }
            }
            _ => {}
        }
    }
    let mut path = Vec::new();
    descend(arena, root, &mut path, visit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        for primitive in [
            Primitive::String,
            Primitive::Number,
            Primitive::Boolean,
            Primitive::Datetime,
            Primitive::Duration,
        ] {
            assert_eq!(Primitive::from_keyword(primitive.as_str()), Some(primitive));
        }
        assert_eq!(Primitive::from_keyword("any"), None);
    }

    #[test]
    fn test_descriptor_primitive() {
        assert_eq!(
            Primitive::of_descriptor(TypeDescriptor::Integer),
            Some(Primitive::Number)
        );
        assert_eq!(Primitive::of_descriptor(TypeDescriptor::Invalid), None);
    }

    #[test]
    fn test_global_annotation_set() {
        assert!(Annotation::is_global_name("deprecated"));
        assert!(!Annotation::is_global_name("min"));
    }

    #[test]
    fn test_walk_tables_visits_nested() {
        let mut arena = Arena::new();
        let inner_table = arena.alloc_type(TypeNode {
            kind: TypeKind::Table(TableType::default()),
            region: Region::default(),
        });
        let key = arena.alloc_key(KeyDefinition {
            name: "db".to_string(),
            is_wildcard: false,
            is_optional: false,
            ty: inner_table,
            annotations: Vec::new(),
            default_value: None,
            name_region: Region::default(),
            definition_region: Region::default(),
        });
        let root = arena.alloc_type(TypeNode {
            kind: TypeKind::Table(TableType {
                explicit_keys: vec![key],
                wildcard_key: None,
                constraints: Vec::new(),
            }),
            region: Region::default(),
        });

        let mut visited = Vec::new();
        walk_tables(&arena, root, &mut |path, _, _| visited.push(path.join(".")));
        assert_eq!(visited, vec!["".to_string(), "db".to_string()]);
    }
}
