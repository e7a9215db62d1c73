//! Identifier resolution and post-parse semantic checks.
//!
//! Runs after the grammar pass over each schema. Every table gets a fresh
//! scope derived from its explicit keys; identifiers in constraint and
//! annotation expressions resolve against that scope, and every resolved
//! identifier token lands in the token↦definition map. Unresolved
//! identifiers are reported but never abort anything.

use csl_ast::{
    Annotation, Arena, ConfigSchema, Constraint, DefinitionRef, ExprId, ExprKind,
    FunctionArgValue, KeyId, Primitive, PrimitiveType, TableType, TypeId, TypeKind,
};
use csl_span::Diagnostic;
use phf::{phf_set, Set};
use rustc_hash::FxHashMap;

/// Annotations that require a `number` primitive.
static NUMERIC_ANNOTATIONS: Set<&'static str> =
    phf_set! { "min", "max", "range", "int", "float" };

/// Annotations that require a `string` primitive.
static STRING_ANNOTATIONS: Set<&'static str> = phf_set! {
    "regex",
    "start_with",
    "end_with",
    "contain",
    "min_length",
    "max_length",
    "length",
    "format",
};

/// Scope of one table: explicit key names to their definitions.
type Scope = FxHashMap<String, KeyId>;

pub(crate) struct Resolver<'a> {
    pub(crate) arena: &'a Arena,
    pub(crate) errors: &'a mut Vec<Diagnostic>,
    pub(crate) definitions: &'a mut FxHashMap<usize, DefinitionRef>,
    pub(crate) ident_tokens: &'a FxHashMap<ExprId, usize>,
}

impl Resolver<'_> {
    pub(crate) fn resolve_schema(&mut self, schema: &ConfigSchema) {
        self.visit_type(schema.root, None);
    }

    fn visit_type(&mut self, ty: TypeId, scope: Option<&Scope>) {
        let arena = self.arena;
        match &arena.ty(ty).kind {
            TypeKind::Table(table) => self.visit_table(table),
            TypeKind::Primitive(primitive) => self.visit_primitive(primitive, scope),
            TypeKind::Array { element } => self.visit_type(*element, scope),
            TypeKind::Union { members } => {
                for member in members {
                    self.visit_type(*member, scope);
                }
            }
            TypeKind::AnyTable | TypeKind::AnyArray | TypeKind::Invalid => {}
        }
    }

    fn visit_table(&mut self, table: &TableType) {
        let arena = self.arena;
        let scope: Scope = table
            .explicit_keys
            .iter()
            .map(|id| (arena.key(*id).name.clone(), *id))
            .collect();

        for constraint in &table.constraints {
            match constraint {
                Constraint::Conflict { first, second, .. } => {
                    self.visit_expr(*first, &scope);
                    self.visit_expr(*second, &scope);
                }
                Constraint::Dependency { dependent, condition, .. } => {
                    self.visit_expr(*dependent, &scope);
                    self.visit_expr(*condition, &scope);
                }
                Constraint::Validate { expr, .. } => {
                    self.visit_expr(*expr, &scope);
                }
            }
        }

        let key_ids = table.explicit_keys.iter().copied().chain(table.wildcard_key);
        for key_id in key_ids {
            let key = arena.key(key_id);
            for annotation in &key.annotations {
                self.visit_annotation_args(annotation, &scope);
            }
            self.check_default(key_id);
            self.visit_type(key.ty, Some(&scope));
        }
    }

    fn visit_primitive(&mut self, primitive: &PrimitiveType, scope: Option<&Scope>) {
        for annotation in &primitive.annotations {
            self.check_annotation_kind(primitive, annotation);
            if let Some(scope) = scope {
                self.visit_annotation_args(annotation, scope);
            }
        }
    }

    fn visit_annotation_args(&mut self, annotation: &Annotation, scope: &Scope) {
        for arg in &annotation.args {
            self.visit_expr(*arg, scope);
        }
    }

    /// Annotation kind compatibility against the annotated primitive.
    fn check_annotation_kind(&mut self, primitive: &PrimitiveType, annotation: &Annotation) {
        let required = if NUMERIC_ANNOTATIONS.contains(&annotation.name) {
            Some(Primitive::Number)
        } else if STRING_ANNOTATIONS.contains(&annotation.name) {
            Some(Primitive::String)
        } else {
            None
        };
        if let Some(required) = required {
            if primitive.primitive != required {
                self.errors.push(Diagnostic::error(
                    format!(
                        "annotation '@{}' requires a {} type",
                        annotation.name,
                        required.as_str()
                    ),
                    annotation.region,
                ));
            }
        }
    }

    /// A declared default literal must belong to one of the primitives the
    /// key's type can denote.
    fn check_default(&mut self, key_id: KeyId) {
        let arena = self.arena;
        let key = arena.key(key_id);
        let Some(default) = &key.default_value else { return };
        if default.descriptor == csl_token::TypeDescriptor::Invalid {
            // The lexer already reported the malformed literal.
            return;
        }
        let mut primitives = Vec::new();
        collect_primitives(arena, key.ty, &mut primitives);
        if primitives.is_empty() {
            self.errors.push(Diagnostic::error(
                format!("key '{}' cannot take a default value", key.name),
                key.definition_region,
            ));
            return;
        }
        let matches = primitives
            .iter()
            .any(|p| default.descriptor.matches_primitive(p.as_str()));
        if !matches {
            self.errors.push(Diagnostic::error(
                format!("default value does not match the declared type of '{}'", key.name),
                key.definition_region,
            ));
        }
    }

    /// Walks an expression, mapping resolved identifier tokens and
    /// reporting unknown identifiers. Returns the key the expression
    /// denotes when it is a (dotted) reference.
    fn visit_expr(&mut self, id: ExprId, scope: &Scope) -> Option<KeyId> {
        let arena = self.arena;
        let node = arena.expr(id);
        match &node.kind {
            ExprKind::Identifier(name) => match scope.get(name) {
                Some(key) => {
                    self.map_ident(id, DefinitionRef::Key(*key));
                    Some(*key)
                }
                None => {
                    self.errors.push(Diagnostic::error(
                        format!("unknown identifier '{name}'"),
                        node.region,
                    ));
                    None
                }
            },
            ExprKind::Binary { op: csl_ast::BinaryOp::Dot, lhs, rhs } => {
                let base = self.visit_expr(*lhs, scope)?;
                // The right-hand side is a property of the left: resolve it
                // against the base key's table when there is one, and stay
                // silent otherwise.
                let table = table_of(arena, arena.key(base).ty)?;
                let rhs_node = arena.expr(*rhs);
                if let ExprKind::Identifier(name) = &rhs_node.kind {
                    let found = table
                        .explicit_keys
                        .iter()
                        .copied()
                        .find(|k| arena.key(*k).name == *name);
                    if let Some(key) = found {
                        self.map_ident(*rhs, DefinitionRef::Key(key));
                        return Some(key);
                    }
                }
                None
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(*lhs, scope);
                self.visit_expr(*rhs, scope);
                None
            }
            ExprKind::Unary { operand, .. } => {
                self.visit_expr(*operand, scope);
                None
            }
            ExprKind::Ternary { cond, then_branch, else_branch } => {
                self.visit_expr(*cond, scope);
                self.visit_expr(*then_branch, scope);
                self.visit_expr(*else_branch, scope);
                None
            }
            ExprKind::FunctionCall { name, args } => {
                if name == "subset" {
                    self.visit_subset(node.region, args, scope);
                } else {
                    for arg in args {
                        self.visit_function_arg(*arg, scope);
                    }
                }
                None
            }
            ExprKind::FunctionArg(_) => {
                self.visit_function_arg(id, scope);
                None
            }
            ExprKind::Annotation { target, annotation } => {
                self.visit_expr(*target, scope);
                self.visit_annotation_args(annotation, scope);
                None
            }
            ExprKind::Literal(_) => None,
        }
    }

    fn visit_function_arg(&mut self, id: ExprId, scope: &Scope) {
        let arena = self.arena;
        if let ExprKind::FunctionArg(value) = &arena.expr(id).kind {
            match value {
                FunctionArgValue::Single(expr) => {
                    self.visit_expr(*expr, scope);
                }
                FunctionArgValue::List(items) => {
                    for item in items {
                        self.visit_expr(*item, scope);
                    }
                }
            }
        }
    }

    /// `subset(a, b, [props])`: with a property list, both references must
    /// denote arrays of tables; the properties resolve against the first
    /// array's element table.
    fn visit_subset(&mut self, region: csl_span::Region, args: &[ExprId], scope: &Scope) {
        let arena = self.arena;
        let mut props: Option<&Vec<ExprId>> = None;
        let mut referenced = Vec::new();
        for arg in args {
            if let ExprKind::FunctionArg(value) = &arena.expr(*arg).kind {
                match value {
                    FunctionArgValue::Single(expr) => {
                        referenced.push(self.visit_expr(*expr, scope));
                    }
                    FunctionArgValue::List(items) => props = Some(items),
                }
            }
        }
        let Some(props) = props else { return };

        let mut element_table = None;
        let mut all_table_arrays = !referenced.is_empty();
        for key in referenced.iter().take(2) {
            let table = key.and_then(|k| array_element_table(arena, arena.key(k).ty));
            if table.is_none() {
                all_table_arrays = false;
            } else if element_table.is_none() {
                element_table = table;
            }
        }
        if !all_table_arrays {
            self.errors.push(Diagnostic::error(
                "'subset' with a property list requires arrays of tables",
                region,
            ));
        }
        if let Some(table) = element_table {
            for item in props {
                let item_node = arena.expr(*item);
                if let ExprKind::Identifier(name) = &item_node.kind {
                    let found = table
                        .explicit_keys
                        .iter()
                        .copied()
                        .find(|k| arena.key(*k).name == *name);
                    if let Some(key) = found {
                        self.map_ident(*item, DefinitionRef::Key(key));
                    }
                }
            }
        }
    }

    fn map_ident(&mut self, expr: ExprId, definition: DefinitionRef) {
        if let Some(token) = self.ident_tokens.get(&expr) {
            self.definitions.insert(*token, definition);
        }
    }
}

/// The table a type directly denotes, if any.
fn table_of(arena: &Arena, ty: TypeId) -> Option<&TableType> {
    match &arena.ty(ty).kind {
        TypeKind::Table(table) => Some(table),
        _ => None,
    }
}

/// The element table of an array-of-tables type.
fn array_element_table(arena: &Arena, ty: TypeId) -> Option<&TableType> {
    match &arena.ty(ty).kind {
        TypeKind::Array { element } => table_of(arena, *element),
        _ => None,
    }
}

/// Collects every primitive a type can denote (through unions).
fn collect_primitives(arena: &Arena, ty: TypeId, out: &mut Vec<Primitive>) {
    match &arena.ty(ty).kind {
        TypeKind::Primitive(p) => {
            if !out.contains(&p.primitive) {
                out.push(p.primitive);
            }
        }
        TypeKind::Union { members } => {
            for member in members {
                collect_primitives(arena, *member, out);
            }
        }
        _ => {}
    }
}
