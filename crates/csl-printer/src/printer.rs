//! AST → canonical CSL text.

use csl_ast::{
    Annotation, Arena, BinaryOp, ConfigSchema, Constraint, Document, ExprId, ExprKind,
    FunctionArgValue, KeyId, TableType, TypeId, TypeKind,
};

/// Renders every schema of a document, separated by blank lines.
pub fn print_document(document: &Document) -> String {
    let mut out = String::new();
    for (i, schema) in document.schemas.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&print_schema(&document.arena, schema));
    }
    out
}

/// Renders one schema.
pub fn print_schema(arena: &Arena, schema: &ConfigSchema) -> String {
    let mut printer = Printer { arena, out: String::new(), indent: 0 };
    printer.out.push_str("config ");
    printer.push_identifier(&schema.name);
    printer.out.push(' ');
    printer.print_type(schema.root);
    printer.out.push('\n');
    printer.out
}

/// Renders one constraint as a single line of canonical text.
pub fn print_constraint(arena: &Arena, constraint: &Constraint) -> String {
    let mut printer = Printer { arena, out: String::new(), indent: 0 };
    printer.print_constraint(constraint);
    printer.out
}

/// Renders one expression as canonical text.
pub fn print_expr(arena: &Arena, expr: ExprId) -> String {
    let mut printer = Printer { arena, out: String::new(), indent: 0 };
    printer.print_expr(expr);
    printer.out
}

/// A short single-line label for a type (tables render as `{...}`).
pub fn type_label(arena: &Arena, ty: TypeId) -> String {
    match &arena.ty(ty).kind {
        TypeKind::Table(_) => "{...}".to_string(),
        TypeKind::Array { element } => {
            let inner = type_label(arena, *element);
            if matches!(arena.ty(*element).kind, TypeKind::Union { .. }) {
                format!("({inner})[]")
            } else {
                format!("{inner}[]")
            }
        }
        TypeKind::Union { members } => {
            let labels: Vec<String> = members.iter().map(|m| type_label(arena, *m)).collect();
            labels.join(" | ")
        }
        TypeKind::Primitive(primitive) => match primitive.allowed_values.first() {
            Some(literal) => literal.text.clone(),
            None => primitive.primitive.as_str().to_string(),
        },
        TypeKind::AnyTable => "any{}".to_string(),
        TypeKind::AnyArray => "any[]".to_string(),
        TypeKind::Invalid => String::new(),
    }
}

/// True when a name needs no backtick quoting.
fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

struct Printer<'a> {
    arena: &'a Arena,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    /// Writes a name, backtick-quoted when it is not a bare identifier.
    fn push_identifier(&mut self, name: &str) {
        if is_bare_identifier(name) {
            self.out.push_str(name);
            return;
        }
        self.out.push('`');
        for ch in name.chars() {
            if ch == '`' || ch == '\\' {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
        self.out.push('`');
    }

    fn print_type(&mut self, ty: TypeId) {
        let arena = self.arena;
        match &arena.ty(ty).kind {
            TypeKind::Primitive(primitive) => {
                match primitive.allowed_values.first() {
                    Some(literal) => self.out.push_str(&literal.text),
                    None => self.out.push_str(primitive.primitive.as_str()),
                }
                for annotation in &primitive.annotations {
                    self.out.push(' ');
                    self.print_annotation(annotation);
                }
            }
            TypeKind::Table(table) => self.print_table(table),
            TypeKind::Array { element } => {
                let parenthesize = matches!(arena.ty(*element).kind, TypeKind::Union { .. });
                if parenthesize {
                    self.out.push('(');
                }
                self.print_type(*element);
                if parenthesize {
                    self.out.push(')');
                }
                self.out.push_str("[]");
            }
            TypeKind::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(" | ");
                    }
                    self.print_type(*member);
                }
            }
            TypeKind::AnyTable => self.out.push_str("any{}"),
            TypeKind::AnyArray => self.out.push_str("any[]"),
            TypeKind::Invalid => {}
        }
    }

    fn print_table(&mut self, table: &TableType) {
        self.out.push('{');
        self.indent += 1;

        let mut keys: Vec<KeyId> = table.explicit_keys.clone();
        keys.sort_by(|a, b| self.arena.key(*a).name.cmp(&self.arena.key(*b).name));
        for key in keys {
            self.newline();
            self.print_key(key);
        }
        if let Some(wildcard) = table.wildcard_key {
            self.newline();
            self.print_key(wildcard);
        }
        if !table.constraints.is_empty() {
            self.newline();
            self.out.push_str("constraints {");
            self.indent += 1;
            for constraint in &table.constraints {
                self.newline();
                self.print_constraint(constraint);
            }
            self.indent -= 1;
            self.newline();
            self.out.push('}');
        }

        self.indent -= 1;
        self.newline();
        self.out.push('}');
    }

    fn print_key(&mut self, id: KeyId) {
        let key = self.arena.key(id);
        if key.is_wildcard {
            self.out.push('*');
        } else {
            self.push_identifier(&key.name);
        }
        if key.is_optional {
            self.out.push('?');
        }
        self.out.push_str(": ");
        self.print_type(key.ty);
        for annotation in &key.annotations {
            self.out.push(' ');
            self.print_annotation(annotation);
        }
        if let Some(default) = &key.default_value {
            self.out.push_str(" = ");
            self.out.push_str(&default.text);
        }
        self.out.push(';');
    }

    fn print_annotation(&mut self, annotation: &Annotation) {
        self.out.push('@');
        self.out.push_str(&annotation.name);
        if !annotation.args.is_empty() {
            self.out.push('(');
            for (i, arg) in annotation.args.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.print_expr(*arg);
            }
            self.out.push(')');
        }
    }

    fn print_constraint(&mut self, constraint: &Constraint) {
        match constraint {
            Constraint::Conflict { first, second, .. } => {
                self.out.push_str("conflicts ");
                self.print_expr(*first);
                self.out.push_str(" with ");
                self.print_expr(*second);
            }
            Constraint::Dependency { dependent, condition, .. } => {
                self.out.push_str("requires ");
                self.print_expr(*dependent);
                self.out.push_str(" => ");
                self.print_expr(*condition);
            }
            Constraint::Validate { expr, .. } => {
                self.out.push_str("validate ");
                self.print_expr(*expr);
            }
        }
        self.out.push(';');
    }

    fn print_expr(&mut self, id: ExprId) {
        self.print_expr_prec(id, 16);
    }

    /// Prints an expression, parenthesizing when its level does not fit
    /// under `limit` (mirroring the parser's climb limits).
    fn print_expr_prec(&mut self, id: ExprId, limit: u8) {
        let arena = self.arena;
        let level = self.expr_level(id);
        let parenthesize = level >= limit;
        if parenthesize {
            self.out.push('(');
        }
        match &arena.expr(id).kind {
            ExprKind::Literal(literal) => self.out.push_str(&literal.text),
            ExprKind::Identifier(name) => self.push_identifier(name),
            ExprKind::Unary { op, operand } => {
                self.out.push_str(op.as_str());
                self.print_expr_prec(*operand, 4);
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let (op_level, assoc) = binary_level_assoc(*op);
                self.print_expr_prec(*lhs, op_level + 1 - assoc);
                if *op == BinaryOp::Dot {
                    self.out.push('.');
                } else {
                    self.out.push(' ');
                    self.out.push_str(op.as_str());
                    self.out.push(' ');
                }
                self.print_expr_prec(*rhs, op_level + assoc);
            }
            ExprKind::Ternary { cond, then_branch, else_branch } => {
                self.print_expr_prec(*cond, 15);
                self.out.push_str(" ? ");
                self.print_expr(*then_branch);
                self.out.push_str(" : ");
                self.print_expr(*else_branch);
            }
            ExprKind::FunctionCall { name, args } => {
                self.out.push_str(name);
                self.out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.print_expr(*arg);
                }
                self.out.push(')');
            }
            ExprKind::FunctionArg(value) => match value {
                FunctionArgValue::Single(expr) => self.print_expr(*expr),
                FunctionArgValue::List(items) => {
                    self.out.push('[');
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.out.push_str(", ");
                        }
                        self.print_expr(*item);
                    }
                    self.out.push(']');
                }
            },
            ExprKind::Annotation { target, annotation } => {
                self.print_expr_prec(*target, 2);
                self.out.push(' ');
                self.print_annotation(annotation);
            }
        }
        if parenthesize {
            self.out.push(')');
        }
    }

    fn expr_level(&self, id: ExprId) -> u8 {
        match &self.arena.expr(id).kind {
            ExprKind::Binary { op, .. } => binary_level_assoc(*op).0,
            ExprKind::Unary { .. } => 3,
            ExprKind::Ternary { .. } => 15,
            ExprKind::Annotation { .. } => 1,
            _ => 0,
        }
    }
}

fn binary_level_assoc(op: BinaryOp) -> (u8, u8) {
    match op {
        BinaryOp::Dot => (1, 0),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => (5, 0),
        BinaryOp::Add | BinaryOp::Sub => (6, 0),
        BinaryOp::Shl | BinaryOp::Shr => (7, 0),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => (8, 0),
        BinaryOp::Eq | BinaryOp::Ne => (9, 0),
        BinaryOp::BitAnd => (10, 0),
        BinaryOp::BitXor => (11, 0),
        BinaryOp::BitOr => (12, 0),
        BinaryOp::And => (13, 0),
        BinaryOp::Or => (14, 0),
        BinaryOp::Assign => (15, 1),
    }
}
