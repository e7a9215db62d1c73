//! Recursive-descent grammar for schemas, tables, keys, and types.

use crate::context::Context;
use crate::resolve::Resolver;
use crate::ParseOutput;
use csl_ast::{
    Annotation, Arena, ConfigSchema, DefinitionRef, ExprId, KeyDefinition, LiteralValue,
    Primitive, PrimitiveType, TableType, TypeId, TypeKind, TypeNode,
};
use csl_lexer::literal_content;
use csl_span::Region;
use csl_token::{Token, TokenKind, TypeDescriptor};
use rustc_hash::FxHashMap;

/// The CSL parser. Consumes a comment-free token slice and produces a
/// [`csl_ast::Document`] plus diagnostics and the token↦definition map.
pub struct Parser<'t> {
    pub(crate) cx: Context<'t>,
    pub(crate) arena: Arena,
    pub(crate) schemas: Vec<ConfigSchema>,
    pub(crate) definitions: FxHashMap<usize, DefinitionRef>,
    /// Token index of every identifier expression, for the resolver.
    pub(crate) ident_tokens: FxHashMap<ExprId, usize>,
}

impl<'t> Parser<'t> {
    /// Creates a parser over a lexed token slice.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            cx: Context::new(tokens),
            arena: Arena::new(),
            schemas: Vec::new(),
            definitions: FxHashMap::default(),
            ident_tokens: FxHashMap::default(),
        }
    }

    /// Parses the whole token stream. Never fails; problems accumulate as
    /// diagnostics in the output.
    pub fn parse(mut self) -> ParseOutput {
        self.parse_file();

        let mut resolver = Resolver {
            arena: &self.arena,
            errors: &mut self.cx.errors,
            definitions: &mut self.definitions,
            ident_tokens: &self.ident_tokens,
        };
        for schema in &self.schemas {
            resolver.resolve_schema(schema);
        }
        tracing::debug!(
            schemas = self.schemas.len(),
            errors = self.cx.errors.len(),
            "parse finished"
        );

        ParseOutput {
            document: csl_ast::Document { schemas: self.schemas, arena: self.arena },
            errors: self.cx.errors,
            warnings: self.cx.warnings,
            definitions: self.definitions,
        }
    }

    fn parse_file(&mut self) {
        while !self.cx.at_eof() {
            if self.cx.check(TokenKind::Keyword, "config") {
                self.parse_schema();
            } else {
                let region = self.cx.current_region();
                self.cx.error("expected 'config'", region);
                while !self.cx.at_eof() && !self.cx.check(TokenKind::Keyword, "config") {
                    self.cx.advance();
                }
            }
        }
    }

    fn parse_schema(&mut self) {
        let start = self.cx.current_region().start;
        self.cx.advance(); // config

        let mut name = String::new();
        let mut name_region = self.cx.current_region();
        let mut name_token = None;
        if let Some(token) = self.cx.current() {
            if token.kind == TokenKind::Identifier {
                name = literal_content(&token.value);
                name_region = token.region;
                name_token = Some(self.cx.index());
                self.cx.advance();
            }
        }
        if name_token.is_none() {
            self.cx.error("expected a schema name", name_region);
        }

        let root = self.parse_table_type();
        let region = Region::new(start, self.cx.previous_end());
        let index = self.schemas.len();
        if let Some(token) = name_token {
            self.definitions.insert(token, DefinitionRef::Schema(index));
        }
        self.schemas.push(ConfigSchema { name, root, region, name_region });
    }

    pub(crate) fn parse_table_type(&mut self) -> TypeId {
        let start = self.cx.current_region().start;
        if !self.cx.expect(TokenKind::Punctuator, "{") {
            let region = self.cx.current_region();
            return self.arena.alloc_type(TypeNode { kind: TypeKind::Invalid, region });
        }

        let mut table = TableType::default();
        let mut seen_constraints_block = false;
        loop {
            if self.cx.consume(TokenKind::Punctuator, "}") {
                break;
            }
            if self.cx.at_eof() {
                let region = self.cx.current_region();
                self.cx.error("expected '}'", region);
                break;
            }
            if self.cx.check(TokenKind::Keyword, "constraints") {
                let (constraints, region) = self.parse_constraints_block();
                if seen_constraints_block {
                    self.cx.error("table already has a constraints block", region);
                }
                seen_constraints_block = true;
                table.constraints.extend(constraints);
                continue;
            }
            if self.cx.check(TokenKind::Operator, "*") {
                let key = self.parse_key_definition(true);
                if table.wildcard_key.is_some() {
                    let region = self.arena.key(key).name_region;
                    self.cx.error("table already declares a wildcard key", region);
                } else {
                    table.wildcard_key = Some(key);
                }
                continue;
            }
            if self.cx.check_kind(TokenKind::Identifier) {
                let key = self.parse_key_definition(false);
                table.explicit_keys.push(key);
                continue;
            }

            let region = self.cx.current_region();
            let found = self
                .cx
                .current()
                .map(|t| format!("'{}'", t.value))
                .unwrap_or_else(|| "end of file".to_string());
            self.cx.error(format!("expected a key definition, found {found}"), region);
            self.cx.advance();
        }

        let region = Region::new(start, self.cx.previous_end());
        self.arena.alloc_type(TypeNode { kind: TypeKind::Table(table), region })
    }

    /// Parses one key definition. The current token is the name identifier
    /// or the `*` wildcard.
    fn parse_key_definition(&mut self, is_wildcard: bool) -> csl_ast::KeyId {
        let name_token = self.cx.index();
        // Guarded by the caller's check; recovery still needs a fallback.
        let (name, name_region) = match self.cx.advance() {
            Some(token) => {
                let name =
                    if is_wildcard { "*".to_string() } else { literal_content(&token.value) };
                (name, token.region)
            }
            None => (String::new(), self.cx.current_region()),
        };

        let is_optional = !is_wildcard && self.cx.consume(TokenKind::Operator, "?");

        let mut annotations = Vec::new();
        let mut default_value = None;
        let ty;

        if self.cx.consume(TokenKind::Punctuator, ":") {
            ty = self.parse_type();
            self.parse_key_annotations(ty, &mut annotations);
            if self.cx.consume(TokenKind::Operator, "=") {
                default_value = self.parse_default_literal();
            }
        } else if self.cx.check(TokenKind::Operator, "=") {
            // Inferred primitive: `name = literal;`
            self.cx.advance();
            let literal_region = self.cx.current_region();
            default_value = self.parse_default_literal();
            let inferred = default_value
                .as_ref()
                .and_then(|lit| Primitive::of_descriptor(lit.descriptor));
            let kind = match inferred {
                Some(primitive) => TypeKind::Primitive(PrimitiveType {
                    primitive,
                    allowed_values: Vec::new(),
                    annotations: Vec::new(),
                }),
                None => TypeKind::Invalid,
            };
            ty = self.arena.alloc_type(TypeNode {
                kind,
                region: Region::new(literal_region.start, self.cx.previous_end()),
            });
            self.parse_key_annotations(ty, &mut annotations);
        } else {
            let region = self.cx.current_region();
            self.cx.error("expected ':' after key name", region);
            // Continue as if the ':' were present when a type follows.
            ty = if self.type_starts_here() {
                let ty = self.parse_type();
                self.parse_key_annotations(ty, &mut annotations);
                if self.cx.consume(TokenKind::Operator, "=") {
                    default_value = self.parse_default_literal();
                }
                ty
            } else {
                self.arena.alloc_type(TypeNode { kind: TypeKind::Invalid, region })
            };
        }

        self.finish_statement();
        let definition_region = Region::new(name_region.start, self.cx.previous_end());
        let key = self.arena.alloc_key(KeyDefinition {
            name,
            is_wildcard,
            is_optional,
            ty,
            annotations,
            default_value,
            name_region,
            definition_region,
        });
        self.definitions.insert(name_token, DefinitionRef::Key(key));
        key
    }

    fn type_starts_here(&self) -> bool {
        match self.cx.current() {
            None => false,
            Some(t) => matches!(
                t.kind,
                TokenKind::Type
                    | TokenKind::String
                    | TokenKind::Number
                    | TokenKind::Boolean
                    | TokenKind::Datetime
                    | TokenKind::Duration
            ) || t.is(TokenKind::Punctuator, "{")
                || t.is(TokenKind::Punctuator, "("),
        }
    }

    /// Consumes the trailing `;`. A missing `;` is tolerated when the next
    /// token plausibly begins a new key or ends the table; anywhere else it
    /// is reported and parsing skips to the next boundary.
    fn finish_statement(&mut self) {
        if self.cx.consume(TokenKind::Punctuator, ";") {
            return;
        }
        if self.cx.at_key_boundary() {
            return;
        }
        let region = self.cx.current_region();
        self.cx.error("expected ';'", region);
        while !self.cx.at_eof()
            && !self.cx.check(TokenKind::Punctuator, ";")
            && !self.cx.at_key_boundary()
        {
            self.cx.advance();
        }
        self.cx.consume(TokenKind::Punctuator, ";");
    }

    /// Annotations after a key's type: global names attach to the key,
    /// local names to the declared type.
    fn parse_key_annotations(&mut self, ty: TypeId, key_annotations: &mut Vec<Annotation>) {
        while self.cx.check(TokenKind::Operator, "@") {
            let Some(annotation) = self.parse_annotation() else { break };
            if Annotation::is_global_name(&annotation.name) {
                key_annotations.push(annotation);
            } else {
                self.attach_local_annotation(ty, annotation);
            }
        }
    }

    fn attach_local_annotation(&mut self, ty: TypeId, annotation: Annotation) {
        let region = annotation.region;
        let name = annotation.name.clone();
        match &mut self.arena.ty_mut(ty).kind {
            TypeKind::Primitive(primitive) => primitive.annotations.push(annotation),
            _ => {
                self.cx.error(
                    format!("annotation '@{name}' requires a primitive type"),
                    region,
                );
            }
        }
    }

    /// Parses `@name` or `@name(expr, ...)`. The current token is the `@`.
    pub(crate) fn parse_annotation(&mut self) -> Option<Annotation> {
        let start = self.cx.current_region().start;
        self.cx.advance(); // @
        let name = match self.cx.current() {
            Some(token) if token.kind == TokenKind::Identifier => {
                let name = literal_content(&token.value);
                self.cx.advance();
                name
            }
            _ => {
                let region = self.cx.current_region();
                self.cx.error("expected an annotation name", region);
                return None;
            }
        };
        let mut args = Vec::new();
        if self.cx.consume(TokenKind::Punctuator, "(") {
            if !self.cx.check(TokenKind::Punctuator, ")") {
                loop {
                    args.push(self.parse_expr());
                    if !self.cx.consume(TokenKind::Punctuator, ",") {
                        break;
                    }
                }
            }
            self.cx.expect(TokenKind::Punctuator, ")");
        }
        let region = Region::new(start, self.cx.previous_end());
        Some(Annotation { name, args, region })
    }

    /// `type := postfixType ('|' postfixType)*` with union flattening.
    pub(crate) fn parse_type(&mut self) -> TypeId {
        let start = self.cx.current_region().start;
        let first = self.parse_postfix_type();
        if !self.cx.check(TokenKind::Operator, "|") {
            return first;
        }
        let mut members = vec![first];
        while self.cx.consume(TokenKind::Operator, "|") {
            members.push(self.parse_postfix_type());
        }

        // Flatten nested unions so members are never unions themselves.
        let mut flat = Vec::new();
        for member in members {
            match &self.arena.ty(member).kind {
                TypeKind::Union { members } => flat.extend(members.iter().copied()),
                _ => flat.push(member),
            }
        }
        let region = Region::new(start, self.cx.previous_end());
        self.check_union_mixing(&flat, region);
        if flat.len() == 1 {
            return flat[0];
        }
        self.arena.alloc_type(TypeNode { kind: TypeKind::Union { members: flat }, region })
    }

    /// A union must not contain both an open primitive and a literal of
    /// that same primitive (checked for `string` and `number`).
    fn check_union_mixing(&mut self, members: &[TypeId], region: Region) {
        for target in [Primitive::String, Primitive::Number] {
            let mut open = false;
            let mut literal = false;
            for member in members {
                if let TypeKind::Primitive(p) = &self.arena.ty(*member).kind {
                    if p.primitive == target {
                        if p.allowed_values.is_empty() {
                            open = true;
                        } else {
                            literal = true;
                        }
                    }
                }
            }
            if open && literal {
                self.cx.error(
                    "Union type cannot mix a primitive type with its literal",
                    region,
                );
            }
        }
    }

    fn parse_postfix_type(&mut self) -> TypeId {
        let start = self.cx.current_region().start;
        let mut ty = self.parse_primary_type();
        while self.cx.check(TokenKind::Punctuator, "[")
            && self.cx.peek(1).is_some_and(|t| t.is(TokenKind::Punctuator, "]"))
        {
            self.cx.advance();
            self.cx.advance();
            let region = Region::new(start, self.cx.previous_end());
            ty = self.arena.alloc_type(TypeNode { kind: TypeKind::Array { element: ty }, region });
        }
        ty
    }

    fn parse_primary_type(&mut self) -> TypeId {
        let Some(token) = self.cx.current() else {
            let region = self.cx.current_region();
            self.cx.error("expected a type", region);
            return self.arena.alloc_type(TypeNode { kind: TypeKind::Invalid, region });
        };

        match token.kind {
            TokenKind::Type => {
                let region = token.region;
                let text = token.value.clone();
                self.cx.advance();
                match &*text {
                    "any{}" => {
                        self.arena.alloc_type(TypeNode { kind: TypeKind::AnyTable, region })
                    }
                    "any[]" => {
                        self.arena.alloc_type(TypeNode { kind: TypeKind::AnyArray, region })
                    }
                    keyword => {
                        let primitive = Primitive::from_keyword(keyword)
                            .unwrap_or(Primitive::String);
                        let mut node = PrimitiveType {
                            primitive,
                            allowed_values: Vec::new(),
                            annotations: Vec::new(),
                        };
                        self.parse_local_annotations(&mut node);
                        let region = Region::new(region.start, self.cx.previous_end());
                        self.arena
                            .alloc_type(TypeNode { kind: TypeKind::Primitive(node), region })
                    }
                }
            }
            TokenKind::String
            | TokenKind::Number
            | TokenKind::Boolean
            | TokenKind::Datetime
            | TokenKind::Duration => {
                let region = token.region;
                let literal = LiteralValue {
                    text: token.value.to_string(),
                    descriptor: token.descriptor.unwrap_or(TypeDescriptor::Invalid),
                };
                self.cx.advance();
                let kind = match Primitive::of_descriptor(literal.descriptor) {
                    Some(primitive) => TypeKind::Primitive(PrimitiveType {
                        primitive,
                        allowed_values: vec![literal],
                        annotations: Vec::new(),
                    }),
                    None => TypeKind::Invalid,
                };
                self.arena.alloc_type(TypeNode { kind, region })
            }
            TokenKind::Punctuator if &*token.value == "{" => self.parse_table_type(),
            TokenKind::Punctuator if &*token.value == "(" => {
                self.cx.advance();
                let ty = self.parse_type();
                self.cx.expect(TokenKind::Punctuator, ")");
                ty
            }
            _ => {
                let region = token.region;
                self.cx.error(format!("expected a type, found '{}'", token.value), region);
                self.arena.alloc_type(TypeNode { kind: TypeKind::Invalid, region })
            }
        }
    }

    /// Annotations directly on a named primitive. Stops at global-named
    /// annotations so the key-level routing can claim them.
    fn parse_local_annotations(&mut self, primitive: &mut PrimitiveType) {
        while self.cx.check(TokenKind::Operator, "@") {
            let is_global = self
                .cx
                .peek(1)
                .is_some_and(|t| Annotation::is_global_name(&t.value));
            if is_global {
                break;
            }
            match self.parse_annotation() {
                Some(annotation) => primitive.annotations.push(annotation),
                None => break,
            }
        }
    }

    fn parse_constraints_block(&mut self) -> (Vec<csl_ast::Constraint>, Region) {
        use csl_ast::Constraint;

        let start = self.cx.current_region().start;
        self.cx.advance(); // constraints
        self.cx.expect(TokenKind::Punctuator, "{");

        let mut constraints = Vec::new();
        loop {
            if self.cx.consume(TokenKind::Punctuator, "}") {
                break;
            }
            if self.cx.at_eof() {
                let region = self.cx.current_region();
                self.cx.error("expected '}'", region);
                break;
            }
            let item_start = self.cx.current_region().start;
            if self.cx.consume(TokenKind::Keyword, "conflicts") {
                let first = self.parse_expr();
                self.cx.expect(TokenKind::Keyword, "with");
                let second = self.parse_expr();
                self.cx.expect(TokenKind::Punctuator, ";");
                let region = Region::new(item_start, self.cx.previous_end());
                constraints.push(Constraint::Conflict { first, second, region });
            } else if self.cx.consume(TokenKind::Keyword, "requires") {
                let dependent = self.parse_expr();
                self.cx.expect(TokenKind::Punctuator, "=>");
                let condition = self.parse_expr();
                self.cx.expect(TokenKind::Punctuator, ";");
                let region = Region::new(item_start, self.cx.previous_end());
                constraints.push(Constraint::Dependency { dependent, condition, region });
            } else if self.cx.consume(TokenKind::Keyword, "validate") {
                let expr = self.parse_expr();
                self.cx.expect(TokenKind::Punctuator, ";");
                let region = Region::new(item_start, self.cx.previous_end());
                constraints.push(Constraint::Validate { expr, region });
            } else {
                let region = self.cx.current_region();
                let found = self
                    .cx
                    .current()
                    .map(|t| format!("'{}'", t.value))
                    .unwrap_or_else(|| "end of file".to_string());
                self.cx.error(format!("expected a constraint, found {found}"), region);
                self.cx.advance();
            }
        }
        self.cx.consume(TokenKind::Punctuator, ";");
        (constraints, Region::new(start, self.cx.previous_end()))
    }

    /// A default literal, optionally signed for numbers.
    fn parse_default_literal(&mut self) -> Option<LiteralValue> {
        if let Some(token) = self.cx.current() {
            if token.kind == TokenKind::Operator && matches!(&*token.value, "+" | "-") {
                let sign = token.value.clone();
                if let Some(number) = self.cx.peek(1) {
                    if number.kind == TokenKind::Number {
                        self.cx.advance();
                        self.cx.advance();
                        return Some(LiteralValue {
                            text: format!("{sign}{}", number.value),
                            descriptor: number.descriptor.unwrap_or(TypeDescriptor::Invalid),
                        });
                    }
                }
            }
        }
        match self.cx.current() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenKind::String
                        | TokenKind::Number
                        | TokenKind::Boolean
                        | TokenKind::Datetime
                        | TokenKind::Duration
                ) =>
            {
                let literal = LiteralValue {
                    text: token.value.to_string(),
                    descriptor: token.descriptor.unwrap_or(TypeDescriptor::Invalid),
                };
                self.cx.advance();
                Some(literal)
            }
            _ => {
                let region = self.cx.current_region();
                self.cx.error("expected a literal default value", region);
                None
            }
        }
    }
}
