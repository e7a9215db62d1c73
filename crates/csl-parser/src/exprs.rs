//! Operator-precedence expression parsing.
//!
//! The climber follows the language's 17-level table (lower level binds
//! tighter) and recurses with `level + associativity` so right-associative
//! operators re-admit their own level. The ternary `? :` is attempted
//! after each full climb.

use crate::grammar::Parser;
use csl_ast::{BinaryOp, ExprId, ExprKind, ExprNode, FunctionArgValue, LiteralValue, UnaryOp};
use csl_lexer::literal_content;
use csl_span::Region;
use csl_token::{TokenKind, TypeDescriptor};

/// Precedence level and associativity (0 = left, 1 = right).
fn level_assoc(op: BinaryOp) -> (u8, u8) {
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

/// Level of the `@` annotation application.
const ANNOTATION_LEVEL: u8 = 1;
/// Climb limit admitting every operator level.
const TOP_LIMIT: u8 = 16;
/// Operand limit for unary operators (level 3, right-associative).
const UNARY_OPERAND_LIMIT: u8 = 4;

impl Parser<'_> {
    /// `expr := ternary`
    pub(crate) fn parse_expr(&mut self) -> ExprId {
        let start = self.cx.current_region().start;
        let cond = self.climb(TOP_LIMIT);
        if !self.cx.consume(TokenKind::Operator, "?") {
            return cond;
        }
        let then_branch = self.parse_expr();
        self.cx.expect(TokenKind::Punctuator, ":");
        let else_branch = self.parse_expr();
        let region = Region::new(start, self.cx.previous_end());
        self.arena.alloc_expr(ExprNode {
            kind: ExprKind::Ternary { cond, then_branch, else_branch },
            region,
        })
    }

    fn climb(&mut self, limit: u8) -> ExprId {
        let start = self.cx.current_region().start;
        let mut lhs = self.parse_unary();
        loop {
            // Annotation application binds at the highest level.
            if self.cx.check(TokenKind::Operator, "@") && ANNOTATION_LEVEL < limit {
                match self.parse_annotation() {
                    Some(annotation) => {
                        let region = Region::new(start, self.cx.previous_end());
                        lhs = self.arena.alloc_expr(ExprNode {
                            kind: ExprKind::Annotation { target: lhs, annotation },
                            region,
                        });
                        continue;
                    }
                    None => break,
                }
            }

            let Some(token) = self.cx.current() else { break };
            if token.kind != TokenKind::Operator || &*token.value == "?" {
                break;
            }
            let Some(op) = BinaryOp::from_str(&token.value) else { break };
            let (level, assoc) = level_assoc(op);
            if level >= limit {
                break;
            }
            self.cx.advance();
            let rhs = self.climb(level + assoc);
            let region = Region::new(start, self.cx.previous_end());
            lhs = self.arena.alloc_expr(ExprNode { kind: ExprKind::Binary { op, lhs, rhs }, region });
        }
        lhs
    }

    fn parse_unary(&mut self) -> ExprId {
        if let Some(token) = self.cx.current() {
            if token.kind == TokenKind::Operator {
                if let Some(op) = UnaryOp::from_str(&token.value) {
                    let start = token.region.start;
                    self.cx.advance();
                    let operand = self.climb(UNARY_OPERAND_LIMIT);
                    let region = Region::new(start, self.cx.previous_end());
                    return self
                        .arena
                        .alloc_expr(ExprNode { kind: ExprKind::Unary { op, operand }, region });
                }
            }
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> ExprId {
        let Some(token) = self.cx.current() else {
            let region = self.cx.current_region();
            self.cx.error("expected an expression", region);
            return self.invalid_expr(region);
        };

        match token.kind {
            TokenKind::String
            | TokenKind::Number
            | TokenKind::Boolean
            | TokenKind::Datetime
            | TokenKind::Duration => {
                let literal = LiteralValue {
                    text: token.value.to_string(),
                    descriptor: token.descriptor.unwrap_or(TypeDescriptor::Invalid),
                };
                let region = token.region;
                self.cx.advance();
                self.arena.alloc_expr(ExprNode { kind: ExprKind::Literal(literal), region })
            }
            TokenKind::Identifier => {
                let name = literal_content(&token.value);
                let region = token.region;
                let index = self.cx.index();
                self.cx.advance();
                let id = self
                    .arena
                    .alloc_expr(ExprNode { kind: ExprKind::Identifier(name), region });
                self.ident_tokens.insert(id, index);
                id
            }
            TokenKind::Keyword
                if self.cx.peek(1).is_some_and(|t| t.is(TokenKind::Punctuator, "(")) =>
            {
                let name = token.value.to_string();
                let start = token.region.start;
                self.cx.advance();
                let args = self.parse_function_args();
                let region = Region::new(start, self.cx.previous_end());
                self.arena
                    .alloc_expr(ExprNode { kind: ExprKind::FunctionCall { name, args }, region })
            }
            TokenKind::Punctuator if &*token.value == "(" => {
                self.cx.advance();
                let inner = self.parse_expr();
                self.cx.expect(TokenKind::Punctuator, ")");
                inner
            }
            _ => {
                let region = token.region;
                self.cx
                    .error(format!("expected an expression, found '{}'", token.value), region);
                // Advance past stray tokens, but never eat structure the
                // caller needs to resynchronize on.
                let structural = matches!(token.kind, TokenKind::Keyword | TokenKind::Punctuator)
                    || token.is(TokenKind::Operator, "*");
                if !structural {
                    self.cx.advance();
                }
                self.invalid_expr(region)
            }
        }
    }

    /// `args := (expr | '[' expr,* ']') (',' ...)*`, surrounded by parens.
    fn parse_function_args(&mut self) -> Vec<ExprId> {
        self.cx.expect(TokenKind::Punctuator, "(");
        let mut args = Vec::new();
        if self.cx.consume(TokenKind::Punctuator, ")") {
            return args;
        }
        loop {
            let start = self.cx.current_region().start;
            let value = if self.cx.consume(TokenKind::Punctuator, "[") {
                let mut items = Vec::new();
                if !self.cx.check(TokenKind::Punctuator, "]") {
                    loop {
                        items.push(self.parse_expr());
                        if !self.cx.consume(TokenKind::Punctuator, ",") {
                            break;
                        }
                    }
                }
                self.cx.expect(TokenKind::Punctuator, "]");
                FunctionArgValue::List(items)
            } else {
                FunctionArgValue::Single(self.parse_expr())
            };
            let region = Region::new(start, self.cx.previous_end());
            args.push(
                self.arena.alloc_expr(ExprNode { kind: ExprKind::FunctionArg(value), region }),
            );
            if !self.cx.consume(TokenKind::Punctuator, ",") {
                break;
            }
        }
        self.cx.expect(TokenKind::Punctuator, ")");
        args
    }

    fn invalid_expr(&mut self, region: Region) -> ExprId {
        self.arena.alloc_expr(ExprNode {
            kind: ExprKind::Literal(LiteralValue {
                text: String::new(),
                descriptor: TypeDescriptor::Invalid,
            }),
            region,
        })
    }
}
