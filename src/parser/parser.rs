// Copyright (c) ZeroC, Inc.

use super::tokens::{Token, TokenKind};
use crate::ast::{Ast, DeclId, ExprId, StmtId};
use crate::diagnostics::{Diagnostic, Diagnostics, Error};
use crate::grammar::*;
use crate::source_file::Span;

/// Marker type signaling that parsing was aborted after a syntax error was reported.
/// The diagnostic itself lives in the shared [Diagnostics] container.
#[derive(Debug)]
pub struct ParseAborted;

type ParseResult<T> = Result<T, ParseAborted>;

/// A recursive-descent parser for Decaf.
///
/// Grammar productions map one-to-one onto `parse_*` methods. Expression methods are stratified
/// by precedence: assignment (right-associative), `||`, `&&`, equality and relational
/// (non-associative), additive, multiplicative, unary, postfix.
#[derive(Debug)]
pub struct Parser<'a, 'input> {
    tokens: Vec<Token<'input>>,
    position: usize,
    ast: &'a mut Ast,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'input> Parser<'a, 'input> {
    pub fn new(tokens: Vec<Token<'input>>, ast: &'a mut Ast, diagnostics: &'a mut Diagnostics) -> Self {
        Parser {
            tokens,
            position: 0,
            ast,
            diagnostics,
        }
    }

    /// Parses a program: one or more top-level declarations.
    pub fn parse_program(&mut self) -> ParseResult<()> {
        if self.tokens.is_empty() {
            return Err(self.expected("a declaration"));
        }
        while self.peek().is_some() {
            let decl = self.parse_decl()?;
            self.ast.add_top_level_decl(decl);
        }
        Ok(())
    }

    // ----------------  Token plumbing ---------------- //

    fn peek(&self) -> Option<&TokenKind<'input>> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind<'input>> {
        self.tokens.get(self.position + offset).map(|token| &token.1)
    }

    /// The span of the token at the current position, or a zero-width span at the end of the
    /// last token once the input is exhausted.
    fn current_span(&self) -> Span {
        match self.tokens.get(self.position) {
            Some((start, _, end)) => Span::new(*start, *end),
            None => match self.tokens.last() {
                Some((_, _, end)) => Span::new(*end, *end),
                None => Span::default(),
            },
        }
    }

    /// Consumes and returns the current token. Only called when a token is known to be present.
    fn advance(&mut self) -> (Span, TokenKind<'input>) {
        let (start, kind, end) = self.tokens[self.position].clone();
        self.position += 1;
        (Span::new(start, end), kind)
    }

    /// Returns true (without consuming) if the current token is `kind`.
    fn check(&self, kind: &TokenKind<'input>) -> bool {
        self.peek() == Some(kind)
    }

    /// Consumes the current token if it is `kind`, returning whether it did.
    fn advance_if(&mut self, kind: &TokenKind<'input>) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the current token, requiring it to be `kind`.
    fn expect(&mut self, kind: TokenKind<'input>) -> ParseResult<Span> {
        if self.check(&kind) {
            Ok(self.advance().0)
        } else {
            Err(self.expected(&format!("'{kind}'")))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<Identifier> {
        if let Some(TokenKind::Identifier(name)) = self.peek() {
            let name = name.to_string();
            let span = self.advance().0;
            Ok(Identifier::new(name, span))
        } else {
            Err(self.expected("an identifier"))
        }
    }

    /// Reports a syntax error describing what the parser expected at the current position.
    fn expected(&mut self, what: &str) -> ParseAborted {
        let found = match self.peek() {
            Some(kind) => kind.to_string(),
            None => "end of input".to_owned(),
        };
        let span = self.current_span();
        Diagnostic::new(Error::Syntax {
            message: format!("expected {what}, but found {found}"),
        })
        .set_span(&span)
        .push_into(self.diagnostics);
        ParseAborted
    }

    // ----------------  Declarations ---------------- //

    fn parse_decl(&mut self) -> ParseResult<DeclId> {
        match self.peek() {
            Some(TokenKind::ClassKeyword) => self.parse_class(),
            Some(TokenKind::InterfaceKeyword) => self.parse_interface(),
            _ => {
                let declared_type = self.parse_return_type()?;
                let id = self.expect_identifier()?;
                if self.check(&TokenKind::LeftParen) {
                    self.parse_function(declared_type, id, true)
                } else {
                    let decl = self.make_variable(declared_type, id)?;
                    self.expect(TokenKind::Semicolon)?;
                    Ok(decl)
                }
            }
        }
    }

    fn make_variable(&mut self, declared_type: Type, id: Identifier) -> ParseResult<DeclId> {
        if declared_type == Type::Void {
            return Err(self.expected("'(' (variables cannot be declared void)"));
        }
        Ok(self.ast.add_decl(Decl {
            id,
            parent: None,
            scope: None,
            kind: DeclKind::Variable(VariableDecl::new(declared_type)),
        }))
    }

    /// Parses the remainder of a function declaration, starting at the formals' opening
    /// parenthesis. When `with_body` is false a prototype is parsed instead (interface members).
    fn parse_function(&mut self, return_type: Type, id: Identifier, with_body: bool) -> ParseResult<DeclId> {
        self.expect(TokenKind::LeftParen)?;

        let mut formals = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let declared_type = self.parse_type()?;
                let formal_id = self.expect_identifier()?;
                formals.push(self.make_variable(declared_type, formal_id)?);
                if !self.advance_if(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        let mut function = FunctionDecl::new(return_type, formals);
        if with_body {
            function.body = Some(self.parse_block()?);
        } else {
            self.expect(TokenKind::Semicolon)?;
        }

        Ok(self.ast.add_decl(Decl {
            id,
            parent: None,
            scope: None,
            kind: DeclKind::Function(function),
        }))
    }

    fn parse_class(&mut self) -> ParseResult<DeclId> {
        self.expect(TokenKind::ClassKeyword)?;
        let id = self.expect_identifier()?;

        let extends = if self.advance_if(&TokenKind::ExtendsKeyword) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let mut implements = Vec::new();
        if self.advance_if(&TokenKind::ImplementsKeyword) {
            loop {
                implements.push(self.expect_identifier()?);
                if !self.advance_if(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenKind::LeftBrace)?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.peek().is_none() {
                return Err(self.expected("'}'"));
            }
            members.push(self.parse_member()?);
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(self.ast.add_decl(Decl {
            id,
            parent: None,
            scope: None,
            kind: DeclKind::Class(ClassDecl::new(extends, implements, members)),
        }))
    }

    /// Parses a class member: a field or a method.
    fn parse_member(&mut self) -> ParseResult<DeclId> {
        let declared_type = self.parse_return_type()?;
        let id = self.expect_identifier()?;
        if self.check(&TokenKind::LeftParen) {
            self.parse_function(declared_type, id, true)
        } else {
            let decl = self.make_variable(declared_type, id)?;
            self.expect(TokenKind::Semicolon)?;
            Ok(decl)
        }
    }

    fn parse_interface(&mut self) -> ParseResult<DeclId> {
        self.expect(TokenKind::InterfaceKeyword)?;
        let id = self.expect_identifier()?;
        self.expect(TokenKind::LeftBrace)?;

        let mut members = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.peek().is_none() {
                return Err(self.expected("'}'"));
            }
            let return_type = self.parse_return_type()?;
            let member_id = self.expect_identifier()?;
            members.push(self.parse_function(return_type, member_id, false)?);
        }
        self.expect(TokenKind::RightBrace)?;

        Ok(self.ast.add_decl(Decl {
            id,
            parent: None,
            scope: None,
            kind: DeclKind::Interface(InterfaceDecl::new(members)),
        }))
    }

    // ----------------  Types ---------------- //

    /// Parses a type that may not be `void`.
    fn parse_type(&mut self) -> ParseResult<Type> {
        let base = match self.peek() {
            Some(TokenKind::IntKeyword) => {
                self.advance();
                Type::Int
            }
            Some(TokenKind::DoubleKeyword) => {
                self.advance();
                Type::Double
            }
            Some(TokenKind::BoolKeyword) => {
                self.advance();
                Type::Bool
            }
            Some(TokenKind::StringKeyword) => {
                self.advance();
                Type::String
            }
            Some(TokenKind::Identifier(_)) => Type::Named(self.expect_identifier()?),
            _ => return Err(self.expected("a type")),
        };
        self.parse_array_suffix(base)
    }

    /// Parses a function return type: `void` or any other type.
    fn parse_return_type(&mut self) -> ParseResult<Type> {
        if self.advance_if(&TokenKind::VoidKeyword) {
            Ok(Type::Void)
        } else {
            self.parse_type()
        }
    }

    fn parse_array_suffix(&mut self, mut base: Type) -> ParseResult<Type> {
        while self.check(&TokenKind::LeftBracket) {
            self.advance();
            self.expect(TokenKind::RightBracket)?;
            base = Type::Array(Box::new(base));
        }
        Ok(base)
    }

    // ----------------  Statements ---------------- //

    fn parse_block(&mut self) -> ParseResult<StmtId> {
        let open_span = self.expect(TokenKind::LeftBrace)?;

        // A block is declarations first, then statements.
        let mut decls = Vec::new();
        while self.at_variable_decl() {
            let declared_type = self.parse_type()?;
            let id = self.expect_identifier()?;
            decls.push(self.make_variable(declared_type, id)?);
            self.expect(TokenKind::Semicolon)?;
        }

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.peek().is_none() {
                return Err(self.expected("'}'"));
            }
            stmts.push(self.parse_stmt()?);
        }
        let close_span = self.expect(TokenKind::RightBrace)?;

        Ok(self
            .ast
            .add_stmt(Stmt::new(StmtKind::Block { decls, stmts }, &open_span + &close_span)))
    }

    /// Lookahead deciding whether the next tokens begin a variable declaration rather than a
    /// statement. `A a;` and `A[] a;` need two and three tokens of lookahead respectively, since
    /// `A = ...` and `A[0] = ...` are expression statements.
    fn at_variable_decl(&self) -> bool {
        match self.peek() {
            Some(
                TokenKind::IntKeyword | TokenKind::DoubleKeyword | TokenKind::BoolKeyword | TokenKind::StringKeyword,
            ) => true,
            Some(TokenKind::Identifier(_)) => match self.peek_at(1) {
                Some(TokenKind::Identifier(_)) => true,
                Some(TokenKind::LeftBracket) => matches!(self.peek_at(2), Some(TokenKind::RightBracket)),
                _ => false,
            },
            _ => false,
        }
    }

    fn parse_stmt(&mut self) -> ParseResult<StmtId> {
        match self.peek() {
            Some(TokenKind::IfKeyword) => self.parse_if(),
            Some(TokenKind::WhileKeyword) => self.parse_while(),
            Some(TokenKind::ForKeyword) => self.parse_for(),
            Some(TokenKind::BreakKeyword) => {
                let span = self.advance().0;
                let end = self.expect(TokenKind::Semicolon)?;
                Ok(self.ast.add_stmt(Stmt::new(StmtKind::Break, &span + &end)))
            }
            Some(TokenKind::ReturnKeyword) => {
                let span = self.advance().0;
                let expr = if self.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                let end = self.expect(TokenKind::Semicolon)?;
                Ok(self.ast.add_stmt(Stmt::new(StmtKind::Return { expr }, &span + &end)))
            }
            Some(TokenKind::PrintKeyword) => self.parse_print(),
            Some(TokenKind::LeftBrace) => self.parse_block(),
            Some(TokenKind::Semicolon) => {
                // An empty statement. Represented as an empty block so it has a node.
                let span = self.advance().0;
                Ok(self.ast.add_stmt(Stmt::new(
                    StmtKind::Block {
                        decls: Vec::new(),
                        stmts: Vec::new(),
                    },
                    span,
                )))
            }
            _ => {
                let expr = self.parse_expr()?;
                let span = self.ast.expr(expr).span.clone();
                let end = self.expect(TokenKind::Semicolon)?;
                Ok(self.ast.add_stmt(Stmt::new(StmtKind::Expr(expr), &span + &end)))
            }
        }
    }

    fn parse_if(&mut self) -> ParseResult<StmtId> {
        let span = self.expect(TokenKind::IfKeyword)?;
        self.expect(TokenKind::LeftParen)?;
        let test = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        let then_body = self.parse_stmt()?;

        // `else` binds to the nearest `if`.
        let else_body = if self.advance_if(&TokenKind::ElseKeyword) {
            Some(self.parse_stmt()?)
        } else {
            None
        };

        let end_span = self.ast.stmt(else_body.unwrap_or(then_body)).span.clone();
        Ok(self.ast.add_stmt(Stmt::new(
            StmtKind::If {
                test,
                then_body,
                else_body,
            },
            &span + &end_span,
        )))
    }

    fn parse_while(&mut self) -> ParseResult<StmtId> {
        let span = self.expect(TokenKind::WhileKeyword)?;
        self.expect(TokenKind::LeftParen)?;
        let test = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        let body = self.parse_stmt()?;

        let end_span = self.ast.stmt(body).span.clone();
        Ok(self
            .ast
            .add_stmt(Stmt::new(StmtKind::While { test, body }, &span + &end_span)))
    }

    fn parse_for(&mut self) -> ParseResult<StmtId> {
        let span = self.expect(TokenKind::ForKeyword)?;
        self.expect(TokenKind::LeftParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let test = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        let step = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RightParen)?;

        let body = self.parse_stmt()?;
        let end_span = self.ast.stmt(body).span.clone();
        Ok(self.ast.add_stmt(Stmt::new(
            StmtKind::For { init, test, step, body },
            &span + &end_span,
        )))
    }

    fn parse_print(&mut self) -> ParseResult<StmtId> {
        let span = self.expect(TokenKind::PrintKeyword)?;
        self.expect(TokenKind::LeftParen)?;

        let mut args = vec![self.parse_expr()?];
        while self.advance_if(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }

        self.expect(TokenKind::RightParen)?;
        let end = self.expect(TokenKind::Semicolon)?;
        Ok(self.ast.add_stmt(Stmt::new(StmtKind::Print { args }, &span + &end)))
    }

    // ----------------  Expressions ---------------- //

    fn parse_expr(&mut self) -> ParseResult<ExprId> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<ExprId> {
        let left = self.parse_or()?;

        if self.check(&TokenKind::Assign) {
            let op_span = self.advance().0;
            let op = Operator::new("=", op_span);

            // Only field accesses and array accesses are assignable.
            if !matches!(
                self.ast.expr(left).kind,
                ExprKind::FieldAccess { .. } | ExprKind::ArrayAccess { .. }
            ) {
                let span = self.ast.expr(left).span.clone();
                Diagnostic::new(Error::Syntax {
                    message: "the left side of an assignment must be a variable, field, or array element".to_owned(),
                })
                .set_span(&span)
                .push_into(self.diagnostics);
                return Err(ParseAborted);
            }

            let right = self.parse_assignment()?;
            return Ok(self.join_exprs(ExprKind::Assign { op, left, right }, left, right));
        }

        Ok(left)
    }

    fn parse_or(&mut self) -> ParseResult<ExprId> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::BarBar) {
            let op = Operator::new("||", self.advance().0);
            let right = self.parse_and()?;
            left = self.join_exprs(
                ExprKind::Logical {
                    op,
                    left: Some(left),
                    right,
                },
                left,
                right,
            );
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<ExprId> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            let op = Operator::new("&&", self.advance().0);
            let right = self.parse_equality()?;
            left = self.join_exprs(
                ExprKind::Logical {
                    op,
                    left: Some(left),
                    right,
                },
                left,
                right,
            );
        }
        Ok(left)
    }

    /// Equality is non-associative: `a == b == c` is a syntax error downstream, because the
    /// production consumes at most one operator.
    fn parse_equality(&mut self) -> ParseResult<ExprId> {
        let left = self.parse_relational()?;
        let lexeme = match self.peek() {
            Some(TokenKind::EqualEqual) => "==",
            Some(TokenKind::BangEqual) => "!=",
            _ => return Ok(left),
        };
        let op = Operator::new(lexeme, self.advance().0);
        let right = self.parse_relational()?;
        Ok(self.join_exprs(ExprKind::Equality { op, left, right }, left, right))
    }

    /// Relational operators are non-associative, like equality.
    fn parse_relational(&mut self) -> ParseResult<ExprId> {
        let left = self.parse_additive()?;
        let lexeme = match self.peek() {
            Some(TokenKind::Less) => "<",
            Some(TokenKind::LessEqual) => "<=",
            Some(TokenKind::Greater) => ">",
            Some(TokenKind::GreaterEqual) => ">=",
            _ => return Ok(left),
        };
        let op = Operator::new(lexeme, self.advance().0);
        let right = self.parse_additive()?;
        Ok(self.join_exprs(ExprKind::Relational { op, left, right }, left, right))
    }

    fn parse_additive(&mut self) -> ParseResult<ExprId> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let lexeme = match self.peek() {
                Some(TokenKind::Plus) => "+",
                Some(TokenKind::Minus) => "-",
                _ => return Ok(left),
            };
            let op = Operator::new(lexeme, self.advance().0);
            let right = self.parse_multiplicative()?;
            left = self.join_exprs(
                ExprKind::Arithmetic {
                    op,
                    left: Some(left),
                    right,
                },
                left,
                right,
            );
        }
    }

    fn parse_multiplicative(&mut self) -> ParseResult<ExprId> {
        let mut left = self.parse_unary()?;
        loop {
            let lexeme = match self.peek() {
                Some(TokenKind::Star) => "*",
                Some(TokenKind::Slash) => "/",
                Some(TokenKind::Percent) => "%",
                _ => return Ok(left),
            };
            let op = Operator::new(lexeme, self.advance().0);
            let right = self.parse_unary()?;
            left = self.join_exprs(
                ExprKind::Arithmetic {
                    op,
                    left: Some(left),
                    right,
                },
                left,
                right,
            );
        }
    }

    fn parse_unary(&mut self) -> ParseResult<ExprId> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                let op_span = self.advance().0;
                let right = self.parse_unary()?;
                let span = &op_span + &self.ast.expr(right).span.clone();
                Ok(self.ast.add_expr(Expr::new(
                    ExprKind::Arithmetic {
                        op: Operator::new("-", op_span),
                        left: None,
                        right,
                    },
                    span,
                )))
            }
            Some(TokenKind::Bang) => {
                let op_span = self.advance().0;
                let right = self.parse_unary()?;
                let span = &op_span + &self.ast.expr(right).span.clone();
                Ok(self.ast.add_expr(Expr::new(
                    ExprKind::Logical {
                        op: Operator::new("!", op_span),
                        left: None,
                        right,
                    },
                    span,
                )))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> ParseResult<ExprId> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.advance_if(&TokenKind::Dot) {
                let field = self.expect_identifier()?;
                if self.check(&TokenKind::LeftParen) {
                    let (actuals, close_span) = self.parse_actuals()?;
                    let span = &self.ast.expr(expr).span.clone() + &close_span;
                    expr = self.ast.add_expr(Expr::new(
                        ExprKind::Call {
                            base: Some(expr),
                            field,
                            actuals,
                        },
                        span,
                    ));
                } else {
                    let span = &self.ast.expr(expr).span.clone() + &field.span;
                    expr = self
                        .ast
                        .add_expr(Expr::new(ExprKind::FieldAccess { base: Some(expr), field }, span));
                }
            } else if self.check(&TokenKind::LeftBracket) {
                self.advance();
                let subscript = self.parse_expr()?;
                let close_span = self.expect(TokenKind::RightBracket)?;
                let span = &self.ast.expr(expr).span.clone() + &close_span;
                expr = self
                    .ast
                    .add_expr(Expr::new(ExprKind::ArrayAccess { base: expr, subscript }, span));
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<ExprId> {
        match self.peek() {
            Some(&TokenKind::IntegerLiteral(value)) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::IntConstant(value), span)))
            }
            Some(&TokenKind::DoubleLiteral(value)) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::DoubleConstant(value), span)))
            }
            Some(TokenKind::TrueKeyword) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::BoolConstant(true), span)))
            }
            Some(TokenKind::FalseKeyword) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::BoolConstant(false), span)))
            }
            Some(TokenKind::StringLiteral(value)) => {
                let value = value.to_string();
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::StringConstant(value), span)))
            }
            Some(TokenKind::NullKeyword) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::NullConstant, span)))
            }
            Some(TokenKind::ThisKeyword) => {
                let span = self.advance().0;
                Ok(self.ast.add_expr(Expr::new(ExprKind::This, span)))
            }
            Some(TokenKind::ReadIntegerKeyword) => {
                let span = self.advance().0;
                self.expect(TokenKind::LeftParen)?;
                let close_span = self.expect(TokenKind::RightParen)?;
                Ok(self
                    .ast
                    .add_expr(Expr::new(ExprKind::ReadInteger, &span + &close_span)))
            }
            Some(TokenKind::ReadLineKeyword) => {
                let span = self.advance().0;
                self.expect(TokenKind::LeftParen)?;
                let close_span = self.expect(TokenKind::RightParen)?;
                Ok(self.ast.add_expr(Expr::new(ExprKind::ReadLine, &span + &close_span)))
            }
            Some(TokenKind::NewKeyword) => {
                let span = self.advance().0;
                let class = self.expect_identifier()?;
                let span = &span + &class.span;
                Ok(self.ast.add_expr(Expr::new(ExprKind::New { class }, span)))
            }
            Some(TokenKind::NewArrayKeyword) => {
                let span = self.advance().0;
                self.expect(TokenKind::LeftParen)?;
                let size = self.parse_expr()?;
                self.expect(TokenKind::Comma)?;
                let element = self.parse_type()?;
                let close_span = self.expect(TokenKind::RightParen)?;
                Ok(self
                    .ast
                    .add_expr(Expr::new(ExprKind::NewArray { size, element }, &span + &close_span)))
            }
            Some(TokenKind::LeftParen) => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                Ok(expr)
            }
            Some(TokenKind::Identifier(_)) => {
                let field = self.expect_identifier()?;
                if self.check(&TokenKind::LeftParen) {
                    let (actuals, close_span) = self.parse_actuals()?;
                    let span = &field.span + &close_span;
                    Ok(self.ast.add_expr(Expr::new(
                        ExprKind::Call {
                            base: None,
                            field,
                            actuals,
                        },
                        span,
                    )))
                } else {
                    let span = field.span.clone();
                    Ok(self
                        .ast
                        .add_expr(Expr::new(ExprKind::FieldAccess { base: None, field }, span)))
                }
            }
            _ => Err(self.expected("an expression")),
        }
    }

    /// Parses a parenthesized, comma-separated, possibly empty argument list.
    /// Returns the arguments and the span of the closing parenthesis.
    fn parse_actuals(&mut self) -> ParseResult<(Vec<ExprId>, Span)> {
        self.expect(TokenKind::LeftParen)?;
        let mut actuals = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                actuals.push(self.parse_expr()?);
                if !self.advance_if(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let close_span = self.expect(TokenKind::RightParen)?;
        Ok((actuals, close_span))
    }

    /// Adds a binary expression node spanning from `left`'s start to `right`'s end.
    fn join_exprs(&mut self, kind: ExprKind, left: ExprId, right: ExprId) -> ExprId {
        let span = &self.ast.expr(left).span.clone() + &self.ast.expr(right).span.clone();
        self.ast.add_expr(Expr::new(kind, span))
    }
}
