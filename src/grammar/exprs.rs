// Copyright (c) ZeroC, Inc.

use super::{Identifier, Type};
use crate::ast::{ExprId, NodeRef};
use crate::scope::ScopeId;
use crate::source_file::Span;

/// An expression node.
///
/// Every expression carries a `resolved_type` annotation. It starts out as the absorbing `error`
/// type and is set exactly once, when the analyzer checks the expression in P5.
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Back-link to the owning node, patched in after parsing.
    pub parent: Option<NodeRef>,
    /// The scope the expression's names resolve in, set during analysis. For qualified accesses
    /// this is the class scope the member was found in, not the lexically enclosing scope.
    pub scope: Option<ScopeId>,
    pub resolved_type: Type,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            parent: None,
            scope: None,
            resolved_type: Type::Error,
        }
    }
}

/// An operator token: a 1-to-4-character lexeme. The analyzer and the code generator compare
/// operators by their lexeme strings.
#[derive(Clone, Debug)]
pub struct Operator {
    pub lexeme: String,
    pub span: Span,
}

impl Operator {
    pub fn new(lexeme: impl Into<String>, span: Span) -> Self {
        Operator {
            lexeme: lexeme.into(),
            span,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    IntConstant(i32),
    DoubleConstant(f64),
    BoolConstant(bool),
    StringConstant(String),
    NullConstant,
    This,
    ReadInteger,
    ReadLine,

    /// `+ - * / %`, or unary minus when `left` is absent.
    Arithmetic {
        op: Operator,
        left: Option<ExprId>,
        right: ExprId,
    },
    /// `< <= > >=`.
    Relational {
        op: Operator,
        left: ExprId,
        right: ExprId,
    },
    /// `== !=`.
    Equality {
        op: Operator,
        left: ExprId,
        right: ExprId,
    },
    /// `&& ||`, or unary `!` when `left` is absent.
    Logical {
        op: Operator,
        left: Option<ExprId>,
        right: ExprId,
    },
    Assign {
        op: Operator,
        left: ExprId,
        right: ExprId,
    },
    ArrayAccess {
        base: ExprId,
        subscript: ExprId,
    },
    /// A field mention, qualified (`base.field`) or bare (`field`). A bare mention may turn out
    /// to be a local, a parameter, a global, or an implicit `this.field`; the analyzer decides.
    FieldAccess {
        base: Option<ExprId>,
        field: Identifier,
    },
    /// A call, qualified (`base.method(...)`) or bare (`function(...)`), with the same implicit
    /// `this` treatment as field accesses.
    Call {
        base: Option<ExprId>,
        field: Identifier,
        actuals: Vec<ExprId>,
    },
    New {
        class: Identifier,
    },
    NewArray {
        size: ExprId,
        element: Type,
    },
}
