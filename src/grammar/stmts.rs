// Copyright (c) ZeroC, Inc.

use crate::ast::{DeclId, ExprId, NodeRef, StmtId};
use crate::scope::ScopeId;
use crate::source_file::Span;

/// A statement node.
#[derive(Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    /// Back-link to the owning node, patched in after parsing.
    pub parent: Option<NodeRef>,
    /// The scope the statement executes in, set when the analyzer enters it.
    pub scope: Option<ScopeId>,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt {
            kind,
            span,
            parent: None,
            scope: None,
        }
    }

    /// Returns true if this statement is a loop (the targets `break` jumps out of).
    pub fn is_loop(&self) -> bool {
        matches!(self.kind, StmtKind::While { .. } | StmtKind::For { .. })
    }
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    /// A brace-delimited block: variable declarations followed by statements.
    Block {
        decls: Vec<DeclId>,
        stmts: Vec<StmtId>,
    },
    If {
        test: ExprId,
        then_body: StmtId,
        else_body: Option<StmtId>,
    },
    While {
        test: ExprId,
        body: StmtId,
    },
    For {
        init: Option<ExprId>,
        test: ExprId,
        step: Option<ExprId>,
        body: StmtId,
    },
    Break,
    Return {
        expr: Option<ExprId>,
    },
    Print {
        args: Vec<ExprId>,
    },
    Expr(ExprId),
}
