// Copyright (c) ZeroC, Inc.

//! The AST is the heart of the compiler. It centralizes ownership of every declaration,
//! statement, and expression in a set of flattened arenas, and hands out typed indices for nodes
//! to reference each other with.
//!
//! There is a single `Ast` per compilation. It is populated by the parser, annotated in place by
//! the analyzer (attached scopes, resolved types, shadow types) and by the code generator (memory
//! locations, class layouts), and lives until the compilation ends. Parent links are plain
//! back-references used only for upward walks; they never own anything, so the tree has no
//! ownership cycles.

use crate::grammar::{Decl, DeclKind, Expr, Stmt, StmtKind};

/// Index of a [declaration](Decl) in the AST.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DeclId(usize);

/// Index of a [statement](Stmt) in the AST.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StmtId(usize);

/// Index of an [expression](Expr) in the AST.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ExprId(usize);

/// A reference to any kind of AST node. Parent back-links have this type, since a node's owner
/// can be a declaration (function bodies), a statement (block contents), or an expression
/// (operands).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeRef {
    Decl(DeclId),
    Stmt(StmtId),
    Expr(ExprId),
}

#[derive(Debug, Default)]
pub struct Ast {
    decls: Vec<Decl>,
    stmts: Vec<Stmt>,
    exprs: Vec<Expr>,
    /// The top-level declarations, in source order.
    program: Vec<DeclId>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn add_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.push(decl);
        DeclId(self.decls.len() - 1)
    }

    pub fn add_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.stmts.push(stmt);
        StmtId(self.stmts.len() - 1)
    }

    pub fn add_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.push(expr);
        ExprId(self.exprs.len() - 1)
    }

    pub fn add_top_level_decl(&mut self, decl: DeclId) {
        self.program.push(decl);
    }

    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0]
    }

    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.0]
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.0]
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.0]
    }

    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.0]
    }

    /// The top-level declarations of the program, in source order.
    pub fn program(&self) -> &[DeclId] {
        &self.program
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    pub fn parent_of(&self, node: NodeRef) -> Option<NodeRef> {
        match node {
            NodeRef::Decl(id) => self.decl(id).parent,
            NodeRef::Stmt(id) => self.stmt(id).parent,
            NodeRef::Expr(id) => self.expr(id).parent,
        }
    }

    /// Walks the parent chain looking for the enclosing class declaration.
    /// Used to resolve implicit and explicit `this`.
    pub fn enclosing_class(&self, node: NodeRef) -> Option<DeclId> {
        self.walk_parents(node, |ast, candidate| ast.decl(candidate).is_class())
    }

    /// Walks the parent chain looking for the enclosing function declaration.
    /// Used to check `return` statements against the function's return type.
    pub fn enclosing_function(&self, node: NodeRef) -> Option<DeclId> {
        self.walk_parents(node, |ast, candidate| ast.decl(candidate).is_function())
    }

    /// Walks the parent chain looking for an enclosing loop statement.
    /// Used to validate `break` statements.
    pub fn enclosing_loop(&self, node: NodeRef) -> Option<StmtId> {
        let mut current = Some(node);
        while let Some(node) = current {
            if let NodeRef::Stmt(id) = node {
                if self.stmt(id).is_loop() {
                    return Some(id);
                }
            }
            current = self.parent_of(node);
        }
        None
    }

    fn walk_parents(&self, node: NodeRef, matches: impl Fn(&Ast, DeclId) -> bool) -> Option<DeclId> {
        let mut current = Some(node);
        while let Some(node) = current {
            if let NodeRef::Decl(id) = node {
                if matches(self, id) {
                    return Some(id);
                }
            }
            current = self.parent_of(node);
        }
        None
    }

    /// Patches parent back-links over the entire tree. The parser builds nodes bottom-up, so
    /// children exist before the nodes that own them; once the whole program is built this pass
    /// walks it top-down and records each node's owner.
    pub fn patch_parents(&mut self) {
        for i in 0..self.program.len() {
            let decl = self.program[i];
            self.patch_decl(decl, None);
        }
    }

    fn patch_decl(&mut self, id: DeclId, parent: Option<NodeRef>) {
        self.decl_mut(id).parent = parent;
        let this = NodeRef::Decl(id);

        match &self.decl(id).kind {
            DeclKind::Variable(_) => {}
            DeclKind::Function(function) => {
                let formals = function.formals.clone();
                let body = function.body;
                for formal in formals {
                    self.patch_decl(formal, Some(this));
                }
                if let Some(body) = body {
                    self.patch_stmt(body, this);
                }
            }
            DeclKind::Class(class) => {
                for member in class.members.clone() {
                    self.patch_decl(member, Some(this));
                }
            }
            DeclKind::Interface(interface) => {
                for member in interface.members.clone() {
                    self.patch_decl(member, Some(this));
                }
            }
        }
    }

    fn patch_stmt(&mut self, id: StmtId, parent: NodeRef) {
        self.stmt_mut(id).parent = Some(parent);
        let this = NodeRef::Stmt(id);

        match self.stmt(id).kind.clone() {
            StmtKind::Block { decls, stmts } => {
                for decl in decls {
                    self.patch_decl(decl, Some(this));
                }
                for stmt in stmts {
                    self.patch_stmt(stmt, this);
                }
            }
            StmtKind::If {
                test,
                then_body,
                else_body,
            } => {
                self.patch_expr(test, this);
                self.patch_stmt(then_body, this);
                if let Some(else_body) = else_body {
                    self.patch_stmt(else_body, this);
                }
            }
            StmtKind::While { test, body } => {
                self.patch_expr(test, this);
                self.patch_stmt(body, this);
            }
            StmtKind::For { init, test, step, body } => {
                if let Some(init) = init {
                    self.patch_expr(init, this);
                }
                self.patch_expr(test, this);
                if let Some(step) = step {
                    self.patch_expr(step, this);
                }
                self.patch_stmt(body, this);
            }
            StmtKind::Break => {}
            StmtKind::Return { expr } => {
                if let Some(expr) = expr {
                    self.patch_expr(expr, this);
                }
            }
            StmtKind::Print { args } => {
                for arg in args {
                    self.patch_expr(arg, this);
                }
            }
            StmtKind::Expr(expr) => self.patch_expr(expr, this),
        }
    }

    fn patch_expr(&mut self, id: ExprId, parent: NodeRef) {
        use crate::grammar::ExprKind;

        self.expr_mut(id).parent = Some(parent);
        let this = NodeRef::Expr(id);

        match self.expr(id).kind.clone() {
            ExprKind::IntConstant(_)
            | ExprKind::DoubleConstant(_)
            | ExprKind::BoolConstant(_)
            | ExprKind::StringConstant(_)
            | ExprKind::NullConstant
            | ExprKind::This
            | ExprKind::ReadInteger
            | ExprKind::ReadLine
            | ExprKind::New { .. } => {}
            ExprKind::Arithmetic { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                if let Some(left) = left {
                    self.patch_expr(left, this);
                }
                self.patch_expr(right, this);
            }
            ExprKind::Relational { left, right, .. }
            | ExprKind::Equality { left, right, .. }
            | ExprKind::Assign { left, right, .. } => {
                self.patch_expr(left, this);
                self.patch_expr(right, this);
            }
            ExprKind::ArrayAccess { base, subscript } => {
                self.patch_expr(base, this);
                self.patch_expr(subscript, this);
            }
            ExprKind::FieldAccess { base, .. } => {
                if let Some(base) = base {
                    self.patch_expr(base, this);
                }
            }
            ExprKind::Call { base, actuals, .. } => {
                if let Some(base) = base {
                    self.patch_expr(base, this);
                }
                for actual in actuals {
                    self.patch_expr(actual, this);
                }
            }
            ExprKind::NewArray { size, .. } => self.patch_expr(size, this),
        }
    }
}
