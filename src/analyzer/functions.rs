// Copyright (c) ZeroC, Inc.

//! Phase P5: walking function bodies. Statements are checked recursively; every expression
//! computes and stores its resolved type.

use super::Analyzer;
use crate::ast::{DeclId, ExprId, NodeRef, StmtId};
use crate::diagnostics::{Error, LookingFor};
use crate::grammar::*;
use crate::scope::ScopeId;

impl Analyzer<'_> {
    /// P5 for one top-level declaration. Global function bodies run in the formals scope built
    /// during P2; method bodies get a fresh scope under the class scope, with the formals
    /// inserted and checked here.
    pub(super) fn check_functions(&mut self, decl: DeclId) {
        match &self.ast.decl(decl).kind {
            DeclKind::Function(function) => {
                if let (Some(body), Some(scope)) = (function.body, function.body_scope) {
                    self.check_stmt(body, scope);
                }
            }
            DeclKind::Class(class) => {
                let members = class.members.clone();
                let class_scope = class.members_scope;

                for member in members {
                    let body = match self.ast.decl(member).as_function() {
                        Some(function) => function.body,
                        None => continue,
                    };
                    let Some(body) = body else { continue };

                    let parent_scope = class_scope.unwrap_or(self.scopes.root());
                    let scope = self.scopes.push(parent_scope);
                    if let Some(function) = self.ast.decl_mut(member).as_function_mut() {
                        function.body_scope = Some(scope);
                    }
                    self.setup_formals(member, scope);
                    self.check_stmt(body, scope);
                }
            }
            DeclKind::Variable(_) | DeclKind::Interface(_) => {}
        }
    }

    // ----------------  Statements ---------------- //

    fn check_stmt(&mut self, stmt: StmtId, scope: ScopeId) {
        self.ast.stmt_mut(stmt).scope = Some(scope);

        match self.ast.stmt(stmt).kind.clone() {
            StmtKind::Block { decls, stmts } => {
                let block_scope = self.scopes.push(scope);
                for decl in decls {
                    self.declare(block_scope, decl);
                    self.ast.decl_mut(decl).scope = Some(block_scope);

                    let declared = match self.ast.decl(decl).as_variable() {
                        Some(variable) => variable.declared_type.clone(),
                        None => continue,
                    };
                    if !self.check_type_exists(&declared) {
                        if let Some(variable) = self.ast.decl_mut(decl).as_variable_mut() {
                            variable.shadow_type = Type::Error;
                        }
                    }
                }
                for stmt in stmts {
                    self.check_stmt(stmt, block_scope);
                }
            }
            StmtKind::If {
                test,
                then_body,
                else_body,
            } => {
                let if_scope = self.scopes.push(scope);
                self.check_test(test, if_scope);
                self.check_stmt(then_body, if_scope);
                if let Some(else_body) = else_body {
                    self.check_stmt(else_body, if_scope);
                }
            }
            StmtKind::While { test, body } => {
                let loop_scope = self.scopes.push(scope);
                self.check_test(test, loop_scope);
                self.check_stmt(body, loop_scope);
            }
            StmtKind::For { init, test, step, body } => {
                let loop_scope = self.scopes.push(scope);
                if let Some(init) = init {
                    self.check_expr(init, loop_scope);
                }
                self.check_test(test, loop_scope);
                if let Some(step) = step {
                    self.check_expr(step, loop_scope);
                }
                self.check_stmt(body, loop_scope);
            }
            StmtKind::Break => {
                if self.ast.enclosing_loop(NodeRef::Stmt(stmt)).is_none() {
                    let span = self.ast.stmt(stmt).span.clone();
                    self.report(Error::BreakOutsideLoop, &span);
                }
            }
            StmtKind::Return { expr } => {
                let given = match expr {
                    Some(expr) => self.check_expr(expr, scope),
                    None => Type::Void,
                };
                let Some(function) = self.ast.enclosing_function(NodeRef::Stmt(stmt)) else {
                    return;
                };
                let expected = match self.ast.decl(function).as_function() {
                    Some(function) => function.return_type.clone(),
                    None => return,
                };
                if !self.convertible(&given, &expected) {
                    let span = match expr {
                        Some(expr) => self.ast.expr(expr).span.clone(),
                        None => self.ast.stmt(stmt).span.clone(),
                    };
                    self.report(
                        Error::ReturnMismatch {
                            given: given.to_string(),
                            expected: expected.to_string(),
                        },
                        &span,
                    );
                }
            }
            StmtKind::Print { args } => {
                for (position, arg) in args.into_iter().enumerate() {
                    let given = self.check_expr(arg, scope);
                    let printable = self.convertible(&given, &Type::Int)
                        || self.convertible(&given, &Type::Bool)
                        || self.convertible(&given, &Type::String);
                    if !printable {
                        let span = self.ast.expr(arg).span.clone();
                        self.report(
                            Error::PrintArgMismatch {
                                position: position + 1,
                                given: given.to_string(),
                            },
                            &span,
                        );
                    }
                }
            }
            StmtKind::Expr(expr) => {
                self.check_expr(expr, scope);
            }
        }
    }

    fn check_test(&mut self, test: ExprId, scope: ScopeId) {
        let given = self.check_expr(test, scope);
        if !self.convertible(&given, &Type::Bool) {
            let span = self.ast.expr(test).span.clone();
            self.report(Error::TestNotBoolean, &span);
        }
    }

    // ----------------  Expressions ---------------- //

    /// Checks an expression, stores its resolved type on the node, and returns it.
    fn check_expr(&mut self, expr: ExprId, scope: ScopeId) -> Type {
        self.ast.expr_mut(expr).scope = Some(scope);

        let resolved = match self.ast.expr(expr).kind.clone() {
            ExprKind::IntConstant(_) => Type::Int,
            ExprKind::DoubleConstant(_) => Type::Double,
            ExprKind::BoolConstant(_) => Type::Bool,
            ExprKind::StringConstant(_) => Type::String,
            ExprKind::NullConstant => Type::Null,
            ExprKind::ReadInteger => Type::Int,
            ExprKind::ReadLine => Type::String,
            ExprKind::This => self.check_this(expr, scope),
            ExprKind::Arithmetic { op, left, right } => self.check_arithmetic(&op, left, right, scope),
            ExprKind::Relational { op, left, right } => self.check_relational(&op, left, right, scope),
            ExprKind::Equality { op, left, right } => self.check_equality(&op, left, right, scope),
            ExprKind::Logical { op, left, right } => self.check_logical(&op, left, right, scope),
            ExprKind::Assign { op, left, right } => self.check_assign(&op, left, right, scope),
            ExprKind::ArrayAccess { base, subscript } => self.check_array_access(base, subscript, scope),
            ExprKind::FieldAccess { base, field } => self.check_field_access(expr, base, &field, scope),
            ExprKind::Call { base, field, actuals } => self.check_call(base, &field, &actuals, scope),
            ExprKind::New { class } => self.check_new(&class),
            ExprKind::NewArray { size, element } => self.check_new_array(size, &element, scope),
        };

        self.ast.expr_mut(expr).resolved_type = resolved.clone();
        resolved
    }

    fn check_this(&mut self, expr: ExprId, scope: ScopeId) -> Type {
        if !self.scopes.is_in_class_scope(scope) {
            let span = self.ast.expr(expr).span.clone();
            self.report(Error::ThisOutsideClassScope, &span);
            return Type::Error;
        }
        match self.ast.enclosing_class(NodeRef::Expr(expr)) {
            Some(class) => Type::Named(self.ast.decl(class).id.clone()),
            None => Type::Error,
        }
    }

    fn check_arithmetic(&mut self, op: &Operator, left: Option<ExprId>, right: ExprId, scope: ScopeId) -> Type {
        let Some(left) = left else {
            // Unary minus.
            let operand = self.check_expr(right, scope);
            if self.convertible(&operand, &Type::Int) {
                return Type::Int;
            }
            if self.convertible(&operand, &Type::Double) {
                return Type::Double;
            }
            self.report(
                Error::IncompatibleOperand {
                    operator: op.lexeme.clone(),
                    operand: operand.to_string(),
                },
                &op.span,
            );
            return Type::Error;
        };

        let l = self.check_expr(left, scope);
        let r = self.check_expr(right, scope);
        if self.convertible(&l, &Type::Int) && self.convertible(&r, &Type::Int) {
            Type::Int
        } else if self.convertible(&l, &Type::Double) && self.convertible(&r, &Type::Double) {
            Type::Double
        } else {
            self.report(
                Error::IncompatibleOperands {
                    operator: op.lexeme.clone(),
                    left: l.to_string(),
                    right: r.to_string(),
                },
                &op.span,
            );
            Type::Error
        }
    }

    fn check_relational(&mut self, op: &Operator, left: ExprId, right: ExprId, scope: ScopeId) -> Type {
        let l = self.check_expr(left, scope);
        let r = self.check_expr(right, scope);

        let both_ints = self.convertible(&l, &Type::Int) && self.convertible(&r, &Type::Int);
        let both_doubles = self.convertible(&l, &Type::Double) && self.convertible(&r, &Type::Double);
        if both_ints || both_doubles {
            Type::Bool
        } else {
            self.report(
                Error::IncompatibleOperands {
                    operator: op.lexeme.clone(),
                    left: l.to_string(),
                    right: r.to_string(),
                },
                &op.span,
            );
            Type::Error
        }
    }

    fn check_equality(&mut self, op: &Operator, left: ExprId, right: ExprId, scope: ScopeId) -> Type {
        let l = self.check_expr(left, scope);
        let r = self.check_expr(right, scope);

        if self.convertible(&l, &r) || self.convertible(&r, &l) {
            Type::Bool
        } else {
            self.report(
                Error::IncompatibleOperands {
                    operator: op.lexeme.clone(),
                    left: l.to_string(),
                    right: r.to_string(),
                },
                &op.span,
            );
            Type::Error
        }
    }

    fn check_logical(&mut self, op: &Operator, left: Option<ExprId>, right: ExprId, scope: ScopeId) -> Type {
        let Some(left) = left else {
            // Unary not.
            let operand = self.check_expr(right, scope);
            if self.convertible(&operand, &Type::Bool) {
                return Type::Bool;
            }
            self.report(
                Error::IncompatibleOperand {
                    operator: op.lexeme.clone(),
                    operand: operand.to_string(),
                },
                &op.span,
            );
            return Type::Error;
        };

        let l = self.check_expr(left, scope);
        let r = self.check_expr(right, scope);
        if self.convertible(&l, &Type::Bool) && self.convertible(&r, &Type::Bool) {
            Type::Bool
        } else {
            self.report(
                Error::IncompatibleOperands {
                    operator: op.lexeme.clone(),
                    left: l.to_string(),
                    right: r.to_string(),
                },
                &op.span,
            );
            Type::Error
        }
    }

    /// The right side must convert to the left. The expression resolves to the left type even on
    /// failure, so one bad assignment doesn't cascade.
    ///
    /// A well-typed assignment of a named-type value into a named-type variable narrows the
    /// variable's shadow type to the right side's type, which is what lets later member lookups
    /// see through a downcast.
    fn check_assign(&mut self, op: &Operator, left: ExprId, right: ExprId, scope: ScopeId) -> Type {
        let l = self.check_expr(left, scope);
        let r = self.check_expr(right, scope);

        let convertible = self.convertible(&r, &l);
        if !convertible {
            self.report(
                Error::IncompatibleOperands {
                    operator: op.lexeme.clone(),
                    left: l.to_string(),
                    right: r.to_string(),
                },
                &op.span,
            );
        }

        if convertible && r.is_named() {
            if let ExprKind::FieldAccess { field, .. } = self.ast.expr(left).kind.clone() {
                if let Some(target) = self.scopes.search(scope, &field.name) {
                    if let Some(variable) = self.ast.decl_mut(target).as_variable_mut() {
                        if variable.declared_type.is_named() {
                            variable.shadow_type = r.clone();
                        }
                    }
                }
            }
        }

        l
    }

    fn check_array_access(&mut self, base: ExprId, subscript: ExprId, scope: ScopeId) -> Type {
        let base_type = self.check_expr(base, scope);
        let subscript_type = self.check_expr(subscript, scope);

        let result = match &base_type {
            Type::Array(element) => (**element).clone(),
            // An ill-typed base already reported; don't pile on.
            Type::Error => Type::Error,
            _ => {
                let span = self.ast.expr(base).span.clone();
                self.report(Error::BracketsOnNonArray, &span);
                Type::Error
            }
        };

        if !self.convertible(&subscript_type, &Type::Int) {
            let span = self.ast.expr(subscript).span.clone();
            self.report(Error::SubscriptNotInteger, &span);
        }

        result
    }

    fn check_field_access(&mut self, expr: ExprId, base: Option<ExprId>, field: &Identifier, scope: ScopeId) -> Type {
        // A bare name resolves in the current scope chain and must name a variable.
        let Some(base) = base else {
            let Some(decl) = self.scopes.search(scope, &field.name) else {
                self.report(
                    Error::IdentifierNotDeclared {
                        identifier: field.name.clone(),
                        looking_for: LookingFor::Variable,
                    },
                    &field.span,
                );
                return Type::Error;
            };
            if self.ast.decl(decl).is_function() {
                self.report(
                    Error::IdentifierNotDeclared {
                        identifier: field.name.clone(),
                        looking_for: LookingFor::Variable,
                    },
                    &field.span,
                );
                return Type::Error;
            }
            return self.ast.decl(decl).resolved_type();
        };

        let base_type = self.check_expr(base, scope);
        if base_type.is_error() {
            return Type::Error;
        }

        let Some(member_scope) = self.scope_for_base(base, &base_type) else {
            self.report(
                Error::FieldNotFoundInBase {
                    field: field.name.clone(),
                    base_type: base_type.to_string(),
                },
                &field.span,
            );
            return Type::Error;
        };

        let Some(member) = self.scopes.search(member_scope, &field.name) else {
            self.report(
                Error::FieldNotFoundInBase {
                    field: field.name.clone(),
                    base_type: base_type.to_string(),
                },
                &field.span,
            );
            return Type::Error;
        };

        // Decaf forbids touching another object's fields from outside any class body.
        if !self.scopes.is_in_class_scope(scope) {
            self.report(
                Error::InaccessibleField {
                    field: field.name.clone(),
                    base_type: base_type.to_string(),
                },
                &field.span,
            );
            return Type::Error;
        }

        // The field's name resolved in the class scope, not the lexical one; record it.
        self.ast.expr_mut(expr).scope = Some(member_scope);
        self.ast.decl(member).resolved_type()
    }

    /// Finds the class (or interface) member scope a qualified access on `base` searches:
    /// the enclosing class for `this`, otherwise the scope of the base type's declaration.
    fn scope_for_base(&self, base: ExprId, base_type: &Type) -> Option<ScopeId> {
        if matches!(self.ast.expr(base).kind, ExprKind::This) {
            let class = self.ast.enclosing_class(NodeRef::Expr(base))?;
            return self.ast.decl(class).as_class().and_then(|class| class.members_scope);
        }

        let identifier = base_type.named_identifier()?;
        let decl = self.types.get(&identifier.name)?;
        match &self.ast.decl(decl).kind {
            DeclKind::Class(class) => class.members_scope,
            DeclKind::Interface(interface) => interface.members_scope,
            _ => None,
        }
    }

    fn check_call(&mut self, base: Option<ExprId>, field: &Identifier, actuals: &[ExprId], scope: ScopeId) -> Type {
        let base_type = match base {
            Some(base) => {
                let base_type = self.check_expr(base, scope);
                if base_type.is_error() {
                    // Still type the arguments so every expression gets a resolved type.
                    for &actual in actuals {
                        self.check_expr(actual, scope);
                    }
                    return Type::Error;
                }
                Some(base_type)
            }
            None => None,
        };

        // Argument diagnostics come before call-level diagnostics.
        let actual_types: Vec<Type> = actuals.iter().map(|&actual| self.check_expr(actual, scope)).collect();

        // arr.length() has no declaration behind it: zero arguments, int result.
        if let Some(base_type) = &base_type {
            if base_type.is_array() && field.name == "length" {
                if !actuals.is_empty() {
                    self.report(
                        Error::NumArgsMismatch {
                            function: field.name.clone(),
                            expected: 0,
                            given: actuals.len(),
                        },
                        &field.span,
                    );
                }
                return Type::Int;
            }
        }

        let base_type_string = base_type.as_ref().map(|ty| ty.to_string()).unwrap_or_default();
        let search_scope = match (base, &base_type) {
            (None, _) => Some(scope),
            (Some(base), Some(base_type)) => self.scope_for_base(base, base_type),
            _ => None,
        };
        let Some(search_scope) = search_scope else {
            self.report(
                Error::FieldNotFoundInBase {
                    field: field.name.clone(),
                    base_type: base_type_string,
                },
                &field.span,
            );
            return Type::Error;
        };

        let found = self
            .scopes
            .search(search_scope, &field.name)
            .filter(|&decl| self.ast.decl(decl).is_function());
        let Some(function) = found else {
            match base {
                None => self.report(
                    Error::IdentifierNotDeclared {
                        identifier: field.name.clone(),
                        looking_for: LookingFor::Function,
                    },
                    &field.span,
                ),
                Some(_) => self.report(
                    Error::FieldNotFoundInBase {
                        field: field.name.clone(),
                        base_type: base_type_string,
                    },
                    &field.span,
                ),
            }
            return Type::Error;
        };

        let (return_type, formals) = match self.ast.decl(function).as_function() {
            Some(function) => (function.return_type.clone(), function.formals.clone()),
            None => return Type::Error,
        };

        if actual_types.len() != formals.len() {
            self.report(
                Error::NumArgsMismatch {
                    function: field.name.clone(),
                    expected: formals.len(),
                    given: actual_types.len(),
                },
                &field.span,
            );
        }

        let checked = actual_types.len().min(formals.len());
        for position in 0..checked {
            let expected = match self.ast.decl(formals[position]).as_variable() {
                Some(variable) => variable.shadow_type.clone(),
                None => continue,
            };
            if !self.convertible(&actual_types[position], &expected) {
                let span = self.ast.expr(actuals[position]).span.clone();
                self.report(
                    Error::ArgMismatch {
                        position: position + 1,
                        given: actual_types[position].to_string(),
                        expected: expected.to_string(),
                    },
                    &span,
                );
            }
        }

        return_type
    }

    fn check_new(&mut self, class: &Identifier) -> Type {
        match self.types.get(&class.name) {
            Some(decl) if self.ast.decl(decl).is_class() => Type::Named(class.clone()),
            _ => {
                self.report(
                    Error::IdentifierNotDeclared {
                        identifier: class.name.clone(),
                        looking_for: LookingFor::Class,
                    },
                    &class.span,
                );
                Type::Error
            }
        }
    }

    fn check_new_array(&mut self, size: ExprId, element: &Type, scope: ScopeId) -> Type {
        let size_type = self.check_expr(size, scope);
        if !self.convertible(&size_type, &Type::Int) {
            let span = self.ast.expr(size).span.clone();
            self.report(Error::NewArraySizeNotInteger, &span);
        }

        if let Some(identifier) = element.named_identifier() {
            if !self.types.contains(&identifier.name) {
                self.report(
                    Error::IdentifierNotDeclared {
                        identifier: identifier.name.clone(),
                        looking_for: LookingFor::Type,
                    },
                    &identifier.span,
                );
                return Type::Array(Box::new(Type::Error));
            }
        }

        Type::Array(Box::new(element.clone()))
    }
}
