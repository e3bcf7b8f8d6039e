// Copyright (c) ZeroC, Inc.

//! The code generator: translates the typed, annotated AST into three-address code.
//!
//! Code generation assumes a well-typed tree; it never reports type errors. The only runtime
//! checks it inserts are the negative-array-size and array-subscript traps, which print a fixed
//! message and halt the emitted program.

use crate::ast::{Ast, DeclId, ExprId, NodeRef, StmtId};
use crate::compilation_state::CompilationState;
use crate::diagnostics::{Diagnostic, Error};
use crate::grammar::*;
use crate::scope::{ScopeId, Scopes, TypeTable};
use crate::tac::{BinaryOperator, Builtin, MemLocation, TacEmitter, FIRST_PARAM_OFFSET, WORD_SIZE};

const NEGATIVE_SIZE_MESSAGE: &str = "Decaf runtime error: Array size is negative";
const BAD_SUBSCRIPT_MESSAGE: &str = "Decaf runtime error: Array subscript out of bounds";

/// Generates TAC for the analyzed program held by `state`, storing the listing in `state.tac`.
///
/// This only runs once analysis finished without diagnostics (see [CompilationState::apply]);
/// the one remaining precondition it checks itself is the presence of a global `main` function,
/// reporting *no-main-found* and emitting nothing when it is absent.
pub fn generate(state: &mut CompilationState) {
    let has_main = state.ast.program().iter().any(|&decl| {
        let candidate = state.ast.decl(decl);
        candidate.is_function() && candidate.id.name == "main"
    });
    if !has_main {
        Diagnostic::new(Error::NoMainFound).push_into(&mut state.diagnostics);
        return;
    }

    let listing = {
        let CompilationState { ast, scopes, types, .. } = &mut *state;
        let mut generator = CodeGenerator {
            ast,
            scopes,
            types,
            emitter: TacEmitter::new(),
            this_location: None,
            current_class: None,
            current_function: None,
            loop_ends: Vec::new(),
        };
        generator.emit_program();
        generator.emitter.into_listing()
    };
    state.tac = Some(listing);
}

/// Where a bare name inside a function body lives.
enum BareTarget {
    /// A local, parameter, or global with its own storage.
    Direct(MemLocation),
    /// A field of the enclosing class, reached through the receiver at the given object slot.
    ReceiverField(usize),
    /// Unresolvable; only reachable on trees the analyzer rejected.
    Missing,
}

struct CodeGenerator<'a> {
    ast: &'a mut Ast,
    scopes: &'a Scopes,
    types: &'a TypeTable,
    emitter: TacEmitter,

    /// The receiver parameter's location while emitting a method.
    this_location: Option<MemLocation>,
    current_class: Option<DeclId>,
    current_function: Option<DeclId>,
    /// End labels of the loops enclosing the emission point; `break` jumps to the innermost.
    loop_ends: Vec<String>,
}

impl CodeGenerator<'_> {
    fn emit_program(&mut self) {
        let program = self.ast.program().to_vec();

        // Global variables are laid out first, one word each in declaration order.
        for &decl in &program {
            if self.ast.decl(decl).is_variable() {
                let name = self.ast.decl(decl).id.name.clone();
                let location = self.emitter.alloc_global(&name);
                if let Some(variable) = self.ast.decl_mut(decl).as_variable_mut() {
                    variable.location = Some(location);
                }
            }
        }

        for &decl in &program {
            if self.ast.decl(decl).is_function() {
                let label = format!("_{}", self.ast.decl(decl).id.name);
                self.emit_function(decl, &label, None);
            } else if self.ast.decl(decl).is_class() {
                self.emit_class(decl);
            }
        }
    }

    // ----------------  Declarations ---------------- //

    fn emit_class(&mut self, class_id: DeclId) {
        let layout = self.class_layout(class_id);
        let (class_name, members) = {
            let decl = self.ast.decl(class_id);
            match decl.as_class() {
                Some(class) => (decl.id.name.clone(), class.members.clone()),
                None => return,
            }
        };

        for member in members {
            let has_body = self
                .ast
                .decl(member)
                .as_function()
                .is_some_and(|function| function.body.is_some());
            if !has_body {
                continue;
            }

            let label = format!("_{class_name}.{}", self.ast.decl(member).id.name);
            if let Some(function) = self.ast.decl_mut(member).as_function_mut() {
                function.vtable_label = Some(label.clone());
            }
            self.emit_function(member, &label, Some(class_id));
        }

        self.emitter.add_vtable(&class_name, layout.method_labels());
    }

    /// Emits one function: label, prologue, parameter layout, body, epilogue.
    /// Methods pass their owning class, which claims the first parameter slot for the receiver.
    fn emit_function(&mut self, function_id: DeclId, label: &str, receiver_class: Option<DeclId>) {
        let (formals, body) = {
            let Some(function) = self.ast.decl(function_id).as_function() else {
                return;
            };
            (function.formals.clone(), function.body)
        };
        let Some(body) = body else { return };

        self.emitter.begin_function(label);

        let mut offset = FIRST_PARAM_OFFSET;
        if receiver_class.is_some() {
            self.this_location = Some(MemLocation::frame("this", offset));
            offset += WORD_SIZE;
        } else {
            self.this_location = None;
        }
        for formal in formals {
            let name = self.ast.decl(formal).id.name.clone();
            let location = MemLocation::frame(name, offset);
            offset += WORD_SIZE;
            if let Some(variable) = self.ast.decl_mut(formal).as_variable_mut() {
                variable.location = Some(location);
            }
        }

        self.current_class = receiver_class;
        self.current_function = Some(function_id);
        self.emit_stmt(body);
        self.emitter.end_function();
        self.current_function = None;
        self.current_class = None;
        self.this_location = None;
    }

    /// Computes (and caches) a class's object and vtable layout. Inherited fields and methods
    /// keep their superclass slots; overrides replace the vtable entry in place and new methods
    /// extend it.
    fn class_layout(&mut self, class_id: DeclId) -> ClassLayout {
        if let Some(layout) = self.ast.decl(class_id).as_class().and_then(|class| class.layout.clone()) {
            return layout;
        }

        let (class_name, extends, members) = {
            let decl = self.ast.decl(class_id);
            match decl.as_class() {
                Some(class) => (decl.id.name.clone(), class.extends.clone(), class.members.clone()),
                None => return ClassLayout::default(),
            }
        };

        let parent = extends.and_then(|extends| self.types.get(&extends.name));
        let mut layout = match parent {
            Some(parent) if parent != class_id && self.ast.decl(parent).is_class() => self.class_layout(parent),
            _ => ClassLayout::default(),
        };

        for member in members {
            let member_name = self.ast.decl(member).id.name.clone();
            if self.ast.decl(member).is_variable() {
                layout.fields.push(member_name);
            } else if self.ast.decl(member).is_function() {
                let label = format!("_{class_name}.{member_name}");
                match layout.vtable.iter_mut().find(|entry| entry.method == member_name) {
                    Some(entry) => entry.label = label,
                    None => layout.vtable.push(VtableEntry {
                        method: member_name,
                        label,
                    }),
                }
            }
        }

        if let Some(class) = self.ast.decl_mut(class_id).as_class_mut() {
            class.layout = Some(layout.clone());
        }
        layout
    }

    // ----------------  Statements ---------------- //

    fn emit_stmt(&mut self, stmt: StmtId) {
        match self.ast.stmt(stmt).kind.clone() {
            StmtKind::Block { decls, stmts } => {
                for decl in decls {
                    let name = self.ast.decl(decl).id.name.clone();
                    let location = self.emitter.alloc_local(&name);
                    if let Some(variable) = self.ast.decl_mut(decl).as_variable_mut() {
                        variable.location = Some(location);
                    }
                }
                for stmt in stmts {
                    self.emit_stmt(stmt);
                }
            }
            StmtKind::If {
                test,
                then_body,
                else_body,
            } => {
                let test_value = self.emit_expr(test);
                let else_label = self.emitter.new_label();
                let post_label = self.emitter.new_label();
                self.emitter.if_zero(test_value, &else_label);
                self.emit_stmt(then_body);
                self.emitter.goto(&post_label);
                self.emitter.label(&else_label);
                if let Some(else_body) = else_body {
                    self.emit_stmt(else_body);
                }
                self.emitter.label(&post_label);
            }
            StmtKind::While { test, body } => {
                let start_label = self.emitter.new_label();
                let end_label = self.emitter.new_label();
                self.emitter.label(&start_label);
                let test_value = self.emit_expr(test);
                self.emitter.if_zero(test_value, &end_label);
                self.loop_ends.push(end_label.clone());
                self.emit_stmt(body);
                self.loop_ends.pop();
                self.emitter.goto(&start_label);
                self.emitter.label(&end_label);
            }
            StmtKind::For { init, test, step, body } => {
                if let Some(init) = init {
                    self.emit_expr(init);
                }
                let start_label = self.emitter.new_label();
                let end_label = self.emitter.new_label();
                self.emitter.label(&start_label);
                let test_value = self.emit_expr(test);
                self.emitter.if_zero(test_value, &end_label);
                self.loop_ends.push(end_label.clone());
                self.emit_stmt(body);
                self.loop_ends.pop();
                if let Some(step) = step {
                    self.emit_expr(step);
                }
                self.emitter.goto(&start_label);
                self.emitter.label(&end_label);
            }
            StmtKind::Break => {
                if let Some(end_label) = self.loop_ends.last().cloned() {
                    self.emitter.goto(end_label);
                }
            }
            StmtKind::Return { expr } => {
                let value = expr.map(|expr| self.emit_expr(expr));
                self.emitter.ret(value);
            }
            StmtKind::Print { args } => {
                for arg in args {
                    let value = self.emit_expr(arg);
                    let builtin = match self.ast.expr(arg).resolved_type {
                        Type::String => Builtin::PrintString,
                        Type::Bool => Builtin::PrintBool,
                        _ => Builtin::PrintInt,
                    };
                    self.emitter.builtin_call(builtin, vec![value]);
                }
            }
            StmtKind::Expr(expr) => {
                self.emit_expr(expr);
            }
        }
    }

    // ----------------  Expressions ---------------- //

    /// Emits an expression and returns the location holding its value.
    fn emit_expr(&mut self, expr: ExprId) -> MemLocation {
        match self.ast.expr(expr).kind.clone() {
            ExprKind::IntConstant(value) => self.emitter.load_constant(value),
            // The machine is word-based; double constants are truncated to their integer value.
            ExprKind::DoubleConstant(value) => self.emitter.load_constant(value as i32),
            ExprKind::BoolConstant(value) => self.emitter.load_constant(i32::from(value)),
            ExprKind::NullConstant => self.emitter.load_constant(0),
            ExprKind::StringConstant(value) => {
                let label = self.emitter.intern_string(&value);
                self.emitter.load_label(label)
            }
            ExprKind::ReadInteger => self.builtin_value(Builtin::ReadInteger, Vec::new()),
            ExprKind::ReadLine => self.builtin_value(Builtin::ReadLine, Vec::new()),
            ExprKind::This => self.receiver(),
            ExprKind::Arithmetic { op, left, right } => match left {
                // Unary minus is computed as 0 - operand.
                None => {
                    let zero = self.emitter.load_constant(0);
                    let operand = self.emit_expr(right);
                    self.emitter.binary_op(BinaryOperator::Subtract, zero, operand)
                }
                Some(left) => {
                    let left_value = self.emit_expr(left);
                    let right_value = self.emit_expr(right);
                    let operator = match op.lexeme.as_str() {
                        "+" => BinaryOperator::Add,
                        "-" => BinaryOperator::Subtract,
                        "*" => BinaryOperator::Multiply,
                        "/" => BinaryOperator::Divide,
                        _ => BinaryOperator::Modulo,
                    };
                    self.emitter.binary_op(operator, left_value, right_value)
                }
            },
            ExprKind::Relational { op, left, right } => {
                let left_value = self.emit_expr(left);
                let right_value = self.emit_expr(right);
                self.emit_relational(&op.lexeme, left_value, right_value)
            }
            ExprKind::Equality { op, left, right } => {
                let is_string = matches!(self.ast.expr(left).resolved_type, Type::String);
                let left_value = self.emit_expr(left);
                let right_value = self.emit_expr(right);

                let equal = if is_string {
                    self.builtin_value(Builtin::StringEqual, vec![left_value, right_value])
                } else {
                    self.emitter.binary_op(BinaryOperator::Equal, left_value, right_value)
                };

                if op.lexeme == "!=" {
                    let zero = self.emitter.load_constant(0);
                    self.emitter.binary_op(BinaryOperator::Equal, equal, zero)
                } else {
                    equal
                }
            }
            ExprKind::Logical { op, left, right } => match left {
                // Unary not is computed as 0 == operand.
                None => {
                    let zero = self.emitter.load_constant(0);
                    let operand = self.emit_expr(right);
                    self.emitter.binary_op(BinaryOperator::Equal, zero, operand)
                }
                Some(left) => {
                    let left_value = self.emit_expr(left);
                    let right_value = self.emit_expr(right);
                    let operator = if op.lexeme == "&&" {
                        BinaryOperator::And
                    } else {
                        BinaryOperator::Or
                    };
                    self.emitter.binary_op(operator, left_value, right_value)
                }
            },
            ExprKind::Assign { left, right, .. } => self.emit_assign(left, right),
            ExprKind::ArrayAccess { base, subscript } => {
                let address = self.emit_array_address(base, subscript);
                self.emitter.load(address, 0)
            }
            ExprKind::FieldAccess { base, field } => self.emit_field_load(expr, base, &field),
            ExprKind::Call { base, field, actuals } => self.emit_call(expr, base, &field, &actuals),
            ExprKind::New { class } => self.emit_new(&class),
            ExprKind::NewArray { size, .. } => self.emit_new_array(size),
        }
    }

    /// `<` maps directly onto the machine's compare; the other relations are rewritten:
    /// `a > b` is `b < a`, `a <= b` is `(a < b) || (a == b)`, `a >= b` is `(b < a) || (a == b)`.
    fn emit_relational(&mut self, lexeme: &str, left: MemLocation, right: MemLocation) -> MemLocation {
        match lexeme {
            "<" => self.emitter.binary_op(BinaryOperator::Less, left, right),
            ">" => self.emitter.binary_op(BinaryOperator::Less, right, left),
            "<=" => {
                let less = self.emitter.binary_op(BinaryOperator::Less, left.clone(), right.clone());
                let equal = self.emitter.binary_op(BinaryOperator::Equal, left, right);
                self.emitter.binary_op(BinaryOperator::Or, less, equal)
            }
            _ => {
                let less = self.emitter.binary_op(BinaryOperator::Less, right.clone(), left.clone());
                let equal = self.emitter.binary_op(BinaryOperator::Equal, left, right);
                self.emitter.binary_op(BinaryOperator::Or, less, equal)
            }
        }
    }

    fn emit_assign(&mut self, left: ExprId, right: ExprId) -> MemLocation {
        let value = self.emit_expr(right);

        match self.ast.expr(left).kind.clone() {
            ExprKind::FieldAccess { base: None, field } => match self.resolve_bare_name(left, &field.name) {
                BareTarget::Direct(location) => self.emitter.assign(location, value.clone()),
                BareTarget::ReceiverField(slot) => {
                    let receiver = self.receiver();
                    self.emitter.store(receiver, value.clone(), (slot as i32) * WORD_SIZE);
                }
                BareTarget::Missing => {}
            },
            ExprKind::FieldAccess { base: Some(base), field } => {
                let base_type = self.ast.expr(base).resolved_type.clone();
                let slot = self.field_slot_for_type(&base_type, &field.name);
                let base_value = self.emit_expr(base);
                if let Some(slot) = slot {
                    self.emitter.store(base_value, value.clone(), (slot as i32) * WORD_SIZE);
                }
            }
            ExprKind::ArrayAccess { base, subscript } => {
                let address = self.emit_array_address(base, subscript);
                self.emitter.store(address, value.clone(), 0);
            }
            _ => {}
        }

        value
    }

    fn emit_field_load(&mut self, expr: ExprId, base: Option<ExprId>, field: &Identifier) -> MemLocation {
        match base {
            None => match self.resolve_bare_name(expr, &field.name) {
                BareTarget::Direct(location) => location,
                BareTarget::ReceiverField(slot) => {
                    let receiver = self.receiver();
                    self.emitter.load(receiver, (slot as i32) * WORD_SIZE)
                }
                BareTarget::Missing => self.emitter.load_constant(0),
            },
            Some(base) => {
                let base_type = self.ast.expr(base).resolved_type.clone();
                let slot = self.field_slot_for_type(&base_type, &field.name);
                let base_value = self.emit_expr(base);
                match slot {
                    Some(slot) => self.emitter.load(base_value, (slot as i32) * WORD_SIZE),
                    None => self.emitter.load_constant(0),
                }
            }
        }
    }

    fn emit_call(&mut self, expr: ExprId, base: Option<ExprId>, field: &Identifier, actuals: &[ExprId]) -> MemLocation {
        // arr.length() reads the size word; no call is issued.
        if let Some(base) = base {
            let base_type = self.ast.expr(base).resolved_type.clone();
            if base_type.is_array() && field.name == "length" {
                let base_value = self.emit_expr(base);
                return self.emitter.load(base_value, -WORD_SIZE);
            }
        }

        match base {
            Some(base) => {
                let base_type = self.ast.expr(base).resolved_type.clone();
                let returns_value = self.callee_returns_value(&base_type, &field.name);
                let slot = self.method_slot_for_base(&base_type, &field.name);
                let receiver = self.emit_expr(base);
                match slot {
                    Some(slot) => self.emit_dispatch(receiver, slot, actuals, returns_value),
                    // Qualified lookups can walk past the class scopes to a global function;
                    // those calls go out directly, with no receiver.
                    None => self.emit_direct_call(&field.name, actuals, returns_value),
                }
            }
            None => {
                let decl = self
                    .ast
                    .expr(expr)
                    .scope
                    .and_then(|scope| self.scopes.search(scope, &field.name));
                let returns_value = decl
                    .and_then(|decl| self.ast.decl(decl).as_function())
                    .is_some_and(|function| function.return_type != Type::Void);
                let is_method = decl.is_some_and(|decl| {
                    matches!(
                        self.ast.parent_of(NodeRef::Decl(decl)),
                        Some(NodeRef::Decl(owner)) if self.ast.decl(owner).is_class()
                    )
                });

                if is_method {
                    // A bare call to one of the enclosing class's methods dispatches through
                    // the implicit receiver.
                    let receiver = self.receiver();
                    let slot = self
                        .current_class
                        .and_then(|class| self.class_layout(class).method_slot(&field.name))
                        .unwrap_or(0);
                    self.emit_dispatch(receiver, slot, actuals, returns_value)
                } else {
                    self.emit_direct_call(&field.name, actuals, returns_value)
                }
            }
        }
    }

    /// Evaluates the actuals left-to-right, pushes them right-to-left, and issues a direct call.
    fn emit_direct_call(&mut self, name: &str, actuals: &[ExprId], returns_value: bool) -> MemLocation {
        let argument_values: Vec<MemLocation> = actuals.iter().map(|&actual| self.emit_expr(actual)).collect();
        let bytes = (argument_values.len() as i32) * WORD_SIZE;
        for value in argument_values.into_iter().rev() {
            self.emitter.push_param(value);
        }
        let result = self.emitter.local_call(format!("_{name}"), returns_value);
        self.emitter.pop_params(bytes);
        result.unwrap_or_else(void_value)
    }

    /// Evaluates the actuals, loads the vtable from slot 0 of the receiver and the method from
    /// its vtable slot, pushes the actuals right-to-left and the receiver last, and issues an
    /// indirect call. The pop covers the receiver slot too.
    fn emit_dispatch(&mut self, receiver: MemLocation, slot: usize, actuals: &[ExprId], returns_value: bool) -> MemLocation {
        let argument_values: Vec<MemLocation> = actuals.iter().map(|&actual| self.emit_expr(actual)).collect();

        let vtable = self.emitter.load(receiver.clone(), 0);
        let method = self.emitter.load(vtable, (slot as i32) * WORD_SIZE);

        let bytes = ((argument_values.len() as i32) + 1) * WORD_SIZE;
        for value in argument_values.into_iter().rev() {
            self.emitter.push_param(value);
        }
        self.emitter.push_param(receiver);
        let result = self.emitter.addressed_call(method, returns_value);
        self.emitter.pop_params(bytes);
        result.unwrap_or_else(void_value)
    }

    fn emit_new(&mut self, class: &Identifier) -> MemLocation {
        let Some(class_id) = self.types.get(&class.name) else {
            return self.emitter.load_constant(0);
        };
        let layout = self.class_layout(class_id);

        // One word per field plus the vtable slot.
        let bytes = ((layout.field_count() as i32) + 1) * WORD_SIZE;
        let size = self.emitter.load_constant(bytes);
        let object = self.builtin_value(Builtin::Alloc, vec![size]);

        let vtable = self.emitter.load_label(class.name.clone());
        self.emitter.store(object.clone(), vtable, 0);
        object
    }

    fn emit_new_array(&mut self, size: ExprId) -> MemLocation {
        let size_value = self.emit_expr(size);

        let zero = self.emitter.load_constant(0);
        let negative = self.emitter.binary_op(BinaryOperator::Less, size_value.clone(), zero);
        let ok_label = self.emitter.new_label();
        self.emitter.if_zero(negative, &ok_label);
        self.emit_runtime_trap(NEGATIVE_SIZE_MESSAGE);
        self.emitter.label(&ok_label);

        // Allocate size + 1 words; the extra word holds the length.
        let one = self.emitter.load_constant(1);
        let words = self.emitter.binary_op(BinaryOperator::Add, size_value.clone(), one);
        let word_size = self.emitter.load_constant(WORD_SIZE);
        let bytes = self.emitter.binary_op(BinaryOperator::Multiply, words, word_size);
        let block = self.builtin_value(Builtin::Alloc, vec![bytes]);
        self.emitter.store(block.clone(), size_value, 0);

        // Return the pointer advanced past the length word, so element 0 is at offset 0.
        let word_size = self.emitter.load_constant(WORD_SIZE);
        self.emitter.binary_op(BinaryOperator::Add, block, word_size)
    }

    /// Evaluates an array access down to the element's address, guarded by the bounds check.
    fn emit_array_address(&mut self, base: ExprId, subscript: ExprId) -> MemLocation {
        let base_value = self.emit_expr(base);
        let index = self.emit_expr(subscript);

        // index < 0 || index >= size, with the size word one word below the element data.
        let size = self.emitter.load(base_value.clone(), -WORD_SIZE);
        let zero = self.emitter.load_constant(0);
        let negative = self.emitter.binary_op(BinaryOperator::Less, index.clone(), zero);
        let within = self.emitter.binary_op(BinaryOperator::Less, index.clone(), size);
        let flip = self.emitter.load_constant(0);
        let not_within = self.emitter.binary_op(BinaryOperator::Equal, within, flip);
        let out_of_bounds = self.emitter.binary_op(BinaryOperator::Or, negative, not_within);

        let ok_label = self.emitter.new_label();
        self.emitter.if_zero(out_of_bounds, &ok_label);
        self.emit_runtime_trap(BAD_SUBSCRIPT_MESSAGE);
        self.emitter.label(&ok_label);

        let word_size = self.emitter.load_constant(WORD_SIZE);
        let byte_offset = self.emitter.binary_op(BinaryOperator::Multiply, index, word_size);
        self.emitter.binary_op(BinaryOperator::Add, base_value, byte_offset)
    }

    /// Prints a fixed runtime-error message and halts the program.
    fn emit_runtime_trap(&mut self, message: &str) {
        let label = self.emitter.intern_string(message);
        let message_value = self.emitter.load_label(label);
        self.emitter.builtin_call(Builtin::PrintString, vec![message_value]);
        self.emitter.halt();
    }

    // ----------------  Name resolution ---------------- //

    /// Classifies a bare name at an emission point. Locals and parameters are found by a search
    /// bounded by the enclosing function's scope; past that, a name matching a field of the
    /// enclosing class refers to the receiver's field, and anything else is a global.
    fn resolve_bare_name(&mut self, expr: ExprId, name: &str) -> BareTarget {
        let Some(scope) = self.ast.expr(expr).scope else {
            return BareTarget::Missing;
        };

        if let Some(frames) = self.function_frames(scope) {
            if let Some(decl) = self.scopes.search_bounded(scope, name, frames) {
                if let Some(location) = self.variable_location(decl) {
                    return BareTarget::Direct(location);
                }
            }
        }

        if let Some(class_id) = self.current_class {
            if let Some(slot) = self.class_layout(class_id).field_slot(name) {
                return BareTarget::ReceiverField(slot);
            }
        }

        if let Some(decl) = self.scopes.search(scope, name) {
            if let Some(location) = self.variable_location(decl) {
                return BareTarget::Direct(location);
            }
        }
        BareTarget::Missing
    }

    /// Number of scope frames from `scope` up to and including the current function's formals
    /// scope. Bounds the local/parameter search in [resolve_bare_name](Self::resolve_bare_name).
    fn function_frames(&self, scope: ScopeId) -> Option<usize> {
        let function = self.current_function?;
        let body_scope = self.ast.decl(function).as_function()?.body_scope?;
        self.scopes.frames_up_to(scope, body_scope)
    }

    fn variable_location(&self, decl: DeclId) -> Option<MemLocation> {
        self.ast.decl(decl).as_variable().and_then(|variable| variable.location.clone())
    }

    fn field_slot_for_type(&mut self, base_type: &Type, field: &str) -> Option<usize> {
        let identifier = base_type.named_identifier()?;
        let class = self.types.get(&identifier.name)?;
        self.class_layout(class).field_slot(field)
    }

    /// The vtable slot a qualified call on a value of `base_type` dispatches through. For
    /// interface-typed bases the slot comes from the interface's member order.
    fn method_slot_for_base(&mut self, base_type: &Type, method: &str) -> Option<usize> {
        let identifier = base_type.named_identifier()?;
        let decl = self.types.get(&identifier.name)?;

        if self.ast.decl(decl).is_class() {
            self.class_layout(decl).method_slot(method)
        } else if let Some(interface) = self.ast.decl(decl).as_interface() {
            interface
                .members
                .iter()
                .position(|&member| self.ast.decl(member).id.name == method)
        } else {
            None
        }
    }

    /// Looks the callee up through the base type's member scope to learn whether the call
    /// produces a value.
    fn callee_returns_value(&self, base_type: &Type, method: &str) -> bool {
        let member_scope = base_type
            .named_identifier()
            .and_then(|identifier| self.types.get(&identifier.name))
            .and_then(|decl| match &self.ast.decl(decl).kind {
                DeclKind::Class(class) => class.members_scope,
                DeclKind::Interface(interface) => interface.members_scope,
                _ => None,
            });

        member_scope
            .and_then(|scope| self.scopes.search(scope, method))
            .and_then(|decl| self.ast.decl(decl).as_function())
            .is_some_and(|function| function.return_type != Type::Void)
    }

    fn receiver(&mut self) -> MemLocation {
        self.this_location.clone().expect("emission point has no receiver")
    }

    fn builtin_value(&mut self, builtin: Builtin, args: Vec<MemLocation>) -> MemLocation {
        self.emitter
            .builtin_call(builtin, args)
            .expect("builtin produces a value")
    }
}

/// Placeholder location for calls that produce no value. Never referenced by any instruction;
/// it only satisfies the expression walker's signature.
fn void_value() -> MemLocation {
    MemLocation::frame("_void", 0)
}
