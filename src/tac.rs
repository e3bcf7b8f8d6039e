// Copyright (c) ZeroC, Inc.

//! The three-address-code emitter: a stateful builder that mints temporaries and labels, appends
//! instructions, and renders the final listing.
//!
//! The listing layout is the contract with downstream consumers. It concatenates four sections in
//! order: global data (`global N`, present when the program has globals), one `vtable` line per
//! class, one `_stringN` line per interned string constant, and finally the code stream. Labels
//! are printed flush-left with a trailing colon; every other instruction is indented two spaces.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write;

/// The size of a machine word in bytes. Every value the machine manipulates is one word.
pub const WORD_SIZE: i32 = 4;

/// Frame offset of the first local variable or temporary, growing downward.
pub const FIRST_LOCAL_OFFSET: i32 = -8;

/// Frame offset of the first parameter, growing upward. For methods this slot holds the
/// receiver and the declared formals start one word higher.
pub const FIRST_PARAM_OFFSET: i32 = 4;

/// Which base register a memory location is addressed from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Addressed from the global base pointer.
    Global,
    /// Addressed from the current frame pointer. Covers parameters (positive offsets),
    /// locals, and temporaries (negative offsets).
    Frame,
}

/// A named storage location: a global, a parameter, a local, or an emitter-minted temporary.
/// Instructions refer to locations by their canonical print name.
#[derive(Clone, Debug)]
pub struct MemLocation {
    pub name: String,
    pub segment: Segment,
    pub offset: i32,
}

impl MemLocation {
    pub fn global(name: impl Into<String>, offset: i32) -> Self {
        MemLocation {
            name: name.into(),
            segment: Segment::Global,
            offset,
        }
    }

    pub fn frame(name: impl Into<String>, offset: i32) -> Self {
        MemLocation {
            name: name.into(),
            segment: Segment::Frame,
            offset,
        }
    }
}

impl fmt::Display for MemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The binary operators the abstract machine computes directly. Everything else (`> >= <= != !`
/// and unary minus) is rewritten by the code generator into combinations of these.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Less,
    Equal,
    And,
    Or,
}

impl BinaryOperator {
    pub fn lexeme(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Less => "<",
            BinaryOperator::Equal => "==",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

/// The runtime support routines. All of them are reached with ordinary `LCall`s; arguments are
/// pushed right-to-left and popped by the caller, like user calls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Builtin {
    PrintInt,
    PrintString,
    PrintBool,
    ReadInteger,
    ReadLine,
    Alloc,
    StringEqual,
}

impl Builtin {
    pub fn label(&self) -> &'static str {
        match self {
            Builtin::PrintInt => "_PrintInt",
            Builtin::PrintString => "_PrintString",
            Builtin::PrintBool => "_PrintBool",
            Builtin::ReadInteger => "_ReadInteger",
            Builtin::ReadLine => "_ReadLine",
            Builtin::Alloc => "_Alloc",
            Builtin::StringEqual => "_StringEqual",
        }
    }

    pub fn returns_value(&self) -> bool {
        matches!(
            self,
            Builtin::ReadInteger | Builtin::ReadLine | Builtin::Alloc | Builtin::StringEqual
        )
    }
}

#[derive(Clone, Debug)]
pub enum Instruction {
    /// `dst = value`
    LoadConstant { dst: MemLocation, value: i32 },
    /// `dst = label` — loads the address a label refers to (a string constant or a vtable).
    LoadLabel { dst: MemLocation, label: String },
    /// `dst = src`
    Assign { dst: MemLocation, src: MemLocation },
    /// `dst = *(ptr + offset)`
    Load {
        dst: MemLocation,
        ptr: MemLocation,
        offset: i32,
    },
    /// `*(ptr + offset) = src`
    Store {
        ptr: MemLocation,
        src: MemLocation,
        offset: i32,
    },
    /// `dst = left op right`
    BinaryOp {
        op: BinaryOperator,
        dst: MemLocation,
        left: MemLocation,
        right: MemLocation,
    },
    Label { name: String },
    Goto { target: String },
    /// Branches to `target` when `test` is zero (false).
    IfZero { test: MemLocation, target: String },
    /// Opens a stack frame. The size is backpatched once the function's locals and temporaries
    /// have all been seen.
    BeginFunction { frame_size: i32 },
    EndFunction,
    PushParam { param: MemLocation },
    PopParams { bytes: i32 },
    /// A direct call to a label. `dst` is present when the callee produces a value.
    LocalCall { label: String, dst: Option<MemLocation> },
    /// An indirect call through a computed function address (vtable dispatch).
    IndirectCall {
        fn_ptr: MemLocation,
        dst: Option<MemLocation>,
    },
    Return { value: Option<MemLocation> },
    Halt,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Formats a `*(ptr + offset)` operand, eliding a zero offset.
        fn deref(ptr: &MemLocation, offset: i32) -> String {
            if offset == 0 {
                format!("*({ptr})")
            } else {
                format!("*({ptr} + {offset})")
            }
        }

        match self {
            Instruction::LoadConstant { dst, value } => write!(f, "{dst} = {value}"),
            Instruction::LoadLabel { dst, label } => write!(f, "{dst} = {label}"),
            Instruction::Assign { dst, src } => write!(f, "{dst} = {src}"),
            Instruction::Load { dst, ptr, offset } => write!(f, "{dst} = {}", deref(ptr, *offset)),
            Instruction::Store { ptr, src, offset } => write!(f, "{} = {src}", deref(ptr, *offset)),
            Instruction::BinaryOp { op, dst, left, right } => {
                write!(f, "{dst} = {left} {} {right}", op.lexeme())
            }
            Instruction::Label { name } => write!(f, "{name}:"),
            Instruction::Goto { target } => write!(f, "Goto {target}"),
            Instruction::IfZero { test, target } => write!(f, "IfZ {test} Goto {target}"),
            Instruction::BeginFunction { frame_size } => write!(f, "BeginFunc {frame_size}"),
            Instruction::EndFunction => f.write_str("EndFunc"),
            Instruction::PushParam { param } => write!(f, "PushParam {param}"),
            Instruction::PopParams { bytes } => write!(f, "PopParams {bytes}"),
            Instruction::LocalCall { label, dst: Some(dst) } => write!(f, "{dst} = LCall {label}"),
            Instruction::LocalCall { label, dst: None } => write!(f, "LCall {label}"),
            Instruction::IndirectCall { fn_ptr, dst: Some(dst) } => write!(f, "{dst} = ACall {fn_ptr}"),
            Instruction::IndirectCall { fn_ptr, dst: None } => write!(f, "ACall {fn_ptr}"),
            Instruction::Return { value: Some(value) } => write!(f, "Return {value}"),
            Instruction::Return { value: None } => f.write_str("Return"),
            Instruction::Halt => f.write_str("Halt"),
        }
    }
}

/// The stateful TAC builder.
///
/// Temporary and label counters are monotonic over the whole program, so emission is a pure
/// function of the annotated AST: compiling the same program with a fresh emitter reproduces the
/// listing byte for byte.
#[derive(Debug, Default)]
pub struct TacEmitter {
    instructions: Vec<Instruction>,

    labels_minted: usize,
    temps_minted: usize,

    /// Number of global words allocated so far.
    globals: usize,

    /// Per-class vtables, in emission order: (class name, method labels in slot order).
    vtables: Vec<(String, Vec<String>)>,

    /// Interned string constants, in first-use order. `_stringN` labels are indices + 1.
    strings: Vec<String>,
    string_labels: HashMap<String, usize>,

    /// Frame slots (locals + temporaries) allocated in the current function.
    frame_slots: usize,
    /// Index of the current function's `BeginFunction` instruction, for frame-size backpatching.
    begin_index: Option<usize>,
}

impl TacEmitter {
    pub fn new() -> Self {
        TacEmitter::default()
    }

    fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Mints a fresh synthetic label of the form `_Ln`.
    pub fn new_label(&mut self) -> String {
        let label = format!("_L{}", self.labels_minted);
        self.labels_minted += 1;
        label
    }

    /// Mints a fresh temporary in the next frame slot of the current function.
    pub fn new_temp(&mut self) -> MemLocation {
        let name = format!("_tmp{}", self.temps_minted);
        self.temps_minted += 1;
        MemLocation::frame(name, self.alloc_slot())
    }

    /// Allocates the next frame slot and returns its offset.
    fn alloc_slot(&mut self) -> i32 {
        let offset = FIRST_LOCAL_OFFSET - (self.frame_slots as i32) * WORD_SIZE;
        self.frame_slots += 1;
        offset
    }

    /// Allocates a frame slot for a named local variable of the current function.
    pub fn alloc_local(&mut self, name: &str) -> MemLocation {
        MemLocation::frame(name, self.alloc_slot())
    }

    /// Allocates the next global word for a named global variable.
    pub fn alloc_global(&mut self, name: &str) -> MemLocation {
        let offset = (self.globals as i32) * WORD_SIZE;
        self.globals += 1;
        MemLocation::global(name, offset)
    }

    /// Interns a string constant and returns the `_stringN` label that refers to it.
    pub fn intern_string(&mut self, value: &str) -> String {
        let index = match self.string_labels.get(value) {
            Some(index) => *index,
            None => {
                self.strings.push(value.to_owned());
                let index = self.strings.len();
                self.string_labels.insert(value.to_owned(), index);
                index
            }
        };
        format!("_string{index}")
    }

    /// Records a class's vtable for the vtable section of the listing.
    pub fn add_vtable(&mut self, class: &str, method_labels: Vec<String>) {
        self.vtables.push((class.to_owned(), method_labels));
    }

    // ----------------  Instruction builders ---------------- //

    pub fn load_constant(&mut self, value: i32) -> MemLocation {
        let dst = self.new_temp();
        self.push(Instruction::LoadConstant { dst: dst.clone(), value });
        dst
    }

    pub fn load_label(&mut self, label: impl Into<String>) -> MemLocation {
        let dst = self.new_temp();
        self.push(Instruction::LoadLabel {
            dst: dst.clone(),
            label: label.into(),
        });
        dst
    }

    pub fn assign(&mut self, dst: MemLocation, src: MemLocation) {
        self.push(Instruction::Assign { dst, src });
    }

    pub fn load(&mut self, ptr: MemLocation, offset: i32) -> MemLocation {
        let dst = self.new_temp();
        self.push(Instruction::Load {
            dst: dst.clone(),
            ptr,
            offset,
        });
        dst
    }

    pub fn store(&mut self, ptr: MemLocation, src: MemLocation, offset: i32) {
        self.push(Instruction::Store { ptr, src, offset });
    }

    pub fn binary_op(&mut self, op: BinaryOperator, left: MemLocation, right: MemLocation) -> MemLocation {
        let dst = self.new_temp();
        self.push(Instruction::BinaryOp {
            op,
            dst: dst.clone(),
            left,
            right,
        });
        dst
    }

    pub fn label(&mut self, name: impl Into<String>) {
        self.push(Instruction::Label { name: name.into() });
    }

    pub fn goto(&mut self, target: impl Into<String>) {
        self.push(Instruction::Goto { target: target.into() });
    }

    pub fn if_zero(&mut self, test: MemLocation, target: impl Into<String>) {
        self.push(Instruction::IfZero {
            test,
            target: target.into(),
        });
    }

    pub fn push_param(&mut self, param: MemLocation) {
        self.push(Instruction::PushParam { param });
    }

    pub fn pop_params(&mut self, bytes: i32) {
        if bytes > 0 {
            self.push(Instruction::PopParams { bytes });
        }
    }

    pub fn local_call(&mut self, label: impl Into<String>, returns_value: bool) -> Option<MemLocation> {
        let dst = returns_value.then(|| self.new_temp());
        self.push(Instruction::LocalCall {
            label: label.into(),
            dst: dst.clone(),
        });
        dst
    }

    pub fn addressed_call(&mut self, fn_ptr: MemLocation, returns_value: bool) -> Option<MemLocation> {
        let dst = returns_value.then(|| self.new_temp());
        self.push(Instruction::IndirectCall { fn_ptr, dst: dst.clone() });
        dst
    }

    /// Calls a runtime builtin: pushes `args` right-to-left, issues the call, and pops the
    /// argument bytes. Returns the result temporary for value-producing builtins.
    pub fn builtin_call(&mut self, builtin: Builtin, args: Vec<MemLocation>) -> Option<MemLocation> {
        let arg_bytes = (args.len() as i32) * WORD_SIZE;
        for arg in args.into_iter().rev() {
            self.push_param(arg);
        }
        let dst = self.local_call(builtin.label(), builtin.returns_value());
        self.pop_params(arg_bytes);
        dst
    }

    pub fn ret(&mut self, value: Option<MemLocation>) {
        self.push(Instruction::Return { value });
    }

    pub fn halt(&mut self) {
        self.push(Instruction::Halt);
    }

    /// Opens a function: emits its label and a `BeginFunc` whose frame size is backpatched by
    /// [`end_function`](Self::end_function), and resets the frame tracker.
    pub fn begin_function(&mut self, label: &str) {
        self.label(label);
        self.begin_index = Some(self.instructions.len());
        self.push(Instruction::BeginFunction { frame_size: 0 });
        self.frame_slots = 0;
    }

    /// Closes the current function: backpatches the frame size and emits `EndFunc`.
    pub fn end_function(&mut self) {
        if let Some(index) = self.begin_index.take() {
            let frame_size = (self.frame_slots as i32) * WORD_SIZE;
            self.instructions[index] = Instruction::BeginFunction { frame_size };
        }
        self.push(Instruction::EndFunction);
    }

    // ----------------  Final listing ---------------- //

    /// Renders the complete listing: global data, vtables, strings, then the code stream.
    pub fn into_listing(self) -> String {
        let mut listing = String::new();

        if self.globals > 0 {
            writeln!(listing, "global {}", self.globals).expect("failed to write listing");
        }

        for (class, method_labels) in &self.vtables {
            writeln!(listing, "vtable {class} = [{}]", method_labels.join(", ")).expect("failed to write listing");
        }

        for (index, string) in self.strings.iter().enumerate() {
            writeln!(listing, "_string{}: \"{string}\"", index + 1).expect("failed to write listing");
        }

        for instruction in &self.instructions {
            match instruction {
                Instruction::Label { .. } => writeln!(listing, "{instruction}"),
                _ => writeln!(listing, "  {instruction}"),
            }
            .expect("failed to write listing");
        }

        listing
    }
}
