// Copyright (c) ZeroC, Inc.

//! This module defines all the tokens and errors that the Decaf [Lexer](super::lexer::Lexer) can return.

use crate::source_file::Location;
use std::fmt;

pub type Token<'a> = (Location, TokenKind<'a>, Location);
pub type Error = (Location, ErrorKind, Location);

/// This enum specifies all the kinds of tokens that the Decaf [Lexer](super::lexer::Lexer) can return.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'input> {
    /// An identifier: a letter followed by any number of letters, digits, and underscores.
    Identifier(&'input str),

    /// A decimal or hexadecimal (`0x` prefixed) integer literal, already converted to its value.
    IntegerLiteral(i32),

    /// A double literal (digits, a decimal point, optional fraction digits, and an optional
    /// `E[+|-]digits` exponent), already converted to its value.
    DoubleLiteral(f64),

    /// A string literal: any non-newline characters within a pair of double-quotes.
    /// The value doesn't contain the enclosing quotation marks, only the characters between them.
    StringLiteral(&'input str),

    // Declaration keywords
    VoidKeyword,       // "void"
    IntKeyword,        // "int"
    DoubleKeyword,     // "double"
    BoolKeyword,       // "bool"
    StringKeyword,     // "string"
    ClassKeyword,      // "class"
    InterfaceKeyword,  // "interface"
    ExtendsKeyword,    // "extends"
    ImplementsKeyword, // "implements"

    // Statement keywords
    ForKeyword,    // "for"
    WhileKeyword,  // "while"
    IfKeyword,     // "if"
    ElseKeyword,   // "else"
    ReturnKeyword, // "return"
    BreakKeyword,  // "break"
    PrintKeyword,  // "Print"

    // Expression keywords
    ThisKeyword,        // "this"
    NullKeyword,        // "null"
    TrueKeyword,        // "true"
    FalseKeyword,       // "false"
    NewKeyword,         // "new"
    NewArrayKeyword,    // "NewArray"
    ReadIntegerKeyword, // "ReadInteger"
    ReadLineKeyword,    // "ReadLine"

    // Operators
    Plus,         // "+"
    Minus,        // "-"
    Star,         // "*"
    Slash,        // "/"
    Percent,      // "%"
    Less,         // "<"
    LessEqual,    // "<="
    Greater,      // ">"
    GreaterEqual, // ">="
    Assign,       // "="
    EqualEqual,   // "=="
    BangEqual,    // "!="
    AmpAmp,       // "&&"
    BarBar,       // "||"
    Bang,         // "!"

    // Punctuation
    Semicolon,    // ";"
    Comma,        // ","
    Dot,          // "."
    LeftBracket,  // "["
    RightBracket, // "]"
    LeftParen,    // "("
    RightParen,   // ")"
    LeftBrace,    // "{"
    RightBrace,   // "}"
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Identifier(input) => return write!(f, "identifier '{input}'"),
            Self::IntegerLiteral(value) => return write!(f, "integer literal '{value}'"),
            Self::DoubleLiteral(value) => return write!(f, "double literal '{value}'"),
            Self::StringLiteral(input) => return write!(f, "string literal \"{input}\""),

            Self::VoidKeyword => "void",
            Self::IntKeyword => "int",
            Self::DoubleKeyword => "double",
            Self::BoolKeyword => "bool",
            Self::StringKeyword => "string",
            Self::ClassKeyword => "class",
            Self::InterfaceKeyword => "interface",
            Self::ExtendsKeyword => "extends",
            Self::ImplementsKeyword => "implements",

            Self::ForKeyword => "for",
            Self::WhileKeyword => "while",
            Self::IfKeyword => "if",
            Self::ElseKeyword => "else",
            Self::ReturnKeyword => "return",
            Self::BreakKeyword => "break",
            Self::PrintKeyword => "Print",

            Self::ThisKeyword => "this",
            Self::NullKeyword => "null",
            Self::TrueKeyword => "true",
            Self::FalseKeyword => "false",
            Self::NewKeyword => "new",
            Self::NewArrayKeyword => "NewArray",
            Self::ReadIntegerKeyword => "ReadInteger",
            Self::ReadLineKeyword => "ReadLine",

            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Assign => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::AmpAmp => "&&",
            Self::BarBar => "||",
            Self::Bang => "!",

            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
        })
    }
}

/// This enum specifies all the kinds of errors that the Decaf [Lexer](super::lexer::Lexer) can return.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// Returned when an unknown symbol is encountered.
    UnknownSymbol { symbol: String },

    /// Returned when a string literal is missing its closing quotation mark or runs past the end
    /// of its line.
    UnterminatedStringLiteral,

    /// Returned when a block comment is missing its closing "*/".
    UnterminatedBlockComment,

    /// Returned when an integer literal does not fit in a 32-bit signed integer.
    IntegerLiteralTooLarge { literal: String },

    /// Returned when a hex prefix ("0x") has no digits after it.
    MissingHexDigits,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => write!(f, "unknown symbol '{symbol}'"),
            Self::UnterminatedStringLiteral => f.write_str("unterminated string literal"),
            Self::UnterminatedBlockComment => f.write_str("unterminated block comment"),
            Self::IntegerLiteralTooLarge { literal } => {
                write!(f, "integer literal '{literal}' is out of range")
            }
            Self::MissingHexDigits => f.write_str("hexadecimal literal is missing digits"),
        }
    }
}
