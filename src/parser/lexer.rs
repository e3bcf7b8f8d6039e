// Copyright (c) ZeroC, Inc.

use super::tokens::*;
use crate::source_file::Location;

use std::iter::Peekable;
use std::str::CharIndices;

type LexerResult<'a> = Result<Token<'a>, Error>;

/// Converts Decaf source text into a stream of tokens.
///
/// This token stream is in turn consumed by the [Decaf parser](super::parser::Parser), which
/// parses the tokens into an [AST](crate::ast::Ast).
#[derive(Debug)]
pub struct Lexer<'input> {
    /// The source text the lexer is operating on.
    input: &'input str,

    /// Iterator over the characters in the source text.
    /// This is what the lexer actually operates on, by peeking at and consuming codepoints.
    buffer: Peekable<CharIndices<'input>>,

    /// The lexer's current [Location] in the source text.
    /// Used to tag tokens with their starting and ending locations.
    cursor: Location,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Lexer {
            input,
            buffer: input.char_indices().peekable(),
            cursor: Location::default(),
        }
    }

    /// Returns the lexer's byte position in the source text.
    fn get_position(&mut self) -> usize {
        match self.buffer.peek() {
            Some((i, _)) => *i,
            // `None` means we're at the end of the source text.
            None => self.input.len(),
        }
    }

    /// Consumes the next character in the buffer and moves the lexer's cursor forward accordingly.
    fn advance_buffer(&mut self) {
        if let Some((_, c)) = self.buffer.next() {
            if c == '\n' {
                self.cursor.row += 1;
                self.cursor.col = 1;
            } else {
                self.cursor.col += 1;
            }
        }
    }

    /// Consumes characters in the buffer until end-of-line (doesn't consume the EOL) or
    /// end-of-buffer is reached.
    fn advance_to_end_of_line(&mut self) {
        while matches!(self.buffer.peek(), Some((_, c)) if *c != '\n') {
            self.advance_buffer();
        }
    }

    /// Skips whitespace and comments until the next significant character.
    /// Returns an error if a block comment is left unterminated.
    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            match self.buffer.peek() {
                Some((_, c)) if c.is_whitespace() => self.advance_buffer(),
                Some((i, '/')) => {
                    let i = *i;
                    match self.input.as_bytes().get(i + 1) {
                        Some(b'/') => self.advance_to_end_of_line(),
                        Some(b'*') => self.skip_block_comment()?,
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consumes a "/* ... */" comment, including nested newlines.
    /// This function expects the lexer's cursor to be on the opening '/'.
    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let start_location = self.cursor;
        self.advance_buffer(); // Consume the '/'.
        self.advance_buffer(); // Consume the '*'.

        loop {
            match self.buffer.peek() {
                Some((i, '*')) if self.input.as_bytes().get(i + 1) == Some(&b'/') => {
                    self.advance_buffer(); // Consume the '*'.
                    self.advance_buffer(); // Consume the '/'.
                    return Ok(());
                }
                Some(_) => self.advance_buffer(),
                None => return Err((start_location, ErrorKind::UnterminatedBlockComment, self.cursor)),
            }
        }
    }

    /// Reads, consumes, and returns a string of alphanumeric and underscore characters.
    fn read_word(&mut self) -> &'input str {
        let start_position = self.get_position();
        while matches!(self.buffer.peek(), Some((_, c)) if c.is_ascii_alphanumeric() || *c == '_') {
            self.advance_buffer();
        }
        &self.input[start_position..self.get_position()]
    }

    /// Reads an identifier or keyword starting at the current character.
    fn lex_word(&mut self) -> TokenKind<'input> {
        match self.read_word() {
            "void" => TokenKind::VoidKeyword,
            "int" => TokenKind::IntKeyword,
            "double" => TokenKind::DoubleKeyword,
            "bool" => TokenKind::BoolKeyword,
            "string" => TokenKind::StringKeyword,
            "class" => TokenKind::ClassKeyword,
            "interface" => TokenKind::InterfaceKeyword,
            "extends" => TokenKind::ExtendsKeyword,
            "implements" => TokenKind::ImplementsKeyword,
            "for" => TokenKind::ForKeyword,
            "while" => TokenKind::WhileKeyword,
            "if" => TokenKind::IfKeyword,
            "else" => TokenKind::ElseKeyword,
            "return" => TokenKind::ReturnKeyword,
            "break" => TokenKind::BreakKeyword,
            "Print" => TokenKind::PrintKeyword,
            "this" => TokenKind::ThisKeyword,
            "null" => TokenKind::NullKeyword,
            "true" => TokenKind::TrueKeyword,
            "false" => TokenKind::FalseKeyword,
            "new" => TokenKind::NewKeyword,
            "NewArray" => TokenKind::NewArrayKeyword,
            "ReadInteger" => TokenKind::ReadIntegerKeyword,
            "ReadLine" => TokenKind::ReadLineKeyword,
            identifier => TokenKind::Identifier(identifier),
        }
    }

    /// Reads an integer or double literal starting at the current (digit) character.
    fn lex_number(&mut self) -> Result<TokenKind<'input>, ErrorKind> {
        let start_position = self.get_position();

        // Check for a hex literal: "0x" or "0X" followed by hex digits.
        if self.input[start_position..].starts_with("0x") || self.input[start_position..].starts_with("0X") {
            self.advance_buffer(); // Consume the '0'.
            self.advance_buffer(); // Consume the 'x'.
            let digits = self.read_word();
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ErrorKind::MissingHexDigits);
            }
            // Hex literals cover the full 32-bit pattern space, so parse unsigned and reinterpret.
            return match u32::from_str_radix(digits, 16) {
                Ok(value) => Ok(TokenKind::IntegerLiteral(value as i32)),
                Err(_) => Err(ErrorKind::IntegerLiteralTooLarge {
                    literal: self.input[start_position..self.get_position()].to_owned(),
                }),
            };
        }

        // Consume the integer digits.
        while matches!(self.buffer.peek(), Some((_, c)) if c.is_ascii_digit()) {
            self.advance_buffer();
        }

        // A '.' after the digits makes this a double literal.
        let is_double = matches!(self.buffer.peek(), Some((_, '.')));
        if is_double {
            self.advance_buffer(); // Consume the '.'.
            while matches!(self.buffer.peek(), Some((_, c)) if c.is_ascii_digit()) {
                self.advance_buffer();
            }

            // An exponent is only part of the literal if a digit (after an optional sign) follows.
            if let Some((i, 'E' | 'e')) = self.buffer.peek() {
                let rest = self.input[i + 1..].as_bytes();
                let sign_offset = usize::from(matches!(rest.first(), Some(b'+' | b'-')));
                if matches!(rest.get(sign_offset), Some(c) if c.is_ascii_digit()) {
                    self.advance_buffer(); // Consume the 'E'.
                    for _ in 0..sign_offset {
                        self.advance_buffer(); // Consume the sign.
                    }
                    while matches!(self.buffer.peek(), Some((_, c)) if c.is_ascii_digit()) {
                        self.advance_buffer();
                    }
                }
            }
        }

        let literal = &self.input[start_position..self.get_position()];
        if is_double {
            // Every lexically valid Decaf double is a valid Rust float literal.
            Ok(TokenKind::DoubleLiteral(literal.parse::<f64>().unwrap_or_default()))
        } else {
            match literal.parse::<i32>() {
                Ok(value) => Ok(TokenKind::IntegerLiteral(value)),
                Err(_) => Err(ErrorKind::IntegerLiteralTooLarge {
                    literal: literal.to_owned(),
                }),
            }
        }
    }

    /// Reads, consumes, and returns a string literal.
    /// The returned string doesn't include the quotation marks, just the content between them.
    ///
    /// This function expects the lexer's cursor to be immediately before the opening '"'.
    fn lex_string_literal(&mut self) -> Result<TokenKind<'input>, ErrorKind> {
        self.advance_buffer(); // Consume the opening quotation mark.

        let start_position = self.get_position();
        loop {
            match self.buffer.peek() {
                Some((i, '"')) => {
                    let end_position = *i;
                    self.advance_buffer(); // Consume the closing quotation mark.
                    return Ok(TokenKind::StringLiteral(&self.input[start_position..end_position]));
                }
                // String literals cannot span multiple lines.
                Some((_, '\n')) | None => return Err(ErrorKind::UnterminatedStringLiteral),
                Some(_) => self.advance_buffer(),
            }
        }
    }

    /// Reads an operator or punctuation token starting at the current character.
    fn lex_symbol(&mut self, c: char) -> Result<TokenKind<'input>, ErrorKind> {
        self.advance_buffer(); // Consume the character.

        // Consumes the next character and returns `two` if it matches `expected`,
        // otherwise returns `one` without consuming anything.
        let mut pair = |expected: char, two: TokenKind<'input>, one: TokenKind<'input>| {
            if matches!(self.buffer.peek(), Some((_, c)) if *c == expected) {
                self.advance_buffer();
                two
            } else {
                one
            }
        };

        match c {
            '+' => Ok(TokenKind::Plus),
            '-' => Ok(TokenKind::Minus),
            '*' => Ok(TokenKind::Star),
            '/' => Ok(TokenKind::Slash),
            '%' => Ok(TokenKind::Percent),
            '<' => Ok(pair('=', TokenKind::LessEqual, TokenKind::Less)),
            '>' => Ok(pair('=', TokenKind::GreaterEqual, TokenKind::Greater)),
            '=' => Ok(pair('=', TokenKind::EqualEqual, TokenKind::Assign)),
            '!' => Ok(pair('=', TokenKind::BangEqual, TokenKind::Bang)),
            '&' => {
                if matches!(self.buffer.peek(), Some((_, '&'))) {
                    self.advance_buffer();
                    Ok(TokenKind::AmpAmp)
                } else {
                    Err(ErrorKind::UnknownSymbol { symbol: "&".to_owned() })
                }
            }
            '|' => {
                if matches!(self.buffer.peek(), Some((_, '|'))) {
                    self.advance_buffer();
                    Ok(TokenKind::BarBar)
                } else {
                    Err(ErrorKind::UnknownSymbol { symbol: "|".to_owned() })
                }
            }
            ';' => Ok(TokenKind::Semicolon),
            ',' => Ok(TokenKind::Comma),
            '.' => Ok(TokenKind::Dot),
            '[' => Ok(TokenKind::LeftBracket),
            ']' => Ok(TokenKind::RightBracket),
            '(' => Ok(TokenKind::LeftParen),
            ')' => Ok(TokenKind::RightParen),
            '{' => Ok(TokenKind::LeftBrace),
            '}' => Ok(TokenKind::RightBrace),
            unknown => Err(ErrorKind::UnknownSymbol {
                symbol: unknown.to_string(),
            }),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = LexerResult<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(error) = self.skip_trivia() {
            return Some(Err(error));
        }

        let &(_, c) = self.buffer.peek()?;
        let start_location = self.cursor;

        let result = if c.is_ascii_alphabetic() {
            Ok(self.lex_word())
        } else if c.is_ascii_digit() {
            self.lex_number()
        } else if c == '"' {
            self.lex_string_literal()
        } else {
            self.lex_symbol(c)
        };

        Some(match result {
            Ok(kind) => Ok((start_location, kind, self.cursor)),
            Err(kind) => Err((start_location, kind, self.cursor)),
        })
    }
}
