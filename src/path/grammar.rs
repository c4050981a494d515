//! Tokenizer for SVG-style path data.
//!
//! Produces one [`RawToken`] per drawing command, expanding implicit
//! repetition (`L1,2 3,4` is two linetos, `M1,2 3,4` is a moveto followed by
//! a lineto). Parsing stops at the first malformed token; there is no partial
//! recovery.
use crate::error::{ParseError, ParseErrorKind};

use super::command::CommandKind;

/// One command letter with exactly the parameters its arity requires.
#[derive(Debug, Clone, PartialEq)]
pub struct RawToken {
    /// Command letter; an implicit repetition carries the letter it stands for.
    pub letter: char,
    pub params: Vec<f64>,
    /// Byte offset of the letter, or of the first parameter for implicit commands.
    pub offset: usize,
}

impl RawToken {
    /// Command kind and relativity encoded by the letter.
    #[must_use]
    pub fn kind(&self) -> Option<(CommandKind, bool)> {
        CommandKind::from_letter(self.letter)
    }
}

/// Tokenizes `text`. Empty or whitespace-only input yields no tokens.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the byte offset of the first token that
/// could not be parsed.
pub fn parse(text: &str) -> Result<Vec<RawToken>, ParseError> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();

    scanner.skip_whitespace();
    while let Some(letter) = scanner.peek_char() {
        let offset = scanner.pos;
        let Some((kind, relative)) = CommandKind::from_letter(letter) else {
            let kind = if tokens.is_empty() {
                ParseErrorKind::MissingMoveTo
            } else {
                ParseErrorKind::UnexpectedCharacter(letter)
            };
            return Err(ParseError::new(offset, kind));
        };
        if tokens.is_empty() && kind != CommandKind::Move {
            return Err(ParseError::new(offset, ParseErrorKind::MissingMoveTo));
        }
        scanner.pos += 1;
        scanner.skip_whitespace();

        if kind.arity() == 0 {
            tokens.push(RawToken {
                letter,
                params: Vec::new(),
                offset,
            });
            continue;
        }

        let mut group_letter = letter;
        let mut group_offset = offset;
        loop {
            let params = scanner.group(kind, letter)?;
            tokens.push(RawToken {
                letter: group_letter,
                params,
                offset: group_offset,
            });

            let comma = scanner.skip_separator();
            if scanner.at_number_start() {
                group_offset = scanner.pos;
                if kind == CommandKind::Move {
                    group_letter = CommandKind::Line.letter(relative);
                }
            } else if let Some(comma) = comma {
                return Err(ParseError::new(
                    comma,
                    ParseErrorKind::UnexpectedCharacter(','),
                ));
            } else {
                break;
            }
        }
    }

    Ok(tokens)
}

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// The whole character at the cursor, which only ever stops on ASCII
    /// bytes and so always sits on a character boundary.
    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace with at most one comma; returns the comma's offset.
    fn skip_separator(&mut self) -> Option<usize> {
        self.skip_whitespace();
        let comma = (self.peek() == Some(b',')).then_some(self.pos);
        if comma.is_some() {
            self.pos += 1;
            self.skip_whitespace();
        }
        comma
    }

    fn at_number_start(&self) -> bool {
        self.peek()
            .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.'))
    }

    /// Parses one parameter group of `kind`.
    fn group(&mut self, kind: CommandKind, letter: char) -> Result<Vec<f64>, ParseError> {
        let arity = kind.arity();
        let mut params = Vec::with_capacity(arity);
        for i in 0..arity {
            if i > 0 {
                self.skip_separator();
            }
            let is_flag = kind == CommandKind::Arc && (i == 3 || i == 4);
            let value = if is_flag {
                self.flag(letter, arity)?
            } else {
                self.number(letter, arity)?
            };
            params.push(value);
        }
        Ok(params)
    }

    fn missing_or_unexpected(&self, letter: char, expected: usize) -> ParseError {
        let kind = match self.peek_char() {
            Some(c) if !c.is_ascii_alphabetic() => ParseErrorKind::UnexpectedCharacter(c),
            _ => ParseErrorKind::MissingParameters {
                command: letter,
                expected,
            },
        };
        ParseError::new(self.pos, kind)
    }

    fn flag(&mut self, letter: char, expected: usize) -> Result<f64, ParseError> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(0.0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1.0)
            }
            Some(b) if !b.is_ascii_alphabetic() => {
                Err(ParseError::new(self.pos, ParseErrorKind::InvalidFlag))
            }
            _ => Err(self.missing_or_unexpected(letter, expected)),
        }
    }

    /// Reads `[sign] digits [. digits] [(e|E) [sign] digits]`.
    fn number(&mut self, letter: char, expected: usize) -> Result<f64, ParseError> {
        if !self.at_number_start() {
            return Err(self.missing_or_unexpected(letter, expected));
        }
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let int_digits = self.digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.digits();
        }
        if int_digits + frac_digits == 0 {
            return Err(ParseError::new(start, ParseErrorKind::InvalidNumber));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }
        self.text[start..self.pos]
            .parse::<f64>()
            .map_err(|_| ParseError::new(start, ParseErrorKind::InvalidNumber))
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn letters(tokens: &[RawToken]) -> String {
        tokens.iter().map(|t| t.letter).collect()
    }

    #[test]
    fn empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let tokens = parse("M0,0 L10,0 10,10").unwrap();
        assert_eq!(letters(&tokens), "MLL");
        assert_eq!(tokens[2].params, vec![10.0, 10.0]);

        let tokens = parse("m1 2 3 4 5 6").unwrap();
        assert_eq!(letters(&tokens), "mll");
    }

    #[test]
    fn compact_numbers() {
        let tokens = parse("M.5.5L-1-2e1,3E-1-4").unwrap();
        assert_eq!(tokens[0].params, vec![0.5, 0.5]);
        assert_eq!(tokens[1].params, vec![-1.0, -20.0]);
        assert_eq!(tokens[2].params, vec![0.3, -4.0]);
        // Odd parameter count leaves the last lineto incomplete.
        assert!(parse("M0 0L1-2 3").is_err());
    }

    #[test]
    fn exponent_needs_digits() {
        // "2e" is not an exponent; the 'e' then fails as an unknown letter.
        let err = parse("M1 2e").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('e'));
    }

    #[test]
    fn arc_flags_without_separators() {
        let tokens = parse("M0 0A5 5 0 1110 10").unwrap();
        assert_eq!(tokens[1].params, vec![5.0, 5.0, 0.0, 1.0, 1.0, 10.0, 10.0]);
    }

    #[test]
    fn bad_arc_flag() {
        let err = parse("M0 0 A5 5 0 2 1 10 10").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidFlag);
        assert_eq!(err.offset, 12);
    }

    #[test]
    fn must_start_with_moveto() {
        let err = parse("  L1 2").unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(err.kind, ParseErrorKind::MissingMoveTo);
        assert_eq!(parse("1 2").unwrap_err().kind, ParseErrorKind::MissingMoveTo);
    }

    #[test]
    fn missing_parameters() {
        let err = parse("M0 0 C1 2 3 4").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingParameters {
                command: 'C',
                expected: 6
            }
        );
        assert_eq!(err.offset, 13);
        assert!(parse("M0 0 L").is_err());
    }

    #[test]
    fn close_takes_no_parameters() {
        let tokens = parse("M0 0 L1 1 Z m2 2 z").unwrap();
        assert_eq!(letters(&tokens), "MLZmz");
        let err = parse("M0 0 Z 5").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('5'));
    }

    #[test]
    fn stray_commas() {
        assert_eq!(parse("M0,,0").unwrap_err().offset, 3);
        let err = parse("M0,0, L1,1").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter(','));
    }

    #[test]
    fn unknown_letter() {
        let err = parse("M0 0 X1 1").unwrap_err();
        assert_eq!(err.offset, 5);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('X'));
    }

    #[test]
    fn non_ascii_characters_are_reported_whole() {
        let err = parse("M0 0 é").unwrap_err();
        assert_eq!(err.offset, 5);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('é'));

        let err = parse("M0 0 L1 ½").unwrap_err();
        assert_eq!(err.offset, 8);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('½'));

        assert_eq!(parse("é").unwrap_err().kind, ParseErrorKind::MissingMoveTo);
    }

    #[test]
    fn implicit_offsets_point_at_group() {
        let tokens = parse("M0 0 L1 1 2 2").unwrap();
        assert_eq!(tokens[1].offset, 5);
        assert_eq!(tokens[2].offset, 10);
    }
}
