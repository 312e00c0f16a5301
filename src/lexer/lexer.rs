use std::iter::Peekable;
use std::str::Chars;

use super::{Token, TokenKind};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human readable position in the source, attached to each token */
    cur_line: usize,
    cur_col: usize,

    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            cur_line: 1,
            cur_col: 1,

            chars: source.chars().peekable(),
        }
    }

    fn transform_to_kind(&mut self, c: char) -> TokenKind {
        match c {
            '>' => TokenKind::MoveRight,
            '<' => TokenKind::MoveLeft,
            '+' => TokenKind::Increment,
            '-' => TokenKind::Decrement,
            '.' => TokenKind::Output,
            ',' => TokenKind::Input,
            '[' => TokenKind::LoopOpen,
            ']' => TokenKind::LoopClose,
            c => {
                // Simplify the comment stream down to a single token
                let mut comment = String::from(c);
                loop {
                    match self.chars.peek() {
                        Some('>' | '<' | '+' | '-' | '.' | ',' | '[' | ']') | None => break,
                        Some(_) => {
                            if let Some(next) = self.consume_char() {
                                comment.push(next);
                            }
                        }
                    }
                }
                TokenKind::Comment(comment)
            }
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.cur_line += 1;
            self.cur_col = 1;
        } else {
            self.cur_col += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let (line, column) = (self.cur_line, self.cur_col);
        let c = self.consume_char()?;
        Some(Token {
            kind: self.transform_to_kind(c),
            line,
            column,
        })
    }

    pub fn tokens(&mut self) -> Vec<Token> {
        let mut v = vec![];
        while let Some(token) = self.next_token() {
            v.push(token);
        }
        v
    }
}
