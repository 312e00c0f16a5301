use crate::lexer::{Token, TokenKind};

use super::{Instruction, JumpTable, ParseError, Program};

pub struct Parser<'a> {
    tokens: std::slice::Iter<'a, Token>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser {
            tokens: tokens.iter(),
        }
    }

    /// Build the flat instruction list, cross-referencing every bracket pair
    /// through a stack so that `jumps.target(open) == close` and vice versa.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut instructions = vec![];
        let mut open_loops: Vec<(usize, usize, usize)> = vec![];
        let mut pairs = vec![];

        for token in self.tokens.by_ref() {
            let index = instructions.len();
            let instruction = match &token.kind {
                TokenKind::MoveRight => Instruction::Move(1),
                TokenKind::MoveLeft => Instruction::Move(-1),
                TokenKind::Increment => Instruction::Add(1),
                TokenKind::Decrement => Instruction::Add(-1),
                TokenKind::Output => Instruction::Output,
                TokenKind::Input => Instruction::Input,
                TokenKind::LoopOpen => {
                    open_loops.push((index, token.line, token.column));
                    // target is patched once the matching `]` shows up
                    Instruction::JumpIfZero(0)
                }
                TokenKind::LoopClose => match open_loops.pop() {
                    Some((open, _, _)) => {
                        instructions[open] = Instruction::JumpIfZero(index);
                        pairs.push((open, index));
                        Instruction::JumpIfNonZero(open)
                    }
                    None => {
                        return Err(ParseError::UnmatchedBracket {
                            symbol: ']',
                            line: token.line,
                            column: token.column,
                        })
                    }
                },
                // comments never reach the instruction list
                TokenKind::Comment(_) => continue,
            };
            instructions.push(instruction);
        }

        if let Some((_, line, column)) = open_loops.pop() {
            return Err(ParseError::UnmatchedBracket {
                symbol: '[',
                line,
                column,
            });
        }

        let mut jumps = JumpTable::identity(instructions.len());
        for (open, close) in pairs {
            jumps.pair(open, close);
        }

        Ok(Program {
            instructions,
            jumps,
        })
    }
}
