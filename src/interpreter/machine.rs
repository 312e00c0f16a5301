use std::io::{ErrorKind, Read, Write};

use crate::parser::{Instruction, Program};

use super::{RuntimeError, Tape};

/// The execution engine: one instruction pointer walking the instruction
/// list, a freshly-zeroed tape, and the two byte streams the program talks
/// to. Streams are injected so tests can run against in-memory buffers and
/// `main` against locked stdin/stdout.
pub struct Machine<R, W> {
    tape: Tape,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Machine<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Machine {
            tape: Tape::new(),
            input,
            output,
        }
    }

    /// Run `program` to completion: `Ok(())` once the instruction pointer
    /// walks off the end of the list, `Err` on the first fault. Malformed
    /// programs never get this far, so there is no abort instruction.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        let instructions = &program.instructions;
        let mut ip = 0;

        while ip < instructions.len() {
            match instructions[ip] {
                Instruction::Move(delta) => self.tape.shift(delta)?,
                Instruction::Add(delta) => self.tape.add(delta),
                Instruction::Output => self.output.write_all(&[self.tape.get()])?,
                Instruction::Input => self.read_byte()?,
                Instruction::JumpIfZero(target) => {
                    if self.tape.get() == 0 {
                        // resumes just past the matching `]`
                        ip = target;
                    }
                }
                Instruction::JumpIfNonZero(target) => {
                    if self.tape.get() != 0 {
                        // resumes just past the matching `[`
                        ip = target;
                    }
                }
                Instruction::Clear => self.tape.set(0),
                Instruction::MultiplyAdd { offset, factor } => {
                    let value = self.tape.get();
                    if value != 0 {
                        let scaled = value.wrapping_mul(factor.rem_euclid(256) as u8);
                        self.tape.add_at(offset, scaled)?;
                        self.tape.set(0);
                    }
                }
            }
            ip += 1;
        }

        self.output.flush()?;
        Ok(())
    }

    /// One byte from the input stream. End of input leaves the cell as it
    /// was, which is not the same as writing zero. Pending output is flushed
    /// first so a prompt written just before a read is visible.
    fn read_byte(&mut self) -> Result<(), RuntimeError> {
        self.output.flush()?;
        let mut buf = [0u8];
        match self.input.read_exact(&mut buf) {
            Ok(()) => self.tape.set(buf[0]),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }
}
