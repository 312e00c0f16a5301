use std::collections::HashSet;

use clap::ValueEnum;

use crate::parser::{Instruction, JumpTable, Program};

pub mod clear_loop;
pub mod contraction;
pub mod mul_loop;

/// The individual rewrite passes. Optimization "tiers" are just subsets of
/// this list; the application order is fixed no matter which are selected.
#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Optimization {
    /// Collapse runs of `+`/`-` and `>`/`<` into one instruction
    Contraction,
    /// Rewrite `[-]`-shaped loops into a single Clear
    ClearLoops,
    /// Rewrite move/copy loops into a single MultiplyAdd
    MulLoops,
}

impl Optimization {
    pub fn all() -> HashSet<Optimization> {
        HashSet::from([
            Optimization::Contraction,
            Optimization::ClearLoops,
            Optimization::MulLoops,
        ])
    }
}

/// Run the enabled passes over `program` in their fixed order, then rewire
/// the surviving bracket pairs against the new instruction positions.
///
/// Every pass preserves observable behavior for all inputs, so optimizing
/// never introduces an error a program didn't already have. Applying
/// `optimize` to its own output is a fixed point.
pub fn optimize(program: &Program, passes: &HashSet<Optimization>) -> Program {
    let mut instructions = program.instructions.clone();

    if passes.contains(&Optimization::Contraction) {
        instructions = contraction::contract(instructions);
    }
    if passes.contains(&Optimization::ClearLoops) {
        instructions = clear_loop::fold_clear_loops(instructions);
    }
    if passes.contains(&Optimization::MulLoops) {
        instructions = mul_loop::fold_mul_loops(instructions);
    }

    rewire(instructions)
}

/// Re-pair every remaining `JumpIfZero`/`JumpIfNonZero` and rebuild the jump
/// table. The passes never reorder brackets, so a plain stack match suffices.
fn rewire(mut instructions: Vec<Instruction>) -> Program {
    let mut jumps = JumpTable::identity(instructions.len());
    let mut stack = vec![];

    for index in 0..instructions.len() {
        match instructions[index] {
            Instruction::JumpIfZero(_) => stack.push(index),
            Instruction::JumpIfNonZero(_) => {
                let open = stack.pop().expect("passes keep brackets balanced");
                instructions[open] = Instruction::JumpIfZero(index);
                instructions[index] = Instruction::JumpIfNonZero(open);
                jumps.pair(open, index);
            }
            _ => {}
        }
    }

    Program {
        instructions,
        jumps,
    }
}
