use crate::parser::Instruction;

/// Rewrite zero-loops into a single `Clear`.
///
/// After contraction a `[-]` (or `[+]`) is a loop whose whole body is one
/// `Add(±1)`: a unit step walks the cell monotonically to zero under wrapping
/// arithmetic and the loop exits exactly there, so its net effect is "set to
/// zero" for every starting value. Any other body is left alone.
pub fn fold_clear_loops(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut folded = Vec::with_capacity(instructions.len());
    let mut index = 0;

    while index < instructions.len() {
        match instructions.get(index..index + 3) {
            // adjacency means the two jumps are each other's match
            Some(
                [Instruction::JumpIfZero(_), Instruction::Add(1 | -1), Instruction::JumpIfNonZero(_)],
            ) => {
                folded.push(Instruction::Clear);
                index += 3;
            }
            _ => {
                folded.push(instructions[index]);
                index += 1;
            }
        }
    }

    folded
}
