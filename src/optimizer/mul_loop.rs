use crate::parser::Instruction;

/// Rewrite multiply-accumulate loops into a single `MultiplyAdd`.
///
/// The body must decrement the loop cell by exactly one per iteration, make
/// one `Add` at a fixed displacement, and bring the cursor back where it
/// started (net displacement zero). Both body orders occur in real programs:
/// `[->>+<<]` and `[>>+<<-]`. The loop then runs `cell[cursor]` times, so its
/// effect is `cell[cursor+offset] += cell[cursor] * factor; cell[cursor] = 0`
/// in one step. Anything that misses the pattern (extra targets, I/O, nested
/// loops, unbalanced movement) stays an ordinary bracket pair.
pub fn fold_mul_loops(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut folded = Vec::with_capacity(instructions.len());
    let mut index = 0;

    while index < instructions.len() {
        match instructions.get(index..index + 6) {
            Some(
                [Instruction::JumpIfZero(_), Instruction::Add(-1), Instruction::Move(out), Instruction::Add(factor), Instruction::Move(back), Instruction::JumpIfNonZero(_)]
                | [Instruction::JumpIfZero(_), Instruction::Move(out), Instruction::Add(factor), Instruction::Move(back), Instruction::Add(-1), Instruction::JumpIfNonZero(_)],
            ) if *out + *back == 0 => {
                folded.push(Instruction::MultiplyAdd {
                    offset: *out,
                    factor: *factor,
                });
                index += 6;
            }
            _ => {
                folded.push(instructions[index]);
                index += 1;
            }
        }
    }

    folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn decrement_first_body_folds() {
        let folded = fold_mul_loops(vec![
            JumpIfZero(5),
            Add(-1),
            Move(2),
            Add(3),
            Move(-2),
            JumpIfNonZero(0),
        ]);
        assert_eq!(
            folded,
            vec![MultiplyAdd {
                offset: 2,
                factor: 3,
            }]
        );
    }

    #[test]
    fn decrement_last_body_folds() {
        let folded = fold_mul_loops(vec![
            JumpIfZero(5),
            Move(-1),
            Add(1),
            Move(1),
            Add(-1),
            JumpIfNonZero(0),
        ]);
        assert_eq!(
            folded,
            vec![MultiplyAdd {
                offset: -1,
                factor: 1,
            }]
        );
    }

    #[test]
    fn negative_factors_fold_too() {
        let folded = fold_mul_loops(vec![
            JumpIfZero(5),
            Add(-1),
            Move(3),
            Add(-2),
            Move(-3),
            JumpIfNonZero(0),
        ]);
        assert_eq!(
            folded,
            vec![MultiplyAdd {
                offset: 3,
                factor: -2,
            }]
        );
    }

    #[test]
    fn unbalanced_movement_blocks_the_rewrite() {
        let body = vec![
            JumpIfZero(5),
            Add(-1),
            Move(2),
            Add(1),
            Move(-1),
            JumpIfNonZero(0),
        ];
        assert_eq!(fold_mul_loops(body.clone()), body);
    }

    #[test]
    fn wider_decrements_block_the_rewrite() {
        let body = vec![
            JumpIfZero(5),
            Add(-2),
            Move(1),
            Add(1),
            Move(-1),
            JumpIfNonZero(0),
        ];
        assert_eq!(fold_mul_loops(body.clone()), body);
    }

    #[test]
    fn io_in_the_body_blocks_the_rewrite() {
        let body = vec![
            JumpIfZero(6),
            Add(-1),
            Move(1),
            Output,
            Add(1),
            Move(-1),
            JumpIfNonZero(0),
        ];
        assert_eq!(fold_mul_loops(body.clone()), body);
    }

    #[test]
    fn multiple_targets_are_left_alone() {
        // [->+>+<<] fans out to two cells; out of this pattern's reach
        let body = vec![
            JumpIfZero(7),
            Add(-1),
            Move(1),
            Add(1),
            Move(1),
            Add(1),
            Move(-2),
            JumpIfNonZero(0),
        ];
        assert_eq!(fold_mul_loops(body.clone()), body);
    }
}
