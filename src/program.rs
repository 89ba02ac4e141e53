// Instruction set encoding for the Ethereum virtual machine.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Whole-program operations: byte size, serialization and navigation of a
//! decoded instruction sequence by its original byte offsets.
//!
//! All three share the width rule of [`Instr::byte_count`]; keeping them on a
//! single rule is what makes jump-destination checks against the serialized
//! form agree with the decoded form.

use alloc::vec::Vec;

use crate::isa::{EncodeError, Instr};

/// Errors produced when a byte offset does not match the instruction layout
/// of the program it points into.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(doc_comments)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum MalformedOffset {
    /// byte offset overruns the end of the program by {0} bytes
    PastEnd(usize),

    /// byte offset lands {0} bytes inside a multi-byte instruction
    InsideInstruction(usize),
}

/// Returns the total number of bytes the program occupies once serialized.
///
/// The sum is total and does not validate instruction arguments; for every
/// program accepted by [`program_code`] it equals the length of the produced
/// byte sequence. Annotations contribute zero bytes.
pub fn program_size<S: ?Sized>(code: &[Instr<S>]) -> usize {
    code.iter().map(|instr| instr.byte_count() as usize).sum()
}

/// Serializes a program into its canonical bytes-on-the-wire form.
///
/// The produced sequence is the concatenation of [`Instr::encode`] over the
/// program in order; an empty program serializes to empty bytes.
pub fn program_code<S: ?Sized>(code: &[Instr<S>]) -> Result<Vec<u8>, EncodeError> {
    let mut bytecode = Vec::with_capacity(program_size(code));
    for instr in code {
        instr.encode_into(&mut bytecode)?;
    }
    Ok(bytecode)
}

/// Skips instructions from the front of a program until `budget` bytes of its
/// original serialized form are consumed, returning the remaining suffix.
///
/// Each instruction is charged its true encoded width, so the cut point always
/// corresponds to the same byte offset in the serialized program. This is the
/// primitive behind jump-destination validation: a jump target offset is valid
/// iff `drop_bytes(code, target)` succeeds and the returned suffix starts
/// (after any annotations) with a JUMPDEST.
///
/// A budget of zero returns the program unchanged. A budget overrunning the
/// end of the program, or landing strictly inside a push instruction, fails
/// with [`MalformedOffset`]; such offsets are never resolved by truncation.
pub fn drop_bytes<S: ?Sized>(
    code: &[Instr<S>],
    budget: usize,
) -> Result<&[Instr<S>], MalformedOffset> {
    let mut rest = code;
    let mut budget = budget;
    while budget > 0 {
        let (first, tail) = match rest.split_first() {
            Some(split) => split,
            None => return Err(MalformedOffset::PastEnd(budget)),
        };
        let width = first.byte_count() as usize;
        // Zero-width annotations pass for free; the budget stays as is.
        if width > budget {
            return Err(MalformedOffset::InsideInstruction(budget));
        }
        budget -= width;
        rest = tail;
    }
    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{ArithmOp, ControlFlowOp, MiscOp};

    fn seq() -> Vec<Instr> {
        vec![
            Instr::Push(vec![0xaa, 0xbb]),
            Instr::ControlFlow(ControlFlowOp::JumpDest),
        ]
    }

    #[test]
    fn size_and_code_agree() {
        let code = vec![
            Instr::<()>::Misc(MiscOp::Stop),
            Instr::Push(vec![0x01, 0x02, 0x03]),
            Instr::annotation(|_| true),
            Instr::Dup(2),
            Instr::Arithm(ArithmOp::Add),
        ];
        assert_eq!(program_size(&code), program_code(&code).unwrap().len());
    }

    #[test]
    fn stop_program() {
        let code = vec![Instr::<()>::Misc(MiscOp::Stop)];
        assert_eq!(program_code(&code).unwrap(), vec![0x00]);
        assert_eq!(program_size(&code), 1);
    }

    #[test]
    fn annotations_are_invisible() {
        let code = vec![Instr::<()>::annotation(|_| true), Instr::Misc(MiscOp::Stop)];
        assert_eq!(program_code(&code).unwrap(), vec![0x00]);
        assert_eq!(program_size(&code), 1);

        let interspersed = vec![
            Instr::<()>::annotation(|_| true),
            Instr::Push(vec![0x01]),
            Instr::annotation(|_| false),
            Instr::ControlFlow(ControlFlowOp::Jump),
            Instr::annotation(|_| true),
        ];
        let plain = vec![
            Instr::<()>::Push(vec![0x01]),
            Instr::ControlFlow(ControlFlowOp::Jump),
        ];
        assert_eq!(program_code(&interspersed).unwrap(), program_code(&plain).unwrap());
        assert_eq!(program_size(&interspersed), program_size(&plain));
    }

    #[test]
    fn push_then_jump() {
        let code = vec![
            Instr::<()>::Push(vec![0x01]),
            Instr::ControlFlow(ControlFlowOp::Jump),
        ];
        assert_eq!(program_code(&code).unwrap(), vec![0x60, 0x01, 0x56]);
        assert_eq!(program_size(&code), 3);
    }

    #[test]
    fn empty_program() {
        let code: Vec<Instr> = vec![];
        assert_eq!(program_code(&code).unwrap(), Vec::<u8>::new());
        assert_eq!(program_size(&code), 0);
        assert_eq!(drop_bytes(&code, 0).unwrap(), &[] as &[Instr]);
        assert_eq!(drop_bytes(&code, 1), Err(MalformedOffset::PastEnd(1)));
    }

    #[test]
    fn skip_lands_on_boundaries() {
        let code = seq();
        assert_eq!(drop_bytes(&code, 0).unwrap(), &code[..]);
        assert_eq!(drop_bytes(&code, 3).unwrap(), &code[1..]);
        assert_eq!(drop_bytes(&code, 4).unwrap(), &[] as &[Instr]);
    }

    #[test]
    fn skip_inside_push_immediate() {
        let code = seq();
        assert_eq!(drop_bytes(&code, 1), Err(MalformedOffset::InsideInstruction(1)));
        assert_eq!(drop_bytes(&code, 2), Err(MalformedOffset::InsideInstruction(2)));
    }

    #[test]
    fn skip_past_end() {
        let code = seq();
        assert_eq!(drop_bytes(&code, 5), Err(MalformedOffset::PastEnd(1)));
        assert_eq!(drop_bytes(&code, 100), Err(MalformedOffset::PastEnd(96)));
    }

    #[test]
    fn skip_through_annotations() {
        let code = vec![
            Instr::<()>::annotation(|_| true),
            Instr::Push(vec![0xaa, 0xbb]),
            Instr::annotation(|_| true),
            Instr::ControlFlow(ControlFlowOp::JumpDest),
            Instr::annotation(|_| true),
        ];
        // The leading annotation is passed for free; the budget is exhausted
        // right before the annotation preceding JUMPDEST, which therefore
        // stays in the suffix.
        let rest = drop_bytes(&code, 3).unwrap();
        assert_eq!(rest.len(), 3);
        assert_eq!(rest.get(1), Some(&Instr::ControlFlow(ControlFlowOp::JumpDest)));
        // Zero budget never consumes anything, leading annotations included.
        assert_eq!(drop_bytes(&code, 0).unwrap().len(), code.len());
        // Consuming the whole program leaves the trailing annotation.
        assert_eq!(drop_bytes(&code, 4).unwrap().len(), 1);
    }

    #[test]
    fn jumpdest_validation_scenario() {
        // PUSH1 0x04; JUMP; INVALID; JUMPDEST; STOP
        let code = vec![
            Instr::<()>::Push(vec![0x04]),
            Instr::ControlFlow(ControlFlowOp::Jump),
            Instr::Unknown(0xfe),
            Instr::ControlFlow(ControlFlowOp::JumpDest),
            Instr::Misc(MiscOp::Stop),
        ];
        let target = 0x04;
        let rest = drop_bytes(&code, target).unwrap();
        assert_eq!(rest.first(), Some(&Instr::ControlFlow(ControlFlowOp::JumpDest)));
        // The byte layout agrees with the serialized program.
        assert_eq!(program_code(&code).unwrap()[target], 0x5b);
    }
}
