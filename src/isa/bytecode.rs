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

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use super::instr::{
    ArithmOp, BitwiseOp, ControlFlowOp, InfoOp, Instr, LogOp, MemoryOp, MiscOp, SArithmOp,
    StackOp, StorageOp,
};
use super::opcodes::*;

/// Longest push immediate the machine accepts.
pub const PUSH_MAX_LEN: usize = 32;

/// Deepest stack position addressable by dup and swap instructions.
pub const DUP_SWAP_MAX_DEPTH: u8 = 16;

/// Errors produced when an instruction with an out-of-domain argument is
/// encoded.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(doc_comments)]
#[cfg_attr(feature = "std", derive(Error))]
pub enum EncodeError {
    /// stack depth {0} of a dup or swap instruction is outside of the valid 1..=16 range
    InvalidParameter(u8),

    /// push immediate of {0} bytes is outside of the valid 1..=32 range
    InvalidImmediateLength(usize),
}

/// Byte encoding of a fixed-width opcode family.
///
/// Every family enumeration is closed, and every variant has exactly one byte
/// value, so the encoding is total and pure; fallible encodings (push, dup,
/// swap) live on [`Instr`] instead.
pub trait Bytecode {
    /// Returns the range of opcode bytes covered by the family.
    ///
    /// The range may be sparse: bytes inside it can belong to other families.
    fn op_range() -> RangeInclusive<u8>;

    /// Returns the byte representing the instruction in the opcode table.
    fn opcode_byte(&self) -> u8;
}

impl Bytecode for BitwiseOp {
    fn op_range() -> RangeInclusive<u8> { OP_AND..=OP_BYTE }

    fn opcode_byte(&self) -> u8 {
        match self {
            BitwiseOp::And => OP_AND,
            BitwiseOp::Or => OP_OR,
            BitwiseOp::Xor => OP_XOR,
            BitwiseOp::Not => OP_NOT,
            BitwiseOp::Byte => OP_BYTE,
        }
    }
}

impl Bytecode for ArithmOp {
    fn op_range() -> RangeInclusive<u8> { OP_ADD..=OP_SHA3 }

    fn opcode_byte(&self) -> u8 {
        match self {
            ArithmOp::Add => OP_ADD,
            ArithmOp::Mul => OP_MUL,
            ArithmOp::Sub => OP_SUB,
            ArithmOp::Div => OP_DIV,
            ArithmOp::Mod => OP_MOD,
            ArithmOp::AddMod => OP_ADDMOD,
            ArithmOp::MulMod => OP_MULMOD,
            ArithmOp::Exp => OP_EXP,
            ArithmOp::Lt => OP_LT,
            ArithmOp::Gt => OP_GT,
            ArithmOp::Eq => OP_EQ,
            ArithmOp::IsZero => OP_ISZERO,
            ArithmOp::Sha3 => OP_SHA3,
        }
    }
}

impl Bytecode for SArithmOp {
    fn op_range() -> RangeInclusive<u8> { OP_SDIV..=OP_SGT }

    fn opcode_byte(&self) -> u8 {
        match self {
            SArithmOp::SDiv => OP_SDIV,
            SArithmOp::SMod => OP_SMOD,
            SArithmOp::SignExtend => OP_SIGNEXTEND,
            SArithmOp::SLt => OP_SLT,
            SArithmOp::SGt => OP_SGT,
        }
    }
}

impl Bytecode for InfoOp {
    fn op_range() -> RangeInclusive<u8> { OP_ADDRESS..=OP_GAS }

    fn opcode_byte(&self) -> u8 {
        match self {
            InfoOp::Address => OP_ADDRESS,
            InfoOp::Balance => OP_BALANCE,
            InfoOp::Origin => OP_ORIGIN,
            InfoOp::Caller => OP_CALLER,
            InfoOp::CallValue => OP_CALLVALUE,
            InfoOp::CallDataSize => OP_CALLDATASIZE,
            InfoOp::CodeSize => OP_CODESIZE,
            InfoOp::GasPrice => OP_GASPRICE,
            InfoOp::ExtCodeSize => OP_EXTCODESIZE,
            InfoOp::BlockHash => OP_BLOCKHASH,
            InfoOp::Coinbase => OP_COINBASE,
            InfoOp::Timestamp => OP_TIMESTAMP,
            InfoOp::Number => OP_NUMBER,
            InfoOp::Difficulty => OP_DIFFICULTY,
            InfoOp::GasLimit => OP_GASLIMIT,
            InfoOp::Gas => OP_GAS,
        }
    }
}

impl Bytecode for StackOp {
    fn op_range() -> RangeInclusive<u8> { OP_CALLDATALOAD..=OP_POP }

    fn opcode_byte(&self) -> u8 {
        match self {
            StackOp::CallDataLoad => OP_CALLDATALOAD,
            StackOp::Pop => OP_POP,
        }
    }
}

impl Bytecode for MemoryOp {
    fn op_range() -> RangeInclusive<u8> { OP_CALLDATACOPY..=OP_MSIZE }

    fn opcode_byte(&self) -> u8 {
        match self {
            MemoryOp::CallDataCopy => OP_CALLDATACOPY,
            MemoryOp::CodeCopy => OP_CODECOPY,
            MemoryOp::ExtCodeCopy => OP_EXTCODECOPY,
            MemoryOp::MLoad => OP_MLOAD,
            MemoryOp::MStore => OP_MSTORE,
            MemoryOp::MStore8 => OP_MSTORE8,
            MemoryOp::MSize => OP_MSIZE,
        }
    }
}

impl Bytecode for StorageOp {
    fn op_range() -> RangeInclusive<u8> { OP_SLOAD..=OP_SSTORE }

    fn opcode_byte(&self) -> u8 {
        match self {
            StorageOp::SLoad => OP_SLOAD,
            StorageOp::SStore => OP_SSTORE,
        }
    }
}

impl Bytecode for ControlFlowOp {
    fn op_range() -> RangeInclusive<u8> { OP_JUMP..=OP_JUMPDEST }

    fn opcode_byte(&self) -> u8 {
        match self {
            ControlFlowOp::Jump => OP_JUMP,
            ControlFlowOp::JumpI => OP_JUMPI,
            ControlFlowOp::Pc => OP_PC,
            ControlFlowOp::JumpDest => OP_JUMPDEST,
        }
    }
}

impl Bytecode for LogOp {
    fn op_range() -> RangeInclusive<u8> { OP_LOG0..=OP_LOG4 }

    fn opcode_byte(&self) -> u8 {
        match self {
            LogOp::Log0 => OP_LOG0,
            LogOp::Log1 => OP_LOG1,
            LogOp::Log2 => OP_LOG2,
            LogOp::Log3 => OP_LOG3,
            LogOp::Log4 => OP_LOG4,
        }
    }
}

impl Bytecode for MiscOp {
    fn op_range() -> RangeInclusive<u8> { OP_STOP..=OP_SUICIDE }

    fn opcode_byte(&self) -> u8 {
        match self {
            MiscOp::Stop => OP_STOP,
            MiscOp::Create => OP_CREATE,
            MiscOp::Call => OP_CALL,
            MiscOp::CallCode => OP_CALLCODE,
            MiscOp::Return => OP_RETURN,
            MiscOp::DelegateCall => OP_DELEGATECALL,
            MiscOp::Suicide => OP_SUICIDE,
        }
    }
}

/// Computes the opcode byte of a dup instruction for a given stack depth.
///
/// Fails with [`EncodeError::InvalidParameter`] when the depth is outside of
/// the `1..=16` range; depths are never clamped or wrapped.
pub fn dup_opcode(depth: u8) -> Result<u8, EncodeError> {
    if depth < 1 || depth > DUP_SWAP_MAX_DEPTH {
        return Err(EncodeError::InvalidParameter(depth));
    }
    Ok(OP_DUP_BASE + depth)
}

/// Computes the opcode byte of a swap instruction for a given stack depth.
///
/// Fails with [`EncodeError::InvalidParameter`] when the depth is outside of
/// the `1..=16` range; depths are never clamped or wrapped.
pub fn swap_opcode(depth: u8) -> Result<u8, EncodeError> {
    if depth < 1 || depth > DUP_SWAP_MAX_DEPTH {
        return Err(EncodeError::InvalidParameter(depth));
    }
    Ok(OP_SWAP_BASE + depth)
}

impl<S: ?Sized> Instr<S> {
    /// Returns the number of bytes the instruction occupies in the serialized
    /// program: 0 for annotations, 1 plus the immediate length for push and 1
    /// for everything else.
    ///
    /// The count is total and does not validate immediate lengths or stack
    /// depths; validation happens in [`Instr::encode`]. For every encodable
    /// instruction `instr.byte_count() as usize == instr.encode()?.len()`.
    pub fn byte_count(&self) -> u16 {
        match self {
            Instr::Annotation(_) => 0,
            Instr::Push(data) => 1 + data.len() as u16,
            _ => 1,
        }
    }

    /// Serializes the instruction, appending its bytes to `code`.
    ///
    /// This is the single authority on how instructions map to bytes; the
    /// width charged by [`crate::drop_bytes`] and [`crate::program_size`]
    /// derives from the same rule.
    pub fn encode_into(&self, code: &mut Vec<u8>) -> Result<(), EncodeError> {
        match self {
            Instr::Bitwise(op) => code.push(op.opcode_byte()),
            Instr::Arithm(op) => code.push(op.opcode_byte()),
            Instr::SArithm(op) => code.push(op.opcode_byte()),
            Instr::Info(op) => code.push(op.opcode_byte()),
            Instr::Stack(op) => code.push(op.opcode_byte()),
            Instr::Memory(op) => code.push(op.opcode_byte()),
            Instr::Storage(op) => code.push(op.opcode_byte()),
            Instr::ControlFlow(op) => code.push(op.opcode_byte()),
            Instr::Log(op) => code.push(op.opcode_byte()),
            Instr::Misc(op) => code.push(op.opcode_byte()),
            Instr::Push(data) => {
                if data.is_empty() || data.len() > PUSH_MAX_LEN {
                    return Err(EncodeError::InvalidImmediateLength(data.len()));
                }
                code.push(OP_PUSH_BASE + data.len() as u8);
                code.extend_from_slice(data);
            }
            Instr::Dup(depth) => code.push(dup_opcode(*depth)?),
            Instr::Swap(depth) => code.push(swap_opcode(*depth)?),
            Instr::Unknown(byte) => code.push(*byte),
            Instr::Annotation(_) => {}
        }
        Ok(())
    }

    /// Serializes the instruction into a standalone byte sequence.
    ///
    /// Most instructions produce a single byte; push produces the opcode byte
    /// followed by its immediate data verbatim, and annotations produce an
    /// empty sequence.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut code = Vec::with_capacity(self.byte_count() as usize);
        self.encode_into(&mut code)?;
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_encoding() {
        let instr = Instr::<()>::Push(vec![0x01]);
        assert_eq!(instr.encode().unwrap(), vec![0x60, 0x01]);

        let data: Vec<u8> = (0..32).collect();
        let instr = Instr::<()>::Push(data.clone());
        let code = instr.encode().unwrap();
        assert_eq!(code[0], 0x7f);
        assert_eq!(&code[1..], &data[..]);
    }

    #[test]
    fn push_width() {
        for len in 1..=32usize {
            let instr = Instr::<()>::Push(vec![0xaa; len]);
            let code = instr.encode().unwrap();
            assert_eq!(code.len(), 1 + len);
            assert_eq!(code[0], 0x5f + len as u8);
            assert_eq!(instr.byte_count() as usize, code.len());
        }
    }

    #[test]
    fn push_domain() {
        assert_eq!(
            Instr::<()>::Push(vec![]).encode(),
            Err(EncodeError::InvalidImmediateLength(0))
        );
        assert_eq!(
            Instr::<()>::Push(vec![0x00; 33]).encode(),
            Err(EncodeError::InvalidImmediateLength(33))
        );
    }

    #[test]
    fn dup_swap_domain() {
        for depth in 1..=16u8 {
            assert_eq!(dup_opcode(depth), Ok(0x7f + depth));
            assert_eq!(swap_opcode(depth), Ok(0x8f + depth));
        }
        assert_eq!(dup_opcode(0), Err(EncodeError::InvalidParameter(0)));
        assert_eq!(dup_opcode(17), Err(EncodeError::InvalidParameter(17)));
        assert_eq!(swap_opcode(0), Err(EncodeError::InvalidParameter(0)));
        assert_eq!(swap_opcode(17), Err(EncodeError::InvalidParameter(17)));

        assert_eq!(Instr::<()>::Dup(1).encode().unwrap(), vec![0x80]);
        assert_eq!(Instr::<()>::Dup(16).encode().unwrap(), vec![0x8f]);
        assert_eq!(Instr::<()>::Swap(1).encode().unwrap(), vec![0x90]);
        assert_eq!(Instr::<()>::Swap(16).encode().unwrap(), vec![0x9f]);
        assert_eq!(Instr::<()>::Dup(17).encode(), Err(EncodeError::InvalidParameter(17)));
        assert_eq!(Instr::<()>::Swap(0).encode(), Err(EncodeError::InvalidParameter(0)));
    }

    #[test]
    fn annotation_is_zero_width() {
        let instr = Instr::<()>::annotation(|_| true);
        assert_eq!(instr.byte_count(), 0);
        assert_eq!(instr.encode().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn unknown_roundtrip_byte() {
        let instr = Instr::<()>::Unknown(0xfe);
        assert_eq!(instr.encode().unwrap(), vec![0xfe]);
        assert_eq!(instr.byte_count(), 1);
    }

    #[test]
    fn byte_count_matches_encoding() {
        let code: Vec<Instr> = vec![
            Instr::Misc(MiscOp::Stop),
            Instr::Arithm(ArithmOp::Add),
            Instr::Push(vec![0xde, 0xad, 0xbe, 0xef]),
            Instr::Dup(3),
            Instr::Swap(12),
            Instr::Unknown(0x21),
            Instr::annotation(|_| false),
            Instr::ControlFlow(ControlFlowOp::JumpDest),
        ];
        for instr in &code {
            assert_eq!(instr.byte_count() as usize, instr.encode().unwrap().len());
        }
    }
}
