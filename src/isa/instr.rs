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

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};

use amplify::hex::ToHex;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Bit operations & boolean algebra instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum BitwiseOp {
    /// Bitwise AND of the two topmost stack words.
    #[display("AND")]
    And,

    /// Bitwise OR of the two topmost stack words.
    #[display("OR")]
    Or,

    /// Bitwise XOR of the two topmost stack words.
    #[display("XOR")]
    Xor,

    /// Bitwise negation of the topmost stack word.
    #[display("NOT")]
    Not,

    /// Extract a single byte from a word by its index.
    #[display("BYTE")]
    Byte,
}

/// Unsigned (word-as-natural) arithmetic and comparison instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum ArithmOp {
    /// Modulo-2^256 addition.
    #[display("ADD")]
    Add,

    /// Modulo-2^256 multiplication.
    #[display("MUL")]
    Mul,

    /// Modulo-2^256 subtraction.
    #[display("SUB")]
    Sub,

    /// Integer division; division by zero yields zero.
    #[display("DIV")]
    Div,

    /// Modulo remainder; modulo zero yields zero.
    #[display("MOD")]
    Mod,

    /// Addition modulo an arbitrary number.
    #[display("ADDMOD")]
    AddMod,

    /// Multiplication modulo an arbitrary number.
    #[display("MULMOD")]
    MulMod,

    /// Exponentiation.
    #[display("EXP")]
    Exp,

    /// Unsigned less-than comparison.
    #[display("LT")]
    Lt,

    /// Unsigned greater-than comparison.
    #[display("GT")]
    Gt,

    /// Equality comparison.
    #[display("EQ")]
    Eq,

    /// Test of the topmost stack word for zero.
    #[display("ISZERO")]
    IsZero,

    /// Keccak-256 hash of a memory region.
    #[display("SHA3")]
    Sha3,
}

/// Signed (word-as-two's-complement) arithmetic and comparison instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum SArithmOp {
    /// Signed integer division.
    #[display("SDIV")]
    SDiv,

    /// Signed modulo remainder.
    #[display("SMOD")]
    SMod,

    /// Sign extension from a given byte width.
    #[display("SIGNEXTEND")]
    SignExtend,

    /// Signed less-than comparison.
    #[display("SLT")]
    SLt,

    /// Signed greater-than comparison.
    #[display("SGT")]
    SGt,
}

/// Instructions reading the execution environment and blockchain state.
///
/// All of them take no operands and push a single word on the stack.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum InfoOp {
    /// Address of the currently executing account.
    #[display("ADDRESS")]
    Address,

    /// Balance of a given account.
    #[display("BALANCE")]
    Balance,

    /// Address which originated the transaction.
    #[display("ORIGIN")]
    Origin,

    /// Address of the immediate caller.
    #[display("CALLER")]
    Caller,

    /// Value deposited with the current call.
    #[display("CALLVALUE")]
    CallValue,

    /// Size of the call data.
    #[display("CALLDATASIZE")]
    CallDataSize,

    /// Size of the currently running code.
    #[display("CODESIZE")]
    CodeSize,

    /// Gas price of the transaction.
    #[display("GASPRICE")]
    GasPrice,

    /// Code size of a given account.
    #[display("EXTCODESIZE")]
    ExtCodeSize,

    /// Hash of one of the 256 most recent blocks.
    #[display("BLOCKHASH")]
    BlockHash,

    /// Beneficiary address of the current block.
    #[display("COINBASE")]
    Coinbase,

    /// Timestamp of the current block.
    #[display("TIMESTAMP")]
    Timestamp,

    /// Number of the current block.
    #[display("NUMBER")]
    Number,

    /// Difficulty of the current block.
    #[display("DIFFICULTY")]
    Difficulty,

    /// Gas limit of the current block.
    #[display("GASLIMIT")]
    GasLimit,

    /// Gas remaining after this instruction.
    #[display("GAS")]
    Gas,
}

/// Fixed-width stack manipulation instructions.
///
/// Variable-width push lives on [`Instr::Push`] since it is the only
/// instruction carrying immediate data.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum StackOp {
    /// Read a word from the call data.
    #[display("CALLDATALOAD")]
    CallDataLoad,

    /// Remove the topmost stack word.
    #[display("POP")]
    Pop,
}

/// Memory access and copy-to-memory instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum MemoryOp {
    /// Copy call data into memory.
    #[display("CALLDATACOPY")]
    CallDataCopy,

    /// Copy the running code into memory.
    #[display("CODECOPY")]
    CodeCopy,

    /// Copy code of a given account into memory.
    #[display("EXTCODECOPY")]
    ExtCodeCopy,

    /// Load a word from memory.
    #[display("MLOAD")]
    MLoad,

    /// Store a word to memory.
    #[display("MSTORE")]
    MStore,

    /// Store a single byte to memory.
    #[display("MSTORE8")]
    MStore8,

    /// Size of the active memory in bytes.
    #[display("MSIZE")]
    MSize,
}

/// Persistent storage instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum StorageOp {
    /// Load a word from storage.
    #[display("SLOAD")]
    SLoad,

    /// Store a word to storage.
    #[display("SSTORE")]
    SStore,
}

/// Program counter & control flow instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum ControlFlowOp {
    /// Unconditional jump to a byte offset taken from the stack.
    ///
    /// The jump is valid only if the target offset holds a
    /// [`ControlFlowOp::JumpDest`] in the original byte layout; see
    /// [`crate::drop_bytes`] for the offset-to-instruction translation used by
    /// that check.
    #[display("JUMP")]
    Jump,

    /// Conditional jump.
    #[display("JUMPI")]
    JumpI,

    /// Byte offset of the current instruction.
    #[display("PC")]
    Pc,

    /// Valid jump landing marker; a no-op when executed sequentially.
    #[display("JUMPDEST")]
    JumpDest,
}

/// Event logging instructions with zero to four indexed topics.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum LogOp {
    #[display("LOG0")]
    Log0,
    #[display("LOG1")]
    Log1,
    #[display("LOG2")]
    Log2,
    #[display("LOG3")]
    Log3,
    #[display("LOG4")]
    Log4,
}

/// Halting, call and contract-creation instructions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "UPPERCASE")
)]
pub enum MiscOp {
    /// Halt execution.
    #[display("STOP")]
    Stop,

    /// Create a new account with associated code.
    #[display("CREATE")]
    Create,

    /// Message-call into an account.
    #[display("CALL")]
    Call,

    /// Message-call using the callee code but the current account state.
    #[display("CALLCODE")]
    CallCode,

    /// Halt execution returning a memory region as output.
    #[display("RETURN")]
    Return,

    /// Message-call keeping caller, value and state of the current frame.
    #[display("DELEGATECALL")]
    DelegateCall,

    /// Halt execution and schedule the account for deletion.
    #[display("SUICIDE")]
    Suicide,
}

/// Deferred boolean check over an opaque machine state of type `S`.
///
/// Predicates are attached to code positions via [`Instr::Annotation`]. They
/// are assertions about the machine state at that position and are never part
/// of the serialized program: an annotation occupies zero bytes. The crate
/// never constructs or inspects the state itself; it only stores the
/// capability to query it.
pub struct Predicate<S: ?Sized>(Arc<dyn Fn(&S) -> bool + Send + Sync>);

impl<S: ?Sized> Predicate<S> {
    /// Wraps a closure as an annotation predicate.
    pub fn new(check: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Predicate(Arc::new(check))
    }

    /// Evaluates the predicate against a given machine state.
    pub fn eval(&self, state: &S) -> bool { (self.0)(state) }
}

impl<S: ?Sized> Clone for Predicate<S> {
    fn clone(&self) -> Self { Predicate(Arc::clone(&self.0)) }
}

// Predicates are compared by identity: two annotations are equal only if they
// share the same underlying closure.
impl<S: ?Sized> PartialEq for Predicate<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<S: ?Sized> Eq for Predicate<S> {}

impl<S: ?Sized> Debug for Predicate<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str("Predicate(..)") }
}

/// Full set of instructions, parameterized by the machine state type `S`
/// consulted by annotation predicates.
///
/// One program is an ordered `Vec<Instr<S>>`; element order is program order.
/// Byte widths and encodings of single instructions are provided by
/// [`Instr::byte_count`] and [`Instr::encode`], whole-program operations by
/// [`crate::program_size`], [`crate::program_code`] and [`crate::drop_bytes`].
// Clone, PartialEq and Debug are written by hand: deriving them would bound
// the opaque state type `S`, which never occurs in instruction data.
#[non_exhaustive]
pub enum Instr<S: ?Sized = ()> {
    /// Bit operations & boolean algebra instructions.
    Bitwise(BitwiseOp),

    /// Unsigned arithmetic and comparison instructions.
    Arithm(ArithmOp),

    /// Signed arithmetic and comparison instructions.
    SArithm(SArithmOp),

    /// Environment and blockchain state reads.
    Info(InfoOp),

    /// Fixed-width stack manipulation instructions.
    Stack(StackOp),

    /// Memory instructions.
    Memory(MemoryOp),

    /// Storage instructions.
    Storage(StorageOp),

    /// Program counter & control flow instructions.
    ControlFlow(ControlFlowOp),

    /// Logging instructions.
    Log(LogOp),

    /// Halting, call and creation instructions.
    Misc(MiscOp),

    /// Push of 1 to 32 bytes of immediate data on the stack.
    ///
    /// Encodes as `0x5f + len` followed by the immediate bytes verbatim.
    /// Immediate lengths outside `1..=32` are rejected by [`Instr::encode`]
    /// with [`crate::isa::EncodeError::InvalidImmediateLength`].
    Push(Vec<u8>),

    /// Duplication of the n-th stack word, depth within `1..=16`.
    Dup(u8),

    /// Swap of the topmost stack word with the n-th one, depth within `1..=16`.
    Swap(u8),

    /// Escape hatch for opcodes not otherwise modeled; encodes to exactly the
    /// carried byte.
    Unknown(u8),

    /// Zero-width assertion over the machine state at this code position.
    ///
    /// Never serialized and transparent to all size and offset computations.
    Annotation(Predicate<S>),
}

impl<S: ?Sized> Instr<S> {
    /// Attaches an assertion over the machine state at the current code
    /// position.
    pub fn annotation(check: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Instr::Annotation(Predicate::new(check))
    }
}

impl<S: ?Sized> Clone for Instr<S> {
    fn clone(&self) -> Self {
        match self {
            Instr::Bitwise(op) => Instr::Bitwise(*op),
            Instr::Arithm(op) => Instr::Arithm(*op),
            Instr::SArithm(op) => Instr::SArithm(*op),
            Instr::Info(op) => Instr::Info(*op),
            Instr::Stack(op) => Instr::Stack(*op),
            Instr::Memory(op) => Instr::Memory(*op),
            Instr::Storage(op) => Instr::Storage(*op),
            Instr::ControlFlow(op) => Instr::ControlFlow(*op),
            Instr::Log(op) => Instr::Log(*op),
            Instr::Misc(op) => Instr::Misc(*op),
            Instr::Push(data) => Instr::Push(data.clone()),
            Instr::Dup(n) => Instr::Dup(*n),
            Instr::Swap(n) => Instr::Swap(*n),
            Instr::Unknown(byte) => Instr::Unknown(*byte),
            Instr::Annotation(pred) => Instr::Annotation(pred.clone()),
        }
    }
}

impl<S: ?Sized> PartialEq for Instr<S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Instr::Bitwise(a), Instr::Bitwise(b)) => a == b,
            (Instr::Arithm(a), Instr::Arithm(b)) => a == b,
            (Instr::SArithm(a), Instr::SArithm(b)) => a == b,
            (Instr::Info(a), Instr::Info(b)) => a == b,
            (Instr::Stack(a), Instr::Stack(b)) => a == b,
            (Instr::Memory(a), Instr::Memory(b)) => a == b,
            (Instr::Storage(a), Instr::Storage(b)) => a == b,
            (Instr::ControlFlow(a), Instr::ControlFlow(b)) => a == b,
            (Instr::Log(a), Instr::Log(b)) => a == b,
            (Instr::Misc(a), Instr::Misc(b)) => a == b,
            (Instr::Push(a), Instr::Push(b)) => a == b,
            (Instr::Dup(a), Instr::Dup(b)) => a == b,
            (Instr::Swap(a), Instr::Swap(b)) => a == b,
            (Instr::Unknown(a), Instr::Unknown(b)) => a == b,
            (Instr::Annotation(a), Instr::Annotation(b)) => a == b,
            _ => false,
        }
    }
}

impl<S: ?Sized> Eq for Instr<S> {}

impl<S: ?Sized> Debug for Instr<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Bitwise(op) => f.debug_tuple("Bitwise").field(op).finish(),
            Instr::Arithm(op) => f.debug_tuple("Arithm").field(op).finish(),
            Instr::SArithm(op) => f.debug_tuple("SArithm").field(op).finish(),
            Instr::Info(op) => f.debug_tuple("Info").field(op).finish(),
            Instr::Stack(op) => f.debug_tuple("Stack").field(op).finish(),
            Instr::Memory(op) => f.debug_tuple("Memory").field(op).finish(),
            Instr::Storage(op) => f.debug_tuple("Storage").field(op).finish(),
            Instr::ControlFlow(op) => f.debug_tuple("ControlFlow").field(op).finish(),
            Instr::Log(op) => f.debug_tuple("Log").field(op).finish(),
            Instr::Misc(op) => f.debug_tuple("Misc").field(op).finish(),
            Instr::Push(data) => f.debug_tuple("Push").field(data).finish(),
            Instr::Dup(n) => f.debug_tuple("Dup").field(n).finish(),
            Instr::Swap(n) => f.debug_tuple("Swap").field(n).finish(),
            Instr::Unknown(byte) => f.debug_tuple("Unknown").field(byte).finish(),
            Instr::Annotation(pred) => f.debug_tuple("Annotation").field(pred).finish(),
        }
    }
}

impl BitwiseOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 5] = [Self::And, Self::Or, Self::Xor, Self::Not, Self::Byte];
}

impl ArithmOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 13] = [
        Self::Add,
        Self::Mul,
        Self::Sub,
        Self::Div,
        Self::Mod,
        Self::AddMod,
        Self::MulMod,
        Self::Exp,
        Self::Lt,
        Self::Gt,
        Self::Eq,
        Self::IsZero,
        Self::Sha3,
    ];
}

impl SArithmOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 5] =
        [Self::SDiv, Self::SMod, Self::SignExtend, Self::SLt, Self::SGt];
}

impl InfoOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 16] = [
        Self::Address,
        Self::Balance,
        Self::Origin,
        Self::Caller,
        Self::CallValue,
        Self::CallDataSize,
        Self::CodeSize,
        Self::GasPrice,
        Self::ExtCodeSize,
        Self::BlockHash,
        Self::Coinbase,
        Self::Timestamp,
        Self::Number,
        Self::Difficulty,
        Self::GasLimit,
        Self::Gas,
    ];
}

impl StackOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 2] = [Self::CallDataLoad, Self::Pop];
}

impl MemoryOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 7] = [
        Self::CallDataCopy,
        Self::CodeCopy,
        Self::ExtCodeCopy,
        Self::MLoad,
        Self::MStore,
        Self::MStore8,
        Self::MSize,
    ];
}

impl StorageOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 2] = [Self::SLoad, Self::SStore];
}

impl ControlFlowOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 4] = [Self::Jump, Self::JumpI, Self::Pc, Self::JumpDest];
}

impl LogOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 5] = [Self::Log0, Self::Log1, Self::Log2, Self::Log3, Self::Log4];
}

impl MiscOp {
    /// All variants of the family, in opcode order.
    pub const ALL: [Self; 7] = [
        Self::Stop,
        Self::Create,
        Self::Call,
        Self::CallCode,
        Self::Return,
        Self::DelegateCall,
        Self::Suicide,
    ];
}

impl<S: ?Sized> Display for Instr<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Bitwise(op) => Display::fmt(op, f),
            Instr::Arithm(op) => Display::fmt(op, f),
            Instr::SArithm(op) => Display::fmt(op, f),
            Instr::Info(op) => Display::fmt(op, f),
            Instr::Stack(op) => Display::fmt(op, f),
            Instr::Memory(op) => Display::fmt(op, f),
            Instr::Storage(op) => Display::fmt(op, f),
            Instr::ControlFlow(op) => Display::fmt(op, f),
            Instr::Log(op) => Display::fmt(op, f),
            Instr::Misc(op) => Display::fmt(op, f),
            Instr::Push(data) => write!(f, "PUSH{} 0x{}", data.len(), data.to_hex()),
            Instr::Dup(n) => write!(f, "DUP{}", n),
            Instr::Swap(n) => write!(f, "SWAP{}", n),
            Instr::Unknown(byte) => write!(f, "UNKNOWN(0x{:02x})", byte),
            Instr::Annotation(_) => f.write_str("@assert"),
        }
    }
}
