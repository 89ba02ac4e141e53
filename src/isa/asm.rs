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

/// Macro assembler building a program from mnemonic statements.
///
/// Produces a `Vec<Instr>` over the unit state type; annotations are not part
/// of the assembly surface and have to be spliced in by the caller when
/// needed.
///
/// # Example
///
/// ```
/// use evm_isa::{evmasm, program_code};
///
/// let code = evmasm! {
///     PUSH [0x04];
///     JUMP;
///     UNKNOWN 0xfe;
///     JUMPDEST;
///     STOP;
/// };
/// assert_eq!(program_code(&code).unwrap(), vec![0x60, 0x04, 0x56, 0xfe, 0x5b, 0x00]);
/// ```
#[macro_export]
macro_rules! evmasm {
    ($( $tt:tt )+) => {{ #[allow(unused_imports)] {
        use $crate::isa::{
            ArithmOp, BitwiseOp, ControlFlowOp, InfoOp, Instr, LogOp, MemoryOp, MiscOp,
            SArithmOp, StackOp, StorageOp,
        };
        let mut code: Vec<$crate::isa::Instr> = vec![];
        $crate::evmasm_inner! { code => $( $tt )+ }
        code
    } }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! evmasm_inner {
    // end of program
    { $code:ident => } => { };
    // no operands
    { $code:ident => $op:ident ; $($tt:tt)* } => {
        $code.push($crate::instr! { $op });
        $crate::evmasm_inner! { $code => $( $tt )* }
    };
    // single operand: push immediate, dup/swap depth or an unknown opcode
    { $code:ident => $op:ident $arg:expr ; $($tt:tt)* } => {
        $code.push($crate::instr! { $op $arg });
        $crate::evmasm_inner! { $code => $( $tt )* }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! instr {
    (STOP) => { Instr::Misc(MiscOp::Stop) };
    (ADD) => { Instr::Arithm(ArithmOp::Add) };
    (MUL) => { Instr::Arithm(ArithmOp::Mul) };
    (SUB) => { Instr::Arithm(ArithmOp::Sub) };
    (DIV) => { Instr::Arithm(ArithmOp::Div) };
    (SDIV) => { Instr::SArithm(SArithmOp::SDiv) };
    (MOD) => { Instr::Arithm(ArithmOp::Mod) };
    (SMOD) => { Instr::SArithm(SArithmOp::SMod) };
    (ADDMOD) => { Instr::Arithm(ArithmOp::AddMod) };
    (MULMOD) => { Instr::Arithm(ArithmOp::MulMod) };
    (EXP) => { Instr::Arithm(ArithmOp::Exp) };
    (SIGNEXTEND) => { Instr::SArithm(SArithmOp::SignExtend) };
    (LT) => { Instr::Arithm(ArithmOp::Lt) };
    (GT) => { Instr::Arithm(ArithmOp::Gt) };
    (SLT) => { Instr::SArithm(SArithmOp::SLt) };
    (SGT) => { Instr::SArithm(SArithmOp::SGt) };
    (EQ) => { Instr::Arithm(ArithmOp::Eq) };
    (ISZERO) => { Instr::Arithm(ArithmOp::IsZero) };
    (AND) => { Instr::Bitwise(BitwiseOp::And) };
    (OR) => { Instr::Bitwise(BitwiseOp::Or) };
    (XOR) => { Instr::Bitwise(BitwiseOp::Xor) };
    (NOT) => { Instr::Bitwise(BitwiseOp::Not) };
    (BYTE) => { Instr::Bitwise(BitwiseOp::Byte) };
    (SHA3) => { Instr::Arithm(ArithmOp::Sha3) };

    (ADDRESS) => { Instr::Info(InfoOp::Address) };
    (BALANCE) => { Instr::Info(InfoOp::Balance) };
    (ORIGIN) => { Instr::Info(InfoOp::Origin) };
    (CALLER) => { Instr::Info(InfoOp::Caller) };
    (CALLVALUE) => { Instr::Info(InfoOp::CallValue) };
    (CALLDATALOAD) => { Instr::Stack(StackOp::CallDataLoad) };
    (CALLDATASIZE) => { Instr::Info(InfoOp::CallDataSize) };
    (CALLDATACOPY) => { Instr::Memory(MemoryOp::CallDataCopy) };
    (CODESIZE) => { Instr::Info(InfoOp::CodeSize) };
    (CODECOPY) => { Instr::Memory(MemoryOp::CodeCopy) };
    (GASPRICE) => { Instr::Info(InfoOp::GasPrice) };
    (EXTCODESIZE) => { Instr::Info(InfoOp::ExtCodeSize) };
    (EXTCODECOPY) => { Instr::Memory(MemoryOp::ExtCodeCopy) };
    (BLOCKHASH) => { Instr::Info(InfoOp::BlockHash) };
    (COINBASE) => { Instr::Info(InfoOp::Coinbase) };
    (TIMESTAMP) => { Instr::Info(InfoOp::Timestamp) };
    (NUMBER) => { Instr::Info(InfoOp::Number) };
    (DIFFICULTY) => { Instr::Info(InfoOp::Difficulty) };
    (GASLIMIT) => { Instr::Info(InfoOp::GasLimit) };
    (GAS) => { Instr::Info(InfoOp::Gas) };

    (POP) => { Instr::Stack(StackOp::Pop) };
    (MLOAD) => { Instr::Memory(MemoryOp::MLoad) };
    (MSTORE) => { Instr::Memory(MemoryOp::MStore) };
    (MSTORE8) => { Instr::Memory(MemoryOp::MStore8) };
    (MSIZE) => { Instr::Memory(MemoryOp::MSize) };
    (SLOAD) => { Instr::Storage(StorageOp::SLoad) };
    (SSTORE) => { Instr::Storage(StorageOp::SStore) };
    (JUMP) => { Instr::ControlFlow(ControlFlowOp::Jump) };
    (JUMPI) => { Instr::ControlFlow(ControlFlowOp::JumpI) };
    (PC) => { Instr::ControlFlow(ControlFlowOp::Pc) };
    (JUMPDEST) => { Instr::ControlFlow(ControlFlowOp::JumpDest) };

    (LOG0) => { Instr::Log(LogOp::Log0) };
    (LOG1) => { Instr::Log(LogOp::Log1) };
    (LOG2) => { Instr::Log(LogOp::Log2) };
    (LOG3) => { Instr::Log(LogOp::Log3) };
    (LOG4) => { Instr::Log(LogOp::Log4) };

    (CREATE) => { Instr::Misc(MiscOp::Create) };
    (CALL) => { Instr::Misc(MiscOp::Call) };
    (CALLCODE) => { Instr::Misc(MiscOp::CallCode) };
    (RETURN) => { Instr::Misc(MiscOp::Return) };
    (DELEGATECALL) => { Instr::Misc(MiscOp::DelegateCall) };
    (SUICIDE) => { Instr::Misc(MiscOp::Suicide) };

    (PUSH $data:expr) => { Instr::Push($data.into()) };
    (DUP $depth:expr) => { Instr::Dup($depth) };
    (SWAP $depth:expr) => { Instr::Swap($depth) };
    (UNKNOWN $byte:expr) => { Instr::Unknown($byte) };
}
