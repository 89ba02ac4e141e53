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

//! Ethereum virtual machine instruction set architecture.

#[macro_use]
mod asm;
mod bytecode;
mod instr;
pub mod opcodes;

pub use bytecode::{
    dup_opcode, swap_opcode, Bytecode, EncodeError, DUP_SWAP_MAX_DEPTH, PUSH_MAX_LEN,
};
pub use instr::{
    ArithmOp, BitwiseOp, ControlFlowOp, InfoOp, Instr, LogOp, MemoryOp, MiscOp, Predicate,
    SArithmOp, StackOp, StorageOp,
};
