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

//! Constants with the opcode byte values from the yellow paper opcode table.
//!
//! These literals are the external compatibility contract of the crate: a
//! program serialized by this crate must be executable byte-for-byte by any
//! conforming Ethereum virtual machine.

#![allow(missing_docs)]

// Halting
pub const OP_STOP: u8 = 0x00;

// Unsigned arithmetic & comparison
pub const OP_ADD: u8 = 0x01;
pub const OP_MUL: u8 = 0x02;
pub const OP_SUB: u8 = 0x03;
pub const OP_DIV: u8 = 0x04;
pub const OP_MOD: u8 = 0x06;
pub const OP_ADDMOD: u8 = 0x08;
pub const OP_MULMOD: u8 = 0x09;
pub const OP_EXP: u8 = 0x0a;
pub const OP_LT: u8 = 0x10;
pub const OP_GT: u8 = 0x11;
pub const OP_EQ: u8 = 0x14;
pub const OP_ISZERO: u8 = 0x15;
pub const OP_SHA3: u8 = 0x20;

// Signed arithmetic & comparison
pub const OP_SDIV: u8 = 0x05;
pub const OP_SMOD: u8 = 0x07;
pub const OP_SIGNEXTEND: u8 = 0x0b;
pub const OP_SLT: u8 = 0x12;
pub const OP_SGT: u8 = 0x13;

// Bit operations & boolean algebra
pub const OP_AND: u8 = 0x16;
pub const OP_OR: u8 = 0x17;
pub const OP_XOR: u8 = 0x18;
pub const OP_NOT: u8 = 0x19;
pub const OP_BYTE: u8 = 0x1a;

// Execution environment & blockchain state reads
pub const OP_ADDRESS: u8 = 0x30;
pub const OP_BALANCE: u8 = 0x31;
pub const OP_ORIGIN: u8 = 0x32;
pub const OP_CALLER: u8 = 0x33;
pub const OP_CALLVALUE: u8 = 0x34;
pub const OP_CALLDATASIZE: u8 = 0x36;
pub const OP_CODESIZE: u8 = 0x38;
pub const OP_GASPRICE: u8 = 0x3a;
pub const OP_EXTCODESIZE: u8 = 0x3b;
pub const OP_BLOCKHASH: u8 = 0x40;
pub const OP_COINBASE: u8 = 0x41;
pub const OP_TIMESTAMP: u8 = 0x42;
pub const OP_NUMBER: u8 = 0x43;
pub const OP_DIFFICULTY: u8 = 0x44;
pub const OP_GASLIMIT: u8 = 0x45;
pub const OP_GAS: u8 = 0x5a;

// Stack manipulation
pub const OP_CALLDATALOAD: u8 = 0x35;
pub const OP_POP: u8 = 0x50;

// Memory operations
pub const OP_CALLDATACOPY: u8 = 0x37;
pub const OP_CODECOPY: u8 = 0x39;
pub const OP_EXTCODECOPY: u8 = 0x3c;
pub const OP_MLOAD: u8 = 0x51;
pub const OP_MSTORE: u8 = 0x52;
pub const OP_MSTORE8: u8 = 0x53;
pub const OP_MSIZE: u8 = 0x59;

// Storage operations
pub const OP_SLOAD: u8 = 0x54;
pub const OP_SSTORE: u8 = 0x55;

// Program counter & control flow
pub const OP_JUMP: u8 = 0x56;
pub const OP_JUMPI: u8 = 0x57;
pub const OP_PC: u8 = 0x58;
pub const OP_JUMPDEST: u8 = 0x5b;

// Push with immediate data: the opcode is `OP_PUSH_BASE + len` for immediates
// of 1 to 32 bytes, giving PUSH1..PUSH32 = 0x60..0x7f.
pub const OP_PUSH_BASE: u8 = 0x5f;
pub const OP_PUSH1: u8 = 0x60;
pub const OP_PUSH32: u8 = 0x7f;

// Stack duplication: `OP_DUP_BASE + n` for depths 1 to 16, giving
// DUP1..DUP16 = 0x80..0x8f.
pub const OP_DUP_BASE: u8 = 0x7f;
pub const OP_DUP1: u8 = 0x80;
pub const OP_DUP16: u8 = 0x8f;

// Stack swap: `OP_SWAP_BASE + n` for depths 1 to 16, giving
// SWAP1..SWAP16 = 0x90..0x9f.
pub const OP_SWAP_BASE: u8 = 0x8f;
pub const OP_SWAP1: u8 = 0x90;
pub const OP_SWAP16: u8 = 0x9f;

// Logging
pub const OP_LOG0: u8 = 0xa0;
pub const OP_LOG1: u8 = 0xa1;
pub const OP_LOG2: u8 = 0xa2;
pub const OP_LOG3: u8 = 0xa3;
pub const OP_LOG4: u8 = 0xa4;

// Calls, contract creation and other control-transfer operations
pub const OP_CREATE: u8 = 0xf0;
pub const OP_CALL: u8 = 0xf1;
pub const OP_CALLCODE: u8 = 0xf2;
pub const OP_RETURN: u8 = 0xf3;
pub const OP_DELEGATECALL: u8 = 0xf4;
pub const OP_SUICIDE: u8 = 0xff;
