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

//! Instruction set and bytecode encoding for the Ethereum virtual machine.
//!
//! The crate models the machine's opcode table as a closed set of typed
//! instruction families with a byte-exact encoding, and provides the
//! primitives built on top of it: whole-program serialization
//! ([`program_code`]), byte measurement ([`program_size`]) and navigation of
//! a decoded program by original byte offset ([`drop_bytes`]), which backs
//! jump-destination validation.
//!
//! The crate only encodes: decoding bytes back into instructions is out of
//! its scope. All operations are pure and stateless; instruction sequences
//! are immutable values safe to share across threads.
//!
//! ```
//! use evm_isa::{evmasm, drop_bytes, program_code, program_size};
//!
//! let code = evmasm! {
//!     PUSH [0x04];
//!     JUMP;
//!     STOP;
//!     JUMPDEST;
//! };
//! assert_eq!(program_size(&code), 5);
//! assert_eq!(program_code(&code).unwrap(), vec![0x60, 0x04, 0x56, 0x00, 0x5b]);
//! assert_eq!(drop_bytes(&code, 4).unwrap(), &code[3..]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

#[macro_use]
extern crate amplify;

pub mod isa;
mod program;

pub use program::{drop_bytes, program_code, program_size, MalformedOffset};
