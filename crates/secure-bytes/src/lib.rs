// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Move-only byte buffer for passwords, keys and other secrets.
//!
//! [`SecureBytes`] owns one fixed-capacity heap allocation and overwrites it
//! with zeros before the allocator gets it back, however the owner's lifetime
//! ends: drop, reassignment, or transfer.
//!
//! # Construction
//!
//! - [`SecureBytes::try_zeroed`]: `len` zero bytes, ready to be filled.
//! - [`SecureBytes::try_from_slice`]: copy existing bytes in once.
//! - [`SecureBytes::try_from_str`]: text flavor, with a reserved zero
//!   terminator byte.
//!
//! The [`Terminator`] flag selects between the raw flavor (content fills the
//! allocation) and the text flavor (capacity is content length plus one, the
//! last byte stays zero).
//!
//! # Ownership transfer
//!
//! ```rust
//! use secure_bytes::{SecureBytes, AllocationError};
//!
//! fn example() -> Result<(), AllocationError> {
//!     let mut a = SecureBytes::try_from_str("secret1")?;
//!     let mut b = SecureBytes::try_from_str("secret2")?;
//!
//!     // b's "secret2" allocation is wiped and freed, then b takes a's storage
//!     b.transfer_from(&mut a);
//!
//!     assert!(a.is_empty());
//!     assert_eq!(b.as_bytes(), b"secret1");
//!     assert_eq!(b.as_raw(), b"secret1\0");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # What is not covered
//!
//! Wiping only protects the address space this process controls. Swapping,
//! core dumps, debuggers and side channels are out of scope.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod secure_bytes;
mod terminator;

pub use error::AllocationError;
pub use secure_bytes::SecureBytes;
pub use terminator::Terminator;

pub use secure_bytes_util::{Wipe, WipeProbe};
