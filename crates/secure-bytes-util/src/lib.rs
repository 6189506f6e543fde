// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Wipe primitives and verification helpers for sensitive byte buffers.
//!
//! Every wipe in this crate goes through [`core::ptr::write_volatile`] followed
//! by a sequentially consistent [`compiler_fence`]. A plain loop or
//! `slice.fill(0)` over memory that is about to be freed is a legal target for
//! dead-store elimination; volatile writes are not.
//!
//! # Example
//!
//! ```rust
//! use secure_bytes_util::{wipe_vec, is_vec_fully_wiped};
//!
//! let mut key = vec![0xA5u8; 32];
//! key.truncate(8); // spare capacity still holds 0xA5
//!
//! wipe_vec(&mut key);
//! // SAFETY: wipe_vec wrote every byte up to capacity()
//! assert!(unsafe { is_vec_fully_wiped(&key) });
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

use alloc::vec::Vec;
use core::sync::atomic::{Ordering, compiler_fence};

#[cfg(test)]
mod tests;

mod traits;

pub use traits::{Wipe, WipeProbe};

/// Overwrites `len` bytes starting at `ptr` with zeros using volatile writes.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes.
#[inline(never)]
unsafe fn volatile_zero(ptr: *mut u8, len: usize) {
    for i in 0..len {
        // SAFETY: caller guarantees `ptr..ptr + len` is writable
        unsafe {
            core::ptr::write_volatile(ptr.add(i), 0);
        }
    }

    compiler_fence(Ordering::SeqCst);
}

/// Wipes every byte of `slice` with zeros.
///
/// Empty slices are a no-op.
///
/// # Example
///
/// ```
/// use secure_bytes_util::{wipe_bytes, is_slice_wiped};
///
/// let mut password = *b"hunter2";
/// wipe_bytes(&mut password);
/// assert!(is_slice_wiped(&password));
/// ```
#[inline]
pub fn wipe_bytes(slice: &mut [u8]) {
    if slice.is_empty() {
        return;
    }

    // SAFETY: `slice` is valid for writes of `slice.len()` bytes
    unsafe { volatile_zero(slice.as_mut_ptr(), slice.len()) }
}

/// Wipes the **entire allocation** of a `Vec<u8>`, from index 0 to `capacity()`.
///
/// Spare capacity is wiped too, so bytes left behind by `truncate()` or by
/// allocator slack never survive. The length is left unchanged.
///
/// # Example
///
/// ```
/// use secure_bytes_util::{wipe_vec, is_vec_fully_wiped};
///
/// let mut vec = vec![0xFFu8; 100];
/// vec.truncate(10);
///
/// wipe_vec(&mut vec);
/// assert_eq!(vec.len(), 10);
/// // SAFETY: wipe_vec wrote every byte up to capacity()
/// assert!(unsafe { is_vec_fully_wiped(&vec) });
/// ```
#[inline]
pub fn wipe_vec(vec: &mut Vec<u8>) {
    let capacity = vec.capacity();
    if capacity == 0 {
        return;
    }

    // SAFETY: the allocation behind `vec` is valid for `capacity` bytes, and
    // any bit pattern is a valid `u8`
    unsafe { volatile_zero(vec.as_mut_ptr(), capacity) }
}

/// Returns `true` if every byte of `slice` is zero.
#[inline(always)]
pub fn is_slice_wiped(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Returns `true` if the whole allocation of `vec` (0 to `capacity()`) is zero.
///
/// Unlike [`is_slice_wiped`], this also reads the spare capacity between
/// `len()` and `capacity()`.
///
/// # Safety
///
/// Every byte up to `vec.capacity()` must have been written since the
/// allocation was made, for example by [`wipe_vec`] or by earlier contents
/// that were truncated away. Spare capacity from `Vec::with_capacity` or
/// `reserve` that was never written is uninitialized and must not be read.
#[inline(never)]
pub unsafe fn is_vec_fully_wiped(vec: &Vec<u8>) -> bool {
    let base = vec.as_ptr();

    (0..vec.capacity()).all(|i| {
        // SAFETY: `i < capacity`, and the caller guarantees the byte was written
        unsafe { core::ptr::read_volatile(base.add(i)) == 0 }
    })
}
