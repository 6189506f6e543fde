// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Core traits for wiping and verifying wiped state.

use alloc::vec::Vec;

use crate::{is_slice_wiped, wipe_bytes, wipe_vec};

/// Trait for types that can wipe their sensitive contents in place.
///
/// This trait is dyn-compatible.
pub trait Wipe {
    /// Overwrites all sensitive bytes with zeros.
    fn wipe(&mut self);
}

/// Trait for verifying that a value has been wiped.
///
/// # Example
///
/// ```rust
/// use secure_bytes_util::{Wipe, WipeProbe};
///
/// let mut token = [0x42u8; 16];
/// assert!(!token.is_wiped());
///
/// token.wipe();
/// assert!(token.is_wiped());
/// ```
pub trait WipeProbe {
    /// Returns `true` if no non-zero byte remains.
    fn is_wiped(&self) -> bool;
}

impl Wipe for [u8] {
    fn wipe(&mut self) {
        wipe_bytes(self);
    }
}

impl<const N: usize> Wipe for [u8; N] {
    fn wipe(&mut self) {
        wipe_bytes(self.as_mut_slice());
    }
}

impl Wipe for Vec<u8> {
    fn wipe(&mut self) {
        wipe_vec(self);
    }
}

impl WipeProbe for [u8] {
    fn is_wiped(&self) -> bool {
        is_slice_wiped(self)
    }
}

impl<const N: usize> WipeProbe for [u8; N] {
    fn is_wiped(&self) -> bool {
        is_slice_wiped(self.as_slice())
    }
}

/// Checks the initialized elements (`0..len()`) only.
///
/// Use [`is_vec_fully_wiped`](crate::is_vec_fully_wiped) when spare capacity is
/// known to be initialized and must be checked too.
impl WipeProbe for Vec<u8> {
    fn is_wiped(&self) -> bool {
        is_slice_wiped(self)
    }
}
