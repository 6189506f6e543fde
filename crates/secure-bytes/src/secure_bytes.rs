// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::ffi::CStr;
use core::fmt;
use core::mem;

use secure_bytes_util::{Wipe, WipeProbe, is_slice_wiped, wipe_vec};

use crate::error::AllocationError;
use crate::terminator::Terminator;

/// Exclusively owned byte buffer that wipes its storage before release.
///
/// `SecureBytes` owns one heap allocation of a fixed capacity. Every byte of
/// that allocation is overwritten with zeros (volatile writes, see
/// [`secure_bytes_util::wipe_vec`]) before it goes back to the allocator:
///
/// - on drop,
/// - on reassignment, whether through [`transfer_from`](Self::transfer_from)
///   or plain `dst = src`,
/// - on explicit [`Wipe::wipe`].
///
/// # Design
///
/// - **No `Clone`, no `Copy`**: the content is never duplicated.
/// - **Transfer moves the allocation, not the bytes**: [`take`](Self::take)
///   and [`transfer_from`](Self::transfer_from) hand the heap pointer over and
///   leave the source empty.
/// - **Fixed capacity**: there is no API that grows the buffer, so the
///   allocation is never silently reallocated and copied.
/// - **Redacted `Debug`**: only `len` and `capacity` are printed.
///
/// # States
///
/// An instance either holds storage (`capacity() > 0`) or is empty. A fresh
/// empty instance comes from [`new`](Self::new), a zero-length construction,
/// or being the source of a transfer.
///
/// # Example
///
/// ```rust
/// use secure_bytes::{SecureBytes, Terminator, AllocationError};
///
/// fn example() -> Result<(), AllocationError> {
///     let mut key = SecureBytes::try_zeroed(16, Terminator::Omitted)?;
///     key.as_bytes_mut().copy_from_slice(b"0123456789abcdef");
///
///     let moved = key.take();
///     assert!(key.is_empty());
///     assert_eq!(moved.as_bytes(), b"0123456789abcdef");
///
///     // `moved` is wiped here
///     Ok(())
/// }
/// # example().unwrap();
/// ```
///
/// Copies are rejected at compile time:
///
/// ```rust,compile_fail
/// use secure_bytes::{SecureBytes, Terminator};
///
/// let a = SecureBytes::try_from_slice(b"secret", Terminator::Omitted).unwrap();
/// let b = a.clone();
/// ```
pub struct SecureBytes {
    storage: Vec<u8>,
    terminator: Terminator,
}

impl fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureBytes")
            .field("data", &"REDACTED")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl Default for SecureBytes {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates exactly `capacity` zero bytes without aborting on failure.
fn allocate_zeroed(capacity: usize, requested: usize) -> Result<Vec<u8>, AllocationError> {
    if capacity > isize::MAX as usize {
        log::debug!("secure bytes: capacity overflow for {requested} requested bytes");
        return Err(AllocationError::CapacityOverflow { requested });
    }

    let mut storage = Vec::new();
    storage.try_reserve_exact(capacity).map_err(|_| {
        log::debug!("secure bytes: allocator refused {capacity} bytes");
        AllocationError::Refused { capacity }
    })?;

    // No reallocation: capacity was reserved above
    storage.resize(capacity, 0);

    log::trace!("secure bytes: allocated {capacity} bytes");
    Ok(storage)
}

impl SecureBytes {
    /// Creates an empty instance that owns no storage.
    pub const fn new() -> Self {
        Self {
            storage: Vec::new(),
            terminator: Terminator::Omitted,
        }
    }

    /// Allocates `len` zero bytes, plus one zero terminator byte with
    /// [`Terminator::Nul`].
    ///
    /// The storage is zero-filled before it is handed out, so nothing left
    /// behind by the allocator is ever readable through this instance.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the storage cannot be obtained.
    pub fn try_zeroed(len: usize, terminator: Terminator) -> Result<Self, AllocationError> {
        let capacity = terminator
            .capacity_for(len)
            .ok_or(AllocationError::CapacityOverflow { requested: len })?;
        let storage = allocate_zeroed(capacity, len)?;

        Ok(Self {
            storage,
            terminator,
        })
    }

    /// Copies `bytes` into freshly allocated storage.
    ///
    /// The content is copied exactly once. `bytes` is neither consumed nor
    /// wiped: the caller still owns it.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the storage cannot be obtained.
    pub fn try_from_slice(bytes: &[u8], terminator: Terminator) -> Result<Self, AllocationError> {
        let mut secure = Self::try_zeroed(bytes.len(), terminator)?;
        secure.as_bytes_mut().copy_from_slice(bytes);

        Ok(secure)
    }

    /// Copies `text` into a text-flavored instance ([`Terminator::Nul`]).
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] if the storage cannot be obtained.
    pub fn try_from_str(text: &str) -> Result<Self, AllocationError> {
        Self::try_from_slice(text.as_bytes(), Terminator::Nul)
    }

    /// Transfers the storage into a new instance, leaving `self` empty.
    ///
    /// Only the heap pointer moves; the sensitive bytes are not copied.
    pub fn take(&mut self) -> Self {
        log::trace!("secure bytes: transfer out of {} bytes", self.capacity());

        Self {
            storage: mem::take(&mut self.storage),
            terminator: self.terminator,
        }
    }

    /// Wipes the current storage, then takes over the storage of `source`.
    ///
    /// Afterwards `self` holds exactly what `source` held and `source` is
    /// empty. Transferring an instance into itself cannot be written: it
    /// needs two exclusive borrows of the same value.
    ///
    /// ```rust,compile_fail
    /// use secure_bytes::{SecureBytes, Terminator};
    ///
    /// let mut a = SecureBytes::try_from_slice(b"secret", Terminator::Omitted).unwrap();
    /// a.transfer_from(&mut a);
    /// ```
    pub fn transfer_from(&mut self, source: &mut SecureBytes) {
        self.release();

        self.storage = mem::take(&mut source.storage);
        self.terminator = source.terminator;

        log::trace!("secure bytes: transfer in of {} bytes", self.capacity());
    }

    /// Wipes the whole allocation and frees it.
    fn release(&mut self) {
        if self.storage.capacity() == 0 {
            return;
        }

        log::trace!("secure bytes: releasing {} bytes", self.capacity());

        wipe_vec(&mut self.storage);
        self.storage = Vec::new();
    }

    /// Logical content length, excluding the terminator byte.
    #[inline]
    pub fn len(&self) -> usize {
        self.terminator.len_for(self.storage.len())
    }

    /// Returns `true` if there is no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the allocated span in bytes, terminator included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Terminator convention this instance was created with.
    #[inline]
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// Content bytes, without the terminator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len()]
    }

    /// Mutable content bytes, without the terminator.
    ///
    /// The terminator byte is out of reach, so it stays zero whatever is
    /// written here.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.storage[..len]
    }

    /// The whole allocated span, terminator included. Empty once the
    /// instance has been wiped or transferred out.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.storage
    }

    /// Raw pointer to the first allocated byte.
    ///
    /// Dangling (but non-null) when the instance is empty.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    /// Raw mutable pointer to the first allocated byte.
    ///
    /// Writes through this pointer must stay within `capacity()` bytes and
    /// must leave the terminator byte (if any) at zero. Neither is checked.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    /// C string view for [`Terminator::Nul`] instances.
    ///
    /// Stops at the first zero byte. Returns `None` for instances without a
    /// terminator and for empty instances.
    pub fn as_c_str(&self) -> Option<&CStr> {
        match self.terminator {
            Terminator::Nul => CStr::from_bytes_until_nul(&self.storage).ok(),
            Terminator::Omitted => None,
        }
    }
}

impl TryFrom<&[u8]> for SecureBytes {
    type Error = AllocationError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(bytes, Terminator::Omitted)
    }
}

impl TryFrom<&str> for SecureBytes {
    type Error = AllocationError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::try_from_str(text)
    }
}

impl Wipe for SecureBytes {
    /// Wipes and frees the storage; the instance is empty afterwards.
    fn wipe(&mut self) {
        self.release();
    }
}

impl WipeProbe for SecureBytes {
    fn is_wiped(&self) -> bool {
        is_slice_wiped(&self.storage)
    }
}

impl Drop for SecureBytes {
    fn drop(&mut self) {
        self.release();
    }
}
