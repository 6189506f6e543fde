// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Whether a trailing zero byte is reserved after the content.
///
/// With [`Terminator::Nul`] the allocation is one byte larger than the content
/// and the extra byte stays zero, which makes the buffer usable as a C string.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Terminator {
    /// Content fills the whole allocation.
    #[default]
    Omitted,
    /// The last allocated byte is reserved as a zero terminator.
    Nul,
}

impl Terminator {
    /// Bytes to allocate for `len` bytes of content, or `None` on overflow.
    #[inline]
    pub(crate) fn capacity_for(self, len: usize) -> Option<usize> {
        match self {
            Self::Omitted => Some(len),
            Self::Nul => len.checked_add(1),
        }
    }

    /// Logical content length held by an allocation of `capacity` bytes.
    #[inline]
    pub(crate) fn len_for(self, capacity: usize) -> usize {
        match self {
            Self::Omitted => capacity,
            Self::Nul => capacity.saturating_sub(1),
        }
    }
}
