// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for secure-bytes.
use thiserror::Error;

/// Storage for a [`SecureBytes`](crate::SecureBytes) could not be obtained.
///
/// This is the only failure mode of construction. No instance exists when it
/// is returned.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocationError {
    /// The requested length (plus terminator) exceeds the addressable size.
    #[error("capacity overflow: {requested} bytes cannot be allocated")]
    CapacityOverflow {
        /// Logical length the caller asked for.
        requested: usize,
    },

    /// The allocator returned no memory.
    #[error("allocator refused {capacity} bytes")]
    Refused {
        /// Number of bytes that were requested from the allocator.
        capacity: usize,
    },
}
