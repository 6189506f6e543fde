// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Construction under allocator refusal.

use secure_bytes::{AllocationError, SecureBytes, Terminator};
use secure_bytes_test_utils::RecordingAllocator;
use serial_test::serial;

#[global_allocator]
static ALLOCATOR: RecordingAllocator = RecordingAllocator::new();

// Unlikely to be requested by anything else in the test harness
const REFUSED_SIZE: usize = 7919;

#[test]
#[serial(allocator)]
fn test_try_zeroed_surfaces_refusal() {
    ALLOCATOR.refuse_next_allocation_of(REFUSED_SIZE);

    let result = SecureBytes::try_zeroed(REFUSED_SIZE, Terminator::Omitted);
    ALLOCATOR.disarm();

    assert_eq!(
        result.expect_err("Expected refusal"),
        AllocationError::Refused {
            capacity: REFUSED_SIZE
        }
    );
}

#[test]
#[serial(allocator)]
fn test_try_zeroed_with_terminator_requests_one_more_byte() {
    ALLOCATOR.refuse_next_allocation_of(REFUSED_SIZE);

    let result = SecureBytes::try_zeroed(REFUSED_SIZE - 1, Terminator::Nul);
    ALLOCATOR.disarm();

    assert!(matches!(
        result,
        Err(AllocationError::Refused { capacity }) if capacity == REFUSED_SIZE
    ));
}

#[test]
#[serial(allocator)]
fn test_try_from_slice_surfaces_refusal() {
    let source = vec![0x42u8; REFUSED_SIZE];
    ALLOCATOR.refuse_next_allocation_of(REFUSED_SIZE);

    let result = SecureBytes::try_from_slice(&source, Terminator::Omitted);
    ALLOCATOR.disarm();

    assert!(matches!(result, Err(AllocationError::Refused { .. })));
    // Caller's buffer is untouched
    assert!(source.iter().all(|&b| b == 0x42));
}

#[test]
#[serial(allocator)]
fn test_allocation_succeeds_after_refusal() {
    ALLOCATOR.refuse_next_allocation_of(REFUSED_SIZE);
    assert!(SecureBytes::try_zeroed(REFUSED_SIZE, Terminator::Omitted).is_err());
    ALLOCATOR.disarm();

    let secure = SecureBytes::try_zeroed(REFUSED_SIZE, Terminator::Omitted)
        .expect("Failed to try_zeroed(..)");

    assert_eq!(secure.len(), REFUSED_SIZE);
    assert!(secure.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_error_messages() {
    let refused = AllocationError::Refused { capacity: 64 };
    let overflow = AllocationError::CapacityOverflow { requested: 7 };

    assert_eq!(refused.to_string(), "allocator refused 64 bytes");
    assert_eq!(
        overflow.to_string(),
        "capacity overflow: 7 bytes cannot be allocated"
    );
}
