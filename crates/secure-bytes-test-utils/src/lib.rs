// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for secure-bytes crates.
//!
//! [`RecordingAllocator`] wraps the system allocator. Install it as the
//! `#[global_allocator]` of an integration test binary, then:
//!
//! - [`watch`](RecordingAllocator::watch) a live region; when that region is
//!   deallocated, its bytes are inspected *before* the system allocator gets
//!   them back, and the result is kept as a [`ReleaseOutcome`];
//! - [`refuse_next_allocation_of`](RecordingAllocator::refuse_next_allocation_of)
//!   a given size to simulate allocator exhaustion.
//!
//! ```rust,ignore
//! use secure_bytes_test_utils::{RecordingAllocator, ReleaseOutcome};
//!
//! #[global_allocator]
//! static ALLOCATOR: RecordingAllocator = RecordingAllocator::new();
//!
//! let secret = vec![0xAAu8; 32];
//! let id = ALLOCATOR.watch(secret.as_ptr(), secret.len());
//! drop(secret);
//! assert_eq!(ALLOCATOR.outcome(id), ReleaseOutcome::Dirty);
//! ```
//!
//! The allocator is process-global: tests that watch or arm it should run
//! under `#[serial(allocator)]`.
//!
//! ## License
//!
//! GPL-3.0-only

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

const WATCH_SLOTS: usize = 64;

const SLOT_FREE: u8 = 0;
const SLOT_CLAIMED: u8 = 1;
const SLOT_WATCHING: u8 = 2;
const SLOT_RELEASED_WIPED: u8 = 3;
const SLOT_RELEASED_DIRTY: u8 = 4;

/// What a watched region looked like when it was handed back to the allocator.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReleaseOutcome {
    /// Not deallocated yet.
    Pending,
    /// Every watched byte was zero at deallocation.
    Wiped,
    /// At least one watched byte was non-zero at deallocation.
    Dirty,
}

/// Handle returned by [`RecordingAllocator::watch`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct WatchId(usize);

struct WatchSlot {
    addr: AtomicUsize,
    len: AtomicUsize,
    state: AtomicU8,
}

impl WatchSlot {
    const fn new() -> Self {
        Self {
            addr: AtomicUsize::new(0),
            len: AtomicUsize::new(0),
            state: AtomicU8::new(SLOT_FREE),
        }
    }
}

/// System allocator wrapper that inspects watched regions on `dealloc` and
/// can refuse allocations on demand.
///
/// Bookkeeping uses fixed atomic slots only, so the allocator never allocates
/// on its own behalf.
pub struct RecordingAllocator {
    slots: [WatchSlot; WATCH_SLOTS],
    refuse_size: AtomicUsize,
}

impl Default for RecordingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingAllocator {
    /// Creates an allocator with no watched regions and nothing armed.
    pub const fn new() -> Self {
        Self {
            slots: [const { WatchSlot::new() }; WATCH_SLOTS],
            refuse_size: AtomicUsize::new(0),
        }
    }

    /// Watches the `len` bytes starting at `ptr` until they are deallocated.
    ///
    /// `ptr` must be the start of a live allocation made through this
    /// allocator.
    ///
    /// # Panics
    ///
    /// Panics if every watch slot is in use.
    pub fn watch(&self, ptr: *const u8, len: usize) -> WatchId {
        for (index, slot) in self.slots.iter().enumerate() {
            if slot
                .state
                .compare_exchange(SLOT_FREE, SLOT_CLAIMED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                slot.addr.store(ptr as usize, Ordering::Relaxed);
                slot.len.store(len, Ordering::Relaxed);
                slot.state.store(SLOT_WATCHING, Ordering::Release);

                return WatchId(index);
            }
        }

        panic!("RecordingAllocator: all {WATCH_SLOTS} watch slots are in use");
    }

    /// Returns the outcome recorded for `id`.
    pub fn outcome(&self, id: WatchId) -> ReleaseOutcome {
        match self.slots[id.0].state.load(Ordering::Acquire) {
            SLOT_RELEASED_WIPED => ReleaseOutcome::Wiped,
            SLOT_RELEASED_DIRTY => ReleaseOutcome::Dirty,
            _ => ReleaseOutcome::Pending,
        }
    }

    /// Frees the slot behind `id`, returning its final outcome.
    pub fn unwatch(&self, id: WatchId) -> ReleaseOutcome {
        let outcome = self.outcome(id);
        self.slots[id.0].state.store(SLOT_FREE, Ordering::Release);
        outcome
    }

    /// Makes the next allocation of exactly `size` bytes return null.
    ///
    /// Only one refusal is armed at a time; arming again replaces it.
    pub fn refuse_next_allocation_of(&self, size: usize) {
        self.refuse_size.store(size, Ordering::Release);
    }

    /// Cancels an armed refusal that has not fired.
    pub fn disarm(&self) {
        self.refuse_size.store(0, Ordering::Release);
    }

    fn should_refuse(&self, size: usize) -> bool {
        size != 0
            && self
                .refuse_size
                .compare_exchange(size, 0, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
    }

    /// Records the state of every watched region starting at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `size` bytes.
    unsafe fn inspect(&self, ptr: *const u8, size: usize) {
        for slot in &self.slots {
            if slot.state.load(Ordering::Acquire) != SLOT_WATCHING
                || slot.addr.load(Ordering::Relaxed) != ptr as usize
            {
                continue;
            }

            let len = slot.len.load(Ordering::Relaxed).min(size);
            let wiped = (0..len).all(|i| {
                // SAFETY: i < len <= size, inside the block being released
                unsafe { core::ptr::read_volatile(ptr.add(i)) == 0 }
            });

            let state = if wiped {
                SLOT_RELEASED_WIPED
            } else {
                SLOT_RELEASED_DIRTY
            };
            slot.state.store(state, Ordering::Release);
        }
    }
}

unsafe impl GlobalAlloc for RecordingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if self.should_refuse(layout.size()) {
            return core::ptr::null_mut();
        }

        // SAFETY: forwarded with the caller's layout
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` is a live block of `layout.size()` bytes until the
        // System call below
        unsafe {
            self.inspect(ptr, layout.size());
            System.dealloc(ptr, layout);
        }
    }
}
