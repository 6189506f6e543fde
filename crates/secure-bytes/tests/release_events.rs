// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Checks that every release path emits the trace-level release event.

#[cfg(test)]
mod release_events_tests {
    use std::sync::Once;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use log::{LevelFilter, Log, Metadata, Record};
    use secure_bytes::{SecureBytes, Terminator, Wipe};
    use serial_test::serial;

    struct ReleaseCounter {
        releases: AtomicUsize,
    }

    impl Log for ReleaseCounter {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if record.args().to_string().starts_with("secure bytes: releasing") {
                self.releases.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static COUNTER: ReleaseCounter = ReleaseCounter {
        releases: AtomicUsize::new(0),
    };
    static INIT: Once = Once::new();

    fn releases() -> usize {
        INIT.call_once(|| {
            log::set_logger(&COUNTER).expect("Failed to set_logger(..)");
            log::set_max_level(LevelFilter::Trace);
        });

        COUNTER.releases.load(Ordering::SeqCst)
    }

    #[test]
    #[serial(logger)]
    fn test_drop_emits_release_event() {
        let before = releases();

        {
            let _secure = SecureBytes::try_from_str("scoped secret")
                .expect("Failed to try_from_str(..)");
        }

        assert_eq!(releases(), before + 1);
    }

    #[test]
    #[serial(logger)]
    fn test_wipe_then_drop_emits_one_release_event() {
        let before = releases();

        let mut secure = SecureBytes::try_zeroed(32, Terminator::Omitted)
            .expect("Failed to try_zeroed(..)");
        secure.wipe();
        drop(secure);

        assert_eq!(releases(), before + 1);
    }

    #[test]
    #[serial(logger)]
    fn test_dropping_empty_instance_emits_nothing() {
        let before = releases();

        drop(SecureBytes::new());

        let mut secure = SecureBytes::try_from_slice(b"moved", Terminator::Omitted)
            .expect("Failed to try_from_slice(..)");
        let moved = secure.take();
        drop(secure);

        assert_eq!(releases(), before);
        drop(moved);
        assert_eq!(releases(), before + 1);
    }
}
