use core::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static RESETS: AtomicUsize = AtomicUsize::new(0);

fn count_reset() {
    RESETS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn reset_runs_registered_function_once() {
    handle_reset(None);
    reset();
    assert_eq!(RESETS.load(Ordering::SeqCst), 0);

    handle_reset(Some(&count_reset));
    assert!(has_reset());
    reset();
    reset();
    assert_eq!(RESETS.load(Ordering::SeqCst), 1);
    assert!(!has_reset());
}
