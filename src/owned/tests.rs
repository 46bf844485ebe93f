use core::ffi::c_int;
use core::mem;
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::boxed::Box;

use crate::ffi;

use super::{Owned, Release};

struct Counted;

static RELEASED: AtomicUsize = AtomicUsize::new(0);

impl Release for Counted {
    type Raw = u8;

    unsafe fn release(raw: *mut u8) -> c_int {
        RELEASED.fetch_add(1, Ordering::SeqCst);
        drop(unsafe { Box::from_raw(raw) });
        ffi::SQLITE_OK
    }
}

fn acquire() -> *mut u8 {
    Box::into_raw(Box::new(0u8))
}

// Single test so the shared counter sees one deterministic sequence.
#[test]
fn release_runs_once_per_acquired_handle() {
    let released = || RELEASED.load(Ordering::SeqCst);

    // A sentinel owner never releases.
    drop(Owned::<Counted>::new());
    drop(Owned::<Counted>::from_raw(ptr::null_mut()));
    assert_eq!(released(), 0);

    // One acquisition, one release.
    drop(Owned::<Counted>::from_raw(acquire()));
    assert_eq!(released(), 1);

    // A move transfers ownership instead of duplicating it.
    let first = Owned::<Counted>::from_raw(acquire());
    let second = first;
    assert!(second.is_some());
    drop(second);
    assert_eq!(released(), 2);

    // Replacing an owner's value releases the previous handle immediately
    // and the new one when the owner goes away.
    let mut owner = Owned::<Counted>::from_raw(acquire());
    owner = Owned::from_raw(acquire());
    assert_eq!(released(), 3);
    drop(owner);
    assert_eq!(released(), 4);

    // Swapping two owners releases each handle exactly once.
    let mut a = Owned::<Counted>::from_raw(acquire());
    let mut b = Owned::<Counted>::new();
    mem::swap(&mut a, &mut b);
    assert!(!a.is_some());
    assert!(b.is_some());
    drop(a);
    assert_eq!(released(), 4);
    drop(b);
    assert_eq!(released(), 5);
}

// Separate policy so this test does not disturb the counter above.
struct Plain;

impl Release for Plain {
    type Raw = u8;

    unsafe fn release(raw: *mut u8) -> c_int {
        drop(unsafe { Box::from_raw(raw) });
        ffi::SQLITE_OK
    }
}

#[test]
fn out_slot_populates_empty_owner() {
    let mut owner = Owned::<Plain>::new();
    assert!(!owner.is_some());

    let handle = acquire();

    unsafe {
        *owner.as_out() = handle;
    }

    assert!(owner.is_some());
    assert_eq!(owner.get(), handle);
}
