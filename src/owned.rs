use core::ffi::c_int;
use core::ptr;

use crate::ffi;

#[cfg(test)]
mod tests;

/// Release policy for an owned native handle.
///
/// Implementations name the opaque engine type and supply the native release
/// operation, which the owner invokes exactly once when ownership ends.
pub(crate) trait Release {
    /// The opaque native type behind the handle.
    type Raw;

    /// Release the handle.
    ///
    /// # Safety
    ///
    /// `raw` must be a valid handle acquired from the engine which has not
    /// been released before.
    unsafe fn release(raw: *mut Self::Raw) -> c_int;
}

/// Exclusive owner of one native handle under a release policy.
///
/// The null pointer is the sentinel meaning "no resource". Moving is the only
/// transfer primitive between owners, so at most one live owner holds a given
/// non-null handle; replacing the value of an owner drops, and thereby
/// releases, whatever it held before.
pub(crate) struct Owned<T>
where
    T: Release,
{
    raw: *mut T::Raw,
}

impl<T> Owned<T>
where
    T: Release,
{
    /// Construct an owner holding the sentinel.
    pub(crate) const fn new() -> Self {
        Self {
            raw: ptr::null_mut(),
        }
    }

    /// Take ownership of a raw handle, which may be null.
    #[cfg(test)]
    pub(crate) fn from_raw(raw: *mut T::Raw) -> Self {
        Self { raw }
    }

    /// Borrow the raw handle without transferring ownership.
    #[inline]
    pub(crate) fn get(&self) -> *mut T::Raw {
        self.raw
    }

    /// Whether a non-sentinel handle is held.
    #[inline]
    pub(crate) fn is_some(&self) -> bool {
        !self.raw.is_null()
    }

    /// Expose the internal slot for a native out-parameter to populate.
    ///
    /// The owner must be empty, otherwise the populated handle would displace
    /// an owned one without releasing it. Once the external call returns, the
    /// slot holds either a valid handle or the sentinel and the owner is in a
    /// normal state again.
    #[inline]
    pub(crate) fn as_out(&mut self) -> *mut *mut T::Raw {
        debug_assert!(self.raw.is_null(), "out-slot taken on a non-empty owner");
        &mut self.raw
    }
}

impl<T> Drop for Owned<T>
where
    T: Release,
{
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }

        // SAFETY: A non-null handle is held by exactly this owner and has not
        // been released yet.
        let code = unsafe { T::release(self.raw) };

        // No recovery exists for a failed release at destruction time.
        debug_assert_eq!(code, ffi::SQLITE_OK, "native release failed");
    }
}
