use core::ffi::{CStr, c_int};
use core::str;

use crate::ffi;

/// Return the version string of the SQLite library in use.
///
/// # Examples
///
/// ```
/// assert!(sqown::lib_version().starts_with("3."));
/// ```
#[inline]
pub fn lib_version() -> &'static str {
    unsafe {
        let c_str = ffi::sqlite3_libversion();
        let bytes = CStr::from_ptr(c_str).to_bytes();
        str::from_utf8_unchecked(bytes)
    }
}

/// Return the version number of the SQLite library in use.
///
/// A version `3.46.0` as returned by [`lib_version`] would correspond to the
/// integer `3046000`.
///
/// # Examples
///
/// ```
/// assert!(matches!(sqown::lib_version_number(), 3000000..4000000));
/// ```
#[inline]
pub fn lib_version_number() -> c_int {
    unsafe { ffi::sqlite3_libversion_number() }
}
