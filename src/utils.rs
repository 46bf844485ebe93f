use alloc::vec::Vec;

#[cfg(feature = "std")]
use alloc::ffi::CString;

#[cfg(feature = "std")]
use std::path::Path;

#[cfg(feature = "std")]
use crate::error::{Error, Result};
#[cfg(feature = "std")]
use crate::ffi;

#[cfg(feature = "std")]
#[cfg(unix)]
pub(crate) fn path_to_cstring(p: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;

    match CString::new(p.as_os_str().as_bytes()) {
        Ok(string) => Ok(string),
        Err(..) => Err(Error::from_raw(ffi::SQLITE_MISUSE)),
    }
}

#[cfg(feature = "std")]
#[cfg(not(unix))]
pub(crate) fn path_to_cstring(p: &Path) -> Result<CString> {
    let Some(s) = p.to_str() else {
        return Err(Error::from_raw(ffi::SQLITE_MISUSE));
    };

    match CString::new(s) {
        Ok(string) => Ok(string),
        Err(..) => Err(Error::from_raw(ffi::SQLITE_MISUSE)),
    }
}

/// Encode text as NUL-terminated UTF-16 in native byte order, which is what
/// the engine's wide entry points expect.
pub(crate) fn text_to_utf16z(s: &str) -> Vec<u16> {
    let mut out = s.encode_utf16().collect::<Vec<u16>>();
    out.push(0);
    out
}
