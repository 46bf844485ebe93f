//! Access point for the native bindings.
//!
//! Everything reaches the engine through this module so the sys crate in use
//! is visible in exactly one place.

pub(crate) use libsqlite3_sys::*;
