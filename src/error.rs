use core::error;
use core::ffi::{CStr, c_int};
use core::fmt;

use alloc::string::String;

use crate::ffi;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A native result code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Code {
    raw: c_int,
}

impl Code {
    /// Construct a new code from the specified raw code.
    #[inline]
    pub(crate) const fn new(raw: c_int) -> Self {
        Self { raw }
    }

    /// Return the numeric representation of the code.
    ///
    /// For errors sourced from a live connection this is the engine's
    /// *extended* result code; the primary code is its low byte.
    #[inline]
    pub const fn as_raw(self) -> c_int {
        self.raw
    }
}

macro_rules! define_codes {
    ($(
        $vis:vis const $name:ident = $value:ident;
    )*) => {
        impl Code {
            $(
                $vis const $name: Code = Code::new($crate::ffi::$value);
            )*
        }

        impl fmt::Display for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Code::$name => write!(f, stringify!($name)),)*
                    Code { raw } => write!(f, "UNKNOWN({raw})"),
                }
            }
        }

        impl fmt::Debug for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Code::$name => write!(f, stringify!($name)),)*
                    Code { raw } => write!(f, "UNKNOWN({raw})"),
                }
            }
        }
    };
}

define_codes! {
    pub const OK = SQLITE_OK;
    pub const ERROR = SQLITE_ERROR;
    pub const INTERNAL = SQLITE_INTERNAL;
    pub const PERM = SQLITE_PERM;
    pub const ABORT = SQLITE_ABORT;
    pub const BUSY = SQLITE_BUSY;
    pub const LOCKED = SQLITE_LOCKED;
    pub const NOMEM = SQLITE_NOMEM;
    pub const READONLY = SQLITE_READONLY;
    pub const INTERRUPT = SQLITE_INTERRUPT;
    pub const IOERR = SQLITE_IOERR;
    pub const CORRUPT = SQLITE_CORRUPT;
    pub const NOTFOUND = SQLITE_NOTFOUND;
    pub const FULL = SQLITE_FULL;
    pub const CANTOPEN = SQLITE_CANTOPEN;
    pub const PROTOCOL = SQLITE_PROTOCOL;
    pub const EMPTY = SQLITE_EMPTY;
    pub const SCHEMA = SQLITE_SCHEMA;
    pub const TOOBIG = SQLITE_TOOBIG;
    pub const CONSTRAINT = SQLITE_CONSTRAINT;
    pub const MISMATCH = SQLITE_MISMATCH;
    pub const MISUSE = SQLITE_MISUSE;
    pub const NOLFS = SQLITE_NOLFS;
    pub const AUTH = SQLITE_AUTH;
    pub const FORMAT = SQLITE_FORMAT;
    pub const RANGE = SQLITE_RANGE;
    pub const NOTADB = SQLITE_NOTADB;
    pub const NOTICE = SQLITE_NOTICE;
    pub const WARNING = SQLITE_WARNING;
    pub const BUSY_RECOVERY = SQLITE_BUSY_RECOVERY;
    pub const BUSY_SNAPSHOT = SQLITE_BUSY_SNAPSHOT;
    pub const LOCKED_SHAREDCACHE = SQLITE_LOCKED_SHAREDCACHE;
    pub const CANTOPEN_NOTEMPDIR = SQLITE_CANTOPEN_NOTEMPDIR;
    pub const CANTOPEN_ISDIR = SQLITE_CANTOPEN_ISDIR;
    pub const CANTOPEN_FULLPATH = SQLITE_CANTOPEN_FULLPATH;
    pub const CONSTRAINT_CHECK = SQLITE_CONSTRAINT_CHECK;
    pub const CONSTRAINT_FOREIGNKEY = SQLITE_CONSTRAINT_FOREIGNKEY;
    pub const CONSTRAINT_NOTNULL = SQLITE_CONSTRAINT_NOTNULL;
    pub const CONSTRAINT_PRIMARYKEY = SQLITE_CONSTRAINT_PRIMARYKEY;
    pub const CONSTRAINT_UNIQUE = SQLITE_CONSTRAINT_UNIQUE;
    pub const CONSTRAINT_ROWID = SQLITE_CONSTRAINT_ROWID;
    pub const READONLY_RECOVERY = SQLITE_READONLY_RECOVERY;
    pub const READONLY_CANTLOCK = SQLITE_READONLY_CANTLOCK;
    pub const READONLY_ROLLBACK = SQLITE_READONLY_ROLLBACK;
    pub const READONLY_DBMOVED = SQLITE_READONLY_DBMOVED;
}

/// An immutable failure snapshot.
///
/// Carries the native result code and the engine's message as they were at
/// the moment of failure. The snapshot is not tied to the lifetime of any
/// handle afterwards.
pub struct Error {
    code: Code,
    message: String,
}

impl Error {
    /// Construct an error from a raw result code alone.
    ///
    /// Used where no connection is available to source a message from; the
    /// message is the engine's generic description of the code.
    pub(crate) fn from_raw(raw: c_int) -> Self {
        let message = unsafe { copy_message(ffi::sqlite3_errstr(raw)) };

        Self {
            code: Code::new(raw),
            message,
        }
    }

    /// Snapshot the current error state of a connection.
    ///
    /// # Safety
    ///
    /// `db` must be a valid database handle or null. Null means the engine
    /// could not even allocate a handle, which it defines as out of memory.
    pub(crate) unsafe fn last(db: *mut ffi::sqlite3) -> Self {
        if db.is_null() {
            return Self::from_raw(ffi::SQLITE_NOMEM);
        }

        unsafe {
            let code = ffi::sqlite3_extended_errcode(db);
            let message = copy_message(ffi::sqlite3_errmsg(db));

            Self {
                code: Code::new(code),
                message,
            }
        }
    }

    /// The native result code that caused this error.
    #[inline]
    pub fn code(&self) -> Code {
        self.code
    }

    /// The engine's message for this error.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Copy an engine-owned message into storage which survives the handle.
unsafe fn copy_message(ptr: *const core::ffi::c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }

    unsafe { String::from_utf8_lossy(CStr::from_ptr(ptr).to_bytes()).into_owned() }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlite3 error {}", self.code.as_raw())?;

        if self.message.is_empty() {
            write!(f, ": no message")
        } else {
            write!(f, ": {}", self.message)
        }
    }
}

impl error::Error for Error {}
