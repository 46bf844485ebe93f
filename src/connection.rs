use core::ffi::{CStr, c_int};
use core::fmt;
use core::mem;

#[cfg(feature = "std")]
use std::path::Path;

use crate::error::{Error, Result};
use crate::ffi;
use crate::owned::{Owned, Release};
use crate::statement::Statement;
use crate::utils;

/// Release policy for database handles.
///
/// Closing in v2 mode means the database stays alive until every statement
/// derived from it has been finalized; the engine itself enforces the
/// dependency order.
pub(crate) struct Db;

impl Release for Db {
    type Raw = ffi::sqlite3;

    unsafe fn release(raw: *mut Self::Raw) -> c_int {
        unsafe { ffi::sqlite3_close_v2(raw) }
    }
}

/// A database connection owning one native database handle.
///
/// A connection starts empty and acquires a database through one of the open
/// operations. The handle is released when the connection is dropped, on
/// every exit path.
///
/// # Examples
///
/// ```
/// use sqown::Connection;
///
/// let c = Connection::new();
/// assert!(!c.is_open());
///
/// let c = Connection::open_in_memory()?;
/// assert!(c.is_open());
/// # Ok::<_, sqown::Error>(())
/// ```
pub struct Connection {
    handle: Owned<Db>,
}

/// Connection is `Send`.
unsafe impl Send for Connection {}

impl fmt::Debug for Connection {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    /// Construct a connection which does not hold a database.
    pub const fn new() -> Self {
        Self {
            handle: Owned::new(),
        }
    }

    /// Open a read-write connection to a new or existing database at `path`.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn open(path: impl AsRef<Path>) -> Result<Connection> {
        let mut c = Connection::new();
        c.reopen(path)?;
        Ok(c)
    }

    /// Open a database at `path` through the engine's UTF-16 entry point.
    pub fn open16(path: &str) -> Result<Connection> {
        let mut c = Connection::new();
        c.reopen16(path)?;
        Ok(c)
    }

    /// Open an ephemeral in-memory database.
    pub fn open_in_memory() -> Result<Connection> {
        let mut c = Connection::new();
        c.reopen_cstr(c":memory:")?;
        Ok(c)
    }

    /// Open an ephemeral in-memory database through the UTF-16 entry point.
    pub fn open_in_memory16() -> Result<Connection> {
        Connection::open16(":memory:")
    }

    /// Open a database at `path` into this connection.
    ///
    /// The open is staged through a temporary connection and committed only
    /// on success, so a database this connection already holds survives a
    /// failed re-open untouched. On success the previously held database, if
    /// any, is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqown::Connection;
    ///
    /// let mut c = Connection::open_in_memory()?;
    ///
    /// assert!(c.reopen("missing/dir/db.sqlite3").is_err());
    /// assert!(c.is_open());
    /// # Ok::<_, sqown::Error>(())
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn reopen(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = utils::path_to_cstring(path.as_ref())?;
        self.reopen_cstr(&path)
    }

    /// Open a database at `path` into this connection through the engine's
    /// UTF-16 entry point.
    ///
    /// Staged exactly like [`reopen`].
    ///
    /// [`reopen`]: Self::reopen
    pub fn reopen16(&mut self, path: &str) -> Result<()> {
        let path = utils::text_to_utf16z(path);

        let mut temp = Connection::new();
        let code = unsafe { ffi::sqlite3_open16(path.as_ptr().cast(), temp.handle.as_out()) };
        self.commit_open(temp, code)
    }

    fn reopen_cstr(&mut self, path: &CStr) -> Result<()> {
        let mut temp = Connection::new();
        let code = unsafe { ffi::sqlite3_open(path.as_ptr(), temp.handle.as_out()) };
        self.commit_open(temp, code)
    }

    /// Commit a staged open, or translate its failure.
    ///
    /// The engine returns a handle even for most failed opens so the error
    /// snapshot is taken from the temporary; dropping the temporary then
    /// releases the failed handle, or the displaced one on success.
    fn commit_open(&mut self, mut temp: Connection, code: c_int) -> Result<()> {
        if code != ffi::SQLITE_OK {
            return Err(if temp.is_open() {
                temp.last_error()
            } else {
                Error::from_raw(code)
            });
        }

        mem::swap(&mut self.handle, &mut temp.handle);
        Ok(())
    }

    /// Whether this connection currently holds a database.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// The raw database handle, for delegation to dependent objects.
    ///
    /// Ownership is not transferred; the handle must not be released through
    /// this pointer.
    #[inline]
    pub fn as_ptr(&self) -> *mut ffi::sqlite3 {
        self.handle.get()
    }

    /// Snapshot this connection's current error state.
    ///
    /// Precondition (checked in debug builds only): the connection holds a
    /// database.
    pub fn last_error(&self) -> Error {
        debug_assert!(self.is_open(), "error snapshot from an empty connection");
        unsafe { Error::last(self.handle.get()) }
    }

    /// Prepare a statement against this connection.
    ///
    /// The connection must hold a database; see [`Statement::prepare`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sqown::Connection;
    ///
    /// let c = Connection::open_in_memory()?;
    /// c.prepare("CREATE TABLE t (x INTEGER)")?.execute()?;
    /// # Ok::<_, sqown::Error>(())
    /// ```
    pub fn prepare(&self, sql: impl AsRef<str>) -> Result<Statement> {
        let mut stmt = Statement::new();
        stmt.prepare(self, sql.as_ref())?;
        Ok(stmt)
    }

    /// Prepare a statement from UTF-16 text against this connection.
    pub fn prepare16(&self, sql: impl AsRef<str>) -> Result<Statement> {
        let mut stmt = Statement::new();
        stmt.prepare16(self, sql.as_ref())?;
        Ok(stmt)
    }
}
