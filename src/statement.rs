use core::ffi::c_int;
use core::fmt;
use core::ptr;

use alloc::vec::Vec;

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::ffi;
use crate::owned::{Owned, Release};

/// Release policy for prepared statement handles.
pub(crate) struct Stmt;

impl Release for Stmt {
    type Raw = ffi::sqlite3_stmt;

    unsafe fn release(raw: *mut Self::Raw) -> c_int {
        unsafe { ffi::sqlite3_finalize(raw) }
    }
}

/// The outcome of a successful [`step`].
///
/// The engine, not the wrapper, is authoritative on which state a prepared
/// statement is in; this only reports the outcome of the last step. Anything
/// other than these two outcomes is a true error and surfaces as [`Error`]
/// instead.
///
/// [`step`]: Statement::step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum State {
    /// A row is available for reading.
    Row,
    /// The statement has been entirely evaluated.
    Done,
}

impl State {
    /// Whether a row is available.
    #[inline]
    pub fn is_row(self) -> bool {
        matches!(self, State::Row)
    }

    /// Whether the statement has been entirely evaluated.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, State::Done)
    }
}

/// A prepared statement owning one native statement handle.
///
/// A statement starts unprepared and is compiled against a live
/// [`Connection`] through [`prepare`]. The handle is finalized when the
/// statement is dropped, from any state.
///
/// After preparation the statement retains no reference to its connection;
/// error lookups go through the native linkage between the two handles at the
/// moment of failure.
///
/// [`prepare`]: Self::prepare
pub struct Statement {
    handle: Owned<Stmt>,
}

/// A prepared statement is `Send`.
unsafe impl Send for Statement {}

impl fmt::Debug for Statement {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement").finish_non_exhaustive()
    }
}

impl Statement {
    /// Construct a statement which has not been prepared.
    pub const fn new() -> Self {
        Self {
            handle: Owned::new(),
        }
    }

    /// Compile `sql` against `connection`.
    ///
    /// Only the first statement in `sql` is compiled. On failure the
    /// connection's error is returned and this statement is left exactly as
    /// it was.
    ///
    /// Precondition (checked in debug builds only): `connection` holds a
    /// database. The database must then remain alive for every subsequent
    /// step and read, which the engine guarantees as long as the statement
    /// has not been dropped; see the crate-level notes.
    pub fn prepare(&mut self, connection: &Connection, sql: &str) -> Result<()> {
        debug_assert!(connection.is_open(), "prepare against an empty connection");

        let Ok(len) = c_int::try_from(sql.len()) else {
            return Err(Error::from_raw(ffi::SQLITE_TOOBIG));
        };

        let mut temp = Owned::<Stmt>::new();

        let code = unsafe {
            ffi::sqlite3_prepare_v2(
                connection.as_ptr(),
                sql.as_ptr().cast(),
                len,
                temp.as_out(),
                ptr::null_mut(),
            )
        };

        if code != ffi::SQLITE_OK {
            return Err(connection.last_error());
        }

        self.handle = temp;
        Ok(())
    }

    /// Compile `sql` against `connection` through the engine's UTF-16 entry
    /// point.
    ///
    /// Behaves exactly like [`prepare`].
    ///
    /// [`prepare`]: Self::prepare
    pub fn prepare16(&mut self, connection: &Connection, sql: &str) -> Result<()> {
        debug_assert!(connection.is_open(), "prepare against an empty connection");

        let sql = sql.encode_utf16().collect::<Vec<u16>>();

        let Ok(len) = c_int::try_from(sql.len() * 2) else {
            return Err(Error::from_raw(ffi::SQLITE_TOOBIG));
        };

        let mut temp = Owned::<Stmt>::new();

        let code = unsafe {
            ffi::sqlite3_prepare16_v2(
                connection.as_ptr(),
                sql.as_ptr().cast(),
                len,
                temp.as_out(),
                ptr::null_mut(),
            )
        };

        if code != ffi::SQLITE_OK {
            return Err(connection.last_error());
        }

        self.handle = temp;
        Ok(())
    }

    /// Advance the statement by one step.
    ///
    /// Returns [`State::Row`] while rows are available and [`State::Done`]
    /// once the statement has been entirely evaluated. Any other native
    /// outcome, including busy and locked states, is translated into an
    /// [`Error`] sourced from the owning connection at the moment of failure;
    /// the statement itself remains valid and finalizable.
    ///
    /// Precondition (checked in debug builds only): the statement is
    /// prepared.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqown::{Connection, Reader, State};
    ///
    /// let c = Connection::open_in_memory()?;
    /// let mut stmt = c.prepare("SELECT 1")?;
    ///
    /// assert_eq!(stmt.step()?, State::Row);
    /// assert_eq!(stmt.int(0), 1);
    /// assert_eq!(stmt.step()?, State::Done);
    /// # Ok::<_, sqown::Error>(())
    /// ```
    pub fn step(&mut self) -> Result<State> {
        debug_assert!(self.is_prepared(), "step on an unprepared statement");

        unsafe {
            match ffi::sqlite3_step(self.handle.get()) {
                ffi::SQLITE_ROW => Ok(State::Row),
                ffi::SQLITE_DONE => Ok(State::Done),
                _ => Err(self.last_error()),
            }
        }
    }

    /// Evaluate a statement which produces no rows.
    ///
    /// Steps exactly once. Calling this on a statement whose step would
    /// produce a row is misuse, checked in debug builds only.
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
    pub fn execute(&mut self) -> Result<()> {
        let state = self.step()?;
        debug_assert!(state.is_done(), "execute on a statement producing rows");
        Ok(())
    }

    /// Whether this statement has been prepared.
    #[inline]
    pub fn is_prepared(&self) -> bool {
        self.handle.is_some()
    }

    /// The raw statement handle.
    ///
    /// Ownership is not transferred; the handle must not be finalized through
    /// this pointer.
    #[inline]
    pub fn as_ptr(&self) -> *mut ffi::sqlite3_stmt {
        self.handle.get()
    }

    /// Snapshot the error state of the connection owning this statement.
    ///
    /// The connection is found through the native linkage between the two
    /// handles; the statement caches no reference of its own.
    ///
    /// Precondition (checked in debug builds only): the statement is
    /// prepared.
    pub fn last_error(&self) -> Error {
        debug_assert!(self.is_prepared(), "error snapshot from an unprepared statement");
        unsafe { Error::last(ffi::sqlite3_db_handle(self.handle.get())) }
    }
}
