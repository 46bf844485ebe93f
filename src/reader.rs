use core::ffi::c_int;
use core::mem;
use core::slice;
use core::str;

use crate::ffi;
use crate::statement::Statement;

mod sealed {
    use crate::statement::Statement;

    pub trait Sealed {}
    impl Sealed for Statement {}
}

/// Read-only column access for row-shaped resources.
///
/// This is a statically attached capability rather than a base type: any
/// resource exposing a raw statement handle gets the accessors through the
/// trait with no dynamic dispatch involved. [`Statement`] is the one such
/// resource here.
///
/// All accessors are valid only while the resource holds a ready row, that
/// is, after a step returned [`State::Row`] and before the next step. Reading
/// outside that window or from an out-of-range index is engine-defined and
/// not checked here.
///
/// The first column has index 0.
///
/// [`State::Row`]: crate::State::Row
pub trait Reader
where
    Self: self::sealed::Sealed,
{
    #[doc(hidden)]
    fn stmt_ptr(&self) -> *mut ffi::sqlite3_stmt;

    /// The integer value of the column at `index`.
    #[inline]
    fn int(&self, index: c_int) -> i64 {
        unsafe { ffi::sqlite3_column_int64(self.stmt_ptr(), index) }
    }

    /// The text value of the column at `index`.
    ///
    /// The returned borrow is invalidated by the next step or read of the
    /// same column in another representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqown::{Connection, Reader};
    ///
    /// let c = Connection::open_in_memory()?;
    /// let mut stmt = c.prepare("SELECT 'hello'")?;
    ///
    /// assert!(stmt.step()?.is_row());
    /// assert_eq!(stmt.text(0), "hello");
    /// assert_eq!(stmt.text_len(0), 5);
    /// # Ok::<_, sqown::Error>(())
    /// ```
    fn text(&self, index: c_int) -> &str {
        unsafe {
            let ptr = ffi::sqlite3_column_text(self.stmt_ptr(), index);

            if ptr.is_null() {
                return "";
            }

            let len = ffi::sqlite3_column_bytes(self.stmt_ptr(), index);
            let len = usize::try_from(len).unwrap_or(0);

            // SAFETY: The engine guarantees valid UTF-8 for text columns.
            str::from_utf8_unchecked(slice::from_raw_parts(ptr.cast(), len))
        }
    }

    /// The text value of the column at `index` as UTF-16 code units in
    /// native byte order.
    ///
    /// The returned borrow is invalidated by the next step or read of the
    /// same column in another representation.
    fn text16(&self, index: c_int) -> &[u16] {
        unsafe {
            let ptr = ffi::sqlite3_column_text16(self.stmt_ptr(), index);

            if ptr.is_null() {
                return &[];
            }

            let len = ffi::sqlite3_column_bytes16(self.stmt_ptr(), index);
            let len = usize::try_from(len).unwrap_or(0) / mem::size_of::<u16>();

            slice::from_raw_parts(ptr.cast(), len)
        }
    }

    /// The length in bytes of the text value of the column at `index`.
    #[inline]
    fn text_len(&self, index: c_int) -> usize {
        let len = unsafe { ffi::sqlite3_column_bytes(self.stmt_ptr(), index) };
        usize::try_from(len).unwrap_or(0)
    }

    /// The length in UTF-16 code units of the text value of the column at
    /// `index`.
    ///
    /// This is the engine's wide byte length divided by the code unit size.
    #[inline]
    fn text16_len(&self, index: c_int) -> usize {
        let len = unsafe { ffi::sqlite3_column_bytes16(self.stmt_ptr(), index) };
        usize::try_from(len).unwrap_or(0) / mem::size_of::<u16>()
    }
}

impl Reader for Statement {
    #[inline]
    fn stmt_ptr(&self) -> *mut ffi::sqlite3_stmt {
        self.as_ptr()
    }
}
