//! Exclusive-ownership safety layer over the raw [SQLite] C interface.
//!
//! The raw interface hands out opaque handles which must be torn down
//! manually, in dependency order, and reports failures as integer status
//! codes. This crate wraps each handle in a move-only owner which releases the
//! underlying resource on every exit path, and translates status codes into a
//! structured [`Error`] carrying the engine's extended result code and
//! message.
//!
//! Three things live here and nothing else:
//!
//! * [`Connection`] — owns a database handle, opens or creates databases and
//!   sources error snapshots.
//! * [`Statement`] — owns a prepared statement handle and drives the
//!   [`step`] state machine.
//! * [`Reader`] — a statically attached capability for reading columns from
//!   whatever currently holds a result row.
//!
//! SQL parsing, parameter binding and connection pooling are deliberately
//! absent. Busy/locked retry handling is also left to the application; a
//! [`Code::BUSY`] error propagates like any other.
//!
//! <br>
//!
//! # Examples
//!
//! ```
//! use sqown::{Connection, Reader, State};
//!
//! let c = Connection::open_in_memory()?;
//!
//! c.prepare("CREATE TABLE t (x INTEGER)")?.execute()?;
//! c.prepare("INSERT INTO t VALUES (42)")?.execute()?;
//!
//! let mut stmt = c.prepare("SELECT x FROM t")?;
//!
//! assert_eq!(stmt.step()?, State::Row);
//! assert_eq!(stmt.int(0), 42);
//! assert_eq!(stmt.step()?, State::Done);
//! # Ok::<_, sqown::Error>(())
//! ```
//!
//! Failures carry the engine's own diagnostics:
//!
//! ```
//! use sqown::{Code, Connection};
//!
//! let c = Connection::open_in_memory()?;
//!
//! let e = c.prepare("NOT SQL").unwrap_err();
//! assert_eq!(e.code(), Code::ERROR);
//! assert!(!e.message().is_empty());
//! # Ok::<_, sqown::Error>(())
//! ```
//!
//! <br>
//!
//! # Features
//!
//! * `std` - Enable usage of the Rust standard library. Required for opening
//!   databases by filesystem path. Enabled by default.
//! * `alloc` - Enable usage of the Rust alloc library. This is required and is
//!   enabled by default.
//! * `bundled` - Build and link the sqlite version bundled with
//!   [`libsqlite3-sys`] instead of a system library. Enabled by default.
//!
//! <br>
//!
//! # Preconditions and build modes
//!
//! Misuse which the engine cannot report — stepping an unprepared statement,
//! preparing against a closed connection, calling [`execute`] on a statement
//! which produces a row — is checked with `debug_assert!` and is therefore
//! only caught when `debug_assertions` are enabled. Release builds do not pay
//! for the checks and misuse there is engine-defined behavior.
//!
//! A statement depends on the connection it was prepared against. Connections
//! are closed in v2 mode, so the engine itself keeps the database alive until
//! every derived statement has been finalized and dropping a [`Connection`]
//! before its statements is safe.
//!
//! [`execute`]: Statement::execute
//! [`step`]: Statement::step
//! [`libsqlite3-sys`]: https://docs.rs/libsqlite3-sys
//! [SQLite]: https://www.sqlite.org

#![no_std]
#![allow(clippy::new_without_default)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(not(feature = "alloc"))]
compile_error!("The `alloc` feature must be enabled to use this crate.");


mod connection;
mod error;
mod ffi;
mod owned;
mod reader;
mod statement;
mod utils;
mod version;

#[doc(inline)]
pub use self::connection::Connection;
#[doc(inline)]
pub use self::error::{Code, Error, Result};
#[doc(inline)]
pub use self::reader::Reader;
#[doc(inline)]
pub use self::statement::{State, Statement};
#[doc(inline)]
pub use self::version::{lib_version, lib_version_number};
