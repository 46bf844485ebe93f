#![cfg(not(miri))]

use anyhow::{Context, Result};
use sqown::{Code, Connection, Reader, State, Statement};

fn setup_library(c: &Connection) -> Result<()> {
    for sql in [
        "CREATE TABLE books (id INTEGER, title TEXT)",
        "INSERT INTO books VALUES (1, 'Walden')",
        "INSERT INTO books VALUES (2, 'Либерея')",
        "INSERT INTO books VALUES (3, 'Cosmos')",
    ] {
        c.prepare(sql)?.execute()?;
    }

    Ok(())
}

#[test]
fn full_lifecycle() -> Result<()> {
    let dir = tempfile::tempdir().context("tempdir")?;
    let path = dir.path().join("library.sqlite3");

    let c = Connection::open(&path)?;
    setup_library(&c)?;

    let mut stmt = c.prepare("SELECT id, title FROM books ORDER BY id")?;
    let mut rows = 0;

    while stmt.step()?.is_row() {
        rows += 1;
        assert_eq!(stmt.int(0), rows);
        assert!(!stmt.text(1).is_empty());
    }

    assert_eq!(rows, 3);
    drop(stmt);
    drop(c);

    // The database persisted; a fresh connection sees the rows.
    let c = Connection::open(&path)?;
    let mut stmt = c.prepare("SELECT count(*) FROM books")?;
    assert_eq!(stmt.step()?, State::Row);
    assert_eq!(stmt.int(0), 3);
    assert_eq!(stmt.step()?, State::Done);
    Ok(())
}

#[test]
fn open_at_invalid_path_fails() {
    let e = Connection::open("missing-parent/library.sqlite3").unwrap_err();
    assert_eq!(e.code().as_raw() & 0xff, Code::CANTOPEN.as_raw());
    assert!(!e.message().is_empty());
}

#[test]
fn wide_and_narrow_agree() -> Result<()> {
    let c = Connection::open_in_memory16()?;
    setup_library(&c)?;

    let mut stmt = c.prepare16("SELECT title FROM books WHERE id = 2")?;
    assert!(stmt.step()?.is_row());

    let narrow = stmt.text(0).to_string();
    let wide = stmt.text16(0).to_vec();

    assert_eq!(narrow, "Либерея");
    assert_eq!(wide, narrow.encode_utf16().collect::<Vec<u16>>());
    assert_eq!(stmt.text16_len(0), wide.len());
    Ok(())
}

#[test]
fn statements_are_reusable_after_step_errors() -> Result<()> {
    let c = Connection::open_in_memory()?;
    setup_library(&c)?;
    c.prepare("CREATE UNIQUE INDEX idx ON books (id)")?.execute()?;

    let mut stmt = Statement::new();
    stmt.prepare(&c, "INSERT INTO books VALUES (1, 'dup')")?;

    let e = stmt.step().unwrap_err();
    assert_eq!(e.code().as_raw() & 0xff, Code::CONSTRAINT.as_raw());

    // The failed statement can be re-prepared and used again.
    stmt.prepare(&c, "INSERT INTO books VALUES (4, 'Ulysses')")?;
    stmt.execute()?;

    let mut count = c.prepare("SELECT count(*) FROM books")?;
    assert!(count.step()?.is_row());
    assert_eq!(count.int(0), 4);
    Ok(())
}

#[test]
fn version_is_sane() {
    assert!(sqown::lib_version().starts_with("3."));
    assert!(matches!(sqown::lib_version_number(), 3000000..4000000));
}
