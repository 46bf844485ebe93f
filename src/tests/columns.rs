use alloc::vec::Vec;

use anyhow::Result;

use crate::{Connection, Reader};

use super::data;

#[test]
fn integer_column() -> Result<()> {
    let c = Connection::open_in_memory()?;
    data::books(&c)?;

    let mut stmt = c.prepare("SELECT id FROM books ORDER BY id")?;

    assert!(stmt.step()?.is_row());
    assert_eq!(stmt.int(0), 1);
    assert!(stmt.step()?.is_row());
    assert_eq!(stmt.int(0), 2);
    assert!(stmt.step()?.is_done());
    Ok(())
}

#[test]
fn text_column_and_length() -> Result<()> {
    let c = Connection::open_in_memory()?;
    data::books(&c)?;

    let mut stmt = c.prepare("SELECT title FROM books WHERE id = 1")?;

    assert!(stmt.step()?.is_row());
    assert_eq!(stmt.text(0), "Meditations");
    assert_eq!(stmt.text_len(0), "Meditations".len());
    Ok(())
}

#[test]
fn wide_text_column_round_trips() -> Result<()> {
    let c = Connection::open_in_memory()?;
    data::books(&c)?;

    let mut stmt = c.prepare("SELECT title FROM books WHERE id = 2")?;
    assert!(stmt.step()?.is_row());

    let expected = data::WIDE_TITLE.encode_utf16().collect::<Vec<u16>>();
    assert_eq!(stmt.text16(0), expected);

    // Wide length counts code units, which is the wide byte length divided
    // by the unit size, and differs from the narrow byte length here.
    assert_eq!(stmt.text16_len(0), expected.len());
    assert_ne!(stmt.text16_len(0), data::WIDE_TITLE.len());
    Ok(())
}

#[test]
fn wide_text_through_wide_preparation() -> Result<()> {
    let c = Connection::open_in_memory16()?;
    data::books(&c)?;

    let mut stmt = c.prepare16("SELECT title FROM books WHERE id = 2")?;
    assert!(stmt.step()?.is_row());

    let expected = data::WIDE_TITLE.encode_utf16().collect::<Vec<u16>>();
    assert_eq!(stmt.text16(0), expected);
    assert_eq!(stmt.text16_len(0), expected.len());
    Ok(())
}

#[test]
fn narrow_read_after_wide_write() -> Result<()> {
    let c = Connection::open_in_memory()?;
    data::books(&c)?;

    let mut stmt = c.prepare("SELECT title FROM books WHERE id = 2")?;
    assert!(stmt.step()?.is_row());
    assert_eq!(stmt.text(0), data::WIDE_TITLE);
    assert_eq!(stmt.text_len(0), data::WIDE_TITLE.len());
    Ok(())
}
