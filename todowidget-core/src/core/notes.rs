//! Note persistence, grouped by list.
//!
//! Notes live in the `notes` table and are identified by SQLite's implicit
//! `rowid`. The store assigns ids on insert; callers learn them by reading
//! notes back through [`NoteStore::get_all_notes`].

use crate::core::transaction::Statement;
use crate::{Note, NoteStatus, Result, Storage};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{OptionalExtension, Row};

/// CRUD access to the `notes` table of a [`Storage`].
#[derive(Clone, Copy)]
pub struct NoteStore<'a> {
    storage: &'a Storage,
}

impl<'a> NoteStore<'a> {
    pub(crate) fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Inserts `note` as a new row.
    ///
    /// The statement is a blind `REPLACE`, and the assigned id is not reported
    /// back; `note.id` is ignored.
    pub fn add_note(&self, note: &Note) -> Result<()> {
        self.storage.execute(
            || format!("Error writing note to database [{}]", note.text),
            &[Statement::with_params(
                "REPLACE INTO notes (list, name, status, created) VALUES (?, ?, ?, ?)",
                [
                    Value::from(note.list),
                    Value::from(note.text.clone()),
                    Value::from(note.status.code()),
                    Value::from(note.created),
                ],
            )],
        )
    }

    /// Saves `note`: new notes are inserted, saved notes are replaced by id.
    ///
    /// A replace keeps the id and the stored `created` time, and overwrites
    /// `list`, `text` and `status`. No status transition is rejected.
    pub fn update_note(&self, note: &Note) -> Result<()> {
        let Some(id) = note.id else {
            return self.add_note(note);
        };
        log::debug!("Saving status of {} to {:?}", note.text, note.status);
        self.storage.execute(
            || format!("Error writing note to database [{}]", note.text),
            &[Statement::with_params(
                "REPLACE INTO notes (rowid, list, name, status, created)
                 VALUES (?1, ?2, ?3, ?4,
                         COALESCE((SELECT created FROM notes WHERE rowid = ?1), ?5))",
                [
                    Value::from(id),
                    Value::from(note.list),
                    Value::from(note.text.clone()),
                    Value::from(note.status.code()),
                    Value::from(note.created),
                ],
            )],
        )
    }

    /// Fetches the note with `id`, or `None` if there is no such row.
    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.storage.query(
            || format!("Error getting note [{id}]"),
            None,
            |conn| {
                let note = conn
                    .query_row(
                        "SELECT list, name, status, created FROM notes WHERE rowid = ?",
                        [id],
                        |row| {
                            let Some(list) = int_column(row, 0, "list")? else {
                                return Ok(None);
                            };
                            note_from_row(row, id, list).map(Some)
                        },
                    )
                    .optional()?;
                Ok(note.flatten())
            },
        )
    }

    /// Deletes the row for `note.id`. Unsaved notes have nothing to delete.
    pub fn delete_note(&self, note: &Note) -> Result<()> {
        let Some(id) = note.id else {
            log::debug!("Skipping delete of unsaved note [{}]", note.text);
            return Ok(());
        };
        self.storage.execute(
            || format!("Error removing note from database [{}]", note.text),
            &[Statement::with_params("DELETE FROM notes WHERE rowid = ?", [id])],
        )
    }

    /// Deletes every note in `list`; other lists are untouched.
    pub fn delete_all_notes(&self, list: i64) -> Result<()> {
        log::debug!("deleteAllNotes for {list}");
        self.storage.execute(
            || format!("Error removing all notes from database for list {list}"),
            &[Statement::with_params("DELETE FROM notes WHERE list = ?", [list])],
        )
    }

    /// All notes in `list`, in storage order.
    pub fn get_all_notes(&self, list: i64) -> Result<Vec<Note>> {
        self.storage.query(
            || format!("Error getting all notes for list {list}"),
            Vec::new(),
            |conn| {
                let mut stmt =
                    conn.prepare("SELECT rowid, name, status, created FROM notes WHERE list = ?")?;
                let notes = stmt
                    .query_map([list], |row| note_from_row(row, row.get(0)?, list))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(notes)
            },
        )
    }
}

/// Builds a [`Note`] from a row whose columns 1..=3 are `name, status, created`.
///
/// Mistyped values never fail the row: an undecodable status reads as
/// [`NoteStatus::Created`] and an undecodable `created` as 0.
fn note_from_row(row: &Row, id: i64, list: i64) -> rusqlite::Result<Note> {
    Ok(Note {
        id: Some(id),
        list,
        text: text_column(row, 1)?,
        status: int_column(row, 2, "status")?
            .map(NoteStatus::from_code)
            .unwrap_or_default(),
        created: int_column(row, 3, "created")?.unwrap_or_default(),
    })
}

/// Reads an integer column, accepting reals and numeric text.
///
/// `NULL` and anything else that is not a number yield `None`.
fn int_column(row: &Row, idx: usize, name: &str) -> rusqlite::Result<Option<i64>> {
    let decoded = match row.get_ref(idx)? {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) => Some(f as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse().ok()),
        ValueRef::Blob(_) => None,
    };
    if decoded.is_none() {
        log::warn!("Ignoring non-numeric {name} in note row");
    }
    Ok(decoded)
}

fn text_column(row: &Row, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use tempfile::NamedTempFile;

    fn open() -> (NamedTempFile, Storage) {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::open(temp.path(), StoreConfig::strict()).unwrap();
        (temp, storage)
    }

    fn note(list: i64, text: &str, created: i64) -> Note {
        Note {
            id: None,
            list,
            text: text.to_string(),
            status: NoteStatus::Created,
            created,
        }
    }

    #[test]
    fn test_add_then_list() {
        let (_temp, storage) = open();
        let notes = storage.notes();

        let n = note(1, "Buy milk", 1000);
        notes.add_note(&n).unwrap();

        let all = notes.get_all_notes(1).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].id.is_some());
        assert_eq!(all[0].list, 1);
        assert_eq!(all[0].text, "Buy milk");
        assert_eq!(all[0].status, NoteStatus::Created);
        assert_eq!(all[0].created, 1000);
    }

    #[test]
    fn test_add_does_not_assign_id_to_caller() {
        let (_temp, storage) = open();
        let n = note(1, "a", 1);
        storage.notes().add_note(&n).unwrap();
        assert!(n.is_new());
    }

    #[test]
    fn test_update_new_note_inserts() {
        let (_temp, storage) = open();
        let notes = storage.notes();

        notes.update_note(&note(2, "fresh", 5)).unwrap();

        assert_eq!(notes.get_all_notes(2).unwrap().len(), 1);
    }

    #[test]
    fn test_update_keeps_id_and_created() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        notes.add_note(&note(1, "Walk dog", 1000)).unwrap();
        let mut saved = notes.get_all_notes(1).unwrap().remove(0);
        let id = saved.id.unwrap();

        saved.status = NoteStatus::Finished;
        saved.text = "Walk the dog".to_string();
        saved.created = 99;
        notes.update_note(&saved).unwrap();

        let reread = notes.get_note(id).unwrap().unwrap();
        assert_eq!(reread.id, Some(id));
        assert_eq!(reread.status, NoteStatus::Finished);
        assert_eq!(reread.text, "Walk the dog");
        assert_eq!(reread.created, 1000);
        assert_eq!(notes.get_all_notes(1).unwrap().len(), 1);
    }

    #[test]
    fn test_update_can_move_note_between_lists() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        notes.add_note(&note(1, "move me", 10)).unwrap();
        let mut saved = notes.get_all_notes(1).unwrap().remove(0);

        saved.list = 2;
        notes.update_note(&saved).unwrap();

        assert!(notes.get_all_notes(1).unwrap().is_empty());
        assert_eq!(notes.get_all_notes(2).unwrap()[0].id, saved.id);
    }

    #[test]
    fn test_update_allows_any_status_transition() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        notes.add_note(&note(1, "x", 1)).unwrap();
        let mut saved = notes.get_all_notes(1).unwrap().remove(0);
        let id = saved.id.unwrap();

        for status in [NoteStatus::Finished, NoteStatus::Created, NoteStatus::InProgress] {
            saved.status = status;
            notes.update_note(&saved).unwrap();
            assert_eq!(notes.get_note(id).unwrap().unwrap().status, status);
        }
    }

    #[test]
    fn test_update_with_unknown_id_creates_row_with_that_id() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        let n = Note {
            id: Some(42),
            ..note(3, "restored", 7)
        };

        notes.update_note(&n).unwrap();

        let reread = notes.get_note(42).unwrap().unwrap();
        assert_eq!(reread.created, 7);
        assert_eq!(reread.list, 3);
    }

    #[test]
    fn test_get_missing_note_is_none() {
        let (_temp, storage) = open();
        assert_eq!(storage.notes().get_note(12345).unwrap(), None);
    }

    #[test]
    fn test_unknown_status_code_reads_as_created() {
        let (_temp, storage) = open();
        storage
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO notes (rowid, list, name, status, created) VALUES (5, 1, 'odd', 77, 3)",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let n = storage.notes().get_note(5).unwrap().unwrap();
        assert_eq!(n.status, NoteStatus::Created);
        assert_eq!(storage.notes().get_all_notes(1).unwrap()[0].status, NoteStatus::Created);
    }

    #[test]
    fn test_mistyped_row_does_not_hide_the_list() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        notes.add_note(&note(1, "good", 1)).unwrap();
        storage
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO notes (list, name, status, created) VALUES (1, 'bad', 'done', 'soon')",
                    [],
                )?;
                conn.execute(
                    "INSERT INTO notes (list, name, status, created) VALUES (1, 7, 2.0, '250')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        let all = notes.get_all_notes(1).unwrap();
        let texts: Vec<&str> = all.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["good", "bad", "7"]);

        assert_eq!(all[1].status, NoteStatus::Created);
        assert_eq!(all[1].created, 0);
        assert_eq!(all[2].status, NoteStatus::Finished);
        assert_eq!(all[2].created, 250);

        let bad = notes.get_note(all[1].id.unwrap()).unwrap().unwrap();
        assert_eq!(bad.text, "bad");
        assert_eq!(bad.status, NoteStatus::Created);
        assert_eq!(notes.get_note(all[0].id.unwrap()).unwrap().unwrap().text, "good");
    }

    #[test]
    fn test_get_note_with_null_list_is_none() {
        let (_temp, storage) = open();
        storage
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO notes (rowid, list, name, status, created) VALUES (9, NULL, 'orphan', 0, 1)",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        assert_eq!(storage.notes().get_note(9).unwrap(), None);
    }

    #[test]
    fn test_delete_note() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        notes.add_note(&note(1, "a", 1)).unwrap();
        notes.add_note(&note(1, "b", 2)).unwrap();
        let first = notes.get_all_notes(1).unwrap().remove(0);

        notes.delete_note(&first).unwrap();

        let rest = notes.get_all_notes(1).unwrap();
        assert_eq!(rest.len(), 1);
        assert_ne!(rest[0].id, first.id);
        assert_eq!(notes.get_note(first.id.unwrap()).unwrap(), None);

        notes.delete_note(&note(1, "never saved", 0)).unwrap();
        assert_eq!(notes.get_all_notes(1).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_all_notes_only_touches_one_list() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        for i in 0..3 {
            notes.add_note(&note(7, &format!("seven {i}"), i)).unwrap();
        }
        for i in 0..2 {
            notes.add_note(&note(8, &format!("eight {i}"), i)).unwrap();
        }

        notes.delete_all_notes(7).unwrap();

        assert!(notes.get_all_notes(7).unwrap().is_empty());
        assert_eq!(notes.get_all_notes(8).unwrap().len(), 2);
    }

    #[test]
    fn test_get_all_notes_keeps_storage_order() {
        let (_temp, storage) = open();
        let notes = storage.notes();
        for text in ["first", "second", "third"] {
            notes.add_note(&note(1, text, 0)).unwrap();
        }

        let texts: Vec<String> = notes
            .get_all_notes(1)
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(notes.get_all_notes(99).unwrap().is_empty());
    }
}
