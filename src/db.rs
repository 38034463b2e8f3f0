use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::{Error, Result};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS bookmarks (
        name TEXT NOT NULL,
        url  TEXT NOT NULL PRIMARY KEY
    );
";

/// SQLite sidecar files that belong to a database at the same path.
const SIDECARS: [&str; 3] = ["-journal", "-wal", "-shm"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub url: String,
}

/// A `bookmarks` table in a file that is recreated on every run.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Drop whatever is at `path`, then open a fresh database with the schema.
    pub fn initialize(path: &Path) -> Result<Self> {
        remove_if_exists(path)?;
        for suffix in SIDECARS {
            let mut sidecar = path.as_os_str().to_owned();
            sidecar.push(suffix);
            remove_if_exists(Path::new(&sidecar))?;
        }

        let conn = Connection::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(SCHEMA).map_err(Error::Schema)?;
        debug!(path = ?path, "store initialized");

        Ok(Store {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace by url, in order, so the last record for a url wins.
    ///
    /// The batch runs in one transaction: if any record fails, none are kept.
    pub fn upsert(&self, records: &[Record]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut count = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR REPLACE INTO bookmarks (name, url) VALUES (?1, ?2)")?;
            for r in records {
                count += stmt.execute(params![r.name, r.url])?;
            }
        }
        tx.commit()?;
        Ok(count)
    }

    pub fn query_all(&self) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare("SELECT name, url FROM bookmarks")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Record {
                    name: row.get(0)?,
                    url: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Close the connection. Dropping a `Store` also closes it, but without
    /// reporting errors.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Query(e))
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = ?path, "removed previous store file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn record(name: &str, url: &str) -> Record {
        Record {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    fn as_map(records: Vec<Record>) -> HashMap<String, String> {
        records.into_iter().map(|r| (r.url, r.name)).collect()
    }

    #[test]
    fn creates_bookmarks_table() {
        let dir = TempDir::new().unwrap();
        let store = Store::initialize(&dir.path().join("bookmarks.db")).unwrap();

        let mut stmt = store.conn.prepare("PRAGMA table_info(bookmarks)").unwrap();
        let columns: Vec<(String, String, bool, bool)> = stmt
            .query_map([], |row| {
                Ok((row.get(1)?, row.get(2)?, row.get(3)?, row.get::<_, i64>(5)? > 0))
            })
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        drop(stmt);

        assert_eq!(
            columns,
            vec![
                ("name".to_string(), "TEXT".to_string(), true, false),
                ("url".to_string(), "TEXT".to_string(), true, true),
            ]
        );
        assert!(store.query_all().unwrap().is_empty());
        store.close().unwrap();
    }

    #[test]
    fn last_occurrence_wins() {
        let dir = TempDir::new().unwrap();
        let store = Store::initialize(&dir.path().join("bookmarks.db")).unwrap();

        store.upsert(&[record("X1", "http://x"), record("X2", "http://x")]).unwrap();
        assert_eq!(store.query_all().unwrap(), vec![record("X2", "http://x")]);
    }

    #[test]
    fn distinct_urls_match_input() {
        let dir = TempDir::new().unwrap();
        let store = Store::initialize(&dir.path().join("bookmarks.db")).unwrap();
        let input = vec![
            record("A", "http://a"),
            record("B", "http://b"),
            record("A2", "http://a"),
            record("C", "http://c"),
            record("B2", "http://b"),
        ];

        let applied = store.upsert(&input).unwrap();
        assert_eq!(applied, input.len());

        let stored = store.query_all().unwrap();
        assert_eq!(stored.len(), 3);
        let map = as_map(stored);
        assert_eq!(map["http://a"], "A2");
        assert_eq!(map["http://b"], "B2");
        assert_eq!(map["http://c"], "C");
    }

    #[test]
    fn rerun_gives_same_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.db");
        let input = vec![record("A", "http://a"), record("B", "http://b")];

        let run = || {
            let store = Store::initialize(&path).unwrap();
            store.upsert(&input).unwrap();
            let out = as_map(store.query_all().unwrap());
            store.close().unwrap();
            out
        };

        let first = run();
        let second = run();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn initialize_discards_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.db");

        let store = Store::initialize(&path).unwrap();
        store.upsert(&[record("Old", "http://old")]).unwrap();
        store.close().unwrap();

        let store = Store::initialize(&path).unwrap();
        store.upsert(&[record("New", "http://new")]).unwrap();
        assert_eq!(store.query_all().unwrap(), vec![record("New", "http://new")]);
    }

    #[test]
    fn initialize_replaces_non_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.db");
        fs::write(&path, "definitely not sqlite").unwrap();
        fs::write(dir.path().join("bookmarks.db-journal"), "stale").unwrap();

        let store = Store::initialize(&path).unwrap();
        assert!(store.query_all().unwrap().is_empty());
        assert!(!dir.path().join("bookmarks.db-journal").exists());
    }

    #[test]
    fn open_fails_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("bookmarks.db");
        assert!(matches!(Store::initialize(&path), Err(Error::Open { .. })));
    }

    #[test]
    fn remove_fails_on_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.db");
        fs::create_dir(&path).unwrap();
        assert!(matches!(Store::initialize(&path), Err(Error::Io { .. })));
    }

    #[test]
    fn failed_batch_keeps_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Store::initialize(&dir.path().join("bookmarks.db")).unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_bad BEFORE INSERT ON bookmarks
                 WHEN NEW.url = 'http://bad'
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = store.upsert(&[record("A", "http://a"), record("Bad", "http://bad")]);
        assert!(matches!(result, Err(Error::Query(_))));
        assert!(store.query_all().unwrap().is_empty());
    }

    #[test]
    fn empty_batch_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = Store::initialize(&dir.path().join("bookmarks.db")).unwrap();
        assert_eq!(store.upsert(&[]).unwrap(), 0);
        assert!(store.query_all().unwrap().is_empty());
    }
}
