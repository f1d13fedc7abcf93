use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::model::{DeviceRecord, UNNAMED};
use crate::settings::Settings;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS config (
    name  TEXT UNIQUE NOT NULL,
    value TEXT
);
CREATE TABLE IF NOT EXISTS speakers (
    uid    TEXT UNIQUE NOT NULL,
    name   TEXT,
    ip     TEXT,
    serial TEXT,
    mac    TEXT
);
CREATE TABLE IF NOT EXISTS images (
    uid   TEXT UNIQUE NOT NULL,
    image BLOB
);
CREATE TABLE IF NOT EXISTS image_size (
    width  INTEGER,
    height INTEGER
);
";

/// Durable local store: one SQLite file holding the `config` key/value table
/// and the `speakers` table, opened once per process lifetime. The `images`
/// and `image_size` tables are reserved for artwork caching and unused here.
///
/// Writes autocommit, so a setting survives an immediately following unclean
/// process termination.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `path`, creating the file and schema if absent.
    /// Schema creation is idempotent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::initialize(Connection::open(path)?)
    }

    /// In-memory store, for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Typed accessors over the `config` table
    pub fn settings(&self) -> Settings<'_> {
        Settings::new(self)
    }

    /// Read one named value. An absent name is `Ok(None)`, never an error.
    pub fn get_setting(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM config WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Remove one named value. Removing an absent name is a no-op.
    pub fn delete_setting(&self, name: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM config WHERE name = ?1", params![name])?;
        Ok(())
    }

    /// Upsert one named value: overwrite if present, insert otherwise
    pub fn set_setting(&self, name: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO config (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            params![name, value],
        )?;
        Ok(())
    }

    /// All stored speaker rows, in insertion order. Sort order is a
    /// scan-time concern; loading never re-sorts.
    pub fn load_speakers(&self) -> Result<Vec<DeviceRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uid, name, ip, serial, mac FROM speakers ORDER BY rowid ASC")?;
        // only uid is NOT NULL; anything else missing reads as "unknown",
        // same as a device reporting no metadata
        let rows = stmt.query_map([], |row| {
            Ok(DeviceRecord {
                uid: row.get(0)?,
                display_name: row
                    .get::<_, Option<String>>(1)?
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNNAMED.to_string()),
                network_address: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                serial_number: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                mac_address: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }
        Ok(records)
    }

    /// Replace the entire `speakers` table with `records`, in order, inside
    /// one transaction. All-or-nothing: on failure the previous contents
    /// remain.
    pub fn replace_speakers(&mut self, records: &[DeviceRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM speakers", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO speakers (uid, name, ip, serial, mac) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.uid,
                    record.display_name,
                    record.network_address,
                    record.serial_number,
                    record.mac_address,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(uid: &str, name: &str, ip: &str) -> DeviceRecord {
        DeviceRecord {
            uid: uid.to_string(),
            display_name: name.to_string(),
            network_address: ip.to_string(),
            serial_number: String::new(),
            mac_address: String::new(),
        }
    }

    #[test]
    fn absent_setting_reads_as_none() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.get_setting("window_geometry").unwrap(), None);
    }

    #[test]
    fn set_setting_upserts() {
        let store = Store::open_in_memory().unwrap();
        store.set_setting("window_geometry", "600x400+0+0").unwrap();
        store.set_setting("window_geometry", "800x600+20+20").unwrap();
        assert_eq!(
            store.get_setting("window_geometry").unwrap().as_deref(),
            Some("800x600+20+20")
        );
    }

    #[test]
    fn settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        let store = Store::open(&path).unwrap();
        store.set_setting("last_selected", "RINCON_A").unwrap();
        drop(store);

        let store = Store::open(&path).unwrap();
        assert_eq!(
            store.get_setting("last_selected").unwrap().as_deref(),
            Some("RINCON_A")
        );
    }

    #[test]
    fn schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zonectl.sqlite");

        drop(Store::open(&path).unwrap());
        drop(Store::open(&path).unwrap());
    }

    #[test]
    fn delete_setting_removes_the_value() {
        let store = Store::open_in_memory().unwrap();
        store.set_setting("last_selected", "RINCON_A").unwrap();
        store.delete_setting("last_selected").unwrap();
        assert_eq!(store.get_setting("last_selected").unwrap(), None);

        // absent name is fine too
        store.delete_setting("last_selected").unwrap();
    }

    #[test]
    fn null_columns_load_as_unknown() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO speakers (uid, name, ip, serial, mac)
                 VALUES ('RINCON_A', NULL, NULL, NULL, NULL)",
                [],
            )
            .unwrap();

        let loaded = store.load_speakers().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].display_name, UNNAMED);
        assert_eq!(loaded[0].network_address, "");
        assert_eq!(loaded[0].serial_number, "");
        assert_eq!(loaded[0].mac_address, "");
    }

    #[test]
    fn replace_speakers_round_trips_in_order() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![
            record("RINCON_B", "Den", "192.168.1.141"),
            record("RINCON_A", "Kitchen", "192.168.1.140"),
        ];
        store.replace_speakers(&records).unwrap();

        // load preserves insertion order, no re-sort
        assert_eq!(store.load_speakers().unwrap(), records);
    }

    #[test]
    fn replace_speakers_discards_previous_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .replace_speakers(&[
                record("RINCON_A", "Kitchen", "192.168.1.140"),
                record("RINCON_B", "Den", "192.168.1.141"),
            ])
            .unwrap();
        store
            .replace_speakers(&[record("RINCON_B", "Living Room", "192.168.1.141")])
            .unwrap();

        let loaded = store.load_speakers().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].uid, "RINCON_B");
        assert_eq!(loaded[0].display_name, "Living Room");
    }
}
