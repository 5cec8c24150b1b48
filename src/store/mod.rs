//! Keyed JSON-document store over SQLite.
//!
//! Two tables, both keyed by `(namespace, date)`: `ledgers` holds the live
//! board (whole-document writes, last full write wins) and `history` holds
//! the durable per-day entries (written only through the transactional
//! read-modify-write of [`Store::update_history`]).

pub mod log;
pub mod migrate;

use crate::errors::AppResult;
use crate::models::{DailyLedger, HistoryEntry};
use crate::utils::date::date_key;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};

pub struct Store {
    pub conn: Connection,
}

impl Store {
    /// Open (or create) the database and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        migrate::run_pending_migrations(&conn)?;
        Ok(Self { conn })
    }

    // ---------------------------
    // Live ledger document
    // ---------------------------

    pub fn load_ledger(&self, namespace: &str, date: NaiveDate) -> AppResult<Option<DailyLedger>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM ledgers WHERE namespace = ?1 AND date = ?2",
                params![namespace, date_key(date)],
                |row| row.get(0),
            )
            .optional()?;

        match doc {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Whole-document write; a concurrent writer's version is simply
    /// replaced (last full write wins).
    pub fn save_ledger(
        &self,
        namespace: &str,
        date: NaiveDate,
        ledger: &DailyLedger,
    ) -> AppResult<()> {
        let doc = serde_json::to_string(ledger)?;
        self.conn.execute(
            "INSERT INTO ledgers (namespace, date, doc, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, date)
             DO UPDATE SET doc = excluded.doc, updated_at = excluded.updated_at",
            params![namespace, date_key(date), doc, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }

    // ---------------------------
    // History document
    // ---------------------------

    pub fn load_history(&self, namespace: &str, date: NaiveDate) -> AppResult<Option<HistoryEntry>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "SELECT doc FROM history WHERE namespace = ?1 AND date = ?2",
                params![namespace, date_key(date)],
                |row| row.get(0),
            )
            .optional()?;

        match doc {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Atomic read-modify-write of one history document. Two concurrent
    /// reconciliations of the same date serialize on the transaction, so
    /// neither silently loses the other's session entries.
    pub fn update_history<F>(
        &mut self,
        namespace: &str,
        date: NaiveDate,
        f: F,
    ) -> AppResult<HistoryEntry>
    where
        F: FnOnce(Option<HistoryEntry>) -> HistoryEntry,
    {
        let key = date_key(date);
        let tx = self.conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT doc FROM history WHERE namespace = ?1 AND date = ?2",
                params![namespace, &key],
                |row| row.get(0),
            )
            .optional()?;
        let existing = match existing {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        };

        let merged = f(existing);
        let doc = serde_json::to_string(&merged)?;

        tx.execute(
            "INSERT INTO history (namespace, date, doc, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, date)
             DO UPDATE SET doc = excluded.doc, updated_at = excluded.updated_at",
            params![namespace, &key, doc, Local::now().to_rfc3339()],
        )?;
        tx.commit()?;

        Ok(merged)
    }

    /// Field-level partial write: correct one quantity on an existing entry
    /// without touching its sessions. Returns false when the date has no
    /// history yet.
    pub fn merge_history_quantity(
        &mut self,
        namespace: &str,
        date: NaiveDate,
        task: &str,
        quantity: i64,
    ) -> AppResult<bool> {
        let mut updated = false;
        // reuses the transactional path so a concurrent reconcile cannot
        // interleave between our read and write
        let key_exists = self.load_history(namespace, date)?.is_some();
        if !key_exists {
            return Ok(false);
        }
        self.update_history(namespace, date, |existing| {
            let mut entry = existing.unwrap_or_default();
            entry.quantities.insert(task.to_string(), quantity);
            updated = true;
            entry
        })?;
        Ok(updated)
    }
}
