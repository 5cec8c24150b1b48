use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            at        TEXT NOT NULL,
            namespace TEXT NOT NULL DEFAULT '',
            date      TEXT NOT NULL DEFAULT '',
            operation TEXT NOT NULL,
            detail    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the two document tables with the modern schema.
fn create_document_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS ledgers (
            namespace  TEXT NOT NULL,
            date       TEXT NOT NULL,
            doc        TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (namespace, date)
        );

        CREATE TABLE IF NOT EXISTS history (
            namespace  TEXT NOT NULL,
            date       TEXT NOT NULL,
            doc        TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (namespace, date)
        );

        CREATE INDEX IF NOT EXISTS idx_history_date ON history(date);
        "#,
    )?;
    Ok(())
}

/// One-off migration: early builds stored history under a single implicit
/// team; rows written without a namespace get the default one.
fn migrate_backfill_namespace(conn: &Connection) -> Result<()> {
    let version = "20250604_0001_backfill_namespace";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND detail = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    conn.execute("UPDATE ledgers SET namespace = 'default' WHERE namespace = ''", [])?;
    conn.execute("UPDATE history SET namespace = 'default' WHERE namespace = ''", [])?;

    conn.execute(
        "INSERT INTO log (at, operation, detail)
         VALUES (datetime('now'), 'migration_applied', ?1)",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by Store::open().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_document_tables(conn)?;
    migrate_backfill_namespace(conn)?;
    Ok(())
}
