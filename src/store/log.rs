use crate::errors::AppResult;
use crate::utils::date::date_key;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};

/// Append one line to the internal operation log, keyed the same way as the
/// document tables so a day's writes can be traced per namespace. Rows not
/// tied to a board date (init, migrations) leave the date column empty.
pub fn oplog(
    conn: &Connection,
    namespace: &str,
    date: Option<NaiveDate>,
    operation: &str,
    detail: &str,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (at, namespace, date, operation, detail)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![
        Local::now().to_rfc3339(),
        namespace,
        date.map(date_key).unwrap_or_default(),
        operation,
        detail
    ])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::migrate::run_pending_migrations;

    #[test]
    fn oplog_records_the_document_key() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        oplog(&conn, "default", Some(date), "start", "2 member(s) started 'Pack'").unwrap();

        let (ns, day): (String, String) = conn
            .query_row(
                "SELECT namespace, date FROM log WHERE operation = 'start'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(ns, "default");
        assert_eq!(day, "2025-09-01");
    }

    #[test]
    fn dateless_rows_leave_the_date_empty() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        oplog(&conn, "default", None, "init", "database initialized").unwrap();

        let day: String = conn
            .query_row(
                "SELECT date FROM log WHERE operation = 'init'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(day, "");
    }
}
