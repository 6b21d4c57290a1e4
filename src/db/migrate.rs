use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    stmt.exists([version])
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `data_points` table with the modern schema.
fn create_data_points_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS data_points (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            slug        TEXT NOT NULL UNIQUE,
            kind        TEXT NOT NULL DEFAULT 'STRING'
                        CHECK(kind IN ('INT','FLOAT','STRING','DATE','DATETIME','TIMESTAMP')),
            unit        TEXT,
            color       TEXT NOT NULL DEFAULT '#87BBFF',
            comment     TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `data_values` table: one row per logged value.
fn create_data_values_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS data_values (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            datum_id        INTEGER NOT NULL REFERENCES data_points(id) ON DELETE CASCADE,
            timestamp       TEXT NOT NULL,
            int_value       INTEGER,
            float_value     REAL,
            string_value    TEXT,
            date_value      TEXT,
            datetime_value  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_values_datum_ts ON data_values(datum_id, timestamp);
        "#,
    )?;
    Ok(())
}

/// Data points created before colors existed get the default color.
fn migrate_add_color_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0001_add_color_to_data_points";

    if is_migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "data_points", "color")? {
        conn.execute(
            "ALTER TABLE data_points ADD COLUMN color TEXT NOT NULL DEFAULT '#87BBFF';",
            [],
        )?;
        success(format!(
            "Migration applied: {} → added 'color' to data_points table",
            version
        ));
    }

    mark_migration_applied(conn, version, "Added color to data_points")
}

fn migrate_add_comment_column(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_add_comment_to_data_points";

    if is_migration_applied(conn, version)? {
        return Ok(());
    }

    if !column_exists(conn, "data_points", "comment")? {
        conn.execute("ALTER TABLE data_points ADD COLUMN comment TEXT;", [])?;
        success(format!(
            "Migration applied: {} → added 'comment' to data_points table",
            version
        ));
    }

    mark_migration_applied(conn, version, "Added comment to data_points")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create tables if missing
    if !table_exists(conn, "data_points")? {
        create_data_points_table(conn)?;
        success("Created data_points table.");
    }

    if !table_exists(conn, "data_values")? {
        create_data_values_table(conn)?;
        success("Created data_values table.");
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_values_datum_ts ON data_values(datum_id, timestamp);",
        )?;
    }

    // 3) Column upgrades for databases created by older versions
    migrate_add_color_column(conn)?;
    migrate_add_comment_column(conn)?;

    Ok(())
}
