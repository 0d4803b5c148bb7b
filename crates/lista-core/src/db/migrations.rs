//! Database migrations

use crate::error::Result;
use rusqlite::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get::<_, i32>(0).map(|v| v != 0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Migration to version 1: Initial schema
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;
         CREATE TABLE IF NOT EXISTS schema_version (
             version INTEGER PRIMARY KEY
         );
         CREATE TABLE IF NOT EXISTS lists (
             id TEXT PRIMARY KEY,
             name TEXT NOT NULL,
             created_at INTEGER NOT NULL
         );
         CREATE TABLE IF NOT EXISTS categories (
             id TEXT PRIMARY KEY,
             list_id TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
             name TEXT NOT NULL COLLATE NOCASE,
             color TEXT,
             icon TEXT,
             created_at INTEGER NOT NULL,
             UNIQUE (list_id, name)
         );
         CREATE INDEX IF NOT EXISTS idx_categories_list ON categories(list_id);
         CREATE TABLE IF NOT EXISTS items (
             id TEXT PRIMARY KEY,
             list_id TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
             user_id TEXT NOT NULL,
             name TEXT NOT NULL,
             quantity INTEGER NOT NULL DEFAULT 1,
             category TEXT,
             notes TEXT,
             gotten INTEGER NOT NULL DEFAULT 0,
             created_at INTEGER NOT NULL,
             updated_at INTEGER NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_items_list ON items(list_id);
         CREATE INDEX IF NOT EXISTS idx_items_updated ON items(updated_at DESC);
         INSERT INTO schema_version (version) VALUES (1);
         COMMIT;",
    )?;

    tracing::info!("Migrated database to version {CURRENT_VERSION}");
    Ok(())
}
