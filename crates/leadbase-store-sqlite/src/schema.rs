//! SQL schema for the Leadbase SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The lookup indexes back the exact-match filters (sector, size, city,
/// province, status) and the score threshold; at the intended data volumes
/// they are a convenience, not a correctness requirement.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS companies (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    name             TEXT NOT NULL,
    registry_number  TEXT UNIQUE,     -- KVK number; NULLs never collide
    sector           TEXT NOT NULL,
    subsector        TEXT,
    size             TEXT NOT NULL,   -- 'micro' | 'small' | 'medium' | 'large' | 'enterprise'
    employee_count   INTEGER,
    revenue_estimate TEXT,
    city             TEXT NOT NULL,
    province         TEXT NOT NULL,
    address          TEXT,
    postal_code      TEXT,
    website          TEXT,
    email            TEXT,
    phone            TEXT,
    description      TEXT,
    is_government    INTEGER NOT NULL DEFAULT 0,
    is_enterprise    INTEGER NOT NULL DEFAULT 0,
    is_tech          INTEGER NOT NULL DEFAULT 0,
    lead_score       INTEGER NOT NULL DEFAULT 0,
    status           TEXT NOT NULL DEFAULT 'new',
    notes            TEXT,
    created_at       TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS companies_sector_idx   ON companies(sector);
CREATE INDEX IF NOT EXISTS companies_size_idx     ON companies(size);
CREATE INDEX IF NOT EXISTS companies_city_idx     ON companies(city);
CREATE INDEX IF NOT EXISTS companies_province_idx ON companies(province);
CREATE INDEX IF NOT EXISTS companies_status_idx   ON companies(status);
CREATE INDEX IF NOT EXISTS companies_score_idx    ON companies(lead_score);

PRAGMA user_version = 1;
";
