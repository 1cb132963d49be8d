// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Paycycle", "paycycle"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("paycycle.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    -- Singleton cycle configuration; identity fields are administrative and
    -- never read by the allocation math.
    CREATE TABLE IF NOT EXISTS config(
        id INTEGER PRIMARY KEY CHECK(id = 1),
        emp_name TEXT NOT NULL DEFAULT '',
        salary_plan TEXT NOT NULL DEFAULT '0',
        opening_balance TEXT NOT NULL DEFAULT '0',
        cycle_start_date TEXT,
        pan_number TEXT,
        pf_number TEXT,
        uan_number TEXT,
        gross_salary TEXT,
        net_salary TEXT,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- Append-only cash ledger. Exactly one of amount_dr/amount_cr is
    -- expected to be non-zero per row; doctor reports violations.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        sub_category TEXT,
        amount_dr TEXT NOT NULL DEFAULT '0',
        amount_cr TEXT NOT NULL DEFAULT '0',
        entity TEXT NOT NULL DEFAULT 'None',
        notes TEXT,
        payment_mode TEXT,
        cycle_id TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    -- One summary row per closed cycle, written by 'cycle close'.
    CREATE TABLE IF NOT EXISTS archive(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        month_year TEXT NOT NULL,
        opening_balance TEXT NOT NULL,
        salary_received TEXT NOT NULL,
        family_sent TEXT NOT NULL DEFAULT '0',
        shares_invested TEXT NOT NULL DEFAULT '0',
        savings_moved TEXT NOT NULL DEFAULT '0',
        wallet_spent TEXT NOT NULL DEFAULT '0',
        other_income TEXT NOT NULL DEFAULT '0',
        closing_balance TEXT NOT NULL,
        closed_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS investments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date_invested TEXT NOT NULL,
        symbol TEXT NOT NULL,
        units TEXT NOT NULL,
        buy_price TEXT NOT NULL,
        current_price TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS documents(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        full_name TEXT NOT NULL,
        doc_type TEXT NOT NULL,
        doc_number TEXT NOT NULL,
        issued_date TEXT,
        expiry_date TEXT,
        drive_link TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS rules(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        pattern TEXT NOT NULL,
        category TEXT,
        sub_category TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}
