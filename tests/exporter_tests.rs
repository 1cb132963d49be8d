// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paycycle::{cli, commands::exporter};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            category TEXT NOT NULL,
            sub_category TEXT,
            amount_dr TEXT NOT NULL DEFAULT '0',
            amount_cr TEXT NOT NULL DEFAULT '0',
            entity TEXT NOT NULL DEFAULT 'None',
            notes TEXT,
            payment_mode TEXT,
            cycle_id TEXT NOT NULL
        );
        "#,
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "paycycle",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(date, category, sub_category, amount_dr, amount_cr, entity, notes, payment_mode, cycle_id) VALUES \
        ('2025-07-10','Personal Spending','Transport','120','0','Uber','Airport run','UPI','2025-07')",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&conn, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-07-10",
                "category": "Personal Spending",
                "sub_category": "Transport",
                "amount_dr": "120",
                "amount_cr": "0",
                "entity": "Uber",
                "notes": "Airport run",
                "payment_mode": "UPI",
                "cycle_id": "2025-07"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_with_headers() {
    let conn = base_conn();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
            VALUES ('2025-07-01', 'Salary', '0', '50000', '2025-07');
        INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
            VALUES ('2025-07-02', 'Household Spending', '750', '0', '2025-07');
        "#,
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&conn, "csv", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,category,sub_category,amount_dr,amount_cr,entity,notes,payment_mode,cycle_id"
    );
    assert_eq!(lines.clone().count(), 2);
    assert!(lines.next().unwrap().starts_with("2025-07-01,Salary,"));
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&conn, "xml", &out_str).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}
