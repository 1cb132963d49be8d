// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paycycle::{cli, commands::transactions};
use rusqlite::Connection;

fn setup() -> Connection {
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
        CREATE TABLE rules(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern TEXT NOT NULL,
            category TEXT,
            sub_category TEXT,
            created_at TEXT
        );
        CREATE TABLE investments(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date_invested TEXT NOT NULL,
            symbol TEXT NOT NULL,
            units TEXT NOT NULL,
            buy_price TEXT NOT NULL,
            current_price TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

fn run_log(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["paycycle", "tx", "log"];
    argv.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(conn, tx_m)
    } else {
        panic!("tx command not parsed");
    }
}

#[test]
fn log_appends_row_with_cycle_tag() {
    let conn = setup();
    run_log(
        &conn,
        &[
            "--amount",
            "500",
            "--type",
            "debit",
            "--category",
            "Personal Spending",
            "--date",
            "2025-07-05",
        ],
    )
    .unwrap();

    let (dr, cr, entity, cycle): (String, String, String, String) = conn
        .query_row(
            "SELECT amount_dr, amount_cr, entity, cycle_id FROM transactions WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(dr, "500");
    assert_eq!(cr, "0");
    assert_eq!(entity, "None");
    assert_eq!(cycle, "2025-07");
}

#[test]
fn credit_lands_on_the_credit_side() {
    let conn = setup();
    run_log(
        &conn,
        &[
            "--amount",
            "50000",
            "--type",
            "credit",
            "--category",
            "Salary",
            "--date",
            "2025-07-01",
            "--entity",
            "Employer",
        ],
    )
    .unwrap();

    let (dr, cr): (String, String) = conn
        .query_row(
            "SELECT amount_dr, amount_cr FROM transactions WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(dr, "0");
    assert_eq!(cr, "50000");
}

#[test]
fn zero_amount_is_rejected_before_any_write() {
    let conn = setup();
    let err = run_log(
        &conn,
        &[
            "--amount",
            "0",
            "--type",
            "debit",
            "--category",
            "Personal Spending",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("amount must be a positive number"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn unknown_kind_is_rejected() {
    let conn = setup();
    let err = run_log(
        &conn,
        &[
            "--amount",
            "10",
            "--type",
            "transfer",
            "--category",
            "Personal Spending",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("transaction type must be"));
}

#[test]
fn malformed_date_is_rejected_before_any_write() {
    let conn = setup();
    let err = run_log(
        &conn,
        &[
            "--amount",
            "10",
            "--type",
            "debit",
            "--category",
            "Personal Spending",
            "--date",
            "2025-13-40",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("invalid date"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn rules_fill_category_and_sub_category() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, category, sub_category)
         VALUES('(?i)zomato|swiggy', 'Personal Spending', 'Food & Dining')",
        [],
    )
    .unwrap();

    run_log(
        &conn,
        &[
            "--amount",
            "349",
            "--type",
            "debit",
            "--date",
            "2025-07-08",
            "--entity",
            "Zomato Dinner",
        ],
    )
    .unwrap();

    let (cat, sub): (String, Option<String>) = conn
        .query_row(
            "SELECT category, sub_category FROM transactions WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(cat, "Personal Spending");
    assert_eq!(sub.as_deref(), Some("Food & Dining"));
}

#[test]
fn no_category_and_no_matching_rule_errors() {
    let conn = setup();
    let err = run_log(
        &conn,
        &["--amount", "10", "--type", "debit", "--entity", "Mystery"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Category required"));
}

#[test]
fn share_purchase_mirrors_into_portfolio() {
    let conn = setup();
    run_log(
        &conn,
        &[
            "--amount",
            "15000",
            "--type",
            "debit",
            "--category",
            "Share Investment",
            "--date",
            "2025-07-06",
            "--symbol",
            "infy",
            "--units",
            "10",
            "--price",
            "1500",
        ],
    )
    .unwrap();

    let (date, symbol, units, price): (String, String, String, String) = conn
        .query_row(
            "SELECT date_invested, symbol, units, buy_price FROM investments WHERE id=1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .unwrap();
    assert_eq!(date, "2025-07-06");
    assert_eq!(symbol, "INFY");
    assert_eq!(units, "10");
    assert_eq!(price, "1500");

    // The cash row is still a plain ledger debit.
    let dr: String = conn
        .query_row("SELECT amount_dr FROM transactions WHERE id=1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(dr, "15000");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    for i in 1..=3 {
        conn.execute(
            "INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
             VALUES (?1, 'Personal Spending', '10', '0', '2025-01')",
            [format!("2025-01-0{}", i)],
        )
        .unwrap();
    }

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["paycycle", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_cycle_and_category() {
    let conn = setup();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
            VALUES ('2025-06-20', 'Personal Spending', '10', '0', '2025-06');
        INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
            VALUES ('2025-07-02', 'Personal Spending', '20', '0', '2025-07');
        INSERT INTO transactions(date, category, amount_dr, amount_cr, cycle_id)
            VALUES ('2025-07-03', 'Salary', '0', '50000', '2025-07');
        "#,
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "paycycle",
        "tx",
        "list",
        "--cycle",
        "2025-07",
        "--category",
        "Personal Spending",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].date, "2025-07-02");
            assert_eq!(rows[0].debit, "20");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}
