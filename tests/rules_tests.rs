// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use paycycle::{cli, commands::rules};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE rules(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern TEXT NOT NULL,
            category TEXT,
            sub_category TEXT,
            created_at TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn rule_matches_entity_and_notes() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, category, sub_category)
         VALUES('(?i)uber|ola', 'Personal Spending', 'Transport')",
        [],
    )
    .unwrap();

    let (cat, sub) =
        paycycle::utils::apply_rules(&conn, "UBER *TRIP", Some("office commute")).unwrap();
    assert_eq!(cat.as_deref(), Some("Personal Spending"));
    assert_eq!(sub.as_deref(), Some("Transport"));

    let (cat_none, sub_none) = paycycle::utils::apply_rules(&conn, "Bookstore", None).unwrap();
    assert_eq!(cat_none, None);
    assert_eq!(sub_none, None);
}

#[test]
fn newest_rule_wins() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, sub_category) VALUES('(?i)rent', 'Maintenance')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO rules(pattern, sub_category) VALUES('(?i)rent', 'Rent')",
        [],
    )
    .unwrap();

    let (_, sub) = paycycle::utils::apply_rules(&conn, "RENT June", None).unwrap();
    assert_eq!(sub.as_deref(), Some("Rent"));
}

#[test]
fn rules_add_rejects_invalid_regex() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "paycycle",
        "rules",
        "add",
        "--pattern",
        " (?P< ",
        "--category",
        " Personal Spending ",
    ]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        let err = rules::handle(&conn, rules_m).unwrap_err();
        assert!(err.to_string().contains("Invalid regex pattern"));
    } else {
        panic!("rules command not parsed");
    }
}

#[test]
fn rules_add_requires_some_assignment() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["paycycle", "rules", "add", "--pattern", "uber"]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        let err = rules::handle(&conn, rules_m).unwrap_err();
        assert!(err.to_string().contains("Rule needs"));
    } else {
        panic!("rules command not parsed");
    }
}

#[test]
fn rules_rm_trims_id_argument() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, category) VALUES('foo', 'Personal Spending')",
        [],
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["paycycle", "rules", "rm", "--id", " 1 "]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        rules::handle(&conn, rules_m).unwrap();
    } else {
        panic!("rules command not parsed");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rules", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
