// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Profile present?
    let has_config: Option<i64> = conn
        .query_row("SELECT id FROM config WHERE id=1", [], |r| r.get(0))
        .optional()?;
    if has_config.is_none() {
        rows.push(vec![
            "missing_config".into(),
            "run 'paycycle profile setup'".into(),
        ]);
    }

    // 2) One-sided amount invariant: exactly one of DR/CR should be non-zero
    let mut stmt = conn.prepare(
        "SELECT id, date FROM transactions
         WHERE CAST(amount_dr AS REAL) > 0 AND CAST(amount_cr AS REAL) > 0",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        rows.push(vec!["two_sided_amount".into(), format!("row {} ({})", id, d)]);
    }

    let mut stmt2 = conn.prepare(
        "SELECT id, date FROM transactions
         WHERE CAST(amount_dr AS REAL) = 0 AND CAST(amount_cr AS REAL) = 0",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        rows.push(vec!["zero_amount".into(), format!("row {} ({})", id, d)]);
    }

    // 3) Labels the aggregator will fold into the uncategorized buckets
    let mut stmt3 =
        conn.prepare("SELECT category, COUNT(*) FROM transactions GROUP BY category")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let label: String = r.get(0)?;
        let count: i64 = r.get(1)?;
        if Category::from_label(&label).is_none() {
            rows.push(vec![
                "unknown_category".into(),
                format!("'{}' ({} rows)", label, count),
            ]);
        }
    }

    // 4) Dates the ledger scan would reject
    let mut stmt4 = conn.prepare("SELECT id, date FROM transactions")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_err() {
            rows.push(vec!["invalid_date".into(), format!("row {} ('{}')", id, d)]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
