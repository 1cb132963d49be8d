// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine;
use crate::utils::{
    cycle_tag, fmt_money, get_config_required, load_transactions, maybe_print_json, parse_date,
    pretty_table, today,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("close", sub)) => close(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Close the active cycle: recompute final totals, archive one summary row,
/// and roll the remaining wallet balance into the next cycle's opening
/// balance. The archive insert and config rewrite commit together or not
/// at all.
fn close(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let rollover_date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => today(),
    };

    let config = get_config_required(conn)?;
    let rows = load_transactions(conn)?;
    let totals = engine::aggregate(&rows, config.cycle_start_date);
    let closing =
        engine::closing_balance(&totals, config.salary_plan, config.opening_balance).round_dp(2);

    let month_year = config
        .cycle_start_date
        .map(cycle_tag)
        .unwrap_or_else(|| cycle_tag(rollover_date));

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO archive(month_year, opening_balance, salary_received, family_sent,
                             shares_invested, savings_moved, wallet_spent, other_income,
                             closing_balance)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            month_year,
            config.opening_balance.to_string(),
            totals.salary.to_string(),
            totals.family.to_string(),
            totals.shares.to_string(),
            totals.savings.to_string(),
            totals.wallet_spent().to_string(),
            totals.other_income.to_string(),
            closing.to_string()
        ],
    )?;
    tx.execute(
        "UPDATE config SET opening_balance=?1, cycle_start_date=?2,
                           updated_at=datetime('now')
         WHERE id=1",
        params![closing.to_string(), rollover_date.to_string()],
    )?;
    tx.commit().context("Commit cycle rollover")?;

    if json_flag {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "month_year": month_year,
                "new_opening_balance": closing,
                "cycle_start_date": rollover_date,
            }))?
        );
    } else {
        println!(
            "Cycle {} closed; new opening balance {} from {}",
            month_year,
            fmt_money(&closing),
            rollover_date
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ArchiveRow {
    month_year: String,
    opening_balance: String,
    salary_received: String,
    family_sent: String,
    shares_invested: String,
    savings_moved: String,
    wallet_spent: String,
    other_income: String,
    closing_balance: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT month_year, opening_balance, salary_received, family_sent, shares_invested,
                savings_moved, wallet_spent, other_income, closing_balance
         FROM archive ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(ArchiveRow {
            month_year: r.get(0)?,
            opening_balance: r.get(1)?,
            salary_received: r.get(2)?,
            family_sent: r.get(3)?,
            shares_invested: r.get(4)?,
            savings_moved: r.get(5)?,
            wallet_spent: r.get(6)?,
            other_income: r.get(7)?,
            closing_balance: r.get(8)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|a| {
                vec![
                    a.month_year.clone(),
                    a.opening_balance.clone(),
                    a.salary_received.clone(),
                    a.wallet_spent.clone(),
                    a.closing_balance.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Cycle", "Opening", "Salary", "Wallet Spent", "Closing"],
                rows
            )
        );
    }
    Ok(())
}
