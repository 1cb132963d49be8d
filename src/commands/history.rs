// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{fmt_money, get_config, load_transactions, maybe_print_json, pretty_table, today};
use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub category: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub entity: String,
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct DebitChart {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub transactions: Vec<HistoryRow>,
    pub debit_chart: DebitChart,
}

/// Range-filtered ledger view, newest first, with per-category debit sums
/// for charting. "1m" means the active cycle when a profile exists, the
/// last 30 days otherwise.
pub fn analyze(conn: &Connection, range: &str) -> Result<HistoryData> {
    let start = range_start(conn, range)?;
    let rows = load_transactions(conn)?;

    let mut transactions = Vec::new();
    let mut summary: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for row in &rows {
        if let Some(s) = start {
            if row.date < s {
                continue;
            }
        }
        if row.amount_dr > Decimal::ZERO {
            total += row.amount_dr;
            *summary.entry(row.category.clone()).or_insert(Decimal::ZERO) += row.amount_dr;
        }
        transactions.push(HistoryRow {
            date: row.date,
            category: row.category.clone(),
            debit: row.amount_dr,
            credit: row.amount_cr,
            entity: row.entity.clone(),
            notes: row.notes.clone().unwrap_or_default(),
        });
    }
    transactions.reverse();

    let (labels, values) = summary.into_iter().unzip();
    Ok(HistoryData {
        transactions,
        debit_chart: DebitChart {
            labels,
            values,
            total,
        },
    })
}

fn range_start(conn: &Connection, range: &str) -> Result<Option<NaiveDate>> {
    match range.to_lowercase().as_str() {
        "1d" => Ok(Some(today() - Duration::days(1))),
        "1w" => Ok(Some(today() - Duration::days(7))),
        "1m" => {
            let cycle_start = get_config(conn)?.and_then(|c| c.cycle_start_date);
            Ok(Some(
                cycle_start.unwrap_or_else(|| today() - Duration::days(30)),
            ))
        }
        "all" => Ok(None),
        other => Err(anyhow!("Unknown range '{}' (use 1d, 1w, 1m or all)", other)),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let range = sub.get_one::<String>("range").unwrap();
    let data = analyze(conn, range)?;
    if maybe_print_json(json_flag, false, &data)? {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = data
        .transactions
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.category.clone(),
                format!("{:.2}", t.debit),
                format!("{:.2}", t.credit),
                t.entity.clone(),
                t.notes.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "DR", "CR", "Entity", "Notes"], rows)
    );

    let chart = &data.debit_chart;
    let mut spend_rows = Vec::new();
    for (label, value) in chart.labels.iter().zip(chart.values.iter()) {
        spend_rows.push(vec![label.clone(), format!("{:.2}", value)]);
    }
    println!("{}", pretty_table(&["Category", "Debits"], spend_rows));
    println!("Total debits {}", fmt_money(&chart.total));
    Ok(())
}
