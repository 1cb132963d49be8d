// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, LedgerError};
use crate::utils::{
    apply_rules, cycle_tag, maybe_print_json, parse_amount, parse_date, parse_decimal,
    pretty_table, today,
};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("log", sub)) => log(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn log(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap().trim())?;
    let kind = sub.get_one::<String>("type").unwrap().trim().to_lowercase();
    if kind != "debit" && kind != "credit" {
        return Err(LedgerError::InvalidKind(kind).into());
    }
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw.trim())?,
        None => today(),
    };
    let entity = sub
        .get_one::<String>("entity")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or("None")
        .to_string();
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
    let mode = sub.get_one::<String>("mode").map(|s| s.to_string());

    let mut category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string());
    let mut sub_category = sub
        .get_one::<String>("sub-category")
        .map(|s| s.trim().to_string());

    if category.is_none() || sub_category.is_none() {
        let (rule_cat, rule_sub) = apply_rules(conn, &entity, notes.as_deref())?;
        if category.is_none() {
            category = rule_cat;
        }
        if sub_category.is_none() {
            sub_category = rule_sub;
        }
    }
    let category = category
        .ok_or_else(|| anyhow!("Category required (no rule matched entity '{}')", entity))?;

    let (amount_dr, amount_cr) = if kind == "debit" {
        (amount, Decimal::ZERO)
    } else {
        (Decimal::ZERO, amount)
    };

    conn.execute(
        "INSERT INTO transactions(date, category, sub_category, amount_dr, amount_cr,
                                  entity, notes, payment_mode, cycle_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            date.to_string(),
            category,
            sub_category,
            amount_dr.to_string(),
            amount_cr.to_string(),
            entity,
            notes,
            mode,
            cycle_tag(date)
        ],
    )?;

    // Share purchases also land in the portfolio, mirroring the cash row.
    if category == Category::ShareInvestment.label() {
        if let Some(symbol) = sub
            .get_one::<String>("symbol")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            let units = parse_decimal(
                sub.get_one::<String>("units")
                    .map(|s| s.trim())
                    .ok_or_else(|| anyhow!("--units required with --symbol"))?,
            )?;
            let price = parse_decimal(
                sub.get_one::<String>("price")
                    .map(|s| s.trim())
                    .ok_or_else(|| anyhow!("--price required with --symbol"))?,
            )?;
            crate::commands::portfolio::record_investment(conn, date, symbol, units, price)?;
        }
    }

    println!(
        "Logged {} {} of {} on {} ({})",
        kind, category, amount, date, entity
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.category.clone(),
                    r.sub_category.clone(),
                    r.debit.clone(),
                    r.credit.clone(),
                    r.entity.clone(),
                    r.mode.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Category", "Sub", "DR", "CR", "Entity", "Mode", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub category: String,
    pub sub_category: String,
    pub debit: String,
    pub credit: String,
    pub entity: String,
    pub mode: String,
    pub notes: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT date, category, sub_category, amount_dr, amount_cr, entity, payment_mode, notes
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(cycle) = sub.get_one::<String>("cycle") {
        sql.push_str(" AND cycle_id=?");
        params_vec.push(cycle.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    if let Some(entity) = sub.get_one::<String>("entity") {
        sql.push_str(" AND entity=?");
        params_vec.push(entity.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let category: String = r.get(1)?;
        let sub_category: Option<String> = r.get(2)?;
        let debit: String = r.get(3)?;
        let credit: String = r.get(4)?;
        let entity: String = r.get(5)?;
        let mode: Option<String> = r.get(6)?;
        let notes: Option<String> = r.get(7)?;
        data.push(TransactionRow {
            date,
            category,
            sub_category: sub_category.unwrap_or_default(),
            debit,
            credit,
            entity,
            mode: mode.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
        });
    }
    Ok(data)
}
