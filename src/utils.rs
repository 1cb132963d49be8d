// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use regex::Regex;
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{ConfigRecord, LedgerError, TransactionRecord};

const UA: &str = concat!(
    "paycycle/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/paycycle)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(s.to_string()).into())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Transaction amounts must be strictly positive; the debit/credit side is
/// carried by the row, not the sign.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = s
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidAmount(s.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(s.to_string()).into());
    }
    Ok(amount)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("₹{}", d.round_dp(2))
}

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Ledger rows are tagged with the month of their date (e.g. "2025-12").
pub fn cycle_tag(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn parse_opt_decimal(v: Option<String>, what: &str) -> Result<Option<Decimal>> {
    match v {
        Some(s) if !s.is_empty() => Ok(Some(
            s.parse::<Decimal>()
                .with_context(|| format!("Invalid {} '{}' in config", what, s))?,
        )),
        _ => Ok(None),
    }
}

pub fn get_config(conn: &Connection) -> Result<Option<ConfigRecord>> {
    let row: Option<(
        String,
        String,
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
    )> = conn
        .query_row(
            "SELECT emp_name, salary_plan, opening_balance, cycle_start_date,
                    pan_number, pf_number, uan_number, gross_salary, net_salary
             FROM config WHERE id=1",
            [],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                    r.get(7)?,
                    r.get(8)?,
                ))
            },
        )
        .optional()?;
    let Some((name, plan_s, ob_s, start_s, pan, pf, uan, gross_s, net_s)) = row else {
        return Ok(None);
    };
    let salary_plan = plan_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid salary plan '{}' in config", plan_s))?;
    let opening_balance = ob_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid opening balance '{}' in config", ob_s))?;
    let cycle_start_date = match start_s {
        Some(s) if !s.is_empty() => Some(parse_date(&s)?),
        _ => None,
    };
    Ok(Some(ConfigRecord {
        emp_name: name,
        salary_plan,
        opening_balance,
        cycle_start_date,
        pan_number: pan,
        pf_number: pf,
        uan_number: uan,
        gross_salary: parse_opt_decimal(gross_s, "gross salary")?,
        net_salary: parse_opt_decimal(net_s, "net salary")?,
    }))
}

pub fn get_config_required(conn: &Connection) -> Result<ConfigRecord> {
    Ok(get_config(conn)?.ok_or(LedgerError::MissingConfig)?)
}

/// Full ledger scan, oldest first. Every read surface recomputes from this;
/// there is no cached aggregate to invalidate.
pub fn load_transactions(conn: &Connection) -> Result<Vec<TransactionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, category, sub_category, amount_dr, amount_cr,
                entity, notes, payment_mode, cycle_id
         FROM transactions ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let dr_s: String = r.get(4)?;
        let cr_s: String = r.get(5)?;
        data.push(TransactionRecord {
            id,
            date: parse_date(&date_s)
                .with_context(|| format!("Invalid date '{}' in ledger row {}", date_s, id))?,
            category: r.get(2)?,
            sub_category: r.get(3)?,
            amount_dr: dr_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid debit '{}' in ledger row {}", dr_s, id))?,
            amount_cr: cr_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid credit '{}' in ledger row {}", cr_s, id))?,
            entity: r.get(6)?,
            notes: r.get(7)?,
            payment_mode: r.get(8)?,
            cycle_id: r.get(9)?,
        });
    }
    Ok(data)
}

/// Match entity+notes against the stored rules, newest rule first. Returns
/// the category/sub-category of the first match.
pub fn apply_rules(
    conn: &Connection,
    entity: &str,
    notes: Option<&str>,
) -> Result<(Option<String>, Option<String>)> {
    let mut stmt =
        conn.prepare("SELECT pattern, category, sub_category FROM rules ORDER BY id DESC")?;
    let mut cur = stmt.query([])?;
    let hay = if let Some(n) = notes {
        format!("{} {}", entity, n)
    } else {
        entity.to_string()
    };
    while let Some(r) = cur.next()? {
        let pat: String = r.get(0)?;
        let cat: Option<String> = r.get(1)?;
        let sub: Option<String> = r.get(2)?;
        if let Ok(re) = Regex::new(&pat) {
            if re.is_match(&hay) {
                return Ok((cat, sub));
            }
        }
    }
    Ok((None, None))
}
