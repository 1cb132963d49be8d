// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{http_client, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("value", sub)) => value(conn, sub)?,
        Some(("fetch", _)) => fetch_prices(conn)?,
        _ => {}
    }
    Ok(())
}

/// Append one investment lot. Called directly and by `tx log` when a share
/// purchase carries its symbol/units/price.
pub fn record_investment(
    conn: &Connection,
    date: NaiveDate,
    symbol: &str,
    units: Decimal,
    buy_price: Decimal,
) -> Result<()> {
    conn.execute(
        "INSERT INTO investments(date_invested, symbol, units, buy_price)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            date.to_string(),
            symbol.to_uppercase(),
            units.to_string(),
            buy_price.to_string()
        ],
    )?;
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let symbol = sub.get_one::<String>("symbol").unwrap().trim().to_string();
    let units = parse_decimal(sub.get_one::<String>("units").unwrap().trim())?;
    let price = parse_decimal(sub.get_one::<String>("price").unwrap().trim())?;
    record_investment(conn, date, &symbol, units, price)?;
    println!("Recorded {} x {} @ {} on {}", units, symbol, price, date);
    Ok(())
}

#[derive(Serialize)]
struct LotRow {
    date_invested: String,
    symbol: String,
    units: String,
    buy_price: String,
    current_price: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT date_invested, symbol, units, buy_price, COALESCE(current_price, '')
         FROM investments ORDER BY date_invested DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(LotRow {
            date_invested: r.get(0)?,
            symbol: r.get(1)?,
            units: r.get(2)?,
            buy_price: r.get(3)?,
            current_price: r.get(4)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|l| {
                vec![
                    l.date_invested.clone(),
                    l.symbol.clone(),
                    l.units.clone(),
                    l.buy_price.clone(),
                    l.current_price.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Symbol", "Units", "Buy Price", "Current"], rows)
        );
    }
    Ok(())
}

struct Holding {
    units: Decimal,
    invested: Decimal,
    value: Decimal,
}

/// Per-symbol valuation: current price when known, buy price otherwise.
fn value(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    if sub.get_flag("live") {
        fetch_prices(conn)?;
    }

    let mut stmt = conn.prepare(
        "SELECT symbol, units, buy_price, current_price FROM investments ORDER BY symbol",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut holdings: HashMap<String, Holding> = HashMap::new();
    for row in rows {
        let (symbol, units_s, buy_s, cur_s) = row?;
        let units = parse_decimal(&units_s)?;
        let buy = parse_decimal(&buy_s)?;
        let price = match cur_s {
            Some(s) if !s.is_empty() => parse_decimal(&s)?,
            _ => buy,
        };
        let h = holdings.entry(symbol).or_insert(Holding {
            units: Decimal::ZERO,
            invested: Decimal::ZERO,
            value: Decimal::ZERO,
        });
        h.units += units;
        h.invested += units * buy;
        h.value += units * price;
    }

    let mut items: Vec<_> = holdings.into_iter().collect();
    items.sort_by(|a, b| a.0.cmp(&b.0));
    let mut total = Decimal::ZERO;
    let mut data = Vec::new();
    for (symbol, h) in items {
        total += h.value;
        data.push(vec![
            symbol,
            format!("{:.4}", h.units),
            format!("{:.2}", h.invested),
            format!("{:.2}", h.value),
            format!("{:.2}", h.value - h.invested),
        ]);
    }
    println!(
        "{}",
        pretty_table(&["Symbol", "Units", "Invested", "Value", "P/L"], data)
    );
    println!("Total value {:.2}", total);
    Ok(())
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct YahooResponse {
    quoteResponse: QuoteResponse,
}
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct QuoteResponse {
    result: Vec<YahooQuote>,
}
#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    symbol: Option<String>,
}

fn fetch_prices(conn: &mut Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT DISTINCT symbol FROM investments ORDER BY symbol")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut symbols = Vec::new();
    for row in rows {
        symbols.push(row?);
    }
    drop(stmt);

    if symbols.is_empty() {
        println!("No investments to price");
        return Ok(());
    }

    let url = format!(
        "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
        symbols.join(",")
    );
    let client = http_client()?;
    let resp = client.get(url).send()?.error_for_status()?;
    let yr: YahooResponse = resp.json()?;

    let mut updates = Vec::with_capacity(yr.quoteResponse.result.len());
    for q in yr.quoteResponse.result {
        if let (Some(sym), Some(px)) = (q.symbol, q.regular_market_price) {
            if let Some(px_decimal) = Decimal::from_f64_retain(px) {
                updates.push((sym, px_decimal.to_string()));
            }
        }
    }

    if updates.is_empty() {
        println!("No quotes returned");
        return Ok(());
    }

    let total_updates = updates.len();
    let tx = conn.transaction()?;
    {
        let mut update =
            tx.prepare_cached("UPDATE investments SET current_price=?1 WHERE symbol=?2")?;
        for (symbol, price) in updates {
            update.execute(params![price, symbol])?;
        }
    }
    tx.commit()?;

    println!("Refreshed {} quotes", total_updates);
    Ok(())
}
