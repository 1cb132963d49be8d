// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, category, sub_category, amount_dr, amount_cr, entity, notes,
                payment_mode, cycle_id
         FROM transactions ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<String>>(7)?,
            r.get::<_, String>(8)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "category",
                "sub_category",
                "amount_dr",
                "amount_cr",
                "entity",
                "notes",
                "payment_mode",
                "cycle_id",
            ])?;
            for row in rows {
                let (d, cat, sub_cat, dr, cr, entity, notes, mode, cycle) = row?;
                wtr.write_record([
                    d,
                    cat,
                    sub_cat.unwrap_or_default(),
                    dr,
                    cr,
                    entity,
                    notes.unwrap_or_default(),
                    mode.unwrap_or_default(),
                    cycle,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, cat, sub_cat, dr, cr, entity, notes, mode, cycle) = row?;
                items.push(json!({
                    "date": d, "category": cat, "sub_category": sub_cat,
                    "amount_dr": dr, "amount_cr": cr, "entity": entity,
                    "notes": notes, "payment_mode": mode, "cycle_id": cycle
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
