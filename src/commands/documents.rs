// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let doc_type = sub.get_one::<String>("type").unwrap().trim().to_string();
    let number = sub.get_one::<String>("number").unwrap().trim().to_string();
    let issued = match sub.get_one::<String>("issued") {
        Some(raw) => Some(parse_date(raw.trim())?.to_string()),
        None => None,
    };
    let expiry = match sub.get_one::<String>("expiry") {
        Some(raw) => Some(parse_date(raw.trim())?.to_string()),
        None => None,
    };
    let link = sub.get_one::<String>("link").map(|s| s.trim().to_string());

    conn.execute(
        "INSERT INTO documents(full_name, doc_type, doc_number, issued_date, expiry_date, drive_link)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![name, doc_type, number, issued, expiry, link],
    )?;
    println!("Added {} '{}'", doc_type, number);
    Ok(())
}

#[derive(Serialize)]
struct DocRow {
    full_name: String,
    doc_type: String,
    doc_number: String,
    issued_date: String,
    expiry_date: String,
    drive_link: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT full_name, doc_type, doc_number, COALESCE(issued_date,''),
                COALESCE(expiry_date,''), COALESCE(drive_link,'')
         FROM documents ORDER BY doc_type, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(DocRow {
            full_name: r.get(0)?,
            doc_type: r.get(1)?,
            doc_number: r.get(2)?,
            issued_date: r.get(3)?,
            expiry_date: r.get(4)?,
            drive_link: r.get(5)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|d| {
                vec![
                    d.doc_type.clone(),
                    d.doc_number.clone(),
                    d.full_name.clone(),
                    d.issued_date.clone(),
                    d.expiry_date.clone(),
                    d.drive_link.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Type", "Number", "Name", "Issued", "Expiry", "Link"],
                rows
            )
        );
    }
    Ok(())
}
