// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income entries and fixed expenses share one shape: `{name, amount}`
//! attached to a period.

use crate::db;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::{Entry, FixedExpense};
use crate::utils::{fmt_money, id_for_period, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Entry,
    Fixed,
}

impl ItemKind {
    fn table(self) -> &'static str {
        match self {
            ItemKind::Entry => "entries",
            ItemKind::Fixed => "fixed_expenses",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ItemKind::Entry => "entry",
            ItemKind::Fixed => "fixed expense",
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub, kind)?,
        Some(("list", sub)) => list(conn, sub, kind)?,
        Some(("edit", sub)) => edit(conn, sub, kind)?,
        Some(("rm", sub)) => remove(conn, sub, kind)?,
        _ => {}
    }
    Ok(())
}

pub fn add_item<G: IdGenerator>(
    conn: &Connection,
    kind: ItemKind,
    period_id: &str,
    name: &str,
    amount: Decimal,
    ids: &mut G,
) -> Result<String> {
    let id = ids.next_id();
    match kind {
        ItemKind::Entry => db::insert_entry(
            conn,
            &Entry {
                id: id.clone(),
                period_id: period_id.to_string(),
                name: name.to_string(),
                amount,
            },
        )?,
        ItemKind::Fixed => db::insert_fixed_expense(
            conn,
            &FixedExpense {
                id: id.clone(),
                period_id: period_id.to_string(),
                name: name.to_string(),
                amount,
            },
        )?,
    }
    info!(kind = kind.label(), %id, period = period_id, "item added");
    Ok(id)
}

fn add(conn: &Connection, sub: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    let period_id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap().trim();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let id = add_item(conn, kind, &period_id, name, amount, &mut UuidGenerator)?;
    println!("Added {} '{}' = {} (id {})", kind.label(), name, amount, id);
    Ok(())
}

#[derive(Serialize)]
pub struct ItemRow {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

fn list(conn: &Connection, sub: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    let period_id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let period = db::load_period(conn, &period_id)?;
    let data: Vec<ItemRow> = match kind {
        ItemKind::Entry => period
            .entries
            .into_iter()
            .map(|e| ItemRow {
                id: e.id,
                name: e.name,
                amount: e.amount,
            })
            .collect(),
        ItemKind::Fixed => period
            .fixed_expenses
            .into_iter()
            .map(|f| ItemRow {
                id: f.id,
                name: f.name,
                amount: f.amount,
            })
            .collect(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let total: Decimal = data.iter().map(|r| r.amount).sum();
        let mut rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| vec![r.id.clone(), r.name.clone(), fmt_money(&r.amount)])
            .collect();
        rows.push(vec![String::new(), "Total".into(), fmt_money(&total)]);
        println!("{}", pretty_table(&["ID", "Name", "Amount"], rows));
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?
        .map(|d| d.to_string());
    let n = conn.execute(
        &format!(
            "UPDATE {} SET name=COALESCE(?2, name), amount=COALESCE(?3, amount) WHERE id=?1",
            kind.table()
        ),
        params![id, name, amount],
    )?;
    if n == 0 {
        return Err(anyhow!("No {} with id '{}'", kind.label(), id));
    }
    println!("Updated {} {}", kind.label(), id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE id=?1", kind.table()),
        params![id],
    )?;
    if n == 0 {
        return Err(anyhow!("No {} with id '{}'", kind.label(), id));
    }
    println!("Removed {} {}", kind.label(), id);
    Ok(())
}
