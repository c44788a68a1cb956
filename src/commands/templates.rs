// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::{TemplateEntry, TemplateFixedExpense};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add-entry", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            db::insert_template_entry(
                conn,
                &TemplateEntry {
                    id: UuidGenerator.next_id(),
                    name: name.clone(),
                    amount,
                },
            )?;
            println!("Template entry '{}' = {}", name, amount);
        }
        Some(("add-fixed", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            db::insert_template_fixed_expense(
                conn,
                &TemplateFixedExpense {
                    id: UuidGenerator.next_id(),
                    name: name.clone(),
                    amount,
                },
            )?;
            println!("Template fixed expense '{}' = {}", name, amount);
        }
        Some(("list", sub)) => {
            let template = db::load_template(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &template)? {
                let mut rows = Vec::new();
                for e in &template.entries {
                    rows.push(vec![
                        e.id.clone(),
                        "entry".into(),
                        e.name.clone(),
                        fmt_money(&e.amount),
                    ]);
                }
                for f in &template.fixed_expenses {
                    rows.push(vec![
                        f.id.clone(),
                        "fixed".into(),
                        f.name.clone(),
                        fmt_money(&f.amount),
                    ]);
                }
                println!("{}", pretty_table(&["ID", "Kind", "Name", "Amount"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap().trim();
            let n = conn.execute("DELETE FROM template_entries WHERE id=?1", params![id])?
                + conn.execute(
                    "DELETE FROM template_fixed_expenses WHERE id=?1",
                    params![id],
                )?;
            if n == 0 {
                return Err(anyhow!("No template item with id '{}'", id));
            }
            println!("Removed template item {}", id);
        }
        Some(("clear", _)) => {
            conn.execute_batch(
                "DELETE FROM template_entries; DELETE FROM template_fixed_expenses;",
            )?;
            println!("Template cleared");
        }
        _ => {}
    }
    Ok(())
}
