// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::error::MoneyflowError;
use crate::models::{AccountingPeriod, Template, Transaction};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

pub const EXPORT_VERSION: u32 = 1;

/// Full backup envelope. Field names follow the camelCase backup format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseExport {
    #[serde(default)]
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub periods: Vec<AccountingPeriod>,
    pub transactions: Vec<Transaction>,
    pub template: Template,
}

pub fn build_export(conn: &Connection) -> Result<DatabaseExport> {
    Ok(DatabaseExport {
        version: EXPORT_VERSION,
        exported_at: Utc::now(),
        periods: db::load_periods(conn)?,
        transactions: db::load_all_transactions(conn)?,
        template: db::load_template(conn)?,
    })
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = m.get_one::<String>("out").unwrap().trim();

    match fmt.as_str() {
        "json" => {
            let export = build_export(conn)?;
            std::fs::write(out, serde_json::to_string_pretty(&export)?)
                .with_context(|| format!("Write {}", out))?;
            info!(
                periods = export.periods.len(),
                transactions = export.transactions.len(),
                "backup written"
            );
        }
        "csv" => export_transactions_csv(conn, out)?,
        _ => return Err(MoneyflowError::UnknownFormat(fmt).into()),
    }
    println!("Exported to {}", out);
    Ok(())
}

fn export_transactions_csv(conn: &Connection, out: &str) -> Result<()> {
    let names: HashMap<String, String> = db::load_periods(conn)?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record(["date", "period", "amount", "description", "id"])?;
    for t in db::load_all_transactions(conn)? {
        let period = names.get(&t.period_id).cloned().unwrap_or(t.period_id);
        wtr.write_record([
            t.date.to_string(),
            period,
            t.amount.to_string(),
            t.description,
            t.id,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
