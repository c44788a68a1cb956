// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::{DatabaseExport, EXPORT_VERSION};
use crate::db;
use crate::error::MoneyflowError;
use crate::summary::clamp_percentage;
use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let data = parse_export(&raw)?;
    import_all(conn, data)?;
    println!("Imported data from {}", path);
    Ok(())
}

/// Parse and validate a backup. The stored data is not touched.
pub fn parse_export(raw: &str) -> Result<DatabaseExport> {
    let mut data: DatabaseExport = serde_json::from_str(raw)
        .map_err(|e| MoneyflowError::InvalidExport(e.to_string()))?;
    if data.version == 0 {
        return Err(MoneyflowError::InvalidExport("missing version".into()).into());
    }
    if data.version > EXPORT_VERSION {
        return Err(MoneyflowError::UnsupportedExportVersion {
            found: data.version,
            supported: EXPORT_VERSION,
        }
        .into());
    }
    for p in data.periods.iter_mut() {
        if p.start_date > p.end_date {
            return Err(MoneyflowError::InvalidDateRange {
                start: p.start_date,
                end: p.end_date,
            }
            .into());
        }
        let clamped = clamp_percentage(p.investment_percentage);
        if clamped != p.investment_percentage {
            warn!(period = %p.id, value = %p.investment_percentage, "investment percentage clamped");
            p.investment_percentage = clamped;
        }
    }
    Ok(data)
}

/// Replace everything in the store with the backup's content.
pub fn import_all(conn: &mut Connection, data: DatabaseExport) -> Result<()> {
    db::replace_all(conn, &data.periods, &data.transactions, &data.template)?;
    info!(
        periods = data.periods.len(),
        transactions = data.transactions.len(),
        exported_at = %data.exported_at,
        "backup imported"
    );
    Ok(())
}
