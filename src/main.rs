// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use moneyflow::commands::items::ItemKind;
use moneyflow::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let mut conn = db::open_at(&path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("period", sub)) => commands::periods::handle(&mut conn, sub)?,
        Some(("entry", sub)) => commands::items::handle(&conn, sub, ItemKind::Entry)?,
        Some(("fixed", sub)) => commands::items::handle(&conn, sub, ItemKind::Fixed)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("template", sub)) => commands::templates::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
