// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    KNOWN_SETTINGS, SETTING_DEFAULT_INVESTMENT, get_setting, parse_percentage, pretty_table,
    set_setting,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let mut rows = Vec::new();
            for key in KNOWN_SETTINGS {
                let value = get_setting(conn, key)?.unwrap_or_else(|| "(default)".into());
                rows.push(vec![key.to_string(), value]);
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let raw = sub.get_one::<String>("value").unwrap().trim();
            let value = if key == SETTING_DEFAULT_INVESTMENT {
                parse_percentage(raw)?.to_string()
            } else {
                raw.to_string()
            };
            set_setting(conn, key, &value)?;
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
