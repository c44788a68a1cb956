// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyflow::commands::periods::{self, NewPeriod};
use moneyflow::commands::transactions;
use moneyflow::ids::SequentialIds;
use moneyflow::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let mut ids = SequentialIds::new("id");
    let p = periods::create_period(
        &mut conn,
        NewPeriod {
            name: "Jan".into(),
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            investment_percentage: Decimal::ZERO,
            use_template: false,
        },
        &mut ids,
    )
    .unwrap();
    for (i, desc) in ["Bakery", "Bus", "Bakery again"].iter().enumerate() {
        transactions::record(
            &conn,
            &p.id,
            NaiveDate::from_ymd_opt(2025, 1, i as u32 + 1).unwrap(),
            Decimal::from(10),
            desc,
            &mut ids,
        )
        .unwrap();
    }
    conn
}

fn list_args(extra: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["moneyflow", "tx", "list", "--period", "Jan"];
    argv.extend_from_slice(extra);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_args(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_filters_by_description() {
    let conn = setup();
    let rows = transactions::query_rows(&conn, &list_args(&["--match", "^Bak"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.description.starts_with("Bakery")));

    assert!(transactions::query_rows(&conn, &list_args(&["--match", "("])).is_err());
}

#[test]
fn dates_outside_the_period_are_kept() {
    let conn = setup();
    let mut ids = SequentialIds::new("late");
    let t = transactions::record(
        &conn,
        "id-1",
        NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
        Decimal::from(3),
        "late entry",
        &mut ids,
    )
    .unwrap();
    let stored = db::load_transactions(&conn, "id-1").unwrap();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored.last().unwrap().id, t.id);
}

#[test]
fn record_into_unknown_period_fails() {
    let conn = setup();
    let err = transactions::record(
        &conn,
        "nope",
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        Decimal::ONE,
        "",
        &mut SequentialIds::new("x"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("not found"));
}
