// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyflow::apply_template;
use moneyflow::ids::{IdGenerator, SequentialIds, UuidGenerator};
use moneyflow::models::{AccountingPeriod, Entry, Template, TemplateEntry, TemplateFixedExpense};
use rust_decimal::Decimal;
use std::collections::HashSet;

fn blank() -> AccountingPeriod {
    AccountingPeriod::blank(
        "period-jan",
        "Janeiro",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    )
}

fn salary_and_rent() -> Template {
    Template {
        entries: vec![TemplateEntry {
            id: "tpl-e1".into(),
            name: "Salário".into(),
            amount: Decimal::from(3000),
        }],
        fixed_expenses: vec![TemplateFixedExpense {
            id: "tpl-f1".into(),
            name: "Aluguel".into(),
            amount: Decimal::from(1200),
        }],
    }
}

#[test]
fn blank_period_gets_template_items() {
    let template = salary_and_rent();
    let mut ids = SequentialIds::new("id");
    let p = apply_template(&blank(), &template, &mut ids);

    assert_eq!(p.entries.len(), 1);
    assert_eq!(p.fixed_expenses.len(), 1);
    assert_eq!(p.entries[0].name, "Salário");
    assert_eq!(p.entries[0].amount, Decimal::from(3000));
    assert_eq!(p.fixed_expenses[0].name, "Aluguel");
    assert_eq!(p.fixed_expenses[0].amount, Decimal::from(1200));
    assert_eq!(p.entries[0].period_id, "period-jan");
    assert_eq!(p.fixed_expenses[0].period_id, "period-jan");
    assert_ne!(p.entries[0].id, "tpl-e1");
    assert_ne!(p.fixed_expenses[0].id, "tpl-f1");
    assert_ne!(p.entries[0].id, p.fixed_expenses[0].id);

    // template untouched
    assert_eq!(template, salary_and_rent());
}

#[test]
fn template_items_follow_existing_ones() {
    let mut period = blank();
    period.entries.push(Entry {
        id: "manual".into(),
        period_id: "period-jan".into(),
        name: "Freelance".into(),
        amount: Decimal::from(500),
    });
    let p = apply_template(&period, &salary_and_rent(), &mut SequentialIds::new("x"));
    let names: Vec<&str> = p.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Freelance", "Salário"]);
    assert_eq!(p.entries[0].id, "manual");
}

#[test]
fn empty_template_changes_nothing() {
    let period = blank();
    let p = apply_template(&period, &Template::default(), &mut UuidGenerator);
    assert_eq!(p, period);
}

#[test]
fn applying_twice_never_reuses_ids() {
    let template = salary_and_rent();
    let mut ids = UuidGenerator;
    let once = apply_template(&blank(), &template, &mut ids);
    let twice = apply_template(&once, &template, &mut ids);
    let all: HashSet<&str> = twice
        .entries
        .iter()
        .map(|e| e.id.as_str())
        .chain(twice.fixed_expenses.iter().map(|f| f.id.as_str()))
        .collect();
    assert_eq!(all.len(), 4);
}

#[test]
fn sequential_ids_count_up() {
    let mut ids = SequentialIds::new("t");
    assert_eq!(ids.next_id(), "t-1");
    assert_eq!(ids.next_id(), "t-2");
}
