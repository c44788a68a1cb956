// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneyflow::compute_summary;
use moneyflow::models::{AccountingPeriod, Entry, FixedExpense, PeriodSummary, Transaction};
use moneyflow::summary::Health;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn period(entries: &[&str], fixed: &[&str], pct: &str) -> AccountingPeriod {
    let mut p = AccountingPeriod::blank("p1", "January", date("2025-01-01"), date("2025-01-31"));
    p.investment_percentage = dec(pct);
    p.entries = entries
        .iter()
        .enumerate()
        .map(|(i, a)| Entry {
            id: format!("e{}", i),
            period_id: "p1".into(),
            name: format!("Income {}", i),
            amount: dec(a),
        })
        .collect();
    p.fixed_expenses = fixed
        .iter()
        .enumerate()
        .map(|(i, a)| FixedExpense {
            id: format!("f{}", i),
            period_id: "p1".into(),
            name: format!("Bill {}", i),
            amount: dec(a),
        })
        .collect();
    p
}

fn txs(amounts: &[&str]) -> Vec<Transaction> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, a)| Transaction {
            id: format!("t{}", i),
            period_id: "p1".into(),
            amount: dec(a),
            description: String::new(),
            date: date("2025-01-10"),
        })
        .collect()
}

#[test]
fn empty_period_is_all_zero() {
    let s = compute_summary(&period(&[], &[], "0"), &[]);
    assert_eq!(s, PeriodSummary::default());
}

#[test]
fn salary_rent_and_two_purchases() {
    let p = period(&["5000"], &["1000"], "20");
    let s = compute_summary(&p, &txs(&["300", "200"]));
    assert_eq!(s.total_entries, dec("5000"));
    assert_eq!(s.investment_amount, dec("1000"));
    assert_eq!(s.projected_variable_balance, dec("3000"));
    assert_eq!(s.variable_expenses, dec("500"));
    assert_eq!(s.current_variable_balance, dec("2500"));
    assert_eq!(s.total_expenses, dec("1500"));
    assert_eq!(s.balance, dec("3500"));
}

#[test]
fn decimal_amounts_do_not_drift() {
    let p = period(&["0.10", "0.20"], &["0.30"], "0");
    let s = compute_summary(&p, &txs(&["0.10", "0.10", "0.10"]));
    assert_eq!(s.total_entries, dec("0.30"));
    assert!(s.projected_variable_balance.is_zero());
    assert_eq!(s.current_variable_balance, dec("-0.30"));
}

#[test]
fn investment_percentage_is_clamped() {
    let over = compute_summary(&period(&["1000"], &[], "150"), &[]);
    assert_eq!(over.investment_amount, dec("1000"));
    assert!(over.projected_variable_balance.is_zero());

    let under = compute_summary(&period(&["1000"], &[], "-10"), &[]);
    assert!(under.investment_amount.is_zero());
    assert_eq!(under.projected_variable_balance, dec("1000"));
}

#[test]
fn negative_amounts_propagate() {
    let s = compute_summary(&period(&["100"], &["-50"], "0"), &txs(&["-5"]));
    assert_eq!(s.fixed_expenses, dec("-50"));
    assert_eq!(s.variable_expenses, dec("-5"));
    assert_eq!(s.current_variable_balance, dec("155"));
}

#[test]
fn missing_collections_deserialize_as_empty() {
    let p: AccountingPeriod = serde_json::from_str(
        r#"{"id":"p","name":"Feb","startDate":"2025-02-01","endDate":"2025-02-28"}"#,
    )
    .unwrap();
    assert!(p.is_open);
    assert!(p.entries.is_empty());
    assert!(p.fixed_expenses.is_empty());
    assert_eq!(compute_summary(&p, &[]), PeriodSummary::default());
}

#[test]
fn health_indicators() {
    let s = compute_summary(&period(&["1000"], &["400"], "10"), &txs(&["450"]));
    // 850 of 1000 committed
    assert_eq!(s.commitment_rate(), dec("85"));
    assert_eq!(s.health(), Health::Critical);
    // projected 500, current 50
    assert_eq!(s.variable_usage(), dec("90"));
    assert!(!s.is_over_budget());

    let over = compute_summary(&period(&["1000"], &["400"], "10"), &txs(&["600"]));
    assert!(over.is_over_budget());
    assert_eq!(over.variable_usage(), dec("120"));
    assert_eq!(over.variable_usage_clamped(), dec("100"));

    let calm = compute_summary(&period(&["1000"], &["300"], "0"), &[]);
    assert_eq!(calm.health(), Health::Healthy);
    let mid = compute_summary(&period(&["1000"], &["600"], "0"), &[]);
    assert_eq!(mid.health(), Health::Warning);
}

#[test]
fn indicators_without_income_are_zero() {
    let s = compute_summary(&period(&[], &["100"], "0"), &[]);
    assert!(s.commitment_rate().is_zero());
    assert!(s.variable_usage().is_zero());
    assert!(s.is_over_budget());
}
