// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use moneyflow::ids::SequentialIds;
use moneyflow::models::{
    AccountingPeriod, Entry, FixedExpense, Template, TemplateEntry, TemplateFixedExpense,
    Transaction,
};
use moneyflow::{apply_template, compute_summary, daily_budget, remaining_open_days};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030i32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn tx_on(date: NaiveDate, amount: Decimal, n: usize) -> Transaction {
    Transaction {
        id: format!("t{}", n),
        period_id: "p".into(),
        amount,
        description: String::new(),
        date,
    }
}

fn arb_period() -> impl Strategy<Value = AccountingPeriod> {
    (
        prop::collection::vec(arb_amount(), 0..8),
        prop::collection::vec(arb_amount(), 0..8),
        0i64..=100i64,
    )
        .prop_map(|(entries, fixed, pct)| {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let mut p = AccountingPeriod::blank("p", "P", start, start + Duration::days(30));
            p.investment_percentage = Decimal::from(pct);
            p.entries = entries
                .into_iter()
                .enumerate()
                .map(|(i, amount)| Entry {
                    id: format!("e{}", i),
                    period_id: "p".into(),
                    name: String::new(),
                    amount,
                })
                .collect();
            p.fixed_expenses = fixed
                .into_iter()
                .enumerate()
                .map(|(i, amount)| FixedExpense {
                    id: format!("f{}", i),
                    period_id: "p".into(),
                    name: String::new(),
                    amount,
                })
                .collect();
            p
        })
}

proptest! {
    #[test]
    fn summary_identities_hold(
        period in arb_period(),
        amounts in prop::collection::vec(arb_amount(), 0..20),
    ) {
        let txs: Vec<_> = amounts
            .into_iter()
            .enumerate()
            .map(|(i, a)| tx_on(period.start_date, a, i))
            .collect();
        let s = compute_summary(&period, &txs);
        prop_assert_eq!(s.total_expenses, s.variable_expenses + s.fixed_expenses);
        prop_assert_eq!(s.balance, s.total_entries - s.total_expenses);
        prop_assert_eq!(
            s.current_variable_balance,
            s.projected_variable_balance - s.variable_expenses
        );
        prop_assert!(s.investment_amount >= Decimal::ZERO);
        prop_assert!(s.investment_amount <= s.total_entries);
    }

    #[test]
    fn no_transactions_means_every_day_is_open(today in arb_date(), span in -40i64..400i64) {
        let end = today + Duration::days(span);
        let expected = if today <= end { (end - today).num_days() as u32 + 1 } else { 0 };
        prop_assert_eq!(remaining_open_days(end, &[], today), expected);
    }

    #[test]
    fn empty_budget_splits_evenly(today in arb_date(), span in 0i64..400i64, balance in arb_amount()) {
        let end = today + Duration::days(span);
        let days = Decimal::from(span + 1);
        prop_assert_eq!(daily_budget(balance, end, &[], today), balance / days);
    }

    #[test]
    fn more_spending_days_never_reopen_days(
        today in arb_date(),
        span in 0i64..90i64,
        offsets in prop::collection::vec(0i64..90i64, 0..30),
    ) {
        let end = today + Duration::days(span);
        let mut txs = Vec::new();
        let mut last = remaining_open_days(end, &txs, today);
        for (i, off) in offsets.into_iter().enumerate() {
            txs.push(tx_on(today + Duration::days(off), Decimal::ONE, i));
            let now = remaining_open_days(end, &txs, today);
            prop_assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn closed_window_budget_is_zero(
        today in arb_date(),
        span in 0i64..20i64,
        balance in -1_000_000i64..1_000_000i64,
    ) {
        let end = today + Duration::days(span);
        let txs: Vec<_> = (0..=span)
            .map(|i| tx_on(today + Duration::days(i), Decimal::ONE, i as usize))
            .collect();
        prop_assert_eq!(remaining_open_days(end, &txs, today), 0);
        prop_assert!(daily_budget(Decimal::new(balance, 2), end, &txs, today).is_zero());
    }

    #[test]
    fn template_copies_get_fresh_ids(
        entry_amounts in prop::collection::vec(arb_amount(), 0..6),
        fixed_amounts in prop::collection::vec(arb_amount(), 0..6),
    ) {
        let template = Template {
            entries: entry_amounts
                .iter()
                .enumerate()
                .map(|(i, a)| TemplateEntry { id: format!("tpl-{}", i), name: format!("E{}", i), amount: *a })
                .collect(),
            fixed_expenses: fixed_amounts
                .iter()
                .enumerate()
                .map(|(i, a)| TemplateFixedExpense { id: format!("tpl-f{}", i), name: format!("F{}", i), amount: *a })
                .collect(),
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let blank = AccountingPeriod::blank("target", "March", start, start + Duration::days(30));
        let p = apply_template(&blank, &template, &mut SequentialIds::new("new"));

        prop_assert_eq!(p.entries.len(), template.entries.len());
        prop_assert_eq!(p.fixed_expenses.len(), template.fixed_expenses.len());
        let template_ids: HashSet<&str> = template
            .entries
            .iter()
            .map(|e| e.id.as_str())
            .chain(template.fixed_expenses.iter().map(|f| f.id.as_str()))
            .collect();
        let mut seen = HashSet::new();
        for (id, pid) in p
            .entries
            .iter()
            .map(|e| (&e.id, &e.period_id))
            .chain(p.fixed_expenses.iter().map(|f| (&f.id, &f.period_id)))
        {
            prop_assert!(!template_ids.contains(id.as_str()));
            prop_assert!(seen.insert(id.clone()));
            prop_assert_eq!(pid.as_str(), "target");
        }
        for (e, t) in p.entries.iter().zip(&template.entries) {
            prop_assert_eq!(e.amount, t.amount);
        }
    }
}
