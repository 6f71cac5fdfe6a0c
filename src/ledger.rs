//! Pure balance reconciliation over a customer's transaction history.
//!
//! Stored snapshots can drift, so they are never trusted for single-customer
//! views: every read that shows money or cylinder counts for one customer
//! folds the full transaction list through [`compute_stats`], and every
//! transaction write refreshes the stored snapshot from the same fold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionKind};

/// Derived totals for one customer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStats {
    /// Sum of `amount` across every transaction kind, payments included.
    /// Kept with that quirk because balances have always been reported this
    /// way; `balance_due` nets the payments back out.
    pub total_amount: Decimal,
    /// Sum of `amount` over sales only, i.e. what `total_amount` would be if
    /// payments did not inflate it.
    pub amount_billed: Decimal,
    /// Sum of `amount` over payments only.
    pub amount_paid: Decimal,
    /// `total_amount - amount_paid`. Because payments feed `total_amount`
    /// too, they cancel out of this figure rather than driving it negative.
    pub balance_due: Decimal,
    pub total_cylinders_issued: i64,
    pub total_cylinders_returned: i64,
    /// `issued - returned`. Negative when returns exceed issues.
    pub cylinders_out: i64,
}

/// Folds a customer's transactions into derived totals.
///
/// The fold only adds, so any permutation of the same transactions produces
/// identical stats. Missing numeric fields count as zero; negative results
/// (over-payment, over-return) are preserved, not clamped.
pub fn compute_stats(transactions: &[Transaction]) -> CustomerStats {
    let mut stats = CustomerStats::default();
    for tx in transactions {
        let amount = tx.amount.unwrap_or(Decimal::ZERO);
        stats.total_amount += amount;
        match tx.kind {
            TransactionKind::Sale => stats.amount_billed += amount,
            TransactionKind::Payment => stats.amount_paid += amount,
            TransactionKind::Return => {}
        }
        stats.total_cylinders_issued += tx.cylinders_issued.unwrap_or(0);
        stats.total_cylinders_returned += tx.cylinders_returned.unwrap_or(0);
    }
    stats.balance_due = stats.total_amount - stats.amount_paid;
    stats.cylinders_out = stats.total_cylinders_issued - stats.total_cylinders_returned;
    stats
}

/// One window of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Filters, then windows.
///
/// The page count reflects the filtered total, an empty result still reports
/// one (empty) page, and out-of-range page numbers clamp to the nearest valid
/// page instead of erroring. A `page_size` of zero is treated as one.
pub fn filter_and_paginate<T, F>(items: Vec<T>, predicate: F, page: u64, page_size: u64) -> Page<T>
where
    F: FnMut(&T) -> bool,
{
    let filtered: Vec<T> = items.into_iter().filter(predicate).collect();
    let page_size = page_size.max(1);
    let total_items = filtered.len() as u64;
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * page_size) as usize;
    let items = filtered
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();
    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(amount: i64, cylinders: i64) -> Transaction {
        Transaction::new(
            "c-1".to_string(),
            TransactionKind::Sale,
            Some(Decimal::new(amount, 0)),
            Some(cylinders),
            None,
            None,
        )
    }

    fn payment(amount: i64) -> Transaction {
        Transaction::new(
            "c-1".to_string(),
            TransactionKind::Payment,
            Some(Decimal::new(amount, 0)),
            None,
            None,
            None,
        )
    }

    fn cylinder_return(cylinders: i64) -> Transaction {
        Transaction::new(
            "c-1".to_string(),
            TransactionKind::Return,
            None,
            None,
            Some(cylinders),
            None,
        )
    }

    #[test]
    fn empty_history_yields_zero_stats() {
        assert_eq!(compute_stats(&[]), CustomerStats::default());
    }

    #[test]
    fn mixed_history_reconciles() {
        let txs = vec![sale(1200, 2), payment(800), cylinder_return(1)];
        let stats = compute_stats(&txs);
        assert_eq!(stats.total_amount, Decimal::new(2000, 0));
        assert_eq!(stats.amount_billed, Decimal::new(1200, 0));
        assert_eq!(stats.amount_paid, Decimal::new(800, 0));
        assert_eq!(stats.balance_due, Decimal::new(1200, 0));
        assert_eq!(stats.total_cylinders_issued, 2);
        assert_eq!(stats.total_cylinders_returned, 1);
        assert_eq!(stats.cylinders_out, 1);
    }

    #[test]
    fn missing_fields_count_as_zero() {
        let bare = |kind| Transaction::new("c-1".to_string(), kind, None, None, None, None);
        let txs = vec![
            bare(TransactionKind::Sale),
            bare(TransactionKind::Payment),
            bare(TransactionKind::Return),
        ];
        assert_eq!(compute_stats(&txs), CustomerStats::default());
    }

    #[test]
    fn payments_alone_balance_to_zero() {
        // Payments also feed total_amount, so a history with no sales nets
        // out to zero rather than going negative.
        let stats = compute_stats(&[payment(800)]);
        assert_eq!(stats.total_amount, Decimal::new(800, 0));
        assert_eq!(stats.amount_billed, Decimal::ZERO);
        assert_eq!(stats.amount_paid, Decimal::new(800, 0));
        assert_eq!(stats.balance_due, Decimal::ZERO);
    }

    #[test]
    fn negative_results_are_preserved_not_clamped() {
        // More returns than issues drives the cylinder count below zero.
        let txs = vec![sale(500, 1), payment(800), cylinder_return(3)];
        let stats = compute_stats(&txs);
        assert_eq!(stats.cylinders_out, -2);
        assert_eq!(stats.balance_due, Decimal::new(500, 0));

        // Hand-entered corrections can carry negative amounts; the fold
        // keeps the sign.
        let stats = compute_stats(&[sale(-100, 0)]);
        assert_eq!(stats.total_amount, Decimal::new(-100, 0));
        assert_eq!(stats.balance_due, Decimal::new(-100, 0));
    }

    #[test]
    fn stats_do_not_depend_on_order() {
        let txs = vec![sale(1200, 2), payment(800), cylinder_return(1)];
        let expected = compute_stats(&txs);
        let perms: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for perm in perms {
            let shuffled: Vec<Transaction> = perm.iter().map(|&i| txs[i].clone()).collect();
            assert_eq!(compute_stats(&shuffled), expected);
        }
    }

    #[test]
    fn recomputing_changes_nothing() {
        let txs = vec![sale(1200, 2), payment(800)];
        assert_eq!(compute_stats(&txs), compute_stats(&txs));
    }

    #[test]
    fn windows_split_on_page_size() {
        let items: Vec<i32> = (1..=23).collect();
        let first = filter_and_paginate(items.clone(), |_| true, 1, 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 23);
        assert_eq!(first.items, (1..=10).collect::<Vec<i32>>());

        let last = filter_and_paginate(items, |_| true, 3, 10);
        assert_eq!(last.items, vec![21, 22, 23]);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let items: Vec<i32> = (1..=23).collect();
        let past_end = filter_and_paginate(items.clone(), |_| true, 5, 10);
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.items, vec![21, 22, 23]);

        let before_start = filter_and_paginate(items, |_| true, 0, 10);
        assert_eq!(before_start.page, 1);
        assert_eq!(before_start.items[0], 1);
    }

    #[test]
    fn empty_results_still_have_one_page() {
        let page = filter_and_paginate(vec![1, 2, 3], |n| *n > 10, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn zero_page_size_behaves_as_one() {
        let page = filter_and_paginate(vec![1, 2, 3], |_| true, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![2]);
    }

    #[test]
    fn filter_runs_before_windowing() {
        let items: Vec<i32> = (1..=30).collect();
        let page = filter_and_paginate(items, |n| n % 2 == 0, 2, 10);
        assert_eq!(page.total_items, 15);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec![22, 24, 26, 28, 30]);
    }
}
