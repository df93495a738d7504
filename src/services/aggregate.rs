//! Aggregate calculations over loaded lists.
//!
//! These run synchronously every time a controller replaces its list, so the
//! totals a page shows always belong to the list it shows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{ReferenceLists, Transaction, TransactionKind, WishlistItem};

/// Income, expenses and their difference for a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    /// `income - expenses`
    pub balance: Decimal,
}

/// Partition by kind and sum the amounts of each side.
pub fn totals(items: &[Transaction]) -> Totals {
    let (income, expenses) = items.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), tx| match tx.kind {
            TransactionKind::Income => (income + tx.amount, expenses),
            TransactionKind::Expense => (income, expenses + tx.amount),
        },
    );

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Expense amounts still waiting for a payment.
pub fn outstanding_expenses(items: &[Transaction]) -> Decimal {
    items
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense && !tx.is_paid())
        .map(|tx| tx.amount)
        .sum()
}

/// Expense total per category name, largest first.
///
/// Feeds the dashboard's spending-by-category breakdown. Unknown categories are
/// grouped under the placeholder label.
pub fn expenses_by_category(items: &[Transaction], refs: &ReferenceLists) -> Vec<(String, Decimal)> {
    let mut by_name: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in items.iter().filter(|tx| tx.kind == TransactionKind::Expense) {
        *by_name
            .entry(refs.category_name(tx.category_id).to_string())
            .or_default() += tx.amount;
    }

    let mut rows: Vec<(String, Decimal)> = by_name.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

/// Price totals across wishlist items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistTotals {
    /// Every item, bought or not
    pub total: Decimal,
    /// Items not yet bought
    pub remaining: Decimal,
    /// Total price per wishlist id
    pub per_list: BTreeMap<i64, Decimal>,
}

pub fn wishlist_totals(items: &[WishlistItem]) -> WishlistTotals {
    let mut totals = WishlistTotals::default();
    for item in items {
        totals.total += item.price;
        if !item.bought {
            totals.remaining += item.price;
        }
        *totals.per_list.entry(item.wishlist_id).or_default() += item.price;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn tx(id: i64, amount: i64, kind: TransactionKind, category_id: i64, paid: bool) -> Transaction {
        Transaction {
            id,
            name: format!("tx{}", id),
            description: String::new(),
            amount: Decimal::from(amount),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            payment_date: if paid { NaiveDate::from_ymd_opt(2024, 1, 2) } else { None },
            category_id,
            subcategory_id: 0,
            account_id: 1,
            user_id: 1,
            paid_amount: Decimal::from(amount),
            kind,
        }
    }

    #[test]
    fn income_minus_expenses() {
        let items = vec![
            tx(1, 100, TransactionKind::Income, 1, false),
            tx(2, 40, TransactionKind::Expense, 1, false),
        ];
        assert_eq!(
            totals(&items),
            Totals {
                income: Decimal::from(100),
                expenses: Decimal::from(40),
                balance: Decimal::from(60),
            }
        );
    }

    #[test]
    fn empty_list_totals_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn outstanding_counts_unpaid_expenses_only() {
        let items = vec![
            tx(1, 100, TransactionKind::Income, 1, false),
            tx(2, 40, TransactionKind::Expense, 1, true),
            tx(3, 25, TransactionKind::Expense, 1, false),
        ];
        assert_eq!(outstanding_expenses(&items), Decimal::from(25));
    }

    #[test]
    fn expenses_grouped_by_category_name() {
        let refs = ReferenceLists {
            categories: vec![
                Category { id: 1, name: "Home".to_string(), description: String::new() },
                Category { id: 2, name: "Food".to_string(), description: String::new() },
            ],
            ..ReferenceLists::default()
        };
        let items = vec![
            tx(1, 30, TransactionKind::Expense, 2, false),
            tx(2, 500, TransactionKind::Expense, 1, false),
            tx(3, 20, TransactionKind::Expense, 2, false),
            tx(4, 900, TransactionKind::Income, 1, false),
            tx(5, 5, TransactionKind::Expense, 7, false),
        ];

        let rows = expenses_by_category(&items, &refs);
        assert_eq!(
            rows,
            vec![
                ("Home".to_string(), Decimal::from(500)),
                ("Food".to_string(), Decimal::from(50)),
                ("N/A".to_string(), Decimal::from(5)),
            ]
        );
    }

    #[test]
    fn wishlist_totals_split_bought_items() {
        let item = |id: i64, list: i64, price: i64, bought: bool| WishlistItem {
            id,
            wishlist_id: list,
            name: format!("item{}", id),
            price: Decimal::from(price),
            link: String::new(),
            notes: String::new(),
            bought,
        };
        let totals = wishlist_totals(&[item(1, 1, 300, false), item(2, 1, 50, true), item(3, 2, 20, false)]);

        assert_eq!(totals.total, Decimal::from(370));
        assert_eq!(totals.remaining, Decimal::from(320));
        assert_eq!(totals.per_list.get(&1), Some(&Decimal::from(350)));
        assert_eq!(totals.per_list.get(&2), Some(&Decimal::from(20)));
    }
}
