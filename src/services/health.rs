//! Financial health scoring for the dashboard.
//!
//! # Scoring
//!
//! Three component scores (50, 75 or 100) are weighted into a total:
//!
//! | Component | Weight | 100 | 75 | 50 |
//! |---|---|---|---|---|
//! | Savings rate (savings / income) | 40% | ≥ 20% | ≥ 10% | below |
//! | Debt rate (debt / income) | 30% | < 20% | < 40% | above |
//! | Balance (income − expenses) | 30% | positive | zero | negative |
//!
//! With zero income the rates are undefined and both rate scores fall to 50.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::services::aggregate::Totals;

/// Inputs of the health report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinancialSnapshot {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    pub debt: Decimal,
}

impl FinancialSnapshot {
    /// Build a snapshot from transaction totals.
    ///
    /// Savings are the positive part of the balance; debt is the amount of
    /// expenses still unpaid.
    pub fn from_totals(totals: &Totals, outstanding: Decimal) -> Self {
        Self {
            income: totals.income,
            expenses: totals.expenses,
            savings: totals.balance.max(Decimal::ZERO),
            debt: outstanding,
        }
    }
}

/// Health band derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Excellent,
    Good,
    Moderate,
    Poor,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            HealthStatus::Excellent
        } else if score >= 75.0 {
            HealthStatus::Good
        } else if score >= 50.0 {
            HealthStatus::Moderate
        } else if score >= 30.0 {
            HealthStatus::Poor
        } else {
            HealthStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Moderate => "Moderate",
            HealthStatus::Poor => "Poor",
            HealthStatus::Critical => "Critical",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Keep it up and consider investing the surplus.",
            HealthStatus::Good => "Good work; paying down some debt would add a safety margin.",
            HealthStatus::Moderate => "Debt is high enough to limit how much you can save.",
            HealthStatus::Poor => "Review expenses, prioritise debt and save at least 10% of income.",
            HealthStatus::Critical => "Seek financial advice and adjust the budget urgently.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub savings_score: u32,
    pub debt_score: u32,
    pub balance_score: u32,
    pub total_score: f64,
    pub status: HealthStatus,
}

/// Percentage of `part` in `whole`; `None` when `whole` is not positive.
fn rate(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole <= Decimal::ZERO {
        return None;
    }
    Some(part / whole * Decimal::ONE_HUNDRED)
}

pub fn savings_score(savings: Decimal, income: Decimal) -> u32 {
    match rate(savings, income) {
        Some(r) if r >= Decimal::from(20) => 100,
        Some(r) if r >= Decimal::from(10) => 75,
        _ => 50,
    }
}

pub fn debt_score(debt: Decimal, income: Decimal) -> u32 {
    match rate(debt, income) {
        Some(r) if r < Decimal::from(20) => 100,
        Some(r) if r < Decimal::from(40) => 75,
        _ => 50,
    }
}

pub fn balance_score(income: Decimal, expenses: Decimal) -> u32 {
    let balance = income - expenses;
    if balance > Decimal::ZERO {
        100
    } else if balance.is_zero() {
        75
    } else {
        50
    }
}

pub fn report(snapshot: &FinancialSnapshot) -> HealthReport {
    let savings = savings_score(snapshot.savings, snapshot.income);
    let debt = debt_score(snapshot.debt, snapshot.income);
    let balance = balance_score(snapshot.income, snapshot.expenses);
    let total_score = f64::from(savings * 40 + debt * 30 + balance * 30) / 100.0;

    HealthReport {
        savings_score: savings,
        debt_score: debt,
        balance_score: balance,
        total_score,
        status: HealthStatus::from_score(total_score),
    }
}

/// Progress towards a goal in percent, capped at 100.
pub fn progress(current: Decimal, target: Decimal) -> f64 {
    if target <= Decimal::ZERO {
        return if current > Decimal::ZERO { 100.0 } else { 0.0 };
    }
    (current / target * Decimal::ONE_HUNDRED)
        .min(Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}
