//! Statement reconciliation.
//!
//! Expenses and incomes arrive from two independent fetches. They are
//! projected into one [`Transaction`] shape, merged into a single ledger
//! ordered most recent first, and aggregated into totals and per-category /
//! per-user balances.
//!
//! [`Statement`] owns the latest snapshot of both sides and rebuilds every
//! derived value whenever either side is replaced, so the order in which the
//! fetches resolve never matters.
use std::collections::BTreeMap;

use api_types::{expense::Expense, income::Income};
use serde::Serialize;

use crate::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Credit => "Crédito",
            Self::Debit => "Débito",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Income,
    Expense,
}

impl OperationKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

/// One ledger row, projected from either an [`Expense`] or an [`Income`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: i64,
    /// ISO `YYYY-MM-DD`, the text as sent when the API date is not ISO, or
    /// empty when the source carries no date.
    pub date: String,
    /// Always the stored (non-negative) amount; the sign lives in `direction`.
    pub value: Money,
    pub direction: Direction,
    pub operation_kind: OperationKind,
    pub detailed_description: String,
    pub category: Option<String>,
    pub user: Option<String>,
    pub category_kind: Option<String>,
}

impl Transaction {
    /// `+value` for credits, `-value` for debits.
    #[must_use]
    pub fn signed_value(&self) -> Money {
        match self.direction {
            Direction::Credit => self.value,
            Direction::Debit => -self.value,
        }
    }
}

impl From<&Expense> for Transaction {
    fn from(expense: &Expense) -> Self {
        let date = expense
            .payment_date
            .as_ref()
            .or(expense.due_date.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default();

        Self {
            id: expense.id,
            date,
            value: Money::from_wire(expense.value_minor),
            direction: Direction::Debit,
            operation_kind: OperationKind::Expense,
            detailed_description: expense.description.clone().unwrap_or_default(),
            category: expense.category.as_ref().map(|c| c.description.clone()),
            user: expense.user.as_ref().map(|u| u.name.clone()),
            category_kind: expense.category.as_ref().map(|c| c.kind.clone()),
        }
    }
}

impl From<&Income> for Transaction {
    /// Incomes have no description of their own; the row shows the category.
    fn from(income: &Income) -> Self {
        Self {
            id: income.id,
            date: income
                .entry_date
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            value: Money::from_wire(income.value_minor),
            direction: Direction::Credit,
            operation_kind: OperationKind::Income,
            detailed_description: income
                .category
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            category: income.category.as_ref().map(|c| c.description.clone()),
            user: income.user.as_ref().map(|u| u.name.clone()),
            category_kind: income.category.as_ref().map(|c| c.kind.clone()),
        }
    }
}

/// Merges both collections into one ledger, most recent first.
///
/// Dates compare as strings. The sort is stable, so rows sharing a date keep
/// the order they were produced in: expenses first, then incomes, each in
/// input order.
pub fn reconcile(expenses: &[Expense], incomes: &[Income]) -> Vec<Transaction> {
    let mut ledger: Vec<Transaction> = expenses
        .iter()
        .map(Transaction::from)
        .chain(incomes.iter().map(Transaction::from))
        .collect();

    ledger.sort_by(|a, b| b.date.cmp(&a.date));
    ledger
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total_expenses: Money,
    pub total_incomes: Money,
    pub balance: Money,
}

/// Sums each side straight from its source collection.
pub fn aggregate_totals(expenses: &[Expense], incomes: &[Income]) -> Totals {
    let total_expenses: Money = expenses
        .iter()
        .map(|e| Money::from_wire(e.value_minor))
        .sum();
    let total_incomes: Money = incomes
        .iter()
        .map(|i| Money::from_wire(i.value_minor))
        .sum();

    Totals {
        total_expenses,
        total_incomes,
        balance: total_incomes - total_expenses,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub by_category: BTreeMap<String, Money>,
    pub by_user: BTreeMap<String, Money>,
}

/// Signed balance per category and per user over the whole ledger.
///
/// Rows without a category (or user), or with an empty name, are left out of
/// that map only.
pub fn aggregate_by_dimension(transactions: &[Transaction]) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for tx in transactions {
        let value = tx.signed_value();

        if let Some(category) = tx.category.as_deref().filter(|c| !c.is_empty()) {
            *breakdown
                .by_category
                .entry(category.to_string())
                .or_default() += value;
        }

        if let Some(user) = tx.user.as_deref().filter(|u| !u.is_empty()) {
            *breakdown.by_user.entry(user.to_string()).or_default() += value;
        }
    }

    breakdown
}

/// Two-slot join behind the statement view.
///
/// Each slot starts empty and is replaced wholesale when its fetch resolves.
/// Replacing either slot rebuilds the ledger, totals and breakdown from the
/// latest copy of both.
#[derive(Clone, Debug, Default)]
pub struct Statement {
    expenses: Vec<Expense>,
    incomes: Vec<Income>,
    category_count: usize,
    user_count: usize,
    ledger: Vec<Transaction>,
    totals: Totals,
    breakdown: Breakdown,
}

impl Statement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        self.recombine();
    }

    pub fn set_incomes(&mut self, incomes: Vec<Income>) {
        self.incomes = incomes;
        self.recombine();
    }

    pub fn set_category_count(&mut self, count: usize) {
        self.category_count = count;
    }

    pub fn set_user_count(&mut self, count: usize) {
        self.user_count = count;
    }

    fn recombine(&mut self) {
        self.totals = aggregate_totals(&self.expenses, &self.incomes);
        self.ledger = reconcile(&self.expenses, &self.incomes);
        self.breakdown = aggregate_by_dimension(&self.ledger);
        tracing::debug!(
            expenses = self.expenses.len(),
            incomes = self.incomes.len(),
            "statement recombined"
        );
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn income_count(&self) -> usize {
        self.incomes.len()
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }
}

#[cfg(test)]
mod tests {
    use api_types::category::Category;

    use super::*;

    #[test]
    fn expense_date_falls_back_to_due_date_then_empty() {
        let due = "2024-02-01".parse().unwrap();
        let expense = Expense {
            id: 1,
            due_date: Some(due),
            ..Expense::default()
        };
        assert_eq!(Transaction::from(&expense).date, "2024-02-01");

        let undated = Expense {
            id: 2,
            ..Expense::default()
        };
        let tx = Transaction::from(&undated);
        assert_eq!(tx.date, "");
        assert_eq!(tx.value, Money::ZERO);
        assert_eq!(tx.detailed_description, "");
    }

    #[test]
    fn payment_date_wins_over_due_date() {
        let expense = Expense {
            id: 1,
            payment_date: Some("2024-01-05".parse().unwrap()),
            due_date: Some("2024-01-31".parse().unwrap()),
            ..Expense::default()
        };
        assert_eq!(Transaction::from(&expense).date, "2024-01-05");
    }

    #[test]
    fn datetimes_keep_their_day_and_odd_text_is_shown_as_sent() {
        let expense = Expense {
            id: 1,
            payment_date: Some("2024-01-11T08:00:00".parse().unwrap()),
            ..Expense::default()
        };
        assert_eq!(Transaction::from(&expense).date, "2024-01-11");

        let income = Income {
            id: 2,
            entry_date: Some("10/01/2024".parse().unwrap()),
            ..Income::default()
        };
        assert_eq!(Transaction::from(&income).date, "10/01/2024");
    }

    #[test]
    fn income_description_comes_from_category() {
        let income = Income {
            id: 4,
            value_minor: Some(500),
            category: Some(Category {
                id: None,
                description: "salario".to_string(),
                kind: "FIXA".to_string(),
            }),
            ..Income::default()
        };

        let tx = Transaction::from(&income);

        assert_eq!(tx.detailed_description, "salario");
        assert_eq!(tx.category.as_deref(), Some("salario"));
        assert_eq!(tx.category_kind.as_deref(), Some("FIXA"));
        assert_eq!(tx.direction, Direction::Credit);
        assert_eq!(tx.signed_value(), Money::new(500));
    }

    #[test]
    fn empty_category_name_is_left_out_of_breakdown() {
        let expense = Expense {
            id: 1,
            value_minor: Some(100),
            category: Some(Category::default()),
            ..Expense::default()
        };

        let breakdown = aggregate_by_dimension(&reconcile(&[expense], &[]));

        assert!(breakdown.by_category.is_empty());
    }

    #[test]
    fn statement_starts_empty() {
        let statement = Statement::new();
        assert!(statement.ledger().is_empty());
        assert_eq!(statement.totals(), Totals::default());
        assert_eq!(statement.breakdown(), &Breakdown::default());
    }
}
