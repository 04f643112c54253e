//! Expenses service
//!
//! Expense CRUD plus the derived views the dashboard renders: all-time
//! and monthly totals, the diluted daily average, and per-category
//! breakdowns. The viewed month and the active category filter are
//! explicit parameters, not shared state.

use crate::analytics;
use crate::config::collections;
use crate::error::Result;
use crate::models::{Expense, ExpenseCategory, NewExpense};
use crate::store::Store;
use serde::Serialize;

/// Headline numbers for the expenses page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseOverview {
    pub total: f64,
    pub monthly: f64,
    pub daily_average: f64,
}

#[derive(Clone)]
pub struct ExpensesService {
    store: Store,
}

impl ExpensesService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add_expense(&self, new: NewExpense) -> Result<Expense> {
        new.validate()?;

        let id = self.store.next_id(collections::EXPENSES).await?;
        let expense = Expense {
            id,
            description: new.description,
            amount: new.amount,
            category: new.category,
            date: new.date,
        };

        let stored = expense.clone();
        self.store
            .mutate::<Expense, _, _>(collections::EXPENSES, move |expenses| expenses.push(stored))
            .await?;

        tracing::info!("Created expense {}: {}", expense.id, expense.description);
        Ok(expense)
    }

    /// Replace an expense, keyed by id. Unknown ids are a silent no-op.
    pub async fn update_expense(&self, id: u64, new: NewExpense) -> Result<Option<Expense>> {
        new.validate()?;

        self.store
            .mutate::<Expense, _, _>(collections::EXPENSES, move |expenses| {
                let expense = expenses.iter_mut().find(|e| e.id == id)?;
                *expense = Expense {
                    id,
                    description: new.description,
                    amount: new.amount,
                    category: new.category,
                    date: new.date,
                };
                Some(expense.clone())
            })
            .await
    }

    pub async fn delete_expense(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Expense, _, _>(collections::EXPENSES, move |expenses| {
                expenses.retain(|e| e.id != id);
            })
            .await?;

        tracing::info!("Deleted expense {}", id);
        Ok(())
    }

    /// All expenses, optionally narrowed to one category.
    pub async fn list_expenses(&self, category: Option<ExpenseCategory>) -> Result<Vec<Expense>> {
        let expenses: Vec<Expense> = self.store.load_or_default(collections::EXPENSES).await?;
        Ok(match category {
            None => expenses,
            Some(c) => expenses.into_iter().filter(|e| e.category == c).collect(),
        })
    }

    /// All-time total, total for the given month, and that month's
    /// daily average over the full month length.
    pub async fn overview(&self, year: i32, month: u32) -> Result<ExpenseOverview> {
        let expenses = self.list_expenses(None).await?;

        Ok(ExpenseOverview {
            total: analytics::sum(&expenses, |e| e.amount),
            monthly: analytics::monthly_total(&expenses, |e| e.date, |e| e.amount, year, month),
            daily_average: analytics::daily_average(
                &expenses,
                |e| e.date,
                |e| e.amount,
                year,
                month,
            ),
        })
    }

    /// Summed amount per category, categories in first-seen order.
    pub async fn category_totals(&self) -> Result<Vec<(ExpenseCategory, f64)>> {
        let expenses = self.list_expenses(None).await?;
        Ok(analytics::group_totals(&expenses, |e| e.category, |e| e.amount))
    }

    /// Case-insensitive search over description and category name.
    pub async fn search_expenses(&self, query: &str) -> Result<Vec<Expense>> {
        let expenses = self.list_expenses(None).await?;
        let hits = analytics::filter_by_text(&expenses, query, |e| {
            vec![e.description.clone(), e.category.as_str().to_string()]
        });
        Ok(hits.into_iter().cloned().collect())
    }
}
