//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};

impl Database {
    /// Create or replace the budget for a category (category is the natural key)
    pub fn upsert_budget(&self, budget: &NewBudget) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO budgets (category, amount, budget_type)
            VALUES (?, ?, ?)
            ON CONFLICT(category) DO UPDATE SET
                amount = excluded.amount,
                budget_type = excluded.budget_type
            "#,
            params![
                budget.category,
                budget.amount,
                budget.budget_type.as_str()
            ],
        )?;

        let id = conn.query_row(
            "SELECT id FROM budgets WHERE category = ?",
            params![budget.category],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// List all budgets, in creation order
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, category, amount, budget_type, created_at
            FROM budgets
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], Self::map_budget_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Get a single budget by ID
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;

        conn.query_row(
            "SELECT id, category, amount, budget_type, created_at FROM budgets WHERE id = ?",
            params![id],
            Self::map_budget_row,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Delete a budget; returns true if a row was removed
    pub fn delete_budget(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Total number of stored budgets
    pub fn budget_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_budget_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Budget> {
        let budget_type: String = row.get(3)?;
        let created_at: String = row.get(4)?;

        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: row.get(2)?,
            budget_type: budget_type.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(Error::InvalidData(e)),
                )
            })?,
            created_at: parse_datetime(&created_at),
        })
    }
}
