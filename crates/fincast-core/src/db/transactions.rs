//! Transaction operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionFilter};

impl Database {
    /// Record a transaction, returning its new ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (tx_type, amount, category, description, date)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                tx.tx_type.as_str(),
                tx.amount,
                tx.category,
                tx.description,
                tx.date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List transactions matching a filter
    ///
    /// Sort direction is the caller's choice per use site: descending for
    /// general listings, ascending when feeding the backtester.
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = filter.start_date {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.to_string()));
        }

        if let Some(end) = filter.end_date {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(end.to_string()));
        }

        if let Some(ref category) = filter.category {
            conditions.push("category = ?".to_string());
            params.push(Box::new(category.clone()));
        }

        if let Some(tx_type) = filter.tx_type {
            conditions.push("tx_type = ?".to_string());
            params.push(Box::new(tx_type.as_str()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match filter.limit {
            Some(limit) => format!("LIMIT {}", limit),
            None => String::new(),
        };

        let sql = format!(
            r#"
            SELECT id, tx_type, amount, category, description, date, created_at
            FROM transactions
            {}
            ORDER BY date {}, id {}
            {}
            "#,
            where_clause,
            filter.sort.as_sql(),
            filter.sort.as_sql(),
            limit_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt.query_map(param_refs.as_slice(), Self::map_transaction_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        use rusqlite::OptionalExtension;
        let conn = self.conn()?;

        conn.query_row(
            r#"
            SELECT id, tx_type, amount, category, description, date, created_at
            FROM transactions WHERE id = ?
            "#,
            params![id],
            Self::map_transaction_row,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Delete a transaction; returns true if a row was removed
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(affected > 0)
    }

    /// Total number of recorded transactions
    pub fn transaction_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_transaction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
        let tx_type: String = row.get(1)?;
        let date: String = row.get(5)?;
        let created_at: String = row.get(6)?;

        Ok(Transaction {
            id: row.get(0)?,
            tx_type: tx_type.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(Error::InvalidData(e)),
                )
            })?,
            amount: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            date: chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?,
            created_at: parse_datetime(&created_at),
        })
    }
}
