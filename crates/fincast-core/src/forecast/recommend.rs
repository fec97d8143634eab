//! Budget-compliance recommendations
//!
//! Two named modes that deliberately stay separate (different input and
//! output shapes):
//!
//! - [`BudgetRecommender`] - the primary mode: per-category budgets checked
//!   against current-month spending, plus a month-over-month rise advisory.
//! - [`SurplusRecommender`] - the alternate mode: one aggregate monthly
//!   budget checked against total spending.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::aggregate::month_key;
use crate::models::{
    AdviceKind, Budget, MonthBucket, Priority, Recommendation, SurplusAdvice, Transaction,
    TransactionType,
};

/// Category label used for cross-category advisories
pub const GENERAL_CATEGORY: &str = "general";

/// Month-over-month rise that triggers the general advisory (10%)
const RISE_THRESHOLD: f64 = 1.1;

/// Fixed text of the general month-over-month advisory
const RISE_MESSAGE: &str =
    "Spending is up more than 10% over last month; review recent purchases";

/// Per-category budget recommendations (primary mode)
pub struct BudgetRecommender;

impl BudgetRecommender {
    /// Compare current-month spending against each budget, then against the
    /// previous month
    ///
    /// `today` is the caller-supplied "now" reference; the current month key
    /// is derived from it. Output order: one High recommendation per
    /// exceeded budget in budget-list order, then at most one Medium
    /// general recommendation.
    pub fn recommend(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        monthly: &BTreeMap<String, MonthBucket>,
        today: NaiveDate,
    ) -> Vec<Recommendation> {
        let current_month = month_key(today);
        let mut recommendations = Vec::new();

        for budget in budgets {
            let spent: f64 = transactions
                .iter()
                .filter(|t| {
                    t.tx_type == TransactionType::Expense
                        && t.category == budget.category
                        && month_key(t.date) == current_month
                })
                .map(|t| t.amount)
                .sum();

            if spent > budget.amount {
                recommendations.push(Recommendation {
                    category: budget.category.clone(),
                    message: format!(
                        "Reduce spending in {} by ${:.2}",
                        budget.category,
                        spent - budget.amount
                    ),
                    priority: Priority::High,
                });
            }
        }

        // General advisory: current month vs the chronologically preceding
        // month present in the data
        let current_spending = monthly
            .get(&current_month)
            .map(|b| b.expenses)
            .unwrap_or(0.0);
        let previous = monthly
            .range::<String, _>(..&current_month)
            .next_back()
            .map(|(_, b)| b.expenses);

        if let Some(prev_spending) = previous {
            if current_spending > prev_spending * RISE_THRESHOLD {
                recommendations.push(Recommendation {
                    category: GENERAL_CATEGORY.to_string(),
                    message: RISE_MESSAGE.to_string(),
                    priority: Priority::Medium,
                });
            }
        }

        recommendations
    }
}

/// Aggregate-budget recommendations (alternate mode)
///
/// Works on one monthly budget figure instead of a per-category budget list;
/// the caller supplies the transaction snapshot for the period under review
/// (typically the current month).
pub struct SurplusRecommender {
    pub monthly_budget: f64,
}

impl SurplusRecommender {
    pub fn new(monthly_budget: f64) -> Self {
        Self { monthly_budget }
    }

    /// Positive surplus: suggest a 70/30 savings split. Otherwise: warn,
    /// naming the heaviest spending category and the overspend amount.
    pub fn recommend(&self, transactions: &[Transaction]) -> SurplusAdvice {
        let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
        let mut total_expenses = 0.0;

        for tx in transactions {
            if tx.tx_type == TransactionType::Expense {
                total_expenses += tx.amount;
                *by_category.entry(tx.category.as_str()).or_default() += tx.amount;
            }
        }

        let surplus = self.monthly_budget - total_expenses;

        if surplus > 0.0 {
            return SurplusAdvice {
                kind: AdviceKind::Positive,
                category: None,
                message: format!(
                    "You are ${:.2} under budget. Consider saving ${:.2} (70%) and keeping ${:.2} for discretionary spending",
                    surplus,
                    surplus * 0.7,
                    surplus * 0.3
                ),
            };
        }

        // Ties resolve to the first key in iteration order (sorted map, so
        // the alphabetically first category)
        let top = by_category
            .iter()
            .fold(None::<(&str, f64)>, |best, (category, spent)| match best {
                Some((_, best_spent)) if *spent <= best_spent => best,
                _ => Some((*category, *spent)),
            });

        match top {
            Some((category, spent)) => SurplusAdvice {
                kind: AdviceKind::Warning,
                category: Some(category.to_string()),
                message: format!(
                    "Over budget by ${:.2}; highest spending is {} at ${:.2}",
                    surplus.abs(),
                    category,
                    spent
                ),
            },
            None => SurplusAdvice {
                kind: AdviceKind::Warning,
                category: None,
                message: format!("Over budget by ${:.2}", surplus.abs()),
            },
        }
    }
}
