//! Values derived from page data at render time.

use crate::consts::cli_consts::CREDIT_UTILIZATION_ALERT_PERCENT;
use crate::models::{CreditPoint, Due, Transaction};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CreditHealth {
    Healthy,
    /// Utilization at or above the alert threshold.
    Critical,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Utilization {
    pub percent: f64,
    pub health: CreditHealth,
}

impl Utilization {
    /// One decimal, e.g. `80.0%`.
    pub fn label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    /// Fill ratio for a gauge, clamped to `0..=1`.
    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }
}

/// Share of the credit limit in use. `None` without a positive limit.
pub fn credit_utilization(limit: f64, available: f64) -> Option<Utilization> {
    if limit.is_nan() || limit <= 0.0 || !available.is_finite() {
        return None;
    }
    let percent = (limit - available) * 100.0 / limit;
    let health = if percent >= CREDIT_UTILIZATION_ALERT_PERCENT {
        CreditHealth::Critical
    } else {
        CreditHealth::Healthy
    };
    Some(Utilization { percent, health })
}

/// Rupees with Indian digit grouping and two decimals: `₹12,34,567.50`.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, last_three) = whole.split_at(whole.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), last_three)
    };

    format!("{}₹{}.{}", if negative { "-" } else { "" }, grouped, fraction)
}

pub fn format_optional_inr(amount: Option<f64>) -> String {
    amount.map(format_inr).unwrap_or_else(|| "N/A".to_string())
}

/// Outstanding dues whose due date has passed, most overdue first.
pub fn payment_reminders(dues: &[Due], today: NaiveDate) -> Vec<&Due> {
    let mut overdue: Vec<&Due> = dues
        .iter()
        .filter(|d| d.is_outstanding() && d.days_past_due(today) > 0)
        .collect();
    overdue.sort_by_key(|d| std::cmp::Reverse(d.days_past_due(today)));
    overdue
}

/// Transaction volume per day, oldest first, for the credit history chart.
pub fn credit_history(transactions: &[Transaction]) -> Vec<CreditPoint> {
    let mut per_day: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions {
        if let Some(day) = tx.created_on() {
            *per_day.entry(day).or_insert(0.0) += tx.amount;
        }
    }
    per_day
        .into_iter()
        .map(|(date, amount)| CreditPoint {
            date: date.to_string(),
            amount,
        })
        .collect()
}
