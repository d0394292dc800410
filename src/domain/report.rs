//! Human-readable forecast message.

use chrono::NaiveDate;

use crate::domain::forecast::ForecastResult;

pub const DEFAULT_TITLE: &str = "Demand forecast";

/// Entries sorted by predicted quantity descending, ties by item name.
pub fn ranked_items(result: &ForecastResult) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = result.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

pub fn format_forecast_message(
    result: &ForecastResult,
    target_date: NaiveDate,
    title: &str,
) -> String {
    let mut message = format!(
        "{} for {} ({})\n",
        title,
        target_date.format("%Y-%m-%d"),
        target_date.format("%A")
    );

    let ranked = ranked_items(result);
    if ranked.is_empty() {
        message.push_str("  (no items)\n");
        return message;
    }

    for (item, quantity) in ranked {
        message.push_str(&format!("  {item}: {quantity}\n"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    #[test]
    fn ranks_descending_then_by_name() {
        let mut result = ForecastResult::new();
        result.insert("Soup".into(), 8);
        result.insert("Burger".into(), 12);
        result.insert("Salad".into(), 8);
        result.insert("Pie".into(), 0);

        let ranked = ranked_items(&result);
        assert_eq!(
            ranked,
            vec![("Burger", 12), ("Salad", 8), ("Soup", 8), ("Pie", 0)]
        );
    }

    #[test]
    fn message_layout() {
        let mut result = ForecastResult::new();
        result.insert("Salad".into(), 5);
        result.insert("Burger".into(), 12);

        let message = format_forecast_message(&result, target(), DEFAULT_TITLE);
        assert_eq!(
            message,
            "Demand forecast for 2024-01-08 (Monday)\n  Burger: 12\n  Salad: 5\n"
        );
    }

    #[test]
    fn message_for_empty_result() {
        let message = format_forecast_message(&ForecastResult::new(), target(), "Prep list");
        assert_eq!(message, "Prep list for 2024-01-08 (Monday)\n  (no items)\n");
    }
}
