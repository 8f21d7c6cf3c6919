use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{Breakdown, Category, ScoreResult};
use crate::store::Scorecard;

const LABEL_WIDTH: usize = 22;
const POINTS_WIDTH: usize = 7;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points without a trailing ".0": 12, 6.5, 6.67
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        let formatted = format!("{:.2}", points);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn breakdown_lines(breakdown: &Breakdown, total: f64, use_colors: bool) -> Vec<String> {
    let mut lines: Vec<String> = breakdown
        .entries()
        .iter()
        .map(|(category, points)| {
            let label = format!("{:<width$}", category.label(), width = LABEL_WIDTH);
            let value = format!("{:>width$}", format_points(*points), width = POINTS_WIDTH);
            if use_colors && *points == 0.0 {
                format!("{}{}", label, value.red())
            } else {
                format!("{}{}", label, value)
            }
        })
        .collect();

    let label = format!("{:<width$}", "Total", width = LABEL_WIDTH);
    let value = format!("{:>width$}", format_points(total), width = POINTS_WIDTH);
    if use_colors {
        lines.push(format!("{}{}", label.bold(), value.bold().green()));
    } else {
        lines.push(format!("{}{}", label, value));
    }
    lines
}

/// Format a score result as one line per category followed by the total
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    breakdown_lines(result.breakdown(), result.total(), use_colors).join("\n")
}

/// Format a score result as a single tab-separated row, categories in order
/// then total (no headers, no colors)
pub fn format_breakdown_tsv(result: &ScoreResult) -> String {
    let mut fields: Vec<String> = result
        .breakdown()
        .entries()
        .iter()
        .map(|(_, points)| format_points(*points))
        .collect();
    fields.push(format_points(result.total()));
    fields.join("\t")
}

/// Format a stored scorecard with its header and full breakdown
pub fn format_scorecard_detail(card: &Scorecard, use_colors: bool) -> String {
    let header = if use_colors {
        format!(
            "#{} {}\n  Mall: {}\n  Month: {}\n  Variant: {}\n  Created: {}",
            card.id,
            card.manager_name.bold(),
            card.mall_name.cyan(),
            card.month.yellow(),
            card.variant,
            card.created_at.format("%Y-%m-%d %H:%M UTC")
        )
    } else {
        format!(
            "#{} {}\n  Mall: {}\n  Month: {}\n  Variant: {}\n  Created: {}",
            card.id,
            card.manager_name,
            card.mall_name,
            card.month,
            card.variant,
            card.created_at.format("%Y-%m-%d %H:%M UTC")
        )
    };

    let body = breakdown_lines(&card.breakdown, card.total_score, use_colors)
        .into_iter()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", header, body)
}

/// Format scorecards as a table with columns: Id, Total, Month, Manager, Mall
pub fn format_scorecard_table(cards: &[&Scorecard], use_colors: bool) -> String {
    if cards.is_empty() {
        return "No scorecards found.".to_string();
    }

    cards
        .iter()
        .map(|card| {
            let id = format!("{:>3}.", card.id);
            let total = format!("{:>width$}", format_points(card.total_score), width = POINTS_WIDTH);
            if use_colors {
                format!(
                    "{} {}  {}  {}  {}",
                    id.dimmed(),
                    total.bold(),
                    card.month.yellow(),
                    card.manager_name,
                    card.mall_name.cyan()
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}",
                    id, total, card.month, card.manager_name, card.mall_name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scorecards as tab-separated values for spreadsheets and scripts.
/// Header row first, then one row per scorecard with every category.
pub fn format_scorecard_tsv(cards: &[&Scorecard]) -> String {
    let mut header = vec!["id", "manager", "mall", "month", "variant"];
    header.extend(Category::ALL.iter().map(|c| c.label()));
    header.push("total");

    let mut lines = vec![header.join("\t")];
    for card in cards {
        let mut fields = vec![
            card.id.to_string(),
            card.manager_name.clone(),
            card.mall_name.clone(),
            card.month.clone(),
            card.variant.to_string(),
        ];
        fields.extend(
            card.breakdown
                .entries()
                .iter()
                .map(|(_, points)| format_points(*points)),
        );
        fields.push(format_points(card.total_score));
        lines.push(fields.join("\t"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::fixtures::perfect_two_outlet;
    use crate::scoring::{compute, VariantConfig};
    use crate::store::types::fixtures::scorecard;

    fn sample_result() -> ScoreResult {
        compute(&perfect_two_outlet(), &VariantConfig::two_outlet()).unwrap()
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(12.0), "12");
        assert_eq!(format_points(6.5), "6.5");
        assert_eq!(format_points(26.0 / 3.0), "8.67");
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(6.999), "7");
    }

    #[test]
    fn test_format_breakdown() {
        let output = format_breakdown(&sample_result(), false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("Google Rating"));
        assert!(lines[0].ends_with("10"));
        assert!(lines[4].starts_with("Kitchen Prep"));
        assert!(lines[4].ends_with("12"));
        assert!(lines[8].starts_with("Total"));
        assert!(lines[8].ends_with("104"));
    }

    #[test]
    fn test_format_breakdown_tsv() {
        assert_eq!(
            format_breakdown_tsv(&sample_result()),
            "10\t10\t20\t10\t12\t10\t20\t12\t104"
        );
    }

    #[test]
    fn test_format_scorecard_detail() {
        let mut card = scorecard("Asha", "January 2026");
        card.id = 4;
        let output = format_scorecard_detail(&card, false);
        assert!(output.starts_with("#4 Asha"));
        assert!(output.contains("Mall: Phoenix Mall"));
        assert!(output.contains("Variant: two-outlet"));
        assert!(output.contains("  Outlet Audit"));
    }

    #[test]
    fn test_format_scorecard_table_empty() {
        assert_eq!(format_scorecard_table(&[], false), "No scorecards found.");
    }

    #[test]
    fn test_format_scorecard_table() {
        let mut card = scorecard("Asha", "January 2026");
        card.id = 1;
        let output = format_scorecard_table(&[&card], false);
        assert_eq!(output, "  1.     104  January 2026  Asha  Phoenix Mall");
    }

    #[test]
    fn test_format_scorecard_tsv() {
        let mut card = scorecard("Asha", "January 2026");
        card.id = 2;
        let output = format_scorecard_tsv(&[&card]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id\tmanager\tmall\tmonth\tvariant\tGoogle Rating"));
        assert!(lines[0].ends_with("\ttotal"));
        assert_eq!(
            lines[1],
            "2\tAsha\tPhoenix Mall\tJanuary 2026\ttwo-outlet\t10\t10\t20\t10\t12\t10\t20\t12\t104"
        );
    }
}
