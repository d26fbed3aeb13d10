use std::collections::HashMap;
use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{PackageVerdict, VerdictStatus};
use crate::rules::RuleSet;

/// Visible width of the text inside the summary box.
const BOX_WIDTH: usize = 49;

/// Render a colored terminal report.
pub fn render(results: &[PackageVerdict], source: &Path, verbose: bool, quiet: bool) {
    let total = results.len();
    let allowed = count(results, VerdictStatus::Allowed);
    let review = count(results, VerdictStatus::NeedsReview);
    let rejected = count(results, VerdictStatus::Rejected);

    if quiet {
        println!("{}", summary_line(total, allowed, review, rejected));
        return;
    }

    println!(
        "\n {} v{}",
        "license-rules".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Packages: {}\n", source.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {} │", fit("SUMMARY", BOX_WIDTH).bold());
    println!(
        " │  {} │",
        fit(&format!("Total packages     : {}", total), BOX_WIDTH)
    );
    println!(
        " │  {} │",
        status_row("✓  Allowed      ", allowed, &top_rules(results, VerdictStatus::Allowed)).green()
    );
    println!(
        " │  {} │",
        status_row("⚠  Needs review ", review, &top_rules(results, VerdictStatus::NeedsReview))
            .yellow()
    );
    println!(
        " │  {} │",
        status_row("✗  Rejected     ", rejected, &top_rules(results, VerdictStatus::Rejected)).red()
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if rejected > 0 {
        println!(" {} Packages not allowed:\n", "[REJECTED]".red().bold());
        render_table(results, VerdictStatus::Rejected);
        println!();
    }

    if review > 0 {
        println!(" {} Packages requiring review:\n", "[REVIEW]".yellow().bold());
        render_table(results, VerdictStatus::NeedsReview);
        println!();
    }

    if verbose && allowed > 0 {
        println!(" {} Allowed packages:\n", "[ALLOWED]".green().bold());
        render_table(results, VerdictStatus::Allowed);
        println!();
    }
}

/// Print the effective rule set in evaluation order.
pub fn render_rules(rule_set: &RuleSet) {
    println!(
        "\n {} ({} rules, {})\n",
        "Effective rule set".bold(),
        rule_set.len(),
        rule_set.precedence()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Rule").add_attribute(Attribute::Bold),
            Cell::new("Matches").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for (index, rule) in rule_set.rules().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(rule.name()),
            Cell::new(rule.describe_predicate()),
            Cell::new(rule.describe_action()),
        ]);
    }

    println!("{}", table);
}

fn render_table(results: &[PackageVerdict], status: VerdictStatus) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Declared licenses").add_attribute(Attribute::Bold),
            Cell::new("Rule").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
            Cell::new("Message").add_attribute(Attribute::Bold),
        ]);

    for result in results.iter().filter(|r| r.status == status) {
        let licenses = if result.declared_licenses.is_empty() {
            "(none)".to_string()
        } else {
            result
                .declared_licenses
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let (verdict_str, verdict_color) = match result.status {
            VerdictStatus::Allowed => ("✓ allowed", Color::Green),
            VerdictStatus::NeedsReview => ("⚠ review", Color::Yellow),
            VerdictStatus::Rejected => ("✗ rejected", Color::Red),
        };

        table.add_row(vec![
            Cell::new(&result.id),
            Cell::new(licenses),
            Cell::new(&result.rule).fg(Color::DarkGrey),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(result.message.as_deref().unwrap_or("")),
        ]);
    }

    println!("{}", table);
}

fn count(results: &[PackageVerdict], status: VerdictStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}

fn summary_line(total: usize, allowed: usize, review: usize, rejected: usize) -> String {
    format!(
        "Total: {}  Allowed: {}  Review: {}  Rejected: {}",
        total,
        allowed.to_string().green(),
        review.to_string().yellow(),
        rejected.to_string().red(),
    )
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return format!("{text:<width$}");
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// A summary box row; long rule summaries are cut to keep the border intact.
fn status_row(label: &str, count: usize, rules: &str) -> String {
    fit(&format!("{}: {:>4}  {}", label, count, rules), BOX_WIDTH)
}

/// The three rules that decided the most packages with `status`.
fn top_rules(results: &[PackageVerdict], status: VerdictStatus) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for result in results.iter().filter(|r| r.status == status) {
        *counts.entry(result.rule.as_str()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(rule, cnt)| format!("{} ({})", rule, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, rule: &str, status: VerdictStatus) -> PackageVerdict {
        PackageVerdict {
            id: id.to_string(),
            declared_licenses: Default::default(),
            rule: rule.to_string(),
            status,
            message: None,
        }
    }

    #[test]
    fn test_top_rules_orders_by_count() {
        let results = vec![
            result("a", "Flag copyleft licenses for review", VerdictStatus::NeedsReview),
            result("b", "Default - needs review", VerdictStatus::NeedsReview),
            result("c", "Default - needs review", VerdictStatus::NeedsReview),
            result("d", "Allow permissive licenses", VerdictStatus::Allowed),
        ];
        assert_eq!(
            top_rules(&results, VerdictStatus::NeedsReview),
            "[Default - needs review (2), Flag copyleft licenses for review (1)]"
        );
        assert_eq!(top_rules(&results, VerdictStatus::Rejected), "");
    }

    #[test]
    fn test_status_row_keeps_box_width() {
        let results: Vec<PackageVerdict> = (0..12)
            .map(|i| result(&i.to_string(), "Allow permissive licenses", VerdictStatus::Allowed))
            .collect();
        let row = status_row("✓  Allowed      ", 12, &top_rules(&results, VerdictStatus::Allowed));
        assert_eq!(row.chars().count(), BOX_WIDTH);
        assert!(row.ends_with('…'));

        let short = status_row("✗  Rejected     ", 0, "");
        assert_eq!(short.chars().count(), BOX_WIDTH);
        assert!(short.starts_with("✗  Rejected     :    0"));
    }

    #[test]
    fn test_count_by_status() {
        let results = vec![
            result("a", "x", VerdictStatus::Rejected),
            result("b", "y", VerdictStatus::Allowed),
        ];
        assert_eq!(count(&results, VerdictStatus::Rejected), 1);
        assert_eq!(count(&results, VerdictStatus::NeedsReview), 0);
    }
}
