//! Terminal renderer: styled flowing text, one layout per persona.

use colored::Colorize;

use crate::models::{IssueSeverity, JuniorReview, ReviewResult, RiskLevel, SeniorReview};
use crate::output::OutputRenderer;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, review: &ReviewResult) -> String {
        match review {
            ReviewResult::Senior(r) => render_senior(r),
            ReviewResult::Junior(r) => render_junior(r),
        }
    }
}

fn render_senior(review: &SeniorReview) -> String {
    let mut output = String::new();

    let risk = match review.risk_level {
        RiskLevel::High => "HIGH RISK".red().bold(),
        RiskLevel::Medium => "MEDIUM RISK".yellow().bold(),
        RiskLevel::Low => "LOW RISK".green().bold(),
    };
    output.push_str(&format!(
        " {}  {}  score {}\n",
        review.verdict.bold(),
        risk,
        review.score.to_string().bold()
    ));
    if let Some(ref focus) = review.focus {
        output.push_str(&format!(" {} {}\n", "focus:".dimmed(), focus));
    }
    output.push('\n');

    if review.issues.is_empty() {
        output.push_str(&format!("{}", "  ✔ No blocking issues.\n\n".green()));
    }

    let mut issues: Vec<_> = review.issues.iter().collect();
    issues.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.id.cmp(&b.id)));

    for issue in issues {
        let badge = match issue.severity {
            IssueSeverity::Critical => "✖ critical".red().bold(),
            IssueSeverity::Medium => "⚠ medium".yellow().bold(),
            IssueSeverity::Low => "ℹ low".blue().bold(),
        };
        output.push_str(&format!(" {} #{} {}\n", badge, issue.id, issue.title.bold()));
        output.push_str(&format!("   {} {}\n", "impact:".dimmed(), issue.impact));
        output.push_str(&format!("   {} {}\n\n", "trigger:".dimmed(), issue.trigger));
    }

    output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
    output.push_str(&format!(" {} {}\n", "tradeoff:".cyan(), review.tradeoff));
    output
}

fn render_junior(review: &JuniorReview) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        " {}  score {}\n",
        review.verdict.bold(),
        review.score.to_string().green().bold()
    ));
    output.push_str(&format!(" {}\n\n", review.summary));

    for tip in &review.tips {
        output.push_str(&format!(" {} {}\n", format!("{}.", tip.id).cyan().bold(), tip.title.bold()));
        output.push_str(&format!("   {}\n", tip.desc));
        output.push_str(&format!("   {} {}\n", "→".cyan(), tip.fix));
        if !tip.code_snippet.trim().is_empty() {
            for line in tip.code_snippet.lines() {
                output.push_str(&format!("     {}\n", line.dimmed()));
            }
        }
        output.push('\n');
    }

    output
}
