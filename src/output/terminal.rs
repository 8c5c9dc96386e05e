// Colored terminal output for scan reports, lookups, and status.
//
// This module handles all terminal-specific formatting. The main.rs
// display paths delegate here; `--json` bypasses it entirely.

use colored::Colorize;

use crate::detect::ai_text::AiLabel;
use crate::graph::{GraphStats, NetworkRiskLabel, RiskScoreResult};
use crate::pipeline::ScanReport;
use crate::scoring::RiskLevel;

/// Display a full scan report.
pub fn display_report(report: &ScanReport) {
    println!(
        "\n{}",
        format!("=== Scan result: {} ===", report.input_value).bold()
    );
    println!();
    println!(
        "  Verdict: {}  (weight {:.0})",
        colorize_risk_level(report.risk_level),
        report.total_weight
    );
    println!();

    println!("  {}", "Why:".dimmed());
    for bullet in &report.why_bullets {
        println!("    - {bullet}");
    }

    if let Some(ai) = &report.ai_detection {
        if ai.label != AiLabel::TooShort {
            println!();
            println!(
                "  AI authorship: {} ({:.0}% likelihood)",
                colorize_ai_label(ai.label),
                ai.ai_probability * 100.0
            );
        }
    }

    if let Some(graph) = &report.graph {
        println!();
        println!(
            "  Network risk: {} (score {:.3}, {} entities tracked, {} new edges)",
            colorize_network_label(graph.network_risk_label),
            graph.network_risk_score,
            graph.entity_scores.len(),
            graph.edges_created
        );
    }

    println!();
}

/// Display the network risk for one looked-up entity.
pub fn display_lookup(value: &str, score: &RiskScoreResult) {
    println!("\n{}", format!("=== Network risk: {value} ===").bold());
    println!();
    println!(
        "  Risk: {} (score {:.3})",
        colorize_network_label(score.label),
        score.score
    );
    println!("  Direct connections: {}", score.degree_connections);
    println!("  Confirmed-scam neighbors: {}", score.scam_neighbor_count);
    println!("  Second-degree scams: {}", score.second_degree_scams);
    println!();
}

/// Display database statistics for the `status` command.
pub fn display_status(db_path: &str, stats: &GraphStats) {
    println!("\n{}", "=== Status ===".bold());
    println!();
    println!("  Database: {db_path}");
    println!("  Entities tracked: {}", stats.entity_count);
    println!("  Edges: {}", stats.edge_count);
    if stats.confirmed_scam_count > 0 {
        println!(
            "  Confirmed scams: {}",
            stats.confirmed_scam_count.to_string().red().bold()
        );
    } else {
        println!("  Confirmed scams: 0");
    }
    println!("  Cached risk scores: {}", stats.cached_score_count);
    println!();
}

fn colorize_risk_level(level: RiskLevel) -> String {
    match level {
        RiskLevel::Safe => level.as_str().green().to_string(),
        RiskLevel::Suspicious => level.as_str().yellow().to_string(),
        RiskLevel::HighRisk => level.as_str().bright_red().to_string(),
        RiskLevel::VeryLikelyScam => level.as_str().red().bold().to_string(),
    }
}

fn colorize_network_label(label: NetworkRiskLabel) -> String {
    match label {
        NetworkRiskLabel::Low => label.as_str().green().to_string(),
        NetworkRiskLabel::Medium => label.as_str().yellow().to_string(),
        NetworkRiskLabel::High => label.as_str().red().bold().to_string(),
    }
}

fn colorize_ai_label(label: AiLabel) -> String {
    match label {
        AiLabel::LikelyHuman => "likely human".green().to_string(),
        AiLabel::Uncertain => "uncertain".yellow().to_string(),
        AiLabel::AiGenerated => "likely AI-generated".red().to_string(),
        AiLabel::TooShort => "too short to tell".normal().to_string(),
    }
}
