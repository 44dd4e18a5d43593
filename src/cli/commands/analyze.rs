//! Analyze Command
//!
//! Full document analysis: validation, extraction, model analysis (chunked
//! for long documents), normalization. Analysis-stage failures resolve to
//! the rule-based fallback, so this command only errors on input problems
//! or a missing API key.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::types::{AnalysisReport, Result};

pub async fn run(file: &Path, language: Option<&str>, json: bool) -> Result<()> {
    let ctx = CommandContext::load()?;
    let pipeline = ctx.pipeline()?;
    let language = ctx.language(language);

    let report = pipeline.analyze_file(file, &language).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &AnalysisReport) {
    let out = Output::new();

    out.header("Document Analysis");
    out.meta(&format!("File:      {}", report.file_name));
    out.meta(&format!("Language:  {}", report.language));
    out.meta(&format!("Characters: {}", report.text_length));
    if report.chunked {
        out.meta(&format!("Chunks:    {}", report.chunk_count));
    }
    if report.fallback {
        out.warning("Model analysis was unavailable; showing rule-based results");
    }

    out.section("Summary (English)");
    println!("{}", report.analysis.summary_en);

    out.section("Summary (Local)");
    println!("{}", report.analysis.summary_local);

    out.section("Clauses");
    for (i, clause) in report.analysis.clauses.iter().enumerate() {
        println!(
            "{}. {} [{}]",
            i + 1,
            clause.title,
            out.risk(clause.risk_level)
        );
        println!("   {}", clause.explanation_en);
        if !clause.risk_reasons.is_empty() {
            println!("   Reasons: {}", clause.risk_reasons.join("; "));
        }
        println!();
    }

    out.section("Recommended Questions");
    for question in &report.analysis.recommended_questions {
        println!("  • {}", question);
    }

    println!();
    out.meta(&report.analysis.disclaimer);
}
