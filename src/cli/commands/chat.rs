//! Chat Command
//!
//! Question answering over optional document context. Remote failures
//! propagate with a category hint; there is no fallback answer.

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, read_text_input};
use crate::types::Result;

pub async fn run(question: &str, context: Option<&str>, json: bool) -> Result<()> {
    let ctx = CommandContext::load()?;
    let pipeline = ctx.pipeline()?;

    let context_text = match context {
        Some(arg) => Some(read_text_input(arg)?),
        None => None,
    };

    let response = pipeline.chat(question, context_text.as_deref()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let out = Output::new();
    println!("{}", response.answer);

    if !response.evidence.is_empty() {
        out.section("Evidence");
        for item in &response.evidence {
            println!("  [chunk {}] {}", item.chunk_id, item.snippet);
        }
    }

    Ok(())
}
