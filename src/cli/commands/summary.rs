//! Summary Command
//!
//! Plain-text summary of document text from a file or stdin. Remote
//! failures propagate with a category hint.

use crate::cli::util::{CommandContext, read_text_input};
use crate::types::Result;

pub async fn run(input: &str, language: Option<&str>) -> Result<()> {
    let ctx = CommandContext::load()?;
    let pipeline = ctx.pipeline()?;
    let language = ctx.language(language);

    let text = read_text_input(input)?;
    let summary = pipeline.summarize(&text, &language).await?;

    println!("{}", summary);
    Ok(())
}
