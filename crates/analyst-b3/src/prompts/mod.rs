//! Research prompt templates
//!
//! Templates are Jinja strings rendered with minijinja; the only variable is
//! `empresa`, the company name typed by the user.

mod report;

pub use report::{FORMAT_INSTRUCTION, MARKDOWN_REPORT, STRUCTURED_REPORT};

use crate::config::OutputFormat;
use crate::error::Result;
use minijinja::{Environment, context};

/// Render `template` for `empresa`
pub fn render(template: &str, empresa: &str) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(template, context! { empresa => empresa })?)
}

/// Research prompt for the requested report shape
pub fn research_prompt(format: OutputFormat, empresa: &str) -> Result<String> {
    let template = match format {
        OutputFormat::Markdown => MARKDOWN_REPORT,
        OutputFormat::Structured => STRUCTURED_REPORT,
    };
    render(template, empresa)
}

/// Closing instruction for the schema-constrained turn
pub fn format_instruction(empresa: &str) -> Result<String> {
    render(FORMAT_INSTRUCTION, empresa)
}
