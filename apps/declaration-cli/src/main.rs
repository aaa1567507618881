//! Declaration CLI
//!
//! Reads a LegalDocument (or template) as JSON from a file or stdin and
//! writes the assembled tree, a validation report or rendered output.

use anyhow::Result;
use clap::{Parser, Subcommand};
use render_engine::RenderFormat;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "declaration")]
#[command(version, about = "Assemble and render legal declarations")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the assembled document tree as JSON
    Assemble {
        /// LegalDocument JSON file, or "-" for stdin
        input: PathBuf,

        /// Assemble the final copy (validates drafts)
        #[arg(long = "final")]
        final_copy: bool,
    },

    /// Check whether a document is ready to finalize
    Validate {
        /// LegalDocument JSON file, or "-" for stdin
        input: PathBuf,
    },

    /// Render a document to PDF, SVG, HTML or plain text
    Render {
        /// LegalDocument JSON file, or "-" for stdin
        input: PathBuf,

        /// Output format: pdf, svg, html, docx or text
        #[arg(short, long, default_value = "pdf")]
        format: RenderFormat,

        /// Output file; defaults to the suggested filename, "-" for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compilation timeout in milliseconds
        #[arg(long, default_value = "10000")]
        timeout_ms: u64,

        /// Render the final copy (validates drafts)
        #[arg(long = "final")]
        final_copy: bool,
    },

    /// Create a draft from a template
    Instantiate {
        /// DocumentTemplate JSON file, or "-" for stdin
        template: PathBuf,

        /// Declarant name, substituted for [NAME]
        #[arg(long, default_value = "")]
        declarant: String,

        #[arg(long, default_value = "")]
        caption: String,

        #[arg(long, default_value = "")]
        case_number: String,

        /// Court name; the jurisdiction default when omitted
        #[arg(long, default_value = "")]
        court: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the output, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Assemble { input, final_copy } => {
            let document = commands::read_document(&input)?;
            let tree = commands::assemble(document, final_copy)?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        Command::Validate { input } => {
            let document = commands::read_document(&input)?;
            let report = commands::validate(&document);
            println!("{}", report.text);
            if !report.valid {
                std::process::exit(1);
            }
        }
        Command::Render {
            input,
            format,
            output,
            timeout_ms,
            final_copy,
        } => {
            let document = commands::read_document(&input)?;
            let rendered = commands::render(document, format, timeout_ms, final_copy).await?;
            let target = output.unwrap_or_else(|| PathBuf::from(&rendered.filename));
            commands::write_output(&target, &rendered.bytes)?;
            tracing::info!(
                output = %target.display(),
                pages = rendered.page_count,
                "Wrote {}",
                format
            );
        }
        Command::Instantiate {
            template,
            declarant,
            caption,
            case_number,
            court,
        } => {
            let template = commands::read_template(&template)?;
            let document =
                commands::instantiate(&template, declarant, caption, case_number, court)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
