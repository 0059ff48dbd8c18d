//! Sheet MCP Server - Main Entry Point
//!
//! This is the main entry point for the sheet MCP server application.
//! The actual implementation is in the `sheet_mcp` library.

use anyhow::Result;
use clap::Parser;
use log::info;
use mcp_attr::server::serve_stdio;
use sheet_mcp::SheetServerHandler;
use sheet_mcp::logging;
use std::path::PathBuf;

/// Sheet MCP Server - hierarchical practice sheet editing via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the sheet data file (TOML); without it the sheet lives in memory only
    file: Option<String>,

    /// Save after every successful edit
    #[arg(long)]
    autosave: bool,

    /// Log level (off, error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = logging::init_logging(&args.log_level, args.log_dir.as_deref())?;

    let handler = SheetServerHandler::new(args.file.as_deref(), args.autosave)?;
    info!(
        "event=server_start storage={} autosave={}",
        args.file.as_deref().unwrap_or("memory"),
        args.autosave
    );
    serve_stdio(handler).await?;
    info!("event=server_stop status=ok");
    Ok(())
}
