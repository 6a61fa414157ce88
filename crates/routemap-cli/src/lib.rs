//! The `urltool` command, as an embeddable library.
//!
//! Route tables only exist inside a host application, so the host supplies
//! a [`Registry`] of its root tables and embeds the command in its own
//! binary:
//!
//! ```no_run
//! use std::process::ExitCode;
//! use routemap_core::route::{Registry, RouteTable};
//!
//! fn my_app_routes() -> RouteTable {
//!     RouteTable::new("MyApp")
//! }
//!
//! fn main() -> ExitCode {
//!     let mut registry = Registry::new();
//!     registry.register(my_app_routes());
//!     routemap_cli::main_with(&registry)
//! }
//! ```

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use routemap_core::route::Registry;
use routemap_core::walk::{self, WalkOptions};

/// Dump a route table tree as an OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "urltool", about = "Dump a route table tree as an OpenAPI document")]
pub struct UrltoolArgs {
    /// Name of a registered route table to start from
    pub table: String,

    /// Keep only routes whose path or operation id contains this term
    pub filter: Option<String>,

    /// Invert the filter, keeping only routes that do not match
    #[arg(long)]
    pub reverse: bool,
}

/// Resolve the requested table and write the rendered document to `out`.
pub fn run(registry: &Registry, args: &UrltoolArgs, out: &mut impl Write) -> Result<()> {
    let table = registry.get(&args.table)?;
    let options = WalkOptions {
        filter: args.filter.clone(),
        reverse: args.reverse,
    };
    log::info!("documenting route table {}", args.table);
    let rendered = walk::render(table, &options)
        .with_context(|| format!("failed to document route table {}", args.table))?;
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Parse process arguments and run against stdout. Fatal traversal errors
/// are reported on stderr with a non-zero exit code.
pub fn main_with(registry: &Registry) -> ExitCode {
    env_logger::init();
    let args = UrltoolArgs::parse();
    let mut stdout = std::io::stdout().lock();
    match run(registry, &args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("urltool: {err:#}");
            ExitCode::FAILURE
        }
    }
}
