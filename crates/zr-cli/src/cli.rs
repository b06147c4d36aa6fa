//! Argument parsing and command dispatch for `zr-reconcile`

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use serde_json::Value;
use zr_core::{ExecutionContext, ReconcileConfig, Reconciler, Reconciliation};
use zr_requests::RequestCollection;
use zr_schema::{SectionName, Settings};

use crate::store::JsonFileStore;

/// JSON document printed on stdout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub settings: &'a Settings,
    pub requests: &'a RequestCollection,
    pub written_sections: &'a [SectionName],
    pub rejected_requests: Vec<String>,
}

impl<'a> From<&'a Reconciliation> for Report<'a> {
    fn from(reconciliation: &'a Reconciliation) -> Self {
        Self {
            settings: &reconciliation.settings,
            requests: &reconciliation.requests,
            written_sections: &reconciliation.written_sections,
            rejected_requests: reconciliation
                .rejected_requests
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Command-line definition
#[must_use]
pub fn command() -> Command {
    Command::new("zr-reconcile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reconcile zoteroRoam settings against the canonical defaults")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs on stderr as JSON lines"),
        )
        .subcommand(
            Command::new("depot")
                .about("Reconcile a Roam Depot key/value store file, writing missing sections back")
                .arg(
                    Arg::new("store")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding the host settings store"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Do not write missing sections back to the store"),
                )
                .arg(pretty_arg()),
        )
        .subcommand(
            Command::new("legacy")
                .about("Reconcile legacy manual settings (read-only)")
                .arg(
                    Arg::new("settings")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding the manual settings object"),
                )
                .arg(pretty_arg()),
        )
}

fn pretty_arg() -> Arg {
    Arg::new("pretty")
        .long("pretty")
        .action(ArgAction::SetTrue)
        .help("Indent the JSON output")
}

/// Run the selected subcommand and return the rendered report.
///
/// # Errors
/// Returns error if an input file cannot be read or parsed, or if
/// reconciliation fails
pub fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("depot", args)) => {
            let path = required_path(args, "store")?;
            let config = if args.get_flag("dry-run") {
                ReconcileConfig::dry_run()
            } else {
                ReconcileConfig::new()
            };
            let mut store = JsonFileStore::new(path.clone());
            let reconciliation = Reconciler::new(config)
                .initialize(ExecutionContext::roam_depot(&mut store))
                .with_context(|| format!("failed to reconcile store {}", path.display()))?;
            render(&reconciliation, args.get_flag("pretty"))
        }
        Some(("legacy", args)) => {
            let path = required_path(args, "settings")?;
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let manual: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            let reconciliation = Reconciler::default()
                .initialize(ExecutionContext::legacy(manual))
                .with_context(|| format!("failed to reconcile {}", path.display()))?;
            render(&reconciliation, args.get_flag("pretty"))
        }
        Some((other, _)) => bail!("unknown subcommand '{other}'"),
        None => bail!("no subcommand given"),
    }
}

fn required_path(args: &ArgMatches, name: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<PathBuf>(name)
        .cloned()
        .with_context(|| format!("missing <{name}> argument"))
}

/// Serialize a reconciliation as the CLI's JSON report.
///
/// # Errors
/// Returns error if serialization fails
pub fn render(reconciliation: &Reconciliation, pretty: bool) -> anyhow::Result<String> {
    let report = Report::from(reconciliation);
    let text = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(text)
}
