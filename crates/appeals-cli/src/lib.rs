//! Appeals mapping CLI
//!
//! Loads an appeal aggregate from a JSON file, maps one case page for a
//! session holding the given permissions, and renders the result as JSON.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{Context, Result};
use appeals_core::{
    load_appeal, AppealMapper, AppealMapperRequest, FinalCommentsSummary,
    InMemoryRepresentations, MapperConfig, MapperPage, Permission, Session, SessionEvaluator,
};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Parsed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapArgs {
    /// Aggregate JSON file
    pub appeal: PathBuf,
    /// Page to map
    pub page: MapperPage,
    /// Base route for action links; derived from the appeal id when absent
    pub route: Option<String>,
    /// Granted permissions
    pub permissions: Vec<Permission>,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// Final comments state JSON; nothing received when absent
    pub representations: Option<PathBuf>,
    /// Only these field ids
    pub only: Vec<String>,
    /// Request date; the local date when absent
    pub today: Option<NaiveDate>,
    /// Debug logging
    pub verbose: bool,
}

/// Command definition
#[must_use]
pub fn command() -> Command {
    Command::new("appeals-map")
        .version(appeals_core::VERSION)
        .about("Map an appeal aggregate to case-page view-models")
        .arg(
            Arg::new("appeal")
                .long("appeal")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Appeal aggregate JSON file"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .required(true)
                .value_parser(["appeal-details", "appellant-case", "lpa-questionnaire"])
                .help("Case page to map"),
        )
        .arg(
            Arg::new("route")
                .long("route")
                .help("Base route for action links"),
        )
        .arg(
            Arg::new("permission")
                .long("permission")
                .action(ArgAction::Append)
                .help("Permission granted to the session (repeatable)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Mapper configuration TOML"),
        )
        .arg(
            Arg::new("representations")
                .long("representations")
                .value_parser(value_parser!(PathBuf))
                .help("Final comments state JSON; both parties not received when absent"),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .action(ArgAction::Append)
                .help("Map only this field id (repeatable)"),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .help("Request date as YYYY-MM-DD"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
}

impl MapArgs {
    /// Read arguments from matches
    ///
    /// # Errors
    /// Unknown permission or page names, or a malformed `--today`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let appeal = matches
            .get_one::<PathBuf>("appeal")
            .cloned()
            .context("--appeal is required")?;
        let page = matches
            .get_one::<String>("page")
            .context("--page is required")?
            .parse::<MapperPage>()?;
        let permissions = matches
            .get_many::<String>("permission")
            .unwrap_or_default()
            .map(|name| name.parse::<Permission>())
            .collect::<Result<Vec<_>, _>>()?;
        let today = matches
            .get_one::<String>("today")
            .map(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .with_context(|| format!("--today must be YYYY-MM-DD, got '{value}'"))
            })
            .transpose()?;

        Ok(Self {
            appeal,
            page,
            route: matches.get_one::<String>("route").cloned(),
            permissions,
            config: matches.get_one::<PathBuf>("config").cloned(),
            representations: matches.get_one::<PathBuf>("representations").cloned(),
            only: matches
                .get_many::<String>("only")
                .unwrap_or_default()
                .cloned()
                .collect(),
            today,
            verbose: matches.get_flag("verbose"),
        })
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug over warn.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second call in one process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Map the requested page and return its JSON
///
/// # Errors
/// Unreadable files, a malformed aggregate or configuration, or a mapping
/// failure.
pub async fn run(args: &MapArgs) -> Result<serde_json::Value> {
    let config = match &args.config {
        Some(path) => MapperConfig::from_file(path)?,
        None => MapperConfig::default(),
    };
    let json = std::fs::read_to_string(&args.appeal)
        .with_context(|| format!("cannot read {}", args.appeal.display()))?;
    let appeal = load_appeal(&json)
        .with_context(|| format!("cannot load appeal from {}", args.appeal.display()))?;

    let route = args
        .route
        .clone()
        .unwrap_or_else(|| format!("/appeals-service/appeal-details/{}", appeal.appeal_id));
    let session = Session::default().with_permissions(args.permissions.iter().copied());
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    tracing::info!(
        appeal_id = appeal.appeal_id,
        page = %args.page,
        permissions = args.permissions.len(),
        "mapping page"
    );

    let representations = InMemoryRepresentations::new();
    if let Some(path) = &args.representations {
        representations.insert(appeal.appeal_id, load_final_comments(path)?);
    }

    let mapper = AppealMapper::new(
        args.page,
        Arc::new(config),
        Arc::new(SessionEvaluator::new()),
        Arc::new(representations),
    )?;
    let request = AppealMapperRequest::new(Arc::new(appeal), route, Arc::new(session), today);

    let only: Vec<&str> = args.only.iter().map(String::as_str).collect();
    let filter = (!only.is_empty()).then_some(only.as_slice());
    let data = mapper.map(&request, filter).await?;
    Ok(serde_json::to_value(&data)?)
}

fn load_final_comments(path: &Path) -> Result<FinalCommentsSummary> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("cannot load final comments from {}", path.display()))
}
