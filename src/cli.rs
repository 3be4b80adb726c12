use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::config::{self, AppConfig};
use crate::error::PrdError;
use crate::fetcher::{fetch_all_issues, PageSize};
use crate::output;
use crate::providers::jira::{JiraProvider, JiraSettings};
use crate::transform::{transform_to_prd, PrdMetadata};

const DEFAULT_API_VERSION: u8 = 2;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const EXAMPLES: &str = "\
EXAMPLES:
  jira-prd --url https://your-domain.atlassian.net --email user@example.com --token YOUR_API_TOKEN --project PROJ --output prd.json
  jira-prd --url https://your-domain.atlassian.net --email user@example.com --token YOUR_API_TOKEN --project PROJ --project-name \"MyApp\" --output prd.json";

#[derive(Debug, Parser)]
#[command(
    name = "jira-prd",
    version,
    about = "Fetch JIRA tickets and convert them to PRD format",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// JIRA instance URL (e.g. https://your-domain.atlassian.net)
    #[arg(long, env = "JIRA_URL")]
    pub url: Option<String>,

    /// Your JIRA account email
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: Option<String>,

    /// Your JIRA API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JIRA project key (e.g. PROJ, DEV)
    #[arg(long)]
    pub project: String,

    /// Project name for the PRD (defaults to the project key)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Branch name for the PRD (derived from the project name if omitted)
    #[arg(long)]
    pub branch_name: Option<String>,

    /// Project description for the PRD
    #[arg(long)]
    pub project_description: Option<String>,

    /// Output JSON file path (e.g. prd.json)
    #[arg(long, required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Number of results per page (1-100)
    #[arg(long, default_value_t = 100)]
    pub max_results: u32,

    /// Jira REST API version (2 returns plain-text descriptions, 3 returns ADF)
    #[arg(long)]
    pub api_version: Option<u8>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Config file (defaults to ~/.localpipeline/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the PRD to stdout instead of writing a file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Everything a run needs, validated before any request is made.
#[derive(Debug, Clone)]
pub struct Settings {
    pub jira: JiraSettings,
    pub project_key: String,
    pub page_size: PageSize,
    pub metadata: PrdMetadata,
    pub destination: Destination,
}

impl Settings {
    /// Merge flags (and their env fallbacks) over the config file.
    pub fn resolve(cli: Cli, config: AppConfig) -> Result<Self, PrdError> {
        let page_size = PageSize::new(cli.max_results)?;
        let file = config.jira.unwrap_or_default();

        let base_url = required(cli.url.or(file.url), "URL", "--url")?;
        let email = required(cli.email.or(file.email), "email", "--email")?;
        let api_token = required(cli.token.or(file.api_token), "API token", "--token")?;

        let api_version = cli
            .api_version
            .or(file.api_version)
            .unwrap_or(DEFAULT_API_VERSION);
        if !matches!(api_version, 2 | 3) {
            return Err(PrdError::InvalidApiVersion(api_version));
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(PrdError::InvalidTimeout);
        }

        let destination = match cli.output {
            Some(path) if !cli.dry_run => Destination::File(path),
            _ => Destination::Stdout,
        };

        let project_name = cli.project_name.unwrap_or_else(|| cli.project.clone());

        Ok(Self {
            jira: JiraSettings {
                base_url: base_url.trim_end_matches('/').to_string(),
                email,
                api_token,
                api_version,
                timeout: Duration::from_secs(timeout_secs),
            },
            project_key: cli.project,
            page_size,
            metadata: PrdMetadata {
                project_name,
                branch_name: cli.branch_name,
                description: cli.project_description,
            },
            destination,
        })
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    flag: &'static str,
) -> Result<String, PrdError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(PrdError::MissingSetting { name, flag })
}

/// Fetch, transform and write the PRD.
pub async fn run(cli: Cli) -> Result<()> {
    // Bad page sizes are reported before the config file is even read.
    PageSize::new(cli.max_results)?;
    let config = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, config)?;

    let provider = JiraProvider::new(&settings.jira);
    let issues = fetch_all_issues(&provider, &settings.project_key, settings.page_size).await?;
    let prd = transform_to_prd(issues, &settings.metadata);

    match &settings.destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            output::print_prd(&mut stdout, &prd).context("Failed to print PRD to stdout")?;
        }
        Destination::File(path) => {
            output::write_prd(path, &prd)?;
            info!(path = %path.display(), "PRD written");
            println!("\n✅ PRD format saved to: {}", path.display());
            println!("   Project: {}", prd.project);
            println!("   User Stories: {}", prd.user_stories.len());
        }
    }

    Ok(())
}
