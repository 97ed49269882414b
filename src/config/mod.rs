//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "foglio";
const DEFAULT_ARCHIVE_PATH: &str = "content/site.toml";
const DEFAULT_HOME_LIMIT: u32 = 5;
const DEFAULT_RECENT_LIMIT: u32 = 2;

/// Command-line arguments for the Foglio binary.
#[derive(Debug, Parser)]
#[command(name = "foglio", version, about = "Foglio blog content inspector")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOGLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Assemble the home feed and print it as JSON.
    Feed(FeedArgs),
    /// Print the aggregated category filter list as JSON.
    Categories(CategoriesArgs),
    /// Ingest the archive and print an ingestion report as JSON.
    Check(CheckArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct FeedArgs {
    #[command(flatten)]
    pub overrides: CommonOverrides,

    /// Restrict the feed to a single category.
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub overrides: CommonOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub overrides: CommonOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CommonOverrides {
    /// Override the content archive path.
    #[arg(long = "archive", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub archive: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the number of posts shown on the home feed.
    #[arg(long = "home-limit", value_name = "COUNT")]
    pub home_limit: Option<u32>,

    /// Override the number of posts in the recent strip.
    #[arg(long = "recent-limit", value_name = "COUNT")]
    pub recent_limit: Option<u32>,

    /// Toggle the category filter bar.
    #[arg(
        long = "category-filters",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub category_filters: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub content: ContentSettings,
    pub logging: LoggingSettings,
    pub feed: FeedSettings,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub archive: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub home_limit: u32,
    pub recent_limit: u32,
    pub show_category_filters: bool,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOGLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Feed(args)) => raw.apply_overrides(&args.overrides),
        Some(Command::Categories(args)) => raw.apply_overrides(&args.overrides),
        Some(Command::Check(args)) => raw.apply_overrides(&args.overrides),
        None => {}
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    content: RawContentSettings,
    logging: RawLoggingSettings,
    feed: RawFeedSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &CommonOverrides) {
        if let Some(path) = overrides.archive.as_ref() {
            self.content.archive = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(limit) = overrides.home_limit {
            self.feed.home_limit = Some(limit);
        }
        if let Some(limit) = overrides.recent_limit {
            self.feed.recent_limit = Some(limit);
        }
        if let Some(show) = overrides.category_filters {
            self.feed.category_filters = Some(show);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            content,
            logging,
            feed,
        } = raw;

        Ok(Self {
            content: build_content_settings(content),
            logging: build_logging_settings(logging)?,
            feed: build_feed_settings(feed)?,
        })
    }
}

fn build_content_settings(content: RawContentSettings) -> ContentSettings {
    ContentSettings {
        archive: content
            .archive
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_PATH)),
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_feed_settings(feed: RawFeedSettings) -> Result<FeedSettings, LoadError> {
    let home_limit = feed.home_limit.unwrap_or(DEFAULT_HOME_LIMIT);
    if home_limit == 0 {
        return Err(LoadError::invalid(
            "feed.home_limit",
            "must be greater than zero",
        ));
    }

    // recent_limit may be zero: an empty recent strip is a valid layout.
    let recent_limit = feed.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT);

    Ok(FeedSettings {
        home_limit,
        recent_limit,
        show_category_filters: feed.category_filters.unwrap_or(true),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    archive: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFeedSettings {
    home_limit: Option<u32>,
    recent_limit: Option<u32>,
    category_filters: Option<bool>,
}
