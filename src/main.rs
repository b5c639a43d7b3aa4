use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lintrc::config::MERGE_DEFAULT_RULES_OPTION;
use lintrc::{ConfigError, ConfigResolver, RawLayer, ResolutionCache, ResolverSettings};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Print the effective lint configuration
///
/// Merges the built-in defaults, the nearest configuration file and any
/// rule overrides given on the command line.
#[derive(Parser, Debug)]
#[command(name = "lintrc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file to use instead of searching for one
    #[arg(short, long, env = "LINTRC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory to resolve from (defaults to the current directory)
    #[arg(short = 'C', long)]
    cwd: Option<PathBuf>,

    /// Inline rule override, VALUE is parsed as YAML (repeatable)
    #[arg(short, long = "rule", value_name = "NAME=VALUE")]
    rules: Vec<String>,

    /// Replace configured rules with the inline overrides instead of merging
    #[arg(long)]
    no_merge_default_rules: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_writer(file).with_ansi(false).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

/// Parse a `NAME=VALUE` rule override
fn parse_rule(arg: &str) -> std::result::Result<(String, Value), ConfigError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidRule(arg.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidRule(arg.to_string()));
    }

    let value: Value =
        serde_yaml::from_str(value).map_err(|_| ConfigError::InvalidRule(arg.to_string()))?;

    Ok((name.to_string(), value))
}

fn inline_layer(args: &Args) -> Result<RawLayer> {
    let mut inline = RawLayer::new();

    for arg in &args.rules {
        let (name, value) = parse_rule(arg)?;
        debug!("Inline rule override: {} = {}", name, value);
        inline = inline.with_rule(name, value);
    }

    if args.no_merge_default_rules {
        inline = inline.with_option(MERGE_DEFAULT_RULES_OPTION, false);
    }

    Ok(inline)
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file.clone())?;

    let mut settings = ResolverSettings::from_env()?;
    if let Some(cwd) = &args.cwd {
        let cwd = cwd
            .canonicalize()
            .with_context(|| format!("Invalid directory: {}", cwd.display()))?;
        settings = settings.with_cwd(cwd);
    }
    debug!("Resolving from {}", settings.cwd.display());

    let inline = inline_layer(&args)?;
    let resolver = ConfigResolver::new(settings)?;
    let mut cache = ResolutionCache::new();

    let resolved = resolver
        .resolve(&mut cache, &inline, args.config.as_deref())
        .context("Failed to resolve configuration")?;

    let output = match args.format {
        Format::Json => serde_json::to_string_pretty(&*resolved)?,
        Format::Yaml => serde_yaml::to_string(&*resolved)?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
