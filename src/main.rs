//! `lyricflow` - convert a Suno alignment file into a karaoke lyric timeline.
//!
//! Usage: lyricflow <alignment.json> [--resource-id ID] [--tokenize]
//!
//! Prints the initialized lyric as JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use lyricflow::config::Config;
use lyricflow::lyric::WhitespaceTokenizer;
use lyricflow::lyrics::{load_records, SunoParser};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: lyricflow <alignment.json> [--resource-id ID] [--tokenize]";

struct CliArgs {
    input: PathBuf,
    resource_id: Option<String>,
    tokenize: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut input = None;
    let mut resource_id = None;
    let mut tokenize = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--resource-id" => {
                resource_id = Some(args.next().context("--resource-id needs a value")?);
            }
            "--tokenize" => tokenize = true,
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("Unknown flag {other}\n{USAGE}"),
            path => input = Some(PathBuf::from(path)),
        }
    }

    let Some(input) = input else {
        bail!(USAGE);
    };
    Ok(CliArgs {
        input,
        resource_id,
        tokenize,
    })
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = parse_args(std::env::args().skip(1))?;
    let config = Config::load().context("Failed to load config")?;
    tracing::debug!("{} {} with {config:?}", config.app_name(), config.app_version());

    let records = load_records(&cli.input)?;
    let resource_id = cli.resource_id.unwrap_or_else(|| {
        cli.input
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
    });

    let mut parser = SunoParser::new(config);
    if cli.tokenize {
        parser = parser
            .with_line_tokenizer(Arc::new(WhitespaceTokenizer))
            .with_paragraph_tokenizer(Arc::new(WhitespaceTokenizer));
    }

    let lyric = parser.parse(&records, &resource_id).await?;
    println!("{}", serde_json::to_string_pretty(&lyric)?);
    Ok(())
}
