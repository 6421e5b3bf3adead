use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use postframe::{
    CardEngine, EngineConfig, FxTwitterSource, InMemoryFetcher, PostRecord, PostSource,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "postframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card from a post record JSON file.
    Render(RenderArgs),
    /// Resolve a post URL through the FixTweet API and render it.
    Url(UrlArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Theme: dark, dim or light. Unknown names fall back to dark.
    #[arg(long, env = "POSTFRAME_THEME")]
    theme: Option<String>,

    /// Output directory (overrides the config file).
    #[arg(long, env = "POSTFRAME_OUTPUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not fetch avatar or images; render the offline fallbacks instead.
    #[arg(long)]
    no_fetch: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Post record JSON (camelCase keys).
    #[arg(long)]
    post: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct UrlArgs {
    /// Post URL, e.g. https://x.com/user/status/123.
    url: String,

    /// FixTweet API base URL.
    #[arg(long, env = "POSTFRAME_API_BASE", default_value = postframe::source::DEFAULT_API_BASE)]
    api_base: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = match cli.cmd {
        Command::Render(args) => cmd_render(args).await?,
        Command::Url(args) => cmd_url(args).await?,
    };
    println!("{}", path.display());
    Ok(())
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<PathBuf> {
    let record = read_post_json(&args.post)?;
    let engine = make_engine(&args.common)?;
    Ok(engine.generate(&record, args.common.theme.as_deref()).await?)
}

async fn cmd_url(args: UrlArgs) -> anyhow::Result<PathBuf> {
    let source = FxTwitterSource::new()?.with_api_base(args.api_base);
    let record = source.resolve(&args.url).await?;
    let engine = make_engine(&args.common)?;
    Ok(engine.generate(&record, args.common.theme.as_deref()).await?)
}

fn read_post_json(path: &Path) -> anyhow::Result<PostRecord> {
    let f = File::open(path).with_context(|| format!("open post '{}'", path.display()))?;
    let r = BufReader::new(f);
    let record: PostRecord = serde_json::from_reader(r).with_context(|| "parse post JSON")?;
    Ok(record)
}

fn make_engine(common: &CommonArgs) -> anyhow::Result<CardEngine> {
    let mut config = match &common.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &common.out_dir {
        config.output_dir = dir.clone();
    }

    let engine = if common.no_fetch {
        CardEngine::new(config, Arc::new(InMemoryFetcher::new()))?
    } else {
        CardEngine::with_http(config)?
    };
    Ok(engine)
}
