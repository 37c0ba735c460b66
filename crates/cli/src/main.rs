mod echo;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unlocked_core::{
    Article, DEFAULT_SHARE_BASE, JsonExportConfig, MarkdownExportConfig, OutputFormat, UnlockedConfig,
    UnlockedConfigBuilder, Unlocker, convert_to_html, convert_to_json, convert_to_markdown_export, fetch_file,
    fetch_stdin, fetch_url, load_config, qr_svg, share_link, write_rendered,
};
use url::Url;

use echo::{
    format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_timing_summary,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const TOTAL_STEPS: usize = 4;

/// Export a Medium article through a freedium mirror as Markdown, HTML or JSON
#[derive(Parser, Debug)]
#[command(name = "unlocked")]
#[command(author = "Unlocked Contributors")]
#[command(version)]
#[command(about = "Export Medium articles through a freedium mirror", long_about = None)]
struct Args {
    /// Article URL, saved mirror HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Write into this directory, named after the article title
    #[arg(short = 'd', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output format (markdown, html, json)
    #[arg(short, long, default_value = "markdown", value_name = "FORMAT")]
    format: OutputFormat,

    /// Include TOML frontmatter (Markdown only)
    #[arg(long)]
    frontmatter: bool,

    /// Append the image manifest (Markdown only)
    #[arg(long)]
    images: bool,

    /// Article URL to record for file (default: file:// URL) or stdin input
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Configuration file (default: the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a share link on this front end
    #[arg(long, value_name = "URL")]
    share_base: Option<String>,

    /// Write the share link as an SVG QR code
    #[arg(long, value_name = "FILE")]
    qr: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Where the page HTML comes from
enum Source<'a> {
    Stdin,
    File(&'a str),
    Url(&'a str),
}

impl<'a> Source<'a> {
    fn classify(input: &'a str) -> Self {
        if input == "-" {
            Source::Stdin
        } else if Path::new(input).is_file() {
            Source::File(input)
        } else {
            Source::Url(input)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "unlocked_core=debug,unlocked=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration file and applies flag overrides
fn build_config(args: &Args) -> anyhow::Result<UnlockedConfig> {
    let loaded = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    let mut builder = UnlockedConfigBuilder::from_config(loaded);

    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    let config = builder.build();
    debug!(mirror = %config.mirror.base_url, timeout = config.fetch.timeout, "effective configuration");
    Ok(config)
}

/// Renders the article with the format-specific flags
fn render_output(article: &Article, args: &Args) -> anyhow::Result<String> {
    let output = match args.format {
        OutputFormat::Markdown => {
            let config = MarkdownExportConfig { include_frontmatter: args.frontmatter, include_images: args.images };
            convert_to_markdown_export(article, &config)
        }
        OutputFormat::Html => convert_to_html(article),
        OutputFormat::Json => {
            convert_to_json(article, &JsonExportConfig { pretty: true }).context("Failed to serialize article")?
        }
    };

    Ok(output)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    if args.format != OutputFormat::Markdown && (args.frontmatter || args.images) {
        print_warning("--frontmatter and --images only apply to Markdown output");
    }

    let unlocker = Unlocker::with_config(build_config(&args)?);

    let stage = Instant::now();
    let (html, url) = match Source::classify(&args.input) {
        Source::Stdin => {
            if args.verbose {
                print_step(1, TOTAL_STEPS, "Reading from stdin");
            }
            let Some(url) = args.url.as_deref() else {
                anyhow::bail!("Reading from stdin needs --url to record the article's address");
            };
            let url = unlocker.normalize(url).context("Failed to normalize --url")?;
            let html = fetch_stdin().context("Failed to read from stdin")?;
            (html, url)
        }
        Source::File(path) => {
            if args.verbose {
                print_step(1, TOTAL_STEPS, &format!("Reading from file {}", path.bright_white()));
            }
            let html = fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?;
            let url = recorded_url(&unlocker, args.url.as_deref(), Path::new(path))?;
            (html, url)
        }
        Source::Url(input) => {
            let url = unlocker.normalize(input).context("Failed to normalize URL")?;
            if args.verbose {
                print_step(1, TOTAL_STEPS, &format!("Fetching from {}", url.bright_white().underline()));
            }
            let html = fetch_url(&url, &unlocker.config().fetch)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            (html, url)
        }
    };
    timings.push(("Read", stage.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, TOTAL_STEPS, "Locating and converting article");
    }

    let stage = Instant::now();
    let article = unlocker.parse(&html, &url).context("Failed to extract article")?;
    timings.push(("Parse", stage.elapsed()));

    if args.verbose {
        print_detail("Title", article.title());
        print_detail("Author", article.author());
        if !article.date().is_empty() {
            print_detail("Published", article.date());
        }
        print_detail("Images", &article.images().len().to_string());
        eprintln!();
        print_step(3, TOTAL_STEPS, &format!("Rendering {}", args.format.extension()));
    }

    let stage = Instant::now();
    let output = render_output(&article, &args)?;
    timings.push(("Render", stage.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(output.len()));
        eprintln!();
        print_step(4, TOTAL_STEPS, "Writing output");
    }

    if let Some(path) = &args.output {
        fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
        print_success(&format!("Output written to {}", path.display().bright_white()));
    } else if let Some(dir) = &args.output_dir {
        let path = write_rendered(dir, &article, args.format, &output)
            .with_context(|| format!("Failed to write into directory: {}", dir.display()))?;
        print_success(&format!("Output written to {}", path.display().bright_white()));
    } else {
        print!("{}", output);
    }

    if args.share_base.is_some() || args.qr.is_some() {
        share(&args)?;
    }

    if args.verbose {
        print_timing_summary(start.elapsed(), &timings);
    }

    Ok(())
}

/// URL recorded on articles read from a file: the normalized `--url`, or
/// the file's absolute `file://` URL when none was given
fn recorded_url(unlocker: &Unlocker, url: Option<&str>, path: &Path) -> anyhow::Result<String> {
    if let Some(url) = url {
        return unlocker.normalize(url).context("Failed to normalize --url");
    }

    let absolute = fs::canonicalize(path).with_context(|| format!("Failed to resolve {}", path.display()))?;
    let file_url = Url::from_file_path(&absolute)
        .map_err(|()| anyhow::anyhow!("Cannot express {} as a file URL", absolute.display()))?;
    print_warning(&format!("No --url given; recording {}", file_url));
    Ok(file_url.into())
}

/// Prints the share link and writes its QR code when asked to
fn share(args: &Args) -> anyhow::Result<()> {
    let Some(input_url) = shared_url(args) else {
        print_warning("No article URL to share; pass --url with file or stdin input");
        return Ok(());
    };

    let base = args.share_base.as_deref().unwrap_or(DEFAULT_SHARE_BASE);
    let link = share_link(base, input_url).context("Failed to build share link")?;
    print_info(&format!("Share link: {}", link));

    if let Some(path) = &args.qr {
        let svg = qr_svg(&link).context("Failed to encode share link as a QR code")?;
        fs::write(path, svg).with_context(|| format!("Failed to write QR code: {}", path.display()))?;
        print_success(&format!("QR code written to {}", path.display().bright_white()));
    }

    Ok(())
}

/// The URL a share link should carry, as the user gave it
fn shared_url(args: &Args) -> Option<&str> {
    match Source::classify(&args.input) {
        Source::Url(input) => Some(input),
        _ => args.url.as_deref(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
