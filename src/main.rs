use anyhow::{Context, Result};
use appimage_releases::{
    PageView,
    cache::ReleaseCache,
    format_html::format_page_html,
    model::parse_records,
    provider::{self, github},
    server::{self, AppState},
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::{fs, path::PathBuf, sync::Arc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One year.
const MAX_CACHE_MINUTES: i64 = 60 * 24 * 365;

const USER_AGENT: &str = concat!("appimage-releases/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "appimage-releases")]
#[command(about = "Release matrix and install examples for Python AppImages", version, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the page once and exit
    Render {
        /// Release list JSON file (fetched from GitHub when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// GitHub repository, as owner/name
        #[arg(short, long, default_value = provider::DEFAULT_REPO)]
        repo: String,

        /// Host architecture to recommend an AppImage for
        #[arg(short, long)]
        arch: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the page over HTTP
    Serve {
        /// GitHub repository, as owner/name
        #[arg(short, long, default_value = provider::DEFAULT_REPO)]
        repo: String,

        /// Release list cache expiration time in minutes
        #[arg(
            short = 'e',
            long,
            default_value = "60",
            value_parser = clap::value_parser!(i64).range(0..=MAX_CACHE_MINUTES)
        )]
        cache_minutes: i64,

        /// Server port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Server host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Html,
    Json,
}

fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

async fn render(
    input: Option<PathBuf>,
    repo: &str,
    arch: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let (records, fetched_at) = match input {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let records = parse_records(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            (records, None)
        }
        None => {
            let records = github::fetch_releases(&http_client()?, repo).await?;
            (records, Some(Utc::now()))
        }
    };

    let page = PageView::build(&records, arch)?;
    Ok(match format {
        OutputFormat::Html => format_page_html(&page, repo, fetched_at),
        OutputFormat::Json => serde_json::to_string_pretty(&page)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appimage_releases=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Args::parse().command {
        Command::Render {
            input,
            repo,
            arch,
            format,
            output,
        } => {
            let rendered = render(input, &repo, arch.as_deref(), format).await?;
            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Command::Serve {
            repo,
            cache_minutes,
            port,
            host,
        } => {
            let state = Arc::new(AppState {
                client: http_client()?,
                cache: ReleaseCache::new(cache_minutes)?,
                repo,
            });
            let app = server::router(state.clone());

            let addr = format!("{}:{}", host, port);
            info!("Server listening on http://{}", addr);
            info!("Repository: {}", state.repo);
            info!("Cache expiration: {} minutes", cache_minutes);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
