//! oxide-route-demo CLI
//!
//! Builds the demo router and runs one request, lists routes, or resolves a
//! named route.

mod app;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_route::{MatchStrategy, Request, RouterSettings};

/// Request routing demo.
#[derive(Parser)]
#[command(name = "oxide-route-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON settings file. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL for generated links and redirects.
    #[arg(short, long, env = "OXIDE_ROUTE_BASE_URL")]
    base_url: Option<String>,

    /// Directory of `<status>.html` error pages.
    #[arg(long, env = "OXIDE_ROUTE_VIEW_DIR")]
    view_dir: Option<PathBuf>,

    /// Match parameterized routes with anchored regular expressions.
    #[arg(long)]
    pattern: bool,

    /// Build controllers with their default constructor instead of the factory.
    #[arg(long)]
    no_di: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch one request and print the response.
    Dispatch {
        /// HTTP method.
        method: String,

        /// Request URL, absolute or relative to the base URL.
        url: String,

        /// Request header as `Name: value`. Repeatable.
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },

    /// Print the route table as JSON.
    Routes,

    /// Print the URL of a named route.
    Url {
        /// Route name.
        name: String,

        /// Placeholder substitution as `key=value`. Repeatable.
        params: Vec<String>,
    },
}

impl Cli {
    fn settings(&self) -> anyhow::Result<RouterSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                RouterSettings::from_json(&json)?
            }
            None => RouterSettings::new().base_url("http://localhost/demo/"),
        };

        if let Some(url) = &self.base_url {
            settings.base_url.clone_from(url);
        }
        if let Some(dir) = &self.view_dir {
            settings.view_dir = Some(dir.clone());
        }
        if self.pattern {
            settings.strategy = MatchStrategy::Pattern;
        }
        if self.no_di {
            settings.use_di = false;
        }
        Ok(settings)
    }
}

fn split_pair<'a>(raw: &'a str, separator: char, what: &str) -> anyhow::Result<(&'a str, &'a str)> {
    match raw.split_once(separator) {
        Some((key, value)) => Ok((key.trim(), value.trim())),
        None => bail!("invalid {what} `{raw}`, expected key{separator}value"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = cli.settings()?;
    debug!(?settings, "building demo router");
    let router = app::build(settings);

    match cli.command {
        Commands::Dispatch {
            method,
            url,
            headers,
        } => {
            let mut request = Request::from_url(method, &url, router.base_url());
            for raw in &headers {
                let (name, value) = split_pair(raw, ':', "header")?;
                request = request.header(name, value);
            }

            let response = router.dispatch(request);
            println!("{} {}", response.status, response.status_text());
            let mut headers: Vec<_> = response.headers.iter().collect();
            headers.sort();
            for (name, value) in headers {
                println!("{name}: {value}");
            }
            println!();
            println!("{}", response.body_string().unwrap_or_default());
        }

        Commands::Routes => {
            println!("{}", serde_json::to_string_pretty(&router.route_list())?);
        }

        Commands::Url { name, params } => {
            let mut substitutions = HashMap::new();
            for raw in &params {
                let (key, value) = split_pair(raw, '=', "parameter")?;
                substitutions.insert(key.to_string(), value.to_string());
            }
            println!("{}", router.url_for(&name, &substitutions));
        }
    }

    Ok(())
}
