// ABOUTME: CLI for fetching job and internship listings with jobscout-listings.
// ABOUTME: Scrapes a source (or parses a saved copy) and prints a numbered list or JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use jobscout_listings::{Client, InternshipListing, JobListing, DEFAULT_MAX_RESULTS};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default number of internships shown in the numbered list.
const DEFAULT_DISPLAY_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "jobscout")]
#[command(about = "Fetch job and internship listings and print them", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output a JSON array instead of a numbered list.
    #[arg(long, global = true)]
    json: bool,

    /// Output compact JSON (implies --json).
    #[arg(long, global = true)]
    compact: bool,

    /// Override the browser User-Agent sent with requests.
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the job board for keywords.
    Indeed {
        /// Search keywords (joined with spaces).
        #[arg(required = true)]
        keywords: Vec<String>,

        /// Location filter.
        #[arg(short, long, default_value = "")]
        location: String,

        /// Maximum number of results.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
        limit: usize,

        /// Parse a saved results page instead of fetching ("-" for stdin).
        #[arg(long)]
        html: Option<String>,

        /// Site origin used for the search and for resolving relative links.
        #[arg(long)]
        base_url: Option<String>,
    },
    /// List internships from the curated GitHub README.
    Github {
        /// Number of internships to print (all are printed with --json unless set).
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Parse a saved README instead of fetching ("-" for stdin).
        #[arg(long)]
        markdown: Option<String>,

        /// README API endpoint.
        #[arg(long)]
        api_url: Option<String>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua);
    }
    let as_json = args.json || args.compact;

    match &args.command {
        Command::Indeed {
            keywords,
            location,
            limit,
            html,
            base_url,
        } => {
            if let Some(url) = base_url {
                builder = builder.indeed_url(url);
            }
            let client = builder.build();

            let jobs = match html {
                Some(target) => client.parse_indeed_html(&load_text(target)?, *limit),
                None => client.try_scrape_indeed(&keywords.join(" "), location, *limit)?,
            };

            if as_json {
                to_json(&jobs, args.compact)
            } else {
                Ok(render_jobs(&jobs))
            }
        }
        Command::Github {
            limit,
            markdown,
            api_url,
        } => {
            if let Some(url) = api_url {
                builder = builder.github_readme_url(url);
            }
            let client = builder.build();

            let listings = match markdown {
                Some(target) => client.parse_internships_markdown(&load_text(target)?),
                None => client.try_scrape_github_internships()?,
            };

            if as_json {
                let shown = match limit {
                    Some(n) => &listings[..listings.len().min(*n)],
                    None => &listings[..],
                };
                to_json(shown, args.compact)
            } else {
                Ok(render_internships(
                    &listings,
                    limit.unwrap_or(DEFAULT_DISPLAY_LIMIT),
                ))
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<String> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(out)
}

fn render_jobs(jobs: &[JobListing]) -> String {
    if jobs.is_empty() {
        return "No listings found".to_string();
    }

    let mut out = format!("Found {} job listings\n", jobs.len());
    for (i, job) in jobs.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n   Link: {}\n", i + 1, job.title, job.link));
    }
    out.trim_end().to_string()
}

fn render_internships(listings: &[InternshipListing], limit: usize) -> String {
    if listings.is_empty() {
        return "No listings found".to_string();
    }

    let mut out = format!("Found {} internship opportunities!\n", listings.len());
    for (i, listing) in listings.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "\n{}. {} - {}\n   Location: {}\n",
            i + 1,
            listing.company,
            listing.role,
            listing.location
        ));
    }
    if listings.len() > limit {
        out.push_str(&format!(
            "\n... and {} more internships available!\n",
            listings.len() - limit
        ));
    }
    out.trim_end().to_string()
}

fn load_text(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}
