//! CLI binary for scholarverse.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use scholar_search::{CachedProvider, GoogleCseEngine, PageReport};
use scholarverse::render::render_results;
use scholarverse::{AnalysisClient, Profile, ScholarConfig, ScholarError, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

type LiveSession = Session<CachedProvider<GoogleCseEngine>>;

/// ScholarVerse: find university programs and check how your profile fits.
#[derive(Parser)]
#[command(name = "scholarverse", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search for programs, e.g. `scholarverse search MS Physics in USA`.
    Search {
        /// Degree and program of interest.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Number of pages to fetch (stops early when results run out).
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Search, then send your profile and the results for analysis.
    Analyze {
        /// Degree and program of interest.
        #[arg(short, long)]
        query: String,

        /// Number of pages to fetch before analysing.
        #[arg(long, default_value_t = 1)]
        pages: u32,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Read `search <query>`, `more` and `quit` commands from stdin.
    Interactive,
}

#[derive(Args)]
struct ProfileArgs {
    /// GPA or grades, e.g. "3.7 / 4.0".
    #[arg(long)]
    gpa: String,
    /// Current degree, e.g. "Computer Science".
    #[arg(long)]
    major: String,
    /// Key skills or courses.
    #[arg(long, default_value = "")]
    skills: String,
    /// Achievements or projects.
    #[arg(long, default_value = "")]
    projects: String,
    /// Goals, region preference, scholarship interests.
    #[arg(long, default_value = "")]
    details: String,
}

impl From<ProfileArgs> for Profile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            gpa: args.gpa,
            major: args.major,
            skills: args.skills,
            projects: args.projects,
            details: args.details,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so result listings can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scholarverse=info,scholar_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ScholarConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Search { query, pages } => {
            let mut session = new_session(&config)?;
            search_pages(&mut session, &query.join(" "), pages).await?;
            print!("{}", render_results(session.results()));
            Ok(())
        }
        Command::Analyze {
            query,
            pages,
            profile,
        } => run_analyze(&config, &query, pages, profile.into()).await,
        Command::Interactive => run_interactive(&config).await,
    }
}

fn new_session(config: &ScholarConfig) -> anyhow::Result<LiveSession> {
    let provider = scholar_search::build_provider(&config.search)?;
    Ok(Session::new(provider, config.search.page_size))
}

async fn search_pages(session: &mut LiveSession, query: &str, pages: u32) -> anyhow::Result<()> {
    warn_on_failure(&session.start_search(query).await?);
    for _ in 1..pages {
        if !session.can_load_more() {
            break;
        }
        warn_on_failure(&session.load_more().await?);
    }
    Ok(())
}

fn warn_on_failure(report: &PageReport) {
    if let Some(err) = &report.failure {
        eprintln!("warning: could not fetch this page ({err}); showing what we have");
    }
}

async fn run_analyze(
    config: &ScholarConfig,
    query: &str,
    pages: u32,
    profile: Profile,
) -> anyhow::Result<()> {
    let client = AnalysisClient::new(&config.analysis)?;
    let mut session = new_session(config)?;
    search_pages(&mut session, query, pages).await?;
    print!("{}", render_results(session.results()));

    println!("Analyzing your profile and matching programs...");
    match session.analyze_profile(&client, &profile).await {
        Ok(feedback) => {
            println!("\nAI analysis result:\n\n{}", feedback.text);
        }
        Err(err) => {
            eprintln!("warning: no valid analysis received ({err})");
        }
    }
    Ok(())
}

async fn run_interactive(config: &ScholarConfig) -> anyhow::Result<()> {
    let mut session = new_session(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Commands: search <query> | more | quit");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let outcome = match command {
            "search" => session.start_search(rest).await,
            "more" => session.load_more().await,
            "quit" | "exit" => break,
            "" => continue,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        };
        match outcome {
            Ok(report) => {
                warn_on_failure(&report);
                print!("{}", render_results(session.results()));
                if session.can_load_more() {
                    println!("More results available: type `more`.");
                }
            }
            Err(ScholarError::Search(err)) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
