mod source;
mod summary;
mod warhorn;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use lodge_stats_core::{EventStats, SessionRecord};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use summary::ReportSummary;
use warhorn::{DEFAULT_HOST, GraphQuery, WarhornClient, load_query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Fixed-layout text report
    Text,
    /// Count-only JSON summary
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "lodge-stats", version)]
#[command(about = "Lodge-level and per-venue session statistics for a Warhorn event")]
struct Args {
    /// Event slug for the Warhorn event (required unless --input is given)
    #[arg(short = 'l', long, required_unless_present = "input")]
    event_slug: Option<String>,

    /// Start of the reporting window (RFC 3339, or YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_timestamp)]
    start: Option<DateTime<Utc>>,

    /// End of the reporting window (RFC 3339, or YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_timestamp)]
    end: Option<DateTime<Utc>>,

    /// Path to write the report to (`-` for stdout)
    #[arg(short, long, default_value = "output.txt")]
    output_file: PathBuf,

    /// Read a saved GraphQL response instead of querying Warhorn (`-` for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Bearer token for the Warhorn API
    #[arg(long, env = "WARHORN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Warhorn host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Override the built-in GraphQL query
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Print a per-campaign summary after writing the report
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn writes_to_stdout(&self) -> bool {
        self.output_file.as_os_str() == "-"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.writes_to_stdout() {
        announce_banner();
    }

    let records = acquire_records(&args).await?;
    let stats = EventStats::from_records(&records).context("session data is malformed")?;
    let rendered = render(&stats, args.format)?;

    let mut output_target = OutputTarget::new(&args.output_file)?;
    output_target.write_all(rendered.as_bytes())?;
    output_target
        .flush()
        .context("failed to flush report")?;

    if !args.writes_to_stdout() {
        print_summary(&args, &stats, records.len());
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🎲 Lodge Stats Reporter".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

async fn acquire_records(args: &Args) -> Result<Vec<SessionRecord>> {
    if let Some(input) = &args.input {
        let records = source::read_response(input)?.into_records()?;
        return Ok(source::apply_window(records, args.start, args.end));
    }

    let event_slug = args
        .event_slug
        .as_deref()
        .context("an event slug is required when no --input is given")?;
    let token = args
        .token
        .as_deref()
        .context("a bearer token is required for live queries (--token or WARHORN_TOKEN)")?;
    let query_text = load_query(args.query_file.as_deref())?;
    let query = GraphQuery::event_sessions(query_text, event_slug, args.start, args.end);

    let client = WarhornClient::new(&args.host, token)?;
    log::debug!("event {event_slug} via {}", client.endpoint());
    let response = client.fetch_sessions(&query).await?;
    Ok(response.into_records()?)
}

fn render(stats: &EventStats, format: ReportFormat) -> Result<String> {
    let rendered = match format {
        ReportFormat::Text => stats.render_text()?,
        ReportFormat::Json => {
            let mut json = ReportSummary::build(stats)
                .to_json()
                .context("failed to serialize report summary")?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

fn print_summary(args: &Args, stats: &EventStats, record_count: usize) {
    println!(
        "Read {} sessions across {} venues",
        record_count.to_string().bold(),
        stats.venues.len().to_string().bold()
    );
    if args.verbose {
        for (campaign, titles) in &stats.lodge.sessions_by_campaign {
            println!(
                "  {:30} {} sessions, {} seats",
                campaign.yellow(),
                titles.len(),
                stats.lodge.campaign_seats(campaign)
            );
        }
    }
    println!(
        "{} {}",
        "✅ Report written to".green(),
        args.output_file.display()
    );
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC),
/// or a bare date (midnight UTC).
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|_| format!("`{value}` is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: &Path) -> Result<Self> {
        if path.as_os_str() == "-" {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        }
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }

}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
