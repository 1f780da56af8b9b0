//! Command-line interface for livest
//!
//! # Usage
//!
//! ```bash
//! # One-off valuation
//! livest estimate --sqft 1850 --bhk 2 --locality "Banjara Hills"
//!
//! # Loan estimate and locality search as JSON
//! livest --format json emi --principal 7500000 --rate 8.75
//! livest localities --search chennai
//!
//! # Interactive prompt
//! livest
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use livest_utils::LogFormat;
use livest_valuation::interface::{FormatterFactory, OutputFormat, Reply, ValuationSession};
use livest_valuation::{
    EstimationEngine, HouseQuery, LeadDesk, LeadInquiry, LoanTerms, LocalityTable, ValuationConfig,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => OutputFormat::Table,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "livest", version)]
#[command(about = "Property valuations for South Indian localities", long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    /// JSON file with valuation settings (LIVEST_* variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON array of localities replacing the built-in table
    #[arg(long, global = true)]
    localities: Option<PathBuf>,

    /// JSON file with logging settings (app name, filter, format)
    #[arg(long, global = true)]
    log_config: Option<PathBuf>,

    /// Write log lines as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum CliCommand {
    /// Value a property
    Estimate {
        /// Floor area in square feet
        #[arg(long, default_value_t = 2400)]
        sqft: u32,
        /// Room configuration (clamped to 1-10)
        #[arg(long, default_value_t = 3)]
        bhk: u32,
        #[arg(long, default_value_t = 3)]
        bathrooms: u32,
        #[arg(short, long, default_value = "Tellapur")]
        locality: String,
        /// Seed the jitter for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the simulated processing delay
        #[arg(long)]
        no_delay: bool,
    },
    /// List localities, optionally filtered by name or city
    Localities {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Monthly loan instalment
    Emi {
        /// Loan amount in rupees
        #[arg(long)]
        principal: Option<f64>,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: Option<f64>,
        /// Tenure in years
        #[arg(long)]
        tenure: Option<u32>,
    },
    /// Ask an advisor to get in touch
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Listing the inquiry is about
        #[arg(long)]
        property: Option<String>,
    },
    /// Interactive prompt (the default)
    Interactive {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_delay: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ValuationConfig> {
    let config = match path {
        Some(path) => ValuationConfig::from_file(path)?,
        None => ValuationConfig::default(),
    };
    Ok(config.with_env()?)
}

fn load_localities(path: Option<&PathBuf>) -> anyhow::Result<LocalityTable> {
    Ok(match path {
        Some(path) => LocalityTable::from_file(path)?,
        None => LocalityTable::south_india(),
    })
}

fn build_engine(
    config: &ValuationConfig,
    localities: LocalityTable,
    seed: Option<u64>,
    no_delay: bool,
) -> anyhow::Result<EstimationEngine> {
    let mut builder = EstimationEngine::builder().config(config).localities(localities);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if no_delay {
        builder = builder.no_latency();
    }
    Ok(builder.build()?)
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║                  Livest Property Valuation                   ║
║                                                              ║
║    /estimate <sqft> [bhk] [bath] [locality]                  ║
║    /emi [amount] [rate] [years]                              ║
║    /localities [query]                                       ║
║    /contact <name> <email> <message>                         ║
║    /help  /exit                                              ║
║                                                              ║
║  Or type a locality or city name to search.                  ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

async fn run_interactive(
    config: ValuationConfig,
    localities: LocalityTable,
    format: OutputFormat,
    seed: Option<u64>,
    no_delay: bool,
) -> anyhow::Result<()> {
    print_banner();

    let engine = build_engine(&config, localities, seed, no_delay)?;
    let localities = engine.locality_table();
    let leads = if no_delay {
        LeadDesk::new(Arc::new(livest_valuation::NoLatency))?
    } else {
        LeadDesk::from_config(&config)?
    };
    let mut session = ValuationSession::new(
        Arc::new(engine),
        localities,
        leads,
        config,
        FormatterFactory::create(format),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", session.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match session.process_input(input).await {
            Reply::Output(text) => println!("{text}\n"),
            Reply::Exit => {
                println!("Goodbye!");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app = match &args.log_config {
        Some(path) => livest_utils::Config::load(path)?,
        None => livest_utils::Config {
            log_filter: "warn,livest_valuation=info".to_string(),
            ..livest_utils::Config::default()
        },
    };
    if args.json_logs || app.is_production() {
        app.log_format = LogFormat::Json;
    }
    livest_utils::init_tracing_with(&app);

    let config = load_config(args.config.as_ref())?;
    let localities = load_localities(args.localities.as_ref())?;
    let format = OutputFormat::from(args.format);
    let formatter = FormatterFactory::create(format);

    info!(app = %app.app_name, environment = %app.environment, ?format, "Starting livest");

    match args.command {
        Some(CliCommand::Estimate {
            sqft,
            bhk,
            bathrooms,
            locality,
            seed,
            no_delay,
        }) => {
            let query = HouseQuery::default()
                .with_sqft(sqft)
                .with_bhk(bhk)
                .with_bathrooms(bathrooms)
                .with_neighborhood(locality);
            let engine = build_engine(&config, localities, seed, no_delay)?;
            let valuation = engine.estimate(&query).await?;
            println!("{}", formatter.format_valuation(&query, &valuation));
        }
        Some(CliCommand::Localities { search }) => {
            let matches = match search.as_deref() {
                Some(query) => localities.search(query),
                None => localities.iter().collect(),
            };
            println!("{}", formatter.format_localities(&matches));
        }
        Some(CliCommand::Emi {
            principal,
            rate,
            tenure,
        }) => {
            let mut terms = LoanTerms::from_config(&config, None);
            if let Some(principal) = principal {
                terms = terms.with_principal(principal);
            }
            if let Some(rate) = rate {
                terms = terms.with_rate(rate);
            }
            if let Some(tenure) = tenure {
                terms = terms.with_tenure(tenure);
            }
            let breakdown = terms.breakdown()?;
            println!("{}", formatter.format_emi(&terms, &breakdown));
        }
        Some(CliCommand::Contact {
            name,
            email,
            message,
            property,
        }) => {
            let mut inquiry = LeadInquiry::new(name, email, message);
            if let Some(property) = property {
                inquiry = inquiry.about(property);
            }
            let receipt = LeadDesk::from_config(&config)?.submit(&inquiry).await?;
            println!("{}", formatter.format_receipt(&receipt));
        }
        Some(CliCommand::Interactive { seed, no_delay }) => {
            run_interactive(config, localities, format, seed, no_delay).await?;
        }
        None => run_interactive(config, localities, format, None, false).await?,
    }

    Ok(())
}
