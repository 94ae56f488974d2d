use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use unigraph::csv_source::{self, CsvConfig};
use unigraph::server::{self, ServeConfig};
use unigraph::sqlite_source::{self, SqliteConfig};
use unigraph::xml_source::{self, XmlConfig};

#[derive(Parser)]
#[command(name = "unigraph")]
#[command(about = "Integrate university data sources into RDF and query them through a proxy")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the student contacts CSV into a Turtle dump
    Csv(CsvArgs),
    /// Convert the SQLite university database into a Turtle dump
    Sqlite(SqliteArgs),
    /// Convert the XML course catalog into a Turtle dump
    Xml(XmlArgs),
    /// Run the HTTP query proxy in front of the SPARQL engine
    Serve(ServeArgs),
}

#[derive(Args)]
struct CsvArgs {
    /// Path to the CSV file with contact info
    #[arg(long, default_value = unigraph::config::DEFAULT_CSV_SOURCE)]
    csv: PathBuf,

    /// Path of the Turtle file to create
    #[arg(short, long, default_value = unigraph::config::DEFAULT_CSV_OUTPUT)]
    output: PathBuf,

    /// Base IRI for the ontology namespace
    #[arg(long, default_value = unigraph::config::DEFAULT_BASE_IRI)]
    base_iri: String,
}

#[derive(Args)]
struct SqliteArgs {
    /// Path to the SQLite database
    #[arg(long, default_value = unigraph::config::DEFAULT_DB_SOURCE)]
    db: PathBuf,

    /// Path of the Turtle file to create
    #[arg(short, long, default_value = unigraph::config::DEFAULT_DB_OUTPUT)]
    output: PathBuf,

    /// Base IRI for the ontology namespace
    #[arg(long, default_value = unigraph::config::DEFAULT_BASE_IRI)]
    base_iri: String,
}

#[derive(Args)]
struct XmlArgs {
    /// Path to the XML file describing departments and courses
    #[arg(long, default_value = unigraph::config::DEFAULT_XML_SOURCE)]
    xml: PathBuf,

    /// Path of the Turtle file to create
    #[arg(short, long, default_value = unigraph::config::DEFAULT_XML_OUTPUT)]
    output: PathBuf,

    /// Base IRI for the ontology namespace
    #[arg(long, default_value = unigraph::config::DEFAULT_BASE_IRI)]
    base_iri: String,
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind the proxy on
    #[arg(long, default_value = unigraph::config::DEFAULT_BIND_ADDR)]
    bind: String,

    /// Query endpoint of the external SPARQL engine
    #[arg(long, env = "SPARQL_ENDPOINT", default_value = unigraph::config::DEFAULT_SPARQL_ENDPOINT)]
    endpoint: String,
}

fn run_csv(args: CsvArgs) -> Result<()> {
    let config = CsvConfig {
        csv: args.csv,
        output: args.output,
        base_iri: args.base_iri,
    };
    let written = csv_source::run_conversion(&config)?;
    println!("Wrote {} triples to {}", written, config.output.display());
    Ok(())
}

fn run_sqlite(args: SqliteArgs) -> Result<()> {
    let config = SqliteConfig {
        db: args.db,
        output: args.output,
        base_iri: args.base_iri,
    };
    let written = sqlite_source::run_conversion(&config)?;
    println!("Wrote {} triples to {}", written, config.output.display());
    Ok(())
}

fn run_xml(args: XmlArgs) -> Result<()> {
    let config = XmlConfig {
        xml: args.xml,
        output: args.output,
        base_iri: args.base_iri,
    };
    let written = xml_source::run_conversion(&config)?;
    println!("Wrote {} triples to {}", written, config.output.display());
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServeConfig {
        bind: args.bind,
        endpoint: args.endpoint,
    };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("unigraph-serve-worker")
        .enable_io()
        .enable_time()
        .build()?;
    rt.block_on(server::serve(config))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Csv(args) => run_csv(args),
        Commands::Sqlite(args) => run_sqlite(args),
        Commands::Xml(args) => run_xml(args),
        Commands::Serve(args) => run_serve(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
