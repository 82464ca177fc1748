use {
  std::path::PathBuf,
  clap::{Parser, Subcommand, ValueHint},
};

#[derive(Parser, Debug)]
#[command(about, version, name = "rdf-lpg")]
/// Loads RDF data into a document store as a labeled property graph
pub struct Args {
  /// trace, debug, info, warn or error
  ///
  /// Overrides RDF_LPG_LOG and the config file.
  #[arg(long, global = true)]
  pub log_level: Option<String>,
  /// JSON configuration file
  #[arg(long, global = true, value_hint = ValueHint::FilePath)]
  pub config: Option<PathBuf>,
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Run the whole load: parse, transform, define the graph and verify
  Load {
    /// RDF file to load
    #[arg(value_hint = ValueHint::FilePath)]
    data: Option<PathBuf>,
    /// Serialization of the data file
    ///
    /// By default the format is guessed from the file extension.
    #[arg(long)]
    format: Option<String>,
    /// Base IRI for relative references in the data file
    #[arg(long, value_hint = ValueHint::Url)]
    base: Option<String>,
    /// Target database, dropped and recreated on every load
    #[arg(long)]
    database: Option<String>,
    /// Name of the graph to define
    #[arg(long)]
    graph: Option<String>,
    /// Keep every value of repeated literal properties instead of the last one
    #[arg(long)]
    collect: bool,
    /// Write the store to this directory once loaded
    #[arg(long, value_hint = ValueHint::DirPath)]
    persist: Option<PathBuf>,
  },
  /// Check the structure of a previously persisted load
  Verify {
    /// Directory the store was persisted to
    #[arg(value_hint = ValueHint::DirPath)]
    store: Option<PathBuf>,
    /// Database to check
    #[arg(long)]
    database: Option<String>,
  },
}
