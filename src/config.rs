/*
  Run configuration. Built from defaults, an optional json file,
  then RDF_LPG_* environment variables. The CLI applies its own
  flags last.
*/

use {
  std::path::{Path, PathBuf},
  serde::{Serialize, Deserialize},
  tracing::debug,
  crate::{
    errors::ConfigError as Error,
    rdf::parser::RdfFormat,
    transform::MultiValuePolicy,
  }
};

type Result<T> = std::result::Result<T, Error>;

pub const ENV_DATA_PATH: &str = "RDF_LPG_DATA_PATH";
pub const ENV_DATABASE: &str = "RDF_LPG_DATABASE";
pub const ENV_GRAPH: &str = "RDF_LPG_GRAPH";
pub const ENV_PERSIST: &str = "RDF_LPG_PERSIST";
pub const ENV_LOG: &str = "RDF_LPG_LOG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
  pub data_path: PathBuf,
  /* Guessed from the data file's extension when absent */
  pub format: Option<RdfFormat>,
  pub base_iri: Option<String>,
  pub database: String,
  pub graph: String,
  pub vertex_collection: String,
  pub edge_collection: String,
  pub persist_location: Option<PathBuf>,
  pub multi_valued: MultiValuePolicy,
  pub log_level: String,
}
impl Default for Config {
  fn default() -> Self {
    Config {
      data_path: PathBuf::from("foaf-data.ttl"),
      format: None,
      base_iri: None,
      database: "FOAF-LPGT".into(),
      graph: "foaf_lpgt_graph".into(),
      vertex_collection: "Node".into(),
      edge_collection: "relation".into(),
      persist_location: None,
      multi_valued: MultiValuePolicy::LastWins,
      log_level: "info".into(),
    }
  }
}

/* Public */
impl Config {
  /* Constructors */
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    match serde_json::from_str(&json) {
      Ok(config) => Ok(config),
      Err(e) => Err(Error::FromBadJson(path.to_path_buf(), Box::new(e))),
    }
  }
  /* Defaults, then the file if given, then the environment */
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let mut config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
  }
  /* Operation */
  pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
    if let Some(path) = var(ENV_DATA_PATH) {
      debug!("{} overrides dataPath", ENV_DATA_PATH);
      self.data_path = PathBuf::from(path);
    }
    if let Some(database) = var(ENV_DATABASE) {
      self.database = database;
    }
    if let Some(graph) = var(ENV_GRAPH) {
      self.graph = graph;
    }
    if let Some(location) = var(ENV_PERSIST) {
      self.persist_location = Some(PathBuf::from(location));
    }
    if let Some(level) = var(ENV_LOG) {
      self.log_level = level;
    }
  }
  pub fn validate(&self) -> Result<()> {
    let names = [
      ("database", &self.database),
      ("graph", &self.graph),
      ("vertexCollection", &self.vertex_collection),
      ("edgeCollection", &self.edge_collection),
    ];
    for (field, value) in names.iter() {
      if value.trim().is_empty() {
        return Err(Error::InvalidValue(field.to_string(), "must not be empty".into()))
      }
    }
    if self.vertex_collection == self.edge_collection {
      return Err(Error::InvalidValue(
        "edgeCollection".into(),
        format!("must differ from vertexCollection ({})", self.vertex_collection)
      ))
    }
    if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
      return Err(Error::InvalidValue(
        "logLevel".into(),
        format!("'{}' is not one of {}", self.log_level, LOG_LEVELS.join("|"))
      ))
    }
    Ok(())
  }
}
