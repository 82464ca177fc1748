use {
  anyhow::{bail, Context},
  clap::Parser,
  tracing::{error, info},
  rdf_lpg::{
    config::Config,
    datastore::{DatabaseServer, MemoryServer},
    logging,
    transform::MultiValuePolicy,
    verify::{verify_structure, StructureReport},
    LpgtLoader, RdfFormat,
  },
  crate::cli::{Args, Command},
};

mod cli;

fn main() -> anyhow::Result<()> {
  let args = Args::parse();
  let mut config = Config::load(args.config.as_deref())
    .with_context(|| "Could not read the configuration")?;
  if let Some(level) = &args.log_level {
    config.log_level = level.clone();
  }
  logging::init(&config.log_level);

  match args.command {
    Command::Load{ data, format, base, database, graph, collect, persist } => {
      if let Some(data) = data {
        config.data_path = data;
      }
      if let Some(format) = format {
        config.format = Some(format.parse::<RdfFormat>()?);
      }
      if base.is_some() {
        config.base_iri = base;
      }
      if let Some(database) = database {
        config.database = database;
      }
      if let Some(graph) = graph {
        config.graph = graph;
      }
      if collect {
        config.multi_valued = MultiValuePolicy::Collect;
      }
      if persist.is_some() {
        config.persist_location = persist;
      }
      config.validate()?;
      load(&config)
    },
    Command::Verify{ store, database } => {
      if store.is_some() {
        config.persist_location = store;
      }
      if let Some(database) = database {
        config.database = database;
      }
      config.validate()?;
      verify(&config)
    },
  }
}

fn load(config: &Config) -> anyhow::Result<()> {
  let mut server = MemoryServer::new();
  let report = LpgtLoader::new(config)
    .run(&mut server)
    .with_context(|| format!("Loading {} failed", config.data_path.display()))?;
  if let Some(location) = &config.persist_location {
    server.persist_to(location)
      .with_context(|| format!("Could not persist the store to {}", location.display()))?;
    info!("Store persisted to {}", location.display());
  }
  println!(
    "{} triples -> {} nodes, {} relations in {:.2?}",
    report.triples, report.nodes, report.relations, report.elapsed
  );
  print_structure(&report.structure);
  if !report.structure.is_ok() {
    bail!("Unexpected collections in {}", config.database)
  }
  Ok(())
}

fn verify(config: &Config) -> anyhow::Result<()> {
  let location = match &config.persist_location {
    Some(location) => location,
    None => bail!("No store location given, pass one or set persistLocation"),
  };
  let server = MemoryServer::from_backup(location)
    .with_context(|| format!("Could not open the store at {}", location.display()))?;
  let db = server.database(&config.database)?;
  let report = verify_structure(db, &config.vertex_collection, &config.edge_collection)?;
  print_structure(&report);
  if !report.is_ok() {
    error!("Structure check failed for {}", config.database);
    bail!("Unexpected collections in {}", config.database)
  }
  Ok(())
}

fn print_structure(report: &StructureReport) {
  println!("collections: {}", report.found.join(", "));
  println!("vertices: {}, edges: {}", report.vertex_count, report.edge_count);
  if let Some(node) = &report.sample_named {
    println!("sample: {}", serde_json::Value::Object(node.clone()));
  }
}
