/*
  The end-to-end load: parse, reset the target database, transform,
  define the named graph and check what ended up in the store.
*/

use {
  std::time::{Duration, Instant},
  tracing::{error, info},
  crate::{
    config::Config,
    errors::{LoadError as Error, StoreError},
    datastore::{DatabaseServer, GraphSink},
    rdf::parser::TripleSet,
    transform::{self, TransformSummary},
    verify::{verify_structure, StructureReport},
  }
};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
  pub triples: usize,
  pub nodes: usize,
  pub relations: usize,
  pub structure: StructureReport,
  pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct LpgtLoader {
  config: Config,
}

/* Public */
impl LpgtLoader {
  pub fn new(config: &Config) -> Self {
    LpgtLoader {
      config: config.clone(),
    }
  }
  /* Nothing touches the server unless the data file parses */
  pub fn run<S: DatabaseServer>(&self, server: &mut S) -> Result<LoadReport> {
    let start = Instant::now();
    let triples = self.load_triples()?;
    self.load(server, &triples, start)
  }
  pub fn load_triples(&self) -> Result<TripleSet> {
    info!("Step 1: loading RDF data from {}", self.config.data_path.display());
    match TripleSet::from_rdf_with_base(&self.config.data_path, self.config.format, self.config.base_iri.as_deref()) {
      Ok(triples) => Ok(triples),
      Err(e) => {
        error!("Could not load RDF data: {}", e);
        Err(e.into())
      },
    }
  }
  /* Runs every step after parsing against an already loaded triple set */
  pub fn load<S: DatabaseServer>(&self, server: &mut S, triples: &TripleSet, start: Instant) -> Result<LoadReport> {
    let Config{ database, graph, vertex_collection, edge_collection, multi_valued, .. } = &self.config;

    info!("Step 2: recreating database {}", database);
    let db = server.recreate_database(database)?;

    info!("Step 3: creating collections {} and {}", vertex_collection, edge_collection);
    if !db.has_collection(vertex_collection) {
      db.create_collection(vertex_collection, false)?;
    }
    if !db.has_collection(edge_collection) {
      db.create_collection(edge_collection, true)?;
    }

    info!("Step 4: transforming {} triples", triples.len());
    let TransformSummary{ nodes, relations } = transform::transform(
      triples, &mut *db, vertex_collection, edge_collection, *multi_valued
    )?;

    info!("Step 5: defining graph {}", graph);
    define_graph(&mut *db, graph, vertex_collection, edge_collection)?;

    info!("Step 6: verifying structure");
    let structure = verify_structure(&*db, vertex_collection, edge_collection)?;

    let elapsed = start.elapsed();
    info!(
      "Loaded {} triples as {} nodes and {} relations in {:.2?}",
      triples.len(), nodes, relations, elapsed
    );
    Ok(LoadReport {
      triples: triples.len(),
      nodes,
      relations,
      structure,
      elapsed,
    })
  }
}

/* Replaces any graph of the same name with one edge definition
  from the vertex collection to itself */
pub fn define_graph<S: GraphSink + ?Sized>(sink: &mut S, graph: &str, vertex_collection: &str, edge_collection: &str) -> std::result::Result<(), StoreError> {
  if sink.has_graph(graph) {
    info!("Dropping existing graph: {}", graph);
    sink.delete_graph(graph)?;
  }
  sink.create_graph(graph)?;
  sink.create_vertex_collection(graph, vertex_collection)?;
  sink.create_edge_definition(graph, edge_collection, &[vertex_collection], &[vertex_collection])?;
  info!("Graph {} defined over {} and {}", graph, vertex_collection, edge_collection);
  Ok(())
}
