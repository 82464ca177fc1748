/*
  Post-load structural check: the database should hold exactly
  the vertex and edge collections of the load, besides the
  store's own system collections.
*/

use {
  serde::{Serialize, Deserialize},
  serde_json::Value,
  tracing::{error, info},
  crate::{
    errors::StoreError as Error,
    datastore::{Document, GraphSink},
  }
};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureStatus {
  Ok,
  /* The non-system collections are not exactly the expected pair */
  Mismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
  pub status: StructureStatus,
  pub expected: Vec<String>,
  pub found: Vec<String>,
  pub vertex_count: usize,
  pub edge_count: usize,
  pub sample_vertex: Option<Document>,
  pub sample_edge: Option<Document>,
  /* First UriRef node with a name property */
  pub sample_named: Option<Document>,
}
impl StructureReport {
  pub fn is_ok(&self) -> bool {
    self.status == StructureStatus::Ok
  }
}

/* Counts and samples are only read for collections that exist */
pub fn verify_structure<S: GraphSink + ?Sized>(sink: &S, vertex_collection: &str, edge_collection: &str) -> Result<StructureReport> {
  info!("Verifying graph structure...");
  let mut found: Vec<String> = sink.collections()
    .into_iter()
    .filter(|c| !c.is_system())
    .map(|c| c.name)
    .collect();
  found.sort();
  let mut expected = vec![vertex_collection.to_string(), edge_collection.to_string()];
  expected.sort();
  let status = if found == expected {
    StructureStatus::Ok
  }
  else {
    error!("Unexpected collections {:?}, expected exactly {:?}", found, expected);
    StructureStatus::Mismatch
  };

  let (vertex_count, sample_vertex, sample_named) = if sink.has_collection(vertex_collection) {
    let named = sink.find(vertex_collection, &is_named_node)?;
    (sink.count(vertex_collection)?, sink.sample(vertex_collection)?, named)
  }
  else {
    (0, None, None)
  };
  let (edge_count, sample_edge) = if sink.has_collection(edge_collection) {
    (sink.count(edge_collection)?, sink.sample(edge_collection)?)
  }
  else {
    (0, None)
  };
  info!("{}: {} documents", vertex_collection, vertex_count);
  info!("{}: {} documents", edge_collection, edge_count);
  if let Some(node) = &sample_named {
    info!("Sample named node: {}", serde_json::Value::Object(node.clone()));
  }

  Ok(StructureReport {
    status,
    expected,
    found,
    vertex_count,
    edge_count,
    sample_vertex,
    sample_edge,
    sample_named,
  })
}

/* Utils */
fn is_named_node(document: &Document) -> bool {
  document.get("resource_kind") == Some(&Value::String("UriRef".into()))
    && document.contains_key("name")
}
