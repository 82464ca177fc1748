/*
  The document store side of a load: databases holding named
  collections of JSON documents, plus named graphs defined over
  vertex and edge collections.
*/

pub mod graph;
pub mod memory;

pub use graph::{EdgeDefinition, GraphDefinition};
pub use memory::{Collection, Database, MemoryServer};

use {
  serde::{Serialize, Deserialize},
  tracing::info,
  crate::errors::StoreError as Error,
};

type Result<T> = std::result::Result<T, Error>;

pub type Document = serde_json::Map<String, serde_json::Value>;

/* Collections whose names start with this are owned by the store */
pub const SYSTEM_PREFIX: char = '_';

/* Rendered as "<collection>/<key>", which is what edge
  documents carry in _from and _to */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId {
  pub collection: String,
  pub key: String,
}
impl DocumentId {
  pub fn new(collection: &str, key: &str) -> Self {
    DocumentId {
      collection: collection.to_string(),
      key: key.to_string(),
    }
  }
  pub fn parse(id: &str) -> Option<Self> {
    match id.split_once('/') {
      Some((collection, key)) if !collection.is_empty() && !key.is_empty() && !key.contains('/') => {
        Some(Self::new(collection, key))
      },
      _ => None,
    }
  }
}
impl std::fmt::Display for DocumentId {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}/{}", self.collection, self.key)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
  pub name: String,
  pub edge: bool,
}
impl CollectionInfo {
  pub fn is_system(&self) -> bool {
    self.name.starts_with(SYSTEM_PREFIX)
  }
}

/* Everything a load needs from one database */
pub trait GraphSink {
  /* Required */
  fn has_collection(&self, name: &str) -> bool;
  fn create_collection(&mut self, name: &str, edge: bool) -> Result<()>;
  fn collections(&self) -> Vec<CollectionInfo>;
  fn insert(&mut self, collection: &str, document: Document) -> Result<DocumentId>;
  fn insert_many(&mut self, collection: &str, documents: Vec<Document>) -> Result<Vec<DocumentId>>;
  fn count(&self, collection: &str) -> Result<usize>;
  /* Up to limit documents, in insertion order */
  fn all(&self, collection: &str, limit: usize) -> Result<Vec<Document>>;
  /* First document in insertion order that satisfies the predicate */
  fn find(&self, collection: &str, predicate: &dyn Fn(&Document) -> bool) -> Result<Option<Document>>;
  fn has_graph(&self, name: &str) -> bool;
  fn create_graph(&mut self, name: &str) -> Result<()>;
  fn delete_graph(&mut self, name: &str) -> Result<()>;
  fn graph(&self, name: &str) -> Result<GraphDefinition>;
  fn create_vertex_collection(&mut self, graph: &str, collection: &str) -> Result<()>;
  fn create_edge_definition(&mut self, graph: &str, edge_collection: &str, from: &[&str], to: &[&str]) -> Result<()>;
  /* Provided */
  fn sample(&self, collection: &str) -> Result<Option<Document>> {
    Ok(self.all(collection, 1)?.into_iter().next())
  }
}

/* Holds named databases */
pub trait DatabaseServer {
  type Database: GraphSink;
  /* Required */
  fn has_database(&self, name: &str) -> bool;
  fn create_database(&mut self, name: &str) -> Result<()>;
  fn delete_database(&mut self, name: &str) -> Result<()>;
  fn database(&self, name: &str) -> Result<&Self::Database>;
  fn database_mut(&mut self, name: &str) -> Result<&mut Self::Database>;
  /* Provided */
  fn recreate_database(&mut self, name: &str) -> Result<&mut Self::Database> {
    if self.has_database(name) {
      info!("Dropping existing database: {}", name);
      self.delete_database(name)?;
    }
    info!("Creating database: {}", name);
    self.create_database(name)?;
    self.database_mut(name)
  }
}
