/*
  Loads RDF data into a graph-capable document store as a labeled property
  graph: one vertex collection holding a document per RDF resource, one edge
  collection holding a document per resource-valued statement.
*/

/* Exports */

pub mod config;
pub mod datastore;
pub mod errors;
pub mod loader;
pub mod logging;
pub mod rdf;
pub mod transform;
pub mod verify;

pub use config::Config;
pub use datastore::{DatabaseServer, GraphSink, MemoryServer};
pub use loader::{LoadReport, LpgtLoader};
pub use rdf::parser::{RdfFormat, TripleSet};
pub use transform::{NodeRecord, PropertyValue, RelationRecord, ResourceKind};

/* Common Definitions */

/* Anything that can be the subject of a triple. Blank node ids
  are only meaningful within the parse that produced them. */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resource {
  Named{ iri: String },
  Blank{ id: String },
}
impl Resource {
  pub fn kind(&self) -> ResourceKind {
    match self {
      Resource::Named{..} => ResourceKind::UriRef,
      Resource::Blank{..} => ResourceKind::BlankNode,
    }
  }
  pub fn iri(&self) -> Option<&str> {
    match self {
      Resource::Named{ iri } => Some(iri),
      Resource::Blank{..} => None,
    }
  }
}
impl std::convert::From<&str> for Resource {
  fn from(s: &str) -> Self {
    Self::Named{ iri: s.to_string() }
  }
}

/* Anything that can be the object of a triple */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum RdfNode {
  Named{ iri: String },
  Blank{ id: String },
  RawLit{ val: String },
  LangTaggedLit{ val: String, lang: String },
  TypedLit{ val: String, datatype: String },
}
impl RdfNode {
  /* The object as a Resource, None for literals */
  pub fn resource(&self) -> Option<Resource> {
    match self {
      RdfNode::Named{ iri } => Some(Resource::Named{ iri: iri.clone() }),
      RdfNode::Blank{ id } => Some(Resource::Blank{ id: id.clone() }),
      _ => None,
    }
  }
  pub fn is_literal(&self) -> bool {
    self.resource().is_none()
  }
  /* Lexical value and datatype of a literal */
  pub fn literal(&self) -> Option<(&str, Option<&str>)> {
    match self {
      RdfNode::RawLit{ val } => Some((val, None)),
      RdfNode::LangTaggedLit{ val, .. } => Some((val, None)),
      RdfNode::TypedLit{ val, datatype } => Some((val, Some(datatype))),
      _ => None,
    }
  }
}
impl std::convert::From<&str> for RdfNode {
  fn from(s: &str) -> Self {
    Self::Named{ iri: s.to_string() }
  }
}
impl std::convert::From<Resource> for RdfNode {
  fn from(r: Resource) -> Self {
    match r {
      Resource::Named{ iri } => RdfNode::Named{ iri },
      Resource::Blank{ id } => RdfNode::Blank{ id },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Triple {
  pub subject: Resource,
  pub predicate: String,
  pub object: RdfNode,
}
impl Triple {
  pub fn new(subject: impl Into<Resource>, predicate: &str, object: impl Into<RdfNode>) -> Self {
    Triple {
      subject: subject.into(),
      predicate: predicate.to_string(),
      object: object.into(),
    }
  }
}
