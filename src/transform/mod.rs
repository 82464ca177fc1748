/*
  RDF triples to labeled property graph, in two stages. extract_nodes
  folds the triple set into one NodeRecord per resource and
  NodeTable::persist writes them to the vertex collection. Only the
  resulting PersistedNodes, which knows the id the sink assigned to
  every resource, can be handed to extract_relations, so edges are
  never built against a partial node set.
*/

pub mod coerce;
pub mod labels;

pub use coerce::{coerce_literal, PropertyValue};
pub use labels::{local_name, resource_label};

use {
  std::collections::BTreeMap,
  bimap::BiHashMap,
  serde::{Serialize, Deserialize},
  serde_json::Value,
  tracing::info,
  crate::{
    errors::TransformError as Error,
    datastore::{Document, DocumentId, GraphSink, SYSTEM_PREFIX},
    rdf::parser::TripleSet,
    Resource, Triple,
  }
};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
  UriRef,
  BlankNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
  ObjectProperty,
}

/* What happens when a subject has several literals under the same key */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiValuePolicy {
  /* The literal seen last in triple order is kept */
  LastWins,
  /* Every value is kept, in triple order, as a list */
  Collect,
}
impl Default for MultiValuePolicy {
  fn default() -> Self {
    MultiValuePolicy::LastWins
  }
}

/* Fields every vertex document carries. Literal properties may not
  overwrite them. */
pub const SHELL_FIELDS: [&str; 3] = ["uri", "label", "resource_kind"];

/* Prepended to property keys that would collide with a shell
  field or a store field */
pub const RENAMED_PREFIX: &str = "rdf_";

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
  pub uri: Option<String>,
  pub label: String,
  pub resource_kind: ResourceKind,
  pub properties: BTreeMap<String, PropertyValue>,
}
impl NodeRecord {
  pub fn skeleton(resource: &Resource) -> Self {
    NodeRecord {
      uri: resource.iri().map(String::from),
      label: resource_label(resource),
      resource_kind: resource.kind(),
      properties: BTreeMap::new(),
    }
  }
  pub fn to_document(&self) -> Document {
    let mut doc = Document::new();
    for (key, value) in &self.properties {
      doc.insert(property_key(key), property_to_json(value));
    }
    doc.insert("uri".into(), match &self.uri {
      Some(uri) => Value::String(uri.clone()),
      None => Value::Null,
    });
    doc.insert("label".into(), Value::String(self.label.clone()));
    doc.insert("resource_kind".into(), kind_to_json(self.resource_kind));
    doc
  }
  fn set_property(&mut self, key: &str, value: PropertyValue, policy: MultiValuePolicy) {
    if policy == MultiValuePolicy::Collect {
      if let Some(existing) = self.properties.get_mut(key) {
        match existing {
          PropertyValue::List(values) => values.push(value),
          _ => {
            let first = std::mem::replace(existing, PropertyValue::List(Vec::new()));
            *existing = PropertyValue::List(vec![first, value]);
          },
        }
        return
      }
    }
    self.properties.insert(key.to_string(), value);
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationRecord {
  pub from: DocumentId,
  pub to: DocumentId,
  pub predicate: String,
  pub predicate_label: String,
  pub relation_kind: RelationKind,
}
impl RelationRecord {
  pub fn to_document(&self) -> Document {
    let mut doc = Document::new();
    doc.insert("_from".into(), Value::String(self.from.to_string()));
    doc.insert("_to".into(), Value::String(self.to.to_string()));
    doc.insert("predicate".into(), Value::String(self.predicate.clone()));
    doc.insert("predicate_label".into(), Value::String(self.predicate_label.clone()));
    doc.insert("relation_kind".into(), match self.relation_kind {
      RelationKind::ObjectProperty => Value::String("ObjectProperty".into()),
    });
    doc
  }
}

/* Resources are interned to a surrogate index into records,
  assigned in order of first appearance. */
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
  dict: BiHashMap<Resource, usize>,
  records: Vec<NodeRecord>,
}

/* Public */
impl NodeTable {
  pub fn new() -> Self {
    NodeTable {
      dict: BiHashMap::new(),
      records: Vec::new(),
    }
  }
  pub fn len(&self) -> usize {
    self.records.len()
  }
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
  pub fn get(&self, resource: &Resource) -> Option<&NodeRecord> {
    self.dict.get_by_left(resource).map(|&i| &self.records[i])
  }
  pub fn iter(&self) -> impl Iterator<Item = (&Resource, &NodeRecord)> {
    let dict = &self.dict;
    self.records
      .iter()
      .enumerate()
      .filter_map(move |(i, record)| dict.get_by_right(&i).map(|resource| (resource, record)))
  }
  /* One insert per node. The first failure aborts, leaving whatever
  was already inserted in place. */
  pub fn persist<S: GraphSink + ?Sized>(self, sink: &mut S, collection: &str) -> Result<PersistedNodes> {
    info!("Inserting {} nodes...", self.records.len());
    let mut ids = Vec::with_capacity(self.records.len());
    for record in &self.records {
      ids.push(sink.insert(collection, record.to_document())?);
    }
    info!("Inserted {} nodes into {} collection", ids.len(), collection);
    Ok(PersistedNodes {
      dict: self.dict,
      ids,
    })
  }
}

/* Private */
impl NodeTable {
  fn register(&mut self, resource: &Resource) -> usize {
    if let Some(&i) = self.dict.get_by_left(resource) {
      return i
    }
    let i = self.records.len();
    self.records.push(NodeRecord::skeleton(resource));
    self.dict.insert(resource.clone(), i);
    i
  }
}

/* Every node of a NodeTable together with the id the sink gave it */
#[derive(Debug, Clone)]
pub struct PersistedNodes {
  dict: BiHashMap<Resource, usize>,
  ids: Vec<DocumentId>,
}
impl PersistedNodes {
  pub fn len(&self) -> usize {
    self.ids.len()
  }
  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }
  pub fn id_of(&self, resource: &Resource) -> Option<&DocumentId> {
    self.dict.get_by_left(resource).and_then(|&i| self.ids.get(i))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformSummary {
  pub nodes: usize,
  pub relations: usize,
}

/* Single flat pass. Subjects and resource objects each get a node,
  literal objects become properties of their subject. */
pub fn extract_nodes<'a, I>(triples: I, policy: MultiValuePolicy) -> NodeTable
where I: IntoIterator<Item = &'a Triple> {
  let mut table = NodeTable::new();
  for Triple{ subject, predicate, object } in triples {
    let s = table.register(subject);
    match object.resource() {
      Some(o) => {
        table.register(&o);
      },
      None => {
        if let Some((value, datatype)) = object.literal() {
          let key = property_key(local_name(predicate));
          table.records[s].set_property(&key, coerce_literal(value, datatype), policy);
        }
      },
    }
  }
  table
}

/* One relation per triple with a resource object, parallel
  edges included. */
pub fn extract_relations<'a, I>(triples: I, nodes: &PersistedNodes) -> Result<Vec<RelationRecord>>
where I: IntoIterator<Item = &'a Triple> {
  let mut relations = Vec::new();
  for Triple{ subject, predicate, object } in triples {
    let target = match object.resource() {
      Some(target) => target,
      None => continue,
    };
    let from = nodes.id_of(subject)
      .ok_or_else(|| Error::DanglingEndpoint(describe(subject)))?;
    let to = nodes.id_of(&target)
      .ok_or_else(|| Error::DanglingEndpoint(describe(&target)))?;
    relations.push(RelationRecord {
      from: from.clone(),
      to: to.clone(),
      predicate: predicate.clone(),
      predicate_label: local_name(predicate).to_string(),
      relation_kind: RelationKind::ObjectProperty,
    });
  }
  Ok(relations)
}

/* A single bulk insert, or no call at all for an empty batch */
pub fn persist_relations<S: GraphSink + ?Sized>(sink: &mut S, collection: &str, relations: &[RelationRecord]) -> Result<usize> {
  if relations.is_empty() {
    info!("No relations to insert");
    return Ok(0)
  }
  let documents = relations.iter().map(RelationRecord::to_document).collect();
  let ids = sink.insert_many(collection, documents)?;
  info!("Inserted {} relations into {} collection", ids.len(), collection);
  Ok(ids.len())
}

/* The whole transformation against one sink */
pub fn transform<S: GraphSink + ?Sized>(
  triples: &TripleSet,
  sink: &mut S,
  vertex_collection: &str,
  edge_collection: &str,
  policy: MultiValuePolicy,
) -> Result<TransformSummary> {
  info!("Transforming {} triples into a labeled property graph...", triples.len());
  let table = extract_nodes(triples, policy);
  let nodes = table.persist(sink, vertex_collection)?;
  info!("Creating relations...");
  let relations = extract_relations(triples, &nodes)?;
  let relations = persist_relations(sink, edge_collection, &relations)?;
  Ok(TransformSummary {
    nodes: nodes.len(),
    relations,
  })
}

/* Document key for a predicate's local name. rdfs:label ends up
  under rdf_label, a "_key" local name under rdf__key. */
pub fn property_key(local_name: &str) -> String {
  if local_name.starts_with(SYSTEM_PREFIX) || SHELL_FIELDS.contains(&local_name) {
    return format!("{}{}", RENAMED_PREFIX, local_name)
  }
  local_name.to_string()
}

/* Utils */
fn describe(resource: &Resource) -> String {
  match resource {
    Resource::Named{ iri } => format!("<{}>", iri),
    Resource::Blank{ id } => format!("_:{}", id),
  }
}
fn kind_to_json(kind: ResourceKind) -> Value {
  match kind {
    ResourceKind::UriRef => Value::String("UriRef".into()),
    ResourceKind::BlankNode => Value::String("BlankNode".into()),
  }
}
fn property_to_json(value: &PropertyValue) -> Value {
  match value {
    PropertyValue::Integer(i) => Value::from(*i),
    PropertyValue::Float(f) => Value::from(*f),
    PropertyValue::String(s) => Value::String(s.clone()),
    PropertyValue::List(values) => Value::Array(values.iter().map(property_to_json).collect()),
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use crate::{
    RdfNode,
    datastore::{CollectionInfo, Database, GraphDefinition},
    errors::StoreError,
  };
  use rand::seq::SliceRandom;
  use serde_json::json;

  const EX: &str = "http://example.org/person/";
  const FOAF: &str = "http://xmlns.com/foaf/0.1/";

  fn ex(local: &str) -> String {
    format!("{}{}", EX, local)
  }
  fn foaf(local: &str) -> String {
    format!("{}{}", FOAF, local)
  }
  fn lit(val: &str) -> RdfNode {
    RdfNode::RawLit{ val: val.into() }
  }
  fn typed(val: &str, xsd: &str) -> RdfNode {
    RdfNode::TypedLit{ val: val.into(), datatype: format!("http://www.w3.org/2001/XMLSchema#{}", xsd) }
  }
  fn blank(id: &str) -> RdfNode {
    RdfNode::Blank{ id: id.into() }
  }
  fn alice_and_bob() -> Vec<Triple> {
    vec![
      Triple::new(ex("alice").as_str(), &foaf("name"), lit("Alice")),
      Triple::new(ex("alice").as_str(), &foaf("knows"), ex("bob").as_str()),
      Triple::new(ex("bob").as_str(), &foaf("name"), lit("Bob")),
    ]
  }
  fn lpgt_db() -> Database {
    let mut db = Database::new("test");
    db.create_collection("Node", false).unwrap();
    db.create_collection("relation", true).unwrap();
    db
  }

  /* Wraps a Database, counting calls and optionally failing inserts */
  struct RecordingSink {
    db: Database,
    inserts: usize,
    bulk_inserts: usize,
    fail_on_insert: Option<usize>,
  }
  impl RecordingSink {
    fn new() -> Self {
      RecordingSink { db: lpgt_db(), inserts: 0, bulk_inserts: 0, fail_on_insert: None }
    }
  }
  impl GraphSink for RecordingSink {
    fn has_collection(&self, name: &str) -> bool { self.db.has_collection(name) }
    fn create_collection(&mut self, name: &str, edge: bool) -> std::result::Result<(), StoreError> {
      self.db.create_collection(name, edge)
    }
    fn collections(&self) -> Vec<CollectionInfo> { self.db.collections() }
    fn insert(&mut self, collection: &str, document: Document) -> std::result::Result<DocumentId, StoreError> {
      self.inserts += 1;
      if Some(self.inserts) == self.fail_on_insert {
        return Err(StoreError::Unavailable("connection reset".into()))
      }
      self.db.insert(collection, document)
    }
    fn insert_many(&mut self, collection: &str, documents: Vec<Document>) -> std::result::Result<Vec<DocumentId>, StoreError> {
      self.bulk_inserts += 1;
      self.db.insert_many(collection, documents)
    }
    fn count(&self, collection: &str) -> std::result::Result<usize, StoreError> { self.db.count(collection) }
    fn all(&self, collection: &str, limit: usize) -> std::result::Result<Vec<Document>, StoreError> {
      self.db.all(collection, limit)
    }
    fn find(&self, collection: &str, predicate: &dyn Fn(&Document) -> bool) -> std::result::Result<Option<Document>, StoreError> {
      self.db.find(collection, predicate)
    }
    fn has_graph(&self, name: &str) -> bool { self.db.has_graph(name) }
    fn create_graph(&mut self, name: &str) -> std::result::Result<(), StoreError> { self.db.create_graph(name) }
    fn delete_graph(&mut self, name: &str) -> std::result::Result<(), StoreError> { self.db.delete_graph(name) }
    fn graph(&self, name: &str) -> std::result::Result<GraphDefinition, StoreError> { self.db.graph(name) }
    fn create_vertex_collection(&mut self, graph: &str, collection: &str) -> std::result::Result<(), StoreError> {
      self.db.create_vertex_collection(graph, collection)
    }
    fn create_edge_definition(&mut self, graph: &str, edge_collection: &str, from: &[&str], to: &[&str]) -> std::result::Result<(), StoreError> {
      self.db.create_edge_definition(graph, edge_collection, from, to)
    }
  }

  #[test]
  fn alice_knows_bob() {
    let triples: TripleSet = alice_and_bob().into_iter().collect();
    let mut sink = RecordingSink::new();
    let summary = transform(&triples, &mut sink, "Node", "relation", MultiValuePolicy::LastWins).unwrap();
    assert_eq!(TransformSummary{ nodes: 2, relations: 1 }, summary);

    let nodes = sink.db.all("Node", 10).unwrap();
    assert_eq!(2, nodes.len());
    let alice = &nodes[0];
    assert_eq!(Some(&json!(ex("alice"))), alice.get("uri"));
    assert_eq!(Some(&json!("alice")), alice.get("label"));
    assert_eq!(Some(&json!("UriRef")), alice.get("resource_kind"));
    assert_eq!(Some(&json!("Alice")), alice.get("name"));
    assert_eq!(Some(&json!("Bob")), nodes[1].get("name"));

    let relations = sink.db.all("relation", 10).unwrap();
    assert_eq!(1, relations.len());
    assert_eq!(Some(&json!("Node/1")), relations[0].get("_from"));
    assert_eq!(Some(&json!("Node/2")), relations[0].get("_to"));
    assert_eq!(Some(&json!(foaf("knows"))), relations[0].get("predicate"));
    assert_eq!(Some(&json!("knows")), relations[0].get("predicate_label"));
    assert_eq!(Some(&json!("ObjectProperty")), relations[0].get("relation_kind"));
    assert_eq!(1, sink.bulk_inserts);
  }
  #[test]
  fn empty_triple_set() {
    let mut sink = RecordingSink::new();
    let summary = transform(&TripleSet::new(), &mut sink, "Node", "relation", MultiValuePolicy::LastWins).unwrap();
    assert_eq!(TransformSummary::default(), summary);
    assert_eq!(0, sink.inserts);
    assert_eq!(0, sink.bulk_inserts);
    assert!(extract_nodes(&TripleSet::new(), MultiValuePolicy::LastWins).is_empty());
  }
  #[test]
  fn object_only_resources_get_skeletons() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), &foaf("knows"), ex("bob").as_str()),
      Triple::new(ex("alice").as_str(), &foaf("knows"), blank("b0")),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    assert_eq!(3, table.len());
    let bob = table.get(&Resource::from(ex("bob").as_str())).unwrap();
    assert_eq!(NodeRecord::skeleton(&Resource::from(ex("bob").as_str())), *bob);
    assert!(bob.properties.is_empty());
    let b0 = table.get(&Resource::Blank{ id: "b0".into() }).unwrap();
    assert_eq!(None, b0.uri);
    assert_eq!("b0", b0.label);
    assert_eq!(ResourceKind::BlankNode, b0.resource_kind);
  }
  #[test]
  fn predicates_and_literals_never_become_nodes() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), &foaf("name"), lit(&ex("bob"))),
      Triple::new(ex("carol").as_str(), &foaf("knows"), ex("alice").as_str()),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    assert_eq!(2, table.len());
    assert!(table.get(&Resource::from(foaf("name").as_str())).is_none());
    assert!(table.get(&Resource::from(ex("bob").as_str())).is_none());
  }
  #[test]
  fn literal_properties_are_coerced() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), &foaf("age"), typed("30", "integer")),
      Triple::new(ex("alice").as_str(), &foaf("height"), typed("1.68", "double")),
      Triple::new(ex("alice").as_str(), &foaf("shoeSize"), typed("big", "int")),
      Triple::new(ex("alice").as_str(), "http://www.w3.org/2000/01/rdf-schema#comment",
        RdfNode::LangTaggedLit{ val: "salut".into(), lang: "fr".into() }),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    let alice = table.get(&Resource::from(ex("alice").as_str())).unwrap();
    assert_eq!(Some(&PropertyValue::Integer(30)), alice.properties.get("age"));
    assert_eq!(Some(&PropertyValue::Float(1.68)), alice.properties.get("height"));
    assert_eq!(Some(&PropertyValue::from("big")), alice.properties.get("shoeSize"));
    assert_eq!(Some(&PropertyValue::from("salut")), alice.properties.get("comment"));
  }
  #[test]
  fn non_finite_floats_are_stored_as_text() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), &foaf("height"), typed("NaN", "double")),
      Triple::new(ex("alice").as_str(), &foaf("reach"), typed("INF", "float")),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    let doc = table.get(&Resource::from(ex("alice").as_str())).unwrap().to_document();
    assert_eq!(Some(&json!("NaN")), doc.get("height"));
    assert_eq!(Some(&json!("INF")), doc.get("reach"));
  }
  #[test]
  fn repeated_keys_last_write_wins() {
    let first = Triple::new(ex("alice").as_str(), &foaf("nick"), lit("ali"));
    let second = Triple::new(ex("alice").as_str(), &foaf("nick"), lit("al"));
    let forwards = extract_nodes(&vec![first.clone(), second.clone()], MultiValuePolicy::LastWins);
    let backwards = extract_nodes(&vec![second, first], MultiValuePolicy::LastWins);
    let alice = Resource::from(ex("alice").as_str());
    assert_eq!(Some(&PropertyValue::from("al")), forwards.get(&alice).unwrap().properties.get("nick"));
    assert_eq!(Some(&PropertyValue::from("ali")), backwards.get(&alice).unwrap().properties.get("nick"));
  }
  #[test]
  fn repeated_keys_collect() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), &foaf("nick"), lit("ali")),
      Triple::new(ex("alice").as_str(), &foaf("nick"), lit("al")),
      Triple::new(ex("alice").as_str(), "http://example.org/other#nick", lit("a")),
      Triple::new(ex("alice").as_str(), &foaf("name"), lit("Alice")),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::Collect);
    let alice = table.get(&Resource::from(ex("alice").as_str())).unwrap();
    assert_eq!(
      Some(&PropertyValue::List(vec!["ali".into(), "al".into(), "a".into()])),
      alice.properties.get("nick")
    );
    assert_eq!(Some(&PropertyValue::from("Alice")), alice.properties.get("name"));
    assert_eq!(Some(&json!(["ali", "al", "a"])), alice.to_document().get("nick"));
  }
  #[test]
  fn parallel_edges_are_kept() {
    let triples: TripleSet = vec![
      Triple::new(ex("alice").as_str(), &foaf("knows"), ex("bob").as_str()),
      Triple::new(ex("alice").as_str(), "http://example.org/rel#worksWith", ex("bob").as_str()),
      Triple::new(ex("alice").as_str(), &foaf("knows"), ex("bob").as_str()),
      Triple::new(ex("alice").as_str(), &foaf("knows"), ex("alice").as_str()),
      Triple::new(ex("bob").as_str(), &foaf("knows"), ex("alice").as_str()),
    ].into_iter().collect();
    let mut sink = RecordingSink::new();
    let summary = transform(&triples, &mut sink, "Node", "relation", MultiValuePolicy::LastWins).unwrap();
    assert_eq!(2, summary.nodes);
    assert_eq!(4, summary.relations);
    let labels: Vec<serde_json::Value> = sink.db.all("relation", 10).unwrap()
      .into_iter()
      .filter_map(|doc| doc.get("predicate_label").cloned())
      .collect();
    assert_eq!(vec![json!("knows"), json!("worksWith"), json!("knows"), json!("knows")], labels);
  }
  #[test]
  fn counts_do_not_depend_on_order() {
    let mut triples = alice_and_bob();
    triples.extend(vec![
      Triple::new(ex("alice").as_str(), &foaf("knows"), blank("x")),
      Triple::new(Resource::Blank{ id: "x".into() }, &foaf("name"), lit("X")),
      Triple::new(Resource::Blank{ id: "x".into() }, &foaf("knows"), ex("carol").as_str()),
      Triple::new(ex("bob").as_str(), &foaf("age"), typed("40", "integer")),
      Triple::new(ex("carol").as_str(), &foaf("knows"), ex("alice").as_str()),
    ]);
    let resources = 4;
    let resource_objects = triples.iter().filter(|t| !t.object.is_literal()).count();
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
      triples.shuffle(&mut rng);
      let set: TripleSet = triples.iter().cloned().collect();
      let mut sink = RecordingSink::new();
      let summary = transform(&set, &mut sink, "Node", "relation", MultiValuePolicy::LastWins).unwrap();
      assert_eq!(resources, summary.nodes);
      assert_eq!(resource_objects, summary.relations);
      assert_eq!(resources, sink.db.count("Node").unwrap());
    }
  }
  #[test]
  fn failed_node_insert_aborts_before_relations() {
    let triples: TripleSet = alice_and_bob().into_iter().collect();
    let mut sink = RecordingSink::new();
    sink.fail_on_insert = Some(2);
    let res = transform(&triples, &mut sink, "Node", "relation", MultiValuePolicy::LastWins);
    assert!(matches!(res, Err(Error::Store(_))));
    assert_eq!(1, sink.db.count("Node").unwrap());
    assert_eq!(0, sink.bulk_inserts);
    assert_eq!(0, sink.db.count("relation").unwrap());
  }
  #[test]
  fn missing_endpoint_is_an_integrity_error() {
    let known = vec![Triple::new(ex("alice").as_str(), &foaf("name"), lit("Alice"))];
    let mut sink = RecordingSink::new();
    let nodes = extract_nodes(&known, MultiValuePolicy::LastWins).persist(&mut sink, "Node").unwrap();
    let unknown = vec![Triple::new(ex("alice").as_str(), &foaf("knows"), ex("bob").as_str())];
    match extract_relations(&unknown, &nodes) {
      Err(Error::DanglingEndpoint(resource)) => assert_eq!(format!("<{}>", ex("bob")), resource),
      other => panic!("expected a dangling endpoint, got {:?}", other),
    }
  }
  #[test]
  fn colliding_keys_are_renamed() {
    let triples = vec![
      Triple::new(ex("alice").as_str(), "http://www.w3.org/2000/01/rdf-schema#label", lit("Alice A.")),
      Triple::new(ex("alice").as_str(), "http://example.org/vocab#_key", lit("nope")),
      Triple::new(ex("alice").as_str(), "http://example.org/vocab#resource_kind", lit("Person")),
      Triple::new(ex("alice").as_str(), &foaf("name"), lit("Alice")),
    ];
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    let alice = table.get(&Resource::from(ex("alice").as_str())).unwrap();
    assert_eq!(
      vec!["name", "rdf__key", "rdf_label", "rdf_resource_kind"],
      alice.properties.keys().map(|k| k.as_str()).collect::<Vec<_>>()
    );
    let mut sink = RecordingSink::new();
    table.persist(&mut sink, "Node").unwrap();
    let stored = &sink.db.all("Node", 1).unwrap()[0];
    assert_eq!(Some(&json!("alice")), stored.get("label"));
    assert_eq!(Some(&json!("Alice A.")), stored.get("rdf_label"));
    assert_eq!(Some(&json!("1")), stored.get("_key"));
    assert_eq!(Some(&json!("nope")), stored.get("rdf__key"));
    assert_eq!(Some(&json!("UriRef")), stored.get("resource_kind"));
    assert_eq!(Some(&json!("Person")), stored.get("rdf_resource_kind"));
    assert_eq!(Some(&json!("Alice")), stored.get("name"));
  }
  #[test]
  fn property_keys() {
    assert_eq!("name", property_key("name"));
    assert_eq!("rdf_uri", property_key("uri"));
    assert_eq!("rdf__id", property_key("_id"));
    assert_eq!("labels", property_key("labels"));
  }
  #[test]
  fn blank_node_documents() {
    let record = NodeRecord::skeleton(&Resource::Blank{ id: "b7".into() });
    let doc = record.to_document();
    assert_eq!(Some(&serde_json::Value::Null), doc.get("uri"));
    assert_eq!(Some(&json!("b7")), doc.get("label"));
    assert_eq!(Some(&json!("BlankNode")), doc.get("resource_kind"));
  }
  #[test]
  fn node_table_iter_follows_first_appearance() {
    let triples = alice_and_bob();
    let table = extract_nodes(&triples, MultiValuePolicy::LastWins);
    let labels: Vec<&str> = table.iter().map(|(_, record)| record.label.as_str()).collect();
    assert_eq!(vec!["alice", "bob"], labels);
  }
}
