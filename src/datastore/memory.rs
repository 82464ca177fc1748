
use {
  std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
  },
  serde::{Serialize, Deserialize},
  serde_json::Value,
  tracing::debug,
  crate::{
    errors::StoreError as Error,
    datastore::{
      CollectionInfo, DatabaseServer, Document, DocumentId, EdgeDefinition,
      GraphDefinition, GraphSink, SYSTEM_PREFIX,
    },
  }
};

type Result<T> = std::result::Result<T, Error>;

/* Where graph definitions live inside every database */
pub const GRAPHS_COLLECTION: &str = "_graphs";

const BACKUP_MARKER: &str = ".lpgbackup";
const HEAD_FILE: &str = "head.json";
const DATABASES_DIR: &str = "databases";

/* Documents keep insertion order, keys are handed out from a
  per-collection counter unless the document brings its own _key. */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
  name: String,
  edge: bool,
  key_max: u64,
  documents: Vec<Document>,
  #[serde(skip)]
  index: HashMap<String, usize>,
}

/* Public */
impl Collection {
  pub fn new(name: &str, edge: bool) -> Self {
    Collection {
      name: name.to_string(),
      edge,
      key_max: 0,
      documents: Vec::new(),
      index: HashMap::new(),
    }
  }
  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn is_edge(&self) -> bool {
    self.edge
  }
  pub fn len(&self) -> usize {
    self.documents.len()
  }
  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }
  pub fn iter(&self) -> std::slice::Iter<Document> {
    self.documents.iter()
  }
  pub fn get(&self, key: &str) -> Option<&Document> {
    self.index.get(key).map(|&i| &self.documents[i])
  }
  pub fn insert(&mut self, mut document: Document) -> Result<DocumentId> {
    if self.edge {
      self.check_edge(&document)?;
    }
    let key = match document.get("_key") {
      Some(Value::String(key)) if !key.is_empty() && !key.contains('/') => key.clone(),
      Some(other) => return Err(Error::InvalidName(other.to_string())),
      None => {
        self.key_max += 1;
        while self.index.contains_key(&self.key_max.to_string()) {
          self.key_max += 1;
        }
        self.key_max.to_string()
      },
    };
    if self.index.contains_key(&key) {
      return Err(Error::DuplicateKey(self.name.clone(), key))
    }
    let id = DocumentId::new(&self.name, &key);
    document.insert("_key".into(), Value::String(key.clone()));
    document.insert("_id".into(), Value::String(id.to_string()));
    self.index.insert(key, self.documents.len());
    self.documents.push(document);
    Ok(id)
  }
  pub fn remove(&mut self, key: &str) -> Option<Document> {
    let pos = self.index.remove(key)?;
    let document = self.documents.remove(pos);
    self.reindex();
    Some(document)
  }
}

/* Private */
impl Collection {
  fn check_edge(&self, document: &Document) -> Result<()> {
    for field in ["_from", "_to"].iter() {
      match document.get(*field) {
        Some(Value::String(id)) if DocumentId::parse(id).is_some() => {},
        Some(other) => return Err(Error::InvalidEdge(
          self.name.clone(),
          format!("{} is not a document id: {}", field, other)
        )),
        None => return Err(Error::InvalidEdge(
          self.name.clone(),
          format!("missing {}", field)
        )),
      }
    }
    Ok(())
  }
  fn reindex(&mut self) {
    self.index = self.documents
      .iter()
      .enumerate()
      .filter_map(|(i, doc)| match doc.get("_key") {
        Some(Value::String(key)) => Some((key.clone(), i)),
        _ => None,
      })
      .collect();
  }
}

/* Collections in creation order */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
  name: String,
  collections: Vec<Collection>,
}

/* Public */
impl Database {
  pub fn new(name: &str) -> Self {
    Database {
      name: name.to_string(),
      collections: vec![Collection::new(GRAPHS_COLLECTION, false)],
    }
  }
  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn collection(&self, name: &str) -> Result<&Collection> {
    self.collections
      .iter()
      .find(|c| c.name == name)
      .ok_or_else(|| Error::MissingCollection(name.to_string()))
  }
  pub fn collection_mut(&mut self, name: &str) -> Result<&mut Collection> {
    self.collections
      .iter_mut()
      .find(|c| c.name == name)
      .ok_or_else(|| Error::MissingCollection(name.to_string()))
  }
  pub fn drop_collection(&mut self, name: &str) -> Result<()> {
    if name == GRAPHS_COLLECTION {
      return Err(Error::InvalidName(name.to_string()))
    }
    let before = self.collections.len();
    self.collections.retain(|c| c.name != name);
    if self.collections.len() == before {
      return Err(Error::MissingCollection(name.to_string()))
    }
    Ok(())
  }
}

/* Private */
impl Database {
  fn put_graph(&mut self, graph: &GraphDefinition) -> Result<()> {
    let graphs = self.collection_mut(GRAPHS_COLLECTION)?;
    graphs.remove(&graph.name);
    graphs.insert(graph.to_document()?)?;
    Ok(())
  }
  /* Vertex and edge collections a graph refers to are created on demand */
  fn ensure_collection(&mut self, name: &str, edge: bool) -> Result<()> {
    if !self.has_collection(name) {
      return self.create_collection(name, edge)
    }
    if self.collection(name)?.edge != edge {
      return Err(Error::InvalidEdge(
        name.to_string(),
        format!("expected {} collection", if edge { "an edge" } else { "a document" })
      ))
    }
    Ok(())
  }
}

impl GraphSink for Database {
  fn has_collection(&self, name: &str) -> bool {
    self.collections.iter().any(|c| c.name == name)
  }
  fn create_collection(&mut self, name: &str, edge: bool) -> Result<()> {
    check_name(name)?;
    if self.has_collection(name) {
      return Err(Error::CollectionExists(name.to_string()))
    }
    debug!("Creating {} collection {} in {}", if edge { "edge" } else { "document" }, name, self.name);
    self.collections.push(Collection::new(name, edge));
    Ok(())
  }
  fn collections(&self) -> Vec<CollectionInfo> {
    self.collections
      .iter()
      .map(|c| CollectionInfo{ name: c.name.clone(), edge: c.edge })
      .collect()
  }
  fn insert(&mut self, collection: &str, document: Document) -> Result<DocumentId> {
    self.collection_mut(collection)?.insert(document)
  }
  fn insert_many(&mut self, collection: &str, documents: Vec<Document>) -> Result<Vec<DocumentId>> {
    let target = self.collection_mut(collection)?;
    debug!("Bulk inserting {} documents into {}", documents.len(), collection);
    documents.into_iter().map(|doc| target.insert(doc)).collect()
  }
  fn count(&self, collection: &str) -> Result<usize> {
    Ok(self.collection(collection)?.len())
  }
  fn all(&self, collection: &str, limit: usize) -> Result<Vec<Document>> {
    Ok(self.collection(collection)?.iter().take(limit).cloned().collect())
  }
  fn find(&self, collection: &str, predicate: &dyn Fn(&Document) -> bool) -> Result<Option<Document>> {
    Ok(self.collection(collection)?.iter().find(|&doc| predicate(doc)).cloned())
  }
  fn has_graph(&self, name: &str) -> bool {
    match self.collection(GRAPHS_COLLECTION) {
      Ok(graphs) => graphs.get(name).is_some(),
      Err(_) => false,
    }
  }
  fn create_graph(&mut self, name: &str) -> Result<()> {
    check_name(name)?;
    if self.has_graph(name) {
      return Err(Error::GraphExists(name.to_string()))
    }
    debug!("Creating graph {} in {}", name, self.name);
    self.put_graph(&GraphDefinition::new(name))
  }
  fn delete_graph(&mut self, name: &str) -> Result<()> {
    match self.collection_mut(GRAPHS_COLLECTION)?.remove(name) {
      Some(_) => Ok(()),
      None => Err(Error::MissingGraph(name.to_string())),
    }
  }
  fn graph(&self, name: &str) -> Result<GraphDefinition> {
    match self.collection(GRAPHS_COLLECTION)?.get(name) {
      Some(doc) => GraphDefinition::from_document(doc),
      None => Err(Error::MissingGraph(name.to_string())),
    }
  }
  fn create_vertex_collection(&mut self, graph: &str, collection: &str) -> Result<()> {
    let mut definition = self.graph(graph)?;
    self.ensure_collection(collection, false)?;
    definition.add_vertex_collection(collection)?;
    self.put_graph(&definition)
  }
  fn create_edge_definition(&mut self, graph: &str, edge_collection: &str, from: &[&str], to: &[&str]) -> Result<()> {
    let mut definition = self.graph(graph)?;
    self.ensure_collection(edge_collection, true)?;
    for vertices in from.iter().chain(to.iter()) {
      self.ensure_collection(vertices, false)?;
    }
    definition.add_edge_definition(EdgeDefinition {
      collection: edge_collection.to_string(),
      from: from.iter().map(|s| s.to_string()).collect(),
      to: to.iter().map(|s| s.to_string()).collect(),
    })?;
    self.put_graph(&definition)
  }
}

/* Every database lives in memory; persist() writes them all
  out as json under the persist location. */
#[derive(Default, Debug, Clone, PartialEq)]
pub struct MemoryServer {
  databases: BTreeMap<String, Database>,
  persist_location: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Head {
  databases: Vec<String>,
  persist_location: Option<String>,
}

/* Public */
impl MemoryServer {
  /* Constructors */
  pub fn new() -> Self {
    MemoryServer {
      databases: BTreeMap::new(),
      persist_location: None,
    }
  }
  pub fn from_backup(path: impl AsRef<Path>) -> Result<Self> {
    let read_json = |path_to_file: &Path| -> Result<String> {
      Ok(std::fs::read_to_string(path_to_file)?)
    };
    /* Define key filesystem locations */
    let root_dir = path.as_ref();
    let databases_dir = root_dir.join(DATABASES_DIR);
    let head_file = root_dir.join(HEAD_FILE);
    let dot_file = root_dir.join(BACKUP_MARKER);
    /* Check that all files and dirs actually exist */
    if !root_dir.is_dir() {
      return Err(Error::MissingBackup(root_dir.to_path_buf()))
    }
    else if !databases_dir.is_dir() {
      return Err(Error::InvalidBackup(format!("root/{}/", DATABASES_DIR), root_dir.to_path_buf()))
    }
    else if !head_file.is_file() {
      return Err(Error::InvalidBackup(format!("root/{}", HEAD_FILE), root_dir.to_path_buf()))
    }
    else if !dot_file.is_file() {
      return Err(Error::InvalidBackup(format!("root/{}", BACKUP_MARKER), root_dir.to_path_buf()))
    }
    let head: Head = match serde_json::from_str(&read_json(&head_file)?) {
      Ok(head) => head,
      Err(e) => return Err(Error::FromBadJson("MemoryServer".into(), head_file, Box::new(e))),
    };
    let mut databases = BTreeMap::new();
    for name in head.databases {
      let db_file = databases_dir.join(format!("{}.json", name));
      if !db_file.is_file() {
        return Err(Error::InvalidBackup(format!("root/{}/{}.json", DATABASES_DIR, name), root_dir.to_path_buf()))
      }
      let mut db: Database = match serde_json::from_str(&read_json(&db_file)?) {
        Ok(db) => db,
        Err(e) => return Err(Error::FromBadJson("Database".into(), db_file, Box::new(e))),
      };
      for collection in &mut db.collections {
        collection.reindex();
      }
      databases.insert(name, db);
    }
    debug!("Restored {} databases from {}", databases.len(), root_dir.display());
    Ok(MemoryServer {
      databases,
      persist_location: Some(root_dir.display().to_string()),
    })
  }
  pub fn database_names(&self) -> Vec<&str> {
    self.databases.keys().map(|k| k.as_str()).collect()
  }
  pub fn persist_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
    /* Save the location this server is persisted to */
    self.persist_location = Some(path.as_ref().display().to_string());
    self.persist()
  }
  pub fn persist_location(&self) -> &Option<String> {
    &self.persist_location
  }
  pub fn persist(&self) -> Result<()> {
    let path = match &self.persist_location {
      Some(path) => PathBuf::from(path),
      None => return Err(Error::NoPersistLocation),
    };
    /* Define locations to persist to */
    let root_dir = path.as_path();
    let databases_dir = root_dir.join(DATABASES_DIR);
    let head_file = root_dir.join(HEAD_FILE);
    let dot_file = root_dir.join(BACKUP_MARKER);

    if root_dir.is_dir() && dot_file.is_file() {
      /* Saved here before, wipe the head file and
      everything in root/databases/ */
      if head_file.is_file() {
        std::fs::remove_file(&head_file)?;
      }
      if databases_dir.is_dir() {
        for entry in std::fs::read_dir(&databases_dir)? {
          let entry_path = entry?.path();
          if entry_path.is_file() {
            std::fs::remove_file(entry_path)?;
          }
        }
      }
      else {
        std::fs::create_dir(&databases_dir)?;
      }
    }
    else {
      std::fs::create_dir_all(&root_dir)?;
      std::fs::create_dir(&databases_dir)?;
      std::fs::File::create(&dot_file)?;
    }
    let head = Head {
      databases: self.databases.keys().cloned().collect(),
      persist_location: self.persist_location.clone(),
    };
    std::fs::write(&head_file, serde_json::to_string(&head)?)?;
    for (name, db) in &self.databases {
      std::fs::write(databases_dir.join(format!("{}.json", name)), serde_json::to_string(db)?)?;
    }
    debug!("Persisted {} databases to {}", self.databases.len(), root_dir.display());
    Ok(())
  }
}

impl DatabaseServer for MemoryServer {
  type Database = Database;
  fn has_database(&self, name: &str) -> bool {
    self.databases.contains_key(name)
  }
  fn create_database(&mut self, name: &str) -> Result<()> {
    check_name(name)?;
    if name.starts_with(SYSTEM_PREFIX) {
      return Err(Error::InvalidName(name.to_string()))
    }
    if self.has_database(name) {
      return Err(Error::DatabaseExists(name.to_string()))
    }
    self.databases.insert(name.to_string(), Database::new(name));
    Ok(())
  }
  fn delete_database(&mut self, name: &str) -> Result<()> {
    match self.databases.remove(name) {
      Some(_) => Ok(()),
      None => Err(Error::MissingDatabase(name.to_string())),
    }
  }
  fn database(&self, name: &str) -> Result<&Database> {
    self.databases.get(name).ok_or_else(|| Error::MissingDatabase(name.to_string()))
  }
  fn database_mut(&mut self, name: &str) -> Result<&mut Database> {
    self.databases.get_mut(name).ok_or_else(|| Error::MissingDatabase(name.to_string()))
  }
}

/* Utils */
fn check_name(name: &str) -> Result<()> {
  if name.is_empty() || name.contains('/') || name.contains('\\') {
    return Err(Error::InvalidName(name.to_string()))
  }
  Ok(())
}
