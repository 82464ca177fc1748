use {
  serde::{Serialize, Deserialize},
  crate::{
    errors::StoreError as Error,
    datastore::Document,
  }
};

type Result<T> = std::result::Result<T, Error>;

/* A named graph as stored in a database's _graphs collection */
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDefinition {
  #[serde(rename = "_key")]
  pub name: String,
  pub edge_definitions: Vec<EdgeDefinition>,
  pub orphan_collections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeDefinition {
  pub collection: String,
  pub from: Vec<String>,
  pub to: Vec<String>,
}

/* Public */
impl GraphDefinition {
  pub fn new(name: &str) -> Self {
    GraphDefinition {
      name: name.to_string(),
      edge_definitions: Vec::new(),
      orphan_collections: Vec::new(),
    }
  }
  /* Every vertex collection the graph touches, orphans first */
  pub fn vertex_collections(&self) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let used = self.edge_definitions
      .iter()
      .flat_map(|def| def.from.iter().chain(def.to.iter()));
    for name in self.orphan_collections.iter().chain(used) {
      if !names.contains(&name.as_str()) {
        names.push(name.as_str());
      }
    }
    names
  }
  pub fn edge_collections(&self) -> Vec<&str> {
    self.edge_definitions.iter().map(|def| def.collection.as_str()).collect()
  }
  pub fn add_vertex_collection(&mut self, collection: &str) -> Result<()> {
    if self.vertex_collections().contains(&collection) {
      return Err(Error::CollectionExists(collection.to_string()))
    }
    self.orphan_collections.push(collection.to_string());
    Ok(())
  }
  /* Vertex collections picked up by the definition stop being orphans */
  pub fn add_edge_definition(&mut self, definition: EdgeDefinition) -> Result<()> {
    if self.edge_collections().contains(&definition.collection.as_str()) {
      return Err(Error::CollectionExists(definition.collection))
    }
    self.orphan_collections.retain(|orphan|
      !definition.from.contains(orphan) && !definition.to.contains(orphan)
    );
    self.edge_definitions.push(definition);
    Ok(())
  }
  pub fn to_document(&self) -> Result<Document> {
    match serde_json::to_value(self)? {
      serde_json::Value::Object(doc) => Ok(doc),
      _ => Err(Error::InvalidName(self.name.clone())),
    }
  }
  pub fn from_document(document: &Document) -> Result<Self> {
    Ok(serde_json::from_value(serde_json::Value::Object(document.clone()))?)
  }
}
