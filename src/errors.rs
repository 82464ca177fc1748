type Source<E> = Box<E>;

#[derive(Debug)]
pub enum ParserError {
  MissingFile(std::path::PathBuf),
  UnknownFormat(String),
  Io(Source<std::io::Error>),
  Turtle(Source<rio_turtle::TurtleError>),
  RdfXml(Source<rio_xml::RdfXmlError>),
}
impl std::error::Error for ParserError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use ParserError::*;
    match self {
      Io(e) => Some(&**e),
      Turtle(e) => Some(&**e),
      RdfXml(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for ParserError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use ParserError::*;
    match self {
      MissingFile(path) => write!(f, "RDF data file not found: {}", path.display()),
      UnknownFormat(name) => write!(f, "Unknown RDF serialization '{}', expected one of ttl, nt, rdf", name),
      Io(e) => write!(f, "{}", *e),
      Turtle(e) => write!(f, "{}", *e),
      RdfXml(e) => write!(f, "{}", *e),
    }
  }
}
impl From<std::io::Error> for ParserError {
  fn from(err: std::io::Error) -> ParserError {
    ParserError::Io(Box::new(err))
  }
}
impl From<rio_turtle::TurtleError> for ParserError {
  fn from(err: rio_turtle::TurtleError) -> ParserError {
    ParserError::Turtle(Box::new(err))
  }
}
impl From<rio_xml::RdfXmlError> for ParserError {
  fn from(err: rio_xml::RdfXmlError) -> ParserError {
    ParserError::RdfXml(Box::new(err))
  }
}

#[derive(Debug)]
pub enum StoreError {
  Unavailable(String),
  InvalidName(String),
  MissingDatabase(String),
  DatabaseExists(String),
  MissingCollection(String),
  CollectionExists(String),
  MissingGraph(String),
  GraphExists(String),
  InvalidEdge(String, String),
  DuplicateKey(String, String),
  NoPersistLocation,
  MissingBackup(std::path::PathBuf),
  InvalidBackup(String, std::path::PathBuf),
  FromBadJson(String, std::path::PathBuf, Source<serde_json::Error>),
  Io(Source<std::io::Error>),
  Serde(Source<serde_json::Error>),
}
impl std::error::Error for StoreError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use StoreError::*;
    match self {
      FromBadJson(_, _, e) => Some(&**e),
      Io(e) => Some(&**e),
      Serde(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use StoreError::*;
    match self {
      Unavailable(reason) => write!(f, "Document store unavailable: {}", reason),
      InvalidName(name) => write!(f, "'{}' is not a valid database, collection or graph name", name),
      MissingDatabase(name) => write!(f, "Database {} does not exist", name),
      DatabaseExists(name) => write!(f, "Database {} already exists", name),
      MissingCollection(name) => write!(f, "Collection {} does not exist", name),
      CollectionExists(name) => write!(f, "Collection {} already exists", name),
      MissingGraph(name) => write!(f, "Graph {} does not exist", name),
      GraphExists(name) => write!(f, "Graph {} already exists", name),
      InvalidEdge(collection, reason) => write!(f, "Invalid edge document for edge collection {}: {}", collection, reason),
      DuplicateKey(collection, key) => write!(f, "Document with _key {} already exists in {}", key, collection),
      NoPersistLocation => write!(f, "Attempted call to .persist() on a store with no specified persistence location. Did you mean .persist_to(path)?"),
      MissingBackup(path) => write!(f, "Store backup does not exist at {}", path.display()),
      InvalidBackup(missing_elem, path) => write!(f, "Store backup at {} is invalid, missing {}", path.display(), missing_elem),
      FromBadJson(struct_type, path, e) => write!(f, "Attempted to build {} from invalid json at {}: {}", struct_type, path.display(), *e),
      Io(e) => write!(f, "{}", *e),
      Serde(e) => write!(f, "{}", *e),
    }
  }
}
impl From<std::io::Error> for StoreError {
  fn from(err: std::io::Error) -> StoreError {
    StoreError::Io(Box::new(err))
  }
}
impl From<serde_json::Error> for StoreError {
  fn from(err: serde_json::Error) -> StoreError {
    StoreError::Serde(Box::new(err))
  }
}

#[derive(Debug)]
pub enum TransformError {
  Store(Source<StoreError>),
  DanglingEndpoint(String),
}
impl std::error::Error for TransformError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use TransformError::*;
    match self {
      Store(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for TransformError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use TransformError::*;
    match self {
      Store(e) => write!(f, "{}", *e),
      DanglingEndpoint(resource) => write!(f, "Resource {} has no persisted node, meaning the node table's integrity is compromised.", resource),
    }
  }
}
impl From<StoreError> for TransformError {
  fn from(err: StoreError) -> TransformError {
    TransformError::Store(Box::new(err))
  }
}

#[derive(Debug)]
pub enum ConfigError {
  InvalidValue(String, String),
  FromBadJson(std::path::PathBuf, Source<serde_json::Error>),
  Io(Source<std::io::Error>),
}
impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use ConfigError::*;
    match self {
      FromBadJson(_, e) => Some(&**e),
      Io(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use ConfigError::*;
    match self {
      InvalidValue(field, reason) => write!(f, "Invalid configuration value for {}: {}", field, reason),
      FromBadJson(path, e) => write!(f, "Attempted to read configuration from invalid json at {}: {}", path.display(), *e),
      Io(e) => write!(f, "{}", *e),
    }
  }
}
impl From<std::io::Error> for ConfigError {
  fn from(err: std::io::Error) -> ConfigError {
    ConfigError::Io(Box::new(err))
  }
}

#[derive(Debug)]
pub enum LoadError {
  SourceUnavailable(Source<ParserError>),
  SinkUnavailable(Source<StoreError>),
  Integrity(String),
}
impl std::error::Error for LoadError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use LoadError::*;
    match self {
      SourceUnavailable(e) => Some(&**e),
      SinkUnavailable(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for LoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use LoadError::*;
    match self {
      SourceUnavailable(e) => write!(f, "Triple source unavailable: {}", *e),
      SinkUnavailable(e) => write!(f, "Graph sink unavailable: {}", *e),
      Integrity(reason) => write!(f, "Transformation aborted: {}", reason),
    }
  }
}
impl From<ParserError> for LoadError {
  fn from(err: ParserError) -> LoadError {
    LoadError::SourceUnavailable(Box::new(err))
  }
}
impl From<StoreError> for LoadError {
  fn from(err: StoreError) -> LoadError {
    LoadError::SinkUnavailable(Box::new(err))
  }
}
impl From<TransformError> for LoadError {
  fn from(err: TransformError) -> LoadError {
    match err {
      TransformError::Store(e) => LoadError::SinkUnavailable(e),
      e @ TransformError::DanglingEndpoint(_) => LoadError::Integrity(e.to_string()),
    }
  }
}
