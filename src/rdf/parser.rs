/*
  Turns RDF documents into the deduplicated triple set
  the transformer consumes.
*/

use {
  std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
  },
  rio_api::{
    parser::TriplesParser,
    model::{
      Triple as RioTriple,
      NamedOrBlankNode,
      NamedNode, BlankNode,
      Term,
      Literal,
    }
  },
  rio_turtle::{TurtleParser, NTriplesParser},
  rio_xml::RdfXmlParser,
  serde::{Serialize, Deserialize},
  tracing::{debug, info},
  crate::{
    errors::ParserError as Error,
    Resource, RdfNode, Triple,
  }
};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RdfFormat {
  Turtle,
  NTriples,
  RdfXml,
}
impl RdfFormat {
  /* Accepts file extensions as well as format names */
  pub fn from_name(name: &str) -> Result<Self> {
    match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
      "ttl" | "turtle" => Ok(RdfFormat::Turtle),
      "nt" | "ntriples" | "n-triples" => Ok(RdfFormat::NTriples),
      "rdf" | "owl" | "xml" | "rdfxml" | "rdf/xml" => Ok(RdfFormat::RdfXml),
      _ => Err(Error::UnknownFormat(name.to_string())),
    }
  }
  pub fn from_path(path: &Path) -> Result<Self> {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) => Self::from_name(ext),
      None => Err(Error::UnknownFormat(path.display().to_string())),
    }
  }
}
impl std::str::FromStr for RdfFormat {
  type Err = Error;
  fn from_str(s: &str) -> Result<Self> {
    Self::from_name(s)
  }
}
impl std::fmt::Display for RdfFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      RdfFormat::Turtle => write!(f, "turtle"),
      RdfFormat::NTriples => write!(f, "ntriples"),
      RdfFormat::RdfXml => write!(f, "rdfxml"),
    }
  }
}

/* Triples in the order they were first seen, repeats dropped.
  Two sets are equal when they hold the same triples, whatever
  the order. */
#[derive(Debug, Clone, Default)]
pub struct TripleSet {
  seen: HashSet<Triple>,
  triples: Vec<Triple>,
}

/* Public */
impl TripleSet {
  /* Constructors */
  pub fn new() -> Self {
    TripleSet {
      seen: HashSet::new(),
      triples: Vec::new(),
    }
  }
  pub fn from_rdf(path: impl AsRef<Path>, format: Option<RdfFormat>) -> Result<Self> {
    Self::from_rdf_with_base(path, format, None)
  }
  /* Relative IRIs resolve against the file itself unless a base is given */
  pub fn from_rdf_with_base(path: impl AsRef<Path>, format: Option<RdfFormat>, base_iri: Option<&str>) -> Result<Self> {
    let path = path.as_ref();
    if !path.is_file() {
      return Err(Error::MissingFile(path.to_path_buf()))
    }
    let format = match format {
      Some(format) => format,
      None => RdfFormat::from_path(path)?,
    };
    let base_iri = match base_iri {
      Some(iri) => iri.to_string(),
      None => format!("file:{}", path.display()),
    };
    info!("Loading {} RDF data from {}", format, path.display());
    let triples = Self::from_reader(BufReader::new(File::open(path)?), format, &base_iri)?;
    info!("Loaded {} RDF triples", triples.len());
    Ok(triples)
  }
  pub fn from_str(text: &str, format: RdfFormat, base_iri: &str) -> Result<Self> {
    Self::from_reader(text.as_bytes(), format, base_iri)
  }
  pub fn from_reader<R: BufRead>(reader: R, format: RdfFormat, base_iri: &str) -> Result<Self> {
    let mut triples = TripleSet::new();
    let duplicates = match format {
      RdfFormat::Turtle => collect(&mut TurtleParser::new(reader, base_iri)?, &mut triples)?,
      RdfFormat::NTriples => collect(&mut NTriplesParser::new(reader)?, &mut triples)?,
      RdfFormat::RdfXml => collect(&mut RdfXmlParser::new(reader, base_iri)?, &mut triples)?,
    };
    if duplicates > 0 {
      debug!("Dropped {} duplicate triples", duplicates);
    }
    Ok(triples)
  }
  /* Operation */
  pub fn insert(&mut self, triple: Triple) -> bool {
    if self.seen.contains(&triple) {
      return false
    }
    self.seen.insert(triple.clone());
    self.triples.push(triple);
    true
  }
  pub fn contains(&self, triple: &Triple) -> bool {
    self.seen.contains(triple)
  }
  pub fn len(&self) -> usize {
    self.triples.len()
  }
  pub fn is_empty(&self) -> bool {
    self.triples.is_empty()
  }
  pub fn iter(&self) -> std::slice::Iter<Triple> {
    self.triples.iter()
  }
}

/* Std Traits */
impl PartialEq for TripleSet {
  fn eq(&self, other: &Self) -> bool {
    self.seen == other.seen
  }
}
impl Eq for TripleSet {}
impl std::iter::FromIterator<Triple> for TripleSet {
  fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
    let mut triples = TripleSet::new();
    for triple in iter {
      triples.insert(triple);
    }
    triples
  }
}
impl<'a> IntoIterator for &'a TripleSet {
  type Item = &'a Triple;
  type IntoIter = std::slice::Iter<'a, Triple>;
  fn into_iter(self) -> Self::IntoIter {
    self.triples.iter()
  }
}

/* Utils */
fn collect<P: TriplesParser>(parser: &mut P, triples: &mut TripleSet) -> Result<usize>
where Error: From<P::Error> {
  let mut duplicates: usize = 0;
  parser.parse_all(&mut |t| {
    if !triples.insert(to_triple(&t)) {
      duplicates += 1;
    }
    Ok(()) as Result<()>
  })?;
  Ok(duplicates)
}
fn to_triple(t: &RioTriple) -> Triple {
  let subject = match t.subject {
    NamedOrBlankNode::NamedNode(NamedNode{ iri }) => Resource::Named{ iri: iri.to_string() },
    NamedOrBlankNode::BlankNode(BlankNode{ id }) => Resource::Blank{ id: id.to_string() },
  };
  let object = match t.object {
    Term::NamedNode(NamedNode{ iri }) => RdfNode::Named{ iri: iri.to_string() },
    Term::BlankNode(BlankNode{ id }) => RdfNode::Blank{ id: id.to_string() },
    Term::Literal(Literal::Simple{ value }) => RdfNode::RawLit{ val: value.to_string() },
    Term::Literal(Literal::LanguageTaggedString{ value, language }) => RdfNode::LangTaggedLit{
      val: value.to_string(),
      lang: language.to_string(),
    },
    Term::Literal(Literal::Typed{ value, datatype: NamedNode{ iri } }) => RdfNode::TypedLit{
      val: value.to_string(),
      datatype: iri.to_string(),
    },
  };
  Triple {
    subject,
    predicate: t.predicate.iri.to_string(),
    object,
  }
}
