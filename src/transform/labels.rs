use crate::Resource;

/* Text after the last '#', else after the last '/', else the whole IRI.
  Used for property keys and relation labels. */
pub fn local_name(iri: &str) -> &str {
  iri.rsplit_once('#')
    .or_else(|| iri.rsplit_once('/'))
    .map(|(_, name)| name)
    .unwrap_or(iri)
}

/* Last path segment for IRIs (a '#' does not count here),
  the identifier itself for blank nodes. */
pub fn resource_label(resource: &Resource) -> String {
  match resource {
    Resource::Named{ iri } => iri.rsplit('/').next().unwrap_or(iri).to_string(),
    Resource::Blank{ id } => id.clone(),
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  #[test]
  fn local_name_0() {
    assert_eq!("name", local_name("http://xmlns.com/foaf/0.1/name"));
    assert_eq!("type", local_name("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"));
    assert_eq!("label", local_name("http://www.w3.org/2000/01/rdf-schema#label"));
    assert_eq!("urn:isbn:0451450523", local_name("urn:isbn:0451450523"));
  }
  #[test]
  fn local_name_prefers_hash() {
    assert_eq!("frag", local_name("http://example.org/a/b#frag"));
    assert_eq!("c/d", local_name("http://example.org/a#c/d"));
    assert_eq!("", local_name("http://example.org/vocab/"));
  }
  #[test]
  fn resource_label_0() {
    assert_eq!("1", resource_label(&Resource::from("http://example.org/person/1")));
    assert_eq!("alice", resource_label(&Resource::from("http://example.org/person/alice")));
    assert_eq!("vocab#Thing", resource_label(&Resource::from("http://example.org/vocab#Thing")));
    assert_eq!("", resource_label(&Resource::from("http://example.org/")));
    assert_eq!("urn:x", resource_label(&Resource::from("urn:x")));
    assert_eq!("b12", resource_label(&Resource::Blank{ id: "b12".into() }));
  }
}
