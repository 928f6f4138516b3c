/*
Implements:
 - procedures to read and write knowledge bases in JSON
 - { "colors": [..], "maps": [{ "id": .., "areas": [{ "name", "label"?, "code", "adjacent" }] }] }
*/
use std::fs;

use serde::{Serialize, Deserialize};

use crate::error::{MapColoringError, Result};
use crate::knowledge_base::KnowledgeBase;
use crate::source::{KnowledgeSource, RawMap};

/** data structure to represent a JSON knowledge base */
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JsonSource {
    /// colors in display order
    #[serde(default)]
    colors: Vec<String>,
    /// maps in declaration order
    #[serde(default)]
    maps: Vec<RawMap>,
}

impl KnowledgeSource for JsonSource {
    fn load_colors(&self) -> Result<Vec<String>> { Ok(self.colors.clone()) }

    fn load_maps(&self) -> Result<Vec<RawMap>> { Ok(self.maps.clone()) }
}

impl JsonSource {
    /** reads a JSON knowledge base from a file. */
    pub fn from_file(filename:&str) -> Result<Self> {
        let str = fs::read_to_string(filename)
            .map_err(|source| MapColoringError::Io { path: filename.to_string(), source })?;
        Self::parse(&str)
    }

    /** reads a JSON knowledge base from its text. */
    pub fn parse(str:&str) -> Result<Self> {
        Ok(serde_json::from_str(str)?)
    }

    /** snapshot of a loaded knowledge base (adjacency made symmetric) */
    pub fn from_knowledge_base(kb:&KnowledgeBase) -> Self {
        let (colors, maps) = kb.to_declarations();
        Self { colors, maps }
    }

    /** pretty JSON encoding */
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /** writes the knowledge base into a file */
    pub fn write_file(&self, filename:&str) -> Result<()> {
        fs::write(filename, self.to_json()?)
            .map_err(|source| MapColoringError::Io { path: filename.to_string(), source })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::facts::FactsSource;

    #[test]
    fn test_read_instance() {
        let source = JsonSource::from_file("insts/australia.json").unwrap();
        let kb = KnowledgeBase::load(&source).unwrap();
        assert_eq!(kb.list_maps(), vec!["australia"]);
        assert_eq!(kb.list_colors(), vec!["red", "green", "blue"]);
        assert_eq!(
            kb.list_regions("australia").unwrap(),
            vec!["NSW", "NT", "Q", "SA", "T", "V", "WA"]
        );
        assert_eq!(kb.list_neighbors("australia", "SA").unwrap(), vec!["NSW", "NT", "Q", "V", "WA"]);
        assert!(kb.list_neighbors("australia", "T").unwrap().is_empty());
    }

    #[test]
    fn test_labels() {
        let source = JsonSource::parse(r#"{
            "colors": ["red"],
            "maps": [{ "id": "m", "areas": [
                { "name": "b1", "label": "alpha", "code": "B" },
                { "name": "a1", "label": "Beta", "code": "A", "adjacent": ["B"] }
            ]}]
        }"#).unwrap();
        let kb = KnowledgeBase::load(&source).unwrap();
        assert_eq!(kb.list_regions("m").unwrap(), vec!["b1", "a1"]);
        assert_eq!(kb.list_neighbors("m", "b1").unwrap(), vec!["a1"]);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(JsonSource::parse("{\"colors\": 3}"), Err(MapColoringError::Json(_))));
    }

    #[test]
    fn test_export_facts_as_json() {
        let facts = FactsSource::from_file("insts/nordeste.pl").unwrap();
        let kb = KnowledgeBase::load(&facts).unwrap();
        let json = JsonSource::from_knowledge_base(&kb).to_json().unwrap();
        let reloaded = KnowledgeBase::load(&JsonSource::parse(&json).unwrap()).unwrap();
        assert_eq!(reloaded.list_maps(), kb.list_maps());
        for map in kb.list_maps() {
            for area in kb.list_regions(&map).unwrap() {
                assert_eq!(
                    reloaded.list_neighbors(&map, &area).unwrap(),
                    kb.list_neighbors(&map, &area).unwrap()
                );
            }
        }
    }
}
