use serde::{Serialize, Deserialize};

use crate::error::Result;

/**
Area as declared by a knowledge source, before its adjacency codes are resolved.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArea {
    /// area identifier (unique in the map)
    pub name: String,
    /// display label (defaults to the name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// short code used to reference this area in adjacency lists
    pub code: String,
    /// codes of the adjacent areas
    #[serde(default)]
    pub adjacent: Vec<String>,
}

/** Map as declared by a knowledge source */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMap {
    /// map identifier
    pub id: String,
    /// areas in declaration order
    pub areas: Vec<RawArea>,
}

/**
Provider of colors and maps. Implementors only read their declarations,
code resolution is done by [`KnowledgeBase::load`](crate::knowledge_base::KnowledgeBase::load).
*/
pub trait KnowledgeSource {
    /// colors in display order
    fn load_colors(&self) -> Result<Vec<String>>;

    /// maps in declaration order
    fn load_maps(&self) -> Result<Vec<RawMap>>;
}

/** knowledge source backed by declarations already in memory */
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// colors in display order
    pub colors: Vec<String>,
    /// maps in declaration order
    pub maps: Vec<RawMap>,
}

impl KnowledgeSource for MemorySource {
    fn load_colors(&self) -> Result<Vec<String>> { Ok(self.colors.clone()) }

    fn load_maps(&self) -> Result<Vec<RawMap>> { Ok(self.maps.clone()) }
}

impl RawArea {
    /** area whose adjacency is given by codes */
    pub fn new(name:&str, code:&str, adjacent:&[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            code: code.to_string(),
            adjacent: adjacent.iter().map(|c| c.to_string()).collect(),
        }
    }
}
