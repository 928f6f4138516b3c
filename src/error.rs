use thiserror::Error;

/** Result type of the map coloring operations */
pub type Result<T> = std::result::Result<T, MapColoringError>;

/**
Errors reported by the knowledge base loaders and by the query facade.

Not finding a coloring is not an error: it is reported by
[`SolveOutcome::NoSolution`](crate::search::backtracking::SolveOutcome).
*/
#[derive(Debug, Error)]
pub enum MapColoringError {
    /// the map identifier is not declared in the knowledge base
    #[error("unknown map: {0}")]
    UnknownMap(String),

    /// the area does not belong to the map
    #[error("unknown area {region} in map {map}")]
    UnknownRegion {
        /// map identifier
        map: String,
        /// area identifier as given by the caller
        region: String,
    },

    /// the color is not part of the palette
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// the fixed constraint (area, color) is not valid for the requested map
    #[error("invalid fixed constraint ({region}, {color}): {reason}")]
    InvalidRequest {
        /// constrained area
        region: String,
        /// constrained color
        color: String,
        /// why the constraint was rejected
        #[source]
        reason: Box<MapColoringError>,
    },

    /// a solve was attempted with no color declared
    #[error("the color palette is empty")]
    EmptyPalette,

    /// no knowledge base has been (successfully) loaded
    #[error("knowledge base not loaded")]
    NotInitialized,

    /// the knowledge base file could not be read
    #[error("unable to read {path}: {source}")]
    Io {
        /// file path
        path: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// syntax error in a fact base
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line of the error
        line: usize,
        /// description
        message: String,
    },

    /// malformed JSON knowledge base
    #[error("invalid json knowledge base: {0}")]
    Json(#[from] serde_json::Error),

    /// an adjacency code does not match any area of the same map
    #[error("map {map}: area {area} references unknown code {code}")]
    UnresolvedCode {
        /// map identifier
        map: String,
        /// area declaring the adjacency
        area: String,
        /// unresolved code
        code: String,
    },

    /// the same map identifier is declared twice
    #[error("map {0} declared twice")]
    DuplicateMap(String),

    /// the same area name appears twice in a map
    #[error("map {map}: area {area} declared twice")]
    DuplicateArea {
        /// map identifier
        map: String,
        /// area name
        area: String,
    },

    /// two areas of a map share the same code
    #[error("map {map}: code {code} used by several areas")]
    DuplicateCode {
        /// map identifier
        map: String,
        /// area code
        code: String,
    },

    /// an area is declared adjacent to itself (the map could never be colored)
    #[error("map {map}: area {area} is adjacent to itself")]
    SelfAdjacent {
        /// map identifier
        map: String,
        /// area name
        area: String,
    },
}
