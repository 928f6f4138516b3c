//! Map coloring: assigns colors to the areas of a map so that adjacent areas differ

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error types
pub mod error;

/// base identifiers, palette, assignments, solutions and checker
pub mod color;

/// resolved map (areas + adjacency)
pub mod map_instance;

/// knowledge source trait and raw declarations
pub mod source;

/// loaded model: palette + maps, two-phase code resolution
pub mod knowledge_base;

/// read Prolog-like fact bases
pub mod facts;

/// read/write JSON knowledge bases
pub mod json_kb;

/// search for a coloring
pub mod search;

/// query interface (maps, areas, adjacency, colors, solve)
pub mod coloring;

/// helper and utility methods for executables
pub mod util;
