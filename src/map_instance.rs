use log::info;

use crate::color::{ColoringInstance, RegionId};

/** models one map (areas + adjacency) once its codes are resolved. */
#[derive(Debug, Clone)]
pub struct MapInstance {
    /// map identifier
    id: String,
    /// nb areas
    n: usize,
    /// nb adjacencies
    m: usize,
    /// names[i]: identifier of area i
    names: Vec<String>,
    /// labels[i]: display label of area i
    labels: Vec<String>,
    /// codes[i]: short code of area i (used by the knowledge source)
    codes: Vec<String>,
    /// edges of the graph (u < v)
    edges: Vec<(RegionId,RegionId)>,
    /// adj_list[i]: areas adjacent to i, in declaration order
    adj_list: Vec<Vec<RegionId>>,
}

impl ColoringInstance for MapInstance {
    fn nb_vertices(&self) -> usize { self.n }

    fn neighbors(&self, u:RegionId) -> &[RegionId] { &self.adj_list[u] }

    fn edges(&self) -> &[(RegionId, RegionId)] { &self.edges }

    fn region_name(&self, u:RegionId) -> &str { &self.names[u] }

    /// exact identifier first, then a unique case-insensitive match
    fn find_region(&self, name:&str) -> Option<RegionId> {
        if let Some(i) = self.names.iter().position(|a| a == name) {
            return Some(i);
        }
        let lower = name.to_lowercase();
        let mut candidates = self.names.iter().enumerate()
            .filter(|(_,a)| a.to_lowercase() == lower)
            .map(|(i,_)| i);
        match (candidates.next(), candidates.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }
}


impl MapInstance {

    /** constructor using an adjacency list (labels and codes equal the names) */
    pub fn new(id:&str, names:Vec<String>, adj_list:Vec<Vec<RegionId>>) -> Self {
        let labels = names.clone();
        let codes = names.clone();
        Self::from_parts(id, names, labels, codes, adj_list)
    }

    /** constructor using every per-area attribute. adj_list must be symmetric. */
    pub fn from_parts(
        id:&str,
        names:Vec<String>,
        labels:Vec<String>,
        codes:Vec<String>,
        adj_list:Vec<Vec<RegionId>>
    ) -> Self {
        let n = adj_list.len();
        debug_assert_eq!(names.len(), n);
        debug_assert_eq!(labels.len(), n);
        debug_assert_eq!(codes.len(), n);
        // compute nb edges
        let mut m = 0;
        for e in &adj_list { // at the end: m = ∑ d(v)
            m += e.len();
        }
        m /= 2; // m = (∑ d(v)) / 2
        let edges = Self::build_edges(&adj_list);
        Self { id:id.to_string(), n, m, names, labels, codes, edges, adj_list }
    }

    /// builds the edge list
    fn build_edges(adj_list:&[Vec<RegionId>]) -> Vec<(RegionId,RegionId)> {
        let mut res = Vec::new();
        for (i,l) in adj_list.iter().enumerate() {
            for j in l {
                if i < *j {
                    res.push((i,*j));
                }
            }
        }
        res
    }

    /// map identifier
    pub fn id(&self) -> &str { &self.id }

    /// returns the number of adjacencies in the map
    pub fn nb_edges(&self) -> usize { self.m }

    /// area identifiers in declaration order
    pub fn names(&self) -> &[String] { &self.names }

    /// display label of area u
    pub fn label(&self, u:RegionId) -> &str { &self.labels[u] }

    /// short code of area u
    pub fn code(&self, u:RegionId) -> &str { &self.codes[u] }

    /** sorts areas case-insensitively by their display label (stable for ties) */
    pub fn sorted_by_label(&self, areas:&[RegionId]) -> Vec<RegionId> {
        let mut res = areas.to_vec();
        res.sort_by_cached_key(|u| self.labels[*u].to_lowercase());
        res
    }

    /// area identifiers, sorted case-insensitively by label
    pub fn sorted_names(&self) -> Vec<String> {
        let all:Vec<RegionId> = self.vertices().collect();
        self.sorted_by_label(&all).into_iter().map(|u| self.names[u].clone()).collect()
    }

    /// identifiers of the areas adjacent to u, sorted case-insensitively by label
    pub fn sorted_neighbor_names(&self, u:RegionId) -> Vec<String> {
        self.sorted_by_label(&self.adj_list[u]).into_iter()
            .map(|v| self.names[v].clone()).collect()
    }

    /// logs statistics of the map
    pub fn display_statistics(&self) {
        info!("map {}: {} areas, {} adjacencies", self.id, self.nb_vertices(), self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            info!("map {}: min degree {}, max degree {}", self.id, min, max);
        }
    }
}
