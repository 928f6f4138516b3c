use bit_set::BitSet;
use serde::{Serialize, Deserialize};

/** Region (area) index inside its map, in declaration order */
pub type RegionId = usize;

/** Color index inside the palette, in declaration order */
pub type ColorId = usize;

/** graph view of a map used by the search and the checker */
pub trait ColoringInstance {
    /// number of regions
    fn nb_vertices(&self) -> usize;

    /// iterator over the regions (declaration order)
    fn vertices(&self) -> std::ops::Range<RegionId> { 0..self.nb_vertices() }

    /// regions adjacent to u
    fn neighbors(&self, u:RegionId) -> &[RegionId];

    /// number of regions adjacent to u
    fn degree(&self, u:RegionId) -> usize { self.neighbors(u).len() }

    /// edge list (u < v)
    fn edges(&self) -> &[(RegionId, RegionId)];

    /// name of region u
    fn region_name(&self, u:RegionId) -> &str;

    /// finds the region called `name`
    fn find_region(&self, name:&str) -> Option<RegionId>;
}


/** ordered set of colors offered to every map */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    /// colors in declaration order
    colors: Vec<String>,
}

impl Palette {
    /** builds a palette, keeping the declaration order */
    pub fn new(colors:Vec<String>) -> Self { Self { colors } }

    /// number of colors
    pub fn len(&self) -> usize { self.colors.len() }

    /// true iff no color is declared
    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// name of color c
    pub fn name(&self, c:ColorId) -> &str { &self.colors[c] }

    /// color called `name` (exact match)
    pub fn find(&self, name:&str) -> Option<ColorId> {
        self.colors.iter().position(|c| c == name)
    }

    /// color names in declaration order
    pub fn names(&self) -> &[String] { &self.colors }
}


/** pins a region to a color */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConstraint {
    /// constrained region
    pub region: RegionId,
    /// color it must take
    pub color: ColorId,
}


/**
Partial mapping region -> color built during one solve.
assignment[v]: color of v if assigned.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    colors: Vec<Option<ColorId>>,
    nb_assigned: usize,
}

impl Assignment {
    /** creates an empty assignment over n regions */
    pub fn new(n:usize) -> Self {
        Self { colors: vec![None ; n], nb_assigned: 0 }
    }

    /// color of v (if assigned)
    pub fn get(&self, v:RegionId) -> Option<ColorId> { self.colors[v] }

    /// true iff v has a color
    pub fn is_assigned(&self, v:RegionId) -> bool { self.colors[v].is_some() }

    /// binds v to c
    pub fn assign(&mut self, v:RegionId, c:ColorId) {
        debug_assert!(self.colors[v].is_none());
        self.colors[v] = Some(c);
        self.nb_assigned += 1;
    }

    /// removes the color of v
    pub fn unassign(&mut self, v:RegionId) {
        debug_assert!(self.colors[v].is_some());
        self.colors[v] = None;
        self.nb_assigned -= 1;
    }

    /// number of assigned regions
    pub fn nb_assigned(&self) -> usize { self.nb_assigned }

    /// true iff every region is assigned
    pub fn is_total(&self) -> bool { self.nb_assigned == self.colors.len() }

    /** returns the colors in region order if the assignment is total */
    pub fn to_total(&self) -> Option<Vec<ColorId>> {
        self.colors.iter().copied().collect()
    }
}


/** (area, color) pair as returned to the presentation layer */
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaColor {
    /// area identifier
    pub area: String,
    /// color identifier
    pub color: String,
}

impl AreaColor {
    /** builds a pair */
    pub fn new(area:&str, color:&str) -> Self {
        Self { area: area.to_string(), color: color.to_string() }
    }
}


/** result of the checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the coloring is proper, gives the number of colors used
    Ok(usize),
    /// the area is colored more than once
    AreaColoredTwice(String),
    /// the area has no color
    AreaNotColored(String),
    /// the area is not part of the map
    UnknownArea(String),
    /// the color is not part of the palette
    UnknownColor(String),
    /// both areas are adjacent and share the same color
    ConflictingEdge(String, String),
}

/**
checks that a coloring is total and proper.
returns the number of distinct colors if it is
*/
pub fn checker(inst:&dyn ColoringInstance, palette:&Palette, sol:&[AreaColor]) -> CheckerResult {
    let mut colors:Vec<Option<ColorId>> = vec![None ; inst.nb_vertices()];
    let mut used = BitSet::new();
    for pair in sol {
        let v = match inst.find_region(&pair.area) {
            None => return CheckerResult::UnknownArea(pair.area.clone()),
            Some(v) => v,
        };
        let c = match palette.find(&pair.color) {
            None => return CheckerResult::UnknownColor(pair.color.clone()),
            Some(c) => c,
        };
        if colors[v].is_some() {
            return CheckerResult::AreaColoredTwice(inst.region_name(v).to_string());
        }
        colors[v] = Some(c);
        used.insert(c);
    }
    if let Some(v) = inst.vertices().find(|v| colors[*v].is_none()) {
        return CheckerResult::AreaNotColored(inst.region_name(v).to_string());
    }
    for (a,b) in inst.edges() {
        if colors[*a] == colors[*b] {
            return CheckerResult::ConflictingEdge(
                inst.region_name(*a).to_string(),
                inst.region_name(*b).to_string(),
            );
        }
    }
    CheckerResult::Ok(used.len())
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::map_instance::MapInstance;

    fn triangle() -> MapInstance {
        MapInstance::new(
            "triangle",
            vec!["x".to_string(), "y".to_string(), "z".to_string()],
            vec![vec![1,2], vec![0,2], vec![0,1]],
        )
    }

    fn rgb() -> Palette {
        Palette::new(vec!["red".to_string(), "blue".to_string(), "green".to_string()])
    }

    #[test]
    fn test_assignment() {
        let mut a = Assignment::new(3);
        assert_eq!(a.nb_assigned(), 0);
        a.assign(1, 2);
        assert!(a.is_assigned(1));
        assert_eq!(a.get(1), Some(2));
        assert_eq!(a.to_total(), None);
        a.assign(0, 0);
        a.assign(2, 1);
        assert!(a.is_total());
        assert_eq!(a.to_total(), Some(vec![0,2,1]));
        a.unassign(1);
        assert_eq!(a.nb_assigned(), 2);
        assert_eq!(a.get(1), None);
    }

    #[test]
    fn test_palette() {
        let p = rgb();
        assert_eq!(p.len(), 3);
        assert_eq!(p.find("green"), Some(2));
        assert_eq!(p.find("Green"), None);
        assert_eq!(p.name(1), "blue");
        assert!(Palette::default().is_empty());
    }

    #[test]
    fn test_checker_ok() {
        let sol = vec![
            AreaColor::new("x", "red"),
            AreaColor::new("y", "blue"),
            AreaColor::new("z", "green"),
        ];
        assert_eq!(checker(&triangle(), &rgb(), &sol), CheckerResult::Ok(3));
    }

    #[test]
    fn test_checker_errors() {
        let inst = triangle();
        let p = rgb();
        let conflict = vec![
            AreaColor::new("x", "red"),
            AreaColor::new("y", "blue"),
            AreaColor::new("z", "blue"),
        ];
        assert_eq!(
            checker(&inst, &p, &conflict),
            CheckerResult::ConflictingEdge("y".to_string(), "z".to_string())
        );
        let missing = vec![AreaColor::new("x", "red"), AreaColor::new("y", "blue")];
        assert_eq!(checker(&inst, &p, &missing), CheckerResult::AreaNotColored("z".to_string()));
        let twice = vec![AreaColor::new("x", "red"), AreaColor::new("x", "blue")];
        assert_eq!(checker(&inst, &p, &twice), CheckerResult::AreaColoredTwice("x".to_string()));
        let unknown_area = vec![AreaColor::new("w", "red")];
        assert_eq!(checker(&inst, &p, &unknown_area), CheckerResult::UnknownArea("w".to_string()));
        let unknown_color = vec![AreaColor::new("x", "pink")];
        assert_eq!(checker(&inst, &p, &unknown_color), CheckerResult::UnknownColor("pink".to_string()));
    }
}
