use log::{debug, error};

use crate::color::{AreaColor, CheckerResult, FixedConstraint, checker};
use crate::error::{MapColoringError, Result};
use crate::knowledge_base::KnowledgeBase;
use crate::map_instance::MapInstance;
use crate::search::backtracking::{BacktrackingSolver, SearchStatistics, SolveOutcome};
use crate::search::stopping::{NeverStoppingCriterion, StoppingCriterion};
use crate::source::KnowledgeSource;


/** outcome of a map coloring request: (area, color) pairs in declaration order */
pub type ColoringOutcome = SolveOutcome<Vec<AreaColor>>;

/**
Query interface of the map coloring service. Holds the knowledge base once it
is loaded, and refuses every query before that.
Solves only read the knowledge base, so a `MapColoring` can be shared between
threads.
*/
#[derive(Debug, Clone, Default)]
pub struct MapColoring {
    /// loaded model (None if not loaded or if the last load failed)
    kb: Option<KnowledgeBase>,
}

impl MapColoring {
    /** creates a facade with no knowledge base */
    pub fn new() -> Self { Self::default() }

    /** creates a facade serving an already loaded knowledge base */
    pub fn from_knowledge_base(kb:KnowledgeBase) -> Self { Self { kb: Some(kb) } }

    /** creates a facade and loads the source */
    pub fn with_source(source:&dyn KnowledgeSource) -> Result<Self> {
        let mut res = Self::new();
        res.load(source)?;
        Ok(res)
    }

    /**
    loads (or replaces) the knowledge base.
    on failure the previous model is dropped and queries report `NotInitialized`.
    */
    pub fn load(&mut self, source:&dyn KnowledgeSource) -> Result<()> {
        match KnowledgeBase::load(source) {
            Ok(kb) => {
                self.kb = Some(kb);
                Ok(())
            },
            Err(e) => {
                error!("unable to load the knowledge base: {}", e);
                self.kb = None;
                Err(e)
            }
        }
    }

    /// true iff a knowledge base is loaded
    pub fn is_initialized(&self) -> bool { self.kb.is_some() }

    /// loaded knowledge base
    pub fn knowledge_base(&self) -> Result<&KnowledgeBase> {
        self.kb.as_ref().ok_or(MapColoringError::NotInitialized)
    }

    /// map identifiers in declaration order
    pub fn get_maps(&self) -> Result<Vec<String>> {
        Ok(self.knowledge_base()?.list_maps())
    }

    /// areas of a map, sorted case-insensitively
    pub fn get_areas(&self, map:&str) -> Result<Vec<String>> {
        self.knowledge_base()?.list_regions(map)
    }

    /// areas adjacent to `area`, sorted case-insensitively
    pub fn get_adjacent(&self, map:&str, area:&str) -> Result<Vec<String>> {
        self.knowledge_base()?.list_neighbors(map, area)
    }

    /// colors in declaration order
    pub fn get_colors(&self) -> Result<Vec<String>> {
        Ok(self.knowledge_base()?.list_colors())
    }

    /** colors a map (first coloring in declaration order) */
    pub fn color_map(&self, map:&str) -> Result<ColoringOutcome> {
        Ok(self.solve(map, None, NeverStoppingCriterion::default(), None)?.0)
    }

    /** colors a map, `area` being required to take `color` */
    pub fn color_map_with(&self, map:&str, area:&str, color:&str) -> Result<ColoringOutcome> {
        Ok(self.solve(map, Some((area, color)), NeverStoppingCriterion::default(), None)?.0)
    }

    /**
    colors a map with an optional (area, color) constraint, stopping the search
    when `stopping_criterion` is met or after `node_limit` expanded nodes.
    Also returns the search statistics.
    */
    pub fn solve<Stop:StoppingCriterion>(
        &self,
        map:&str,
        fixed:Option<(&str, &str)>,
        stopping_criterion:Stop,
        node_limit:Option<usize>,
    ) -> Result<(ColoringOutcome, SearchStatistics)> {
        let kb = self.knowledge_base()?;
        let inst = kb.map(map)?;
        let fixed = match fixed {
            None => None,
            Some((area, color)) => Some(self.fixed_constraint(inst, area, color)?),
        };
        let palette = kb.palette();
        if palette.is_empty() {
            return Err(MapColoringError::EmptyPalette);
        }
        debug!("coloring map {} (fixed: {:?})", map, fixed);
        let (outcome, stats) = BacktrackingSolver::new(inst, palette.len(), fixed)
            .with_node_limit(node_limit)
            .solve(stopping_criterion);
        let outcome = outcome.map(|colors| {
            colors.iter().enumerate()
                .map(|(v,c)| AreaColor::new(inst.names()[v].as_str(), palette.name(*c)))
                .collect()
        });
        Ok((outcome, stats))
    }

    /// validates the (area, color) pair against the map and the palette
    fn fixed_constraint(&self, inst:&MapInstance, area:&str, color:&str) -> Result<FixedConstraint> {
        let kb = self.knowledge_base()?;
        let invalid = |reason:MapColoringError| MapColoringError::InvalidRequest {
            region: area.to_string(),
            color: color.to_string(),
            reason: Box::new(reason),
        };
        let region = kb.region(inst, area).map_err(invalid)?;
        let color_id = kb.palette().find(color)
            .ok_or_else(|| invalid(MapColoringError::UnknownColor(color.to_string())))?;
        Ok(FixedConstraint { region, color: color_id })
    }

    /** checks a coloring of `map` (e.g. read back from a file) */
    pub fn check(&self, map:&str, solution:&[AreaColor]) -> Result<CheckerResult> {
        let kb = self.knowledge_base()?;
        Ok(checker(kb.map(map)?, kb.palette(), solution))
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    use crate::facts::FactsSource;
    use crate::search::stopping::{OptionalTimeStoppingCriterion, TimeStoppingCriterion};
    use crate::source::{MemorySource, RawArea, RawMap};

    fn triangle(colors:&[&str]) -> MapColoring {
        MapColoring::with_source(&MemorySource {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            maps: vec![RawMap {
                id: "triangle".to_string(),
                areas: vec![
                    RawArea::new("X", "X", &["Y", "Z"]),
                    RawArea::new("Y", "Y", &["Z"]),
                    RawArea::new("Z", "Z", &[]),
                ],
            }],
        }).unwrap()
    }

    fn nordeste() -> MapColoring {
        MapColoring::with_source(&FactsSource::from_file("insts/nordeste.pl").unwrap()).unwrap()
    }

    fn as_map(sol:&[AreaColor]) -> HashMap<String, String> {
        sol.iter().map(|p| (p.area.clone(), p.color.clone())).collect()
    }

    #[test]
    fn test_triangle_two_colors() {
        let service = triangle(&["red", "blue"]);
        assert_eq!(service.color_map("triangle").unwrap(), SolveOutcome::NoSolution);
    }

    #[test]
    fn test_triangle_three_colors() {
        let service = triangle(&["red", "blue", "green"]);
        let sol = service.color_map("triangle").unwrap().colored().unwrap();
        assert_eq!(sol, vec![
            AreaColor::new("X", "red"),
            AreaColor::new("Y", "blue"),
            AreaColor::new("Z", "green"),
        ]);
    }

    #[test]
    fn test_triangle_fixed_color() {
        let service = triangle(&["red", "blue", "green"]);
        let sol = as_map(&service.color_map_with("triangle", "X", "green").unwrap().colored().unwrap());
        assert_eq!(sol["X"], "green");
        assert_ne!(sol["Y"], sol["Z"]);
        assert_ne!(sol["Y"], "green");
        assert_ne!(sol["Z"], "green");
    }

    #[test]
    fn test_triangle_fact_base() {
        let service = MapColoring::with_source(&FactsSource::from_file("insts/triangle.pl").unwrap()).unwrap();
        assert_eq!(service.get_adjacent("triangle", "x").unwrap(), vec!["y", "z"]);
        assert_eq!(service.color_map("triangle").unwrap(), SolveOutcome::NoSolution);
        assert_eq!(service.color_map_with("triangle", "y", "red").unwrap(), SolveOutcome::NoSolution);
    }

    #[test]
    fn test_unknown_map() {
        let service = triangle(&["red", "blue", "green"]);
        match service.color_map("atlantis") {
            Err(MapColoringError::UnknownMap(m)) => assert_eq!(m, "atlantis"),
            r => panic!("unexpected {:?}", r),
        }
        assert!(matches!(
            service.color_map_with("atlantis", "X", "red"),
            Err(MapColoringError::UnknownMap(_))
        ));
    }

    #[test]
    fn test_invalid_fixed_constraint() {
        let service = triangle(&["red", "blue", "green"]);
        match service.color_map_with("triangle", "W", "red") {
            Err(MapColoringError::InvalidRequest { reason, .. }) => {
                assert!(matches!(*reason, MapColoringError::UnknownRegion { .. }))
            },
            r => panic!("unexpected {:?}", r),
        }
        match service.color_map_with("triangle", "X", "pink") {
            Err(MapColoringError::InvalidRequest { reason, .. }) => {
                assert!(matches!(*reason, MapColoringError::UnknownColor(_)))
            },
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_empty_palette() {
        let service = triangle(&[]);
        assert!(matches!(service.color_map("triangle"), Err(MapColoringError::EmptyPalette)));
    }

    #[test]
    fn test_not_initialized() {
        let service = MapColoring::new();
        assert!(!service.is_initialized());
        assert!(matches!(service.get_maps(), Err(MapColoringError::NotInitialized)));
        assert!(matches!(service.get_colors(), Err(MapColoringError::NotInitialized)));
        assert!(matches!(service.get_areas("nordeste"), Err(MapColoringError::NotInitialized)));
        assert!(matches!(service.color_map("nordeste"), Err(MapColoringError::NotInitialized)));
    }

    #[test]
    fn test_with_source_reports_load_error() {
        let broken = MemorySource {
            colors: vec!["red".to_string()],
            maps: vec![RawMap { id: "m".to_string(), areas: vec![RawArea::new("a", "A", &["B"])] }],
        };
        match MapColoring::with_source(&broken) {
            Err(MapColoringError::UnresolvedCode { map, area, code }) => {
                assert_eq!((map.as_str(), area.as_str(), code.as_str()), ("m", "a", "B"));
            },
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_failed_load_drops_model() {
        let mut service = triangle(&["red"]);
        assert!(service.is_initialized());
        let broken = MemorySource {
            colors: vec![],
            maps: vec![RawMap { id: "m".to_string(), areas: vec![RawArea::new("a", "A", &["B"])] }],
        };
        assert!(service.load(&broken).is_err());
        assert!(matches!(service.get_maps(), Err(MapColoringError::NotInitialized)));
    }

    #[test]
    fn test_nordeste() {
        let service = nordeste();
        assert_eq!(service.get_maps().unwrap(), vec!["nordeste", "sul", "ilhas"]);
        assert_eq!(service.get_colors().unwrap(), vec!["vermelho", "verde", "azul", "amarelo"]);
        assert_eq!(service.get_adjacent("nordeste", "paraiba").unwrap(), vec!["ceara", "pernambuco", "rio_grande_do_norte"]);
        for map in service.get_maps().unwrap() {
            let areas = service.get_areas(&map).unwrap();
            let sol = service.color_map(&map).unwrap().colored().unwrap();
            assert_eq!(sol.len(), areas.len());
            assert!(matches!(service.check(&map, &sol).unwrap(), CheckerResult::Ok(_)));
            // every adjacency pair gets different colors
            let colors = as_map(&sol);
            for a in &areas {
                for b in service.get_adjacent(&map, a).unwrap() {
                    assert_ne!(colors[a], colors[&b]);
                }
            }
        }
    }

    #[test]
    fn test_nordeste_every_fixed_constraint() {
        let service = nordeste();
        for area in service.get_areas("nordeste").unwrap() {
            for color in service.get_colors().unwrap() {
                let sol = service.color_map_with("nordeste", &area, &color).unwrap().colored().unwrap();
                assert_eq!(as_map(&sol)[&area], color);
                assert!(matches!(service.check("nordeste", &sol).unwrap(), CheckerResult::Ok(_)));
            }
        }
    }

    #[test]
    fn test_result_in_declaration_order() {
        let service = nordeste();
        let kb = service.knowledge_base().unwrap();
        let sol = service.color_map("nordeste").unwrap().colored().unwrap();
        let areas:Vec<&str> = sol.iter().map(|p| p.area.as_str()).collect();
        let declared:Vec<&str> = kb.map("nordeste").unwrap().names().iter().map(|a| a.as_str()).collect();
        assert_eq!(areas, declared);
    }

    #[test]
    fn test_deterministic() {
        let service = nordeste();
        let first = service.color_map("sul").unwrap();
        assert_eq!(service.color_map("sul").unwrap(), first);
        assert_eq!(nordeste().color_map("sul").unwrap(), first);
    }

    #[test]
    fn test_timeout() {
        let service = nordeste();
        let (outcome, stats) = service.solve(
            "nordeste", None, OptionalTimeStoppingCriterion::new(None), Some(2)
        ).unwrap();
        assert_eq!(outcome, SolveOutcome::Timeout);
        assert_eq!(stats.nb_expanded, 2);
        let (outcome, stats) = service.solve(
            "nordeste", Some(("bahia", "azul")), TimeStoppingCriterion::new(0.), None
        ).unwrap();
        assert_eq!(outcome, SolveOutcome::Timeout);
        assert_eq!(stats.nb_expanded, 0);
        let (outcome, _) = service.solve(
            "nordeste", None, OptionalTimeStoppingCriterion::new(Some(3600.)), None
        ).unwrap();
        assert!(outcome.colored().is_some());
    }

    #[test]
    fn test_concurrent_solves() {
        let service = Arc::new(nordeste());
        let expected = service.color_map("nordeste").unwrap();
        let handles:Vec<_> = (0..4).map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.color_map("nordeste").unwrap())
        }).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
