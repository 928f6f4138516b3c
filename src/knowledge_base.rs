use std::collections::HashMap;

use bit_set::BitSet;
use log::{info, warn};

use crate::color::{ColoringInstance, Palette, RegionId};
use crate::error::{MapColoringError, Result};
use crate::map_instance::MapInstance;
use crate::source::{KnowledgeSource, RawArea, RawMap};

/**
Read-only model loaded from a knowledge source: the color palette and the
resolved maps, both in declaration order.
*/
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// colors offered to every map
    palette: Palette,
    /// maps in declaration order
    maps: Vec<MapInstance>,
}

impl KnowledgeBase {

    /**
    loads a knowledge base in two phases: reads the raw declarations, then
    resolves the adjacency codes of each map to area indices.
    */
    pub fn load(source:&dyn KnowledgeSource) -> Result<Self> {
        let colors = source.load_colors()?;
        let raw_maps = source.load_maps()?;
        let res = Self::from_declarations(colors, &raw_maps)?;
        info!("knowledge base loaded: {} colors, {} maps", res.palette.len(), res.maps.len());
        Ok(res)
    }

    /** builds the knowledge base from raw declarations */
    pub fn from_declarations(colors:Vec<String>, raw_maps:&[RawMap]) -> Result<Self> {
        let mut maps:Vec<MapInstance> = Vec::with_capacity(raw_maps.len());
        for raw in raw_maps {
            if maps.iter().any(|m| m.id() == raw.id) {
                return Err(MapColoringError::DuplicateMap(raw.id.clone()));
            }
            let map = resolve_map(raw)?;
            map.display_statistics();
            maps.push(map);
        }
        Ok(Self { palette: Palette::new(colors), maps })
    }

    /// color palette
    pub fn palette(&self) -> &Palette { &self.palette }

    /// map called `id`
    pub fn map(&self, id:&str) -> Result<&MapInstance> {
        self.maps.iter().find(|m| m.id() == id)
            .ok_or_else(|| MapColoringError::UnknownMap(id.to_string()))
    }

    /// area `region` of map `map`
    pub fn region(&self, map:&MapInstance, region:&str) -> Result<RegionId> {
        map.find_region(region).ok_or_else(|| MapColoringError::UnknownRegion {
            map: map.id().to_string(),
            region: region.to_string(),
        })
    }

    /// map identifiers in declaration order
    pub fn list_maps(&self) -> Vec<String> {
        self.maps.iter().map(|m| m.id().to_string()).collect()
    }

    /// area identifiers of a map, sorted case-insensitively by label
    pub fn list_regions(&self, map_id:&str) -> Result<Vec<String>> {
        Ok(self.map(map_id)?.sorted_names())
    }

    /// identifiers of the areas adjacent to `region_id`, sorted case-insensitively
    pub fn list_neighbors(&self, map_id:&str, region_id:&str) -> Result<Vec<String>> {
        let map = self.map(map_id)?;
        let u = self.region(map, region_id)?;
        Ok(map.sorted_neighbor_names(u))
    }

    /// colors in declaration order
    pub fn list_colors(&self) -> Vec<String> { self.palette.names().to_vec() }

    /** gives back the declarations of the model (resolved, symmetric adjacency) */
    pub fn to_declarations(&self) -> (Vec<String>, Vec<RawMap>) {
        let maps = self.maps.iter().map(|map| RawMap {
            id: map.id().to_string(),
            areas: map.vertices().map(|u| RawArea {
                name: map.region_name(u).to_string(),
                label: if map.label(u) == map.region_name(u) { None } else { Some(map.label(u).to_string()) },
                code: map.code(u).to_string(),
                adjacent: map.neighbors(u).iter().map(|v| map.code(*v).to_string()).collect(),
            }).collect(),
        }).collect();
        (self.palette.names().to_vec(), maps)
    }
}


/**
resolves the codes of a raw map into a symmetric adjacency list.
one-sided declarations are completed (with a warning).
*/
pub fn resolve_map(raw:&RawMap) -> Result<MapInstance> {
    let n = raw.areas.len();
    // phase 1: index the areas by code
    let mut by_code:HashMap<&str, RegionId> = HashMap::with_capacity(n);
    for (i,area) in raw.areas.iter().enumerate() {
        if raw.areas[..i].iter().any(|a| a.name == area.name) {
            return Err(MapColoringError::DuplicateArea { map: raw.id.clone(), area: area.name.clone() });
        }
        if by_code.insert(area.code.as_str(), i).is_some() {
            return Err(MapColoringError::DuplicateCode { map: raw.id.clone(), code: area.code.clone() });
        }
    }
    // phase 2: resolve adjacency codes
    let mut adj_list:Vec<Vec<RegionId>> = vec![Vec::new() ; n];
    let mut declared:Vec<BitSet> = vec![BitSet::default() ; n];
    for (i,area) in raw.areas.iter().enumerate() {
        for code in &area.adjacent {
            let j = match by_code.get(code.as_str()) {
                None => return Err(MapColoringError::UnresolvedCode {
                    map: raw.id.clone(),
                    area: area.name.clone(),
                    code: code.clone(),
                }),
                Some(j) => *j,
            };
            if i == j {
                return Err(MapColoringError::SelfAdjacent { map: raw.id.clone(), area: area.name.clone() });
            }
            if declared[i].insert(j) {
                adj_list[i].push(j);
            }
        }
    }
    // symmetric closure
    for i in 0..n {
        for j in declared[i].iter().collect::<Vec<_>>() {
            if !declared[j].contains(i) {
                warn!(
                    "map {}: {} lists {} as adjacent but not the reverse, adding it",
                    raw.id, raw.areas[i].name, raw.areas[j].name
                );
                declared[j].insert(i);
                adj_list[j].push(i);
            }
        }
    }
    let names = raw.areas.iter().map(|a| a.name.clone()).collect();
    let labels = raw.areas.iter()
        .map(|a| a.label.clone().unwrap_or_else(|| a.name.clone())).collect();
    let codes = raw.areas.iter().map(|a| a.code.clone()).collect();
    Ok(MapInstance::from_parts(&raw.id, names, labels, codes, adj_list))
}
