use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    path::PathBuf,
};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, MapSpec},
    config::DuplicatePolicy,
    coords::GeoPoint,
    geofile::geojson::{segments_of, LineStrings},
};

/// A video map as the simulator loads it: metadata from the ARTCC definition plus the
/// lines of every LineString feature of its GeoJSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoMap {
    pub group: i32,
    pub label: String,
    pub name: String,
    /// STARS id from the ARTCC definition, if any.
    pub id: Option<i64>,
    pub lines: Vec<Vec<GeoPoint>>,
}

impl VideoMap {
    pub fn new(spec: &MapSpec, lines: LineStrings) -> Self {
        Self {
            group: spec.group(),
            label: spec.short_name.clone(),
            name: spec.name.clone(),
            id: spec.stars_id,
            lines: lines.into_inner(),
        }
    }

    /// The lines as consecutive segment endpoint pairs.
    pub fn segments(&self) -> Vec<GeoPoint> {
        segments_of(&self.lines)
    }
}

/// Video maps of one facility keyed by display name.
#[derive(Debug, Default)]
pub struct VideoMapSet {
    maps: BTreeMap<String, VideoMap>,
}

impl VideoMapSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a map, resolving a name clash according to `policy`. Returns true if the name
    /// was already present.
    pub fn insert(&mut self, map: VideoMap, policy: DuplicatePolicy) -> anyhow::Result<bool> {
        let Some(existing) = self.maps.get_mut(&map.name) else {
            self.maps.insert(map.name.clone(), map);
            return Ok(false);
        };
        match policy {
            DuplicatePolicy::Overwrite => *existing = map,
            DuplicatePolicy::Append => existing.lines.extend(map.lines),
            DuplicatePolicy::Abort => {
                return Err(anyhow!("{}: multiple definitions", map.name));
            }
        }
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&VideoMap> {
        self.maps.get(name)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Maps ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &VideoMap> {
        self.maps.values()
    }

    pub fn names(&self) -> BTreeSet<String> {
        self.maps.keys().cloned().collect()
    }

    /// Maps in the order the ARTCC definition lists them; each name appears once.
    pub fn in_catalog_order(&self, catalog: &Catalog) -> Vec<&VideoMap> {
        let mut seen = HashSet::new();
        catalog
            .specs()
            .iter()
            .filter(|spec| seen.insert(spec.name.as_str()))
            .filter_map(|spec| self.maps.get(&spec.name))
            .collect()
    }
}

/// Outcome of a conversion run that did not fail.
#[derive(Debug, Default)]
pub struct RunReport {
    /// GeoJSON files whose lines made it into the output.
    pub files_read: usize,
    /// Names defined by more than one GeoJSON file.
    pub duplicates: Vec<String>,
    /// Diagnostics of GeoJSON files that were skipped.
    pub skipped: Vec<String>,
    pub written: Vec<PathBuf>,
}

impl RunReport {
    pub fn has_warnings(&self) -> bool {
        !self.duplicates.is_empty() || !self.skipped.is_empty()
    }
}
