use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Deserializer, Serialize};

use crate::geofile::{error::JsonDiagnostic, null_as_default};

/// STARS brightness category of a video map. Anything other than "A", including a
/// missing or null value, is treated as "B".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessCategory {
    A,
    #[default]
    B,
}

impl<'de> Deserialize<'de> for BrightnessCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)?.as_deref() {
            Some("A") => BrightnessCategory::A,
            _ => BrightnessCategory::B,
        })
    }
}

impl BrightnessCategory {
    pub fn group(&self) -> i32 {
        match self {
            BrightnessCategory::A => 0,
            BrightnessCategory::B => 1,
        }
    }
}

/// One video map of an ARTCC definition.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapSpec {
    /// Base filename of the map's GeoJSON file.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Full name, used to identify the map in scenarios.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Label for the DCB menu.
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_name: String,
    #[serde(rename = "starsBrightnessCategory", default)]
    pub category: BrightnessCategory,
    #[serde(default)]
    pub stars_id: Option<i64>,
}

impl MapSpec {
    pub fn group(&self) -> i32 {
        self.category.group()
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ArtccDefinition {
    #[serde(default, deserialize_with = "null_as_default")]
    video_maps: Vec<MapSpec>,
}

/// Entry of the `.info` file the simulator reads to build its map menus.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    pub group: i32,
    pub label: String,
    pub name: String,
}

/// The video maps an ARTCC uses, in definition order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: Vec<MapSpec>,
    /// Position in `specs` by map id. A repeated id resolves to its last definition.
    id_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(specs: Vec<MapSpec>) -> Self {
        let id_index = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| (spec.id.clone(), index))
            .collect();
        Self { specs, id_index }
    }

    pub fn from_slice(contents: &[u8]) -> anyhow::Result<Self> {
        let definition: ArtccDefinition = serde_json::from_slice(contents)
            .map_err(|err| anyhow!("{}", JsonDiagnostic::from(&err)))?;
        Ok(Self::new(definition.video_maps))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read(path)
            .with_context(|| format!("{}: unable to read ARTCC definition", path.display()))?;
        let catalog = Self::from_slice(&contents)
            .with_context(|| format!("{}: invalid ARTCC definition", path.display()))?;
        log::info!(
            "Read ARTCC definition {} with {} video maps",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn specs(&self) -> &[MapSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec_for_id(&self, id: &str) -> Option<&MapSpec> {
        self.id_index.get(id).map(|index| &self.specs[*index])
    }

    pub fn info_entries(&self) -> Vec<InfoEntry> {
        self.specs
            .iter()
            .map(|spec| InfoEntry {
                group: spec.group(),
                label: spec.short_name.clone(),
                name: spec.name.clone(),
            })
            .collect()
    }
}

/// `<artccs_dir>/<FACILITY>.json`
pub fn artcc_definition_path(artccs_dir: &Path, facility: &str) -> PathBuf {
    artccs_dir.join(format!("{}.json", facility))
}
