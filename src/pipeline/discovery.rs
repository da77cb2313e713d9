use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::{
    catalog::{Catalog, MapSpec},
    geofile::error::GeometryError,
};

pub const GEOJSON_EXTENSION: &str = "geojson";

/// A GeoJSON file together with the ARTCC map it provides the lines for.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySource {
    pub path: PathBuf,
    pub spec: MapSpec,
}

/// `<video_maps_dir>/<FACILITY>`
pub fn facility_maps_dir(video_maps_dir: &Path, facility: &str) -> PathBuf {
    video_maps_dir.join(facility)
}

/// Walk the facility's video map directory in file name order and keep the GeoJSON files
/// whose base name is the id of a map in `catalog`. Files the ARTCC does not use are
/// skipped.
pub fn scan_geometry_files(
    maps_dir: &Path,
    facility: &str,
    catalog: &Catalog,
) -> anyhow::Result<Vec<GeometrySource>> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(maps_dir).sort_by_file_name() {
        let entry = entry.with_context(|| {
            format!("error walking video map directory {}", maps_dir.display())
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(GEOJSON_EXTENSION)
        {
            continue;
        }
        if !path.to_string_lossy().contains(facility) {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        match catalog.spec_for_id(id) {
            Some(spec) => sources.push(GeometrySource {
                path: path.to_path_buf(),
                spec: spec.clone(),
            }),
            None => log::debug!("{}: not used by {}", path.display(), facility),
        }
    }
    Ok(sources)
}

/// Expected GeoJSON file of every map in `catalog`, in definition order. Fails on the
/// first map whose file does not exist.
pub fn direct_geometry_files(
    maps_dir: &Path,
    catalog: &Catalog,
) -> Result<Vec<GeometrySource>, GeometryError> {
    catalog
        .specs()
        .iter()
        .map(|spec| {
            let path = maps_dir.join(format!("{}.{}", spec.id, GEOJSON_EXTENSION));
            if !path.is_file() {
                return Err(GeometryError::Missing { path });
            }
            Ok(GeometrySource {
                path,
                spec: spec.clone(),
            })
        })
        .collect()
}
