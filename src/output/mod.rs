pub mod binary;
pub mod json;

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    catalog::Catalog, config::Settings, geofile::geojson::write_lines_to_geojson,
    pipeline::aggregate::VideoMapSet,
};

/// Write every output file `settings` asks for and return their paths in the order written.
pub fn write_outputs(
    facility: &str,
    catalog: &Catalog,
    video_maps: &VideoMapSet,
    settings: &Settings,
) -> anyhow::Result<Vec<PathBuf>> {
    let output_dir = &settings.output_dir;
    let mut written = Vec::new();
    if settings.format.writes_json() {
        let videomaps_path = output_dir.join(format!("{}-videomaps.json", facility));
        json::write_video_maps(video_maps, &videomaps_path)?;
        written.push(videomaps_path);

        let info_path = output_dir.join(format!("{}.info", facility));
        json::write_info(catalog, &info_path)?;
        written.push(info_path);
    }
    if settings.format.writes_binary() {
        let videomaps_path = output_dir.join(format!(
            "{}-videomaps.{}",
            facility,
            binary::BINARY_EXTENSION
        ));
        binary::write_video_maps(video_maps, catalog, &videomaps_path)?;
        written.push(videomaps_path);

        let manifest_path = output_dir.join(format!(
            "{}-manifest.{}",
            facility,
            binary::BINARY_EXTENSION
        ));
        binary::write_manifest(video_maps, &manifest_path)?;
        written.push(manifest_path);
    }
    if settings.dump_geojson {
        let dump_path = output_dir.join(format!("{}-videomaps.geojson", facility));
        dump_geojson(video_maps, &dump_path)?;
        written.push(dump_path);
    }
    Ok(written)
}

fn dump_geojson(video_maps: &VideoMapSet, path: &Path) -> anyhow::Result<()> {
    log::info!("Writing GeoJSON dump to {}", path.display());
    write_lines_to_geojson(
        video_maps
            .iter()
            .map(|video_map| (video_map.name.as_str(), video_map.lines.as_slice())),
        path,
    )
    .with_context(|| format!("{}: unable to write file", path.display()))
}
