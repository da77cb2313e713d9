use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::Serialize;

use crate::{catalog::Catalog, pipeline::aggregate::VideoMapSet};

pub const BINARY_EXTENSION: &str = "bin";

fn write_bincode<T: Serialize + ?Sized>(value: &T, path: &Path) -> anyhow::Result<()> {
    log::info!("Writing {}", path.display());
    let file = File::create(path)
        .with_context(|| format!("{}: unable to create file", path.display()))?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, value)
        .with_context(|| format!("{}: unable to write file", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("{}: unable to write file", path.display()))
}

/// All video maps with raw coordinates and per-feature lines, in ARTCC definition order.
pub fn write_video_maps(
    video_maps: &VideoMapSet,
    catalog: &Catalog,
    path: &Path,
) -> anyhow::Result<()> {
    write_bincode(&video_maps.in_catalog_order(catalog), path)
}

/// Just the names of the maps, so a reader can list them without loading any geometry.
pub fn write_manifest(video_maps: &VideoMapSet, path: &Path) -> anyhow::Result<()> {
    write_bincode(&video_maps.names(), path)
}
