use std::{collections::BTreeMap, fs, io::Write, path::Path};

use anyhow::Context;
use serde::{Serialize, Serializer};

use crate::{
    catalog::Catalog,
    coords::{format_sexagesimal, GeoPoint},
    pipeline::aggregate::VideoMapSet,
};

/// A point written in the simulator's degrees/minutes/seconds notation.
struct Sexagesimal(GeoPoint);

impl Serialize for Sexagesimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_sexagesimal(&self.0))
    }
}

/// Pretty-print `value` with four-space indentation and a trailing newline.
fn write_json<T: Serialize>(value: &T, path: &Path) -> anyhow::Result<()> {
    log::info!("Writing {}", path.display());
    let mut contents = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut contents, formatter);
    value
        .serialize(&mut serializer)
        .with_context(|| format!("{}: JSON error", path.display()))?;
    contents.write_all(b"\n")?;
    fs::write(path, contents).with_context(|| format!("{}: unable to write file", path.display()))
}

/// Map name to the flattened segment endpoints of the map, ordered by name.
pub fn write_video_maps(video_maps: &VideoMapSet, path: &Path) -> anyhow::Result<()> {
    let segments: BTreeMap<&str, Vec<Sexagesimal>> = video_maps
        .iter()
        .map(|video_map| {
            let points = video_map.segments().into_iter().map(Sexagesimal).collect();
            (video_map.name.as_str(), points)
        })
        .collect();
    write_json(&segments, path)
}

/// Group, label and name of every map of the ARTCC definition, whether or not its
/// geometry was found.
pub fn write_info(catalog: &Catalog, path: &Path) -> anyhow::Result<()> {
    write_json(&catalog.info_entries(), path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use super::{write_info, write_video_maps};
    use crate::{
        catalog::{BrightnessCategory, Catalog, MapSpec},
        config::DuplicatePolicy,
        coords::{parse_sexagesimal, GeoPoint},
        geofile::geojson::LineStrings,
        pipeline::aggregate::{VideoMap, VideoMapSet},
    };

    fn spec(id: &str, name: &str, category: BrightnessCategory) -> MapSpec {
        MapSpec {
            id: id.to_string(),
            name: name.to_string(),
            short_name: id.to_uppercase(),
            category,
            stars_id: None,
        }
    }

    #[test]
    fn test_write_video_maps() {
        let dir = testdir!();
        let path = dir.join("ZNY-videomaps.json");
        let mut video_maps = VideoMapSet::new();
        video_maps
            .insert(
                VideoMap::new(
                    &spec("empty", "EMPTY", BrightnessCategory::A),
                    LineStrings::default(),
                ),
                DuplicatePolicy::Overwrite,
            )
            .unwrap();
        video_maps
            .insert(
                VideoMap::new(
                    &spec("rwy", "JFK RWY", BrightnessCategory::A),
                    LineStrings(vec![vec![
                        GeoPoint::new(-73.75, 40.625),
                        GeoPoint::new(-73.5, 40.5),
                    ]]),
                ),
                DuplicatePolicy::Overwrite,
            )
            .unwrap();
        write_video_maps(&video_maps, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let expected = concat!(
            "{\n",
            "    \"EMPTY\": [],\n",
            "    \"JFK RWY\": [\n",
            "        \"N040.37.30.000,W073.45.00.000\",\n",
            "        \"N040.30.00.000,W073.30.00.000\"\n",
            "    ]\n",
            "}\n"
        );
        assert_eq!(expected, contents);

        let written: std::collections::BTreeMap<String, Vec<String>> =
            serde_json::from_str(&contents).unwrap();
        let points: Vec<GeoPoint> = written["JFK RWY"]
            .iter()
            .map(|text| parse_sexagesimal(text).unwrap())
            .collect();
        assert_eq!(
            vec![GeoPoint::new(-73.75, 40.625), GeoPoint::new(-73.5, 40.5)],
            points
        );
    }

    #[test]
    fn test_write_info() {
        let dir = testdir!();
        let path = dir.join("ZNY.info");
        let catalog = Catalog::new(vec![
            spec("b", "BRAVO", BrightnessCategory::B),
            spec("a", "ALPHA", BrightnessCategory::A),
        ]);
        write_info(&catalog, &path).unwrap();
        let expected = concat!(
            "[\n",
            "    {\n",
            "        \"group\": 1,\n",
            "        \"label\": \"B\",\n",
            "        \"name\": \"BRAVO\"\n",
            "    },\n",
            "    {\n",
            "        \"group\": 0,\n",
            "        \"label\": \"A\",\n",
            "        \"name\": \"ALPHA\"\n",
            "    }\n",
            "]\n"
        );
        assert_eq!(expected, fs::read_to_string(&path).unwrap());
    }
}
