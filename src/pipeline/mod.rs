pub mod aggregate;
pub mod discovery;

use indicatif::ProgressBar;

use crate::{
    catalog::{artcc_definition_path, Catalog},
    config::{GeometryErrorPolicy, Settings, Traversal},
    geofile::geojson::read_line_strings,
    output::write_outputs,
};

use self::{
    aggregate::{RunReport, VideoMap, VideoMapSet},
    discovery::{direct_geometry_files, facility_maps_dir, scan_geometry_files},
};

/// Convert the video maps of one facility and write the output files.
///
/// An error returned from here is fatal for the run. Problems with individual GeoJSON
/// files and duplicate map names only end the run when `settings` asks for it; otherwise
/// they are logged and listed in the returned report.
pub fn convert(facility: &str, settings: &Settings) -> anyhow::Result<RunReport> {
    let catalog = Catalog::load(&artcc_definition_path(&settings.artccs_dir, facility))?;
    if catalog.is_empty() {
        log::warn!("{} defines no video maps", facility);
    }
    let mut report = RunReport::default();
    let video_maps = collect_video_maps(facility, &catalog, settings, &mut report)?;
    if video_maps.is_empty() {
        log::warn!("No video maps found for {}", facility);
    }
    log::info!(
        "Read {} video maps from {} GeoJSON files",
        video_maps.len(),
        report.files_read
    );
    report.written = write_outputs(facility, &catalog, &video_maps, settings)?;
    Ok(report)
}

pub fn collect_video_maps(
    facility: &str,
    catalog: &Catalog,
    settings: &Settings,
    report: &mut RunReport,
) -> anyhow::Result<VideoMapSet> {
    let maps_dir = facility_maps_dir(&settings.video_maps_dir, facility);
    let sources = match settings.traversal {
        Traversal::Scan => scan_geometry_files(&maps_dir, facility, catalog)?,
        Traversal::Direct => direct_geometry_files(&maps_dir, catalog)?,
    };

    let mut video_maps = VideoMapSet::new();
    let bar = ProgressBar::new(sources.len() as u64);
    for source in sources {
        log::debug!("Reading {}", source.path.display());
        let lines = match read_line_strings(&source.path) {
            Ok(lines) => lines,
            Err(err) => match settings.on_geometry_error {
                GeometryErrorPolicy::Abort => {
                    bar.abandon();
                    return Err(err.into());
                }
                GeometryErrorPolicy::Warn => {
                    bar.suspend(|| log::warn!("{}", err));
                    report.skipped.push(err.to_string());
                    bar.inc(1);
                    continue;
                }
            },
        };
        if lines.is_empty() {
            log::debug!("{}: no LineString features", source.path.display());
        } else {
            log::debug!("{}: {} lines", source.path.display(), lines.len());
        }
        let name = source.spec.name.clone();
        let replaced = video_maps
            .insert(VideoMap::new(&source.spec, lines), settings.on_duplicate)
            .map_err(|err| {
                bar.abandon();
                err.context(format!("{}", source.path.display()))
            })?;
        if replaced {
            bar.suspend(|| log::warn!("{}: multiple definitions", name));
            report.duplicates.push(name);
        }
        report.files_read += 1;
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(video_maps)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use testdir::testdir;

    use super::convert;
    use crate::{
        config::{DuplicatePolicy, GeometryErrorPolicy, OutputFormat, Settings, Traversal},
        geofile::error::GeometryError,
    };

    const LINE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {},
         "geometry": {"type": "LineString", "coordinates": [[-73.75, 40.625], [-73.5, 40.5], [-73.25, 40.5]]}},
        {"type": "Feature", "properties": {},
         "geometry": {"type": "Point", "coordinates": [-73.75, 40.625]}}
    ]}"#;

    const SHORT_LINE: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1.0, 1.0], [2.0, 2.0]]}}
    ]}"#;

    /// Lay out `ARTCCs/ZNY.json` and `VideoMaps/ZNY/<id>.geojson` under `root`.
    fn fixture(root: &Path, maps: &[(&str, &str)], geojson: &[(&str, &str)]) -> Settings {
        let entries: Vec<String> = maps
            .iter()
            .map(|(id, name)| {
                format!(
                    r#"{{"id": "{}", "name": "{}", "shortName": "{}", "starsBrightnessCategory": "A"}}"#,
                    id, name, id
                )
            })
            .collect();
        fs::create_dir_all(root.join("ARTCCs")).unwrap();
        fs::write(
            root.join("ARTCCs").join("ZNY.json"),
            format!(r#"{{"videoMaps": [{}]}}"#, entries.join(",")),
        )
        .unwrap();
        let maps_dir = root.join("VideoMaps").join("ZNY");
        fs::create_dir_all(&maps_dir).unwrap();
        for (id, contents) in geojson {
            fs::write(maps_dir.join(format!("{}.geojson", id)), contents).unwrap();
        }
        let output_dir = root.join("out");
        fs::create_dir_all(&output_dir).unwrap();
        Settings {
            artccs_dir: root.join("ARTCCs"),
            video_maps_dir: root.join("VideoMaps"),
            output_dir,
            ..Settings::default()
        }
    }

    fn read_videomaps_json(settings: &Settings) -> serde_json::Value {
        let contents = fs::read_to_string(settings.output_dir.join("ZNY-videomaps.json")).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[test]
    fn test_scan_uses_only_files_present() {
        let dir = testdir!();
        let settings = fixture(
            &dir,
            &[("A", "ALPHA"), ("B", "BRAVO"), ("C", "CHARLIE")],
            &[("A", LINE), ("C", SHORT_LINE)],
        );
        let report = convert("ZNY", &settings).unwrap();
        assert_eq!(2, report.files_read);
        assert!(!report.has_warnings());

        let videomaps = read_videomaps_json(&settings);
        let names: Vec<&String> = videomaps.as_object().unwrap().keys().collect();
        assert_eq!(vec!["ALPHA", "CHARLIE"], names);
        assert_eq!(
            serde_json::json!([
                "N040.37.30.000,W073.45.00.000",
                "N040.30.00.000,W073.30.00.000",
                "N040.30.00.000,W073.30.00.000",
                "N040.30.00.000,W073.15.00.000"
            ]),
            videomaps["ALPHA"]
        );

        // The info file lists every map of the definition, with or without geometry.
        let info: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(settings.output_dir.join("ZNY.info")).unwrap())
                .unwrap();
        assert_eq!(3, info.as_array().unwrap().len());
        assert_eq!(serde_json::json!({"group": 0, "label": "B", "name": "BRAVO"}), info[1]);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let dir = testdir!();
        let settings = fixture(
            &dir,
            &[("A", "SHARED"), ("B", "SHARED")],
            &[("A", LINE), ("B", SHORT_LINE)],
        );
        let report = convert("ZNY", &settings).unwrap();
        assert_eq!(vec!["SHARED".to_string()], report.duplicates);
        assert!(report.has_warnings());

        let videomaps = read_videomaps_json(&settings);
        assert_eq!(1, videomaps.as_object().unwrap().len());
        assert_eq!(2, videomaps["SHARED"].as_array().unwrap().len());
    }

    #[test]
    fn test_duplicate_name_abort() {
        let dir = testdir!();
        let settings = Settings {
            on_duplicate: DuplicatePolicy::Abort,
            ..fixture(
                &dir,
                &[("A", "SHARED"), ("B", "SHARED")],
                &[("A", LINE), ("B", SHORT_LINE)],
            )
        };
        let err = convert("ZNY", &settings).unwrap_err();
        assert!(format!("{:?}", err).contains("SHARED: multiple definitions"));
        assert!(!settings.output_dir.join("ZNY-videomaps.json").exists());
    }

    #[test]
    fn test_malformed_geometry_warns_and_continues() {
        let dir = testdir!();
        let settings = fixture(
            &dir,
            &[("A", "ALPHA"), ("B", "BRAVO")],
            &[("A", "{\"type\": \"FeatureCollection\",\n \"features\": [}"), ("B", SHORT_LINE)],
        );
        let report = convert("ZNY", &settings).unwrap();
        assert_eq!(1, report.files_read);
        assert_eq!(1, report.skipped.len());
        assert!(report.skipped[0].contains("A.geojson: error at line 2"));

        let videomaps = read_videomaps_json(&settings);
        let names: Vec<&String> = videomaps.as_object().unwrap().keys().collect();
        assert_eq!(vec!["BRAVO"], names);
    }

    #[test]
    fn test_malformed_geometry_abort() {
        let dir = testdir!();
        let settings = Settings {
            on_geometry_error: GeometryErrorPolicy::Abort,
            ..fixture(
                &dir,
                &[("A", "ALPHA"), ("B", "BRAVO")],
                &[("A", "[1, 2"), ("B", SHORT_LINE)],
            )
        };
        let err = convert("ZNY", &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GeometryError>(),
            Some(GeometryError::Decode { .. })
        ));
        assert!(!settings.output_dir.join("ZNY-videomaps.json").exists());
    }

    #[test]
    fn test_direct_lookup_missing_file_is_fatal() {
        let dir = testdir!();
        let settings = Settings {
            traversal: Traversal::Direct,
            ..fixture(&dir, &[("A", "ALPHA"), ("B", "BRAVO")], &[("A", LINE)])
        };
        let err = convert("ZNY", &settings).unwrap_err();
        match err.downcast_ref::<GeometryError>() {
            Some(GeometryError::Missing { path }) => assert!(path.ends_with("ZNY/B.geojson")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_direct_lookup_binary_output() {
        let dir = testdir!();
        let settings = Settings {
            traversal: Traversal::Direct,
            format: OutputFormat::Binary,
            ..fixture(
                &dir,
                &[("A", "ALPHA"), ("B", "BRAVO")],
                &[("A", LINE), ("B", SHORT_LINE)],
            )
        };
        let report = convert("ZNY", &settings).unwrap();
        let written: Vec<PathBuf> = report
            .written
            .iter()
            .map(|path| PathBuf::from(path.file_name().unwrap()))
            .collect();
        assert_eq!(
            vec![
                PathBuf::from("ZNY-videomaps.bin"),
                PathBuf::from("ZNY-manifest.bin")
            ],
            written
        );
        assert!(!settings.output_dir.join("ZNY-videomaps.json").exists());
    }

    #[test]
    fn test_malformed_definition_writes_nothing() {
        let dir = testdir!();
        let settings = fixture(&dir, &[("A", "ALPHA")], &[("A", LINE)]);
        fs::write(settings.artccs_dir.join("ZNY.json"), "{\"videoMaps\": [").unwrap();
        let err = convert("ZNY", &settings).unwrap_err();
        assert!(format!("{:?}", err).contains("invalid ARTCC definition"));
        assert_eq!(0, fs::read_dir(&settings.output_dir).unwrap().count());
    }
}
