use std::{fs, io, path::Path};

use serde::{de::IgnoredAny, Deserialize};

use super::{
    error::{GeometryError, JsonDiagnostic},
    null_as_default,
};
use crate::coords::GeoPoint;

/// Top level of a GeoJSON document. Only the members needed to pull out line strings are
/// decoded; everything else (properties, bbox, crs, ...) is ignored.
#[derive(Deserialize, Debug, Default)]
pub struct GeometryDocument {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<GeoJsonFeature>,
}

#[derive(Deserialize, Debug)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
}

#[derive(Deserialize, Debug)]
pub struct GeoJsonGeometry {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Coordinates,
}

/// The `coordinates` member holds a different shape for every geometry kind. Only a flat
/// list of positions is of interest; anything else (a single position, polygon rings,
/// multi-line nesting, null) decodes to `Unrecognized` instead of failing the document.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum Coordinates {
    Line(Vec<GeoPoint>),
    Unrecognized(IgnoredAny),
}

impl Default for Coordinates {
    fn default() -> Self {
        Coordinates::Unrecognized(IgnoredAny)
    }
}

impl Coordinates {
    pub fn as_line(&self) -> Option<&[GeoPoint]> {
        match self {
            Coordinates::Line(points) => Some(points),
            Coordinates::Unrecognized(_) => None,
        }
    }
}

/// Point sequences of the LineString features of one document, one entry per feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStrings(pub Vec<Vec<GeoPoint>>);

impl LineStrings {
    /// Flatten every line into its consecutive segments, as endpoint pairs.
    pub fn segments(&self) -> Vec<GeoPoint> {
        segments_of(&self.0)
    }

    pub fn into_inner(self) -> Vec<Vec<GeoPoint>> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Segment endpoint pairs for a list of lines: a line of n points gives n - 1 pairs.
pub fn segments_of(lines: &[Vec<GeoPoint>]) -> Vec<GeoPoint> {
    lines
        .iter()
        .flat_map(|line| line.windows(2).flatten().copied())
        .collect()
}

impl GeometryDocument {
    pub fn line_strings(&self) -> LineStrings {
        let lines: Vec<Vec<GeoPoint>> = self
            .features
            .iter()
            .filter(|feature| feature.kind == "Feature")
            .filter_map(|feature| feature.geometry.as_ref())
            .filter(|geometry| geometry.kind == "LineString")
            .filter_map(|geometry| geometry.coordinates.as_line())
            .map(|points| points.to_vec())
            .collect();
        if lines.len() != self.features.len() {
            log::trace!(
                "Out of {} features read, only {} were LineStrings.",
                self.features.len(),
                lines.len()
            )
        }
        LineStrings(lines)
    }
}

pub fn parse_geojson(contents: &[u8], path: &Path) -> Result<GeometryDocument, GeometryError> {
    serde_json::from_slice(contents).map_err(|err| GeometryError::Decode {
        path: path.to_path_buf(),
        diagnostic: JsonDiagnostic::from(&err),
    })
}

pub fn read_line_strings(path: &Path) -> Result<LineStrings, GeometryError> {
    let contents = fs::read(path).map_err(|source| GeometryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_geojson(&contents, path)?.line_strings())
}

/// Write named lines to a GeoJSON FeatureCollection, one LineString feature per line with
/// the owning map's name in the `name` property.
pub fn write_lines_to_geojson<'a>(
    named_lines: impl IntoIterator<Item = (&'a str, &'a [Vec<GeoPoint>])>,
    output_filepath: &Path,
) -> io::Result<()> {
    let feature_collection: geojson::FeatureCollection = named_lines
        .into_iter()
        .flat_map(|(name, lines)| lines.iter().map(move |line| (name, line)))
        .map(|(name, line)| {
            let line_string: geo::LineString =
                line.iter().map(|point| geo::Coord::from(*point)).collect();
            let mut properties = geojson::JsonObject::new();
            properties.insert("name".to_string(), name.into());
            geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::from(&line_string)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    let geojson_contents: geojson::GeoJson = geojson::GeoJson::from(feature_collection);
    fs::write(output_filepath, geojson_contents.to_string())
}
