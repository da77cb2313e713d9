use std::fmt;

use serde::{
    de::{self, IgnoredAny, SeqAccess, Visitor},
    ser::SerializeTuple,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A longitude/latitude pair in decimal degrees.
///
/// Encoded as a `[lon, lat]` pair, which is both the GeoJSON position layout and the raw
/// form written to the binary video map file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    lon: f32,
    lat: f32,
}

impl GeoPoint {
    pub fn new(lon: f32, lat: f32) -> Self {
        Self { lon, lat }
    }

    pub fn lon(&self) -> f32 {
        self.lon
    }

    pub fn lat(&self) -> f32 {
        self.lat
    }
}

impl From<GeoPoint> for geo::Coord {
    fn from(point: GeoPoint) -> Self {
        geo::Coord {
            x: point.lon as f64,
            y: point.lat as f64,
        }
    }
}

impl Serialize for GeoPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.lon)?;
        tuple.serialize_element(&self.lat)?;
        tuple.end()
    }
}

struct GeoPointVisitor;

impl<'de> Visitor<'de> for GeoPointVisitor {
    type Value = GeoPoint;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a position of at least two numbers")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<GeoPoint, A::Error> {
        let lon: f32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let lat: f32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        // Altitude and any further members are dropped.
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(GeoPoint::new(lon, lat))
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_tuple(2, GeoPointVisitor)
    }
}
