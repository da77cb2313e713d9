//! Degrees/minutes/seconds text form used by the simulator's video map files, e.g.
//! `N040.37.30.000,W073.45.00.000`.

use thiserror::Error;

use super::GeoPoint;

#[derive(Debug, Error, PartialEq)]
pub enum CoordParseError {
    #[error("expected 'latitude,longitude' in '{0}'")]
    MissingSeparator(String),
    #[error("unknown hemisphere '{found}' in '{value}', expected {expected}")]
    Hemisphere {
        value: String,
        found: String,
        expected: &'static str,
    },
    #[error("malformed angle '{0}', expected ddd.mm.ss.fff")]
    Angle(String),
}

/// Format a point as `<N|S>ddd.mm.ss.fff,<E|W>ddd.mm.ss.fff`.
///
/// Every stage truncates; a value is never rounded up into the next second, minute or
/// degree. Zero is written with the southern/western hemisphere letter.
pub fn format_sexagesimal(point: &GeoPoint) -> String {
    let lat_hemisphere = if point.lat() > 0.0 { 'N' } else { 'S' };
    let lon_hemisphere = if point.lon() > 0.0 { 'E' } else { 'W' };
    format!(
        "{}{},{}{}",
        lat_hemisphere,
        format_angle(point.lat().abs() as f64),
        lon_hemisphere,
        format_angle(point.lon().abs() as f64)
    )
}

fn format_angle(mut value: f64) -> String {
    let degrees = value.trunc();
    value = (value - degrees) * 60.0;
    let minutes = value.trunc();
    value = (value - minutes) * 60.0;
    let seconds = value.trunc();
    value = (value - seconds) * 1000.0;
    let millis = value.trunc();
    format!(
        "{:03}.{:02}.{:02}.{:03}",
        degrees as u32, minutes as u32, seconds as u32, millis as u32
    )
}

/// Parse the text produced by [`format_sexagesimal`] back into decimal degrees.
pub fn parse_sexagesimal(text: &str) -> Result<GeoPoint, CoordParseError> {
    let (lat, lon) = text
        .trim()
        .split_once(',')
        .ok_or_else(|| CoordParseError::MissingSeparator(text.to_string()))?;
    let lat = parse_signed_angle(lat, ('N', 'S'), "N or S")?;
    let lon = parse_signed_angle(lon, ('E', 'W'), "E or W")?;
    Ok(GeoPoint::new(lon as f32, lat as f32))
}

fn parse_signed_angle(
    text: &str,
    (positive, negative): (char, char),
    expected: &'static str,
) -> Result<f64, CoordParseError> {
    let mut chars = text.chars();
    let hemisphere = chars.next();
    let sign = match hemisphere {
        Some(c) if c == positive => 1.0,
        Some(c) if c == negative => -1.0,
        _ => {
            return Err(CoordParseError::Hemisphere {
                value: text.to_string(),
                found: hemisphere.map(String::from).unwrap_or_default(),
                expected,
            })
        }
    };
    Ok(sign * parse_angle(chars.as_str())?)
}

fn parse_angle(text: &str) -> Result<f64, CoordParseError> {
    let parts: Vec<&str> = text.split('.').collect();
    let &[degrees, minutes, seconds, millis] = parts.as_slice() else {
        return Err(CoordParseError::Angle(text.to_string()));
    };
    let field = |s: &str| {
        s.parse::<u32>()
            .map(f64::from)
            .map_err(|_| CoordParseError::Angle(text.to_string()))
    };
    Ok(field(degrees)?
        + field(minutes)? / 60.0
        + field(seconds)? / 3600.0
        + field(millis)? / 3_600_000.0)
}
