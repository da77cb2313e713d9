pub mod geo_point;
pub mod sexagesimal;

pub use geo_point::GeoPoint;
pub use sexagesimal::{format_sexagesimal, parse_sexagesimal, CoordParseError};
