//! Convert CRC video maps (an ARTCC definition plus one GeoJSON file per map) into the
//! video map files read by vice.
pub mod catalog;
pub mod config;
pub mod coords;
pub mod geofile;
pub mod output;
pub mod pipeline;
