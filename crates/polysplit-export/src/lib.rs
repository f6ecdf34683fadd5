//! polysplit-export: Pure format serializers (sans-IO)
//!
//! Converts polylines, split results, and resampled points into SVG
//! previews.

pub mod svg;

pub use svg::{SEGMENT_COLORS, SvgMetadata, build_path_data, to_split_svg, to_svg};
