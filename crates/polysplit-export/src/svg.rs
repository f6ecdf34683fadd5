//! SVG export serializer.
//!
//! Converts polylines into an SVG string with `<path>` elements using
//! the [`svg`] crate for document construction, XML escaping, and path
//! data formatting.
//!
//! Each polyline becomes a separate `<path>` element using `M` (move to)
//! and `L` (line to) commands. The `viewBox` is fitted to the bounding
//! box of everything drawn, with a small margin, so the output works for
//! any coordinate range.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Description, Element, Group, Path, Title};
use svg::node::{Node, Text, Value};

use polysplit_geometry::{BoundingBox, Point, Polyline, points_bounding_box, polyline_bounding_box};

/// Stroke colours cycled through the segments of each split polyline.
pub const SEGMENT_COLORS: &[&str] = &[
    "#ff3333", // red
    "#ff8800", // orange
    "#ffdd00", // yellow
    "#33cc33", // green
    "#3399ff", // blue
];

/// Margin around the geometry, as a fraction of its larger extent.
const MARGIN_FRACTION: f64 = 0.05;

/// Sample marker radius, as a fraction of the larger extent.
const SAMPLE_RADIUS_FRACTION: f64 = 0.004;

/// Metadata to embed in the SVG document.
///
/// All fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    ///
    /// Typically the input filename.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized processing configuration, emitted inside a
    /// `<metadata>` element wrapped in a namespaced `<polysplit:config>`
    /// element so exported files carry the settings that produced them.
    pub config_json: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from a polyline.
///
/// Uses `M` for the first point and `L` for subsequent points.
/// Returns an empty string for polylines with fewer than 2 points.
///
/// Coordinates are formatted by the [`svg`] crate using `f32` precision.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{Point, Polyline};
/// use polysplit_export::build_path_data;
///
/// let polyline = Polyline::new(vec![
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 40.0),
/// ]);
/// let d = build_path_data(&polyline);
/// assert_eq!(d, "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(polyline: &Polyline) -> String {
    let points = polyline.points();
    if points.len() < 2 {
        return String::new();
    }

    let first = &points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in &points[1..] {
        data = data.line_to((p.x, p.y));
    }
    String::from(Value::from(data))
}

/// Larger side of `bbox`, or 1 when the geometry has no extent.
fn extent(bbox: &BoundingBox) -> f64 {
    let size = bbox.width().max(bbox.height());
    if size > 0.0 { size } else { 1.0 }
}

/// Open a document whose `viewBox` frames `bbox` with a margin.
fn framed_document(bbox: Option<&BoundingBox>, metadata: &SvgMetadata<'_>) -> Document {
    let mut doc = match bbox {
        Some(b) => {
            let margin = extent(b) * MARGIN_FRACTION;
            Document::new().set(
                "viewBox",
                (
                    b.min.x - margin,
                    b.min.y - margin,
                    2.0f64.mul_add(margin, b.width()),
                    2.0f64.mul_add(margin, b.height()),
                ),
            )
        }
        None => Document::new().set("viewBox", (0, 0, 1, 1)),
    };

    // Optional <title> element
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    // Optional <desc> element
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    // Optional <metadata> element with structured configuration
    if let Some(config_json) = metadata.config_json {
        let mut config_el = Element::new("polysplit:config");
        config_el.assign("xmlns:polysplit", "urn:polysplit:config");
        config_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(config_el);
        doc = doc.add(metadata_el);
    }

    doc
}

fn stroked_path(d: String, color: &str) -> Path {
    Path::new()
        .set("d", d)
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", 1)
        .set("vector-effect", "non-scaling-stroke")
}

/// The svg crate omits the XML declaration, so we prepend it.
fn finish(doc: &Document) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

/// Serialize polylines into an SVG document string.
///
/// Each [`Polyline`] with 2 or more points becomes a black `<path>`
/// element. Polylines with fewer than 2 points are skipped (a single
/// point cannot form a visible line segment).
///
/// If [`SvgMetadata::title`] or [`SvgMetadata::description`] is
/// provided, the corresponding `<title>` / `<desc>` element is emitted
/// after the opening `<svg>` tag.
///
/// # Examples
///
/// ```
/// use polysplit_geometry::{Point, Polyline};
/// use polysplit_export::{SvgMetadata, to_svg};
///
/// let polylines = vec![
///     Polyline::new(vec![Point::new(10.0, 15.0), Point::new(12.5, 18.3)]),
/// ];
/// let metadata = SvgMetadata {
///     title: Some("roads"),
///     description: Some("Exported by polysplit"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&polylines, &metadata);
/// assert!(svg.contains("<title>roads</title>"));
/// assert!(svg.contains("<desc>Exported by polysplit</desc>"));
/// assert!(svg.contains("M10,15 L12.5,18.3"));
/// ```
#[must_use]
pub fn to_svg(polylines: &[Polyline], metadata: &SvgMetadata<'_>) -> String {
    let bbox = polyline_bounding_box(polylines);
    let mut doc = framed_document(bbox.as_ref(), metadata);

    for polyline in polylines {
        let d = build_path_data(polyline);
        if d.is_empty() {
            continue;
        }
        doc = doc.add(stroked_path(d, "black"));
    }

    finish(&doc)
}

/// Serialize split results into a colour-coded preview.
///
/// `segments_per_line[i]` holds the segments of input polyline `i`;
/// consecutive segments of one polyline cycle through
/// [`SEGMENT_COLORS`] so the cut locations are visible. Each path
/// carries `data-line` and `data-segment` attributes with its indices.
/// Every point of `samples` is drawn as a small `<circle>` under
/// `<g id="samples">`.
#[must_use]
pub fn to_split_svg(
    segments_per_line: &[Vec<Polyline>],
    samples: &[Vec<Point>],
    metadata: &SvgMetadata<'_>,
) -> String {
    let bbox = points_bounding_box(
        segments_per_line
            .iter()
            .flatten()
            .flat_map(Polyline::points)
            .chain(samples.iter().flatten()),
    );
    let mut doc = framed_document(bbox.as_ref(), metadata);

    let mut segments_group = Group::new().set("id", "segments");
    for (line_idx, segments) in segments_per_line.iter().enumerate() {
        for (seg_idx, segment) in segments.iter().enumerate() {
            let d = build_path_data(segment);
            if d.is_empty() {
                continue;
            }
            let color = SEGMENT_COLORS[seg_idx % SEGMENT_COLORS.len()];
            segments_group = segments_group.add(
                stroked_path(d, color)
                    .set("data-line", line_idx)
                    .set("data-segment", seg_idx),
            );
        }
    }
    doc = doc.add(segments_group);

    if samples.iter().any(|s| !s.is_empty()) {
        let radius = bbox.as_ref().map_or(1.0, extent) * SAMPLE_RADIUS_FRACTION;
        let mut samples_group = Group::new().set("id", "samples").set("fill", "#222222");
        for p in samples.iter().flatten() {
            samples_group = samples_group.add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", p.y)
                    .set("r", radius),
            );
        }
        doc = doc.add(samples_group);
    }

    finish(&doc)
}
