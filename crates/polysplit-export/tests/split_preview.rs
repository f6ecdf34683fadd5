//! Integration test: split and resample a small road network, then
//! render the preview SVG.

#![allow(clippy::unwrap_used)]

use polysplit_export::{SEGMENT_COLORS, SvgMetadata, to_split_svg};
use polysplit_geometry::batch::{sample_all, split_all};
use polysplit_geometry::{Point, Polyline, ProcessConfig};

fn poly(coords: &[(f64, f64)]) -> Polyline {
    Polyline::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

#[test]
fn split_network_to_svg() {
    let polylines = vec![
        poly(&[(0.0, 0.0), (40.0, 0.0), (40.0, 30.0)]),
        poly(&[(10.0, -10.0), (10.0, 20.0)]),
        poly(&[(7.0, 7.0)]),
    ];
    let candidates = vec![
        vec![Point::new(10.0, 0.0), Point::new(40.0, 0.0)],
        vec![Point::new(10.0, 0.0)],
    ];
    let config = ProcessConfig {
        sample_spacing: 5.0,
        ..ProcessConfig::default()
    };

    let segments = split_all(&polylines, &candidates, &config).unwrap();
    assert_eq!(
        segments.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![3, 2, 0]
    );
    let samples = sample_all(&polylines, &config).unwrap();

    let config_json = serde_json::to_string(&config).unwrap();
    let metadata = SvgMetadata {
        title: Some("network"),
        description: Some("3 polylines"),
        config_json: Some(&config_json),
    };
    let svg = to_split_svg(&segments, &samples, &metadata);

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<title>network</title>"));
    assert_eq!(svg.matches("<path").count(), 5);
    assert_eq!(
        svg.matches("<circle").count(),
        samples.iter().map(Vec::len).sum::<usize>()
    );
    assert!(svg.contains(SEGMENT_COLORS[2]));
    assert!(svg.contains("sample_spacing"));
}
