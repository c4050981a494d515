//! Contourkit debug runner: runs the main path operations on a few sample
//! shapes and prints the resulting path data.
//!
//! Usage:
//! ```text
//! cargo run --example debug
//! RUST_LOG=contourkit=trace cargo run --example debug
//! ```

use contourkit::math::Point2;
use contourkit::operations::cut::CutBlade;
use contourkit::operations::modification::{InsertPoint, SplitAt, SplitCommand};
use contourkit::operations::offset::PathMargin;
use contourkit::operations::query::NearestPoint;
use contourkit::operations::sampling::{BatchPathToPolygon, FlatteningSampler, SamplingParams};
use contourkit::{ContourError, Document, Path};

const SQUARE: &str = "M0,0 L10,0 L10,10 L0,10 Z";
const BLOB: &str = "M0 0 C5 -5 15 -5 20 0 S25 15 10 20 Q0 20 0 10 T0 0 Z";

fn main() -> Result<(), ContourError> {
    // Default: WARN for everything, INFO for contourkit.
    // Override with RUST_LOG env var (e.g. RUST_LOG=contourkit=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("contourkit=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Parsing and serialization
    let mut blob = Path::parse(BLOB)?;
    println!("parsed:    {blob}");
    println!("minified:  {}", blob.to_path_data(true));
    blob.set_relative(true);
    println!("relative:  {blob}");

    // Transforms
    let mut turned = Path::parse(SQUARE)?;
    turned.rotate(5.0, 5.0, 90.0);
    turned.scale(2.0, 0.5);
    println!("rotated:   {turned}");

    // Splitting and insertion
    let mut split = Path::parse(SQUARE)?;
    let halves = SplitCommand::new(1, SplitAt::Parameter(0.5)).execute(&mut split)?;
    println!(
        "split:     {split} (left ends at {:?})",
        halves.left.target()
    );
    let index = InsertPoint::new(Point2::new(10.0, 7.0)).execute(&mut split)?;
    println!("inserted:  {split} (vertex at command {index})");

    if let Some(hit) = NearestPoint::new(Point2::new(12.0, 3.0)).execute(&split)? {
        println!(
            "nearest:   command {} at ({:.2}, {:.2}), distance {:.3}",
            hit.index, hit.point.x, hit.point.y, hit.distance
        );
    }

    // Margins and blades
    let sampler = FlatteningSampler::default();
    println!("outward:   {}", PathMargin::new(2.0, true).execute(SQUARE, &sampler)?);
    println!("inward:    {}", PathMargin::new(1.5, false).execute(BLOB, &sampler)?);
    let blade = CutBlade::new(Point2::new(5.0, -1.0), Point2::new(5.0, 11.0))
        .curved(2.0)
        .execute()?;
    println!("blade:     {}", blade.to_path_data());

    // Documents and batches
    let document = Document::parse("M0 0 h4 v4 h-4 M10 0 h4 v4 h-4 z")?;
    for (id, contour) in document.iter() {
        println!("contour:   {id:?} {contour}");
    }
    let contours: Vec<String> = document.iter().map(|(_, c)| c.to_string()).collect();
    let params = SamplingParams {
        batch_size: 1,
        ..SamplingParams::default()
    };
    let polygons = BatchPathToPolygon::new(params).execute(&contours, &sampler, |progress| {
        println!("batch:     {}/{}", progress.completed, progress.total);
    })?;
    println!(
        "polygons:  {:?}",
        polygons.iter().map(Vec::len).collect::<Vec<_>>()
    );

    Ok(())
}
