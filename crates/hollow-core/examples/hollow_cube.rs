//! Example: Hollowing a Part for Resin Printing
//!
//! This example demonstrates how to hollow a solid mesh to cut resin
//! usage while keeping a minimum wall thickness, and how the quality
//! and closing settings change the result.
//!
//! Run with: `cargo run --example hollow_cube`

use hollow_core::{HollowConfig, hollow_mesh};
use hollow_mesh::Mesh;
use nalgebra::Point3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Mesh Hollowing Example");
    println!("======================\n");

    // Create a sample part for demonstration
    // In production, this would be loaded with hollow_mesh::load_mesh
    let mesh = create_demo_block();

    println!("Demo block created:");
    println!("  Points: {}", mesh.point_count());
    println!("  Faces: {}", mesh.face_count());
    let solid_volume = mesh.volume();
    println!("  Solid volume: {:.1} mm³", solid_volume);

    // Hollow with a 2mm wall at the default quality
    let config = HollowConfig::default()
        .with_min_thickness(2.0)
        .with_closing_distance(0.5);

    println!("\nHollowing with {}mm walls...", config.min_thickness);
    let output = hollow_mesh(&mesh, &config)?;

    println!("  Shell generated: {}", output.stats.shell_generated);
    println!("  Grid: {:?} voxels", output.stats.grid_dims);
    println!(
        "  Timing: sdf {}ms, closing {}ms, extraction {}ms",
        output.stats.sdf_time_ms, output.stats.closing_time_ms, output.stats.extraction_time_ms
    );
    println!(
        "  Output: {} points, {} faces",
        output.stats.output_points, output.stats.output_faces
    );

    let hollowed_volume = output.mesh.volume();
    let saved = 100.0 * (1.0 - hollowed_volume / solid_volume);
    println!("  Hollowed volume: {:.1} mm³", hollowed_volume);
    println!("  Resin saved: {:.1}%", saved);

    // Compare quality settings: higher quality means a finer sampling
    // grid, a more accurate cavity, and a longer runtime.
    println!("\n--- Quality Comparison ---\n");
    for quality in [0.0, 0.5, 1.0] {
        let config = HollowConfig::default()
            .with_min_thickness(2.0)
            .with_quality(quality);
        let output = hollow_mesh(&mesh, &config)?;
        println!(
            "  quality {:.1}: scale {:.1}, grid {:?}, shell {} faces, {}ms",
            quality,
            output.stats.voxel_scale,
            output.stats.grid_dims,
            output.stats.shell_faces,
            output.stats.sdf_time_ms + output.stats.closing_time_ms + output.stats.extraction_time_ms
        );
    }

    // A wall thicker than the part leaves no room for a cavity; the
    // part passes through solid rather than failing.
    println!("\n--- Wall Thicker Than the Part ---\n");
    let config = HollowConfig::default().with_min_thickness(30.0);
    let output = hollow_mesh(&mesh, &config)?;
    println!("  Shell generated: {}", output.stats.shell_generated);
    println!(
        "  Output matches input: {}",
        output.stats.output_faces == output.stats.input_faces
    );

    println!("\n✓ Done");
    Ok(())
}

/// Create a 20mm x 15mm x 10mm solid block.
fn create_demo_block() -> Mesh {
    let (hx, hy, hz) = (10.0, 7.5, 5.0);
    let points = [
        Point3::new(-hx, -hy, -hz),
        Point3::new(hx, -hy, -hz),
        Point3::new(hx, hy, -hz),
        Point3::new(-hx, hy, -hz),
        Point3::new(-hx, -hy, hz),
        Point3::new(hx, -hy, hz),
        Point3::new(hx, hy, hz),
        Point3::new(-hx, hy, hz),
    ];
    let triangles = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [0, 7, 3],
        [0, 4, 7],
        [1, 2, 6],
        [1, 6, 5],
    ];
    Mesh::from_parts(&points, &triangles, &[])
}
