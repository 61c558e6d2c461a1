//! Gmsh `.geo` script export.
//!
//! The script recreates the model entity by entity with the same tags, so
//! an external mesher can pick up the finished model directly. Fillings are
//! written as `Surface`, which Gmsh interprets as a surface filling.

use std::fmt::Display;
use std::io::Write;

use crate::error::Result;
use crate::model::GeoModel;

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes `model` as a Gmsh geometry script named `name`.
///
/// # Errors
///
/// Returns [`ToroshellError::Io`](crate::ToroshellError::Io) if the writer
/// fails.
pub fn write_geo<W: Write>(model: &GeoModel, name: &str, mut out: W) -> Result<()> {
    writeln!(out, "// {name}")?;
    writeln!(out, "SetFactory(\"Built-in\");")?;
    writeln!(out)?;

    for (tag, point) in model.points() {
        let p = point.position;
        writeln!(
            out,
            "Point({tag}) = {{{}, {}, {}, {}}};",
            p.x, p.y, p.z, point.mesh_size
        )?;
    }
    for (tag, arc) in model.arcs() {
        writeln!(
            out,
            "Circle({tag}) = {{{}, {}, {}}};",
            arc.start, arc.center, arc.end
        )?;
    }
    for (tag, curve_loop) in model.curve_loops() {
        writeln!(out, "Curve Loop({tag}) = {{{}}};", join(&curve_loop.arcs))?;
    }
    for (tag, surface) in model.surfaces() {
        writeln!(out, "Surface({tag}) = {{{}}};", surface.curve_loop)?;
    }
    for (tag, surface_loop) in model.surface_loops() {
        writeln!(
            out,
            "Surface Loop({tag}) = {{{}}};",
            join(&surface_loop.surfaces)
        )?;
    }
    for (tag, volume) in model.volumes() {
        writeln!(out, "Volume({tag}) = {{{}}};", join(&volume.surface_loops))?;
    }
    out.flush()?;
    Ok(())
}
