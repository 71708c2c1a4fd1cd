use std::fmt::Write;

use voxscene_common::Material;

use crate::composer::FramePacket;
use crate::drawable::MeshKind;

/// Render backend contract. Backends draw a composed frame and never touch
/// scene state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw every drawable of `frame` in order.
    fn render(&mut self, frame: &FramePacket<'_>) -> Self::Output;
}

/// Text backend for the CLI, logs and tests.
///
/// Summarises a frame instead of rasterising it. Set `verbose` to also list
/// every drawable.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

fn material_label(material: Material) -> String {
    match material {
        Material::NormalDebug => "normal".to_string(),
        Material::Flat => "flat".to_string(),
        Material::UvDebug => "uv".to_string(),
        Material::Texture(unit) => format!("tex{unit}"),
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FramePacket<'_>) -> String {
        let u = &frame.uniforms;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame ({} drawables) ===", frame.drawables.len());
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2})",
            u.camera_position.x, u.camera_position.y, u.camera_position.z
        );
        let _ = writeln!(
            out,
            "Light: {} pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})",
            if u.light_on { "on" } else { "off" },
            u.light_position.x,
            u.light_position.y,
            u.light_position.z,
            u.light_color.x,
            u.light_color.y,
            u.light_color.z
        );
        let _ = writeln!(
            out,
            "Spot: {} pos=({:.2}, {:.2}, {:.2}) cos_cutoff={:.3} exponent={:.0}",
            if u.spot_on { "on" } else { "off" },
            u.spot_position.x,
            u.spot_position.y,
            u.spot_position.z,
            u.spot_cos_cutoff,
            u.spot_exponent
        );

        let cubes = frame
            .drawables
            .iter()
            .filter(|d| d.mesh == MeshKind::Cube)
            .count();
        let _ = writeln!(
            out,
            "Meshes: cubes={} spheres={}",
            cubes,
            frame.drawables.len() - cubes
        );

        if self.verbose {
            for (i, d) in frame.drawables.iter().enumerate() {
                let p = d.transform.w_axis;
                let _ = writeln!(
                    out,
                    "  [{i:4}] {:?} {} at=({:.2}, {:.2}, {:.2})",
                    d.mesh,
                    material_label(d.material),
                    p.x,
                    p.y,
                    p.z
                );
            }
        }

        out
    }
}
