use std::time::Instant;

use voxscene_common::Material;
use voxscene_kernel::SceneContext;
use voxscene_tools::{Diagnostics, FrameReport};

use crate::drawable::{Drawable, Primitive};
use crate::renderer::Renderer;
use crate::scene;
use crate::uniforms::UniformBundle;

/// One tick's render payload. Borrowed from the composer's scratch buffer and
/// valid until the next composition.
#[derive(Debug, Clone, Copy)]
pub struct FramePacket<'a> {
    pub uniforms: UniformBundle,
    pub drawables: &'a [Drawable],
}

/// Builds the per-tick drawable list and uniform bundle from a [`SceneContext`].
#[derive(Debug, Default)]
pub struct SceneComposer {
    scratch: Vec<Drawable>,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose one frame at `seconds` since startup.
    ///
    /// Advances the light animation and the rain pool, then emits light
    /// markers and fixed props, blocks, and raindrops in that order.
    pub fn compose(&mut self, ctx: &mut SceneContext, seconds: f64) -> FramePacket<'_> {
        let _span = tracing::info_span!("compose_frame").entered();

        ctx.lighting.advance(seconds);
        let uniforms = UniformBundle::from_scene(&ctx.camera, &ctx.lighting);

        self.scratch.clear();
        self.scratch.reserve(
            scene::FIXED_PRIMITIVES + ctx.world.block_count() + ctx.rain.len(),
        );
        self.scratch.extend(
            scene::fixed_primitives(&ctx.lighting)
                .iter()
                .map(Primitive::to_drawable),
        );
        self.scratch.extend(
            ctx.world
                .blocks()
                .map(|block| scene::block_primitive(block).to_drawable()),
        );

        ctx.rain.update();
        self.scratch.extend(
            ctx.rain
                .drops()
                .iter()
                .map(|drop| Primitive::Raindrop { position: drop.position }.to_drawable()),
        );

        if ctx.lighting.normal_debug {
            for drawable in &mut self.scratch {
                drawable.material = Material::NormalDebug;
            }
        }

        tracing::trace!(drawables = self.scratch.len(), "frame composed");
        FramePacket {
            uniforms,
            drawables: &self.scratch,
        }
    }

    /// Compose, submit to `renderer`, and report the elapsed time to
    /// `diagnostics`.
    pub fn tick<R, D>(
        &mut self,
        ctx: &mut SceneContext,
        seconds: f64,
        renderer: &mut R,
        diagnostics: &mut D,
    ) -> R::Output
    where
        R: Renderer + ?Sized,
        D: Diagnostics + ?Sized,
    {
        let start = Instant::now();
        let packet = self.compose(ctx, seconds);
        let output = renderer.render(&packet);
        diagnostics.report(&FrameReport::new(start.elapsed()));
        output
    }
}
