use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;

use super::common::InstancedQuadPipeline;

/// Renderer for `DrawCmd::Circle`.
///
/// Fill and border are resolved in the fragment shader from the distance to
/// the center; the border is an AA ring on the outer edge.
pub struct CircleRenderer {
    pipeline: InstancedQuadPipeline,
    instances: Vec<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipeline: InstancedQuadPipeline::new(
                "circle",
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout,
            ),
            instances: Vec::new(),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self) {
        self.instances.clear();
    }

    pub(crate) fn len(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Records one instance; degenerate or invisible circles are skipped.
    pub(crate) fn push(&mut self, cmd: &CircleCmd) {
        if !cmd.is_drawable() {
            return;
        }
        let (border_width, border_color) = cmd
            .visible_border()
            .map_or((0.0, [0.0; 4]), |b| (b.width, b.color.to_array()));

        self.instances.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            fill: cmd.fill.to_array(),
            border_color,
        });
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.pipeline.upload(ctx, &self.instances);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pipeline.draw(rpass, range);
    }
}

/// Instance data layout (48 bytes):
///
///  offset  0  center        [f32; 2]  loc 1
///  offset  8  radius_bw     [f32; 2]  loc 2
///  offset 16  fill          [f32; 4]  loc 3
///  offset 32  border_color  [f32; 4]  loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius, border width
        3 => Float32x4, // fill
        4 => Float32x4  // border color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Border;

    fn cmd(radius: f32, fill: Color, border: Option<Border>) -> CircleCmd {
        CircleCmd { center: Vec2::new(5.0, 5.0), radius, fill, border }
    }

    #[test]
    fn skips_degenerate_and_invisible_circles() {
        let mut r = CircleRenderer::new();
        r.push(&cmd(0.0, Color::from_hex(0xffffff), None));
        r.push(&cmd(4.0, Color::transparent(), None));
        assert_eq!(r.len(), 0);

        r.push(&cmd(4.0, Color::transparent(), Some(Border::new(1.0, Color::from_hex(0x000000)))));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn border_is_capped_at_radius() {
        let mut r = CircleRenderer::new();
        r.push(&cmd(2.0, Color::from_hex(0xffffff), Some(Border::new(9.0, Color::from_hex(0x000000)))));
        assert_eq!(r.instances[0].radius_bw, [2.0, 2.0]);

        r.begin();
        assert_eq!(r.len(), 0);
    }
}
