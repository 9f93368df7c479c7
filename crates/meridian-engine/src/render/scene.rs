use std::ops::Range;

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::shapes::circle::CircleRenderer;
use super::shapes::logical_clip_to_scissor;
use super::shapes::segment::SegmentRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Layer {
    Circle,
    Segment,
    Text,
}

/// Consecutive instances of one layer that share a clip rect.
#[derive(Debug, Clone, PartialEq)]
struct Run {
    layer: Layer,
    clip: Option<Rect>,
    instances: Range<u32>,
}

/// Appends `instances` to the last run when it continues it, else starts a new run.
fn extend_runs(runs: &mut Vec<Run>, layer: Layer, clip: Option<Rect>, instances: Range<u32>) {
    if instances.is_empty() {
        return;
    }
    if let Some(last) = runs.last_mut() {
        if last.layer == layer && last.clip == clip && last.instances.end == instances.start {
            last.instances.end = instances.end;
            return;
        }
    }
    runs.push(Run { layer, clip, instances });
}

/// Draws a whole [`DrawList`] in paint order within a single render pass.
///
/// Items are split into runs of the same shape type and clip rect; each run
/// is one instanced draw call. Z order holds across shape types because runs
/// are replayed in paint order.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    segments: SegmentRenderer,
    text: TextRenderer,
    runs: Vec<Run>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.circles.begin();
        self.segments.begin();
        self.text.begin();
        self.runs.clear();

        for item in draw_list.iter_in_paint_order() {
            let (layer, instances) = match &item.cmd {
                DrawCmd::Circle(cmd) => {
                    let start = self.circles.len();
                    self.circles.push(cmd);
                    (Layer::Circle, start..self.circles.len())
                }
                DrawCmd::Segment(cmd) => {
                    let start = self.segments.len();
                    self.segments.push(cmd);
                    (Layer::Segment, start..self.segments.len())
                }
                DrawCmd::Text(cmd) => {
                    let start = self.text.len();
                    self.text.push(ctx, fonts, cmd);
                    (Layer::Text, start..self.text.len())
                }
            };
            extend_runs(&mut self.runs, layer, item.clip_rect, instances);
        }

        if self.runs.is_empty() {
            return;
        }

        self.circles.upload(ctx);
        self.segments.upload(ctx);
        self.text.upload(ctx);

        let mut rpass = target.begin_overlay_pass("meridian scene pass");
        for run in &self.runs {
            let Some((x, y, w, h)) = logical_clip_to_scissor(run.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_scissor_rect(x, y, w, h);
            match run.layer {
                Layer::Circle => self.circles.draw(&mut rpass, run.instances.clone()),
                Layer::Segment => self.segments.draw(&mut rpass, run.instances.clone()),
                Layer::Text => self.text.draw(&mut rpass, run.instances.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_same_layer_items_merge() {
        let mut runs = Vec::new();
        extend_runs(&mut runs, Layer::Circle, None, 0..1);
        extend_runs(&mut runs, Layer::Circle, None, 1..2);
        extend_runs(&mut runs, Layer::Segment, None, 0..3);
        extend_runs(&mut runs, Layer::Circle, None, 2..3);

        let layers: Vec<_> = runs.iter().map(|r| (r.layer, r.instances.clone())).collect();
        assert_eq!(
            layers,
            vec![(Layer::Circle, 0..2), (Layer::Segment, 0..3), (Layer::Circle, 2..3)]
        );
    }

    #[test]
    fn clip_change_splits_run_and_empty_ranges_are_ignored() {
        let a = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Some(Rect::new(10.0, 0.0, 10.0, 10.0));
        let mut runs = Vec::new();
        extend_runs(&mut runs, Layer::Segment, a, 0..4);
        extend_runs(&mut runs, Layer::Segment, a, 4..4);
        extend_runs(&mut runs, Layer::Segment, b, 4..8);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].clip, b);
    }
}
