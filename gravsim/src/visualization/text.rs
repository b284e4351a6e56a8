//! Headless renderer: one line per circle, in both world and screen
//! coordinates.

use std::io::{self, Write};

use super::viewport::Viewport;
use super::Renderer;
use crate::simulation::states::NVec2;

pub struct TextRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self { out, viewport }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn begin_frame(&mut self, tick: u64) -> io::Result<()> {
        writeln!(self.out, "tick {tick}")
    }

    fn draw_circle(&mut self, center: NVec2, radius: f64) -> io::Result<()> {
        let s = self.viewport.world_to_screen(center);
        let r = radius * self.viewport.scale();
        writeln!(
            self.out,
            "  circle world=({:10.3}, {:10.3}) r={:7.3}  screen=({:5}, {:5}) r={:5.1}",
            center.x, center.y, radius, s.x, s.y, r
        )
    }

    fn draw_trajectory(&mut self, points: &[NVec2]) -> io::Result<()> {
        write!(self.out, "  path")?;
        for p in points {
            let s = self.viewport.world_to_screen(*p);
            write!(self.out, " ({},{})", s.x, s.y)?;
        }
        writeln!(self.out)
    }
}
