//! Draws track, obstacles and player onto a 2D canvas context

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::Playfield;
use crate::consts::{NARROW_GAP_RATIO, SPIN_BAR_RATIO};
use crate::sim::collision::centered_gap;
use crate::sim::{GameState, Obstacle, ObstacleKind};

const BACKGROUND: &str = "#0b0d17";
const TRACK: &str = "#161a2e";
const PLAYER: &str = "#4dd0e1";
const GAP_BAND: &str = "#ffb74d";
const NARROW_BAND: &str = "#ff8a65";
const MOVING_BAND: &str = "#ba68c8";
const CORE: &str = "#e57373";
const WALL: &str = "#f44336";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    /// Canvas pixels per playfield unit
    scale: f64,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, playfield: Playfield) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut renderer = Self {
            ctx,
            scale: 1.0,
            width: 0.0,
            height: 0.0,
        };
        renderer.resize(canvas.width(), canvas.height(), playfield);
        Ok(renderer)
    }

    /// Fit the playfield into a canvas of the given pixel size
    pub fn resize(&mut self, width: u32, height: u32, playfield: Playfield) {
        self.width = width as f64;
        self.height = height as f64;
        self.scale = (self.width / playfield.width as f64).min(self.height / playfield.height as f64);
    }

    /// Canvas pixels per playfield unit
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        ctx.save();
        ctx.scale(self.scale, self.scale)?;

        let track = &state.track;
        ctx.set_fill_style_str(TRACK);
        ctx.fill_rect(
            track.x_start as f64,
            0.0,
            track.width() as f64,
            track.height as f64,
        );

        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle, state.profile.max_gap_ratio)?;
        }

        let (min, _) = state.player.bounds();
        ctx.set_fill_style_str(PLAYER);
        ctx.fill_rect(
            min.x as f64,
            min.y as f64,
            state.player.size as f64,
            state.player.size as f64,
        );

        ctx.restore();
        Ok(())
    }

    fn draw_obstacle(&self, o: &Obstacle, max_gap_ratio: f32) -> Result<(), JsValue> {
        match o.kind {
            ObstacleKind::FixedGap { .. } => self.draw_gap_band(o, max_gap_ratio, GAP_BAND),
            ObstacleKind::MovingGap { .. } => self.draw_gap_band(o, max_gap_ratio, MOVING_BAND),
            ObstacleKind::NarrowGap => self.draw_gap_band(o, NARROW_GAP_RATIO, NARROW_BAND),
            ObstacleKind::SpinningCore { rotation } => {
                let ctx = &self.ctx;
                let c = o.center();
                let arm = o.width as f64 / 2.0;
                let bar = (o.width * SPIN_BAR_RATIO) as f64;
                ctx.save();
                ctx.translate(c.x as f64, c.y as f64)?;
                ctx.rotate(rotation as f64)?;
                ctx.set_fill_style_str(CORE);
                ctx.fill_rect(-arm, -bar / 2.0, arm * 2.0, bar);
                ctx.fill_rect(-bar / 2.0, -arm, bar, arm * 2.0);
                ctx.restore();
            }
            ObstacleKind::Wall => {
                self.ctx.set_fill_style_str(WALL);
                self.ctx.fill_rect(
                    o.pos.x as f64,
                    o.pos.y as f64,
                    o.width as f64,
                    o.height as f64,
                );
            }
        }
        Ok(())
    }

    /// Two solid segments either side of a centered gap
    fn draw_gap_band(&self, o: &Obstacle, ratio: f32, color: &str) {
        let (lo, hi) = centered_gap(o.center().x, o.width, ratio);
        let (x, y, h) = (o.pos.x as f64, o.pos.y as f64, o.height as f64);
        let right = (o.pos.x + o.width) as f64;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, lo as f64 - x, h);
        self.ctx.fill_rect(hi as f64, y, right - hi as f64, h);
    }
}
