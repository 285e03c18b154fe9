//! # Canvas 2D Renderer
//!
//! Pseudo-3D road on a flat canvas. Depth is faked with a single pinhole
//! projection: a point `z` units ahead of the player is scaled by
//! `camera_back / (z + camera_back)` and pulled toward the horizon line.
//!
//! ```text
//!   ──────────────── horizon ────────────────
//!                   /  :  \          far (small)
//!                  /   :   \
//!                 /    :    \
//!                /  ▓  :     \
//!               /      :  ●   \      near (large)
//!              /       █       \     player
//! ```
//!
//! Output is a flat list of [`DrawCommand2d`], painted in order (far to
//! near, then HUD, then overlays).

use lemmi_core::{ObjectKind, ObstacleKind, Phase, Pose};
use lemmi_shared::{Vec2, Vec3, LANE_COUNT};

use crate::stats::RenderStats;
use crate::view::{FrameView, ObjectView};
use crate::Renderer;

/// Linear RGBA.
pub type Rgba = [f32; 4];

const SKY: Rgba = [0.05, 0.07, 0.2, 1.0];
const GROUND: Rgba = [0.04, 0.16, 0.12, 1.0];
const ROAD: Rgba = [0.18, 0.18, 0.22, 1.0];
const ROAD_ALT: Rgba = [0.2, 0.2, 0.25, 1.0];
const LANE_LINE: Rgba = [0.9, 0.9, 0.95, 1.0];
const COIN: Rgba = [1.0, 0.82, 0.2, 1.0];
const BARRIER: Rgba = [0.9, 0.25, 0.25, 1.0];
const OVERHEAD: Rgba = [1.0, 0.55, 0.1, 1.0];
const WALL: Rgba = [0.55, 0.3, 0.85, 1.0];
const HUD: Rgba = [1.0, 1.0, 1.0, 1.0];
const SHADE: Rgba = [0.0, 0.0, 0.0, 0.6];

/// Closest depth (from the camera) still drawn.
const NEAR_PLANE: f32 = 0.5;

/// Spacing of the dashes on the lane dividers.
const DASH_SPACING: f32 = 4.0;

/// Length of one dash.
const DASH_LENGTH: f32 = 1.5;

/// One paint operation. Coordinates are pixels, origin top-left.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand2d {
    /// Fill the whole canvas.
    Clear {
        /// Fill colour.
        color: Rgba,
    },
    /// Axis-aligned filled rectangle.
    Rect {
        /// Top-left corner.
        position: Vec2,
        /// Width and height.
        size: Vec2,
        /// Fill colour.
        color: Rgba,
    },
    /// Filled circle.
    Circle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Fill colour.
        color: Rgba,
    },
    /// Text, left-aligned at the baseline.
    Text {
        /// Baseline start.
        position: Vec2,
        /// Font size in pixels.
        size: f32,
        /// Content.
        text: String,
        /// Colour.
        color: Rgba,
    },
}

/// Canvas geometry and projection.
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Horizon height as a fraction of the canvas height.
    pub horizon: f32,
    /// World units spanning the canvas width at the player's depth.
    pub world_width: f32,
    /// Camera distance behind the player.
    pub camera_back: f32,
    /// Objects further ahead than this are culled.
    pub draw_distance: f32,
    /// Bands the road is drawn in.
    pub road_slices: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            horizon: 0.35,
            world_width: 10.0,
            camera_back: 4.0,
            draw_distance: 70.0,
            road_slices: 24,
        }
    }
}

/// Renders a frame as 2D canvas commands.
pub struct Canvas2dRenderer {
    config: CanvasConfig,
    commands: Vec<DrawCommand2d>,
}

impl Canvas2dRenderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            commands: Vec::with_capacity(256),
        }
    }

    /// Commands of the last rendered frame.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand2d] {
        &self.commands
    }

    /// Geometry in use.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    fn pixels_per_unit(&self) -> f32 {
        self.config.width / self.config.world_width
    }

    fn horizon_y(&self) -> f32 {
        self.config.height * self.config.horizon
    }

    /// Perspective scale at depth `z`, or `None` behind the near plane.
    fn depth_scale(&self, z: f32) -> Option<f32> {
        let depth = z + self.config.camera_back;
        (depth > NEAR_PLANE).then(|| self.config.camera_back / depth)
    }

    /// Screen position of a world point already known to be in front.
    fn project(&self, point: Vec3, scale: f32) -> Vec2 {
        let ppu = self.pixels_per_unit();
        let ground = self.horizon_y() + (self.config.height - self.horizon_y()) * scale;
        Vec2::new(
            self.config.width / 2.0 + point.x * ppu * scale,
            ground - point.y * ppu * scale,
        )
    }

    fn push(&mut self, command: DrawCommand2d) {
        self.commands.push(command);
    }

    fn rect(&mut self, position: Vec2, size: Vec2, color: Rgba) {
        self.push(DrawCommand2d::Rect {
            position,
            size,
            color,
        });
    }

    fn text(&mut self, position: Vec2, size: f32, text: String, color: Rgba) {
        self.push(DrawCommand2d::Text {
            position,
            size,
            text,
            color,
        });
    }

    fn draw_backdrop(&mut self) {
        let horizon = self.horizon_y();
        self.push(DrawCommand2d::Clear { color: SKY });
        self.rect(
            Vec2::new(0.0, horizon),
            Vec2::new(self.config.width, self.config.height - horizon),
            GROUND,
        );
    }

    fn draw_road(&mut self, view: &FrameView) {
        let half_road = view.lane_spacing * LANE_COUNT as f32 / 2.0;
        let ppu = self.pixels_per_unit();
        let slices = self.config.road_slices.max(1);
        let slice_len = self.config.draw_distance / slices as f32;

        for i in (0..slices).rev() {
            let near_z = slice_len * i as f32;
            let far_z = near_z + slice_len;
            let (Some(near), Some(far)) = (self.depth_scale(near_z), self.depth_scale(far_z)) else {
                continue;
            };
            let top = self.project(Vec3::new(-half_road, 0.0, far_z), far);
            let bottom = self.project(Vec3::new(-half_road, 0.0, near_z), near);
            let width = half_road * 2.0 * ppu * near;
            let color = if i % 2 == 0 { ROAD } else { ROAD_ALT };
            self.rect(
                Vec2::new(bottom.x, top.y),
                Vec2::new(width, bottom.y - top.y),
                color,
            );
        }

        // Dashes scroll with distance travelled.
        let offset = view.distance % DASH_SPACING;
        let dashes = (self.config.draw_distance / DASH_SPACING) as u32;
        for divider in 1..LANE_COUNT {
            let x = -half_road + view.lane_spacing * divider as f32;
            for k in (0..=dashes).rev() {
                let z0 = k as f32 * DASH_SPACING - offset;
                let z1 = z0 + DASH_LENGTH;
                let (Some(near), Some(far)) = (self.depth_scale(z0), self.depth_scale(z1)) else {
                    continue;
                };
                let top = self.project(Vec3::new(x, 0.0, z1), far);
                let bottom = self.project(Vec3::new(x, 0.0, z0), near);
                let width = (0.12 * ppu * near).max(1.0);
                self.rect(
                    Vec2::new(bottom.x - width / 2.0, top.y),
                    Vec2::new(width, (bottom.y - top.y).max(1.0)),
                    LANE_LINE,
                );
            }
        }
    }

    fn draw_object(&mut self, object: &ObjectView, scale: f32) {
        let ppu = self.pixels_per_unit();
        match object.kind {
            ObjectKind::Coin => {
                let center = self.project(
                    Vec3::new(
                        object.position.x,
                        object.position.y + object.size.y / 2.0,
                        object.position.z,
                    ),
                    scale,
                );
                self.push(DrawCommand2d::Circle {
                    center,
                    radius: object.size.x / 2.0 * ppu * scale,
                    color: COIN,
                });
            }
            ObjectKind::Obstacle(kind) => {
                let top_left = self.project(
                    Vec3::new(
                        object.position.x - object.size.x / 2.0,
                        object.position.y + object.size.y,
                        object.position.z,
                    ),
                    scale,
                );
                let color = match kind {
                    ObstacleKind::Barrier => BARRIER,
                    ObstacleKind::Overhead => OVERHEAD,
                    ObstacleKind::Wall => WALL,
                };
                self.rect(
                    top_left,
                    Vec2::new(object.size.x * ppu * scale, object.size.y * ppu * scale),
                    color,
                );
            }
        }
    }

    fn draw_player(&mut self, view: &FrameView) {
        let Some(scale) = self.depth_scale(0.0) else {
            return;
        };
        let ppu = self.pixels_per_unit();
        let player = view.player;
        let [r, g, b] = view.character_color;
        let color = [r, g, b, 1.0];

        let top_left = self.project(
            Vec3::new(
                player.position.x - player.size.x / 2.0,
                player.position.y + player.size.y,
                0.0,
            ),
            scale,
        );
        let body = Vec2::new(player.size.x * ppu * scale, player.size.y * ppu * scale);
        self.rect(top_left, body, color);

        // Eyes stay on top of the body; sliding squashes them down.
        let eye_y = if player.pose == Pose::Sliding {
            top_left.y + body.y * 0.35
        } else {
            top_left.y + body.y * 0.2
        };
        let eye_r = body.x * 0.12;
        for side in [0.3, 0.7] {
            self.push(DrawCommand2d::Circle {
                center: Vec2::new(top_left.x + body.x * side, eye_y),
                radius: eye_r,
                color: HUD,
            });
        }
    }

    fn draw_hud(&mut self, view: &FrameView) {
        self.text(Vec2::new(16.0, 32.0), 24.0, format!("Score: {}", view.score), HUD);
        self.text(Vec2::new(16.0, 60.0), 18.0, format!("Speed: {:.1}", view.speed), HUD);
        self.text(Vec2::new(16.0, 84.0), 18.0, format!("Coins: {}", view.coins_collected), COIN);
    }

    fn draw_overlay(&mut self, view: &FrameView) {
        let (title, subtitle) = match view.phase {
            Phase::Running => return,
            Phase::Ready => ("READY".to_owned(), "Press Space to run".to_owned()),
            Phase::Paused => ("PAUSED".to_owned(), "Press P to resume".to_owned()),
            Phase::GameOver => ("GAME OVER".to_owned(), format!("Final score: {}", view.score)),
        };
        let center = Vec2::new(self.config.width / 2.0, self.config.height / 2.0);
        self.rect(
            Vec2::new(0.0, 0.0),
            Vec2::new(self.config.width, self.config.height),
            SHADE,
        );
        self.text(Vec2::new(center.x - 120.0, center.y), 48.0, title, HUD);
        self.text(Vec2::new(center.x - 100.0, center.y + 40.0), 20.0, subtitle, HUD);
    }
}

impl Default for Canvas2dRenderer {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Renderer for Canvas2dRenderer {
    fn name(&self) -> &'static str {
        "canvas2d"
    }

    fn render(&mut self, view: &FrameView) -> RenderStats {
        self.commands.clear();
        let mut stats = RenderStats::default();

        self.draw_backdrop();
        self.draw_road(view);

        let mut visible: Vec<(&ObjectView, f32)> = Vec::with_capacity(view.objects.len());
        for object in &view.objects {
            let near_face = object.position.z - object.size.z / 2.0;
            match self.depth_scale(object.position.z) {
                Some(scale) if near_face <= self.config.draw_distance => visible.push((object, scale)),
                _ => stats.culled += 1,
            }
        }
        visible.sort_by(|a, b| b.0.position.z.total_cmp(&a.0.position.z));

        // Objects behind the player are painted after it.
        let (ahead, behind): (Vec<_>, Vec<_>) =
            visible.into_iter().partition(|(o, _)| o.position.z >= 0.0);
        for (object, scale) in &ahead {
            self.draw_object(object, *scale);
        }
        self.draw_player(view);
        for (object, scale) in &behind {
            self.draw_object(object, *scale);
        }
        stats.objects_drawn = (ahead.len() + behind.len()) as u32;

        self.draw_hud(view);
        self.draw_overlay(view);

        stats.draw_calls = self.commands.len() as u32;
        tracing::trace!(?stats, "canvas frame");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PlayerView;
    use lemmi_core::Lane;

    fn view_with(objects: Vec<ObjectView>, phase: Phase) -> FrameView {
        FrameView {
            phase,
            score: 1234,
            speed: 12.0,
            distance: 10.0,
            elapsed: 1.0,
            coins_collected: 3,
            character: lemmi_core::Character::Lemmi,
            character_color: [0.2, 0.45, 1.0],
            player: PlayerView {
                position: Vec3::ZERO,
                size: Vec3::new(0.8, 1.8, 0.8),
                pose: Pose::Running,
                lane: Lane::Center,
            },
            objects,
            lane_spacing: 2.5,
        }
    }

    fn coin(id: u64, z: f32) -> ObjectView {
        ObjectView {
            id,
            kind: ObjectKind::Coin,
            position: Vec3::new(0.0, 0.7, z),
            size: Vec3::new(0.6, 0.6, 0.6),
        }
    }

    fn circles(commands: &[DrawCommand2d]) -> Vec<f32> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand2d::Circle { radius, color, .. } if *color == COIN => Some(*radius),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_starts_with_clear() {
        let mut renderer = Canvas2dRenderer::default();
        renderer.render(&view_with(Vec::new(), Phase::Running));
        assert!(matches!(renderer.commands()[0], DrawCommand2d::Clear { .. }));
    }

    #[test]
    fn test_far_objects_culled() {
        let mut renderer = Canvas2dRenderer::default();
        let stats = renderer.render(&view_with(vec![coin(1, 10.0), coin(2, 200.0)], Phase::Running));
        assert_eq!(stats.objects_drawn, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(stats.draw_calls as usize, renderer.commands().len());
    }

    #[test]
    fn test_far_to_near_and_smaller_far_away() {
        let mut renderer = Canvas2dRenderer::default();
        renderer.render(&view_with(vec![coin(1, 5.0), coin(2, 40.0)], Phase::Running));
        let radii = circles(renderer.commands());
        assert_eq!(radii.len(), 2);
        assert!(radii[0] < radii[1], "far coin first and smaller");
    }

    #[test]
    fn test_hud_shows_score() {
        let mut renderer = Canvas2dRenderer::default();
        renderer.render(&view_with(Vec::new(), Phase::Running));
        assert!(renderer.commands().iter().any(|c| matches!(
            c,
            DrawCommand2d::Text { text, .. } if text == "Score: 1234"
        )));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut renderer = Canvas2dRenderer::default();
        renderer.render(&view_with(Vec::new(), Phase::GameOver));
        let texts: Vec<&str> = renderer
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand2d::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"Final score: 1234"));
    }
}
