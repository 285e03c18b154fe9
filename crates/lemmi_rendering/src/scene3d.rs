//! # Scene 3D Renderer
//!
//! Builds a flat scene graph of unit primitives and packs it into
//! [`InstanceData`] for one instanced draw per primitive type.
//!
//! World axes match the simulation: X across the lanes, Y up, Z ahead of
//! the player. Every node is a unit primitive centered at its translation
//! and stretched by its scale.

use lemmi_core::{ObjectKind, ObstacleKind};
use lemmi_shared::{Vec3, LANE_COUNT};

use crate::instance::InstanceData;
use crate::stats::RenderStats;
use crate::view::{FrameView, ObjectView};
use crate::Renderer;

/// Unit primitives a backend knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Primitive {
    /// 1×1×1 cube.
    Cube = 0,
    /// Sphere of diameter 1.
    Sphere = 1,
    /// 1×1 quad in the XZ plane.
    Plane = 2,
}

/// Placement of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Center of the primitive.
    pub translation: Vec3,
    /// Rotation about the Y axis in radians.
    pub rotation_y: f32,
    /// Per-axis scale.
    pub scale: Vec3,
}

/// What a node represents, for picking and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// Road surface.
    Track,
    /// Lane divider strip.
    LaneMarker,
    /// The runner.
    Player,
    /// A track object.
    Object(u64),
}

/// One drawable element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneNode {
    /// Shape.
    pub primitive: Primitive,
    /// Placement.
    pub transform: Transform,
    /// Linear RGBA colour.
    pub color: [f32; 4],
    /// What the node stands for.
    pub role: NodeRole,
}

impl SceneNode {
    /// Packs the node for GPU upload.
    #[must_use]
    pub fn to_instance(&self) -> InstanceData {
        let t = self.transform;
        InstanceData {
            position_rotation: [t.translation.x, t.translation.y, t.translation.z, t.rotation_y],
            scale_primitive: [t.scale.x, t.scale.y, t.scale.z, self.primitive as u32 as f32],
            color: self.color,
        }
    }
}

/// Scene tuning.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Objects further ahead than this are culled.
    pub draw_distance: f32,
    /// Objects further behind than this are culled.
    pub rear_distance: f32,
    /// Coin spin in radians per second.
    pub coin_spin_speed: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            draw_distance: 90.0,
            rear_distance: 6.0,
            coin_spin_speed: 3.0,
        }
    }
}

/// Renders a frame as a scene graph plus packed instances.
pub struct Scene3dRenderer {
    config: SceneConfig,
    nodes: Vec<SceneNode>,
    instances: Vec<InstanceData>,
}

impl Scene3dRenderer {
    /// Creates a renderer.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            nodes: Vec::with_capacity(128),
            instances: Vec::with_capacity(128),
        }
    }

    /// Nodes of the last rendered frame.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Packed instances of the last rendered frame, grouped by primitive.
    #[must_use]
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Instance bytes ready for a buffer upload.
    #[must_use]
    pub fn instance_bytes(&self) -> &[u8] {
        crate::instance::as_bytes(&self.instances)
    }

    fn is_visible(&self, object: &ObjectView) -> bool {
        let z = object.position.z;
        z - object.size.z / 2.0 <= self.config.draw_distance
            && z + object.size.z / 2.0 >= -self.config.rear_distance
    }

    fn push_track(&mut self, view: &FrameView) {
        let road_width = view.lane_spacing * LANE_COUNT as f32;
        let length = self.config.draw_distance + self.config.rear_distance;
        let center_z = (self.config.draw_distance - self.config.rear_distance) / 2.0;

        self.nodes.push(SceneNode {
            primitive: Primitive::Plane,
            transform: Transform {
                translation: Vec3::new(0.0, 0.0, center_z),
                rotation_y: 0.0,
                scale: Vec3::new(road_width, 1.0, length),
            },
            color: [0.18, 0.18, 0.22, 1.0],
            role: NodeRole::Track,
        });

        for divider in 1..LANE_COUNT {
            let x = -road_width / 2.0 + view.lane_spacing * divider as f32;
            self.nodes.push(SceneNode {
                primitive: Primitive::Cube,
                transform: Transform {
                    translation: Vec3::new(x, 0.01, center_z),
                    rotation_y: 0.0,
                    scale: Vec3::new(0.1, 0.02, length),
                },
                color: [0.9, 0.9, 0.95, 1.0],
                role: NodeRole::LaneMarker,
            });
        }
    }

    fn push_object(&mut self, object: &ObjectView, elapsed: f32) {
        let center = Vec3::new(
            object.position.x,
            object.position.y + object.size.y / 2.0,
            object.position.z,
        );
        let node = match object.kind {
            ObjectKind::Coin => SceneNode {
                primitive: Primitive::Sphere,
                transform: Transform {
                    translation: center,
                    // Phase offset per coin so a row does not spin in lockstep.
                    rotation_y: (elapsed * self.config.coin_spin_speed + object.id as f32 * 0.7)
                        % std::f32::consts::TAU,
                    scale: Vec3::new(object.size.x, object.size.y, object.size.z * 0.25),
                },
                color: [1.0, 0.82, 0.2, 1.0],
                role: NodeRole::Object(object.id),
            },
            ObjectKind::Obstacle(kind) => SceneNode {
                primitive: Primitive::Cube,
                transform: Transform {
                    translation: center,
                    rotation_y: 0.0,
                    scale: object.size,
                },
                color: match kind {
                    ObstacleKind::Barrier => [0.9, 0.25, 0.25, 1.0],
                    ObstacleKind::Overhead => [1.0, 0.55, 0.1, 1.0],
                    ObstacleKind::Wall => [0.55, 0.3, 0.85, 1.0],
                },
                role: NodeRole::Object(object.id),
            },
        };
        self.nodes.push(node);
    }

    fn push_player(&mut self, view: &FrameView) {
        let player = view.player;
        let [r, g, b] = view.character_color;
        self.nodes.push(SceneNode {
            primitive: Primitive::Cube,
            transform: Transform {
                translation: Vec3::new(
                    player.position.x,
                    player.position.y + player.size.y / 2.0,
                    player.position.z,
                ),
                rotation_y: 0.0,
                scale: player.size,
            },
            color: [r, g, b, 1.0],
            role: NodeRole::Player,
        });
    }

    fn pack_instances(&mut self) {
        self.instances.clear();
        for primitive in [Primitive::Cube, Primitive::Sphere, Primitive::Plane] {
            self.instances.extend(
                self.nodes
                    .iter()
                    .filter(|n| n.primitive == primitive)
                    .map(SceneNode::to_instance),
            );
        }
    }
}

impl Default for Scene3dRenderer {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Renderer for Scene3dRenderer {
    fn name(&self) -> &'static str {
        "scene3d"
    }

    fn render(&mut self, view: &FrameView) -> RenderStats {
        self.nodes.clear();
        let mut stats = RenderStats::default();

        self.push_track(view);
        for object in &view.objects {
            if self.is_visible(object) {
                self.push_object(object, view.elapsed);
                stats.objects_drawn += 1;
            } else {
                stats.culled += 1;
            }
        }
        self.push_player(view);
        self.pack_instances();

        stats.draw_calls = self.nodes.len() as u32;
        stats.instances = self.instances.len() as u32;
        tracing::trace!(?stats, "scene frame");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PlayerView;
    use lemmi_core::{Character, Lane, Phase, Pose};

    fn view(objects: Vec<ObjectView>, elapsed: f32) -> FrameView {
        FrameView {
            phase: Phase::Running,
            score: 0,
            speed: 12.0,
            distance: 0.0,
            elapsed,
            coins_collected: 0,
            character: Character::Winky,
            character_color: Character::Winky.stats().color,
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

    fn coin(z: f32) -> ObjectView {
        ObjectView {
            id: 4,
            kind: ObjectKind::Coin,
            position: Vec3::new(2.5, 0.7, z),
            size: Vec3::new(0.6, 0.6, 0.6),
        }
    }

    fn coin_rotation(renderer: &Scene3dRenderer) -> f32 {
        renderer
            .nodes()
            .iter()
            .find(|n| n.role == NodeRole::Object(4))
            .map(|n| n.transform.rotation_y)
            .unwrap()
    }

    #[test]
    fn test_one_instance_per_node() {
        let mut renderer = Scene3dRenderer::default();
        let stats = renderer.render(&view(vec![coin(10.0)], 0.0));
        assert_eq!(stats.instances, stats.draw_calls);
        assert_eq!(renderer.instance_bytes().len(), renderer.nodes().len() * InstanceData::SIZE);
    }

    #[test]
    fn test_culls_beyond_draw_distance() {
        let mut renderer = Scene3dRenderer::default();
        let stats = renderer.render(&view(vec![coin(10.0), coin(500.0), coin(-50.0)], 0.0));
        assert_eq!(stats.objects_drawn, 1);
        assert_eq!(stats.culled, 2);
    }

    #[test]
    fn test_coins_spin_over_time() {
        let mut renderer = Scene3dRenderer::default();
        renderer.render(&view(vec![coin(10.0)], 0.0));
        let before = coin_rotation(&renderer);
        renderer.render(&view(vec![coin(10.0)], 0.5));
        let after = coin_rotation(&renderer);
        assert!((after - before).abs() > 0.1);
    }

    #[test]
    fn test_player_uses_character_color() {
        let mut renderer = Scene3dRenderer::default();
        renderer.render(&view(Vec::new(), 0.0));
        let player = renderer
            .nodes()
            .iter()
            .find(|n| n.role == NodeRole::Player)
            .unwrap();
        let [r, g, b] = Character::Winky.stats().color;
        assert_eq!(player.color, [r, g, b, 1.0]);
    }

    #[test]
    fn test_instances_grouped_by_primitive() {
        let mut renderer = Scene3dRenderer::default();
        renderer.render(&view(vec![coin(10.0)], 0.0));
        let ids: Vec<u32> = renderer.instances().iter().map(InstanceData::primitive_id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
