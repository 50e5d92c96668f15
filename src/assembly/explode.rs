use super::scene::{NodeId, NodeKind, SceneGraph};
use crate::constants::EXPLODE_MIN_MAGNITUDE;
use glam::{Mat4, Vec3};
use serde::Serialize;

/// Per-mesh explode parameters, computed once per loaded scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExplodePart {
    #[serde(skip)]
    pub node: NodeId,
    /// Local position before any explode offset.
    pub base: Vec3,
    /// Unit direction in the parent's local space.
    pub direction: Vec3,
    pub magnitude: f32,
}

impl ExplodePart {
    pub fn position_at(&self, explode: f32) -> Vec3 {
        self.base + self.direction * self.magnitude * explode
    }
}

/// Splits meshes along world X away from the assembly centre. Meshes further
/// out travel further, but never less than `EXPLODE_MIN_MAGNITUDE`.
pub fn build_explode_parts(graph: &SceneGraph) -> Vec<ExplodePart> {
    let world = graph.world_matrices();
    let bounds = graph.world_bounds();
    let center = bounds.center();
    let max_half_extent = if bounds.is_empty() {
        0.0
    } else {
        (bounds.max.x - center.x).abs().max((bounds.min.x - center.x).abs())
    };

    graph
        .meshes()
        .map(|id| {
            let node = graph.node(id);
            let matrix = world[id.index()];
            let mesh_center = match &node.kind {
                NodeKind::Mesh { bounds: Some(local) } if !local.is_empty() => {
                    matrix.transform_point3(local.center())
                }
                _ => matrix.w_axis.truncate(),
            };

            let delta_x = mesh_center.x - center.x;
            let sign = if delta_x == 0.0 { 1.0 } else { delta_x.signum() };
            let magnitude = if max_half_extent > 0.0 {
                EXPLODE_MIN_MAGNITUDE.max(delta_x.abs() / max_half_extent)
            } else {
                1.0
            };

            let parent_world = node
                .parent()
                .map(|parent| world[parent.index()])
                .unwrap_or(Mat4::IDENTITY);
            let direction = parent_world
                .inverse()
                .transform_vector3(Vec3::new(sign, 0.0, 0.0))
                .normalize_or_zero();

            ExplodePart {
                node: id,
                base: node.transform.translation,
                direction,
                magnitude,
            }
        })
        .collect()
}

/// Moves every part to its exploded position. `distance` is the slider value
/// already scaled by the travel factor.
pub fn apply_explode(graph: &mut SceneGraph, parts: &[ExplodePart], distance: f32) {
    for part in parts {
        graph.node_mut(part.node).transform.translation = part.position_at(distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::scene::{Aabb, Transform};
    use glam::Quat;

    fn point_mesh() -> NodeKind {
        NodeKind::Mesh {
            bounds: Some(Aabb::new(Vec3::ZERO, Vec3::ZERO)),
        }
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn symmetric_parts_move_apart() {
        let mut graph = SceneGraph::new("Pair", NodeKind::Group);
        let root = graph.root();
        graph.add(root, "Left", point_mesh(), Transform::from_translation(Vec3::new(-2.0, 0.0, 0.0)));
        graph.add(root, "Right", point_mesh(), Transform::from_translation(Vec3::new(2.0, 0.0, 0.0)));

        let parts = build_explode_parts(&graph);
        assert_eq!(parts.len(), 2);
        assert!(close(parts[0].direction, Vec3::NEG_X));
        assert!(close(parts[1].direction, Vec3::X));
        assert_eq!(parts[0].magnitude, 1.0);
        assert_eq!(parts[1].magnitude, 1.0);
        assert!(close(parts[1].position_at(0.5), Vec3::new(2.5, 0.0, 0.0)));
    }

    #[test]
    fn explode_zero_keeps_base() {
        let mut graph = SceneGraph::new("Pair", NodeKind::Group);
        let root = graph.root();
        graph.add(root, "A", point_mesh(), Transform::from_translation(Vec3::new(-1.0, 3.0, 0.0)));
        graph.add(root, "B", point_mesh(), Transform::from_translation(Vec3::new(4.0, 0.0, 1.0)));
        for part in build_explode_parts(&graph) {
            assert_eq!(part.position_at(0.0), part.base);
        }
    }

    #[test]
    fn centred_part_gets_minimum_magnitude_and_positive_sign() {
        let mut graph = SceneGraph::new("Trio", NodeKind::Group);
        let root = graph.root();
        graph.add(root, "L", point_mesh(), Transform::from_translation(Vec3::new(-2.0, 0.0, 0.0)));
        graph.add(root, "Mid", point_mesh(), Transform::IDENTITY);
        graph.add(root, "R", point_mesh(), Transform::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        let mid = build_explode_parts(&graph)[1];
        assert_eq!(mid.magnitude, EXPLODE_MIN_MAGNITUDE);
        assert!(close(mid.direction, Vec3::X));
    }

    #[test]
    fn direction_is_expressed_in_parent_space() {
        let mut graph = SceneGraph::new("Rotated", NodeKind::Group);
        let root = graph.root();
        let turned = graph.add(
            root,
            "Turned",
            NodeKind::Group,
            Transform {
                rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                ..Transform::IDENTITY
            },
        );
        graph.add(turned, "Arm", point_mesh(), Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)));
        graph.add(root, "Anchor", point_mesh(), Transform::from_translation(Vec3::new(-1.0, 0.0, 0.0)));

        // Arm sits at world (1, 0, 0); world +X is local -Y under the turn.
        let arm = build_explode_parts(&graph)[0];
        assert!(close(arm.direction, Vec3::NEG_Y));
    }

    #[test]
    fn meshes_without_bounds_use_magnitude_one() {
        let mut graph = SceneGraph::new("Loose", NodeKind::Group);
        let root = graph.root();
        graph.add(
            root,
            "Ghost",
            NodeKind::Mesh { bounds: None },
            Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        );
        let ghost = build_explode_parts(&graph)[0];
        assert_eq!(ghost.magnitude, 1.0);
        assert!(close(ghost.direction, Vec3::X));

        let mut moved = graph.clone();
        apply_explode(&mut moved, &[ghost], 2.0);
        assert!(close(moved.node(ghost.node).transform.translation, Vec3::new(5.0, 0.0, 0.0)));
    }
}
