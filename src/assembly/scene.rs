use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Axis-aligned bounding box. The default box is empty.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.expand(other.min);
            self.expand(other.max);
        }
    }

    /// Box around the eight transformed corners.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return Aabb::EMPTY;
        }
        let mut result = Aabb::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            result.expand(matrix.transform_point3(corner));
        }
        result
    }
}

/// Node variants, decided when the graph is built.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Scene,
    Group,
    Object3D,
    Bone,
    Light,
    Camera,
    /// Geometry bounds in local space, when the loader knows them.
    Mesh { bounds: Option<Aabb> },
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Scene => "Scene",
            NodeKind::Group => "Group",
            NodeKind::Object3D => "Object3D",
            NodeKind::Bone => "Bone",
            NodeKind::Light => "Light",
            NodeKind::Camera => "Camera",
            NodeKind::Mesh { .. } => "Mesh",
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh { .. })
    }

    pub fn is_light(&self) -> bool {
        matches!(self, NodeKind::Light)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Name with surrounding whitespace removed; empty for unnamed nodes.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

/// Arena-backed scene tree. Node 0 is the root; parents always precede
/// their children.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(root_name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            nodes: vec![SceneNode {
                name: root_name.into(),
                kind,
                transform: Transform::IDENTITY,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn add(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.into(),
            kind,
            transform,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk of `start` and everything below it.
    pub fn traverse(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    pub fn meshes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.traverse(NodeId::ROOT)
            .into_iter()
            .filter(|id| self.nodes[id.0].kind.is_mesh())
    }

    /// Distance from the root, which sits at depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.0].parent;
        }
        depth
    }

    /// World matrices for every node, indexed by `NodeId::index`.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut world = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let matrix = match node.parent {
                Some(parent) => world[parent.0] * local,
                None => local,
            };
            world.push(matrix);
        }
        world
    }

    /// World-space box around every mesh with known bounds.
    pub fn world_bounds(&self) -> Aabb {
        let world = self.world_matrices();
        let mut bounds = Aabb::EMPTY;
        for (index, node) in self.nodes.iter().enumerate() {
            if let NodeKind::Mesh { bounds: Some(local) } = &node.kind {
                bounds.union(&local.transformed(&world[index]));
            }
        }
        bounds
    }

    /// Copy of the graph without the nodes rejected by `keep`, or their subtrees.
    pub fn filtered(&self, keep: impl Fn(&SceneNode) -> bool) -> SceneGraph {
        let root = &self.nodes[0];
        let mut graph = SceneGraph::new(root.name.clone(), root.kind.clone());
        graph.nodes[0].transform = root.transform;
        let mut stack: Vec<(NodeId, NodeId)> = root
            .children
            .iter()
            .rev()
            .map(|child| (*child, NodeId::ROOT))
            .collect();
        while let Some((old, new_parent)) = stack.pop() {
            let node = &self.nodes[old.0];
            if !keep(node) {
                continue;
            }
            let id = graph.add(new_parent, node.name.clone(), node.kind.clone(), node.transform);
            stack.extend(node.children.iter().rev().map(|child| (*child, id)));
        }
        graph
    }

    pub fn from_spec(spec: &NodeSpec) -> SceneGraph {
        let mut graph = SceneGraph::new(spec.name.clone(), spec.kind.to_kind(spec.bounds));
        graph.nodes[0].transform = spec.transform();
        let mut stack: Vec<(&NodeSpec, NodeId)> =
            spec.children.iter().rev().map(|child| (child, NodeId::ROOT)).collect();
        while let Some((child, parent)) = stack.pop() {
            let id = graph.add(
                parent,
                child.name.clone(),
                child.kind.to_kind(child.bounds),
                child.transform(),
            );
            stack.extend(child.children.iter().rev().map(|grandchild| (grandchild, id)));
        }
        graph
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKindSpec {
    Scene,
    #[default]
    Group,
    Object3d,
    Bone,
    Light,
    Camera,
    Mesh,
}

impl NodeKindSpec {
    fn to_kind(self, bounds: Option<Aabb>) -> NodeKind {
        match self {
            NodeKindSpec::Scene => NodeKind::Scene,
            NodeKindSpec::Group => NodeKind::Group,
            NodeKindSpec::Object3d => NodeKind::Object3D,
            NodeKindSpec::Bone => NodeKind::Bone,
            NodeKindSpec::Light => NodeKind::Light,
            NodeKindSpec::Camera => NodeKind::Camera,
            NodeKindSpec::Mesh => NodeKind::Mesh { bounds },
        }
    }
}

/// JSON description of a scene tree, as exported by the asset pipeline.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub name: String,
    pub kind: NodeKindSpec,
    pub translation: Vec3,
    /// Quaternion as `[x, y, z, w]`.
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<Vec3>,
    pub bounds: Option<Aabb>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self
                .rotation
                .map(|q| Quat::from_array(q).normalize())
                .unwrap_or(Quat::IDENTITY),
            scale: self.scale.unwrap_or(Vec3::ONE),
        }
    }
}
