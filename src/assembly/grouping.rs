use super::naming::normalize_part_name;
use super::scene::{NodeId, SceneGraph};
use crate::constants::{PATH_SEPARATOR, UNNAMED_MODEL};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HierarchyItem {
    pub name: String,
    pub depth: usize,
    #[serde(rename = "type")]
    pub node_type: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyGroup {
    pub name: String,
    pub path: String,
    pub mesh_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssemblyCount {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartGroup {
    pub key: String,
    pub name: String,
    pub count: usize,
    pub assemblies: Vec<AssemblyCount>,
}

fn root_name(graph: &SceneGraph) -> &str {
    let name = graph.node(graph.root()).trimmed_name();
    if name.is_empty() { UNNAMED_MODEL } else { name }
}

/// Root name followed by the named ancestors of `node`, excluding the root
/// and the node itself, joined with `" / "`.
pub fn node_path(graph: &SceneGraph, node: NodeId) -> String {
    let mut names = Vec::new();
    let mut current = graph.node(node).parent();
    while let Some(parent) = current {
        if parent == graph.root() {
            break;
        }
        let parent_node = graph.node(parent);
        let name = parent_node.trimmed_name();
        if !name.is_empty() {
            names.push(name);
        }
        current = parent_node.parent();
    }
    names.push(root_name(graph));
    names.reverse();
    names.join(PATH_SEPARATOR)
}

/// Flattened tree for the outline panel, in pre-order. Unnamed nodes are
/// labelled `"{type} {n}"` from one running counter.
pub fn collect_hierarchy(graph: &SceneGraph) -> Vec<HierarchyItem> {
    let mut unnamed = 0;
    graph
        .traverse(graph.root())
        .into_iter()
        .map(|id| {
            let node = graph.node(id);
            let name = if id == graph.root() {
                root_name(graph).to_string()
            } else if node.trimmed_name().is_empty() {
                unnamed += 1;
                format!("{} {}", node.kind.type_name(), unnamed)
            } else {
                node.trimmed_name().to_string()
            };
            HierarchyItem {
                name,
                depth: graph.depth(id),
                node_type: node.kind.type_name(),
            }
        })
        .collect()
}

/// Named non-mesh nodes that contain meshes, largest first. Entries with the
/// same path and name collapse into one.
pub fn collect_assembly_groups(graph: &SceneGraph) -> Vec<AssemblyGroup> {
    let mut groups: Vec<AssemblyGroup> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for id in graph.traverse(graph.root()) {
        let node = graph.node(id);
        let name = node.trimmed_name();
        if node.kind.is_mesh() || name.is_empty() {
            continue;
        }
        let mesh_count = graph
            .traverse(id)
            .into_iter()
            .filter(|child| graph.node(*child).kind.is_mesh())
            .count();
        if mesh_count == 0 {
            continue;
        }
        let path = node_path(graph, id);
        let group = AssemblyGroup {
            name: name.to_string(),
            path: path.clone(),
            mesh_count,
        };
        match by_key.get(&format!("{path}/{name}")) {
            Some(&index) => groups[index] = group,
            None => {
                by_key.insert(format!("{path}/{name}"), groups.len());
                groups.push(group);
            }
        }
    }

    groups.sort_by(|a, b| b.mesh_count.cmp(&a.mesh_count));
    groups
}

/// Meshes bucketed by normalized part name, with a per-assembly breakdown.
/// Both levels are sorted by count, largest first.
pub fn collect_part_groups(graph: &SceneGraph) -> Vec<PartGroup> {
    let mut groups: Vec<PartGroup> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut unnamed = 0;

    for id in graph.meshes() {
        let node = graph.node(id);
        let raw = if node.trimmed_name().is_empty() {
            unnamed += 1;
            format!("Mesh {unnamed}")
        } else {
            node.trimmed_name().to_string()
        };
        let normalized = normalize_part_name(&raw);
        let key = if normalized.is_empty() { raw } else { normalized };
        let path = node_path(graph, id);

        let index = *by_key.entry(key.clone()).or_insert_with(|| {
            groups.push(PartGroup {
                key: key.clone(),
                name: key.clone(),
                count: 0,
                assemblies: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[index];
        group.count += 1;
        match group.assemblies.iter_mut().find(|entry| entry.name == path) {
            Some(entry) => entry.count += 1,
            None => group.assemblies.push(AssemblyCount { name: path, count: 1 }),
        }
    }

    for group in &mut groups {
        group.assemblies.sort_by(|a, b| b.count.cmp(&a.count));
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
