//! Layout hierarchy: Area → Sector → Equipment → Set → SubSet → Cip.
//!
//! Only branch types implement [`Branch`], so asking a [`Cip`] for its
//! children does not compile. A branch's children are either
//! [`ChildState::Unloaded`] or [`ChildState::Loaded`], and the two are never
//! conflated: `Loaded(vec![])` is a node known to have zero children.

use crate::domain::model::{Area, Cip, Equipment, NodeId, Sector, Set, SubSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState<T> {
    Unloaded,
    Loaded(Vec<T>),
}

impl<T> Default for ChildState<T> {
    fn default() -> Self {
        ChildState::Unloaded
    }
}

impl<T> ChildState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ChildState::Loaded(_))
    }

    /// The children if loaded. `Some(&[])` for a loaded, empty list.
    pub fn as_loaded(&self) -> Option<&[T]> {
        match self {
            ChildState::Loaded(items) => Some(items),
            ChildState::Unloaded => None,
        }
    }

    /// Iterates loaded children; yields nothing when unloaded.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_loaded().unwrap_or(&[]).iter()
    }
}

impl<T> From<Option<Vec<T>>> for ChildState<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        match value {
            Some(items) => ChildState::Loaded(items),
            None => ChildState::Unloaded,
        }
    }
}

impl<T: Serialize> Serialize for ChildState<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ChildState::Unloaded => serializer.serialize_none(),
            ChildState::Loaded(items) => serializer.serialize_some(items),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ChildState<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer).map(ChildState::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Area,
    Sector,
    Equipment,
    Set,
    SubSet,
    Cip,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Area,
        NodeKind::Sector,
        NodeKind::Equipment,
        NodeKind::Set,
        NodeKind::SubSet,
        NodeKind::Cip,
    ];

    /// 1 for Area through 6 for Cip.
    pub fn depth(self) -> u32 {
        match self {
            NodeKind::Area => 1,
            NodeKind::Sector => 2,
            NodeKind::Equipment => 3,
            NodeKind::Set => 4,
            NodeKind::SubSet => 5,
            NodeKind::Cip => 6,
        }
    }

    pub fn has_children(self) -> bool {
        self != NodeKind::Cip
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Area => "Area",
            NodeKind::Sector => "Sector",
            NodeKind::Equipment => "Equipment",
            NodeKind::Set => "Set",
            NodeKind::SubSet => "SubSet",
            NodeKind::Cip => "Cip",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of any node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef<'a> {
    pub kind: NodeKind,
    pub id: &'a NodeId,
    pub name: &'a str,
}

pub trait TreeNode {
    const KIND: NodeKind;

    fn id(&self) -> &NodeId;
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind {
        Self::KIND
    }

    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef {
            kind: Self::KIND,
            id: self.id(),
            name: self.name(),
        }
    }

    /// Pre-order visit of this node and every node reachable through loaded lists.
    fn walk<'a>(&'a self, visit: &mut dyn FnMut(NodeRef<'a>));
}

pub trait Branch: TreeNode {
    type Child: TreeNode;

    fn children(&self) -> &ChildState<Self::Child>;
}

/// The node's declared child list. `Unloaded` is reported as such, never as empty.
pub fn get_children<B: Branch>(node: &B) -> &ChildState<B::Child> {
    node.children()
}

macro_rules! branch_node {
    ($ty:ident, $kind:ident, $child:ident, $field:ident) => {
        impl TreeNode for $ty {
            const KIND: NodeKind = NodeKind::$kind;

            fn id(&self) -> &NodeId {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn walk<'a>(&'a self, visit: &mut dyn FnMut(NodeRef<'a>)) {
                visit(self.node_ref());
                for child in self.$field.iter() {
                    child.walk(visit);
                }
            }
        }

        impl Branch for $ty {
            type Child = $child;

            fn children(&self) -> &ChildState<$child> {
                &self.$field
            }
        }
    };
}

branch_node!(Area, Area, Sector, sectors);
branch_node!(Sector, Sector, Equipment, equipments);
branch_node!(Equipment, Equipment, Set, sets);
branch_node!(Set, Set, SubSet, sub_sets);
branch_node!(SubSet, SubSet, Cip, cips);

impl TreeNode for Cip {
    const KIND: NodeKind = NodeKind::Cip;

    fn id(&self) -> &NodeId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(NodeRef<'a>)) {
        visit(self.node_ref());
    }
}

/// Root of the layout hierarchy. Replaced wholesale by its owning store, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutTree {
    #[serde(default)]
    pub areas: ChildState<Area>,
}

impl LayoutTree {
    /// A tree whose areas have not been loaded yet.
    pub fn empty() -> Self {
        Self {
            areas: ChildState::Unloaded,
        }
    }

    /// Builds a loaded tree from top-level areas, keeping their order.
    /// Id uniqueness is not checked; see [`LayoutTree::duplicate_ids`].
    pub fn build(root_nodes: Vec<Area>) -> Self {
        Self {
            areas: ChildState::Loaded(root_nodes),
        }
    }

    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(NodeRef<'a>)) {
        for area in self.areas.iter() {
            area.walk(visit);
        }
    }

    pub fn find(&self, id: &NodeId) -> Option<NodeRef<'_>> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() && node.id == id {
                found = Some(node);
            }
        });
        found
    }

    /// Ids that occur on more than one reachable node.
    pub fn duplicate_ids(&self) -> Vec<NodeId> {
        let mut seen: HashMap<&NodeId, usize> = HashMap::new();
        let mut order = Vec::new();
        self.walk(&mut |node| {
            let count = seen.entry(node.id).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(node.id.clone());
            }
        });
        order
    }

    /// Nodes reachable through loaded lists, per kind.
    pub fn count_loaded(&self) -> BTreeMap<NodeKind, usize> {
        let mut counts = BTreeMap::new();
        self.walk(&mut |node| {
            *counts.entry(node.kind).or_insert(0) += 1;
        });
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayoutTree {
        LayoutTree::build(vec![Area::with_children(
            "Utilities",
            vec![
                Sector::with_children(
                    "Boilers",
                    vec![Equipment::with_children(
                        "Boiler 1",
                        vec![Set::with_children(
                            "Burner",
                            vec![SubSet::with_children("Nozzle", vec![Cip::new("Tip")])],
                        )],
                    )],
                ),
                Sector::new("Compressors"),
            ],
        )])
    }

    #[test]
    fn test_empty_tree_is_unloaded() {
        let tree = LayoutTree::empty();
        assert_eq!(tree.areas, ChildState::Unloaded);
        assert!(tree.count_loaded().is_empty());
    }

    #[test]
    fn test_build_with_no_roots_is_loaded_empty() {
        let tree = LayoutTree::build(vec![]);
        assert_eq!(tree.areas.as_loaded(), Some(&[][..]));
    }

    #[test]
    fn test_get_children_distinguishes_unloaded() {
        let tree = sample();
        let area = &tree.areas.as_loaded().unwrap()[0];
        let sectors = get_children(area).as_loaded().unwrap();
        assert_eq!(sectors.len(), 2);
        assert!(get_children(&sectors[0]).is_loaded());
        assert_eq!(get_children(&sectors[1]), &ChildState::Unloaded);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample();
        let mut kinds = Vec::new();
        tree.walk(&mut |node| kinds.push(node.kind));
        assert_eq!(
            kinds,
            vec![
                NodeKind::Area,
                NodeKind::Sector,
                NodeKind::Equipment,
                NodeKind::Set,
                NodeKind::SubSet,
                NodeKind::Cip,
                NodeKind::Sector,
            ]
        );
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample();
        let mut cip_id = None;
        tree.walk(&mut |node| {
            if node.kind == NodeKind::Cip {
                cip_id = Some(node.id.clone());
            }
        });
        let cip_id = cip_id.unwrap();
        let found = tree.find(&cip_id).unwrap();
        assert_eq!(found.name, "Tip");
        assert_eq!(found.kind.depth(), 6);
        assert!(!found.kind.has_children());
        assert!(tree.find(&NodeId::generate()).is_none());
    }

    #[test]
    fn test_duplicate_ids_reported_not_rejected() {
        let id = NodeId::new("dup").unwrap();
        let mut a = Area::new("A");
        a.id = id.clone();
        let mut b = Area::new("B");
        b.id = id.clone();
        let tree = LayoutTree::build(vec![a, b]);
        assert_eq!(tree.duplicate_ids(), vec![id]);
        assert_eq!(tree.count_loaded().get(&NodeKind::Area), Some(&2));
    }
}
