use crate::Tree;

/// One node of a tree together with its position in the flattened sequence.
///
/// The node itself is only borrowed.
/// The tree has to outlive every [`Flattened`] created from it.
#[must_use]
#[derive(Debug)]
pub struct Flattened<'a, T> {
    pub value: &'a T,

    /// Zero based depth. Depth 0 is the root.
    pub depth: usize,

    pub(crate) is_collapsed: bool,

    /// Amount of nodes below this one, direct and indirect.
    pub(crate) descendants: usize,
}

impl<'a, T> Flattened<'a, T> {
    const fn new(value: &'a T, depth: usize) -> Self {
        Self {
            value,
            depth,
            is_collapsed: false,
            descendants: 0,
        }
    }

    /// Whether the descendants of this node are hidden.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    #[must_use]
    pub const fn descendants(&self) -> usize {
        self.descendants
    }

    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.descendants > 0
    }
}

// Derive would require T: Clone / T: PartialEq while only a reference is held
impl<T> Clone for Flattened<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flattened<'_, T> {}

impl<T: PartialEq> PartialEq for Flattened<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.depth == other.depth
            && self.is_collapsed == other.is_collapsed
            && self.descendants == other.descendants
    }
}

/// Flatten the whole tree below `root` in depth first pre-order.
///
/// Every node is visited exactly once: the root first, then each child subtree in the order the
/// children are reported.
/// Nothing is collapsed in the result.
///
/// Iterative, the depth of the tree is only limited by memory.
#[must_use]
pub fn flatten<T: Tree>(root: &T) -> Vec<Flattened<'_, T>> {
    let mut result = vec![Flattened::new(root, 0)];

    // One frame per node on the current path: its index in result and its remaining children
    let mut stack = vec![(0, root.children())];
    while let Some((parent, children)) = stack.last_mut() {
        if let Some(child) = children.next() {
            let depth = stack.len();
            result.push(Flattened::new(child, depth));
            stack.push((result.len() - 1, child.children()));
        } else {
            let parent = *parent;
            result[parent].descendants = result.len() - parent - 1;
            stack.pop();
        }
    }

    tracing::debug!(nodes = result.len(), "flattened tree");
    result
}

#[cfg(test)]
use crate::tree::test_node::Node;

#[test]
fn single_leaf_is_one_record() {
    let root = Node::leaf("root");
    let result = flatten(&root);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].depth, 0);
    assert_eq!(result[0].value.name, "root");
    assert!(!result[0].has_children());
}

#[test]
fn depth_works() {
    let root = Node::example();
    let depths = flatten(&root)
        .into_iter()
        .map(|flattened| flattened.depth)
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 1, 1, 2, 2, 3, 3, 2, 1]);
}

#[test]
fn order_is_pre_order() {
    let root = Node::example();
    let names = flatten(&root)
        .into_iter()
        .map(|flattened| flattened.value.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["root", "a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn descendants_are_subtree_sizes() {
    let root = Node::example();
    let descendants = flatten(&root)
        .into_iter()
        .map(|flattened| flattened.descendants())
        .collect::<Vec<_>>();
    assert_eq!(descendants, [8, 0, 5, 0, 2, 0, 0, 0, 0]);
}

#[test]
fn nothing_is_collapsed() {
    let root = Node::example();
    assert!(flatten(&root).iter().all(|flattened| !flattened.is_collapsed()));
}

#[test]
fn deep_tree_does_not_overflow_the_stack() {
    let mut root = Node::leaf("leaf");
    for _ in 0..100_000 {
        root = Node::new("inner", vec![root]);
    }
    let result = flatten(&root);
    assert_eq!(result.len(), 100_001);
    assert_eq!(result.last().map(|flattened| flattened.depth), Some(100_000));
    assert_eq!(result[0].descendants(), 100_000);
    drop(result);

    // Dropping the nested Vecs recurses as well, unwind them by hand
    let mut current = root;
    while let Some(child) = current.children.pop() {
        current = child;
    }
}
