/// Something that can report its direct children.
///
/// This is the only capability the flattening engine needs from a node.
/// The children are borrowed from the node itself and are reported in display order.
///
/// Trees have to be finite and acyclic.
/// A node that (indirectly) reports itself as its own child makes flattening run forever.
///
/// # Example
///
/// ```
/// # use tui_view_hierarchy::Tree;
/// struct Directory {
///     name: String,
///     entries: Vec<Directory>,
/// }
///
/// impl Tree for Directory {
///     fn children(&self) -> impl Iterator<Item = &Self> {
///         self.entries.iter()
///     }
/// }
/// ```
pub trait Tree {
    /// The direct children of this node in the order they should be shown.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Whether this node has no children.
    fn is_leaf(&self) -> bool {
        self.children().next().is_none()
    }
}

#[cfg(test)]
pub(crate) mod test_node {
    use super::Tree;

    /// Minimal node used by the unit tests.
    #[derive(Debug, PartialEq, Eq)]
    pub struct Node {
        pub name: &'static str,
        pub children: Vec<Self>,
    }

    impl Node {
        pub const fn leaf(name: &'static str) -> Self {
            Self {
                name,
                children: Vec::new(),
            }
        }

        pub const fn new(name: &'static str, children: Vec<Self>) -> Self {
            Self { name, children }
        }

        /// ```text
        /// a
        /// ├─ b
        /// │  └─ c
        /// └─ d
        /// ```
        pub fn small() -> Self {
            Self::new("a", vec![Self::new("b", vec![Self::leaf("c")]), Self::leaf("d")])
        }

        /// ```text
        /// root
        /// ├─ a
        /// ├─ b
        /// │  ├─ c
        /// │  ├─ d
        /// │  │  ├─ e
        /// │  │  └─ f
        /// │  └─ g
        /// └─ h
        /// ```
        pub fn example() -> Self {
            Self::new(
                "root",
                vec![
                    Self::leaf("a"),
                    Self::new(
                        "b",
                        vec![
                            Self::leaf("c"),
                            Self::new("d", vec![Self::leaf("e"), Self::leaf("f")]),
                            Self::leaf("g"),
                        ],
                    ),
                    Self::leaf("h"),
                ],
            )
        }
    }

    impl Tree for Node {
        fn children(&self) -> impl Iterator<Item = &Self> {
            self.children.iter()
        }
    }
}

#[test]
fn is_leaf_works() {
    let tree = test_node::Node::small();
    assert!(!tree.is_leaf());
    assert!(tree.children[1].is_leaf());
}
