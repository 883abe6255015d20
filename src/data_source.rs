use crate::error::{Error, Result};
use crate::flatten::{flatten, Flattened};
use crate::Tree;

/// Answers the questions a list widget asks about a tree: how many rows there are and what is
/// shown in each of them.
///
/// The tree is flattened once on creation.
/// Afterwards collapsing and expanding rows only updates which of the flattened records are
/// visible, the tree itself is never walked again.
///
/// Rows are indices into the currently visible records.
/// Everything starts expanded so initially every node of the tree has its own row.
///
/// # Example
///
/// ```
/// # use tui_view_hierarchy::{Element, Frame, TreeDataSource};
/// let button = Element::new("UIButton", Frame::new(16.0, 40.0, 120.0, 44.0));
/// let window = Element::new("UIWindow", Frame::new(0.0, 0.0, 390.0, 844.0)).with_children(vec![button]);
///
/// let mut source = TreeDataSource::new(&window);
/// assert_eq!(source.row_count(), 2);
///
/// let is_collapsed = source.toggle_collapsed(0)?;
/// assert!(is_collapsed);
/// assert_eq!(source.row_count(), 1);
/// assert_eq!(source.record_at(0)?.value.label(), "UIWindow");
/// # Ok::<(), tui_view_hierarchy::Error>(())
/// ```
#[derive(Debug)]
pub struct TreeDataSource<'a, T> {
    records: Vec<Flattened<'a, T>>,

    /// Indices into `records` of the visible ones, ascending.
    visible: Vec<usize>,
}

// Derive would require T: Clone while only references are held
impl<T> Clone for TreeDataSource<'_, T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            visible: self.visible.clone(),
        }
    }
}

impl<'a, T> TreeDataSource<'a, T> {
    /// Flatten the tree below `root`.
    ///
    /// The tree needs to be finite and acyclic.
    #[must_use]
    pub fn new(root: &'a T) -> Self
    where
        T: Tree,
    {
        let records = flatten(root);
        let visible = (0..records.len()).collect();
        Self { records, visible }
    }

    /// Amount of currently visible rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.visible.len()
    }

    /// Amount of nodes in the whole tree, visible or not.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    /// All records in pre-order, including the hidden ones.
    #[must_use]
    pub fn records(&self) -> &[Flattened<'a, T>] {
        &self.records
    }

    /// The visible records in row order.
    pub fn visible(&self) -> impl ExactSizeIterator<Item = &Flattened<'a, T>> + '_ {
        self.visible.iter().map(|&index| &self.records[index])
    }

    /// The record shown in the given row.
    ///
    /// # Errors
    ///
    /// Errors when `row` is not below [`row_count`](Self::row_count).
    pub fn record_at(&self, row: usize) -> Result<&Flattened<'a, T>> {
        let index = self.record_index(row)?;
        Ok(&self.records[index])
    }

    /// Index into [`records`](Self::records) of the record shown in the given row.
    ///
    /// Unlike the row the record index does not change when something gets collapsed or expanded.
    ///
    /// # Errors
    ///
    /// Errors when `row` is not below [`row_count`](Self::row_count).
    pub fn record_index(&self, row: usize) -> Result<usize> {
        self.visible
            .get(row)
            .copied()
            .ok_or_else(|| Error::RowOutOfRange {
                row,
                row_count: self.row_count(),
            })
    }

    /// Row the given record is currently shown in.
    ///
    /// Returns `None` when the record is hidden below a collapsed ancestor or does not exist.
    #[must_use]
    pub fn visible_row_of(&self, record_index: usize) -> Option<usize> {
        self.visible.binary_search(&record_index).ok()
    }

    /// Row of the given record or, when it is hidden, the row of its collapsed ancestor.
    ///
    /// Returns `None` when the record does not exist.
    #[must_use]
    pub fn nearest_visible_row(&self, record_index: usize) -> Option<usize> {
        if record_index >= self.records.len() {
            return None;
        }
        // Everything between a collapsed row and a hidden record is hidden as well
        match self.visible.binary_search(&record_index) {
            Ok(row) => Some(row),
            Err(row) => row.checked_sub(1),
        }
    }

    /// Row of the parent of the node in the given row.
    ///
    /// Returns `Ok(None)` for the root.
    ///
    /// # Errors
    ///
    /// Errors when `row` is not below [`row_count`](Self::row_count).
    pub fn parent_row(&self, row: usize) -> Result<Option<usize>> {
        let depth = self.record_at(row)?.depth;
        // The parent is the closest row above with a smaller depth, it can not be hidden
        Ok(self.visible[..row]
            .iter()
            .rposition(|&index| self.records[index].depth < depth))
    }

    /// Collapse or expand the node in the given row.
    ///
    /// Collapsing hides every descendant of the node, expanding shows them again unless they are
    /// below another collapsed descendant.
    /// Only the given row changes its collapsed state, the rest keep theirs.
    ///
    /// Returns `true` when the row is collapsed now.
    ///
    /// # Errors
    ///
    /// Errors when `row` is not below [`row_count`](Self::row_count).
    /// Nothing changes in that case.
    pub fn toggle_collapsed(&mut self, row: usize) -> Result<bool> {
        let index = self.record_index(row)?;
        let record = &mut self.records[index];
        record.is_collapsed = !record.is_collapsed;
        let is_collapsed = record.is_collapsed;
        let subtree_end = index + record.descendants + 1;

        let below = row + 1;
        if is_collapsed {
            let hidden = self.visible[below..].partition_point(|&visible| visible < subtree_end);
            self.visible.drain(below..below + hidden);
        } else {
            let shown = visible_between(&self.records, index + 1, subtree_end);
            self.visible.splice(below..below, shown);
        }

        tracing::trace!(
            row,
            index,
            is_collapsed,
            row_count = self.row_count(),
            "toggled row"
        );
        Ok(is_collapsed)
    }

    /// Collapses every node with children.
    ///
    /// Only the root row stays visible.
    /// Returns `true` when anything changed.
    pub fn collapse_all(&mut self) -> bool {
        let mut changed = false;
        for record in &mut self.records {
            if record.has_children() && !record.is_collapsed {
                record.is_collapsed = true;
                changed = true;
            }
        }
        self.visible = visible_between(&self.records, 0, self.records.len());
        changed
    }

    /// Expands every node.
    ///
    /// Returns `true` when anything changed.
    pub fn expand_all(&mut self) -> bool {
        let mut changed = false;
        for record in &mut self.records {
            changed |= record.is_collapsed;
            record.is_collapsed = false;
        }
        self.visible = (0..self.records.len()).collect();
        changed
    }

    /// Build whatever the list displays for the given row.
    ///
    /// `factory` gets the display `surface` passed through along with the node, its depth and
    /// whether it is collapsed.
    ///
    /// # Errors
    ///
    /// Errors when `row` is not below [`row_count`](Self::row_count).
    /// `factory` is not called in that case.
    pub fn cell_for_row<Surface, Cell, Factory>(
        &self,
        surface: Surface,
        row: usize,
        factory: Factory,
    ) -> Result<Cell>
    where
        Factory: FnOnce(Surface, &'a T, usize, bool) -> Cell,
    {
        let record = self.record_at(row)?;
        Ok(factory(
            surface,
            record.value,
            record.depth,
            record.is_collapsed,
        ))
    }
}

/// Indices of the records in `start..end` which are not below a collapsed record of that range.
fn visible_between<T>(records: &[Flattened<'_, T>], start: usize, end: usize) -> Vec<usize> {
    let mut result = Vec::with_capacity(end.saturating_sub(start));
    let mut index = start;
    while index < end {
        result.push(index);
        let record = &records[index];
        index += if record.is_collapsed {
            record.descendants + 1
        } else {
            1
        };
    }
    result
}

#[cfg(test)]
use crate::tree::test_node::Node;

#[cfg(test)]
fn depths(source: &TreeDataSource<'_, Node>) -> Vec<usize> {
    source.visible().map(|record| record.depth).collect()
}

#[cfg(test)]
fn names(source: &TreeDataSource<'_, Node>) -> Vec<&'static str> {
    source.visible().map(|record| record.value.name).collect()
}

#[test]
fn single_leaf_has_one_row() {
    let root = Node::leaf("root");
    let source = TreeDataSource::new(&root);
    assert_eq!(source.row_count(), 1);
    assert_eq!(source.record_at(0).unwrap().depth, 0);
}

#[test]
fn row_count_is_node_count() {
    let root = Node::example();
    let source = TreeDataSource::new(&root);
    assert_eq!(source.row_count(), 9);
    assert_eq!(source.node_count(), 9);
}

#[test]
fn small_tree_depths() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    assert_eq!(source.row_count(), 4);
    assert_eq!(depths(&source), [0, 1, 2, 1]);
}

#[test]
fn collapse_hides_descendants() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    assert!(source.toggle_collapsed(1).unwrap());
    assert_eq!(source.row_count(), 3);
    assert_eq!(names(&source), ["a", "b", "d"]);
    assert!(source.record_at(1).unwrap().is_collapsed());
    assert!(!source.records()[2].is_collapsed());
}

#[test]
fn expand_restores_rows() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(1).unwrap();
    assert!(!source.toggle_collapsed(1).unwrap());
    assert_eq!(source.row_count(), 4);
    assert_eq!(depths(&source), [0, 1, 2, 1]);
    assert_eq!(names(&source), ["a", "b", "c", "d"]);
}

#[test]
fn toggle_twice_is_identity() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(4).unwrap();
    let visible = source.visible.clone();
    let records = source.records.clone();
    for row in 0..source.row_count() {
        source.toggle_collapsed(row).unwrap();
        source.toggle_collapsed(row).unwrap();
        assert_eq!(source.visible, visible);
        assert_eq!(source.records, records);
    }
}

#[test]
fn collapse_changes_row_count_by_descendants() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let descendants = source.record_at(2).unwrap().descendants();
    assert_eq!(descendants, 5);
    source.toggle_collapsed(2).unwrap();
    assert_eq!(source.row_count(), 9 - descendants);
    source.toggle_collapsed(2).unwrap();
    assert_eq!(source.row_count(), 9);
}

#[test]
fn nested_collapse_is_remembered() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    // d first, then its parent b
    source.toggle_collapsed(4).unwrap();
    assert_eq!(names(&source), ["root", "a", "b", "c", "d", "g", "h"]);
    source.toggle_collapsed(2).unwrap();
    assert_eq!(names(&source), ["root", "a", "b", "h"]);

    // Expanding b shows d still collapsed
    source.toggle_collapsed(2).unwrap();
    assert_eq!(names(&source), ["root", "a", "b", "c", "d", "g", "h"]);
    assert!(source.record_at(4).unwrap().is_collapsed());
}

#[test]
fn collapse_keeps_other_rows_in_order() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(4).unwrap();
    let depths = depths(&source);
    assert_eq!(depths, [0, 1, 1, 2, 2, 2, 1]);
}

#[test]
fn toggle_leaf_only_flips_flag() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    assert!(source.toggle_collapsed(3).unwrap());
    assert_eq!(source.row_count(), 4);
    assert!(source.record_at(3).unwrap().is_collapsed());
}

#[test]
fn toggle_root_leaves_root_only() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(0).unwrap();
    assert_eq!(names(&source), ["root"]);
}

#[test]
fn out_of_range_errors() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    let expected = Err(Error::RowOutOfRange {
        row: 4,
        row_count: 4,
    });
    assert_eq!(source.record_at(4).map(|record| record.depth), expected);
    assert!(source.record_at(usize::MAX).is_err());
    assert_eq!(
        source.toggle_collapsed(4),
        Err(Error::RowOutOfRange {
            row: 4,
            row_count: 4
        })
    );
    assert_eq!(source.row_count(), 4);
    assert!(source.records().iter().all(|record| !record.is_collapsed()));
}

#[test]
#[should_panic = "RowOutOfRange"]
fn record_at_unwrap_panics_out_of_range() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    source.record_at(source.row_count()).unwrap();
}

#[test]
fn out_of_range_after_collapse() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(1).unwrap();
    assert!(source.record_at(2).is_ok());
    assert!(source.record_at(3).is_err());
}

#[test]
fn children_follow_their_parent_contiguously() {
    let root = Node::example();
    let source = TreeDataSource::new(&root);
    for row in 0..source.row_count() {
        let record = source.record_at(row).unwrap();
        for offset in 1..=record.descendants() {
            let descendant = source.record_at(row + offset).unwrap();
            assert!(descendant.depth > record.depth);
        }
        if let Ok(next) = source.record_at(row + record.descendants() + 1) {
            assert!(next.depth <= record.depth);
        }
    }
}

#[test]
fn parent_row_works() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    assert_eq!(source.parent_row(0), Ok(None));
    assert_eq!(source.parent_row(1), Ok(Some(0)));
    assert_eq!(source.parent_row(5), Ok(Some(4)));
    assert_eq!(source.parent_row(7), Ok(Some(2)));
    assert_eq!(source.parent_row(8), Ok(Some(0)));

    source.toggle_collapsed(2).unwrap();
    assert_eq!(source.parent_row(3), Ok(Some(0)));
}

#[test]
fn visible_row_of_works() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(2).unwrap();
    assert_eq!(source.visible_row_of(2), Some(2));
    assert_eq!(source.visible_row_of(5), None);
    assert_eq!(source.visible_row_of(8), Some(3));
    assert_eq!(source.visible_row_of(42), None);
    assert_eq!(source.record_index(3), Ok(8));
}

#[test]
fn nearest_visible_row_falls_back_to_collapsed_ancestor() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(4).unwrap();
    assert_eq!(source.nearest_visible_row(5), Some(4));
    assert_eq!(source.nearest_visible_row(7), Some(5));
    source.toggle_collapsed(2).unwrap();
    assert_eq!(source.nearest_visible_row(6), Some(2));
    assert_eq!(source.nearest_visible_row(8), Some(3));
    assert_eq!(source.nearest_visible_row(9), None);
}

#[test]
fn collapse_all_and_expand_all() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    assert!(!source.expand_all());
    assert!(source.collapse_all());
    assert_eq!(names(&source), ["root"]);
    assert!(!source.collapse_all());

    source.toggle_collapsed(0).unwrap();
    assert_eq!(names(&source), ["root", "a", "b", "h"]);

    assert!(source.expand_all());
    assert_eq!(source.row_count(), 9);
}

#[test]
fn cell_for_row_passes_record() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(1).unwrap();
    let cell = source
        .cell_for_row(">", 1, |surface, node, depth, is_collapsed| {
            format!("{surface}{depth}{}{is_collapsed}", node.name)
        })
        .unwrap();
    assert_eq!(cell, ">1btrue");
}

#[test]
fn cell_for_row_out_of_range_does_not_call_factory() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    let result: Result<()> = source.cell_for_row((), 4, |(), _, _, _| unreachable!());
    assert_eq!(
        result,
        Err(Error::RowOutOfRange {
            row: 4,
            row_count: 4
        })
    );
}
