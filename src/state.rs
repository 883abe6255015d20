use crate::TreeDataSource;

/// Keeps the state of what is currently selected and where the list is scrolled to in a [`Hierarchy`](crate::Hierarchy).
///
/// What is collapsed is part of the [`TreeDataSource`], this only keeps track of the list itself.
///
/// The selection is stored as a record index (see [`TreeDataSource::record_index`]).
/// Unlike rows these stay the same when something gets collapsed or expanded.
/// When the selected record gets hidden below a collapsed ancestor that ancestor is shown as selected.
///
/// # Example
///
/// ```
/// # use tui_view_hierarchy::HierarchyState;
/// let mut state = HierarchyState::default();
/// ```
#[derive(Debug, Default, Clone)]
pub struct HierarchyState {
    pub(super) offset: usize,
    pub(super) selected: Option<usize>,
    pub(super) ensure_selected_in_view_on_next_render: bool,
}

impl HierarchyState {
    #[must_use]
    pub const fn get_offset(&self) -> usize {
        self.offset
    }

    /// Record index of the selected node.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Row the selection is shown in.
    #[must_use]
    pub fn selected_row<T>(&self, source: &TreeDataSource<'_, T>) -> Option<usize> {
        self.selected
            .and_then(|index| source.nearest_visible_row(index))
    }

    /// Selects the given record index.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// Clear the selection by passing `None`:
    ///
    /// ```rust
    /// # use tui_view_hierarchy::HierarchyState;
    /// # let mut state = HierarchyState::default();
    /// state.select(None);
    /// ```
    pub fn select(&mut self, record_index: Option<usize>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let changed = self.selected != record_index;
        self.selected = record_index;
        changed
    }

    /// Collapses or expands the selected row.
    /// See also [`TreeDataSource::toggle_collapsed`]
    ///
    /// Returns `true` when a row was collapsed / expanded.
    /// This only returns `false` when nothing is selected.
    pub fn toggle_selected<T>(&mut self, source: &mut TreeDataSource<'_, T>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(row) = self.selected_row(source) else {
            return false;
        };
        // The selection might have been hidden, the toggled row is what is selected now
        self.selected = source.record_index(row).ok();
        source.toggle_collapsed(row).is_ok()
    }

    /// Select the first row.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_first<T>(&mut self, source: &TreeDataSource<'_, T>) -> bool {
        self.select(source.record_index(0).ok())
    }

    /// Select the last visible row.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_last<T>(&mut self, source: &TreeDataSource<'_, T>) -> bool {
        let last = source.row_count().saturating_sub(1);
        self.select(source.record_index(last).ok())
    }

    /// Select the given visible row.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// This can be useful for mouse clicks.
    pub fn select_visible_index<T>(&mut self, source: &TreeDataSource<'_, T>, row: usize) -> bool {
        let row = row.min(source.row_count().saturating_sub(1));
        self.select(source.record_index(row).ok())
    }

    /// Move the current selection with the direction/amount by the given function.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// # Example
    ///
    /// ```
    /// # use tui_view_hierarchy::{Element, Frame, HierarchyState, TreeDataSource};
    /// # let root = Element::new("UIWindow", Frame::default());
    /// # let source = TreeDataSource::new(&root);
    /// # let mut state = HierarchyState::default();
    /// // Move the selection one down
    /// state.select_visible_relative(&source, |current| {
    ///     current.map_or(0, |current| current.saturating_add(1))
    /// });
    /// ```
    ///
    /// For more examples take a look into the source code of [`key_up`](Self::key_up) or [`key_down`](Self::key_down).
    /// They are implemented with this method.
    pub fn select_visible_relative<T, F>(
        &mut self,
        source: &TreeDataSource<'_, T>,
        change_function: F,
    ) -> bool
    where
        F: FnOnce(Option<usize>) -> usize,
    {
        let current_row = self.selected_row(source);
        let new_row = change_function(current_row).min(source.row_count().saturating_sub(1));
        self.select(source.record_index(new_row).ok())
    }

    /// Ensure the selected row is visible on next render
    pub fn scroll_selected_into_view(&mut self) {
        self.ensure_selected_in_view_on_next_render = true;
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        before != self.offset
    }

    /// Scroll the specified amount of lines down
    ///
    /// In contrast to [`scroll_up()`](Self::scroll_up) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset = self.offset.saturating_add(lines);
        true
    }

    /// Handles the up arrow key.
    /// Moves up one row.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_up<T>(&mut self, source: &TreeDataSource<'_, T>) -> bool {
        self.select_visible_relative(source, |current| {
            current.map_or(usize::MAX, |current| current.saturating_sub(1))
        })
    }

    /// Handles the down arrow key.
    /// Moves down one row.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_down<T>(&mut self, source: &TreeDataSource<'_, T>) -> bool {
        self.select_visible_relative(source, |current| {
            current.map_or(0, |current| current.saturating_add(1))
        })
    }

    /// Handles the left arrow key.
    /// Collapses the currently selected or moves to its parent.
    ///
    /// Returns `true` when the selection or the collapsed state changed.
    pub fn key_left<T>(&mut self, source: &mut TreeDataSource<'_, T>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(row) = self.selected_row(source) else {
            return false;
        };
        let Ok(record) = source.record_at(row) else {
            return false;
        };
        if record.has_children() && !record.is_collapsed() {
            return source.toggle_collapsed(row).is_ok();
        }
        match source.parent_row(row) {
            Ok(Some(parent)) => self.select(source.record_index(parent).ok()),
            _ => false,
        }
    }

    /// Handles the right arrow key.
    /// Expands the currently selected.
    ///
    /// Returns `true` if the row was collapsed and has been expanded.
    /// Returns `false` if the row was already expanded.
    pub fn key_right<T>(&mut self, source: &mut TreeDataSource<'_, T>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let Some(row) = self.selected_row(source) else {
            return false;
        };
        let is_collapsed = source
            .record_at(row)
            .is_ok_and(|record| record.is_collapsed());
        is_collapsed && source.toggle_collapsed(row).is_ok()
    }
}

#[cfg(test)]
use crate::tree::test_node::Node;

#[test]
fn select_first_and_last() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    assert!(state.select_last(&source));
    assert_eq!(state.selected(), Some(8));
    assert!(state.select_first(&source));
    assert_eq!(state.selected(), Some(0));
    assert!(!state.select_first(&source));

    source.toggle_collapsed(0).unwrap();
    assert!(!state.select_last(&source));
}

#[test]
fn key_down_and_up_move_rows() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.key_down(&source);
    assert_eq!(state.selected_row(&source), Some(0));
    state.key_down(&source);
    state.key_down(&source);
    assert_eq!(state.selected(), Some(2));

    // b collapsed: the next row is h
    source.toggle_collapsed(2).unwrap();
    state.key_down(&source);
    assert_eq!(state.selected(), Some(8));
    assert!(!state.key_down(&source));

    state.key_up(&source);
    assert_eq!(state.selected(), Some(2));
}

#[test]
fn key_up_without_selection_selects_last() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.key_up(&source);
    assert_eq!(state.selected_row(&source), Some(3));
}

#[test]
fn selection_survives_collapse_of_ancestor() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_visible_index(&source, 5);
    assert_eq!(state.selected(), Some(5));

    source.toggle_collapsed(2).unwrap();
    assert_eq!(state.selected(), Some(5));
    assert_eq!(state.selected_row(&source), Some(2));

    source.toggle_collapsed(2).unwrap();
    assert_eq!(state.selected_row(&source), Some(5));
}

#[test]
fn toggle_selected_works() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    assert!(!state.toggle_selected(&mut source));

    state.select_visible_index(&source, 2);
    assert!(state.toggle_selected(&mut source));
    assert_eq!(source.row_count(), 4);
    assert!(state.toggle_selected(&mut source));
    assert_eq!(source.row_count(), 9);
}

#[test]
fn toggle_selected_on_hidden_selection_toggles_ancestor() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_visible_index(&source, 5);
    source.toggle_collapsed(2).unwrap();

    assert!(state.toggle_selected(&mut source));
    assert_eq!(state.selected(), Some(2));
    assert_eq!(source.row_count(), 9);
}

#[test]
fn key_left_collapses_then_moves_to_parent() {
    let root = Node::example();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_visible_index(&source, 4);

    assert!(state.key_left(&mut source));
    assert!(source.record_at(4).unwrap().is_collapsed());
    assert_eq!(state.selected(), Some(4));

    assert!(state.key_left(&mut source));
    assert_eq!(state.selected(), Some(2));

    assert!(state.key_left(&mut source));
    assert!(state.key_left(&mut source));
    assert_eq!(state.selected(), Some(0));
}

#[test]
fn key_left_on_collapsed_root_does_nothing() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_first(&source);
    assert!(state.key_left(&mut source));
    assert!(!state.key_left(&mut source));
}

#[test]
fn key_right_expands() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_visible_index(&source, 1);
    assert!(!state.key_right(&mut source));
    source.toggle_collapsed(1).unwrap();
    assert!(state.key_right(&mut source));
    assert_eq!(source.row_count(), 4);
}

#[test]
fn scroll_works() {
    let mut state = HierarchyState::default();
    assert!(!state.scroll_up(1));
    assert!(state.scroll_down(3));
    assert!(state.scroll_up(1));
    assert_eq!(state.get_offset(), 2);
}
