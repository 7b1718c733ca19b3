use crate::grid::{CellType, GridSize, Layout, Position, MAX_CELL_SIZE, MIN_CELL_SIZE};
use crate::history::SnapshotHistory;
use crate::selection::{rect_between, Selection};

/// Pointer-drag state for rectangular selection.
///
/// Two states only: a drag either is not happening, or it is, with the
/// press position and the most recent pointer position (if the pointer has
/// moved at all). All transitions are synchronous calls from the embedding
/// UI's event handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        start: Position,
        end: Option<Position>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// One editing session over a facility layout: the layout itself (behind a
/// snapshot history), the current selection, the armed tool, and the drag
/// state machine.
///
/// Mutating operations clone the current layout, apply the change, and push
/// the result, so undo/redo restores whole layouts. Selection and drag
/// state are deliberately outside the history. Invalid inputs are clamped
/// or ignored, never reported: no method here returns an error or panics.
#[derive(Debug, Clone)]
pub struct FacilityEditor {
    history: SnapshotHistory,
    selection: Selection,
    last_selected: Option<Position>,
    drag: DragState,
    selected_tool: CellType,
}

impl Default for FacilityEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FacilityEditor {
    pub fn new() -> Self {
        Self::with_layout(Layout::default())
    }

    /// Starts a session from an existing layout (e.g. one loaded from
    /// disk). The given layout becomes the first history entry.
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            history: SnapshotHistory::new(layout),
            selection: Selection::new(),
            last_selected: None,
            drag: DragState::Idle,
            selected_tool: CellType::Seat,
        }
    }

    pub fn layout(&self) -> &Layout {
        self.history.current()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_selected(&self) -> Option<Position> {
        self.last_selected
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn selected_tool(&self) -> CellType {
        self.selected_tool
    }

    /// Arms a tool. No layout change and no history entry; the armed tool
    /// only matters to the UI layer that decides what paint calls to issue.
    pub fn set_selected_tool(&mut self, tool: CellType) {
        self.selected_tool = tool;
    }

    // --- layout mutation -------------------------------------------------

    /// Paints one cell. `Empty` erases. Out-of-bounds positions are
    /// ignored entirely (no history entry).
    pub fn set_cell_type(&mut self, pos: Position, kind: CellType) {
        if !self.layout().contains(pos) {
            return;
        }
        let mut next = self.layout().clone();
        next.place_cell(pos, kind);
        self.history.push(next);
    }

    /// Paints every given in-bounds position as one atomic batch: a single
    /// history entry, so one undo reverts the whole batch.
    pub fn set_cells_type(&mut self, positions: &[Position], kind: CellType) {
        let mut next = self.layout().clone();
        for &pos in positions {
            if next.contains(pos) {
                next.place_cell(pos, kind);
            }
        }
        self.history.push(next);
    }

    /// Renames the cell at `pos`. No-op (and no history entry) if no cell
    /// exists there.
    pub fn set_cell_name(&mut self, pos: Position, name: impl Into<String>) {
        if self.layout().cell_at(pos).is_none() {
            return;
        }
        let mut next = self.layout().clone();
        if let Some(cell) = next.cell_at_mut(pos) {
            cell.name = name.into();
        }
        self.history.push(next);
    }

    /// Sets the rendered cell size, clamped to the configured bounds.
    pub fn set_cell_size(&mut self, size: i32) {
        let mut next = self.layout().clone();
        next.cell_size = size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        self.history.push(next);
    }

    /// Resizes the grid, clamping each dimension independently and pruning
    /// cells that fall outside the new bounds. The selection is pruned too,
    /// but immediately and outside the history: undoing the resize brings
    /// the cells back, not the selection.
    pub fn set_grid_size(&mut self, width: i32, height: i32) {
        let mut next = self.layout().clone();
        next.grid_size = GridSize::clamped(width, height);
        next.prune_outside();
        self.history.push(next);

        let bounds = self.layout().grid_size;
        self.selection.retain(|pos| bounds.contains(pos));
    }

    // --- selection -------------------------------------------------------

    /// Selection entry point with three mutually exclusive modes:
    /// range-select (shift) spans a rectangle from the last-selected
    /// anchor, add-to-selection (ctrl) toggles membership, and plain click
    /// replaces the selection. In every mode `pos` becomes the new anchor.
    pub fn select_cell(&mut self, pos: Position, add_to_selection: bool, range_select: bool) {
        if range_select {
            let anchor = self.last_selected.unwrap_or(pos);
            self.selection.replace(rect_between(anchor, pos));
        } else if add_to_selection {
            self.selection.toggle(pos);
        } else {
            self.selection.replace([pos]);
        }
        self.last_selected = Some(pos);
    }

    /// Replaces the selection wholesale; the anchor becomes the last
    /// element of the given list.
    pub fn select_cells(&mut self, positions: &[Position]) {
        self.last_selected = positions.last().copied();
        self.selection.replace(positions.iter().copied());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.last_selected = None;
    }

    /// Pointer-click entry point. Ignored entirely while a drag is in
    /// progress. Selection only; painting is the caller's decision.
    pub fn handle_cell_click(&mut self, pos: Position, ctrl: bool, shift: bool) {
        if self.drag.is_dragging() {
            return;
        }
        self.select_cell(pos, ctrl, shift);
    }

    /// Right-click always erases the cell under the pointer, regardless of
    /// the current selection or armed tool.
    pub fn handle_cell_right_click(&mut self, pos: Position) {
        self.set_cell_type(pos, CellType::Empty);
    }

    // --- drag lifecycle --------------------------------------------------

    /// Begins a rectangular drag-selection. A new drag always starts from
    /// a fresh selection.
    pub fn handle_drag_start(&mut self, pos: Position) {
        self.drag = DragState::Dragging {
            start: pos,
            end: None,
        };
        self.selection.clear();
        self.last_selected = None;
    }

    /// Updates the drag endpoint. No-op when no drag is in progress.
    pub fn handle_drag_move(&mut self, pos: Position) {
        if let DragState::Dragging { end, .. } = &mut self.drag {
            *end = Some(pos);
        }
    }

    /// Ends the drag. A press-and-release without movement selects the
    /// single pressed cell; otherwise the inclusive rectangle between press
    /// and release becomes the selection.
    pub fn handle_drag_end(&mut self) {
        match self.drag {
            DragState::Idle => {}
            DragState::Dragging { start, end: None } => {
                self.selection.replace([start]);
                self.last_selected = Some(start);
            }
            DragState::Dragging {
                start,
                end: Some(end),
            } => {
                self.selection.replace(rect_between(start, end));
                self.last_selected = Some(end);
            }
        }
        self.drag = DragState::Idle;
    }

    /// The rectangle a drag in progress would select, for UI preview.
    pub fn drag_preview(&self) -> Option<(Position, Position)> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { start, end } => Some((start, end.unwrap_or(start))),
        }
    }

    // --- history ---------------------------------------------------------

    /// Steps the layout back one snapshot. Selection is untouched.
    pub fn undo(&mut self) {
        self.history.undo();
    }

    /// Steps the layout forward one snapshot. Selection is untouched.
    pub fn redo(&mut self) {
        self.history.redo();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo depth / total snapshot count, for the history readout.
    pub fn history_position(&self) -> (usize, usize) {
        (self.history.index(), self.history.len())
    }

    // --- keyboard navigation ---------------------------------------------

    /// Moves the virtual cursor by `(dx, dy)` from the current anchor
    /// (origin when there is none), clamped to the grid. With `extend` the
    /// selection becomes the rectangle from the selection's first element
    /// (the original start, not the previous cursor) to the new cursor;
    /// without it, just the cursor cell.
    pub fn handle_navigate(&mut self, dx: i32, dy: i32, extend: bool) {
        let cursor = self.last_selected.unwrap_or(Position::new(0, 0));
        let bounds = self.layout().grid_size;
        let next = Position::new(
            (cursor.x + dx).clamp(0, bounds.width - 1),
            (cursor.y + dy).clamp(0, bounds.height - 1),
        );

        if extend {
            let anchor = self.selection.first().unwrap_or(cursor);
            self.selection.replace(rect_between(anchor, next));
        } else {
            self.selection.replace([next]);
        }
        self.last_selected = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_is_ignored_mid_drag() {
        let mut editor = FacilityEditor::new();
        editor.handle_drag_start(Position::new(1, 1));
        editor.handle_cell_click(Position::new(5, 5), false, false);

        assert!(editor.selection().is_empty());
        assert_eq!(editor.last_selected(), None);
    }

    #[test]
    fn drag_start_clears_previous_selection() {
        let mut editor = FacilityEditor::new();
        editor.select_cell(Position::new(2, 2), false, false);
        assert_eq!(editor.selection().len(), 1);

        editor.handle_drag_start(Position::new(0, 0));
        assert!(editor.selection().is_empty());
        assert!(editor.drag().is_dragging());
    }

    #[test]
    fn drag_move_without_drag_is_a_no_op() {
        let mut editor = FacilityEditor::new();
        editor.handle_drag_move(Position::new(3, 3));
        assert_eq!(editor.drag(), DragState::Idle);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn out_of_bounds_paint_is_ignored() {
        let mut editor = FacilityEditor::new();
        editor.set_cell_type(Position::new(-1, 0), CellType::Seat);
        editor.set_cell_type(Position::new(0, 99), CellType::Seat);

        assert!(editor.layout().cells.is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn navigate_clamps_to_grid_bounds() {
        let mut editor = FacilityEditor::new();
        editor.handle_navigate(-3, -3, false);
        assert_eq!(editor.last_selected(), Some(Position::new(0, 0)));

        editor.handle_navigate(100, 100, false);
        assert_eq!(editor.last_selected(), Some(Position::new(9, 9)));
    }

    #[test]
    fn navigate_extend_keeps_the_original_anchor() {
        let mut editor = FacilityEditor::new();
        editor.select_cell(Position::new(2, 2), false, false);

        editor.handle_navigate(1, 0, true);
        editor.handle_navigate(1, 0, true);

        // Anchored at (2,2) throughout, not at the previous cursor.
        assert_eq!(
            editor.selection().positions(),
            &[
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(4, 2),
            ]
        );
        assert_eq!(editor.last_selected(), Some(Position::new(4, 2)));
    }

    #[test]
    fn arming_a_tool_does_not_touch_history() {
        let mut editor = FacilityEditor::new();
        editor.set_selected_tool(CellType::Pillar);
        assert_eq!(editor.selected_tool(), CellType::Pillar);
        assert!(!editor.can_undo());
    }
}
