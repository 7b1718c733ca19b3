use facility_editor::grid::{MAX_CELL_SIZE, MIN_CELL_SIZE, MIN_GRID_SIZE};
use facility_editor::history::MAX_HISTORY_SIZE;
use facility_editor::{CellType, FacilityEditor, Position};

// Helper to paint a few cells so tests start from a non-trivial layout.
fn editor_with_cells() -> FacilityEditor {
    let mut editor = FacilityEditor::new();
    editor.set_cell_type(Position::new(0, 0), CellType::Seat);
    editor.set_cell_type(Position::new(3, 1), CellType::Wall);
    editor.set_cell_type(Position::new(7, 7), CellType::Pillar);
    editor
}

#[test]
fn at_most_one_cell_per_position() {
    let mut editor = FacilityEditor::new();
    let pos = Position::new(2, 2);

    editor.set_cell_type(pos, CellType::Seat);
    editor.set_cell_type(pos, CellType::Wall);
    editor.set_cells_type(&[pos, Position::new(3, 3), pos], CellType::Object);

    let occupied: Vec<Position> = editor
        .layout()
        .cells
        .iter()
        .map(|cell| cell.position())
        .collect();
    let mut deduped = occupied.clone();
    deduped.sort_by_key(|p| (p.y, p.x));
    deduped.dedup();
    assert_eq!(occupied.len(), deduped.len());

    assert_eq!(editor.layout().cell_at(pos).unwrap().kind, CellType::Object);
}

#[test]
fn shrinking_the_grid_prunes_out_of_bounds_cells() {
    let mut editor = editor_with_cells();

    editor.set_grid_size(5, 5);

    let layout = editor.layout();
    assert_eq!(layout.grid_size.width, 5);
    assert_eq!(layout.grid_size.height, 5);
    assert!(layout.cell_at(Position::new(7, 7)).is_none());
    for cell in &layout.cells {
        assert!(cell.x >= 0 && cell.x < 5);
        assert!(cell.y >= 0 && cell.y < 5);
    }
}

#[test]
fn undo_then_redo_restores_exact_layouts() {
    let mut editor = editor_with_cells();
    let before = editor.layout().clone();

    editor.set_cell_type(Position::new(5, 5), CellType::Entrance);
    let after = editor.layout().clone();
    assert_ne!(before, after);

    editor.undo();
    assert_eq!(editor.layout(), &before);

    editor.redo();
    assert_eq!(editor.layout(), &after);
}

#[test]
fn new_action_after_undo_discards_redo_states() {
    let mut editor = FacilityEditor::new();
    editor.set_cell_type(Position::new(0, 0), CellType::Seat);
    editor.set_cell_type(Position::new(1, 0), CellType::Seat);

    editor.undo();
    assert!(editor.can_redo());

    editor.set_cell_type(Position::new(2, 0), CellType::Wall);
    assert!(!editor.can_redo());

    let current = editor.layout().clone();
    editor.redo();
    assert_eq!(editor.layout(), &current);
}

#[test]
fn history_is_capped_with_oldest_eviction() {
    let mut editor = FacilityEditor::new();
    for i in 0..(MAX_HISTORY_SIZE + 20) {
        editor.set_cell_type(Position::new((i % 10) as i32, 0), CellType::Seat);
    }

    let (index, total) = editor.history_position();
    assert_eq!(total, MAX_HISTORY_SIZE);
    assert_eq!(index, MAX_HISTORY_SIZE - 1);
    assert!(!editor.can_redo());
    assert!(editor.can_undo());
}

#[test]
fn batch_paint_is_one_undo_step() {
    let mut editor = FacilityEditor::new();
    let targets = [
        Position::new(0, 0),
        Position::new(1, 0),
        Position::new(2, 0),
    ];
    editor.set_cells_type(&targets, CellType::Pillar);
    assert_eq!(editor.layout().cells.len(), 3);

    // Counted names advance within the batch.
    assert_eq!(editor.layout().cell_at(targets[0]).unwrap().name, "Pillar 1");
    assert_eq!(editor.layout().cell_at(targets[2]).unwrap().name, "Pillar 3");

    editor.undo();
    assert!(editor.layout().cells.is_empty());
}

#[test]
fn batch_paint_skips_out_of_bounds_members() {
    let mut editor = FacilityEditor::new();
    editor.set_cells_type(
        &[Position::new(0, 0), Position::new(50, 50)],
        CellType::Wall,
    );

    assert_eq!(editor.layout().cells.len(), 1);
    assert!(editor.layout().cell_at(Position::new(0, 0)).is_some());
}

#[test]
fn renaming_a_missing_cell_is_a_no_op() {
    let mut editor = FacilityEditor::new();
    editor.set_cell_name(Position::new(4, 4), "ghost");

    assert!(editor.layout().cells.is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn cell_and_grid_sizes_clamp_to_bounds() {
    let mut editor = FacilityEditor::new();

    editor.set_cell_size(5000);
    assert_eq!(editor.layout().cell_size, MAX_CELL_SIZE);
    editor.set_cell_size(1);
    assert_eq!(editor.layout().cell_size, MIN_CELL_SIZE);

    editor.set_grid_size(0, 1000);
    assert_eq!(editor.layout().grid_size.width, MIN_GRID_SIZE);
    assert_eq!(editor.layout().grid_size.height, 50);
}

// The full scenario from the editor's contract: paint, rename, repaint
// with the same type (which resets the name), then walk history back to
// the blank grid.
#[test]
fn repaint_rename_undo_scenario() {
    let mut editor = FacilityEditor::new();
    let pos = Position::new(0, 0);

    editor.set_cell_type(pos, CellType::Seat);
    assert_eq!(editor.layout().cell_at(pos).unwrap().name, "A1");

    editor.set_cell_name(pos, "VIP-1");
    assert_eq!(editor.layout().cell_at(pos).unwrap().name, "VIP-1");

    // Repainting with the unchanged type still regenerates the default
    // name, discarding the rename.
    editor.set_cell_type(pos, CellType::Seat);
    assert_eq!(editor.layout().cell_at(pos).unwrap().name, "A1");

    editor.undo();
    assert_eq!(editor.layout().cell_at(pos).unwrap().name, "VIP-1");

    editor.undo();
    assert_eq!(editor.layout().cell_at(pos).unwrap().name, "A1");

    editor.undo();
    assert!(editor.layout().cells.is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn undoing_a_resize_restores_cells_but_not_selection() {
    let mut editor = editor_with_cells();
    editor.select_cells(&[Position::new(7, 7), Position::new(0, 0)]);

    editor.set_grid_size(5, 5);

    // Selection pruned immediately, outside the history.
    assert_eq!(
        editor.selection().positions(),
        &[Position::new(0, 0)]
    );

    editor.undo();
    assert!(editor.layout().cell_at(Position::new(7, 7)).is_some());
    assert_eq!(
        editor.selection().positions(),
        &[Position::new(0, 0)]
    );
}
