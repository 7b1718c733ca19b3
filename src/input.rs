use egui::{Key, Modifiers, Pos2, Rect, Response};

use crate::editor::FacilityEditor;
use crate::grid::{CellType, Layout, Position};

/// Pointer activity on the grid canvas, expressed in grid terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    Clicked {
        pos: Position,
        ctrl: bool,
        shift: bool,
    },
    RightClicked {
        pos: Position,
    },
    DragStarted {
        pos: Position,
    },
    DragMoved {
        pos: Position,
    },
    DragEnded,
}

/// Maps a canvas-space point to the grid cell under it. Points in the
/// canvas margin past the last row/column map to `None`.
pub fn hit_test(layout: &Layout, canvas: Rect, point: Pos2) -> Option<Position> {
    let cell = layout.cell_size as f32;
    let rel = point - canvas.min;
    if rel.x < 0.0 || rel.y < 0.0 {
        return None;
    }
    let pos = Position::new((rel.x / cell) as i32, (rel.y / cell) as i32);
    layout.contains(pos).then_some(pos)
}

/// Turns one frame of egui response state on the canvas into canvas
/// events. egui already distinguishes clicks from drags, so the two never
/// fire for the same press.
pub fn collect_events(
    response: &Response,
    layout: &Layout,
    modifiers: Modifiers,
) -> Vec<CanvasEvent> {
    let mut events = Vec::new();
    let canvas = response.rect;
    let hit = |point: Option<Pos2>| point.and_then(|p| hit_test(layout, canvas, p));

    if response.drag_started() {
        if let Some(pos) = hit(response.interact_pointer_pos()) {
            events.push(CanvasEvent::DragStarted { pos });
        }
    } else if response.dragged() {
        if let Some(pos) = hit(response.interact_pointer_pos()) {
            events.push(CanvasEvent::DragMoved { pos });
        }
    }
    if response.drag_stopped() {
        events.push(CanvasEvent::DragEnded);
    }

    if response.clicked() {
        if let Some(pos) = hit(response.interact_pointer_pos()) {
            events.push(CanvasEvent::Clicked {
                pos,
                ctrl: modifiers.command,
                shift: modifiers.shift,
            });
        }
    }
    if response.secondary_clicked() {
        if let Some(pos) = hit(response.interact_pointer_pos()) {
            events.push(CanvasEvent::RightClicked { pos });
        }
    }

    events
}

/// Routes one canvas event to the matching editor entry point.
pub fn route_event(editor: &mut FacilityEditor, event: CanvasEvent) {
    match event {
        CanvasEvent::Clicked { pos, ctrl, shift } => editor.handle_cell_click(pos, ctrl, shift),
        CanvasEvent::RightClicked { pos } => editor.handle_cell_right_click(pos),
        CanvasEvent::DragStarted { pos } => editor.handle_drag_start(pos),
        CanvasEvent::DragMoved { pos } => editor.handle_drag_move(pos),
        CanvasEvent::DragEnded => editor.handle_drag_end(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyActions {
    undo: bool,
    redo: bool,
    erase: bool,
    arrow: Option<(i32, i32)>,
    extend: bool,
}

/// Global keyboard bindings: arrows move the cursor (shift extends the
/// selection rectangle), Delete/Backspace erases the selection, Ctrl+Z /
/// Ctrl+Shift+Z / Ctrl+Y drive undo and redo. Skipped whenever a text
/// field has keyboard focus.
pub fn handle_keyboard(editor: &mut FacilityEditor, ctx: &egui::Context) {
    if ctx.wants_keyboard_input() {
        return;
    }

    let actions = ctx.input(|i| {
        let arrow = if i.key_pressed(Key::ArrowLeft) {
            Some((-1, 0))
        } else if i.key_pressed(Key::ArrowRight) {
            Some((1, 0))
        } else if i.key_pressed(Key::ArrowUp) {
            Some((0, -1))
        } else if i.key_pressed(Key::ArrowDown) {
            Some((0, 1))
        } else {
            None
        };
        KeyActions {
            undo: i.modifiers.command && !i.modifiers.shift && i.key_pressed(Key::Z),
            redo: (i.modifiers.command && i.modifiers.shift && i.key_pressed(Key::Z))
                || (i.modifiers.command && i.key_pressed(Key::Y)),
            erase: i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace),
            arrow,
            extend: i.modifiers.shift,
        }
    });

    if actions.undo {
        editor.undo();
    }
    if actions.redo {
        editor.redo();
    }
    if actions.erase && !editor.selection().is_empty() {
        let selected: Vec<Position> = editor.selection().positions().to_vec();
        editor.set_cells_type(&selected, CellType::Empty);
    }
    if let Some((dx, dy)) = actions.arrow {
        editor.handle_navigate(dx, dy, actions.extend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(400.0, 400.0))
    }

    #[test]
    fn hit_test_maps_canvas_points_to_cells() {
        let layout = Layout::default(); // 10x10, 40px cells

        assert_eq!(
            hit_test(&layout, canvas(), pos2(100.0, 50.0)),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            hit_test(&layout, canvas(), pos2(185.0, 135.0)),
            Some(Position::new(2, 2))
        );
        assert_eq!(
            hit_test(&layout, canvas(), pos2(499.0, 449.0)),
            Some(Position::new(9, 9))
        );
    }

    #[test]
    fn hit_test_rejects_points_outside_the_grid() {
        let layout = Layout::default();

        assert_eq!(hit_test(&layout, canvas(), pos2(99.0, 60.0)), None);
        assert_eq!(hit_test(&layout, canvas(), pos2(110.0, 49.0)), None);
        assert_eq!(hit_test(&layout, canvas(), pos2(501.0, 60.0)), None);
    }

    #[test]
    fn route_event_drives_the_drag_machine() {
        let mut editor = FacilityEditor::new();

        route_event(&mut editor, CanvasEvent::DragStarted { pos: Position::new(1, 1) });
        route_event(&mut editor, CanvasEvent::DragMoved { pos: Position::new(2, 2) });
        route_event(&mut editor, CanvasEvent::DragEnded);

        assert_eq!(editor.selection().len(), 4);
        assert_eq!(editor.last_selected(), Some(Position::new(2, 2)));
    }

    #[test]
    fn route_event_right_click_erases() {
        let mut editor = FacilityEditor::new();
        editor.set_cell_type(Position::new(0, 0), CellType::Wall);

        route_event(&mut editor, CanvasEvent::RightClicked { pos: Position::new(0, 0) });
        assert!(editor.layout().cells.is_empty());
    }
}
