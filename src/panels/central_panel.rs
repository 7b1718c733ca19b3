use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::app::FacilityApp;
use crate::grid::{CellType, Position};
use crate::input::{self, CanvasEvent};

pub fn central_panel(app: &mut FacilityApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let (cell, size) = {
                let layout = app.editor.layout();
                let cell = layout.cell_size as f32;
                (
                    cell,
                    Vec2::new(
                        layout.grid_size.width as f32 * cell,
                        layout.grid_size.height as f32 * cell,
                    ),
                )
            };
            let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());

            let modifiers = ctx.input(|i| i.modifiers);
            let events = input::collect_events(&response, app.editor.layout(), modifiers);
            for event in events {
                input::route_event(&mut app.editor, event);

                // Plain clicks both select and paint with the armed tool;
                // modified clicks only adjust the selection.
                if let CanvasEvent::Clicked {
                    pos,
                    ctrl: false,
                    shift: false,
                } = event
                {
                    let tool = app.editor.selected_tool();
                    app.editor.set_cell_type(pos, tool);
                }
            }

            draw_grid(app, &painter, response.rect, cell);
        });
    });
}

fn cell_rect(canvas: Rect, pos: Position, cell: f32) -> Rect {
    Rect::from_min_size(
        canvas.min + Vec2::new(pos.x as f32 * cell, pos.y as f32 * cell),
        Vec2::splat(cell),
    )
}

fn fill_color(kind: CellType) -> Color32 {
    match kind {
        CellType::Empty => Color32::TRANSPARENT,
        CellType::Seat => Color32::from_rgb(0x4c, 0xaf, 0x50),
        CellType::Object => Color32::from_rgb(0xff, 0x98, 0x00),
        CellType::Wall => Color32::from_rgb(0x45, 0x4b, 0x54),
        CellType::Pillar => Color32::from_rgb(0x90, 0xa4, 0xae),
        CellType::Entrance => Color32::from_rgb(0x21, 0x96, 0xf3),
    }
}

fn draw_grid(app: &FacilityApp, painter: &egui::Painter, canvas: Rect, cell: f32) {
    let layout = app.editor.layout();

    painter.rect_filled(canvas, 0.0, Color32::from_gray(30));

    let grid_stroke = Stroke::new(1.0, Color32::from_gray(60));
    for x in 0..=layout.grid_size.width {
        let x_px = canvas.min.x + x as f32 * cell;
        painter.line_segment(
            [Pos2::new(x_px, canvas.min.y), Pos2::new(x_px, canvas.max.y)],
            grid_stroke,
        );
    }
    for y in 0..=layout.grid_size.height {
        let y_px = canvas.min.y + y as f32 * cell;
        painter.line_segment(
            [Pos2::new(canvas.min.x, y_px), Pos2::new(canvas.max.x, y_px)],
            grid_stroke,
        );
    }

    for c in &layout.cells {
        let rect = cell_rect(canvas, c.position(), cell).shrink(1.0);
        painter.rect_filled(rect, 2.0, fill_color(c.kind));
        if cell >= 28.0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &c.name,
                FontId::proportional(10.0),
                Color32::WHITE,
            );
        }
    }

    let selection_stroke = Stroke::new(2.0, Color32::from_rgb(0xff, 0xeb, 0x3b));
    for &pos in app.editor.selection().positions() {
        painter.rect_stroke(cell_rect(canvas, pos, cell).shrink(1.0), 2.0, selection_stroke);
    }

    if let Some((a, b)) = app.editor.drag_preview() {
        let rect = cell_rect(canvas, a, cell).union(cell_rect(canvas, b, cell));
        painter.rect_stroke(rect, 0.0, Stroke::new(1.5, Color32::from_rgb(0x80, 0xd8, 0xff)));
    }
}
