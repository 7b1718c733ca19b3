use crate::app::FacilityApp;
use crate::grid::{
    CellType, MAX_CELL_SIZE, MAX_GRID_SIZE, MIN_CELL_SIZE, MIN_GRID_SIZE,
};

pub fn tools_panel(app: &mut FacilityApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            for tool in CellType::PALETTE {
                let is_selected = app.editor.selected_tool() == tool;
                if ui.selectable_label(is_selected, tool.label()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.label());
                    app.editor.set_selected_tool(tool);
                }
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.editor.can_undo();
                let can_redo = app.editor.can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.editor.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.editor.redo();
                }
            });
            let (position, total) = app.editor.history_position();
            ui.label(format!("History: {} of {}", position + 1, total));
            ui.separator();

            ui.heading("Grid");
            ui.horizontal(|ui| {
                ui.label("Size");
                ui.add(
                    egui::DragValue::new(&mut app.grid_width_edit)
                        .range(MIN_GRID_SIZE..=MAX_GRID_SIZE),
                );
                ui.label("x");
                ui.add(
                    egui::DragValue::new(&mut app.grid_height_edit)
                        .range(MIN_GRID_SIZE..=MAX_GRID_SIZE),
                );
                if ui.button("Apply").clicked() {
                    app.editor
                        .set_grid_size(app.grid_width_edit, app.grid_height_edit);
                }
            });
            ui.horizontal(|ui| {
                ui.label("Cell px");
                ui.add(
                    egui::DragValue::new(&mut app.cell_size_edit)
                        .range(MIN_CELL_SIZE..=MAX_CELL_SIZE),
                );
                if ui.button("Apply").clicked() {
                    app.editor.set_cell_size(app.cell_size_edit);
                }
            });
            ui.separator();

            selection_section(app, ui);
            ui.separator();

            layouts_section(app, ui);

            if let Some(status) = &app.status {
                ui.separator();
                ui.label(status.clone());
            }
        });
}

fn selection_section(app: &mut FacilityApp, ui: &mut egui::Ui) {
    ui.heading("Selection");
    ui.label(format!("{} cell(s) selected", app.editor.selection().len()));

    let has_selection = !app.editor.selection().is_empty();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_selection, egui::Button::new("Fill"))
            .clicked()
        {
            let tool = app.editor.selected_tool();
            let positions = app.editor.selection().positions().to_vec();
            app.editor.set_cells_type(&positions, tool);
        }
        if ui
            .add_enabled(has_selection, egui::Button::new("Erase"))
            .clicked()
        {
            let positions = app.editor.selection().positions().to_vec();
            app.editor.set_cells_type(&positions, CellType::Empty);
        }
        if ui
            .add_enabled(has_selection, egui::Button::new("Clear"))
            .clicked()
        {
            app.editor.clear_selection();
        }
    });

    // Rename applies to a single selected, occupied cell.
    let target = match app.editor.selection().positions() {
        &[pos] => app.editor.layout().cell_at(pos).map(|cell| (pos, cell.name.clone())),
        _ => None,
    };
    match target {
        Some((pos, name)) => {
            if app.rename_target != Some(pos) {
                app.rename_target = Some(pos);
                app.name_edit = name;
            }
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut app.name_edit);
                if ui.button("Rename").clicked() {
                    app.editor.set_cell_name(pos, app.name_edit.clone());
                }
            });
        }
        None => {
            app.rename_target = None;
        }
    }
}

fn layouts_section(app: &mut FacilityApp, ui: &mut egui::Ui) {
    ui.heading("Layouts");
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.save_name);
        let can_save = !app.save_name.trim().is_empty();
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            let name = app.save_name.trim().to_owned();
            app.save_layout(&name);
        }
    });

    for name in app.store.list().unwrap_or_default() {
        ui.horizontal(|ui| {
            ui.label(&name);
            if ui.small_button("Load").clicked() {
                app.load_layout(&name);
            }
        });
    }
}
