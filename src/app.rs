use crate::editor::FacilityEditor;
use crate::grid::{Layout, Position};
use crate::input;
use crate::panels;
use crate::persistence::LayoutStore;

/// Top-level eframe application wrapping one editor session.
///
/// The current layout is persisted through `eframe::Storage` so it
/// survives an app restart; everything else (selection, drag, history) is
/// session state and starts fresh, like any editing session.
pub struct FacilityApp {
    pub(crate) editor: FacilityEditor,
    pub(crate) store: LayoutStore,

    // Panel edit buffers. Committed to the editor on their Apply/Save
    // buttons, never implicitly.
    pub(crate) grid_width_edit: i32,
    pub(crate) grid_height_edit: i32,
    pub(crate) cell_size_edit: i32,
    pub(crate) name_edit: String,
    pub(crate) rename_target: Option<Position>,
    pub(crate) save_name: String,
    pub(crate) status: Option<String>,
}

impl FacilityApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let layout: Layout = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        Self::with_layout(layout)
    }

    pub fn with_layout(layout: Layout) -> Self {
        let grid_size = layout.grid_size;
        let cell_size = layout.cell_size;
        Self {
            editor: FacilityEditor::with_layout(layout),
            store: LayoutStore::new("layouts"),
            grid_width_edit: grid_size.width,
            grid_height_edit: grid_size.height,
            cell_size_edit: cell_size,
            name_edit: String::new(),
            rename_target: None,
            save_name: String::new(),
            status: None,
        }
    }

    pub fn editor(&self) -> &FacilityEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut FacilityEditor {
        &mut self.editor
    }

    /// Replaces the whole session with a layout loaded from the store.
    pub(crate) fn load_layout(&mut self, name: &str) {
        match self.store.load(name) {
            Ok(layout) => {
                log::info!("Loaded layout '{name}'");
                *self = Self::with_layout(layout);
                self.save_name = name.to_owned();
                self.status = Some(format!("Loaded '{name}'"));
            }
            Err(err) => {
                log::warn!("Could not load layout '{name}': {err}");
                self.status = Some(format!("Load failed: {err}"));
            }
        }
    }

    pub(crate) fn save_layout(&mut self, name: &str) {
        match self.store.save(name, self.editor.layout()) {
            Ok(()) => {
                log::info!("Saved layout '{name}'");
                self.status = Some(format!("Saved '{name}'"));
            }
            Err(err) => {
                log::warn!("Could not save layout '{name}': {err}");
                self.status = Some(format!("Save failed: {err}"));
            }
        }
    }
}

impl eframe::App for FacilityApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.editor.layout());
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        input::handle_keyboard(&mut self.editor, ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);
    }
}
