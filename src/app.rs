use std::path::Path;

use eframe::egui;

use crate::state::{AppState, DEFAULT_DATA_DIR};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BrickscopeApp {
    pub state: AppState,
}

impl BrickscopeApp {
    /// Create the app, loading the default `data/` directory when present.
    pub fn new() -> Self {
        let mut state = AppState::default();
        let default_dir = Path::new(DEFAULT_DATA_DIR);
        if default_dir.is_dir() {
            state.load_catalog_dir(default_dir);
        }
        Self { state }
    }
}

impl Default for BrickscopeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for BrickscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis picker ----
        egui::SidePanel::left("analysis_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected analysis ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::central_view(ui, &mut self.state);
        });
    }
}
