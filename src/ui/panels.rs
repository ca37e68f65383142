use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AnalysisView, AppState};

// ---------------------------------------------------------------------------
// Left side panel – analysis picker
// ---------------------------------------------------------------------------

/// Render the left analysis panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analyses");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No catalog loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for view in AnalysisView::ALL {
                if ui
                    .selectable_label(state.view == view, view.label())
                    .clicked()
                {
                    state.view = view;
                }
            }

            ui.separator();
            ui.strong("Options");
            ui.add(egui::Slider::new(&mut state.top_themes, 5..=25).text("Top themes"));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalog folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} colors · {} themes · {} sets",
                catalog.colors.len(),
                catalog.themes.len(),
                catalog.sets.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.trim_trailing_years, "Trim partial years")
            .clicked()
        {
            state.trim_trailing_years = !state.trim_trailing_years;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open catalog folder")
        .pick_folder();

    if let Some(dir) = folder {
        state.load_catalog_dir(&dir);
    }
}
