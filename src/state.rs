use std::path::Path;

use crate::data::loader;
use crate::data::model::Catalog;

/// Directory probed on startup, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// The catalog dumps usually end mid-year, so the last entries of every
/// time series are partial. Trimming hides this many trailing years.
pub const TRAILING_YEARS_TRIMMED: usize = 2;

// ---------------------------------------------------------------------------
// Analysis views
// ---------------------------------------------------------------------------

/// Which analysis the central panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisView {
    Overview,
    Colors,
    TopSets,
    SetsPerYear,
    ThemesPerYear,
    SetsAndThemes,
    PartsPerSet,
    TopThemes,
    ThemeSearch,
}

impl AnalysisView {
    pub const ALL: [AnalysisView; 9] = [
        AnalysisView::Overview,
        AnalysisView::Colors,
        AnalysisView::TopSets,
        AnalysisView::SetsPerYear,
        AnalysisView::ThemesPerYear,
        AnalysisView::SetsAndThemes,
        AnalysisView::PartsPerSet,
        AnalysisView::TopThemes,
        AnalysisView::ThemeSearch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisView::Overview => "Overview",
            AnalysisView::Colors => "Colors",
            AnalysisView::TopSets => "Largest sets",
            AnalysisView::SetsPerYear => "Sets per year",
            AnalysisView::ThemesPerYear => "Themes per year",
            AnalysisView::SetsAndThemes => "Sets & themes",
            AnalysisView::PartsPerSet => "Parts per set",
            AnalysisView::TopThemes => "Top themes",
            AnalysisView::ThemeSearch => "Theme search",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded catalog (None until a data directory is loaded).
    pub catalog: Option<Catalog>,

    /// Analysis shown in the central panel.
    pub view: AnalysisView,

    /// Hide the trailing partial years in every time series.
    pub trim_trailing_years: bool,

    /// Number of themes shown in the top-themes bar chart.
    pub top_themes: usize,

    /// Current theme-search query.
    pub theme_query: String,

    /// Theme whose sets are listed in the search view.
    pub selected_theme: Option<u32>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a catalog loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: None,
            view: AnalysisView::Overview,
            trim_trailing_years: true,
            top_themes: 10,
            theme_query: String::new(),
            selected_theme: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded catalog and reset per-catalog selections.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.selected_theme = None;
        self.catalog = Some(catalog);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a catalog directory, surfacing failures as a status message.
    pub fn load_catalog_dir(&mut self, dir: &Path) {
        self.loading = true;
        match loader::load_catalog(dir) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} colors, {} themes, {} sets from {}",
                    catalog.colors.len(),
                    catalog.themes.len(),
                    catalog.sets.len(),
                    dir.display()
                );
                self.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load catalog: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }
}
