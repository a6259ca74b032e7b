//! UI layer: app shell plus the two stateless panels it drives.

pub mod app;
pub mod input_panel;
pub mod results_panel;

pub use app::AnalyzerApp;
