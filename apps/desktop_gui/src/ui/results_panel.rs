//! Results view. `results_view` picks what to show from the request state; the egui
//! renderer only draws that model.

use client_core::RequestState;
use shared::domain::{AnalysisResult, StockChange};

pub const LOADING_TEXT: &str = "Loading analysis results...";
pub const WARNINGS_HEADING: &str = "API/Processing Errors Encountered:";
pub const WARNINGS_NOTE: &str = "Note: API errors are expected if the backend's test token date \
(e.g., 2025-05-17) does not match the selected dates. This may result in 'None' for price/OI \
data and empty filtered results. Also, symbol derivation issues or missing instrument keys will \
be reported here.";
pub const TABLE_HEADING: &str =
    "Stocks with >2% Absolute Price Change (9:20 AM vs Prev. Close):";
pub const NO_MATCHES_TEXT: &str =
    "No stocks met the >2% filter criteria based on the available data.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Loading,
    Failure { message: String },
    Report(ReportView),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportView {
    pub processed_line: Option<String>,
    /// Every warning, in order; empty means no warnings block.
    pub warnings: Vec<String>,
    /// Empty means the "no matches" message instead of a table.
    pub rows: Vec<StockRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRow {
    pub symbol: String,
    pub percent_change: String,
}

impl From<&StockChange> for StockRow {
    fn from(stock: &StockChange) -> Self {
        Self {
            symbol: stock.symbol.clone(),
            percent_change: format_percent_change(stock.percent_change),
        }
    }
}

pub fn format_percent_change(value: f64) -> String {
    format!("{value:.2}%")
}

/// Loading wins over failure, failure over the report. Idle renders an empty report.
pub fn results_view(state: &RequestState) -> ResultsView {
    match state {
        RequestState::Loading => ResultsView::Loading,
        RequestState::Failed(err) => ResultsView::Failure {
            message: err.to_string(),
        },
        RequestState::Succeeded(result) => ResultsView::Report(report_view(result)),
        RequestState::Idle => ResultsView::Report(report_view(&AnalysisResult::default())),
    }
}

fn report_view(result: &AnalysisResult) -> ReportView {
    ReportView {
        processed_line: (result.processed_count > 0)
            .then(|| format!("Total F&O Stocks Processed: {}", result.processed_count)),
        warnings: result.warnings.clone(),
        rows: result.filtered_stocks.iter().map(StockRow::from).collect(),
    }
}

pub fn show_results_panel(ui: &mut egui::Ui, view: &ResultsView) {
    match view {
        ResultsView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(LOADING_TEXT);
            });
        }
        ResultsView::Failure { message } => {
            ui.colored_label(ui.visuals().error_fg_color, format!("Error: {message}"));
        }
        ResultsView::Report(report) => show_report(ui, report),
    }
}

fn show_report(ui: &mut egui::Ui, report: &ReportView) {
    ui.heading("Analysis Results");
    if let Some(line) = &report.processed_line {
        ui.label(line.as_str());
    }

    if !report.warnings.is_empty() {
        ui.add_space(8.0);
        let warn_color = ui.visuals().warn_fg_color;
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, warn_color))
            .show(ui, |ui| {
                ui.strong(WARNINGS_HEADING);
                egui::ScrollArea::vertical()
                    .id_salt("analysis_warnings")
                    .max_height(150.0)
                    .show(ui, |ui| {
                        for warning in &report.warnings {
                            ui.colored_label(warn_color, format!("• {warning}"));
                        }
                    });
                ui.label(egui::RichText::new(WARNINGS_NOTE).small().weak());
            });
    }

    ui.add_space(8.0);
    if report.rows.is_empty() {
        ui.label(NO_MATCHES_TEXT);
        return;
    }

    ui.strong(TABLE_HEADING);
    egui::Grid::new("filtered_stocks")
        .striped(true)
        .num_columns(2)
        .min_col_width(160.0)
        .show(ui, |ui| {
            ui.strong("Stock Symbol");
            ui.strong("Percent Change");
            ui.end_row();
            for row in &report.rows {
                ui.label(row.symbol.as_str());
                ui.label(row.percent_change.as_str());
                ui.end_row();
            }
        });
}
