use std::time::Duration;

use client_core::AnalysisSession;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::TradingDate;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::submit_analysis, reducer::apply_ui_event,
};
use crate::ui::{
    input_panel::{input_panel_view, show_input_panel, DateDrafts, InputAction},
    results_panel::{results_view, show_results_panel},
};

pub const APP_TITLE: &str = "F&O Stock Analyzer";

pub struct AnalyzerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    session: AnalysisSession,
    drafts: DateDrafts,

    api_base_url: String,
    status: String,
}

impl AnalyzerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: AnalysisSession::new(),
            drafts: DateDrafts::default(),
            api_base_url,
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.session, &mut self.status, event);
        }
    }

    fn apply_input_action(&mut self, action: InputAction) {
        match action {
            InputAction::DateEdited { field, text } => {
                self.session.set_date(field, TradingDate::parse(&text));
                self.drafts.set(field, text);
            }
            InputAction::Submit => {
                submit_analysis(&mut self.session, &self.cmd_tx, &mut self.status);
            }
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading(APP_TITLE);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.api_base_url).weak());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let actions = show_input_panel(ui, &input_panel_view(&self.session, &self.drafts));
                for action in actions {
                    self.apply_input_action(action);
                }

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                show_results_panel(ui, &results_view(self.session.state()));
            });
        });

        if self.session.state().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::RequestState;
    use crossbeam_channel::bounded;
    use shared::{
        domain::{AnalysisResult, DateField},
        error::AnalysisError,
    };

    use super::*;

    fn app() -> (AnalyzerApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let app = AnalyzerApp::new(cmd_tx, ui_rx, "http://localhost:5001".to_string());
        (app, cmd_rx, ui_tx)
    }

    fn edit(app: &mut AnalyzerApp, field: DateField, text: &str) {
        app.apply_input_action(InputAction::DateEdited {
            field,
            text: text.to_string(),
        });
    }

    #[test]
    fn incomplete_date_text_leaves_field_unset() {
        let (mut app, _cmd_rx, _ui_tx) = app();

        edit(&mut app, DateField::Previous, "2025-05");

        assert_eq!(app.drafts.previous, "2025-05");
        assert_eq!(app.session.selection().previous, None);

        edit(&mut app, DateField::Previous, "2025-05-16");
        assert_eq!(
            app.session.selection().previous,
            TradingDate::parse("2025-05-16")
        );
    }

    #[test]
    fn full_cycle_through_backend_events() {
        let (mut app, cmd_rx, ui_tx) = app();
        edit(&mut app, DateField::Previous, "2025-05-16");
        edit(&mut app, DateField::Current, "2025-05-17");

        app.apply_input_action(InputAction::Submit);
        assert!(app.session.state().is_loading());
        assert!(cmd_rx.try_recv().is_ok());

        let result = AnalysisResult {
            processed_count: 150,
            ..AnalysisResult::default()
        };
        ui_tx
            .send(UiEvent::AnalysisCompleted(Ok(result.clone())))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.session.state(), &RequestState::Succeeded(result));
    }

    #[test]
    fn forced_submit_without_dates_sends_nothing() {
        let (mut app, cmd_rx, _ui_tx) = app();

        app.apply_input_action(InputAction::Submit);

        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(
            app.session.state(),
            &RequestState::Failed(AnalysisError::MissingDates)
        );
    }
}
