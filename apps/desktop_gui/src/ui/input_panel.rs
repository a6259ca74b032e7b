//! Date inputs and the fetch trigger. Holds no state: it renders what the controller
//! passes in and reports edits back as actions.

use client_core::AnalysisSession;
use shared::domain::DateField;

pub const SUBMIT_LABEL: &str = "Fetch Stock Analysis";
pub const SUBMIT_LABEL_LOADING: &str = "Fetching...";

/// Raw text of the two date inputs, owned by the app alongside the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateDrafts {
    pub previous: String,
    pub current: String,
}

impl DateDrafts {
    pub fn set(&mut self, field: DateField, text: String) {
        match field {
            DateField::Previous => self.previous = text,
            DateField::Current => self.current = text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPanelView<'a> {
    pub previous_text: &'a str,
    pub current_text: &'a str,
    pub inputs_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    DateEdited { field: DateField, text: String },
    Submit,
}

pub fn input_panel_view<'a>(
    session: &AnalysisSession,
    drafts: &'a DateDrafts,
) -> InputPanelView<'a> {
    let loading = session.state().is_loading();
    InputPanelView {
        previous_text: &drafts.previous,
        current_text: &drafts.current,
        inputs_enabled: !loading,
        submit_enabled: session.can_submit(),
        submit_label: if loading {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL
        },
    }
}

pub fn show_input_panel(ui: &mut egui::Ui, view: &InputPanelView<'_>) -> Vec<InputAction> {
    let mut actions = Vec::new();

    ui.heading("Select Dates for Analysis");
    ui.add_space(6.0);

    egui::Grid::new("date_inputs")
        .num_columns(2)
        .spacing([10.0, 10.0])
        .show(ui, |ui| {
            for (field, label, text) in [
                (
                    DateField::Previous,
                    "Previous Trading Date:",
                    view.previous_text,
                ),
                (
                    DateField::Current,
                    "Current Trading Date (for 9:20 AM data):",
                    view.current_text,
                ),
            ] {
                ui.label(label);
                let mut buf = text.to_string();
                let response = ui.add_enabled(
                    view.inputs_enabled,
                    egui::TextEdit::singleline(&mut buf)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(140.0),
                );
                if response.changed() {
                    actions.push(InputAction::DateEdited { field, text: buf });
                }
                ui.end_row();
            }
        });

    ui.add_space(12.0);
    let button = egui::Button::new(egui::RichText::new(view.submit_label).strong())
        .min_size(egui::vec2(180.0, 32.0));
    if ui.add_enabled(view.submit_enabled, button).clicked() {
        actions.push(InputAction::Submit);
    }

    actions
}
