use std::time::Duration;

use client_core::{
    view::{self, ExtractionPanel},
    RequestOrchestrator, Resolution, SampleSelector,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{
    error::{FailureKind, FailureNotice},
    protocol::ServiceStatus,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{describe_status_failure, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets;

const INPUT_HINT: &str =
    "Example: A drunk man slapped a woman on the road and threatened her with abuse...";

pub struct NyayaApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    orchestrator: RequestOrchestrator,
    samples: SampleSelector,

    base_url: String,
    status: String,
    service_status: Option<ServiceStatus>,
    startup_error: Option<UiError>,
}

impl NyayaApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, base_url: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            orchestrator: RequestOrchestrator::new(),
            samples: SampleSelector::new(),
            base_url,
            status: "Starting backend worker...".to_string(),
            service_status: None,
            startup_error: None,
        }
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.orchestrator
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady { base_url } => {
                    self.status = format!("Connected to {base_url}");
                    self.base_url = base_url;
                }
                UiEvent::AnalysisFinished {
                    request_id,
                    outcome,
                } => {
                    if let Resolution::Stale { current, .. } =
                        self.orchestrator.resolve(request_id, outcome)
                    {
                        tracing::debug!(%request_id, %current, "ignored stale analysis event");
                    }
                }
                UiEvent::StatusChecked(Ok(status)) => {
                    self.status = format!("Service status: {}", status.status);
                    self.service_status = Some(status);
                }
                UiEvent::StatusChecked(Err(message)) => {
                    self.status = describe_status_failure(&message);
                    self.service_status = None;
                }
                UiEvent::Error(err) => self.report(err),
            }
        }
    }

    pub fn analyze(&mut self) {
        let Some(pending) = self.orchestrator.submit() else {
            return;
        };
        let request_id = pending.request_id;
        let cmd = BackendCommand::Analyze {
            request_id,
            request: pending.request,
        };
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.orchestrator
                .fail(request_id, FailureNotice::generic(FailureKind::Transport));
            self.report(UiError::new(UiErrorContext::CommandQueue, message));
        }
    }

    pub fn clear(&mut self) {
        self.orchestrator.clear();
    }

    pub fn pick_sample(&mut self, index: usize) {
        match self.samples.pick(index) {
            Ok(text) => self.orchestrator.select_sample(text),
            Err(err) => self.status = err.to_string(),
        }
    }

    pub fn check_status(&mut self) {
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckStatus) {
            self.report(UiError::new(UiErrorContext::StatusCheck, message));
        }
    }

    fn report(&mut self, err: UiError) {
        tracing::error!(context = ?err.context(), "{}", err.message());
        self.status = err.message().to_string();
        if err.is_fatal() {
            self.startup_error = Some(err);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading("NyayaSahayak");
                    ui.weak("One-shot section suggester for BNS / IPC. Final decision always rests with the officer.");
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Check service").clicked() {
                        self.check_status();
                    }
                    ui.weak(format!("Request {}", self.orchestrator.request_id()));
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("Backend: {}", self.base_url));
                });
            });
        });
    }

    fn show_samples(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("samples")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("TRY SAMPLE INCIDENTS").small().strong());
                ui.add_space(4.0);
                let mut picked = None;
                for (index, sample) in self.samples.samples().iter().enumerate() {
                    if ui
                        .add(egui::Button::new(egui::RichText::new(*sample).small()).wrap())
                        .clicked()
                    {
                        picked = Some(index);
                    }
                }
                if let Some(index) = picked {
                    self.pick_sample(index);
                }

                ui.add_space(12.0);
                ui.separator();
                ui.label(egui::RichText::new("HOW OFFICERS CAN USE THIS").small().strong());
                ui.small("Type the incident in plain language; Hindi, Hinglish or English is okay.");
                ui.small("Use the suggested sections to draft the FIR.");
                ui.small("Prototype only; does not replace legal advice.");

                if let Some(status) = &self.service_status {
                    ui.add_space(12.0);
                    ui.separator();
                    ui.small(status.service.as_deref().unwrap_or("analysis service"));
                    if let Some(message) = &status.message {
                        ui.small(message);
                    }
                }
            });
    }

    fn show_incident_form(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Incident Description").strong());
        ui.weak("Mention who, what, where, and any weapons used.");
        ui.add(
            egui::TextEdit::multiline(self.orchestrator.input_mut())
                .hint_text(INPUT_HINT)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            let backend_usable = self.startup_error.is_none();
            let analyze_label = if self.orchestrator.is_pending() {
                "Analyzing..."
            } else {
                "Analyze Incident"
            };
            if ui
                .add_enabled(
                    self.orchestrator.can_submit() && backend_usable,
                    egui::Button::new(analyze_label),
                )
                .clicked()
            {
                self.analyze();
            }
            if ui
                .add_enabled(self.orchestrator.can_clear(), egui::Button::new("Clear"))
                .clicked()
            {
                self.clear();
            }
            if self.orchestrator.is_pending() {
                ui.add(egui::Spinner::new());
            }
        });
    }

    fn show_extraction(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("NLP EXTRACTION").small().strong());
        match view::extraction_panel(&self.orchestrator) {
            ExtractionPanel::Loading => {
                ui.weak(ExtractionPanel::LOADING_TEXT);
            }
            ExtractionPanel::Placeholder => {
                ui.weak(ExtractionPanel::PLACEHOLDER_TEXT);
            }
            ExtractionPanel::Extracted { tags, lemmas } => {
                ui.small("Normalized crime tags:");
                ui.horizontal_wrapped(|ui| {
                    if tags.is_empty() {
                        ui.weak(ExtractionPanel::NO_TAGS_TEXT);
                    }
                    for tag in tags {
                        widgets::chip(
                            ui,
                            tag,
                            egui::Color32::from_rgb(20, 60, 48),
                            egui::Color32::from_rgb(167, 243, 208),
                        );
                    }
                });
                if !lemmas.is_empty() {
                    ui.small("Debug lemmas (from text):");
                    let fill = ui.visuals().extreme_bg_color;
                    let color = ui.visuals().weak_text_color();
                    ui.horizontal_wrapped(|ui| {
                        for lemma in lemmas {
                            widgets::chip(ui, lemma, fill, color);
                        }
                    });
                }
            }
        }
    }

    fn show_error_banner(&self, ui: &mut egui::Ui) {
        let Some(message) = self.orchestrator.error_message() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
    }

    fn show_sections(&self, ui: &mut egui::Ui) {
        let Some(result) = self.orchestrator.result() else {
            return;
        };
        if !result.has_sections() {
            return;
        }
        // Keyed by request id so nothing from an earlier request is reused.
        ui.push_id(self.orchestrator.request_id().0, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Suggested Legal Sections").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(view::sections_summary(result.section_count()));
                });
            });
            for card in view::section_cards(result) {
                ui.push_id(card.key, |ui| widgets::section_card(ui, &card));
                ui.add_space(6.0);
            }
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_incident_form(ui);
                ui.add_space(10.0);
                self.show_extraction(ui);
                ui.add_space(10.0);
                self.show_error_banner(ui);
                ui.add_space(10.0);
                self.show_sections(ui);
            });
        });
    }
}

impl eframe::App for NyayaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        self.show_samples(ctx);
        self.show_main(ctx);

        if self.orchestrator.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
