//! Small reusable pieces: badge chips and section cards.

use client_core::view::{Badge, SectionCard};

fn badge_colors(badge: &Badge) -> (egui::Color32, egui::Color32) {
    match badge {
        Badge::Offence(_) | Badge::Subtype(_) | Badge::IpcEquivalent(_) => (
            egui::Color32::from_rgb(39, 46, 61),
            egui::Color32::from_rgb(215, 222, 235),
        ),
        Badge::Severity(_) => (
            egui::Color32::from_rgb(84, 32, 47),
            egui::Color32::from_rgb(253, 205, 214),
        ),
        Badge::SexualOffence => (
            egui::Color32::from_rgb(84, 30, 66),
            egui::Color32::from_rgb(252, 231, 243),
        ),
        Badge::PropertyOffence => (
            egui::Color32::from_rgb(86, 58, 20),
            egui::Color32::from_rgb(254, 243, 199),
        ),
        Badge::Weapon => (
            egui::Color32::from_rgb(91, 28, 28),
            egui::Color32::from_rgb(254, 226, 226),
        ),
        Badge::Victims(_) => (
            egui::Color32::from_rgb(22, 70, 52),
            egui::Color32::from_rgb(209, 250, 229),
        ),
    }
}

pub fn chip(ui: &mut egui::Ui, text: &str, fill: egui::Color32, color: egui::Color32) {
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().strong().color(color));
        });
}

pub fn badge_chip(ui: &mut egui::Ui, badge: &Badge) {
    let (fill, color) = badge_colors(badge);
    chip(ui, &badge.to_string(), fill, color);
}

pub fn section_card(ui: &mut egui::Ui, card: &SectionCard<'_>) {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(card.header.to_uppercase()).small().weak());
                    ui.label(egui::RichText::new(card.title).strong());
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    chip(
                        ui,
                        card.key,
                        egui::Color32::from_rgb(40, 44, 90),
                        egui::Color32::from_rgb(199, 210, 254),
                    );
                });
            });

            if !card.badges.is_empty() {
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    for badge in &card.badges {
                        badge_chip(ui, badge);
                    }
                });
            }

            if !card.snippet.is_empty() {
                ui.add_space(4.0);
                ui.add(egui::Label::new(egui::RichText::new(card.snippet.as_ref()).small()).wrap());
            }
        });
}
