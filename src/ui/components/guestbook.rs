use eframe::egui;

use crate::common::GuestMessage;
use crate::ui::form::GuestbookForm;
use crate::view::{EMPTY_PLACEHOLDER, count_label, format_time};

#[derive(Default)]
pub struct GuestbookActions {
    pub submit: bool,
    pub clear: bool,
}

pub fn render(
    ui: &mut egui::Ui,
    form: &mut GuestbookForm,
    entries: &[GuestMessage],
) -> GuestbookActions {
    let mut actions = GuestbookActions::default();

    ui.label("Nama");
    ui.text_edit_singleline(&mut form.name);
    ui.label("Ucapan");
    ui.text_edit_multiline(&mut form.message);
    ui.label(egui::RichText::new(format!("{} karakter", form.char_count())).weak());

    ui.horizontal(|ui| {
        if ui.button("Kirim Ucapan").clicked() {
            actions.submit = true;
        }
        if ui.button("Hapus Semua").clicked() {
            actions.clear = true;
        }
    });

    ui.separator();
    ui.label(count_label(entries.len()));

    if entries.is_empty() {
        ui.label(egui::RichText::new(EMPTY_PLACEHOLDER).weak());
        return actions;
    }

    egui::ScrollArea::vertical()
        .max_height(320.0)
        .show(ui, |ui| {
            for entry in entries {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&entry.name).strong());
                        ui.label(egui::RichText::new(format_time(entry.timestamp)).weak());
                    });
                    ui.label(&entry.message);
                });
            }
        });

    actions
}
