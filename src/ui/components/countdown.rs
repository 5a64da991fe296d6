use eframe::egui;

use crate::invitation::Countdown;

pub fn render(ui: &mut egui::Ui, countdown: &Countdown) {
    let [days, hours, minutes, seconds] = countdown.padded();
    ui.horizontal(|ui| {
        for (value, unit) in [
            (days, "Hari"),
            (hours, "Jam"),
            (minutes, "Menit"),
            (seconds, "Detik"),
        ] {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(value).size(28.0).strong());
                ui.label(egui::RichText::new(unit).weak());
            });
            ui.add_space(12.0);
        }
    });
}
