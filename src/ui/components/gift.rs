use eframe::egui;

/// Account number with a copy button. Returns true when copy was requested.
pub fn render(ui: &mut egui::Ui, account_number: &str) -> bool {
    let mut copy = false;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(account_number).monospace());
        if ui.button("Salin").clicked() {
            copy = true;
        }
    });
    copy
}
