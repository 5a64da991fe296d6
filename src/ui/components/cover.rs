use eframe::egui;

/// Cover screen. Returns true when the guest opens the invitation.
pub fn render(ui: &mut egui::Ui, recipient: Option<&str>) -> bool {
    let mut open = false;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading("Undangan");
        if let Some(name) = recipient {
            ui.label("Kepada Yth.");
            ui.label(egui::RichText::new(name).strong());
        }
        ui.add_space(20.0);
        if ui.button("Buka Undangan").clicked() {
            open = true;
        }
    });
    open
}
