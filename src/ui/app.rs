use chrono::{DateTime, FixedOffset, Utc};
use eframe::egui;
use std::time::Instant;

use crate::invitation::{
    ClipboardError, ClipboardSink, Countdown, CopyOutcome, SystemClipboard, copy_text,
};
use crate::storage::{GuestbookStore, SlotStorage};

use super::components::{countdown, cover, gift, guestbook};
use super::state::AppState;

/// The egui clipboard; used when no platform copy utility is available.
/// egui hands the text to the windowing backend and reports nothing back, so
/// this sink always succeeds and the window never ends in the manual-copy
/// popup. The CLI chain (`SystemClipboard` then `Osc52Clipboard`) can.
struct ContextClipboard<'a>(&'a egui::Context);

impl ClipboardSink for ContextClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.copy_text(text.to_string());
        Ok(())
    }
}

pub struct InvitationApp {
    state: AppState,
    store: GuestbookStore<Box<dyn SlotStorage>>,
    event_time: DateTime<FixedOffset>,
    account_number: String,
}

impl InvitationApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: GuestbookStore<Box<dyn SlotStorage>>,
        recipient: Option<String>,
        event_time: DateTime<FixedOffset>,
        account_number: String,
    ) -> Self {
        let mut app = Self {
            state: AppState::new(recipient),
            store,
            event_time,
            account_number,
        };
        app.refresh_entries();
        app
    }

    fn refresh_entries(&mut self) {
        self.state.set_entries(self.store.list());
    }

    fn submit_entry(&mut self) {
        match self.state.form.submit(&mut self.store) {
            Ok(Some(_)) => {
                self.state.last_error = None;
                self.refresh_entries();
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("Failed to save guestbook entry: {err}");
                self.state.last_error = Some(err.to_string());
            }
        }
    }

    fn clear_entries(&mut self) {
        if let Err(err) = self.store.clear() {
            log::error!("Failed to clear guestbook: {err}");
            self.state.last_error = Some(err.to_string());
        }
        self.refresh_entries();
    }

    fn copy_account(&mut self, ctx: &egui::Context) {
        let mut primary = SystemClipboard;
        let mut fallback = ContextClipboard(ctx);
        match copy_text(&mut primary, &mut fallback, &self.account_number) {
            CopyOutcome::Copied => self.state.show_toast(Instant::now()),
            CopyOutcome::Manual(message) => self.state.manual_copy = Some(message),
        }
    }
}

impl eframe::App for InvitationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.state.cover_open {
            egui::CentralPanel::default().show(ctx, |ui| {
                if cover::render(ui, self.state.recipient.as_deref()) {
                    self.state.open_cover();
                }
            });
            return;
        }

        if let Some(message) = self.state.manual_copy.clone() {
            egui::Window::new("Salin Manual")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.state.manual_copy = None;
                    }
                });
        }

        if self.state.toast_visible(Instant::now()) {
            egui::TopBottomPanel::bottom("copy_toast").show(ctx, |ui| {
                ui.label("Nomor rekening disalin");
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(name) = &self.state.recipient {
                    ui.label(format!("Kepada Yth. {name}"));
                }
                ui.separator();

                ui.heading("Menuju Hari Bahagia");
                countdown::render(ui, &Countdown::at(self.event_time, Utc::now()));
                ui.separator();

                ui.heading("Amplop Digital");
                if gift::render(ui, &self.account_number) {
                    self.copy_account(ctx);
                }
                ui.separator();

                ui.heading("Buku Tamu");
                if let Some(err) = &self.state.last_error {
                    ui.colored_label(egui::Color32::RED, err);
                }
                let actions =
                    guestbook::render(ui, &mut self.state.form, &self.state.entries);
                if actions.submit {
                    self.submit_entry();
                }
                if actions.clear {
                    self.clear_entries();
                }
            });
        });

        ctx.request_repaint_after(self.state.next_repaint(Instant::now()));
    }
}
