use super::ClaimSubmitter;
use crate::config::EndpointMode;
use crate::form::{DocumentKind, FileId, SelectedFile};
use crate::upload::UploadStatus;
use crate::utils::file_size::FileSizeUtils;
use eframe::egui::{self, Align, Color32, RichText};
use std::path::PathBuf;

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
const WARNING: Color32 = Color32::from_rgb(217, 119, 6);
const FAILURE: Color32 = Color32::from_rgb(220, 38, 38);
const THUMBNAIL_HEIGHT: f32 = 140.0;

/// Clicks collected while drawing, applied once the frame's borrows end.
enum UiAction {
    ToggleMode,
    PickDocument(DocumentKind),
    ClearDocument(DocumentKind),
    Open(PathBuf),
    PickImages,
    PickImageFolder,
    RemoveImage(usize),
    Zoom(FileId),
    CloseZoom,
    Submit,
}

impl ClaimSubmitter {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                self.render_header(ui, &mut actions);
                ui.add_space(20.0);

                let uploading = self.submitter.status().is_uploading();
                ui.add_enabled_ui(!uploading, |ui| {
                    self.render_contact(ui);
                    ui.add_space(10.0);
                    for kind in DocumentKind::ALL {
                        self.render_document(ui, kind, &mut actions);
                        ui.add_space(10.0);
                    }
                    self.render_images(ui, &mut actions);
                });

                ui.add_space(20.0);
                self.render_submit(ui, &mut actions);
                ui.add_space(20.0);
            });
        });

        self.render_zoom(ctx, &mut actions);

        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleMode => self.toggle_mode(),
            UiAction::PickDocument(kind) => self.pick_document(kind),
            UiAction::ClearDocument(kind) => self.clear_document(kind),
            UiAction::Open(path) => self.open_externally(&path),
            UiAction::PickImages => self.pick_images(),
            UiAction::PickImageFolder => self.pick_image_folder(),
            UiAction::RemoveImage(index) => self.remove_image(index),
            UiAction::Zoom(id) => self.view.zoom(id),
            UiAction::CloseZoom => self.view.close_zoom(),
            UiAction::Submit => self.submit(),
        }
    }

    fn render_header(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.heading("📤 Submit Your Claim");
            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                let (fill, label) = match self.mode {
                    EndpointMode::Live => (SUCCESS, "● Live"),
                    EndpointMode::Test => (FAILURE, "● Test"),
                };
                let toggle = egui::Button::new(RichText::new(label).color(Color32::WHITE))
                    .fill(fill)
                    .rounding(12.0);
                if ui.add(toggle).on_hover_text(self.current_url()).clicked() {
                    actions.push(UiAction::ToggleMode);
                }
            });
        });
    }

    fn render_contact(&mut self, ui: &mut egui::Ui) {
        let mut name = self.form.name().to_string();
        ui.label(RichText::new("Full Name").strong());
        let edited = ui.add(
            egui::TextEdit::singleline(&mut name)
                .hint_text("Your full name")
                .desired_width(f32::INFINITY),
        );
        if edited.changed() {
            self.form.set_name(name);
        }

        ui.add_space(10.0);
        let mut email = self.form.email().to_string();
        ui.label(RichText::new("Email Address").strong());
        let edited = ui.add(
            egui::TextEdit::singleline(&mut email)
                .hint_text("you@example.com")
                .desired_width(f32::INFINITY),
        );
        if edited.changed() {
            self.form.set_email(email);
        }
    }

    fn render_document(&self, ui: &mut egui::Ui, kind: DocumentKind, actions: &mut Vec<UiAction>) {
        let required = self.submitter.policy().required_documents.contains(&kind);

        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let title = if required {
                    format!("Upload {} *", kind.label())
                } else {
                    format!("Upload {}", kind.label())
                };
                ui.label(RichText::new(title).strong());
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if self.form.document(kind).is_some() && ui.button("✖ Clear").clicked() {
                        actions.push(UiAction::ClearDocument(kind));
                    }
                    if ui.button("📄 Choose File").clicked() {
                        actions.push(UiAction::PickDocument(kind));
                    }
                });
            });

            if let Some(file) = self.form.document(kind) {
                ui.add_space(6.0);
                self.render_file(ui, file, actions);
            }
        });
    }

    /// Thumbnail for images, name and size for everything else.
    fn render_file(&self, ui: &mut egui::Ui, file: &SelectedFile, actions: &mut Vec<UiAction>) {
        if let Some(preview) = self.previews.get(file.id) {
            let image = egui::Image::from_bytes(preview.uri.clone(), preview.bytes.clone())
                .max_height(THUMBNAIL_HEIGHT)
                .max_width(ui.available_width())
                .rounding(8.0)
                .sense(egui::Sense::click());
            if ui.add(image).on_hover_text("Click to zoom").clicked() {
                actions.push(UiAction::Zoom(file.id));
            }
            return;
        }

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "{} ({})",
                    file.name,
                    FileSizeUtils::format_size(file.size())
                ))
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            if let Some(path) = &file.source {
                if ui.small_button("Open").clicked() {
                    actions.push(UiAction::Open(path.clone()));
                }
            }
        });
    }

    fn render_images(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let title = if self.submitter.policy().require_images {
                    "Supporting Photos *"
                } else {
                    "Supporting Photos"
                };
                ui.label(RichText::new(title).strong());
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("📁 Add Folder").clicked() {
                        actions.push(UiAction::PickImageFolder);
                    }
                    if ui.button("🖼 Add Photos").clicked() {
                        actions.push(UiAction::PickImages);
                    }
                });
            });

            let images = self.form.images();
            if images.is_empty() {
                ui.label(
                    RichText::new("No photos added yet")
                        .color(ui.visuals().text_color().gamma_multiply(0.5)),
                );
                return;
            }

            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                for (index, file) in images.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.set_max_width(THUMBNAIL_HEIGHT);
                        self.render_file(ui, file, actions);
                        ui.horizontal(|ui| {
                            ui.small(&file.name);
                            if ui.small_button("✖").on_hover_text("Remove").clicked() {
                                actions.push(UiAction::RemoveImage(index));
                            }
                        });
                    });
                }
            });
        });
    }

    fn render_submit(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let status = self.submitter.status();
        ui.vertical_centered(|ui| {
            let label = if status.is_uploading() {
                "⏳ Uploading..."
            } else {
                "🚀 Submit Claim"
            };
            let button = egui::Button::new(RichText::new(label).color(Color32::WHITE))
                .fill(ACCENT)
                .min_size(egui::vec2(200.0, 40.0));
            if ui.add_enabled(!status.is_uploading(), button).clicked() {
                actions.push(UiAction::Submit);
            }

            let color = match status {
                UploadStatus::Idle => None,
                UploadStatus::MissingField(_) => Some(WARNING),
                UploadStatus::Uploading => Some(ui.visuals().text_color()),
                UploadStatus::Success => Some(SUCCESS),
                UploadStatus::Failure(_) => Some(FAILURE),
            };
            if let Some(color) = color {
                ui.add_space(10.0);
                ui.colored_label(color, status.status_text());
            }

            if let Some(notice) = &self.view.notice {
                ui.add_space(5.0);
                ui.colored_label(WARNING, format!("⚠️ {}", notice));
            }
        });
    }

    fn render_zoom(&self, ctx: &egui::Context, actions: &mut Vec<UiAction>) {
        let Some(preview) = self.view.zoomed.and_then(|id| self.previews.get(id)) else {
            return;
        };

        egui::Area::new(egui::Id::new("zoom_overlay"))
            .fixed_pos(egui::Pos2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let screen = ctx.screen_rect();
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(190));
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());

                let image = egui::Image::from_bytes(preview.uri.clone(), preview.bytes.clone())
                    .max_size(screen.size() * 0.9)
                    .rounding(12.0)
                    .sense(egui::Sense::click());
                let image = ui.put(screen.shrink2(screen.size() * 0.05), image);

                let escaped = ctx.input(|i| i.key_pressed(egui::Key::Escape));
                if backdrop.clicked() || image.clicked() || escaped {
                    actions.push(UiAction::CloseZoom);
                }
            });
    }
}
