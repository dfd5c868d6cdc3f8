mod state;
mod ui;

use crate::config::{Config, EndpointMode, Endpoints};
use crate::error::SubmitError;
use crate::form::preview::PreviewRegistry;
use crate::form::{DocumentKind, FormState, SelectedFile};
use crate::upload::{ReqwestTransport, Submitter};
use crate::utils::folder::FolderUtils;
use crate::utils::mime::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS};
use eframe::{egui, App};
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use state::ViewState;

pub struct ClaimSubmitter {
    form: FormState,
    previews: PreviewRegistry<egui::Context>,
    submitter: Submitter,
    endpoints: Endpoints,
    mode: EndpointMode,
    view: ViewState,
}

impl ClaimSubmitter {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Result<Self, SubmitError> {
        info!("Initializing claim submission form");
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self {
            form: FormState::default(),
            previews: PreviewRegistry::new(cc.egui_ctx.clone()),
            submitter: Submitter::new(Arc::new(transport), config.policy, config.image_fields),
            endpoints: config.endpoints,
            mode: config.default_mode,
            view: ViewState::default(),
        })
    }

    pub fn current_url(&self) -> &str {
        self.endpoints.url_for(self.mode).as_str()
    }

    pub fn toggle_mode(&mut self) {
        self.mode.toggle();
        let url = self.current_url();
        info!("Endpoint mode is now {} ({})", self.mode.label(), url);
    }

    pub fn submit(&mut self) {
        self.view.notice = None;
        let url = self.endpoints.url_for(self.mode).to_string();
        self.submitter.submit(&self.form, &url);
    }

    pub fn pick_document(&mut self, kind: DocumentKind) {
        let Some(path) = FileDialog::new()
            .set_title(format!("Select {}", kind.label()))
            .add_filter("PDF or image", &DOCUMENT_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        let result = SelectedFile::load(&path).and_then(|file| {
            let name = file.name.clone();
            self.form.set_document(kind, file).map(|_| name)
        });
        match result {
            Ok(name) => {
                info!("{} set to '{}'", kind.label(), name);
                self.view.notice = None;
            }
            Err(e) => {
                warn!("Rejected {} pick: {}", kind.label(), e);
                self.view.set_notice(e.to_string());
            }
        }
    }

    pub fn pick_images(&mut self) {
        if let Some(paths) = FileDialog::new()
            .set_title("Select supporting photos")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_files()
        {
            self.add_image_paths(paths);
        }
    }

    pub fn pick_image_folder(&mut self) {
        if let Some(folder) = FileDialog::new().pick_folder() {
            info!("Collecting images from {}", folder.display());
            self.add_image_paths(FolderUtils::image_paths(&folder));
        }
    }

    fn add_image_paths(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::with_capacity(paths.len());
        let mut unreadable = Vec::new();
        for path in &paths {
            match SelectedFile::load(path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("Skipping photo: {}", e);
                    unreadable.push(display_name(path));
                }
            }
        }

        let added = self.form.add_images(files);
        info!("Added {} of {} picked photos", added, paths.len());

        if unreadable.is_empty() {
            self.view.notice = None;
        } else {
            let notice = format!("Could not read: {}", unreadable.join(", "));
            self.view.set_notice(notice);
        }
    }

    pub fn remove_image(&mut self, index: usize) {
        if let Some(file) = self.form.remove_image(index) {
            info!("Removed photo '{}'", file.name);
        }
    }

    pub fn clear_document(&mut self, kind: DocumentKind) {
        if let Some(file) = self.form.clear_document(kind) {
            info!("Cleared {} '{}'", kind.label(), file.name);
        }
    }

    pub fn open_externally(&mut self, path: &Path) {
        if let Err(e) = open::that(path) {
            warn!("Failed to open {}: {}", path.display(), e);
            let notice = format!("Could not open {}: {}", display_name(path), e);
            self.view.set_notice(notice);
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.submitter.poll(&mut self.form) {
            ctx.request_repaint();
        }
        self.previews.sync(self.form.files());
        self.view.reconcile(&self.form);

        if self.submitter.status().is_uploading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl App for ClaimSubmitter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
