use crate::form::{FileId, FormState};

/// UI-only state that never reaches the wire.
#[derive(Debug, Default)]
pub struct ViewState {
    pub zoomed: Option<FileId>,
    pub notice: Option<String>,
}

impl ViewState {
    pub fn zoom(&mut self, id: FileId) {
        self.zoomed = Some(id);
    }

    pub fn close_zoom(&mut self) {
        self.zoomed = None;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Drops references to files that are no longer in the form.
    pub fn reconcile(&mut self, form: &FormState) {
        if let Some(id) = self.zoomed {
            if form.find(id).is_none() {
                self.zoomed = None;
            }
        }
    }
}
