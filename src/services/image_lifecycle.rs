use std::{str::FromStr, sync::Arc};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        errors::CatalogResult,
        models::{EditingSession, ImageDeletionResult, ImageFile, RemovalDecision, UploadProgress},
    },
    ports::services::ImageStorageService,
    services::image_storage_service_impl::delete_images_concurrently,
};

/// What to do with a temporary image the user removes from the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporaryRemovalPolicy {
    /// Stop tracking it without deleting; the object is orphaned
    #[default]
    Untrack,
    /// Delete it from storage right away
    Delete,
}

impl FromStr for TemporaryRemovalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "untrack" => Ok(TemporaryRemovalPolicy::Untrack),
            "delete" => Ok(TemporaryRemovalPolicy::Delete),
            other => Err(format!(
                "Unknown temporary removal policy '{}', expected 'untrack' or 'delete'",
                other
            )),
        }
    }
}

/// Storage effect of removing one image from a form
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalAction {
    Deleted,
    DeleteFailed { error: String },
    /// Released from temporary tracking without deleting the object
    Untracked,
    /// Removed from the form only
    Detached,
}

/// Result of removing one image from a form
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRemoval {
    pub url: String,
    pub action: RemovalAction,
}

/// Coordinates storage side effects of editing-session gestures so that
/// every uploaded image ends up attached to a saved product or deleted.
#[derive(Clone)]
pub struct ImageLifecycleCoordinator {
    storage: Arc<dyn ImageStorageService>,
    temporary_removal: TemporaryRemovalPolicy,
}

impl ImageLifecycleCoordinator {
    pub fn new(storage: Arc<dyn ImageStorageService>) -> Self {
        Self {
            storage,
            temporary_removal: TemporaryRemovalPolicy::default(),
        }
    }

    pub fn with_temporary_removal(mut self, policy: TemporaryRemovalPolicy) -> Self {
        self.temporary_removal = policy;
        self
    }

    pub fn temporary_removal(&self) -> TemporaryRemovalPolicy {
        self.temporary_removal
    }

    /// Attach an already uploaded image to the form
    pub fn on_upload(&self, session: &mut EditingSession, url: impl Into<String>) {
        session.record_upload(url);
    }

    /// Upload files one at a time, attaching each success to the form.
    /// A failed file is reported and the remaining files still upload.
    pub async fn on_upload_files(
        &self,
        session: &mut EditingSession,
        files: Vec<ImageFile>,
    ) -> UploadProgress {
        let mut progress = UploadProgress::new(files.len());

        for file in files {
            let file_name = file.file_name.clone();
            match self.storage.upload_image(file).await {
                Ok(uploaded) => {
                    self.on_upload(session, uploaded.public_url.clone());
                    progress.record_success(uploaded);
                    debug!(
                        completed = progress.completed,
                        total = progress.total,
                        percent = progress.percent(),
                        "Upload progress"
                    );
                }
                Err(e) => {
                    warn!(file_name = %file_name, error = %e, "Error uploading file");
                    progress.record_failure(file_name, e);
                }
            }
        }

        progress
    }

    /// Remove the image at `index` from the form.
    ///
    /// A committed image of the product being edited is deleted immediately,
    /// whether or not the edit is later submitted. A failed deletion is
    /// reported but the image still leaves the form.
    pub async fn on_remove(
        &self,
        session: &mut EditingSession,
        index: usize,
    ) -> CatalogResult<ImageRemoval> {
        let decision = session.take_image(index)?;

        let action = match &decision {
            RemovalDecision::DeleteCommitted { url } => self.delete_now(url).await,
            RemovalDecision::ReleaseTemporary { url } => match self.temporary_removal {
                TemporaryRemovalPolicy::Delete => self.delete_now(url).await,
                TemporaryRemovalPolicy::Untrack => {
                    warn!(url = %url, "Temporary image removed from form without deletion; object is orphaned");
                    RemovalAction::Untracked
                }
            },
            RemovalDecision::Detach { .. } => RemovalAction::Detached,
        };

        Ok(ImageRemoval {
            url: decision.url().to_string(),
            action,
        })
    }

    /// Discard the form, deleting every image still tracked as temporary
    pub async fn on_cancel(&self, session: EditingSession) -> Vec<ImageDeletionResult> {
        let temporary = session.into_temporary();
        if temporary.is_empty() {
            return Vec::new();
        }

        let results = delete_images_concurrently(self.storage.as_ref(), &temporary).await;
        info!(
            images = results.len(),
            failed = results.iter().filter(|r| !r.success).count(),
            "Cancelled editing session"
        );
        results
    }

    /// Discard the form after its product was saved; the product now owns
    /// every remaining image.
    pub fn on_submit_success(&self, session: EditingSession) {
        let images = session.into_current();
        debug!(images = images.len(), "Closed editing session after save");
    }

    async fn delete_now(&self, url: &str) -> RemovalAction {
        match self.storage.delete_image(url).await {
            Ok(()) => RemovalAction::Deleted,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to delete image from storage");
                RemovalAction::DeleteFailed {
                    error: e.to_string(),
                }
            }
        }
    }
}
