use crate::domain::{errors::ValidationError, models::Product, value_objects::ProductId};

/// What the form is editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditingMode {
    Create,
    Edit { product_id: ProductId },
}

/// How a removed image must be handled in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalDecision {
    /// The image belongs to the saved product and is deleted eagerly
    DeleteCommitted { url: String },
    /// The image was uploaded in this session and is no longer tracked
    ReleaseTemporary { url: String },
    /// The image was neither committed nor tracked, or another entry in the
    /// form still shows it
    Detach { url: String },
}

impl RemovalDecision {
    pub fn url(&self) -> &str {
        match self {
            RemovalDecision::DeleteCommitted { url }
            | RemovalDecision::ReleaseTemporary { url }
            | RemovalDecision::Detach { url } => url,
        }
    }
}

/// Client-local state of one create/edit form.
///
/// `committed` is the snapshot of the product's saved images when the form
/// opened (empty when creating). `current` is what the form shows and is what
/// gets submitted. `temporary` holds uploads from this session that no saved
/// product owns yet; they are purged if the form is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    mode: EditingMode,
    committed: Vec<String>,
    current: Vec<String>,
    temporary: Vec<String>,
}

impl EditingSession {
    /// Open a form for a new product
    pub fn new_product() -> Self {
        Self {
            mode: EditingMode::Create,
            committed: Vec::new(),
            current: Vec::new(),
            temporary: Vec::new(),
        }
    }

    /// Open a form editing an existing product
    pub fn for_product(product: &Product) -> Self {
        Self {
            mode: EditingMode::Edit {
                product_id: product.id.clone(),
            },
            committed: product.image_url.clone(),
            current: product.image_url.clone(),
            temporary: Vec::new(),
        }
    }

    pub fn mode(&self) -> &EditingMode {
        &self.mode
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        match &self.mode {
            EditingMode::Create => None,
            EditingMode::Edit { product_id } => Some(product_id),
        }
    }

    pub fn committed_images(&self) -> &[String] {
        &self.committed
    }

    pub fn current_images(&self) -> &[String] {
        &self.current
    }

    pub fn temporary_images(&self) -> &[String] {
        &self.temporary
    }

    pub fn is_committed(&self, url: &str) -> bool {
        self.committed.iter().any(|u| u == url)
    }

    pub fn is_temporary(&self, url: &str) -> bool {
        self.temporary.iter().any(|u| u == url)
    }

    /// Record an image uploaded through this form
    pub fn record_upload(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !self.is_committed(&url) && !self.is_temporary(&url) {
            self.temporary.push(url.clone());
        }
        self.current.push(url);
    }

    /// Remove the image at `index` from the form and decide what storage
    /// action it needs. Nothing changes when the index is out of range.
    pub fn take_image(&mut self, index: usize) -> Result<RemovalDecision, ValidationError> {
        if index >= self.current.len() {
            return Err(ValidationError::ImageIndexOutOfRange {
                index,
                len: self.current.len(),
            });
        }

        let url = self.current.remove(index);

        // An image listed twice keeps its object until its last entry goes
        if self.current.contains(&url) {
            return Ok(RemovalDecision::Detach { url });
        }

        let decision = match self.mode {
            EditingMode::Edit { .. } if self.is_committed(&url) => {
                RemovalDecision::DeleteCommitted { url }
            }
            _ if self.is_temporary(&url) => {
                self.temporary.retain(|u| u != &url);
                RemovalDecision::ReleaseTemporary { url }
            }
            _ => RemovalDecision::Detach { url },
        };

        Ok(decision)
    }

    /// Close the form without saving, yielding the uploads to purge
    pub fn into_temporary(self) -> Vec<String> {
        self.temporary
    }

    /// Close the form after a successful save; the remaining images now
    /// belong to the product.
    pub fn into_current(self) -> Vec<String> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product_with_images(images: &[&str]) -> Product {
        Product {
            id: ProductId::generate(),
            name: "Jeans".to_string(),
            description: None,
            size: "32".to_string(),
            image_url: images.iter().map(|s| s.to_string()).collect(),
            price: 40,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_uploads_in_create_mode_are_temporary() {
        let mut session = EditingSession::new_product();
        session.record_upload("a");
        session.record_upload("b");

        assert_eq!(session.current_images(), &["a", "b"]);
        assert_eq!(session.temporary_images(), &["a", "b"]);
        assert!(session.product_id().is_none());
    }

    #[test]
    fn test_edit_mode_starts_from_committed_images() {
        let product = product_with_images(&["c1", "c2"]);
        let session = EditingSession::for_product(&product);

        assert_eq!(session.product_id(), Some(&product.id));
        assert_eq!(session.current_images(), session.committed_images());
        assert!(session.temporary_images().is_empty());
    }

    #[test]
    fn test_removing_committed_image_requests_eager_delete() {
        let product = product_with_images(&["c1", "c2"]);
        let mut session = EditingSession::for_product(&product);

        let decision = session.take_image(0).unwrap();
        assert_eq!(
            decision,
            RemovalDecision::DeleteCommitted {
                url: "c1".to_string()
            }
        );
        assert_eq!(session.current_images(), &["c2"]);
    }

    #[test]
    fn test_removing_temporary_image_releases_it() {
        let product = product_with_images(&["c1"]);
        let mut session = EditingSession::for_product(&product);
        session.record_upload("t1");

        let decision = session.take_image(1).unwrap();
        assert_eq!(
            decision,
            RemovalDecision::ReleaseTemporary {
                url: "t1".to_string()
            }
        );
        assert!(session.temporary_images().is_empty());
        assert_eq!(session.current_images(), &["c1"]);
    }

    #[test]
    fn test_duplicate_temporary_entry_is_detached() {
        let mut session = EditingSession::new_product();
        session.record_upload("t1");
        session.record_upload("t1");
        assert_eq!(session.temporary_images(), &["t1"]);

        let first = session.take_image(0).unwrap();
        assert_eq!(
            first,
            RemovalDecision::Detach {
                url: "t1".to_string()
            }
        );
        assert_eq!(session.temporary_images(), &["t1"]);
        assert_eq!(session.current_images(), &["t1"]);

        let last = session.take_image(0).unwrap();
        assert_eq!(
            last,
            RemovalDecision::ReleaseTemporary {
                url: "t1".to_string()
            }
        );
        assert!(session.temporary_images().is_empty());
    }

    #[test]
    fn test_duplicate_committed_entry_is_detached() {
        let product = product_with_images(&["c1", "c1"]);
        let mut session = EditingSession::for_product(&product);

        assert!(matches!(
            session.take_image(1).unwrap(),
            RemovalDecision::Detach { .. }
        ));
        assert!(matches!(
            session.take_image(0).unwrap(),
            RemovalDecision::DeleteCommitted { .. }
        ));
    }

    #[test]
    fn test_reuploading_committed_url_is_not_temporary() {
        let product = product_with_images(&["c1"]);
        let mut session = EditingSession::for_product(&product);
        session.record_upload("c1");

        assert!(session.temporary_images().is_empty());
        assert_eq!(session.current_images(), &["c1", "c1"]);
    }

    #[test]
    fn test_out_of_range_index_changes_nothing() {
        let mut session = EditingSession::new_product();
        session.record_upload("a");

        let err = session.take_image(3).unwrap_err();
        assert_eq!(err, ValidationError::ImageIndexOutOfRange { index: 3, len: 1 });
        assert_eq!(session.current_images(), &["a"]);
        assert_eq!(session.temporary_images(), &["a"]);
    }

    #[test]
    fn test_closing_the_session() {
        let mut session = EditingSession::new_product();
        session.record_upload("a");
        session.record_upload("b");
        session.take_image(0).unwrap();

        assert_eq!(session.clone().into_current(), vec!["b".to_string()]);
        assert_eq!(session.into_temporary(), vec!["b".to_string()]);
    }
}
