use bytes::Bytes;

use crate::domain::value_objects::ObjectName;

/// A file received from the client, not yet stored
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// An image stored in the bucket
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub object_name: ObjectName,
    pub public_url: String,
}

/// An image read back from the bucket, with the headers it was stored with
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

/// Result of one best-effort storage deletion
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDeletionResult {
    pub url: String,
    pub success: bool,
    pub error: Option<String>,
}

impl ImageDeletionResult {
    pub fn deleted(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// A file that could not be uploaded during a batch
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFailure {
    pub file_name: String,
    pub error: String,
}

/// Progress of a sequential multi-file upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadProgress {
    pub total: usize,
    pub completed: usize,
    pub uploaded: Vec<UploadedImage>,
    pub failures: Vec<UploadFailure>,
}

impl UploadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_success(&mut self, image: UploadedImage) {
        self.completed += 1;
        self.uploaded.push(image);
    }

    pub fn record_failure(&mut self, file_name: impl Into<String>, error: impl ToString) {
        self.failures.push(UploadFailure {
            file_name: file_name.into(),
            error: error.to_string(),
        });
    }

    /// Completed uploads as a whole percentage, rounded down
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.completed + self.failures.len() == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_rounds_down() {
        let mut progress = UploadProgress::new(3);
        assert_eq!(progress.percent(), 0);

        progress.record_success(UploadedImage {
            object_name: ObjectName::new("a.png".to_string()).unwrap(),
            public_url: "https://cdn/a.png".to_string(),
        });
        assert_eq!(progress.percent(), 33);

        progress.record_failure("b.png", "boom");
        assert!(!progress.is_complete());
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn test_empty_batch_is_complete() {
        let progress = UploadProgress::new(0);
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
    }
}
