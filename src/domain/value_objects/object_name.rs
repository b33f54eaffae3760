use crate::domain::errors::ValidationError;

/// Name of an object in the flat image bucket
///
/// Image references are stored as public URLs; the object name is the final
/// path segment of such a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(String);

impl ObjectName {
    const MAX_LEN: usize = 1024;

    /// Create a new ObjectName with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectName);
        }

        if value.len() > Self::MAX_LEN {
            return Err(ValidationError::ObjectNameTooLong {
                actual: value.len(),
                max: Self::MAX_LEN,
            });
        }

        if let Some(c) = value.chars().find(|c| *c == '/' || c.is_control()) {
            return Err(ValidationError::InvalidObjectNameCharacter(c));
        }

        Ok(Self(value))
    }

    /// Accept either a bare object name or a full URL.
    ///
    /// Anything containing a `/` is treated as a URL and reduced to its final
    /// path segment, with query string and fragment stripped.
    pub fn from_name_or_url(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let without_suffix = value
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default();

        let name = match without_suffix.rfind('/') {
            Some(idx) => &without_suffix[idx + 1..],
            None => without_suffix,
        };

        Self::new(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension after the last `.`, if any
    pub fn extension(&self) -> Option<&str> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

impl std::fmt::Display for ObjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
