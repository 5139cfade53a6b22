use aws_sdk_s3::types::StorageClass;
use std::fmt;

/// Storage class name that the backend is known to accept.
///
/// Only constructed through [`StorageClassHint::parse`], which matches
/// case-insensitively against the backend's storage class list and keeps the
/// canonical (upper-case) spelling. An unknown name yields `None`: the upload
/// then goes out without a storage class instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageClassHint(&'static str);

impl StorageClassHint {
    pub fn parse(name: &str) -> Option<Self> {
        let known = StorageClass::values()
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(name));

        if known.is_none() {
            tracing::debug!("Requested storage class '{}' is not known, ignoring", name);
        }

        known.map(Self)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub fn is_valid_storage_class(name: &str) -> bool {
    StorageClassHint::parse(name).is_some()
}

impl fmt::Display for StorageClassHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&StorageClassHint> for StorageClass {
    fn from(hint: &StorageClassHint) -> Self {
        StorageClass::from(hint.as_str())
    }
}
