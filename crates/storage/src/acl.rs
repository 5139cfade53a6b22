use std::fmt;

/// Canned access-control level applied to uploaded objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessControl {
    #[default]
    PublicRead,
    Private,
    PublicReadWrite,
    AuthenticatedRead,
    LogDeliveryWrite,
    BucketOwnerRead,
    BucketOwnerFullControl,
    AwsExecRead,
}

impl AccessControl {
    pub const ALL: [AccessControl; 8] = [
        AccessControl::PublicRead,
        AccessControl::Private,
        AccessControl::PublicReadWrite,
        AccessControl::AuthenticatedRead,
        AccessControl::LogDeliveryWrite,
        AccessControl::BucketOwnerRead,
        AccessControl::BucketOwnerFullControl,
        AccessControl::AwsExecRead,
    ];

    /// Exact, case-sensitive match against the canned ACL names
    pub fn parse(permission: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|acl| acl.as_str() == permission)
    }

    /// Like [`AccessControl::parse`], but unknown or empty input falls back to `public-read`
    pub fn resolve(permission: &str) -> Self {
        Self::parse(permission).unwrap_or_else(|| {
            if !permission.is_empty() {
                tracing::debug!("Unknown permission '{}', using public-read", permission);
            }
            Self::default()
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessControl::PublicRead => "public-read",
            AccessControl::Private => "private",
            AccessControl::PublicReadWrite => "public-read-write",
            AccessControl::AuthenticatedRead => "authenticated-read",
            AccessControl::LogDeliveryWrite => "log-delivery-write",
            AccessControl::BucketOwnerRead => "bucket-owner-read",
            AccessControl::BucketOwnerFullControl => "bucket-owner-full-control",
            AccessControl::AwsExecRead => "aws-exec-read",
        }
    }
}

impl fmt::Display for AccessControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<AccessControl> for aws_sdk_s3::types::ObjectCannedAcl {
    fn from(acl: AccessControl) -> Self {
        aws_sdk_s3::types::ObjectCannedAcl::from(acl.as_str())
    }
}
