/// The authenticated principal of the current request.
///
/// Inserted into request extensions by
/// [`RequireIdentity`](crate::middleware::identity::RequireIdentity) after the
/// bearer token validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}
