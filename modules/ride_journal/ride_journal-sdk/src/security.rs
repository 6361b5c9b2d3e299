//! Caller identity handed to mutating operations.

/// Identity of the authenticated caller.
///
/// Produced by the identity resolver after a bearer credential has been
/// verified. Mutations compare `subject_id` with the owner recorded on the
/// target resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SecurityContext {
    subject_id: i32,
}

impl SecurityContext {
    #[must_use]
    pub fn for_subject(subject_id: i32) -> Self {
        Self { subject_id }
    }

    /// Id of the user on whose behalf the call is made.
    #[must_use]
    pub fn subject_id(&self) -> i32 {
        self.subject_id
    }
}
