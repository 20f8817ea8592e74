/// A review that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub name: String,
    pub text: String,
    pub rating: Option<i32>,
}

/// A validated contact form submission.
///
/// Never persisted: it lives for the duration of one request and is handed
/// to the dispatcher to be relayed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}
