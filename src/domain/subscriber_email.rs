use validator::ValidateEmail;

/// A newsletter address, normalised (trimmed and lowercased) so that the same
/// mailbox always maps to the same subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Accepts `local@domain.tld`: no whitespace, exactly one `@`, a dot
    /// somewhere inside the domain, and whatever `validator` considers a valid
    /// address.
    pub fn parse(email: String) -> Result<Self, String> {
        let normalised = email.trim().to_lowercase();
        let simple_shape = match normalised.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .char_indices()
                        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
                    && !normalised.chars().any(char::is_whitespace)
            }
            None => false,
        };
        (simple_shape && normalised.validate_email())
            .then_some(Self(normalised))
            .ok_or(format!("Invalid email: {email:?}"))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
