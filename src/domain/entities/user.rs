/// The user that issued an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub display_name: String,
}

impl User {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Placeholder user for adapters that carry no sender identity
    pub fn anonymous() -> Self {
        Self::new("anonymous", "friend")
    }
}
