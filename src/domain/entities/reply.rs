/// What a handler sends back through the reply capability, exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Photo by URL with a caption
    Photo { url: String, caption: String },
    /// Text plus a reply keyboard, one button per entry
    Menu { text: String, buttons: Vec<String> },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    pub fn photo(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Reply::Photo {
            url: url.into(),
            caption: caption.into(),
        }
    }

    pub fn menu(text: impl Into<String>, buttons: Vec<String>) -> Self {
        Reply::Menu {
            text: text.into(),
            buttons,
        }
    }
}
