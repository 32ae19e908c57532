//! Wire payload: the ordered list of named multipart fields.

use std::path::PathBuf;

use serde::Serialize;

/// Content of a single wire part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PartBody {
    /// A plain form value.
    Text(String),
    /// Decoded in-memory file content.
    Bytes(Vec<u8>),
    /// A file streamed from disk at send time.
    File(PathBuf),
}

/// One named field (or file) of the multipart request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WirePart {
    /// Field name, e.g. `to`, `o:tag[0]`, `h:Reply-To`, `attachment`.
    pub name: String,
    /// Field content.
    pub body: PartBody,
    /// Content type of file parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Filename of file parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Content ID of inline file parts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl WirePart {
    /// Create a plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: PartBody::Text(value.into()),
            content_type: None,
            filename: None,
            content_id: None,
        }
    }

    /// Create a file field. reqwest writes it as `form-data` with a filename.
    pub fn file(
        name: impl Into<String>,
        body: PartBody,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body,
            content_type: Some(content_type.into()),
            filename: Some(filename.into()),
            content_id: None,
        }
    }

    /// Set the content ID.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// The text value, if this is a plain field.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            PartBody::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Ordered sequence of wire parts. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WirePayload {
    parts: Vec<WirePart>,
}

impl WirePayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    pub fn push(&mut self, part: WirePart) {
        self.parts.push(part);
    }

    /// Append several parts, keeping their order.
    pub fn extend(&mut self, parts: impl IntoIterator<Item = WirePart>) {
        self.parts.extend(parts);
    }

    /// All parts in order.
    pub fn parts(&self) -> &[WirePart] {
        &self.parts
    }

    /// Consume the payload into its parts.
    pub fn into_parts(self) -> Vec<WirePart> {
        self.parts
    }

    /// Text value of the first part with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .and_then(WirePart::as_text)
    }

    /// Text values of every part with the given name, in order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter(|part| part.name == name)
            .filter_map(WirePart::as_text)
            .collect()
    }

    /// Number of parts with the given name.
    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|part| part.name == name).count()
    }

    /// Part names in order.
    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if there are no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Remove all parts.
    pub fn clear(&mut self) {
        self.parts.clear();
    }
}
