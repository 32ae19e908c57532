//! Attachment descriptors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where an attachment's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentSource {
    /// A file on disk, streamed when the request is sent.
    File(PathBuf),
    /// Base64-encoded content held in memory.
    Data(String),
}

/// An email attachment.
///
/// An attachment with a content ID is sent as an inline (embedded) asset
/// that HTML bodies can reference as `cid:<content_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Filename presented to the recipient.
    pub filename: String,
    /// Content source.
    pub source: AttachmentSource,
    /// MIME type. Guessed from the filename when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Content ID for inline attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl Attachment {
    /// Attach a file from disk.
    pub fn file(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            source: AttachmentSource::File(path.into()),
            mime_type: None,
            content_id: None,
        }
    }

    /// Attach base64-encoded data with an explicit MIME type.
    pub fn data(
        filename: impl Into<String>,
        base64_data: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            source: AttachmentSource::Data(base64_data.into()),
            mime_type: Some(mime_type.into()),
            content_id: None,
        }
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Mark the attachment as inline under the given content ID.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Returns true if the attachment has a (non-empty) content ID.
    pub fn is_inline(&self) -> bool {
        self.content_id.as_deref().is_some_and(|cid| !cid.is_empty())
    }

    /// The MIME type to send: the explicit one, or a guess from the filename.
    pub fn resolved_mime_type(&self) -> String {
        match &self.mime_type {
            Some(mime_type) => mime_type.clone(),
            None => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_attachment_guesses_mime_type() {
        let attachment = Attachment::file("report.pdf", "/tmp/report.pdf");
        assert_eq!(attachment.resolved_mime_type(), "application/pdf");
        assert!(!attachment.is_inline());
    }

    #[test]
    fn test_unknown_extension_falls_back_to_octet_stream() {
        let attachment = Attachment::file("blob.zzzunknown", "/tmp/blob");
        assert_eq!(attachment.resolved_mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_explicit_mime_type_wins() {
        let attachment = Attachment::data("logo.png", "iVBORw0KGgo=", "image/x-custom")
            .with_content_id("logo");
        assert_eq!(attachment.resolved_mime_type(), "image/x-custom");
        assert!(attachment.is_inline());
    }

    #[test]
    fn test_empty_content_id_is_not_inline() {
        let attachment = Attachment::file("a.txt", "/tmp/a.txt").with_content_id("");
        assert!(!attachment.is_inline());
    }
}
