//! Attachment encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::payload::{PartBody, WirePart};
use crate::error::{MailgunError, MailgunResult};
use crate::types::{Attachment, AttachmentSource};

/// Field name for regular attachments.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Field name for inline (embedded) attachments.
pub const INLINE_FIELD: &str = "inline";

/// Encode one attachment into a file part.
///
/// File sources stay as paths and are streamed by the HTTP layer; base64
/// sources are decoded here.
pub(crate) fn encode_attachment(attachment: &Attachment) -> MailgunResult<WirePart> {
    let body = match &attachment.source {
        AttachmentSource::File(path) => PartBody::File(path.clone()),
        AttachmentSource::Data(encoded) => {
            let compact: String = encoded.split_ascii_whitespace().collect();
            let bytes = STANDARD.decode(compact.as_bytes()).map_err(|e| {
                MailgunError::invalid_field(
                    attachment.filename.as_str(),
                    format!(
                        "Attachment '{}' is not valid base64: {}",
                        attachment.filename, e
                    ),
                )
            })?;
            PartBody::Bytes(bytes)
        }
    };

    let field = if attachment.is_inline() {
        INLINE_FIELD
    } else {
        ATTACHMENT_FIELD
    };

    let content_type = attachment.resolved_mime_type();
    content_type.parse::<mime::Mime>().map_err(|e| {
        MailgunError::invalid_field(
            attachment.filename.as_str(),
            format!("Invalid MIME type '{}': {}", content_type, e),
        )
    })?;

    let part = WirePart::file(field, body, attachment.filename.as_str(), content_type);

    Ok(match &attachment.content_id {
        Some(content_id) if attachment.is_inline() => part.with_content_id(content_id.as_str()),
        _ => part,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_invalid_mime_type() {
        let attachment = Attachment::data("a.bin", "AA==", "not a mime");
        let err = encode_attachment(&attachment).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.field(), Some("a.bin"));
    }

    #[test]
    fn test_file_attachment() {
        let part = encode_attachment(&Attachment::file("report.pdf", "/srv/report.pdf")).unwrap();

        assert_eq!(part.name, "attachment");
        assert_eq!(part.body, PartBody::File(PathBuf::from("/srv/report.pdf")));
        assert_eq!(part.filename.as_deref(), Some("report.pdf"));
        assert_eq!(part.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(part.content_id, None);
    }

    #[test]
    fn test_inline_data_attachment() {
        let attachment =
            Attachment::data("logo.png", "aGVsbG8=", "image/png").with_content_id("logo-cid");
        let part = encode_attachment(&attachment).unwrap();

        assert_eq!(part.name, "inline");
        assert_eq!(part.body, PartBody::Bytes(b"hello".to_vec()));
        assert_eq!(part.content_type.as_deref(), Some("image/png"));
        assert_eq!(part.content_id.as_deref(), Some("logo-cid"));
    }

    #[test]
    fn test_wrapped_base64_is_accepted() {
        let attachment = Attachment::data("a.txt", "aGVs\r\nbG8=", "text/plain");
        let part = encode_attachment(&attachment).unwrap();
        assert_eq!(part.body, PartBody::Bytes(b"hello".to_vec()));
    }

    #[test]
    fn test_invalid_base64() {
        let attachment = Attachment::data("a.txt", "***", "text/plain");
        let err = encode_attachment(&attachment).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.field(), Some("a.txt"));
    }
}
