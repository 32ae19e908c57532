//! Header-prefix dispatch.
//!
//! Headers named `X-Mailgun-*` carry provider options and variables and are
//! translated into `o:`, `v:` and `recipient-variables` fields. Every other
//! header is sent as a custom MIME header under the `h:` marker.

use serde_json::{Map, Value};

use super::payload::WirePart;
use crate::error::{MailgunError, MailgunResult};
use crate::types::HeaderValue;

/// Prefix of headers that the encoder translates into Mailgun fields.
pub const RESERVED_PREFIX: &str = "X-Mailgun-";

/// Field-name marker for custom MIME headers.
pub const CUSTOM_HEADER_MARKER: &str = "h:";

/// Field-name marker for message options.
pub const OPTION_MARKER: &str = "o:";

/// Field-name marker for custom variables.
pub const VARIABLE_MARKER: &str = "v:";

/// Field name for batch-sending recipient variables.
pub const RECIPIENT_VARIABLES_FIELD: &str = "recipient-variables";

/// Header holding the JSON array of tags.
pub const TAG_HEADER: &str = "X-Mailgun-Tag";
/// Header toggling DKIM signatures.
pub const DKIM_HEADER: &str = "X-Mailgun-Dkim";
/// Header holding the scheduled delivery time.
pub const DELIVER_BY_HEADER: &str = "X-Mailgun-Deliver-By";
/// Header enabling test mode.
pub const DROP_MESSAGE_HEADER: &str = "X-Mailgun-Drop-Message";
/// Header toggling tracking.
pub const TRACK_HEADER: &str = "X-Mailgun-Track";
/// Header toggling click tracking.
pub const TRACK_CLICKS_HEADER: &str = "X-Mailgun-Track-Clicks";
/// Header toggling open tracking.
pub const TRACK_OPENS_HEADER: &str = "X-Mailgun-Track-Opens";
/// Header requiring TLS delivery.
pub const REQUIRE_TLS_HEADER: &str = "X-Mailgun-Require-TLS";
/// Header skipping TLS certificate verification.
pub const SKIP_VERIFICATION_HEADER: &str = "X-Mailgun-Skip-Verification";
/// Header holding custom variables.
pub const VARIABLES_HEADER: &str = "X-Mailgun-Variables";
/// Header holding JSON-encoded recipient variables.
pub const RECIPIENT_VARIABLES_HEADER: &str = "X-Mailgun-Recipient-Variables";

const TAG_OPTION: &str = "tag";

const OPTIONS: &[(&str, &str)] = &[
    ("Tag", TAG_OPTION),
    ("Dkim", "dkim"),
    ("Deliver-By", "deliverytime"),
    ("Drop-Message", "testmode"),
    ("Track", "tracking"),
    ("Track-Clicks", "tracking-clicks"),
    ("Track-Opens", "tracking-opens"),
    ("Require-TLS", "require-tls"),
    ("Skip-Verification", "skip-verification"),
];

/// Option token for a reserved header suffix, e.g. `Track-Clicks` → `tracking-clicks`.
pub fn option_token(suffix: &str) -> Option<&'static str> {
    OPTIONS
        .iter()
        .find(|(header, _)| header.eq_ignore_ascii_case(suffix))
        .map(|(_, token)| *token)
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &name[prefix.len()..])
}

/// Translate one header into wire parts. Empty values produce nothing.
pub(crate) fn encode_header(
    name: &str,
    value: &HeaderValue,
    parts: &mut Vec<WirePart>,
) -> MailgunResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    if let Some(suffix) = strip_prefix_ignore_case(name, RESERVED_PREFIX) {
        if suffix.eq_ignore_ascii_case("Recipient-Variables") {
            return encode_recipient_variables(name, value, parts);
        }
        if suffix.eq_ignore_ascii_case("Variables") {
            return encode_variables(name, value, parts);
        }
        match option_token(suffix) {
            Some(TAG_OPTION) => return encode_tags(name, value, parts),
            Some(token) => {
                encode_repeated(&format!("{}{}", OPTION_MARKER, token), value, parts);
                return Ok(());
            }
            None => {}
        }
    }

    if strip_prefix_ignore_case(name, CUSTOM_HEADER_MARKER).is_some() {
        encode_repeated(name, value, parts);
    } else {
        encode_repeated(&format!("{}{}", CUSTOM_HEADER_MARKER, name), value, parts);
    }
    Ok(())
}

fn encode_repeated(field: &str, value: &HeaderValue, parts: &mut Vec<WirePart>) {
    match value {
        HeaderValue::Text(text) => parts.push(WirePart::text(field, text.as_str())),
        HeaderValue::List(items) => {
            parts.extend(items.iter().map(|item| WirePart::text(field, item.as_str())))
        }
        HeaderValue::Map(map) => parts.push(WirePart::text(field, json_object(map))),
    }
}

fn encode_tags(name: &str, value: &HeaderValue, parts: &mut Vec<WirePart>) -> MailgunResult<()> {
    let tags: Vec<String> = match value {
        HeaderValue::Text(text) => serde_json::from_str::<Vec<Value>>(text)
            .map_err(|e| {
                MailgunError::invalid_field(name, format!("Tags must be a JSON array: {}", e))
            })?
            .iter()
            .map(scalar_to_field)
            .collect(),
        HeaderValue::List(items) => items.clone(),
        HeaderValue::Map(_) => {
            return Err(MailgunError::invalid_field(
                name,
                "Tags must be a list of strings.",
            ))
        }
    };

    parts.extend(tags.into_iter().enumerate().map(|(index, tag)| {
        WirePart::text(format!("{}{}[{}]", OPTION_MARKER, TAG_OPTION, index), tag)
    }));
    Ok(())
}

fn encode_variables(
    name: &str,
    value: &HeaderValue,
    parts: &mut Vec<WirePart>,
) -> MailgunResult<()> {
    let parsed;
    let vars = match value {
        HeaderValue::Map(map) => map,
        HeaderValue::Text(text) => {
            parsed = serde_json::from_str::<Map<String, Value>>(text).map_err(|e| {
                MailgunError::invalid_field(
                    name,
                    format!("Custom variables must be a JSON object: {}", e),
                )
            })?;
            &parsed
        }
        HeaderValue::List(_) => {
            return Err(MailgunError::invalid_field(
                name,
                "Custom variables must be a mapping of names to values.",
            ))
        }
    };

    parts.extend(vars.iter().map(|(key, value)| {
        WirePart::text(format!("{}{}", VARIABLE_MARKER, key), scalar_to_field(value))
    }));
    Ok(())
}

fn encode_recipient_variables(
    name: &str,
    value: &HeaderValue,
    parts: &mut Vec<WirePart>,
) -> MailgunResult<()> {
    let encoded = match value {
        HeaderValue::Text(text) => {
            serde_json::from_str::<Map<String, Value>>(text).map_err(|e| {
                MailgunError::invalid_field(
                    name,
                    format!("Recipient variables must be a JSON object: {}", e),
                )
            })?;
            text.clone()
        }
        HeaderValue::Map(map) => json_object(map),
        HeaderValue::List(_) => {
            return Err(MailgunError::invalid_field(
                name,
                "Recipient variables must be keyed by recipient address.",
            ))
        }
    };
    parts.push(WirePart::text(RECIPIENT_VARIABLES_FIELD, encoded));
    Ok(())
}

/// Strings pass through; everything else is sent as its JSON encoding.
fn scalar_to_field(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_object(map: &Map<String, Value>) -> String {
    Value::Object(map.clone()).to_string()
}
