use tracing::debug;

use super::error::ParamsError;
use super::model::RequestDescriptor;

pub const PARAM_SEPARATOR: char = ';';
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Reads the `-params` string the host replays in edit and refresh modes.
///
/// Values stay in their escaped form; [`RequestDescriptor::to_definition`]
/// decodes them right before the request is built.
pub fn parse_params(raw: &str) -> Result<RequestDescriptor, ParamsError> {
    let mut uri = None;
    let mut method = String::new();
    let mut header = String::new();
    let mut username = String::new();
    let mut password = String::new();
    let mut body = String::new();

    for entry in raw.split(PARAM_SEPARATOR) {
        if entry.trim().is_empty() {
            continue;
        }
        let (key, value) = entry
            .split_once(KEY_VALUE_SEPARATOR)
            .ok_or_else(|| ParamsError::MissingSeparator(entry.to_string()))?;

        match key.trim().to_ascii_lowercase().as_str() {
            "uri" => uri = Some(value.to_string()),
            "type" => method = value.to_string(),
            "header" => header = value.to_string(),
            "username" => username = value.to_string(),
            "password" => password = value.to_string(),
            "body" => body = value.to_string(),
            other => debug!(key = other, "ignoring unknown parameter"),
        }
    }

    let uri = uri.ok_or(ParamsError::MissingUri)?;
    RequestDescriptor::new(&uri, method, header, username, password, body)
}
