use std::fmt;

use url::Url;

use super::error::ParamsError;
use super::escape::{char_escape, char_unescape};
use super::headers::parse_header_list;

pub const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Mode {
    Preview,
    Refresh,
    Edit,
}

impl Mode {
    /// Numeric code the host uses for the mode.
    pub fn code(self) -> u8 {
        match self {
            Mode::Preview => 0,
            Mode::Refresh => 1,
            Mode::Edit => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Preview => write!(f, "preview"),
            Mode::Refresh => write!(f, "refresh"),
            Mode::Edit => write!(f, "edit"),
        }
    }
}

/// Request parameters as stored by the host. Every field except `uri` is kept
/// escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub uri: Url,
    pub method: String,
    pub header: String,
    pub username: String,
    pub password: String,
    pub body: String,
}

/// Unescaped values as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInput {
    pub uri: String,
    pub method: String,
    pub header: String,
    pub username: String,
    pub password: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Decoded request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefinition {
    pub method: String,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub auth: Option<BasicAuth>,
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn new(
        uri: &str,
        method: String,
        header: String,
        username: String,
        password: String,
        body: String,
    ) -> Result<Self, ParamsError> {
        let trimmed = uri.trim();
        let uri = Url::parse(trimmed).map_err(|source| ParamsError::InvalidUri {
            uri: trimmed.to_string(),
            source,
        })?;
        let method = if method.trim().is_empty() {
            DEFAULT_METHOD.to_string()
        } else {
            method
        };

        Ok(Self {
            uri,
            method,
            header,
            username,
            password,
            body,
        })
    }

    pub fn to_definition(&self) -> Result<RequestDefinition, ParamsError> {
        let method = char_unescape(&self.method).trim().to_ascii_uppercase();
        if !is_token(&method) {
            return Err(ParamsError::InvalidMethod(method));
        }

        let headers = parse_header_list(&char_unescape(&self.header))?;

        let username = char_unescape(&self.username);
        let password = char_unescape(&self.password);
        let auth = if username.is_empty() && password.is_empty() {
            None
        } else {
            Some(BasicAuth { username, password })
        };

        let body = char_unescape(&self.body);

        Ok(RequestDefinition {
            method,
            url: self.uri.clone(),
            headers,
            auth,
            body: (!body.is_empty()).then_some(body),
        })
    }
}

impl RequestInput {
    pub fn into_descriptor(self) -> Result<RequestDescriptor, ParamsError> {
        RequestDescriptor::new(
            &self.uri,
            char_escape(&self.method),
            char_escape(&self.header),
            char_escape(&self.username),
            char_escape(&self.password),
            char_escape(&self.body),
        )
    }
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}
