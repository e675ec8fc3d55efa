use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("parameter entry `{0}` has no `=` separator")]
    MissingSeparator(String),
    #[error("parameters do not include a uri")]
    MissingUri,
    #[error("invalid uri `{uri}`: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),
    #[error("invalid header entry `{0}`, expected name:value")]
    InvalidHeader(String),
}
