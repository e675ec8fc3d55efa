mod error;
mod escape;
mod headers;
mod model;
mod reader;

pub use error::ParamsError;
pub use escape::{char_escape, char_unescape};
pub use headers::parse_header_list;
pub use model::{BasicAuth, Mode, RequestDefinition, RequestDescriptor, RequestInput};
pub use reader::{parse_params, KEY_VALUE_SEPARATOR, PARAM_SEPARATOR};
