mod loader;

pub use loader::{
    load_config, HttpAccessConfig, LoadedConfig, RequestDefaults, CONFIG_FILE_NAME,
    PREVIEW_MAX_ROWS,
};
