pub mod config;
#[cfg(feature = "cli")]
pub mod dispatch;
#[cfg(feature = "cli")]
pub mod executor;
pub mod flatten;
pub mod output;
pub mod params;
#[cfg(feature = "cli")]
pub mod preview;
