pub mod lens_config;

pub use lens_config::{CONFIG_FILE_NAME, LensConfig};
