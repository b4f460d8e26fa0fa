//! Infrastructure layer: filesystem locations used by the shell and the
//! tracing setup.

pub mod paths;

pub use paths::{expand_tilde, get_config_path, get_data_dir, DATA_DIR_ENV};
