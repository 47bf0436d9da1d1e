//! Utility modules for deckhand

pub mod logging;

pub use logging::{
    config_from_env, init_default, init_from_env, init_logging, parse_level, LoggingConfig,
};
