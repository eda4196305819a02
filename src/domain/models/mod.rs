pub mod config;
pub mod settings;

pub use config::{LoggingConfig, OutputConfig, ToolConfig};
pub use settings::{
    Admin, DatabaseSettings, EmailSettings, NetBoxSettings, OriginPattern, RedisConnection,
    RedisSettings,
};
