/// Application name
pub const APP_NAME: &str = "formwork";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between namespace and type in a qualified key (`ui:button`)
pub const QUALIFIED_KEY_SEPARATOR: char = ':';

/// Config file the host binary looks for when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "formwork.toml";

/// Log level used when neither the config file nor the command line sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";
