//! Layered CLI configuration: defaults, then the TOML file named by
//! `TILT_CONFIG`, then `TILT_*` environment variables. Command-line flags
//! are applied on top by each command.

use serde::{Deserialize, Serialize};
use std::fs;

use tilt_engine::player::STARTING_STACK;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub buy_in: u32,
    pub level: u8,
    pub seed: Option<u64>,
    /// Preset for the bot seat
    pub opponent: String,
    /// Preset for the engine that plays the human seat in `sim`
    pub stand_in: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub buy_in: ValueSource,
    pub level: ValueSource,
    pub seed: ValueSource,
    pub opponent: ValueSource,
    pub stand_in: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            buy_in: ValueSource::Default,
            level: ValueSource::Default,
            seed: ValueSource::Default,
            opponent: ValueSource::Default,
            stand_in: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buy_in: STARTING_STACK,
            level: 1,
            seed: None,
            opponent: "pro".into(),
            stand_in: "gto".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TILT_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.level {
            cfg.level = v;
            sources.level = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.opponent {
            cfg.opponent = v;
            sources.opponent = ValueSource::File;
        }
        if let Some(v) = f.stand_in {
            cfg.stand_in = v;
            sources.stand_in = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("TILT_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(level) = std::env::var("TILT_LEVEL")
        && !level.is_empty()
    {
        cfg.level = level
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid level".into()))?;
        sources.level = ValueSource::Env;
    }
    if let Ok(buy_in) = std::env::var("TILT_BUY_IN")
        && !buy_in.is_empty()
    {
        cfg.buy_in = buy_in
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid buy_in".into()))?;
        sources.buy_in = ValueSource::Env;
    }
    if let Ok(opp) = std::env::var("TILT_OPPONENT")
        && !opp.is_empty()
    {
        cfg.opponent = opp;
        sources.opponent = ValueSource::Env;
    }
    if let Ok(stand_in) = std::env::var("TILT_STAND_IN")
        && !stand_in.is_empty()
    {
        cfg.stand_in = stand_in;
        sources.stand_in = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    opponent: Option<String>,
    #[serde(default)]
    stand_in: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(1..=10).contains(&cfg.level) {
        return Err(ConfigError::Invalid(
            "level must be between 1 and 10".into(),
        ));
    }
    if cfg.buy_in == 0 {
        return Err(ConfigError::Invalid("buy_in must be >0".into()));
    }
    Ok(())
}
