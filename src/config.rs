//! Resolution of the initial parameter store.
//!
//! Layers, lowest priority first: the built-in style, an optional TOML file,
//! then `GL_STYLE_<SECTION>__<FIELD>` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::panel::PanelKind;
use crate::params::ParameterStore;

/// Environment prefix for per-field overrides.
pub const ENV_PREFIX: &str = "GL_STYLE_";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Params file given on the command line does not exist
    MissingFile(PathBuf),
    /// Layer merge or extraction failed
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Toml(toml::ser::Error),
    /// JSON serialization error
    Json(serde_json::Error),
    /// YAML serialization error
    Yaml(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile(p) => write!(f, "params file not found: {}", p.display()),
            Self::Extract(e) => write!(f, "invalid parameters: {}", e),
            Self::Toml(e) => write!(f, "TOML serialize error: {}", e),
            Self::Json(e) => write!(f, "JSON serialize error: {}", e),
            Self::Yaml(e) => write!(f, "YAML serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

/// Output format for a resolved store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreFormat {
    #[default]
    Toml,
    Json,
    Yaml,
}

/// The style the editor opens with when nothing overrides it.
pub fn default_store() -> ParameterStore {
    ParameterStore::new()
        .with("Circle", "fill", true)
        .with("Circle", "fill_alpha", 0.2)
        .with("Circle", "line_width", 1_i64)
        .with("Circle", "line_style", "-")
        .with("Circle", "color", "")
        .with("Rectangle", "fill", false)
        .with("Rectangle", "fill_alpha", 0.5)
        .with("Rectangle", "line_width", 2_i64)
        .with("Rectangle", "line_style", "--")
        .with("Rectangle", "color", "#1f77b4")
        .with("Labels", "font_family", "DejaVu Sans")
        .with("Labels", "font_size", 10_i64)
        .with("Labels", "color", "#000000")
}

/// Build the layered figment without extracting it.
pub fn figment(params: Option<&Path>) -> Result<Figment, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(default_store()));

    if let Some(path) = params {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        figment = figment.merge(Toml::file(path));
    }

    // Only `<SECTION>__<FIELD>` keys; anything else would land as a
    // top-level scalar and break extraction. `lowercase` must come last,
    // `map` resets it.
    let env = Env::prefixed(ENV_PREFIX)
        .filter(|key| key.as_str().contains("__"))
        .split("__")
        .map(|key| canonical_key(key.as_str()).into())
        .lowercase(false);

    Ok(figment.merge(env))
}

/// Resolve the store from every layer.
pub fn load_store(params: Option<&Path>) -> Result<ParameterStore, ConfigError> {
    let store: ParameterStore = figment(params)?.extract()?;
    tracing::info!(
        sections = store.sections().count(),
        file = ?params,
        "parameter store resolved"
    );
    Ok(store)
}

/// Parse a store from TOML text layered over the defaults.
pub fn store_from_toml(text: &str) -> Result<ParameterStore, ConfigError> {
    Ok(Figment::from(Serialized::defaults(default_store()))
        .merge(Toml::string(text))
        .extract()?)
}

pub fn render(store: &ParameterStore, format: StoreFormat) -> Result<String, ConfigError> {
    Ok(match format {
        StoreFormat::Toml => toml::to_string_pretty(store)?,
        StoreFormat::Json => serde_json::to_string_pretty(store)?,
        StoreFormat::Yaml => serde_yaml::to_string(store)?,
    })
}

/// Map `CIRCLE.LINE_WIDTH` onto `Circle.line_width`. Unknown sections keep
/// their env spelling so they still surface in the store.
fn canonical_key(key: &str) -> String {
    let (section, field) = key.split_once('.').unwrap_or((key, ""));
    let section = PanelKind::ALL
        .iter()
        .map(|kind| kind.section())
        .find(|s| s.eq_ignore_ascii_case(section))
        .map_or_else(|| section.to_string(), str::to_string);

    if field.is_empty() {
        section
    } else {
        format!("{section}.{}", field.to_ascii_lowercase())
    }
}
