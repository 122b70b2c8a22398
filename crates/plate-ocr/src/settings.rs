use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::{CliArgs, CliSources, DEFAULT_LANGUAGE, EngineChoice, OutputFormat};

const PROJECT_CONFIG_FILE: &str = "plate-ocr.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    image: Option<String>,
    threshold: Option<f32>,
    engine: Option<String>,
    replay: Option<String>,
    languages: Option<Vec<String>>,
    format: Option<String>,
    show_detections: Option<bool>,
}

/// Everything one run needs, resolved from CLI arguments and the config file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub image: PathBuf,
    pub threshold: f32,
    pub engine: EngineChoice,
    pub replay: Option<PathBuf>,
    pub languages: Vec<String>,
    pub format: OutputFormat,
    pub show_detections: bool,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for '{field}'{}", describe_path(path.as_deref()))]
    InvalidValue {
        path: Option<PathBuf>,
        field: &'static str,
        value: String,
    },
    #[error("config file {} does not exist", path.display())]
    NotFound { path: PathBuf },
}

fn describe_path(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

pub fn resolve_settings(cli: &CliArgs, sources: &CliSources) -> Result<RunSettings, ConfigError> {
    let (file, config_path) = load_config(cli.config.as_deref())?;
    merge(cli, sources, file, config_path)
}

fn load_config(path_override: Option<&Path>) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = path_override {
        let path = path.to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        let config = read_config(&path)?;
        return Ok((config, Some(path)));
    }

    for candidate in [project_config_path(), default_config_path()]
        .into_iter()
        .flatten()
    {
        if candidate.exists() {
            let config = read_config(&candidate)?;
            return Ok((config, Some(candidate)));
        }
    }

    Ok((FileConfig::default(), None))
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn merge(
    cli: &CliArgs,
    sources: &CliSources,
    file: FileConfig,
    config_path: Option<PathBuf>,
) -> Result<RunSettings, ConfigError> {
    let config_dir = config_path
        .as_ref()
        .and_then(|path| path.parent().map(|dir| dir.to_path_buf()));

    let FileConfig {
        image: file_image,
        threshold: file_threshold,
        engine: file_engine,
        replay: file_replay,
        languages: file_languages,
        format: file_format,
        show_detections: file_show_detections,
    } = file;

    let mut image = expand_pathbuf(cli.image.clone());
    if !sources.image_from_cli {
        if let Some(path) = normalize_string(file_image)
            .and_then(|value| resolve_path_from_config(value, config_dir.as_deref()))
        {
            image = path;
        }
    }

    let mut threshold = cli.threshold;
    if !sources.threshold_from_cli {
        if let Some(value) = file_threshold {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    path: config_path,
                    field: "threshold",
                    value: value.to_string(),
                });
            }
            threshold = value;
        }
    }
    if !threshold.is_finite() {
        return Err(ConfigError::InvalidValue {
            path: None,
            field: "threshold",
            value: threshold.to_string(),
        });
    }

    let mut engine = cli.engine;
    if !sources.engine_from_cli {
        if let Some(value) = normalize_string(file_engine) {
            engine = parse_engine(&value, config_path.as_ref())?;
        }
    }

    let replay = match cli.replay.clone() {
        Some(path) => Some(expand_pathbuf(path)),
        None => normalize_string(file_replay)
            .and_then(|value| resolve_path_from_config(value, config_dir.as_deref())),
    };
    if engine == EngineChoice::Replay && replay.is_none() {
        return Err(ConfigError::InvalidValue {
            path: config_path,
            field: "replay",
            value: String::new(),
        });
    }

    let mut languages = normalize_languages(cli.languages.clone());
    if !sources.languages_from_cli {
        if let Some(values) = file_languages {
            languages = normalize_languages(values);
        }
    }
    if languages.is_empty() {
        languages.push(DEFAULT_LANGUAGE.to_string());
    }

    let mut format = cli.format;
    if !sources.format_from_cli {
        if let Some(value) = normalize_string(file_format) {
            format = parse_format(&value, config_path.as_ref())?;
        }
    }

    let show_detections = if cli.show_detections {
        true
    } else if cli.hide_detections {
        false
    } else {
        file_show_detections.unwrap_or(true)
    };

    Ok(RunSettings {
        image,
        threshold,
        engine,
        replay,
        languages,
        format,
        show_detections,
        config_path,
    })
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("rs", "plate-ocr", "plate-ocr")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    env::current_dir()
        .ok()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
}

fn normalize_string(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn normalize_languages(values: Vec<String>) -> Vec<String> {
    let mut languages: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if let Some(value) = normalize_string(Some(value)) {
            if !languages.contains(&value) {
                languages.push(value);
            }
        }
    }
    languages
}

fn expand_pathbuf(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(s) => expand_home_path(s),
        None => path,
    }
}

fn resolve_path_from_config(value: String, base: Option<&Path>) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let expanded = expand_home_path(trimmed);
    match base {
        Some(base) if !expanded.is_absolute() => Some(base.join(expanded)),
        _ => Some(expanded),
    }
}

fn expand_home_path(value: &str) -> PathBuf {
    if value == "~" {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().to_path_buf();
        }
    } else if let Some(stripped) = value.strip_prefix("~/") {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().join(stripped);
        }
    }
    PathBuf::from(value)
}

fn parse_engine(value: &str, path: Option<&PathBuf>) -> Result<EngineChoice, ConfigError> {
    EngineChoice::from_str(value, true).map_err(|_| ConfigError::InvalidValue {
        path: path.cloned(),
        field: "engine",
        value: value.to_string(),
    })
}

fn parse_format(value: &str, path: Option<&PathBuf>) -> Result<OutputFormat, ConfigError> {
    OutputFormat::from_str(value, true).map_err(|_| ConfigError::InvalidValue {
        path: path.cloned(),
        field: "format",
        value: value.to_string(),
    })
}
