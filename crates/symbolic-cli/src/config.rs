// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use symbolic_app::{
    ContainerTemplate, DEFAULT_PREVIEW_TEMPLATE, Palette, PickerOptions, PreviewTemplate,
    Templates,
};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "symbolic";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LABEL: &str = "symbol";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub templates: TemplateDefaults,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub pickers: Vec<PickerEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            templates: TemplateDefaults::default(),
            log: Log::default(),
            pickers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDefaults {
    pub preview: Option<String>,
    pub container_title: Option<String>,
    pub container_border: Option<bool>,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            preview: Some(DEFAULT_PREVIEW_TEMPLATE.to_owned()),
            container_title: Some(String::new()),
            container_border: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickerEntry {
    pub label: String,
    pub palette: Option<Palette>,
    pub initial: Option<String>,
    pub preview: Option<String>,
    pub container_title: Option<String>,
    pub container_border: Option<bool>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SYMBOLIC_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SYMBOLIC_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` at the top",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(preview) = &self.templates.preview {
            validate_preview(path, "templates.preview", preview)?;
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!("log.level in {} is not a valid filter: {level:?}", path.display())
            })?;
        }

        let mut labels = BTreeSet::new();
        for (index, entry) in self.pickers.iter().enumerate() {
            let label = entry.label.trim();
            if label.is_empty() {
                bail!(
                    "pickers[{index}].label in {} must not be empty",
                    path.display()
                );
            }
            if !labels.insert(label) {
                bail!(
                    "pickers[{index}].label {label:?} in {} is used more than once",
                    path.display()
                );
            }
            if let Some(preview) = &entry.preview {
                validate_preview(path, &format!("pickers[{index}].preview"), preview)?;
            }

            let has_cells = entry.palette.as_ref().is_none_or(Palette::has_cells);
            if !has_cells && entry.initial.is_none() {
                bail!(
                    "pickers[{index}] ({label}) in {} has an empty palette and no initial value",
                    path.display()
                );
            }
        }

        Ok(())
    }

    pub fn templates(&self) -> Templates {
        Templates {
            preview: PreviewTemplate::new(
                self.templates
                    .preview
                    .as_deref()
                    .unwrap_or(DEFAULT_PREVIEW_TEMPLATE),
            ),
            container: ContainerTemplate {
                title: self.templates.container_title.clone().unwrap_or_default(),
                bordered: self.templates.container_border.unwrap_or(true),
            },
        }
    }

    /// Labelled options for every configured picker, or one default picker.
    pub fn pickers(&self) -> Vec<(String, PickerOptions)> {
        let defaults = self.templates();
        if self.pickers.is_empty() {
            return vec![(
                DEFAULT_LABEL.to_owned(),
                PickerOptions::default().templates(defaults),
            )];
        }

        self.pickers
            .iter()
            .map(|entry| {
                let templates = Templates {
                    preview: entry
                        .preview
                        .as_deref()
                        .map_or_else(|| defaults.preview.clone(), PreviewTemplate::new),
                    container: ContainerTemplate {
                        title: entry
                            .container_title
                            .clone()
                            .unwrap_or_else(|| defaults.container.title.clone()),
                        bordered: entry
                            .container_border
                            .unwrap_or(defaults.container.bordered),
                    },
                };
                let options = PickerOptions {
                    templates,
                    palette: entry.palette.clone().unwrap_or_default(),
                    initial: entry.initial.clone(),
                };
                (entry.label.trim().to_owned(), options)
            })
            .collect()
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }

        let cache_root = dirs::cache_dir()
            .ok_or_else(|| anyhow!("cannot resolve cache directory; set [log].path"))?;
        Ok(cache_root.join(APP_NAME).join("symbolic.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# symbolic config\n# Place this file at: {}\n\nversion = 1\n\n[templates]\n# `{{value}}` is replaced by the current selection\npreview = \"{}\"\ncontainer_title = \"\"\ncontainer_border = true\n\n[log]\n# tracing filter; SYMBOLIC_LOG overrides it\nlevel = \"{}\"\n# path = \"/tmp/symbolic.log\"\n\n[[pickers]]\nlabel = \"mood\"\npalette = [[\"😂\", \"😅\", \"😄\", \"😆\", \"😀\"], [\"😹\", \"😸\", \"😼\", \"😏\"]]\n\n[[pickers]]\nlabel = \"mark\"\npalette = [[\"✓\", \"✗\"], [\"★\", \"☆\"]]\ninitial = \"★\"\ncontainer_title = \"mark\"\n",
            path.display(),
            DEFAULT_PREVIEW_TEMPLATE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn validate_preview(path: &Path, key: &str, template: &str) -> Result<()> {
    if !PreviewTemplate::new(template).has_placeholder() {
        bail!(
            "{key} in {} must contain {{value}}, got {template:?}",
            path.display()
        );
    }
    Ok(())
}
