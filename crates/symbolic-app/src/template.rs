// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const VALUE_PLACEHOLDER: &str = "{value}";
pub const DEFAULT_PREVIEW_TEMPLATE: &str = "{value} ▼";

/// Text shown inside the anchor; `{value}` is replaced by the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTemplate {
    source: String,
}

impl PreviewTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_placeholder(&self) -> bool {
        self.source.contains(VALUE_PLACEHOLDER)
    }

    pub fn render(&self, value: &str) -> String {
        self.source.replace(VALUE_PLACEHOLDER, value)
    }
}

impl Default for PreviewTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_TEMPLATE)
    }
}

/// Decoration of the floating panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerTemplate {
    pub title: String,
    pub bordered: bool,
}

impl Default for ContainerTemplate {
    fn default() -> Self {
        Self {
            title: String::new(),
            bordered: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates {
    pub preview: PreviewTemplate,
    pub container: ContainerTemplate,
}
