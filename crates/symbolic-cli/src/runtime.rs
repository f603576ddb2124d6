// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use symbolic_app::{HostId, PickerOptions, PickerRegistry};
use symbolic_tui::{AppRuntime, PickerSlot, SelectionFlow};
use tracing::info;

/// One confirmed cell selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub label: String,
    pub value: String,
}

/// Records selections; with `quit_after_first` the session ends on the
/// first one.
#[derive(Debug, Clone, Default)]
pub struct SelectionRecorder {
    quit_after_first: bool,
    selections: Vec<Selection>,
}

impl SelectionRecorder {
    pub fn new(quit_after_first: bool) -> Self {
        Self {
            quit_after_first,
            selections: Vec::new(),
        }
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }
}

impl AppRuntime for SelectionRecorder {
    fn on_selected(&mut self, host: HostId, label: &str, value: &str) -> Result<SelectionFlow> {
        info!(host = host.get(), label, value, "selected");
        self.selections.push(Selection {
            label: label.to_owned(),
            value: value.to_owned(),
        });

        if self.quit_after_first {
            Ok(SelectionFlow::Quit)
        } else {
            Ok(SelectionFlow::Continue)
        }
    }
}

/// Attaches one picker per labelled option set, numbering hosts from 1.
pub fn build_pickers(
    entries: Vec<(String, PickerOptions)>,
) -> Result<(PickerRegistry, Vec<PickerSlot>)> {
    let mut registry = PickerRegistry::new();
    let mut slots = Vec::with_capacity(entries.len());
    for (index, (label, options)) in entries.into_iter().enumerate() {
        let host = HostId::new(u32::try_from(index + 1).context("too many pickers")?);
        registry
            .attach(host, options)
            .with_context(|| format!("attach picker {label:?}"))?;
        slots.push(PickerSlot::new(host, label));
    }
    Ok((registry, slots))
}

/// Final values, one `label<TAB>value` line per picker; a lone picker
/// prints just its value.
pub fn selection_report(registry: &PickerRegistry, slots: &[PickerSlot]) -> String {
    let mut lines = Vec::with_capacity(slots.len());
    for slot in slots {
        let Some(picker) = registry.get(slot.host) else {
            continue;
        };
        if slots.len() == 1 {
            lines.push(picker.get().to_owned());
        } else {
            lines.push(format!("{}\t{}", slot.label, picker.get()));
        }
    }

    let mut report = lines.join("\n");
    if !report.is_empty() {
        report.push('\n');
    }
    report
}
