// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use tracing::debug;

use crate::geometry::{PanelOffset, Surface, offset_for};
use crate::{CellIndex, HostId, Palette, PickerOptions, Templates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

/// Whether an event continues on to document-level listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Presentation flags applied to the anchor and the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub anchor_active: bool,
    pub panel_hidden: bool,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            anchor_active: false,
            panel_hidden: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    VisibilityChanged(Visibility),
    PreviewUpdated(String),
    PanelPlaced(PanelOffset),
    Selected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerController {
    host: HostId,
    templates: Templates,
    palette: Palette,
    current: String,
    preview: String,
    visibility: Visibility,
    listening: bool,
    presentation: Presentation,
    placement: Option<PanelOffset>,
}

impl PickerController {
    pub fn new(host: HostId, options: PickerOptions) -> Result<Self> {
        let Some(current) = options.initial_selection().map(str::to_owned) else {
            bail!(
                "picker {} has an empty palette and no initial value; add at least one symbol",
                host.get()
            );
        };

        let preview = options.templates.preview.render(&current);
        debug!(host = host.get(), initial = %current, "picker attached");
        Ok(Self {
            host,
            templates: options.templates,
            palette: options.palette,
            current,
            preview,
            visibility: Visibility::Closed,
            listening: false,
            presentation: Presentation::default(),
            placement: None,
        })
    }

    pub const fn host(&self) -> HostId {
        self.host
    }

    pub fn get(&self) -> &str {
        &self.current
    }

    /// Any value is accepted, including ones absent from the palette.
    pub fn set(&mut self, value: impl Into<String>) -> Vec<PickerEvent> {
        self.current = value.into();
        self.preview = self.templates.preview.render(&self.current);
        debug!(host = self.host.get(), value = %self.current, "set");
        vec![PickerEvent::PreviewUpdated(self.preview.clone())]
    }

    pub fn show<S: Surface + ?Sized>(&mut self, surface: &S) -> Vec<PickerEvent> {
        if self.is_open() {
            return Vec::new();
        }

        let offset = offset_for(surface, self.host);
        self.placement = Some(offset);
        self.visibility = Visibility::Open;
        self.listening = true;
        self.presentation = Presentation {
            anchor_active: true,
            panel_hidden: false,
        };
        debug!(
            host = self.host.get(),
            top = offset.top,
            left = offset.left,
            "show"
        );
        vec![
            PickerEvent::PanelPlaced(offset),
            PickerEvent::VisibilityChanged(Visibility::Open),
        ]
    }

    pub fn hide(&mut self) -> Vec<PickerEvent> {
        if !self.is_open() {
            return Vec::new();
        }

        self.visibility = Visibility::Closed;
        self.listening = false;
        self.presentation = Presentation::default();
        debug!(host = self.host.get(), "hide");
        vec![PickerEvent::VisibilityChanged(Visibility::Closed)]
    }

    pub fn toggle<S: Surface + ?Sized>(&mut self, surface: &S) -> Vec<PickerEvent> {
        if self.is_open() {
            self.hide()
        } else {
            self.show(surface)
        }
    }

    /// Document-level pointer activation outside this picker.
    pub fn handle_outside_click(&mut self, button: PointerButton) -> Vec<PickerEvent> {
        if !self.listening {
            return Vec::new();
        }
        if button == PointerButton::Secondary {
            debug!(host = self.host.get(), "outside click ignored for secondary button");
            return Vec::new();
        }
        self.hide()
    }

    pub fn handle_cell_click(&mut self, cell: CellIndex) -> (Propagation, Vec<PickerEvent>) {
        let Some(value) = self.palette.cell(cell).map(str::to_owned) else {
            return (Propagation::Stop, Vec::new());
        };

        let mut events = self.set(value.clone());
        events.extend(self.hide());
        events.push(PickerEvent::Selected(value));
        (Propagation::Stop, events)
    }

    pub fn handle_anchor_click<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> (Propagation, Vec<PickerEvent>) {
        (Propagation::Stop, self.toggle(surface))
    }

    /// Clicks on panel chrome never count as outside clicks.
    pub fn handle_panel_click(&self) -> Propagation {
        Propagation::Stop
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    pub const fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Where the panel was last placed; `None` until the first `show`.
    pub const fn placement(&self) -> Option<PanelOffset> {
        self.placement
    }

    pub fn preview_text(&self) -> &str {
        &self.preview
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }
}
