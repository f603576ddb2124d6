// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

use crate::geometry::Surface;
use crate::{CellIndex, HostId, PickerController, PickerEvent, PickerOptions, PointerButton};
use crate::{Propagation, Visibility};

/// What a pointer activation landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Anchor(HostId),
    Cell(HostId, CellIndex),
    Panel(HostId),
    Document,
}

/// Pickers keyed by the host they are attached to; one per host.
#[derive(Debug, Clone, Default)]
pub struct PickerRegistry {
    pickers: BTreeMap<HostId, PickerController>,
}

impl PickerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Ok(false)` without touching the existing picker when the
    /// host already has one.
    pub fn attach(&mut self, host: HostId, options: PickerOptions) -> Result<bool> {
        if self.pickers.contains_key(&host) {
            debug!(host = host.get(), "picker already attached");
            return Ok(false);
        }

        let controller = PickerController::new(host, options)?;
        self.pickers.insert(host, controller);
        Ok(true)
    }

    pub fn detach(&mut self, host: HostId) -> Option<PickerController> {
        let removed = self.pickers.remove(&host);
        if removed.is_some() {
            debug!(host = host.get(), "picker detached");
        }
        removed
    }

    pub fn get(&self, host: HostId) -> Option<&PickerController> {
        self.pickers.get(&host)
    }

    pub fn get_mut(&mut self, host: HostId) -> Option<&mut PickerController> {
        self.pickers.get_mut(&host)
    }

    pub fn contains(&self, host: HostId) -> bool {
        self.pickers.contains_key(&host)
    }

    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PickerController> + '_ {
        self.pickers.values()
    }

    pub fn open_hosts(&self) -> Vec<HostId> {
        self.pickers
            .values()
            .filter(|picker| picker.is_open())
            .map(PickerController::host)
            .collect()
    }

    /// Routes one pointer activation: the targeted picker handles it first,
    /// then every listening picker sees it as an outside click unless the
    /// target stopped propagation.
    pub fn dispatch_pointer<S: Surface + ?Sized>(
        &mut self,
        target: PointerTarget,
        button: PointerButton,
        surface: &S,
    ) -> Vec<(HostId, PickerEvent)> {
        let mut events = Vec::new();
        let propagation = match target {
            PointerTarget::Anchor(host) => match self.pickers.get_mut(&host) {
                Some(picker) => {
                    let (propagation, emitted) = picker.handle_anchor_click(surface);
                    events.extend(emitted.into_iter().map(|event| (host, event)));
                    propagation
                }
                None => Propagation::Continue,
            },
            PointerTarget::Cell(host, cell) => match self.pickers.get_mut(&host) {
                Some(picker) => {
                    let (propagation, emitted) = picker.handle_cell_click(cell);
                    events.extend(emitted.into_iter().map(|event| (host, event)));
                    propagation
                }
                None => Propagation::Continue,
            },
            PointerTarget::Panel(host) => self
                .pickers
                .get(&host)
                .map_or(Propagation::Continue, PickerController::handle_panel_click),
            PointerTarget::Document => Propagation::Continue,
        };

        if propagation == Propagation::Continue {
            for picker in self.pickers.values_mut() {
                let host = picker.host();
                let emitted = picker.handle_outside_click(button);
                events.extend(emitted.into_iter().map(|event| (host, event)));
            }
        }

        events
    }

    pub fn hide_all(&mut self) -> Vec<(HostId, PickerEvent)> {
        let mut events = Vec::new();
        for picker in self.pickers.values_mut() {
            let host = picker.host();
            events.extend(picker.hide().into_iter().map(|event| (host, event)));
        }
        events
    }

    pub fn visibility(&self, host: HostId) -> Option<Visibility> {
        self.get(host).map(PickerController::visibility)
    }
}
