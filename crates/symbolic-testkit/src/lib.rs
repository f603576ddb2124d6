// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;
use symbolic_app::{Bounds, HostId, Palette, Point, Size, Surface, Viewport};

const SYMBOL_POOL: [&str; 24] = [
    "😀", "😁", "😂", "😃", "😄", "😅", "😆", "😉", "😊", "😋", "😎", "😍", "★", "☆", "♠", "♣",
    "♥", "♦", "→", "←", "↑", "↓", "✓", "✗",
];

const DEFAULT_ANCHOR: Bounds = Bounds::new(0, 0, 6, 3);
const DEFAULT_PANEL: Size = Size::new(12, 4);
const DEFAULT_VIEWPORT: Size = Size::new(80, 24);

/// Surface with geometry fixed up front.
#[derive(Debug, Clone)]
pub struct FixedSurface {
    anchors: BTreeMap<HostId, Bounds>,
    panels: BTreeMap<HostId, Size>,
    viewport: Viewport,
}

impl FixedSurface {
    pub fn new(viewport: Size) -> Self {
        Self {
            anchors: BTreeMap::new(),
            panels: BTreeMap::new(),
            viewport: Viewport::new(viewport),
        }
    }

    pub fn with_anchor(mut self, host: HostId, bounds: Bounds) -> Self {
        self.anchors.insert(host, bounds);
        self
    }

    pub fn with_panel(mut self, host: HostId, size: Size) -> Self {
        self.panels.insert(host, size);
        self
    }

    pub fn with_scroll(mut self, scroll: Point) -> Self {
        self.viewport = self.viewport.scrolled(scroll);
        self
    }

    pub fn move_anchor(&mut self, host: HostId, bounds: Bounds) {
        self.anchors.insert(host, bounds);
    }
}

impl Default for FixedSurface {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

impl Surface for FixedSurface {
    fn anchor_bounds(&self, host: HostId) -> Bounds {
        self.anchors.get(&host).copied().unwrap_or(DEFAULT_ANCHOR)
    }

    fn panel_size(&self, host: HostId) -> Size {
        self.panels.get(&host).copied().unwrap_or(DEFAULT_PANEL)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// One randomly drawn placement problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryCase {
    pub anchor: Bounds,
    pub panel: Size,
    pub viewport: Size,
    pub scroll: Point,
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Reproducible source of geometry cases and palettes.
#[derive(Debug, Clone)]
pub struct GeometryFaker {
    rng: DeterministicRng,
}

impl GeometryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn cell(&mut self, min: u16, max: u16) -> u16 {
        if max <= min {
            return min;
        }
        let span = usize::from(max - min) + 1;
        min + self.rng.int_n(span) as u16
    }

    pub fn case(&mut self) -> GeometryCase {
        let viewport = Size::new(self.cell(20, 240), self.cell(8, 80));
        let anchor = Bounds::new(
            self.cell(0, viewport.width),
            self.cell(0, viewport.height),
            self.cell(1, 30),
            self.cell(1, 5),
        );
        let panel = Size::new(
            self.cell(1, viewport.width.saturating_add(20)),
            self.cell(1, viewport.height.saturating_add(10)),
        );
        let scroll = if self.rng.int_n(4) == 0 {
            Point::new(self.cell(0, 40), self.cell(0, 40))
        } else {
            Point::new(0, 0)
        };
        GeometryCase {
            anchor,
            panel,
            viewport,
            scroll,
        }
    }

    pub fn cases(&mut self, count: usize) -> Vec<GeometryCase> {
        (0..count).map(|_| self.case()).collect()
    }

    pub fn palette(&mut self, max_rows: usize, max_columns: usize) -> Palette {
        let rows = 1 + self.rng.int_n(max_rows.max(1));
        Palette::new((0..rows).map(|_| {
            let columns = 1 + self.rng.int_n(max_columns.max(1));
            (0..columns)
                .map(|_| SYMBOL_POOL[self.rng.int_n(SYMBOL_POOL.len())])
                .collect::<Vec<_>>()
        }))
    }
}

/// Two rows, three symbols: `[["A", "B"], ["C"]]`.
pub fn letter_palette() -> Palette {
    Palette::new([vec!["A", "B"], vec!["C"]])
}

pub fn symbol_pool() -> &'static [&'static str] {
    &SYMBOL_POOL
}

pub fn temp_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content)
        .with_context(|| format!("write config fixture {}", path.display()))?;
    Ok((dir, path))
}
