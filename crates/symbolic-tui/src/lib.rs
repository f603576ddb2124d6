// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;
use symbolic_app::{
    Bounds, CellIndex, HostId, PickerController, PickerEvent, PickerRegistry, Point,
    PointerButton, PointerTarget, Size, Surface, Viewport,
};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

const HEADER_ROWS: u16 = 1;
const ANCHOR_HEIGHT: u16 = 3;
const LABEL_GAP: u16 = 2;
const CELL_PADDING: u16 = 1;
const IDLE_HINT: &str = "click to pick · esc close · q quit";

/// A picker as placed on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSlot {
    pub host: HostId,
    pub label: String,
}

impl PickerSlot {
    pub fn new(host: HostId, label: impl Into<String>) -> Self {
        Self {
            host,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFlow {
    Continue,
    Quit,
}

/// Receives the `selected` notification raised on a host.
pub trait AppRuntime {
    fn on_selected(&mut self, host: HostId, label: &str, value: &str) -> Result<SelectionFlow>;
}

/// Layout of the last rendered frame; answers the pickers' geometry queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ViewData {
    viewport: Rect,
    anchors: BTreeMap<HostId, Rect>,
    panels: BTreeMap<HostId, Size>,
    status_line: Option<String>,
}

impl Surface for ViewData {
    fn anchor_bounds(&self, host: HostId) -> Bounds {
        self.anchors
            .get(&host)
            .copied()
            .map(bounds_from_rect)
            .unwrap_or_default()
    }

    fn panel_size(&self, host: HostId) -> Size {
        self.panels.get(&host).copied().unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(Size::new(self.viewport.width, self.viewport.height))
    }
}

pub fn run_app<R: AppRuntime>(
    registry: &mut PickerRegistry,
    slots: &[PickerSlot],
    runtime: &mut R,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let mut view_data = ViewData::default();
    info!(pickers = slots.len(), "picker session started");

    let mut result = Ok(());
    loop {
        if let Err(error) = terminal.draw(|frame| {
            refresh_layout(registry, slots, &mut view_data, frame.area());
            render(frame, registry, slots, &view_data);
        }) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }

        let quit = match event::read().context("read event") {
            Ok(Event::Key(key)) => handle_key_event(registry, &mut view_data, key),
            Ok(Event::Mouse(mouse)) => {
                match handle_mouse_event(registry, slots, &mut view_data, runtime, mouse) {
                    Ok(quit) => quit,
                    Err(error) => {
                        view_data.status_line = Some(format!("selection failed: {error:#}"));
                        false
                    }
                }
            }
            Ok(Event::Resize(_, _)) => false,
            Ok(_) => false,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if quit {
            break;
        }
    }

    info!("picker session ended");
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn handle_key_event(
    registry: &mut PickerRegistry,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        return true;
    }

    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Esc => {
            let closed = registry.hide_all();
            if !closed.is_empty() {
                view_data.status_line = Some("closed".to_owned());
            }
            false
        }
        _ => false,
    }
}

fn handle_mouse_event<R: AppRuntime>(
    registry: &mut PickerRegistry,
    slots: &[PickerSlot],
    view_data: &mut ViewData,
    runtime: &mut R,
    mouse: MouseEvent,
) -> Result<bool> {
    let MouseEventKind::Down(button) = mouse.kind else {
        return Ok(false);
    };

    let point = Point::new(mouse.column, mouse.row);
    let target = hit_test(registry, view_data, point);
    debug!(?target, ?button, x = point.x, y = point.y, "pointer down");
    let events = registry.dispatch_pointer(target, pointer_button(button), &*view_data);
    apply_events(slots, view_data, runtime, events)
}

fn apply_events<R: AppRuntime>(
    slots: &[PickerSlot],
    view_data: &mut ViewData,
    runtime: &mut R,
    events: Vec<(HostId, PickerEvent)>,
) -> Result<bool> {
    let mut quit = false;
    for (host, event) in events {
        if let PickerEvent::Selected(value) = event {
            let label = slot_label(slots, host);
            view_data.status_line = Some(format!("{label}: {value}"));
            if runtime
                .on_selected(host, label, &value)
                .with_context(|| format!("deliver selection for {label}"))?
                == SelectionFlow::Quit
            {
                quit = true;
            }
        }
    }
    Ok(quit)
}

fn slot_label(slots: &[PickerSlot], host: HostId) -> &str {
    slots
        .iter()
        .find(|slot| slot.host == host)
        .map_or("", |slot| slot.label.as_str())
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Auxiliary,
        MouseButton::Right => PointerButton::Secondary,
    }
}

/// Panels are drawn over everything else, so they are hit first; the one
/// drawn last wins where panels overlap.
fn hit_test(registry: &PickerRegistry, view_data: &ViewData, point: Point) -> PointerTarget {
    let open = registry
        .iter()
        .filter(|picker| !picker.presentation().panel_hidden)
        .collect::<Vec<_>>();
    for picker in open.into_iter().rev() {
        let host = picker.host();
        let Some(bounds) = panel_bounds(picker, view_data) else {
            continue;
        };
        if !bounds.contains(point) {
            continue;
        }
        return match cell_at(picker, bounds, point) {
            Some(cell) => PointerTarget::Cell(host, cell),
            None => PointerTarget::Panel(host),
        };
    }

    view_data
        .anchors
        .iter()
        .find(|(_, rect)| bounds_from_rect(**rect).contains(point))
        .map_or(PointerTarget::Document, |(host, _)| {
            PointerTarget::Anchor(*host)
        })
}

fn panel_bounds(picker: &PickerController, view_data: &ViewData) -> Option<Bounds> {
    let offset = picker.placement()?;
    let size = view_data.panel_size(picker.host());
    Some(offset.bounds(size))
}

fn cell_at(picker: &PickerController, panel: Bounds, point: Point) -> Option<CellIndex> {
    let inner = inner_bounds(picker, panel);
    if !inner.contains(point) {
        return None;
    }
    let width = cell_width(picker);
    let cell = CellIndex::new(
        usize::from(point.y - inner.origin.y),
        usize::from((point.x - inner.origin.x) / width),
    );
    picker.palette().cell(cell).map(|_| cell)
}

fn inner_bounds(picker: &PickerController, panel: Bounds) -> Bounds {
    if !picker.templates().container.bordered {
        return panel;
    }
    Bounds::new(
        panel.origin.x.saturating_add(1),
        panel.origin.y.saturating_add(1),
        panel.size.width.saturating_sub(2),
        panel.size.height.saturating_sub(2),
    )
}

fn cell_width(picker: &PickerController) -> u16 {
    let widest = picker
        .palette()
        .cells()
        .map(|(_, cell)| cell.width())
        .max()
        .unwrap_or(1)
        .max(1);
    u16::try_from(widest)
        .unwrap_or(u16::MAX)
        .saturating_add(CELL_PADDING)
}

fn panel_size(picker: &PickerController) -> Size {
    let columns = u16::try_from(picker.palette().column_count()).unwrap_or(u16::MAX);
    let rows = u16::try_from(picker.palette().row_count()).unwrap_or(u16::MAX);
    let container = &picker.templates().container;

    let mut width = columns.saturating_mul(cell_width(picker));
    let mut height = rows;
    if container.bordered {
        let title = u16::try_from(container.title.width()).unwrap_or(u16::MAX);
        width = width.max(title).saturating_add(2);
        height = height.saturating_add(2);
    }
    Size::new(width, height)
}

fn refresh_layout(
    registry: &PickerRegistry,
    slots: &[PickerSlot],
    view_data: &mut ViewData,
    area: Rect,
) {
    view_data.viewport = area;
    view_data.anchors.clear();
    view_data.panels.clear();

    let label_column = slots
        .iter()
        .map(|slot| slot.label.width())
        .max()
        .map_or(0, |width| u16::try_from(width).unwrap_or(u16::MAX))
        .saturating_add(LABEL_GAP);

    for (index, slot) in slots.iter().enumerate() {
        let Some(picker) = registry.get(slot.host) else {
            continue;
        };
        let row = u16::try_from(index).unwrap_or(u16::MAX);
        let y = area
            .y
            .saturating_add(HEADER_ROWS)
            .saturating_add(row.saturating_mul(ANCHOR_HEIGHT));
        let preview = u16::try_from(picker.preview_text().width()).unwrap_or(u16::MAX);
        let anchor = Rect::new(
            area.x.saturating_add(label_column),
            y,
            preview.saturating_add(2),
            ANCHOR_HEIGHT,
        )
        .intersection(area);
        if !anchor.is_empty() {
            view_data.anchors.insert(slot.host, anchor);
        }
        view_data.panels.insert(slot.host, panel_size(picker));
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    registry: &PickerRegistry,
    slots: &[PickerSlot],
    view_data: &ViewData,
) {
    let area = frame.area();
    let header = Paragraph::new("symbolic").style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(header, Rect::new(area.x, area.y, area.width, HEADER_ROWS));

    for slot in slots {
        let (Some(picker), Some(anchor)) =
            (registry.get(slot.host), view_data.anchors.get(&slot.host))
        else {
            continue;
        };

        let label_area = Rect::new(
            area.x,
            anchor.y.saturating_add(1),
            anchor.x.saturating_sub(area.x),
            1,
        );
        frame.render_widget(Paragraph::new(slot.label.as_str()), label_area);

        let style = if picker.presentation().anchor_active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let preview = Paragraph::new(picker.preview_text())
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(preview, *anchor);
    }

    for picker in registry.iter() {
        if picker.presentation().panel_hidden {
            continue;
        }
        let Some(bounds) = panel_bounds(picker, view_data) else {
            continue;
        };
        let panel_area = rect_from_bounds(bounds).intersection(area);
        if panel_area.is_empty() {
            continue;
        }

        frame.render_widget(Clear, panel_area);
        let container = &picker.templates().container;
        let mut palette = Paragraph::new(palette_lines(picker));
        if container.bordered {
            palette = palette.block(
                Block::default()
                    .title(container.title.as_str())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        }
        frame.render_widget(palette, panel_area);
    }

    let status_y = area.bottom().saturating_sub(1);
    if status_y >= area.y.saturating_add(HEADER_ROWS) {
        let status = Paragraph::new(status_text(view_data))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, Rect::new(area.x, status_y, area.width, 1));
    }
}

fn palette_lines(picker: &PickerController) -> Vec<Line<'static>> {
    let width = usize::from(cell_width(picker));
    picker
        .palette()
        .rows()
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| {
                        let padding = width.saturating_sub(cell.width());
                        let text = format!("{cell}{}", " ".repeat(padding));
                        if cell == picker.get() {
                            Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                        } else {
                            Span::raw(text)
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn status_text(view_data: &ViewData) -> String {
    view_data
        .status_line
        .clone()
        .unwrap_or_else(|| IDLE_HINT.to_owned())
}

fn bounds_from_rect(rect: Rect) -> Bounds {
    Bounds::new(rect.x, rect.y, rect.width, rect.height)
}

fn rect_from_bounds(bounds: Bounds) -> Rect {
    Rect::new(
        bounds.origin.x,
        bounds.origin.y,
        bounds.size.width,
        bounds.size.height,
    )
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, IDLE_HINT, PickerSlot, SelectionFlow, ViewData, cell_width,
        handle_key_event, handle_mouse_event, hit_test, panel_size, refresh_layout, render,
        status_text,
    };
    use anyhow::Result;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use symbolic_app::{
        CellIndex, ContainerTemplate, HostId, Palette, PickerOptions, PickerRegistry, Point,
        PointerTarget, PreviewTemplate, Size, Surface, Templates, Visibility,
    };
    use symbolic_testkit::letter_palette;

    const MOOD: HostId = HostId::new(1);
    const TAG: HostId = HostId::new(2);

    #[derive(Debug, Default)]
    struct TestRuntime {
        selections: Vec<(HostId, String, String)>,
        quit_after_first: bool,
    }

    impl AppRuntime for TestRuntime {
        fn on_selected(
            &mut self,
            host: HostId,
            label: &str,
            value: &str,
        ) -> Result<SelectionFlow> {
            self.selections
                .push((host, label.to_owned(), value.to_owned()));
            if self.quit_after_first {
                Ok(SelectionFlow::Quit)
            } else {
                Ok(SelectionFlow::Continue)
            }
        }
    }

    fn fixture() -> Result<(PickerRegistry, Vec<PickerSlot>, ViewData)> {
        let mut registry = PickerRegistry::new();
        registry.attach(MOOD, PickerOptions::with_palette(letter_palette()))?;
        registry.attach(
            TAG,
            PickerOptions::with_palette(Palette::new([vec!["x", "y", "z"]])).initial("y"),
        )?;
        let slots = vec![PickerSlot::new(MOOD, "mood"), PickerSlot::new(TAG, "tag")];
        let mut view_data = ViewData::default();
        refresh_layout(&registry, &slots, &mut view_data, Rect::new(0, 0, 40, 14));
        Ok((registry, slots, view_data))
    }

    fn click(column: u16, row: u16, button: MouseButton) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn layout_stacks_anchors_after_label_column() -> Result<()> {
        let (_, _, view_data) = fixture()?;
        // "mood" is the widest label (4) plus a gap of 2.
        assert_eq!(view_data.anchors.get(&MOOD), Some(&Rect::new(6, 1, 5, 3)));
        assert_eq!(view_data.anchors.get(&TAG), Some(&Rect::new(6, 4, 5, 3)));
        assert_eq!(view_data.viewport().size, Size::new(40, 14));
        Ok(())
    }

    #[test]
    fn panel_size_counts_cells_padding_and_border() -> Result<()> {
        let (registry, _, _) = fixture()?;
        let mood = registry.get(MOOD).expect("mood attached");
        assert_eq!(cell_width(mood), 2);
        assert_eq!(panel_size(mood), Size::new(6, 4));
        Ok(())
    }

    #[test]
    fn panel_size_widens_for_title_and_shrinks_without_border() -> Result<()> {
        let mut registry = PickerRegistry::new();
        registry.attach(
            MOOD,
            PickerOptions::with_palette(letter_palette()).templates(Templates {
                preview: PreviewTemplate::default(),
                container: ContainerTemplate {
                    title: "choose one".to_owned(),
                    bordered: true,
                },
            }),
        )?;
        registry.attach(
            TAG,
            PickerOptions::with_palette(letter_palette()).templates(Templates {
                preview: PreviewTemplate::default(),
                container: ContainerTemplate {
                    title: String::new(),
                    bordered: false,
                },
            }),
        )?;

        assert_eq!(
            panel_size(registry.get(MOOD).expect("mood attached")),
            Size::new(12, 4)
        );
        assert_eq!(
            panel_size(registry.get(TAG).expect("tag attached")),
            Size::new(4, 2)
        );
        Ok(())
    }

    #[test]
    fn emoji_cells_are_two_columns_plus_padding() -> Result<()> {
        let mut registry = PickerRegistry::new();
        registry.attach(MOOD, PickerOptions::default())?;
        let picker = registry.get(MOOD).expect("mood attached");
        assert_eq!(cell_width(picker), 3);
        assert_eq!(panel_size(picker), Size::new(17, 4));
        Ok(())
    }

    #[test]
    fn hit_test_resolves_anchor_cell_panel_and_document() -> Result<()> {
        let (mut registry, _, view_data) = fixture()?;
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(7, 2)),
            PointerTarget::Anchor(MOOD)
        );
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(30, 10)),
            PointerTarget::Document
        );

        registry
            .get_mut(MOOD)
            .expect("mood attached")
            .show(&view_data);
        // Panel sits below the mood anchor at (6, 4), size 6x4.
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(7, 5)),
            PointerTarget::Cell(MOOD, CellIndex::new(0, 0))
        );
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(9, 5)),
            PointerTarget::Cell(MOOD, CellIndex::new(0, 1))
        );
        // Second row only has one cell.
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(9, 6)),
            PointerTarget::Panel(MOOD)
        );
        // Border covers the tag anchor underneath.
        assert_eq!(
            hit_test(&registry, &view_data, Point::new(6, 4)),
            PointerTarget::Panel(MOOD)
        );
        Ok(())
    }

    #[test]
    fn clicking_preview_then_cell_selects_and_notifies() -> Result<()> {
        let (mut registry, slots, mut view_data) = fixture()?;
        let mut runtime = TestRuntime::default();

        let quit = handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(7, 2, MouseButton::Left),
        )?;
        assert!(!quit);
        assert_eq!(registry.visibility(MOOD), Some(Visibility::Open));

        handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(9, 5, MouseButton::Left),
        )?;
        assert_eq!(registry.get(MOOD).map(|picker| picker.get()), Some("B"));
        assert_eq!(registry.visibility(MOOD), Some(Visibility::Closed));
        assert_eq!(
            runtime.selections,
            vec![(MOOD, "mood".to_owned(), "B".to_owned())]
        );
        assert_eq!(status_text(&view_data), "mood: B");
        Ok(())
    }

    #[test]
    fn right_click_outside_keeps_panel_open() -> Result<()> {
        let (mut registry, slots, mut view_data) = fixture()?;
        let mut runtime = TestRuntime::default();
        handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(7, 2, MouseButton::Left),
        )?;

        handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(30, 10, MouseButton::Right),
        )?;
        assert_eq!(registry.visibility(MOOD), Some(Visibility::Open));

        handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(30, 10, MouseButton::Left),
        )?;
        assert_eq!(registry.visibility(MOOD), Some(Visibility::Closed));
        assert!(runtime.selections.is_empty());
        Ok(())
    }

    #[test]
    fn mouse_release_and_moves_are_ignored() -> Result<()> {
        let (mut registry, slots, mut view_data) = fixture()?;
        let mut runtime = TestRuntime::default();
        let release = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 7,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut registry, &slots, &mut view_data, &mut runtime, release)?;
        assert_eq!(registry.visibility(MOOD), Some(Visibility::Closed));
        Ok(())
    }

    #[test]
    fn quit_flow_from_runtime_stops_the_loop() -> Result<()> {
        let (mut registry, slots, mut view_data) = fixture()?;
        let mut runtime = TestRuntime {
            quit_after_first: true,
            ..TestRuntime::default()
        };
        handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(7, 2, MouseButton::Left),
        )?;
        let quit = handle_mouse_event(
            &mut registry,
            &slots,
            &mut view_data,
            &mut runtime,
            click(7, 5, MouseButton::Left),
        )?;
        assert!(quit);
        Ok(())
    }

    #[test]
    fn escape_hides_open_panels_and_q_quits() -> Result<()> {
        let (mut registry, _, mut view_data) = fixture()?;
        registry
            .get_mut(TAG)
            .expect("tag attached")
            .show(&view_data);

        let quit = handle_key_event(
            &mut registry,
            &mut view_data,
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        );
        assert!(!quit);
        assert_eq!(registry.visibility(TAG), Some(Visibility::Closed));
        assert_eq!(status_text(&view_data), "closed");

        assert!(handle_key_event(
            &mut registry,
            &mut view_data,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
        ));
        assert!(handle_key_event(
            &mut registry,
            &mut view_data,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ));
        Ok(())
    }

    #[test]
    fn render_draws_labels_previews_and_open_panel() -> Result<()> {
        let (mut registry, slots, mut view_data) = fixture()?;
        let mut terminal = Terminal::new(TestBackend::new(40, 14))?;

        terminal.draw(|frame| {
            refresh_layout(&registry, &slots, &mut view_data, frame.area());
            render(frame, &registry, &slots, &view_data);
        })?;
        assert!(row_text(&terminal, 0).starts_with("symbolic"));
        assert!(row_text(&terminal, 2).starts_with("mood  │A ▼│"));
        assert!(row_text(&terminal, 5).starts_with("tag   │y ▼│"));
        assert!(row_text(&terminal, 13).starts_with(IDLE_HINT));

        registry
            .get_mut(MOOD)
            .expect("mood attached")
            .show(&view_data);
        terminal.draw(|frame| {
            refresh_layout(&registry, &slots, &mut view_data, frame.area());
            render(frame, &registry, &slots, &view_data);
        })?;
        assert!(row_text(&terminal, 5).starts_with("tag   │A B │"));
        assert!(row_text(&terminal, 6).starts_with("      │C   │"));
        Ok(())
    }

    #[test]
    fn panel_near_right_edge_is_pulled_on_screen() -> Result<()> {
        let mut registry = PickerRegistry::new();
        let label = "a label long enough to push the anchor right";
        registry.attach(MOOD, PickerOptions::default())?;
        let slots = vec![PickerSlot::new(MOOD, label)];
        let mut view_data = ViewData::default();
        refresh_layout(&registry, &slots, &mut view_data, Rect::new(0, 0, 60, 10));

        let picker = registry.get_mut(MOOD).expect("mood attached");
        picker.show(&view_data);
        let offset = picker.placement().expect("placed on show");
        assert_eq!(offset.left + 17, 60);
        Ok(())
    }
}
