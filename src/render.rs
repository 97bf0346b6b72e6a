use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::element::{Alignment, Element, Layer, LayoutConstraint};
use crate::theme::Theme;

// Overlay panels never shrink below this; frame edges keep a margin.
const MIN_OVERLAY_WIDTH: u16 = 30;
const OVERLAY_MARGIN: u16 = 4;

/// Draw a stack of layers into `area`.
///
/// Layers draw in order. A layer marked `dim_below` dims everything already
/// drawn before it renders. `TopLeft` layers take the full area (the base
/// view); any other alignment positions the layer at its measured size.
pub fn render_layers<Msg>(frame: &mut Frame, area: Rect, layers: &[Layer<Msg>], theme: &Theme) {
    for layer in layers {
        if layer.dim_below {
            dim_area(frame, area);
        }
        let target = if layer.alignment == Alignment::TopLeft {
            area
        } else {
            let (w, h) = measure(&layer.element);
            let max_w = area.width.saturating_sub(OVERLAY_MARGIN).max(1);
            let w = w.max(MIN_OVERLAY_WIDTH.min(max_w)).min(max_w);
            let h = h.min(area.height.saturating_sub(2).max(1));
            aligned_rect(area, w, h, layer.alignment)
        };
        if layer.alignment != Alignment::TopLeft {
            frame.render_widget(Clear, target);
        }
        render_element(frame, target, &layer.element, theme);
    }
}

/// Draw one element into `area`.
pub fn render_element<Msg>(frame: &mut Frame, area: Rect, element: &Element<Msg>, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match element {
        Element::None => {}

        Element::Text { content, style } => {
            let style = style.unwrap_or_else(|| Style::default().fg(theme.text_primary));
            let paragraph = Paragraph::new(content.as_str())
                .style(style)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }

        Element::StyledText { line } => {
            frame.render_widget(Paragraph::new(line.clone()), area);
        }

        Element::Button {
            label,
            style,
            focused,
            ..
        } => {
            let mut style = style.unwrap_or_else(|| Style::default().fg(theme.text_primary));
            if *focused {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            let paragraph = Paragraph::new(label.as_str()).style(style).centered();
            frame.render_widget(paragraph, area);
        }

        Element::Column { items, spacing } => {
            let constraints: Vec<Constraint> = items
                .iter()
                .map(|(constraint, _)| to_ratatui_constraint(*constraint))
                .collect();
            let areas = Layout::vertical(constraints).spacing(*spacing).split(area);
            for ((_, child), child_area) in items.iter().zip(areas.iter()) {
                render_element(frame, *child_area, child, theme);
            }
        }

        Element::Row { items, spacing } => {
            let constraints: Vec<Constraint> = items
                .iter()
                .map(|(constraint, _)| to_ratatui_constraint(*constraint))
                .collect();
            let areas = Layout::horizontal(constraints).spacing(*spacing).split(area);
            for ((_, child), child_area) in items.iter().zip(areas.iter()) {
                render_element(frame, *child_area, child, theme);
            }
        }

        Element::Panel { child, title, .. } => {
            let mut block = Block::bordered()
                .border_style(Style::default().fg(theme.border_primary))
                .style(Style::default().bg(theme.bg_elevated));
            if let Some(title) = title {
                block = block.title(title.clone());
            }
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_element(frame, inner, child, theme);
        }

        Element::Stack { layers } => {
            render_layers(frame, area, layers, theme);
        }
    }
}

/// Intrinsic size estimate used to position overlays.
pub fn measure<Msg>(element: &Element<Msg>) -> (u16, u16) {
    match element {
        Element::None => (0, 0),
        Element::Text { content, .. } => (content.chars().count() as u16, 1),
        Element::StyledText { line } => (line.width() as u16, 1),
        Element::Button { label, .. } => (label.chars().count() as u16, 1),
        Element::Column { items, spacing } => {
            let mut width = 0u16;
            let mut height = 0u16;
            for (constraint, child) in items {
                let (w, h) = measure(child);
                width = width.max(w);
                height = height.saturating_add(constrained_extent(*constraint, h));
            }
            let gaps = spacing.saturating_mul(items.len().saturating_sub(1) as u16);
            (width, height.saturating_add(gaps))
        }
        Element::Row { items, spacing } => {
            let mut width = 0u16;
            let mut height = 0u16;
            for (constraint, child) in items {
                let (w, h) = measure(child);
                width = width.saturating_add(constrained_extent(*constraint, w));
                height = height.max(h);
            }
            let gaps = spacing.saturating_mul(items.len().saturating_sub(1) as u16);
            (width.saturating_add(gaps), height)
        }
        Element::Panel {
            child,
            title,
            width,
            height,
        } => {
            let (w, h) = measure(child);
            let title_width = title
                .as_ref()
                .map(|t| t.chars().count() as u16 + 4)
                .unwrap_or(0);
            let w = width.unwrap_or_else(|| w.max(title_width).saturating_add(2));
            let h = height.unwrap_or_else(|| h.saturating_add(2));
            (w, h)
        }
        Element::Stack { layers } => {
            let mut width = 0u16;
            let mut height = 0u16;
            for layer in layers {
                let (w, h) = measure(&layer.element);
                width = width.max(w);
                height = height.max(h);
            }
            (width, height)
        }
    }
}

fn constrained_extent(constraint: LayoutConstraint, measured: u16) -> u16 {
    match constraint {
        LayoutConstraint::Length(n) => n,
        LayoutConstraint::Min(n) => n.max(measured),
        LayoutConstraint::Fill(_) => measured,
    }
}

fn to_ratatui_constraint(constraint: LayoutConstraint) -> Constraint {
    match constraint {
        LayoutConstraint::Length(n) => Constraint::Length(n),
        LayoutConstraint::Min(n) => Constraint::Min(n),
        LayoutConstraint::Fill(w) => Constraint::Fill(w),
    }
}

fn aligned_rect(area: Rect, width: u16, height: u16, alignment: Alignment) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let centered_x = area.x + (area.width - width) / 2;
    let right_x = area.x + area.width - width;
    let centered_y = area.y + (area.height - height) / 2;
    let bottom_y = area.y + area.height - height;
    let (x, y) = match alignment {
        Alignment::TopLeft => (area.x, area.y),
        Alignment::TopCenter => (centered_x, area.y),
        Alignment::TopRight => (right_x, area.y),
        Alignment::Center => (centered_x, centered_y),
        Alignment::BottomLeft => (area.x, bottom_y),
        Alignment::BottomCenter => (centered_x, bottom_y),
        Alignment::BottomRight => (right_x, bottom_y),
    };
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn dim_area(frame: &mut Frame, area: Rect) {
    let buffer = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                let dimmed = cell.style().add_modifier(Modifier::DIM);
                cell.set_style(dimmed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, FocusId};

    #[test]
    fn measure_accounts_for_panel_borders() {
        let panel = Element::<()>::panel(Element::text("hello")).build();
        assert_eq!(measure(&panel), (7, 3));
    }

    #[test]
    fn measure_sums_column_heights() {
        let column = crate::element::ColumnBuilder::<()>::new()
            .add(Element::text("a"), LayoutConstraint::Length(1))
            .add(Element::text("bb"), LayoutConstraint::Length(2))
            .spacing(1)
            .build();
        assert_eq!(measure(&column), (2, 4));
    }

    #[test]
    fn measure_uses_explicit_panel_size() {
        let panel = Element::<()>::panel(Element::text("x"))
            .width(50)
            .height(12)
            .build();
        assert_eq!(measure(&panel), (50, 12));
    }

    #[test]
    fn buttons_measure_their_label() {
        let button = Element::<()>::button(FocusId::new("b"), "[ (o)K ]").build();
        assert_eq!(measure(&button), (8, 1));
    }

    #[test]
    fn aligned_rect_centers() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = aligned_rect(area, 40, 10, Alignment::Center);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (30, 15, 40, 10));
    }
}
