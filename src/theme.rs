//! Win98 theme for egui.
//!
//! Flat silver widgets, navy selection, square corners, and helpers for
//! painting the raised/sunken bevel chrome the rest of the shell leans on.

use egui::{Color32, Rect, Rounding, Stroke, Visuals};

/// Button/panel face.
pub fn face() -> Color32 {
    Color32::from_rgb(0xc0, 0xc0, 0xc0)
}

/// Dark bevel edge.
pub fn shadow() -> Color32 {
    Color32::from_rgb(0x80, 0x80, 0x80)
}

/// Darkest bevel edge (outer bottom/right).
pub fn dark_shadow() -> Color32 {
    Color32::from_rgb(0x40, 0x40, 0x40)
}

/// Light bevel edge.
pub fn highlight() -> Color32 {
    Color32::WHITE
}

/// Active title bar / selection navy.
pub fn title_blue() -> Color32 {
    Color32::from_rgb(0x00, 0x00, 0x80)
}

/// Desktop teal behind everything.
pub fn desktop() -> Color32 {
    Color32::from_rgb(0x00, 0x80, 0x80)
}

/// Tooltip / notification cream.
pub fn tooltip_bg() -> Color32 {
    Color32::from_rgb(0xff, 0xff, 0xcc)
}

/// Status-bar flash yellow used by the system-sound placeholder.
pub fn flash_yellow() -> Color32 {
    Color32::from_rgb(0xff, 0xff, 0x00)
}

/// Apply the Win98 look to the egui context.
pub fn apply_win98_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let text_color = Color32::BLACK;

    style.visuals = Visuals::light();

    // Panel colors
    style.visuals.panel_fill = face();
    style.visuals.window_fill = face();
    style.visuals.extreme_bg_color = Color32::WHITE;
    style.visuals.window_stroke = Stroke::new(1.0, dark_shadow());

    // Widget colors
    style.visuals.widgets.noninteractive.bg_fill = face();
    style.visuals.widgets.inactive.bg_fill = face();
    style.visuals.widgets.inactive.weak_bg_fill = face();
    style.visuals.widgets.hovered.bg_fill = face();
    style.visuals.widgets.hovered.weak_bg_fill = face();
    style.visuals.widgets.active.bg_fill = shadow();
    style.visuals.widgets.active.weak_bg_fill = shadow();

    // Text colors
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);

    // Square everything
    style.visuals.window_rounding = Rounding::ZERO;
    style.visuals.menu_rounding = Rounding::ZERO;
    style.visuals.widgets.noninteractive.rounding = Rounding::ZERO;
    style.visuals.widgets.inactive.rounding = Rounding::ZERO;
    style.visuals.widgets.hovered.rounding = Rounding::ZERO;
    style.visuals.widgets.active.rounding = Rounding::ZERO;

    // Bevel-ish widget edges
    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, shadow());
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, dark_shadow());
    style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, dark_shadow());

    // Selection
    style.visuals.selection.bg_fill = title_blue();
    style.visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    style.visuals.hyperlink_color = title_blue();

    // Tighter, boxier spacing
    style.spacing.item_spacing = egui::vec2(4.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 2.0);
    style.spacing.window_margin = 4.0.into();

    ctx.set_style(style);
}

/// Paint a two-pixel Win98 bevel around `rect`. Raised bevels light the
/// top/left edges; sunken bevels invert that.
pub fn paint_bevel(painter: &egui::Painter, rect: Rect, raised: bool) {
    let (top_left, bottom_right) = if raised {
        (highlight(), dark_shadow())
    } else {
        (dark_shadow(), highlight())
    };
    let (inner_tl, inner_br) = if raised {
        (face(), shadow())
    } else {
        (shadow(), face())
    };

    let outer = rect;
    painter.line_segment(
        [outer.left_top(), outer.right_top()],
        Stroke::new(1.0, top_left),
    );
    painter.line_segment(
        [outer.left_top(), outer.left_bottom()],
        Stroke::new(1.0, top_left),
    );
    painter.line_segment(
        [outer.left_bottom(), outer.right_bottom()],
        Stroke::new(1.0, bottom_right),
    );
    painter.line_segment(
        [outer.right_top(), outer.right_bottom()],
        Stroke::new(1.0, bottom_right),
    );

    let inner = rect.shrink(1.0);
    painter.line_segment(
        [inner.left_top(), inner.right_top()],
        Stroke::new(1.0, inner_tl),
    );
    painter.line_segment(
        [inner.left_top(), inner.left_bottom()],
        Stroke::new(1.0, inner_tl),
    );
    painter.line_segment(
        [inner.left_bottom(), inner.right_bottom()],
        Stroke::new(1.0, inner_br),
    );
    painter.line_segment(
        [inner.right_top(), inner.right_bottom()],
        Stroke::new(1.0, inner_br),
    );
}

/// Frame for raised chrome (taskbar, buttons, menus).
pub fn raised_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(face())
        .stroke(Stroke::new(1.0, shadow()))
        .inner_margin(4.0)
}

/// Frame for sunken wells (status bar, input areas).
pub fn sunken_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(face())
        .stroke(Stroke::new(1.0, shadow()))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
}
