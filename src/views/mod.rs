use gpui::prelude::*;
use gpui::*;

pub mod gallery;
pub mod generator;
pub mod root;

pub fn error_box(message: impl Into<SharedString>) -> Div {
    div()
        .p_3()
        .bg(rgb(0x3b1f2b))
        .border_1()
        .border_color(rgb(0xf38ba8))
        .rounded_md()
        .text_color(rgb(0xf38ba8))
        .child(message.into())
}

pub fn notice(message: impl Into<SharedString>) -> Div {
    div()
        .text_sm()
        .text_color(rgb(0xa6e3a1))
        .child(message.into())
}

/// Drawn in place of an image that failed to load.
pub fn image_placeholder(width: f32, height: f32) -> AnyElement {
    div()
        .w(px(width))
        .h(px(height))
        .flex()
        .items_center()
        .justify_center()
        .bg(rgb(0xcccccc))
        .text_color(rgb(0x666666))
        .child("Image not found")
        .into_any_element()
}

pub fn button(label: impl Into<SharedString>, color: Rgba, disabled: bool) -> Div {
    div()
        .px_4()
        .py_2()
        .bg(color)
        .text_color(rgb(0x1e1e2e))
        .font_weight(FontWeight::SEMIBOLD)
        .rounded_md()
        .when(disabled, |this| this.opacity(0.5))
        .when(!disabled, |this| this.cursor_pointer())
        .child(label.into())
}
