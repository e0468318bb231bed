use crate::models::{Mood, Style};
use crate::state::generator::{GeneratorCommand, GeneratorEvent, GeneratorState};
use crate::state::text_field::TextEdit;
use crate::state::AppState;
use crate::views::{button, error_box, image_placeholder, notice};
use gpui::prelude::*;
use gpui::*;

const PLACEHOLDER: &str = "e.g., When you fix a bug but create three new ones";

pub struct GeneratorView {
    state: GeneratorState,
    focus_handle: FocusHandle,
    // Dropping a task cancels it, so results never reach an unmounted view.
    _generate: Option<Task<()>>,
    _download: Option<Task<()>>,
}

impl GeneratorView {
    pub fn new(cx: &mut Context<Self>) -> Self {
        Self {
            state: GeneratorState::default(),
            focus_handle: cx.focus_handle(),
            _generate: None,
            _download: None,
        }
    }

    fn dispatch(&mut self, event: GeneratorEvent, cx: &mut Context<Self>) {
        if let Some(command) = self.state.update(event) {
            self.run(command, cx);
        }
        cx.notify();
    }

    fn run(&mut self, command: GeneratorCommand, cx: &mut Context<Self>) {
        let app_state = cx.global::<AppState>();
        let service = app_state.service.clone();

        match command {
            GeneratorCommand::Generate {
                request_id,
                request,
            } => {
                log::info!(
                    "generating meme (style={}, mood={})",
                    request.style().label(),
                    request.mood().label()
                );
                self._generate = Some(cx.spawn(async move |this, cx| {
                    let outcome = cx
                        .background_executor()
                        .spawn(async move { service.generate(&request) })
                        .await;
                    if let Err(e) = &outcome {
                        log::warn!("generation failed: {}", e);
                    }

                    this.update(cx, |this, cx| {
                        this.dispatch(
                            GeneratorEvent::Completed {
                                request_id,
                                outcome,
                            },
                            cx,
                        )
                    })
                    .ok();
                }));
            }
            GeneratorCommand::Download { image_path } => {
                let dest = app_state.config.download_dir.clone();
                self._download = Some(cx.spawn(async move |this, cx| {
                    let outcome = cx
                        .background_executor()
                        .spawn(async move {
                            let url = service.asset_url(&image_path);
                            service.download(&url, &dest)
                        })
                        .await;

                    this.update(cx, |this, cx| {
                        this.dispatch(GeneratorEvent::Downloaded(outcome), cx)
                    })
                    .ok();
                }));
            }
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        let edit = match keystroke.key.as_str() {
            "backspace" => TextEdit::Backspace,
            "delete" => TextEdit::Delete,
            "left" => TextEdit::Left,
            "right" => TextEdit::Right,
            "home" => TextEdit::Home,
            "end" => TextEdit::End,
            "enter" => {
                self.dispatch(GeneratorEvent::Submit, cx);
                return;
            }
            _ => match &keystroke.key_char {
                Some(text) if !keystroke.modifiers.control && !keystroke.modifiers.platform => {
                    TextEdit::Insert(text.clone())
                }
                _ => return,
            },
        };
        self.dispatch(GeneratorEvent::Edit(edit), cx);
    }

    fn render_input(&self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let submitting = self.state.is_submitting();
        let focused = self.focus_handle.is_focused(window);
        let situation = &self.state.situation;

        let text = if situation.text().is_empty() && !focused {
            div().text_color(rgb(0x6c7086)).child(PLACEHOLDER)
        } else if focused && !submitting {
            div().child(situation.with_caret())
        } else {
            div().child(situation.text().to_string())
        };

        div()
            .flex()
            .flex_col()
            .gap_2()
            .child(div().text_sm().child("Describe your situation:"))
            .child(
                div()
                    .min_h(px(80.0))
                    .p_2()
                    .bg(rgb(0x313244))
                    .rounded_md()
                    .border_1()
                    .border_color(if focused { rgb(0x89b4fa) } else { rgb(0x45475a) })
                    .cursor_text()
                    .when(submitting, |this| this.opacity(0.6))
                    .track_focus(&self.focus_handle)
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _, window, cx| {
                            window.focus(&this.focus_handle);
                            cx.notify();
                        }),
                    )
                    .on_key_down(cx.listener(|this, event: &KeyDownEvent, _window, cx| {
                        this.on_key_down(event, cx);
                    }))
                    .child(text),
            )
    }

    fn render_options(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let submitting = self.state.is_submitting();

        div()
            .flex()
            .gap_8()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(div().text_sm().child("Style:"))
                    .child(div().flex().gap_2().children(Style::ALL.into_iter().map(|style| {
                        option_chip(style.label(), self.state.style == style, submitting)
                            .when(!submitting, |this| {
                                this.on_mouse_down(
                                    MouseButton::Left,
                                    cx.listener(move |this, _, _window, cx| {
                                        this.dispatch(GeneratorEvent::SelectStyle(style), cx);
                                    }),
                                )
                            })
                    }))),
            )
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .child(div().text_sm().child("Mood:"))
                    .child(div().flex().gap_2().children(Mood::ALL.into_iter().map(|mood| {
                        option_chip(mood.label(), self.state.mood == mood, submitting)
                            .when(!submitting, |this| {
                                this.on_mouse_down(
                                    MouseButton::Left,
                                    cx.listener(move |this, _, _window, cx| {
                                        this.dispatch(GeneratorEvent::SelectMood(mood), cx);
                                    }),
                                )
                            })
                    }))),
            )
    }

    fn render_result(&self, cx: &mut Context<Self>) -> Option<impl IntoElement> {
        let result = self.state.result()?;
        let url = cx.global::<AppState>().service.asset_url(&result.image_path);

        Some(
            div()
                .flex()
                .flex_col()
                .gap_3()
                .p_4()
                .bg(rgb(0x181825))
                .rounded_lg()
                .border_1()
                .border_color(rgb(0x313244))
                .child(
                    div()
                        .text_lg()
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(rgb(0xa6e3a1))
                        .child("Your meme is ready!"),
                )
                .child(
                    img(url.clone())
                        .w(px(400.0))
                        .h(px(300.0))
                        .rounded(px(8.0))
                        .object_fit(ObjectFit::Contain)
                        .with_fallback(|| image_placeholder(400.0, 300.0)),
                )
                .child(
                    div()
                        .flex()
                        .gap_1()
                        .child(div().font_weight(FontWeight::BOLD).child("Text:"))
                        .child(result.text.clone()),
                )
                .child(
                    div()
                        .flex()
                        .items_center()
                        .gap_3()
                        .child(
                            button("Download", rgb(0x89b4fa), false).on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _, _window, cx| {
                                    this.dispatch(GeneratorEvent::Download, cx);
                                }),
                            ),
                        )
                        .child(div().text_xs().text_color(rgb(0x6c7086)).child(url)),
                )
                .when_some(self.state.download_notice.clone(), |this, message| {
                    this.child(notice(message))
                }),
        )
    }
}

fn option_chip(label: &'static str, selected: bool, disabled: bool) -> Div {
    div()
        .px_3()
        .py_1()
        .rounded_md()
        .border_1()
        .border_color(if selected { rgb(0x89b4fa) } else { rgb(0x45475a) })
        .bg(if selected { rgb(0x313244) } else { rgb(0x1e1e2e) })
        .when(disabled, |this| this.opacity(0.5))
        .when(!disabled, |this| {
            this.cursor_pointer().hover(|s| s.bg(rgb(0x45475a)))
        })
        .child(label)
}

impl Render for GeneratorView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let submitting = self.state.is_submitting();

        div()
            .id("generator")
            .flex()
            .flex_col()
            .size_full()
            .p_8()
            .gap_4()
            .overflow_y_scroll()
            .child(
                div()
                    .text_2xl()
                    .font_weight(FontWeight::BOLD)
                    .child("Create a Meme"),
            )
            .child(self.render_input(window, cx))
            .child(self.render_options(cx))
            .child(
                div().flex().child(
                    button(
                        if submitting {
                            "Generating... (may take a minute)"
                        } else {
                            "Generate Meme"
                        },
                        rgb(0xfab387),
                        submitting,
                    )
                    .when(!submitting, |this| {
                        this.on_mouse_down(
                            MouseButton::Left,
                            cx.listener(|this, _, _window, cx| {
                                this.dispatch(GeneratorEvent::Submit, cx);
                            }),
                        )
                    }),
                ),
            )
            .when_some(self.state.error().map(str::to_string), |this, message| {
                this.child(error_box(message))
            })
            .children(self.render_result(cx))
    }
}
