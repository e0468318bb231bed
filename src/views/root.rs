use crate::models::ConnectivityStatus;
use crate::state::shell::{ShellCommand, ShellEvent, ShellState, Tab};
use crate::state::AppState;
use crate::views::button;
use crate::views::gallery::GalleryView;
use crate::views::generator::GeneratorView;
use chrono::Local;
use gpui::prelude::*;
use gpui::*;

pub struct RootView {
    shell: ShellState,
    active_view: AnyView,
    _health: Option<Task<()>>,
}

impl RootView {
    pub fn new(cx: &mut Context<Self>, _window: &mut Window) -> Self {
        let mut view = Self {
            shell: ShellState::default(),
            active_view: Self::mount(Tab::default(), cx),
            _health: None,
        };
        if let Some(command) = view.shell.update(ShellEvent::CheckConnection) {
            view.run(command, cx);
        }
        view
    }

    /// Builds a fresh view for `tab`; the previous one is dropped with its pending requests.
    fn mount(tab: Tab, cx: &mut Context<Self>) -> AnyView {
        match tab {
            Tab::Create => cx.new(|cx| GeneratorView::new(cx)).into(),
            Tab::Gallery => cx.new(|cx| GalleryView::new(cx)).into(),
        }
    }

    fn dispatch(&mut self, event: ShellEvent, cx: &mut Context<Self>) {
        if let Some(command) = self.shell.update(event) {
            self.run(command, cx);
        }
        cx.notify();
    }

    fn run(&mut self, command: ShellCommand, cx: &mut Context<Self>) {
        match command {
            ShellCommand::HealthCheck => {
                let service = cx.global::<AppState>().service.clone();
                self._health = Some(cx.spawn(async move |this, cx| {
                    let outcome = cx
                        .background_executor()
                        .spawn(async move { service.health_check() })
                        .await;
                    match &outcome {
                        Ok(()) => log::info!("backend is reachable"),
                        Err(e) => log::warn!("backend connection failed: {}", e),
                    }

                    this.update(cx, |this, cx| {
                        this.dispatch(
                            ShellEvent::HealthChecked {
                                reachable: outcome.is_ok(),
                                at: Local::now(),
                            },
                            cx,
                        )
                    })
                    .ok();
                }));
            }
            ShellCommand::Mount(tab) => {
                self.active_view = Self::mount(tab, cx);
            }
        }
    }

    fn render_status(&self) -> impl IntoElement {
        let color = match self.shell.connectivity {
            ConnectivityStatus::Checking => rgb(0xf9e2af),
            ConnectivityStatus::Connected => rgb(0xa6e3a1),
            ConnectivityStatus::Disconnected => rgb(0xf38ba8),
        };

        div()
            .flex()
            .flex_col()
            .items_end()
            .child(
                div()
                    .text_sm()
                    .text_color(color)
                    .child(self.shell.connectivity.to_string()),
            )
            .when_some(self.shell.last_checked, |this, at| {
                this.child(
                    div()
                        .text_xs()
                        .text_color(rgb(0x6c7086))
                        .child(format!("checked {}", at.format("%H:%M:%S"))),
                )
            })
    }

    fn render_tab(&self, tab: Tab, label: &'static str, cx: &mut Context<Self>) -> impl IntoElement {
        let active = self.shell.tab == tab;

        div()
            .px_4()
            .py_2()
            .rounded_md()
            .cursor_pointer()
            .bg(if active { rgb(0x313244) } else { rgb(0x11111b) })
            .text_color(if active { rgb(0xcdd6f4) } else { rgb(0x9399b2) })
            .hover(|s| s.bg(rgb(0x45475a)))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(move |this, _, _window, cx| {
                    this.dispatch(ShellEvent::SelectTab(tab), cx);
                }),
            )
            .child(label)
    }

    fn render_offline_banner(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let origin = cx.global::<AppState>().config.origin();

        div()
            .flex()
            .items_center()
            .justify_between()
            .mx_8()
            .mt_4()
            .p_4()
            .bg(rgb(0x3b2f1f))
            .border_1()
            .border_color(rgb(0xf9e2af))
            .rounded_md()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(
                        div()
                            .font_weight(FontWeight::BOLD)
                            .text_color(rgb(0xf9e2af))
                            .child("Backend Not Connected"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .child(format!("Make sure the backend is running on {}", origin)),
                    ),
            )
            .child(button("Retry Connection", rgb(0xf9e2af), false).on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, _, _window, cx| {
                    this.dispatch(ShellEvent::CheckConnection, cx);
                }),
            ))
    }
}

impl Render for RootView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(rgb(0x1e1e2e))
            .text_color(rgb(0xcdd6f4))
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .px_4()
                    .py_3()
                    .bg(rgb(0x11111b))
                    .border_b_1()
                    .border_color(rgb(0x313244))
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .child(
                                div()
                                    .text_xl()
                                    .font_weight(FontWeight::BOLD)
                                    .child("Meme Forge"),
                            )
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(rgb(0x9399b2))
                                    .child("AI-powered workplace meme generator"),
                            ),
                    )
                    .child(self.render_status()),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .px_4()
                    .py_2()
                    .bg(rgb(0x11111b))
                    .child(self.render_tab(Tab::Create, "Create", cx))
                    .child(self.render_tab(Tab::Gallery, "Gallery", cx)),
            )
            .when(self.shell.show_offline_banner(), |this| {
                this.child(self.render_offline_banner(cx))
            })
            .child(div().flex_1().min_h(px(0.0)).child(self.active_view.clone()))
    }
}
