use crate::models::{format_size, GalleryItem};
use crate::state::gallery::{GalleryCommand, GalleryContent, GalleryEvent, GalleryState};
use crate::state::AppState;
use crate::views::{button, error_box, image_placeholder, notice};
use gpui::prelude::*;
use gpui::*;

const CARD_IMAGE_SIZE: f32 = 250.0;

pub struct GalleryView {
    state: GalleryState,
    _load: Option<Task<()>>,
    _delete: Option<Task<()>>,
    _download: Option<Task<()>>,
}

impl GalleryView {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let mut view = Self {
            state: GalleryState::default(),
            _load: None,
            _delete: None,
            _download: None,
        };
        if let Some(command) = view.state.update(GalleryEvent::Refresh) {
            view.run(command, cx);
        }
        view
    }

    fn dispatch(&mut self, event: GalleryEvent, cx: &mut Context<Self>) {
        if let Some(command) = self.state.update(event) {
            self.run(command, cx);
        }
        cx.notify();
    }

    fn run(&mut self, command: GalleryCommand, cx: &mut Context<Self>) {
        let app_state = cx.global::<AppState>();
        let service = app_state.service.clone();

        match command {
            GalleryCommand::FetchList { load_id } => {
                self._load = Some(cx.spawn(async move |this, cx| {
                    let outcome = cx
                        .background_executor()
                        .spawn(async move { service.list_memes() })
                        .await;
                    match &outcome {
                        Ok(items) => log::info!("loaded {} memes", items.len()),
                        Err(e) => log::warn!("failed to load memes: {}", e),
                    }

                    this.update(cx, |this, cx| {
                        this.dispatch(GalleryEvent::Loaded { load_id, outcome }, cx)
                    })
                    .ok();
                }));
            }
            GalleryCommand::Delete { filename } => {
                self._delete = Some(cx.spawn(async move |this, cx| {
                    let target = filename.clone();
                    let outcome = cx
                        .background_executor()
                        .spawn(async move { service.delete_meme(&target) })
                        .await;
                    if let Err(e) = &outcome {
                        log::warn!("failed to delete {}: {}", filename, e);
                    }

                    this.update(cx, |this, cx| {
                        this.dispatch(GalleryEvent::Deleted { filename, outcome }, cx)
                    })
                    .ok();
                }));
            }
            GalleryCommand::Download { url } => {
                let dest = app_state.config.download_dir.clone();
                self._download = Some(cx.spawn(async move |this, cx| {
                    let outcome = cx
                        .background_executor()
                        .spawn(async move { service.download(&url, &dest) })
                        .await;

                    this.update(cx, |this, cx| {
                        this.dispatch(GalleryEvent::Downloaded(outcome), cx)
                    })
                    .ok();
                }));
            }
        }
    }

    fn render_card(&self, item: &GalleryItem, cx: &mut Context<Self>) -> impl IntoElement {
        let url = cx.global::<AppState>().service.asset_url(&item.url);
        let filename = item.filename.clone();
        let confirming = self.state.confirming.as_deref() == Some(item.filename.as_str());
        let deleting = self.state.deleting.as_deref() == Some(item.filename.as_str());

        let actions = if confirming {
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(div().text_sm().child("Delete this meme?"))
                .child(button("Delete", rgb(0xf38ba8), false).on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _, _window, cx| {
                        this.dispatch(GalleryEvent::ConfirmDelete, cx);
                    }),
                ))
                .child(button("Cancel", rgb(0x9399b2), false).on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _, _window, cx| {
                        this.dispatch(GalleryEvent::CancelDelete, cx);
                    }),
                ))
        } else if deleting {
            div()
                .text_sm()
                .text_color(rgb(0x9399b2))
                .child("Deleting...")
        } else {
            let download_url = url.clone();
            div()
                .flex()
                .gap_2()
                .child(button("Download", rgb(0x89b4fa), false).on_mouse_down(
                    MouseButton::Left,
                    cx.listener(move |this, _, _window, cx| {
                        this.dispatch(GalleryEvent::Download(download_url.clone()), cx);
                    }),
                ))
                .child(
                    button("Delete", rgb(0xf38ba8), self.state.deleting.is_some()).when(
                        self.state.deleting.is_none(),
                        |this| {
                            this.on_mouse_down(
                                MouseButton::Left,
                                cx.listener(move |this, _, _window, cx| {
                                    this.dispatch(
                                        GalleryEvent::RequestDelete(filename.clone()),
                                        cx,
                                    );
                                }),
                            )
                        },
                    ),
                )
        };

        div()
            .w(px(CARD_IMAGE_SIZE + 20.0))
            .flex()
            .flex_col()
            .gap_2()
            .p_2()
            .bg(rgb(0x313244))
            .rounded_md()
            .child(
                img(url)
                    .w(px(CARD_IMAGE_SIZE))
                    .h(px(CARD_IMAGE_SIZE))
                    .rounded(px(6.0))
                    .object_fit(ObjectFit::Cover)
                    .with_fallback(|| image_placeholder(CARD_IMAGE_SIZE, CARD_IMAGE_SIZE)),
            )
            .child(
                div()
                    .flex()
                    .justify_between()
                    .text_sm()
                    .child(div().overflow_hidden().child(item.filename.clone()))
                    .when_some(item.size, |this, size| {
                        this.child(div().text_color(rgb(0x9399b2)).child(format_size(size)))
                    }),
            )
            .child(actions)
    }
}

impl Render for GalleryView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let loading = self.state.content() == GalleryContent::Loading;

        let body = match self.state.content() {
            GalleryContent::Loading => div()
                .text_color(rgb(0x9399b2))
                .child("Loading your memes..."),
            GalleryContent::Empty => div()
                .p_8()
                .flex()
                .justify_center()
                .text_color(rgb(0x9399b2))
                .child("No memes yet! Create one to get started."),
            // The error box above is the whole body.
            GalleryContent::Failed => div(),
            GalleryContent::Items => div().flex().flex_wrap().gap_4().children(
                self.state
                    .items
                    .iter()
                    .map(|item| self.render_card(item, cx))
                    .collect::<Vec<_>>(),
            ),
        };

        div()
            .id("gallery")
            .flex()
            .flex_col()
            .size_full()
            .p_8()
            .gap_4()
            .overflow_y_scroll()
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_2xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Meme Gallery"),
                    )
                    .child(button("Refresh", rgb(0x89b4fa), loading).when(!loading, |this| {
                        this.on_mouse_down(
                            MouseButton::Left,
                            cx.listener(|this, _, _window, cx| {
                                this.dispatch(GalleryEvent::Refresh, cx);
                            }),
                        )
                    })),
            )
            .when_some(self.state.error.clone(), |this, message| {
                this.child(error_box(message))
            })
            .when_some(self.state.notice.clone(), |this, message| {
                this.child(notice(message))
            })
            .child(body)
    }
}
