//! Modal dialog and image carousel.

use folio_core::SwiperItem;
use leptos::{ev, prelude::*};

/// Index reached by moving `delta` slides from `index`, wrapping at both ends.
///
/// An empty carousel always stays at 0.
pub fn carousel_step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    ((index as isize + delta).rem_euclid(len)) as usize
}

/// Split plain dialog content into paragraphs on blank lines.
pub fn paragraphs(content: &str) -> Vec<String> {
    content
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Modal dialog.
///
/// Closes through the Close button, a click on the overlay or Escape.
#[component]
pub fn Dialog(
    /// Whether the dialog is shown.
    open: Signal<bool>,
    /// Heading text.
    #[prop(into)]
    title: String,
    /// Text under the heading.
    description: Option<String>,
    /// Called when the user dismisses the dialog.
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let title = StoredValue::new(title);
    let description = StoredValue::new(description);

    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
      <Show when=move || open.get()>
        <div class="dialog-overlay" on:click=move |_| on_close.run(())>
          <div
            class="dialog"
            role="dialog"
            aria-modal="true"
            on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
          >
            <header>
              <h2>{title.get_value()}</h2>
              {description
                .get_value()
                .map(|d| view! { <p class="dialog-description">{d}</p> })}
            </header>
            <div class="dialog-body">{children()}</div>
            <button type="button" class="button" on:click=move |_| on_close.run(())>
              "Close"
            </button>
          </div>
        </div>
      </Show>
    }
}

/// Image carousel with previous/next controls.
#[component]
pub fn Carousel(items: Vec<SwiperItem>) -> impl IntoView {
    let len = items.len();
    let items = StoredValue::new(items);
    let index = RwSignal::new(0usize);

    let step = move |delta: isize| index.update(|i| *i = carousel_step(*i, len, delta));

    view! {
      <div class="carousel">
        {move || {
          items
            .with_value(|items| items.get(index.get()).cloned())
            .map(|item| {
              view! {
                <figure class="carousel-slide active">
                  <img src=item.slide alt=item.alt.unwrap_or_default() />
                </figure>
              }
            })
        }}
        <Show when=move || { len > 1 }>
          <div class="carousel-controls">
            <button
              type="button"
              class="button"
              aria-label="Previous slide"
              on:click=move |_| step(-1)
            >
              "←"
            </button>
            <span class="carousel-position">{move || format!("{} / {len}", index.get() + 1)}</span>
            <button type="button" class="button" aria-label="Next slide" on:click=move |_| step(1)>
              "→"
            </button>
          </div>
        </Show>
      </div>
    }
}
