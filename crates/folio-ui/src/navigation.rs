//! Breadcrumb navigation.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

impl Crumb {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Breadcrumb navigation component.
///
/// Every crumb is a link, separated by `/`.
#[component]
pub fn Breadcrumbs(
    #[prop(into)]
    items: Signal<Vec<Crumb>>,
) -> impl IntoView {
    view! {
      <nav class="breadcrumbs" aria-label="Breadcrumb">
        <For
          each={move || items.get().into_iter().enumerate().collect::<Vec<_>>()}
          key={|(i, crumb)| (*i, crumb.href.clone())}
          children=move |(i, crumb)| {
            view! {
              <Show when=move || { i > 0 }>
                <span class="separator" aria-hidden="true">
                  "/"
                </span>
              </Show>
              <a href=crumb.href>{crumb.label}</a>
            }
          }
        />
      </nav>
    }
}
