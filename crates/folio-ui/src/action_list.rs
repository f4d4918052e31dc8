//! Interactive action list.
//!
//! Mirrors the statically rendered list, but dialogs open and close through
//! a [`DialogState`] signal instead of the inline page script. Every nested
//! list owns its own state.

use folio_core::{
    ActionDialog, ActionLink, ActionListItem, DialogBody, DialogId, DialogState, ItemHeading,
    LinkKind,
};
use leptos::prelude::*;

use crate::dialog::{Carousel, Dialog, paragraphs};

/// Description shown under a dialog title: the dialog's own, else the item's.
pub fn dialog_description(item: &ActionListItem, dialog: &ActionDialog) -> Option<String> {
    dialog
        .description
        .as_deref()
        .or(item.modal_description.as_deref())
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
}

/// A nested list of labelled entries with links and dialog buttons.
#[component]
pub fn ActionList(
    items: Vec<ActionListItem>,
    /// Id of the rendered `<ul>`; nested lists append their item index.
    #[prop(default = "actions".to_string(), into)]
    list_id: String,
) -> AnyView {
    let state = RwSignal::new(DialogState::default());
    let close = Callback::new(move |_| state.update(DialogState::close));

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            view! {
              <ActionListEntry
                item=item.clone()
                index=index
                list_id=list_id.clone()
                state=state
              />
            }
        })
        .collect_view();

    let dialogs = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| {
            item.dialogs.iter().enumerate().map(move |(dialog_index, dialog)| {
                let id = DialogId::new(index, dialog_index);
                let open = Signal::derive(move || state.with(|s| s.is_open(id)));
                let body = dialog.body.clone();

                view! {
                  <Dialog
                    open=open
                    title=dialog.dialog_title()
                    description=dialog_description(item, dialog)
                    on_close=close
                  >
                    {dialog_body(&body)}
                  </Dialog>
                }
            })
        })
        .collect_view();

    view! {
      <ul class="action-list" id=list_id.clone()>
        {entries}
      </ul>
      {dialogs}
    }
    .into_any()
}

#[component]
fn ActionListEntry(
    item: ActionListItem,
    index: usize,
    list_id: String,
    state: RwSignal<DialogState>,
) -> impl IntoView {
    let heading = match item.heading() {
        ItemHeading::LabelAndText { label, text } => view! {
          <div class="action-item-heading">
            <span class="action-item-label">{label.to_string()}</span>
            <p class="action-item-text">{text.to_string()}</p>
          </div>
        }
        .into_any(),
        ItemHeading::LabelOnly(label) => view! {
          <div class="action-item-heading">
            <span class="action-item-label">{label.to_string()}</span>
          </div>
        }
        .into_any(),
        ItemHeading::TextOnly(text) => view! {
          <div class="action-item-heading">
            <p class="action-item-text">{text.to_string()}</p>
          </div>
        }
        .into_any(),
        ItemHeading::Empty => ().into_any(),
    };

    let actions = item.has_actions().then(|| {
        let links = item
            .links
            .iter()
            .map(|link| view! { <ActionLinkView link=link.clone() /> })
            .collect_view();
        let buttons = item
            .dialogs
            .iter()
            .enumerate()
            .map(|(dialog_index, dialog)| {
                let id = DialogId::new(index, dialog_index);
                view! {
                  <button type="button" class="button" on:click=move |_| state.update(|s| s.open(id))>
                    {dialog.button_label().to_string()}
                  </button>
                }
            })
            .collect_view();

        view! { <div class="action-row">{links} {buttons}</div> }
    });

    let children = item.has_children().then(|| {
        view! {
          <div class="action-list-nested">
            <ActionList items=item.items.clone() list_id=format!("{list_id}-{index}") />
          </div>
        }
    });

    view! {
      <li class="action-item">{heading} {actions} {children}</li>
    }
}

/// A link styled by where it points.
#[component]
fn ActionLinkView(link: ActionLink) -> impl IntoView {
    let label = link.display_label().to_string();
    let href = link.href;

    match LinkKind::classify(&href) {
        LinkKind::Internal => view! {
          <a class="action-link" href=href>
            {label}
            <span class="icon" aria-hidden="true">"→"</span>
          </a>
        }
        .into_any(),
        LinkKind::Hash => view! { <a class="action-link" href=href>{label}</a> }.into_any(),
        LinkKind::External => view! {
          <a class="action-link" href=href target="_blank" rel="noopener noreferrer">
            {label}
            <span class="icon" aria-hidden="true">"↗"</span>
          </a>
        }
        .into_any(),
    }
}

fn dialog_body(body: &DialogBody) -> AnyView {
    match body {
        DialogBody::Carousel { items } => view! { <Carousel items=items.clone() /> }.into_any(),
        DialogBody::Content { content } => paragraphs(content)
            .into_iter()
            .map(|p| view! { <p>{p}</p> })
            .collect_view()
            .into_any(),
    }
}
