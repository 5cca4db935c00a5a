use crate::view::{el, Action, Node};

use super::Filters;

impl Filters {
    /// Labelled list of active filters, each removable, plus a "Clear" control.
    /// The section carries `data-empty` when no filter is active.
    pub fn render(&self) -> Node {
        let active = self.get();

        let items = active.iter().map(|keyword| {
            el("li")
                .class("filter")
                .child(el("span").class("filter__label").text(keyword))
                .child(
                    el("button")
                        .class("filter__remove")
                        .attr("aria-label", format!("Remove {keyword} filter"))
                        .on_click(Action::Toggle(keyword.clone()))
                        .text("×"),
                )
        });

        el("section")
            .class("filters")
            .attr("aria-label", "Filters")
            .attr_if(active.is_empty(), "data-empty", "")
            .child(
                el("ul")
                    .class("filters__list")
                    .attr("aria-label", "Active filters")
                    .children(items),
            )
            .child(
                el("button")
                    .class("filters__clear")
                    .on_click(Action::Clear)
                    .text("Clear"),
            )
            .into()
    }
}
