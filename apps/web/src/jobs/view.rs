use crate::view::{el, Action, Element, Node};

use super::{JobPosting, Jobs};

impl Jobs {
    /// Loader while fetching, an error panel with a reload control when the last load
    /// produced nothing, otherwise one card per filtered posting.
    pub fn render(&self) -> Node {
        let loading = self.is_loading();
        let section = el("section")
            .class("jobs")
            .attr("aria-label", "Job listings")
            .attr("aria-live", "polite")
            .attr("aria-busy", loading.to_string());

        if loading {
            return section.child(render_loader()).into();
        }

        if self.postings().is_empty() {
            return section.child(render_error()).into();
        }

        let active = self.filters().get();
        let cards = self
            .get_filtered_jobs()
            .iter()
            .map(|job| render_card(job, &active))
            .collect::<Vec<_>>();

        section
            .child(el("ol").class("jobs__list").children(cards))
            .into()
    }
}

fn render_loader() -> Element {
    el("div")
        .class("loader")
        .attr("role", "status")
        .text("Loading jobs…")
}

fn render_error() -> Element {
    el("div")
        .class("jobs__error")
        .attr("role", "alert")
        .child(el("p").text("Jobs failed to load."))
        .child(
            el("button")
                .class("jobs__reload")
                .on_click(Action::Reload)
                .text("Reload jobs"),
        )
}

fn render_card(job: &JobPosting, active: &[String]) -> Element {
    let mut company = el("p")
        .class("job__company")
        .child(el("span").class("job__company-name").text(&job.company));
    if job.new {
        company = company.child(el("span").class("tag tag--new").text("New"));
    }
    if job.featured {
        company = company.child(el("span").class("tag tag--featured").text("Featured"));
    }

    let mut card = el("li").class("job").attr_if(job.featured, "data-featured", "");
    if let Some(logo) = &job.logo {
        card = card.child(
            el("img")
                .class("job__logo")
                .attr("src", logo)
                .attr("alt", format!("{} logo", job.company)),
        );
    }

    card.child(company)
        .child(el("h2").class("job__position").text(&job.position))
        .child(
            el("ul").class("job__meta").children(
                [&job.posted_at, &job.contract, &job.location]
                    .into_iter()
                    .map(|detail| el("li").text(detail)),
            ),
        )
        .child(render_keywords(&job.keywords, active))
}

fn render_keywords(keywords: &[String], active: &[String]) -> Element {
    el("ul")
        .class("job__keywords")
        .attr("aria-label", "Keywords")
        .children(keywords.iter().map(|keyword| {
            el("li").child(
                el("button")
                    .class("keyword")
                    .attr("aria-pressed", active.contains(keyword).to_string())
                    .on_click(Action::Toggle(keyword.clone()))
                    .text(keyword),
            )
        }))
}
