use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html,
    },
};
use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::state::AppState;
use crate::view::document;

const PAGE_TITLE: &str = "Job listings";

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Revision the subscribing page was rendered at.
    pub since: Option<u64>,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let revision = state.notifier.revision();
    Html(document(PAGE_TITLE, revision, &state.render()))
}

/// GET /events
///
/// Emits the new revision each time filters or jobs change. A `since` older than the
/// current revision is answered immediately, so changes between render and subscribe
/// are not lost.
pub async fn handle_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifier.subscribe();

    let events = stream::unfold((rx, query.since), |(mut rx, since)| async move {
        let current = *rx.borrow_and_update();
        if since.is_some_and(|seen| seen != current) {
            let event = Event::default().data(current.to_string());
            return Some((Ok::<_, Infallible>(event), (rx, None)));
        }

        rx.changed().await.ok()?;
        let revision = *rx.borrow_and_update();
        let event = Event::default().data(revision.to_string());
        Some((Ok(event), (rx, None)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
