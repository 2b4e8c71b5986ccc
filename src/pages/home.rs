use std::sync::Arc;

use leptos::callback::Callback;
use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::explorer::{Corpus, Entry};

/// Lexicon snapshot produced by the scraper.
const ENTRIES: &str = include_str!("../../assets/entries.json");

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (selected, set_selected) = signal(None::<Entry>);
	let on_select = Callback::new(move |entry: Entry| set_selected.set(Some(entry)));
	let corpus = Corpus::from_json(ENTRIES).map(Arc::new);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{corpus
					.map(|corpus| {
						view! { <ForceGraphCanvas corpus=corpus on_select=on_select fullscreen=true /> }
					})}
				<div class="graph-overlay">
					<h1>"Jargon Graph"</h1>
					<p class="subtitle">
						"Click a term to reveal what it references. Drag nodes to reposition. Scroll to zoom."
					</p>
					{move || {
						selected
							.get()
							.map(|entry| {
								view! {
									<div class="entry-details">
										<h2>{entry.name}</h2>
										<p>{entry.description.unwrap_or_default()}</p>
									</div>
								}
							})
					}}
				</div>
			</div>
		</ErrorBoundary>
	}
}
