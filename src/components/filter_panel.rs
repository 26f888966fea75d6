use leptos::prelude::*;

use crate::catalog::{self, FilterCriteria, SortKey};

#[derive(Clone, Copy, PartialEq)]
enum Facet {
	Artist,
	Movement,
	Tag,
}

impl Facet {
	fn contains(self, criteria: &FilterCriteria, value: &str) -> bool {
		match self {
			Facet::Artist => criteria.artists.contains(value),
			Facet::Movement => criteria.movements.contains(value),
			Facet::Tag => criteria.tags.contains(value),
		}
	}

	fn toggle(self, criteria: &mut FilterCriteria, value: &str) {
		match self {
			Facet::Artist => criteria.toggle_artist(value),
			Facet::Movement => criteria.toggle_movement(value),
			Facet::Tag => criteria.toggle_tag(value),
		}
	}
}

#[component]
fn FacetList(title: &'static str, facet: Facet, values: Vec<String>, criteria: RwSignal<FilterCriteria>) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let values = StoredValue::new(values);
	let visible = Memo::new(move |_| values.with_value(|all| query.with(|q| catalog::narrow_facet(all, q))));

	// Enter picks the value typed out in full.
	let on_key = move |ev: leptos::ev::KeyboardEvent| {
		if ev.key() != "Enter" {
			return;
		}
		let picked = values.with_value(|all| query.with(|q| catalog::exact_facet(all, q).cloned()));
		if let Some(value) = picked {
			criteria.update(|c| {
				if !facet.contains(c, &value) {
					facet.toggle(c, &value);
				}
			});
			query.set(String::new());
		}
	};

	view! {
		<fieldset class="facet">
			<legend>{title}</legend>
			<input
				type="search"
				class="facet-search"
				placeholder=format!("Search {}...", title.to_lowercase())
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
				on:keydown=on_key
			/>
			<div class="facet-options">
				{move || {
					visible
						.get()
						.into_iter()
						.map(|value| {
							let (checked_value, toggled_value) = (value.clone(), value.clone());
							view! {
								<label class="facet-option">
									<input
										type="checkbox"
										prop:checked=move || criteria.with(|c| facet.contains(c, &checked_value))
										on:change=move |_| criteria.update(|c| facet.toggle(c, &toggled_value))
									/>
									{value}
								</label>
							}
						})
						.collect_view()
				}}
			</div>
		</fieldset>
	}
}

/// Search box, sort order and facet checkboxes bound to `criteria`.
#[component]
pub fn FilterPanel(criteria: RwSignal<FilterCriteria>) -> impl IntoView {
	let all = catalog::catalog();
	let active = move || criteria.with(FilterCriteria::active_count);

	view! {
		<aside class="filter-panel">
			<input
				type="search"
				class="filter-search"
				placeholder="Search title, artist, movement, tags..."
				prop:value=move || criteria.with(|c| c.search.clone().unwrap_or_default())
				on:input=move |ev| {
					let term = event_target_value(&ev);
					criteria.update(|c| c.search = (!term.is_empty()).then_some(term));
				}
			/>
			<select
				class="filter-sort"
				on:change=move |ev| {
					let key = event_target_value(&ev).parse::<SortKey>().ok();
					criteria.update(|c| c.sort = key);
				}
			>
				<option value="" prop:selected=move || criteria.with(|c| c.sort.is_none())>"Catalog order"</option>
				{SortKey::ALL
					.into_iter()
					.map(|key| {
						view! {
							<option value=key.as_str() prop:selected=move || criteria.with(|c| c.sort == Some(key))>
								{key.label()}
							</option>
						}
					})
					.collect_view()}
			</select>
			<div class="filter-summary">
				<span>{move || format!("{} filters active", active())}</span>
				<button class="button button-ghost" on:click=move |_| criteria.update(FilterCriteria::clear)>
					"Clear"
				</button>
			</div>
			<FacetList title="Artists" facet=Facet::Artist values=catalog::artists(all) criteria />
			<FacetList title="Movements" facet=Facet::Movement values=catalog::movements(all) criteria />
			<FacetList title="Tags" facet=Facet::Tag values=catalog::tags(all) criteria />
		</aside>
	}
}
