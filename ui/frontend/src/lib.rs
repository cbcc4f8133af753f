use leptos::*;
use leptos_meta::*;

mod components;
mod config;

use crate::components::{address_form::AddressForm, map_panel::MapPanel};

use ui_common::{AddressQuery, WalkTime, DEFAULT_ADDRESS};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (address, set_address) = create_signal(DEFAULT_ADDRESS.to_string());
    let (walk_time, set_walk_time) = create_signal(WalkTime::default());
    let (submissions, set_submissions) = create_signal(0u32);

    let query = Signal::derive(move || AddressQuery::new(address.get(), walk_time.get()));

    let app_config = create_local_resource(|| (), |_| config::load());

    view! {
        <Title text="Walkable Area Finder"/>
        <Meta charset="UTF-8"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1.0"/>

        <main class="max-w-screen-xl mx-auto p-4">
            <h1 class="text-2xl font-semibold mb-4">"Walkable Area Finder"</h1>
            <AddressForm
                address=address
                set_address=set_address
                walk_time=walk_time
                set_walk_time=set_walk_time
                on_submit=move |_| set_submissions.update(|n| *n += 1)
            />
            <Suspense fallback=|| view! { <p>"Loading map..."</p> }>
                {move || {
                    app_config
                        .get()
                        .map(|c| {
                            view! {
                                <MapPanel
                                    backend_url=c.backend_url
                                    query=query
                                    submissions=submissions
                                />
                            }
                        })
                }}
            </Suspense>
        </main>
    }
}
