use leptos::*;
use ui_common::IsochroneRecord;

#[component]
pub fn IsochroneList(records: Signal<Vec<IsochroneRecord>>) -> impl IntoView {
    view! {
        <div>
            <h3>"Fetched Isochrones:"</h3>
            <ul>
                <For
                    each=move || records.get()
                    key=|record| record.id
                    children=|record| view! {
                        <li>
                            <span>"Isochrone ID: " {record.id}</span>
                        </li>
                    }
                />
            </ul>
        </div>
    }
}
