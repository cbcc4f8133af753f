use leptos::*;
use ui_common::WalkTime;

/// Address text field and walk-time selector. The values live in the
/// parent's signals; submitting only notifies the parent.
#[component]
pub fn AddressForm(
    address: ReadSignal<String>,
    set_address: WriteSignal<String>,
    walk_time: ReadSignal<WalkTime>,
    set_walk_time: WriteSignal<WalkTime>,
    #[prop(into)] on_submit: Callback<()>,
) -> impl IntoView {
    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };

    let select_walk_time = move |ev: ev::Event| match event_target_value(&ev).parse::<WalkTime>() {
        Ok(w) => set_walk_time.set(w),
        Err(e) => log::error!("{e}"),
    };

    let options = WalkTime::ALL
        .into_iter()
        .map(|w| {
            view! {
                <option value=w.minutes().to_string() prop:selected=move || walk_time.get() == w>
                    {w.label()}
                </option>
            }
        })
        .collect_view();

    view! {
        <form on:submit=submit class="flex flex-wrap gap-2 mb-4">
            <input
                type="text"
                placeholder="Enter Address"
                prop:value=move || address.get()
                on:input=move |ev| set_address.set(event_target_value(&ev))
                class="border rounded-lg px-3 py-2 grow"
            />
            <select on:change=select_walk_time class="border rounded-lg px-3 py-2">
                {options}
            </select>
            <button type="submit" class="text-white bg-blue-700 hover:bg-blue-800 font-medium rounded-lg text-sm px-5 py-2.5">
                "Get Walkable Distances"
            </button>
        </form>
    }
}
