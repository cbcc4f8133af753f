use leptos::*;

#[component]
pub fn ErrorBanner(message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div style="color: red; margin-top: 10px">
                <strong>"Error:"</strong>
                " "
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
