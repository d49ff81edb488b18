use leptos::prelude::*;

/// Чекбокс строки таблицы к оплате
///
/// Рендерит `<td>` с чекбоксом. Отключённые строки (нечего оплачивать)
/// показываются, но не переключаются.
///
/// # BEM классы
/// - `.table__cell--checkbox` - td обёртка
/// - `.table__checkbox` - input элемент
#[component]
pub fn TableCheckbox(
    /// Сигнал состояния чекбокса
    #[prop(into)]
    checked: Signal<bool>,
    /// Callback вызывается при изменении состояния
    on_change: Callback<bool>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}

/// Чекбокс "выбрать все" для заголовка таблицы
#[component]
pub fn HeaderCheckbox(
    #[prop(into)] checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                title="Select all"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </th>
    }
}
