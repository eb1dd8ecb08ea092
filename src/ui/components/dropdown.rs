use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn plain(value: String) -> Self {
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Value the select should show; an unknown selection falls back to the first option.
pub fn resolve_selection(options: &[DropdownOption], selected: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.value == selected)
        .or_else(|| options.first())
        .map(|opt| opt.value.clone())
}

#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: String,
    disabled: bool,
    on_select: EventHandler<String>,
) -> Element {
    let current = resolve_selection(&options, &selected).unwrap_or_default();

    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 6px; font-size: 14px;",
            "{label}"
            select {
                style: "border: 1px solid #bbb; background: #fff; padding: 6px 8px; border-radius: 6px;",
                disabled: disabled,
                value: "{current}",
                onchange: move |event| on_select.call(event.value()),
                for opt in options {
                    option {
                        key: "{opt.value}",
                        value: "{opt.value}",
                        selected: opt.value == current,
                        "{opt.label}"
                    }
                }
            }
        }
    }
}
