use chrono::Local;
use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::domain::entities::sales::BranchFilter;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::components::dropdown::{DropdownOption, SelectField};
use crate::ui::components::product_card::{AuthorPanel, ProductCard};
use crate::ui::state::app_state::AppState;
use crate::usecase::services::dashboard_service::{branch_options, compute};
use crate::usecase::services::import_service::ImportService;

const ROOT_STYLE: &str = "font-family: 'Source Sans Pro', 'Noto Sans', sans-serif; display: flex; height: 100vh; margin: 0; background: #fff;";
const SIDEBAR_STYLE: &str = "flex: 0 0 260px; background: #f0f2f6; padding: 16px; display: flex; flex-direction: column; gap: 14px; overflow-y: auto;";
const MAIN_STYLE: &str = "flex: 1 1 auto; padding: 16px 24px; overflow-y: auto;";
const ERROR_STYLE: &str = "background: #ffe6e6; color: #7d1a1a; border: 1px solid #ffb3b3; border-radius: 6px; padding: 8px 12px; margin-bottom: 12px;";

#[component]
pub fn App() -> Element {
    let config = use_context::<DashboardConfig>();
    let AppState {
        mut table,
        mut source_name,
        mut branch_filter,
        mut load_error,
        mut busy,
        mut status,
    } = AppState::new();
    let import_service = ImportService::new();

    let table_snapshot = table();
    let filter_snapshot = branch_filter();
    let view = table_snapshot
        .as_ref()
        .map(|sales| compute(sales, &filter_snapshot));
    let branch_dropdown_options: Vec<DropdownOption> = table_snapshot
        .as_ref()
        .map(|sales| branch_options(sales))
        .unwrap_or_default()
        .into_iter()
        .map(DropdownOption::plain)
        .collect();
    let selected_branch = filter_snapshot.label().to_string();
    let chart_config = config.chart;

    let handle_load = move |_: MouseEvent| {
        if busy() {
            return;
        }

        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            status.set("Carga cancelada".to_string());
            return;
        };

        busy.set(true);
        status.set(format!("Cargando {}", file_path.display()));

        match run_blocking("import_csv", || import_service.import_csv(&file_path)) {
            Ok(result) => {
                status.set(format!(
                    "{} cargado: {} filas ({})",
                    result.source_name,
                    result.row_count,
                    Local::now().format("%H:%M:%S")
                ));
                table.set(Some(result.table));
                source_name.set(Some(result.source_name));
                branch_filter.set(BranchFilter::All);
                load_error.set(None);
            }
            Err(err) => {
                error!(file = %file_path.display(), error = %err, "failed to import sales csv");
                table.set(None);
                source_name.set(None);
                branch_filter.set(BranchFilter::All);
                load_error.set(Some(err.to_string()));
                status.set(format!("Error al cargar: {err}"));
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Error al cargar el archivo")
                    .set_description(err.to_string())
                    .set_buttons(MessageButtons::Ok)
                    .show();
            }
        }
        busy.set(false);
    };

    let main_content = match view {
        Some(view) => {
            let summary = format!(
                "{} registros · {} productos",
                view.row_count,
                view.products.len()
            );
            let panels: Vec<_> = view
                .products
                .into_iter()
                .map(|panel| (panel.product.clone(), panel))
                .collect();
            rsx! {
                h1 { style: "margin-top: 0;", "{view.heading}" }
                p { style: "color: #808495;", "{summary}" }
                for (key, panel) in panels {
                    ProductCard { key: "{key}", panel: panel, chart: chart_config }
                }
            }
        }
        None => rsx! {
            h3 { "Por favor, sube un archivo CSV desde la barra lateral." }
            AuthorPanel { author: config.author.clone() }
        },
    };

    rsx! {
        div {
            style: ROOT_STYLE,

            aside {
                style: SIDEBAR_STYLE,
                h3 { style: "margin: 0;", "Cargar archivo de datos" }
                button {
                    style: "padding: 8px 12px; border: 1px solid #bbb; border-radius: 6px; background: #fff; cursor: pointer;",
                    disabled: busy(),
                    onclick: handle_load,
                    "Subir archivo CSV"
                }
                if let Some(name) = source_name() {
                    span { style: "font-size: 13px; color: #555;", "📄 {name}" }
                }
                if !branch_dropdown_options.is_empty() {
                    SelectField {
                        label: "Seleccionar Sucursal",
                        options: branch_dropdown_options,
                        selected: selected_branch,
                        disabled: busy(),
                        on_select: move |value: String| {
                            let next = BranchFilter::from_label(&value);
                            info!(branch = next.label(), "branch selected");
                            branch_filter.set(next);
                        },
                    }
                }
                span { style: "font-size: 12px; color: #808495; margin-top: auto;", "{status}" }
            }

            main {
                style: MAIN_STYLE,
                if let Some(message) = load_error() {
                    div { style: ERROR_STYLE, "No se pudo cargar el archivo: {message}" }
                }
                {main_content}
            }
        }
    }
}
