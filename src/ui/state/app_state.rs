use std::sync::Arc;

use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::sales::{BranchFilter, SalesTable};

pub const READY_STATUS: &str = "Listo";

pub struct AppState {
    pub table: Signal<Option<Arc<SalesTable>>>,
    pub source_name: Signal<Option<String>>,
    pub branch_filter: Signal<BranchFilter>,
    pub load_error: Signal<Option<String>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            table: use_signal(|| None::<Arc<SalesTable>>),
            source_name: use_signal(|| None::<String>),
            branch_filter: use_signal(BranchFilter::default),
            load_error: use_signal(|| None::<String>),
            busy: use_signal(|| false),
            status: use_signal(|| READY_STATUS.to_string()),
        }
    }
}
