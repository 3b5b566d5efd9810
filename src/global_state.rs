use crate::domain::catalog::{PageState, Product};
use crate::domain::import::ImportSession;
use derive_more::Display;
use leptos::*;
use once_cell::sync::OnceCell;

/// Dashboard panels reachable from the switcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DashboardPanel {
    #[display(fmt = "Upload")]
    Upload,
    #[display(fmt = "Charts")]
    Charts,
    #[display(fmt = "Products")]
    Products,
}

/// Cross-component signals. Browser handles like the selected `File` are not
/// Send and live in thread-locals in the view layer instead.
pub struct Globals {
    pub products: RwSignal<Vec<Product>>,
    pub products_loading: RwSignal<bool>,
    pub session: RwSignal<ImportSession>,
    pub page_state: RwSignal<PageState>,
    pub active_panel: RwSignal<DashboardPanel>,
    pub feed_live: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        products: create_rw_signal(Vec::new()),
        products_loading: create_rw_signal(false),
        session: create_rw_signal(ImportSession::new()),
        page_state: create_rw_signal(PageState::default()),
        active_panel: create_rw_signal(DashboardPanel::Upload),
        feed_live: create_rw_signal(false),
    })
}

/// Generate accessor functions for the global signals.
/// Usage: `global_signals! { pub fn_name => field: Type, ... }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}

global_signals! {
    pub products => products: Vec<Product>,
    pub products_loading => products_loading: bool,
    pub import_session => session: ImportSession,
    pub page_state => page_state: PageState,
    pub active_panel => active_panel: DashboardPanel,
    pub feed_live => feed_live: bool,
}
