use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::sleep;
use leptos::html::{Canvas, Input};
use leptos::*;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::{
    application::{
        catalog_store::shared_store,
        chart_refresh::{
            ECONOMY_CHART_TARGET, PRICE_CHART_TARGET, PROGRESS_CHART_TARGET,
            refresh_product_charts, refresh_progress_donut,
        },
    },
    domain::{
        catalog::PAGE_SIZE_OPTIONS,
        import::{
            ANIMATION_TICK_MS, ImportStage, ProgressAnimator, REFRESH_DELAY_MS, SessionEvent,
            SessionToken,
        },
        logging::{LogComponent, LogEntry, Logger, get_logger},
    },
    global_state::{
        DashboardPanel, active_panel, feed_live, import_session, page_state, products,
        products_loading,
    },
    infrastructure::{
        http::ImportClient, rendering::ChartSurface, services::ConsoleLogger,
        websocket::ProgressChannel,
    },
};

const MAX_LOG_LINES: usize = 100;

// 🔗 View-layer globals. The log signals bridge domain logging into the
// in-app console; the file handle and the upload channel are browser objects
// (not Send), so they live here instead of in the shared signal set.
thread_local! {
    static GLOBAL_LOGS: RwSignal<Vec<String>> = create_rw_signal(Vec::new());
    static IS_LOG_PAUSED: RwSignal<bool> = create_rw_signal(false);
    static SELECTED_FILE: RefCell<Option<web_sys::File>> = RefCell::new(None);
    static UPLOAD_CHANNEL: RefCell<ProgressChannel> = RefCell::new(ProgressChannel::new());
}

/// 🌉 Bridge logger: mirrors every entry into the in-app console signals,
/// then forwards it to the browser console sink.
pub struct LeptosLogger {
    console: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new() -> Self {
        Self {
            console: ConsoleLogger::new_development(),
        }
    }
}

impl Default for LeptosLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        let formatted = entry.format_line();
        GLOBAL_LOGS.with(|logs| {
            IS_LOG_PAUSED.with(|paused| {
                if !paused.get_untracked() {
                    logs.update(|lines| {
                        lines.push(formatted);
                        while lines.len() > MAX_LOG_LINES {
                            lines.remove(0);
                        }
                    });
                }
            });
        });
        self.console.log(entry);
    }
}

/// 🦀 Root component of the import dashboard
#[component]
pub fn App() -> impl IntoView {
    // Single catalog listener: every change-feed notification, whether from a
    // completed import or a CRUD call, funnels into one reload.
    let feed_handle = shared_store().subscribe(|| spawn_local(load_products()));
    on_cleanup(move || shared_store().unsubscribe(feed_handle));
    spawn_local(load_products());

    view! {
        <style>
            {r#"
            .import-dashboard {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: linear-gradient(135deg, #1e1e2f 0%, #2a2a45 100%);
                min-height: 100vh;
                padding: 20px;
                color: white;
            }

            .header {
                text-align: center;
                margin-bottom: 20px;
                background: rgba(255, 255, 255, 0.08);
                backdrop-filter: blur(10px);
                padding: 20px;
                border-radius: 15px;
                border: 1px solid rgba(255, 255, 255, 0.2);
            }

            .stat-row {
                display: flex;
                justify-content: center;
                gap: 40px;
                margin-top: 15px;
            }

            .stat-item {
                text-align: center;
            }

            .stat-value {
                font-size: 24px;
                font-weight: 700;
                color: #72c685;
                font-family: 'Courier New', monospace;
            }

            .stat-label {
                font-size: 12px;
                color: #a0a0a0;
                margin-top: 5px;
            }

            .tabs {
                display: flex;
                justify-content: center;
                gap: 10px;
                margin-bottom: 20px;
            }

            .tab-btn {
                background: rgba(255, 255, 255, 0.08);
                color: #c0c0d0;
                border: 1px solid rgba(255, 255, 255, 0.2);
                padding: 10px 24px;
                border-radius: 10px;
                cursor: pointer;
                font-size: 14px;
            }

            .tab-btn:hover {
                background: rgba(255, 255, 255, 0.15);
            }

            .tab-btn.active {
                background: #4a5d73;
                color: white;
                font-weight: bold;
            }

            .panel-host {
                max-width: 1100px;
                margin: 0 auto 20px auto;
            }

            .upload-panel, .charts-panel, .products-panel {
                background: rgba(255, 255, 255, 0.06);
                border: 1px solid rgba(255, 255, 255, 0.15);
                border-radius: 15px;
                padding: 20px;
            }

            .field-row {
                display: flex;
                align-items: center;
                gap: 12px;
                margin: 12px 0;
                flex-wrap: wrap;
            }

            .field-row select {
                background: #2c2c44;
                color: white;
                border: 1px solid #4a5d73;
                border-radius: 6px;
                padding: 8px 12px;
            }

            .file-name {
                color: #72c685;
                font-family: 'Courier New', monospace;
                font-size: 13px;
            }

            .action-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 8px 18px;
                border-radius: 6px;
                cursor: pointer;
                font-size: 13px;
            }

            .action-btn:hover:enabled {
                background: #5a6d83;
            }

            .action-btn:disabled {
                opacity: 0.4;
                cursor: not-allowed;
            }

            .action-btn.primary {
                background: #2e7d4f;
            }

            .action-btn.danger {
                background: #8d3030;
            }

            .banner {
                border-radius: 8px;
                padding: 10px 14px;
                margin: 10px 0;
                font-size: 14px;
            }

            .banner.error {
                background: rgba(200, 60, 60, 0.25);
                border: 1px solid #c05050;
                color: #ffb0b0;
            }

            .banner.success {
                background: rgba(60, 160, 90, 0.25);
                border: 1px solid #3f9d63;
                color: #a8e6bf;
            }

            .banner.muted {
                background: rgba(255, 255, 255, 0.06);
                color: #a0a0a0;
            }

            .progress-block {
                margin: 14px 0;
            }

            .progress-caption {
                font-size: 12px;
                color: #a0a0a0;
                margin: 6px 0 3px 0;
            }

            .progress-track {
                background: rgba(0, 0, 0, 0.4);
                border-radius: 6px;
                height: 10px;
                overflow: hidden;
            }

            .progress-fill {
                background: #4a90d9;
                height: 100%;
                transition: width 0.2s ease;
            }

            .progress-fill.processing {
                background: #2e7d4f;
            }

            .step-caption {
                font-size: 12px;
                color: #e0e0e0;
                margin-top: 6px;
                font-family: 'Courier New', monospace;
            }

            .preview-card {
                margin-top: 16px;
            }

            .data-table {
                width: 100%;
                border-collapse: collapse;
                font-size: 13px;
                margin-top: 8px;
            }

            .data-table th {
                text-align: left;
                color: #72c685;
                border-bottom: 1px solid #4a5d73;
                padding: 6px 8px;
            }

            .data-table td {
                border-bottom: 1px solid rgba(255, 255, 255, 0.08);
                padding: 6px 8px;
            }

            .muted {
                color: #a0a0a0;
            }

            .chart-grid {
                display: flex;
                justify-content: center;
                gap: 16px;
                flex-wrap: wrap;
            }

            .chart-card canvas {
                border: 2px solid #4a5d73;
                border-radius: 10px;
                background: #1e1e2f;
            }

            .feed-caption {
                text-align: center;
                color: #a0a0a0;
                font-size: 13px;
                margin-top: 12px;
                font-family: 'Courier New', monospace;
            }

            .toolbar {
                display: flex;
                justify-content: space-between;
                align-items: center;
                margin-bottom: 10px;
            }

            .page-size {
                font-size: 13px;
                color: #a0a0a0;
                display: flex;
                align-items: center;
                gap: 8px;
            }

            .page-size select {
                background: #2c2c44;
                color: white;
                border: 1px solid #4a5d73;
                border-radius: 6px;
                padding: 4px 8px;
            }

            .count-caption {
                color: #72c685;
                font-size: 13px;
            }

            .pager {
                display: flex;
                justify-content: center;
                align-items: center;
                gap: 6px;
                margin-top: 14px;
            }

            .pager-btn {
                background: rgba(255, 255, 255, 0.08);
                color: #c0c0d0;
                border: 1px solid rgba(255, 255, 255, 0.2);
                padding: 5px 12px;
                border-radius: 6px;
                cursor: pointer;
                font-size: 13px;
            }

            .pager-btn:disabled {
                opacity: 0.4;
                cursor: not-allowed;
            }

            .pager-btn.active {
                background: #4a5d73;
                color: white;
                font-weight: bold;
            }

            .pager-caption {
                color: #a0a0a0;
                font-size: 13px;
                margin-left: 10px;
            }

            .debug-console {
                background: rgba(0, 0, 0, 0.8);
                border-radius: 10px;
                padding: 15px;
                max-height: 300px;
                overflow-y: auto;
                border: 1px solid #4a5d73;
                max-width: 1100px;
                margin: 0 auto;
            }

            .debug-header {
                display: flex;
                justify-content: space-between;
                align-items: center;
                margin-bottom: 10px;
                color: #72c685;
                font-weight: bold;
            }

            .debug-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 5px 10px;
                border-radius: 5px;
                cursor: pointer;
                font-size: 12px;
                margin-left: 5px;
            }

            .debug-btn:hover {
                background: #5a6d83;
            }

            .debug-log {
                font-family: 'Courier New', monospace;
                font-size: 11px;
                line-height: 1.3;
            }

            .log-line {
                color: #e0e0e0;
                margin: 2px 0;
                padding: 1px 5px;
                border-radius: 3px;
            }

            .log-line:hover {
                background: rgba(255, 255, 255, 0.1);
            }
            "#}
        </style>
        <div class="import-dashboard">
            <Header />
            <PanelSwitcher />
            <main class="panel-host">
                {move || match active_panel().get() {
                    DashboardPanel::Upload => view! { <UploadPanel /> }.into_view(),
                    DashboardPanel::Charts => view! { <ChartsPanel /> }.into_view(),
                    DashboardPanel::Products => view! { <ProductsPanel /> }.into_view(),
                }}
            </main>
            <DebugConsole />
        </div>
    }
}

/// 📊 Header with live collection and import status
#[component]
fn Header() -> impl IntoView {
    let products = products();
    let session = import_session();
    let feed_live = feed_live();

    view! {
        <header class="header">
            <h1>"📦 Product Import Dashboard"</h1>
            <p>"Excel catalog import • Leptos + Canvas"</p>

            <div class="stat-row">
                <div class="stat-item">
                    <div class="stat-value">
                        {move || products.with(|items| items.len().to_string())}
                    </div>
                    <div class="stat-label">"Products"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">
                        {move || session.with(|s| stage_caption(s.stage()).to_string())}
                    </div>
                    <div class="stat-label">"Import"</div>
                </div>
                <div class="stat-item">
                    <div class="stat-value">
                        {move || if feed_live.get() { "🟢 LIVE" } else { "🔴 OFF" }}
                    </div>
                    <div class="stat-label">"Progress feed"</div>
                </div>
            </div>
        </header>
    }
}

#[component]
fn PanelSwitcher() -> impl IntoView {
    let active = active_panel();
    let tab = move |panel: DashboardPanel, caption: &'static str| {
        view! {
            <button
                class="tab-btn"
                class:active=move || active.get() == panel
                on:click=move |_| active.set(panel)
            >
                {caption}
            </button>
        }
    };

    view! {
        <nav class="tabs">
            {tab(DashboardPanel::Upload, "📤 Upload")}
            {tab(DashboardPanel::Charts, "📊 Charts")}
            {tab(DashboardPanel::Products, "📋 Products")}
        </nav>
    }
}

/// 📤 File selection, sheet choice, preview table and the import launcher
#[component]
fn UploadPanel() -> impl IntoView {
    let session = import_session();
    let file_input = create_node_ref::<Input>();

    let on_file_change = move |_| {
        let file = file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|list| list.get(0));
        handle_file_selection(file);
    };

    let on_sheet_change = move |ev: web_sys::Event| {
        session.update(|s| s.select_sheet(&event_target_value(&ev)));
    };

    // The push channel stays open after the upload settles so that trailing
    // processing frames still land; switching panels tears it down.
    on_cleanup(|| UPLOAD_CHANNEL.with(|channel| channel.borrow_mut().close()));

    view! {
        <section class="upload-panel">
            <h2>"Import products from Excel"</h2>

            <div class="field-row">
                <input
                    type="file"
                    accept=".xlsx,.xls"
                    node_ref=file_input
                    on:change=on_file_change
                />
                {move || session.with(|s| s.file_name().map(|name| view! {
                    <span class="file-name">{name.to_string()}</span>
                }))}
            </div>

            <div class="field-row">
                <select
                    on:change=on_sheet_change
                    disabled=move || session.with(|s| s.sheets().is_empty())
                >
                    <option value="">"-- choose a sheet --"</option>
                    {move || session.with(|s| {
                        let chosen = s.sheet().map(str::to_string);
                        s.sheets()
                            .iter()
                            .map(|sheet| {
                                let value = sheet.clone();
                                let is_chosen = chosen.as_deref() == Some(sheet.as_str());
                                view! {
                                    <option value=value.clone() selected=is_chosen>{value}</option>
                                }
                            })
                            .collect_view()
                    })}
                </select>
                <button
                    class="action-btn"
                    on:click=move |_| start_preview()
                    disabled=move || session.with(|s| !s.can_upload() || s.is_uploading())
                >
                    "👁️ Preview"
                </button>
                <button
                    class="action-btn primary"
                    on:click=move |_| start_import()
                    disabled=move || session.with(|s| !s.can_upload() || s.is_uploading())
                >
                    "🚀 Import"
                </button>
            </div>

            {move || session.with(|s| s.error().map(|message| view! {
                <div class="banner error">{message.to_string()}</div>
            }))}

            {move || session.with(|s| {
                (s.is_uploading() || s.upload_progress() > 0).then(|| view! {
                    <div class="progress-block">
                        <div class="progress-caption">
                            {format!("Upload {}%", s.upload_progress())}
                        </div>
                        <div class="progress-track">
                            <div
                                class="progress-fill"
                                style:width=format!("{}%", s.upload_progress())
                            ></div>
                        </div>
                        <div class="progress-caption">
                            {format!("Processing {:.0}%", s.processing_target())}
                        </div>
                        <div class="progress-track">
                            <div
                                class="progress-fill processing"
                                style:width=format!("{:.0}%", s.processing_target())
                            ></div>
                        </div>
                        {(!s.step().is_empty()).then(|| view! {
                            <div class="step-caption">{s.step().to_string()}</div>
                        })}
                    </div>
                })
            })}

            {move || session.with(|s| s.outcome().map(|outcome| view! {
                <div class="banner success">
                    {format!("✅ {} ({} rows imported)", outcome.message, outcome.imported)}
                </div>
            }))}

            {move || session.with(|s| (!s.preview().is_empty()).then(|| {
                let columns = s.columns().to_vec();
                let rows = s.preview().to_vec();
                view! {
                    <div class="preview-card">
                        <h3>{format!("Preview ({} rows)", rows.len())}</h3>
                        <table class="data-table">
                            <thead>
                                <tr>
                                    {columns
                                        .iter()
                                        .map(|column| view! { <th>{column.clone()}</th> })
                                        .collect_view()}
                                </tr>
                            </thead>
                            <tbody>
                                {rows
                                    .iter()
                                    .map(|row| view! {
                                        <tr>
                                            {columns
                                                .iter()
                                                .map(|column| view! {
                                                    <td>{cell_text(row.get(column))}</td>
                                                })
                                                .collect_view()}
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
            }))}
        </section>
    }
}

/// 📊 Canvas charts over the catalog plus the live import donut
#[component]
fn ChartsPanel() -> impl IntoView {
    let products = products();
    let bands_ref = create_node_ref::<Canvas>();
    let economy_ref = create_node_ref::<Canvas>();
    let donut_ref = create_node_ref::<Canvas>();

    let surface = Rc::new(RefCell::new(ChartSurface::new()));
    let displayed = create_rw_signal(0.0f64);
    let feed_step = create_rw_signal(String::from("Waiting for import activity"));
    let animation: Rc<RefCell<Option<AbortHandle>>> = Rc::new(RefCell::new(None));
    let channel = Rc::new(RefCell::new(ProgressChannel::new()));

    // Product charts repaint whenever the collection changes, once both
    // canvases are mounted
    {
        let surface = Rc::clone(&surface);
        create_effect(move |_| {
            if bands_ref.get().is_none() || economy_ref.get().is_none() {
                return;
            }
            products.with(|items| {
                if let Err(e) = refresh_product_charts(&mut surface.borrow_mut(), items) {
                    get_logger().error(
                        LogComponent::Presentation("ChartsPanel"),
                        &format!("❌ Chart refresh failed: {e}"),
                    );
                }
            });
        });
    }

    // The donut follows the eased percentage, not the raw feed value
    {
        let surface = Rc::clone(&surface);
        create_effect(move |_| {
            if donut_ref.get().is_none() {
                return;
            }
            let percent = displayed.get();
            if let Err(e) = refresh_progress_donut(&mut surface.borrow_mut(), percent) {
                get_logger().error(
                    LogComponent::Presentation("ChartsPanel"),
                    &format!("❌ Donut refresh failed: {e}"),
                );
            }
        });
    }

    {
        let animation = Rc::clone(&animation);
        let opened = channel.borrow_mut().open(move |event| {
            if let Some(step) = event.step.as_deref() {
                feed_step.set(step.to_string());
            }
            if let Some(target) = event.progress {
                animate_progress_to(displayed, target, &animation);
            }
            if event.is_terminal() {
                schedule_catalog_refresh();
            }
        });
        match opened {
            Ok(()) => feed_live().set(true),
            Err(e) => {
                feed_step.set("Progress feed unavailable".to_string());
                get_logger().warn(
                    LogComponent::Presentation("ChartsPanel"),
                    &format!("⚠️ Progress feed unavailable: {e}"),
                );
            }
        }
    }

    on_cleanup({
        let surface = Rc::clone(&surface);
        let animation = Rc::clone(&animation);
        let channel = Rc::clone(&channel);
        move || {
            if let Some(running) = animation.borrow_mut().take() {
                running.abort();
            }
            channel.borrow_mut().close();
            feed_live().set(false);
            surface.borrow_mut().destroy_all();
        }
    });

    view! {
        <section class="charts-panel">
            <div class="chart-grid">
                <div class="chart-card">
                    <canvas id=PRICE_CHART_TARGET node_ref=bands_ref width="460" height="320" />
                </div>
                <div class="chart-card">
                    <canvas id=ECONOMY_CHART_TARGET node_ref=economy_ref width="460" height="320" />
                </div>
                <div class="chart-card">
                    <canvas id=PROGRESS_CHART_TARGET node_ref=donut_ref width="460" height="320" />
                </div>
            </div>
            <div class="feed-caption">
                {move || format!("{:.0}% {}", displayed.get(), feed_step.get())}
            </div>
        </section>
    }
}

/// 📋 Paged product table with per-row delete
#[component]
fn ProductsPanel() -> impl IntoView {
    let products = products();
    let loading = products_loading();
    let page = page_state();

    let visible = move || page.with(|p| products.with(|items| p.slice(items).to_vec()));

    view! {
        <section class="products-panel">
            <div class="toolbar">
                <label class="page-size">
                    "Rows per page"
                    <select on:change=move |ev| {
                        let requested = event_target_value(&ev).parse().unwrap_or(0);
                        page.update(|p| p.set_page_size(requested));
                    }>
                        {PAGE_SIZE_OPTIONS
                            .iter()
                            .map(|&size| view! {
                                <option
                                    value=size.to_string()
                                    selected=move || page.with(|p| p.page_size() == size)
                                >
                                    {size.to_string()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <span class="count-caption">
                    {move || products.with(|items| format!("{} products", items.len()))}
                </span>
            </div>

            <Show when=move || loading.get()>
                <div class="banner muted">"Loading products..."</div>
            </Show>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th>"Price"</th>
                        <th>"Created"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=visible
                        key=|product| (product.id, product.name.clone())
                        children=move |product| {
                            let description = product.description.clone().unwrap_or_default();
                            let created = product.created_at.clone().unwrap_or_default();
                            let delete_button = product.id.map(|id| view! {
                                <button
                                    class="action-btn danger"
                                    on:click=move |_| delete_product(id)
                                >
                                    "🗑️ Delete"
                                </button>
                            });
                            view! {
                                <tr>
                                    <td>{product.name.clone()}</td>
                                    <td class="muted">{description}</td>
                                    <td>{product.display_price()}</td>
                                    <td class="muted">{created}</td>
                                    <td>{delete_button}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="pager">
                <button
                    class="pager-btn"
                    disabled=move || page.with(|p| p.current_page() <= 1)
                    on:click=move |_| page.update(|p| p.prev_page())
                >
                    "Prev"
                </button>
                {move || page.with(|p| {
                    let current = p.current_page();
                    p.window()
                        .into_iter()
                        .map(|number| {
                            let is_active = number == current;
                            view! {
                                <button
                                    class="pager-btn"
                                    class:active=is_active
                                    on:click=move |_| page.update(|p| p.set_page(number))
                                >
                                    {number.to_string()}
                                </button>
                            }
                        })
                        .collect_view()
                })}
                <button
                    class="pager-btn"
                    disabled=move || page.with(|p| p.current_page() >= p.total_pages())
                    on:click=move |_| page.update(|p| p.next_page())
                >
                    "Next"
                </button>
                <span class="pager-caption">
                    {move || page.with(|p| {
                        format!("Page {} of {}", p.current_page(), p.total_pages())
                    })}
                </span>
            </div>
        </section>
    }
}

/// 🐛 In-app console fed by the bridge logger
#[component]
fn DebugConsole() -> impl IntoView {
    let logs = GLOBAL_LOGS.with(|logs| *logs);
    let is_paused = IS_LOG_PAUSED.with(|paused| *paused);

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"🐛 Runtime Console"</span>
                <button
                    on:click=move |_| {
                        is_paused.update(|p| *p = !*p);
                        if is_paused.get() {
                            get_logger().info(
                                LogComponent::Presentation("DebugConsole"),
                                "🛑 Logging paused"
                            );
                        } else {
                            get_logger().info(
                                LogComponent::Presentation("DebugConsole"),
                                "▶️ Logging resumed"
                            );
                        }
                    }
                    class="debug-btn"
                >
                    {move || if is_paused.get() { "▶️ Resume" } else { "⏸️ Pause" }}
                </button>
                <button
                    on:click=move |_| {
                        logs.set(Vec::new());
                        get_logger().info(
                            LogComponent::Presentation("DebugConsole"),
                            "🗑️ Log history cleared"
                        );
                    }
                    class="debug-btn"
                >
                    "🗑️ Clear"
                </button>
            </div>
            <div class="debug-log">
                <For
                    each=move || logs.get()
                    key=|log| log.clone()
                    children=move |log| {
                        view! { <div class="log-line">{log}</div> }
                    }
                />
            </div>
        </div>
    }
}

/// A new picker result supersedes the running attempt either way: a chosen
/// file starts sheet discovery, a cancelled picker clears the session.
fn handle_file_selection(file: Option<web_sys::File>) {
    let session = import_session();
    let Some(file) = file else {
        SELECTED_FILE.with(|slot| *slot.borrow_mut() = None);
        session.update(|s| {
            s.clear_file();
        });
        return;
    };

    let name = file.name();
    let Some(selected) = session.try_update(|s| s.select_file(&name)) else {
        return;
    };
    match selected {
        Ok(token) => {
            SELECTED_FILE.with(|slot| *slot.borrow_mut() = Some(file));
            get_logger().info(
                LogComponent::Presentation("UploadPanel"),
                &format!("📄 Selected '{name}'"),
            );
            start_sheet_discovery(token);
        }
        Err(e) => {
            SELECTED_FILE.with(|slot| *slot.borrow_mut() = None);
            get_logger().warn(
                LogComponent::Presentation("UploadPanel"),
                &format!("⚠️ Rejected '{name}': {e}"),
            );
        }
    }
}

fn start_sheet_discovery(token: SessionToken) {
    let session = import_session();
    let Some(file) = SELECTED_FILE.with(|slot| slot.borrow().clone()) else {
        return;
    };
    let Some(Ok(_)) = session.try_update(|s| s.begin_sheet_discovery()) else {
        return;
    };

    spawn_local(async move {
        let client = ImportClient::at_page_origin();
        let event = match client.discover_sheets(&file).await {
            Ok(sheets) => SessionEvent::SheetsDiscovered(sheets),
            Err(e) => {
                SessionEvent::SheetDiscoveryFailed(e.detail_or("Could not read the sheet list"))
            }
        };
        session.update(|s| {
            s.apply(token, event);
        });
    });
}

fn start_preview() {
    let session = import_session();
    let Some(Ok(token)) = session.try_update(|s| s.begin_preview()) else {
        return;
    };
    let Some(file) = SELECTED_FILE.with(|slot| slot.borrow().clone()) else {
        return;
    };
    let Some(sheet) = session.with_untracked(|s| s.sheet().map(str::to_string)) else {
        return;
    };

    spawn_local(async move {
        let client = ImportClient::at_page_origin();
        let event = match client.preview_sheet(&file, &sheet).await {
            Ok(rows) => SessionEvent::PreviewLoaded(rows),
            Err(e) => SessionEvent::PreviewFailed(e.detail_or("Could not preview the sheet")),
        };
        session.update(|s| {
            s.apply(token, event);
        });
    });
}

/// Kick off the upload: open the push channel for processing frames, then run
/// the transport request. Both callback paths funnel into `ImportSession::apply`
/// under the attempt token taken at the start.
fn start_import() {
    let session = import_session();
    let Some(Ok(token)) = session.try_update(|s| s.begin_upload()) else {
        return;
    };
    let Some(file) = SELECTED_FILE.with(|slot| slot.borrow().clone()) else {
        return;
    };
    let Some(sheet) = session.with_untracked(|s| s.sheet().map(str::to_string)) else {
        return;
    };

    let opened = UPLOAD_CHANNEL.with(|channel| {
        channel.borrow_mut().open(move |event| {
            let refresh = session
                .try_update(|s| s.apply(token, SessionEvent::Processing(event)).refresh)
                .unwrap_or(false);
            if refresh {
                schedule_catalog_refresh();
            }
        })
    });
    if let Err(e) = opened {
        // The import still runs; only the live processing feed is missing
        get_logger().warn(
            LogComponent::Presentation("UploadPanel"),
            &format!("⚠️ Progress feed unavailable: {e}"),
        );
    }

    spawn_local(async move {
        let client = ImportClient::at_page_origin();
        let result = client
            .import_sheet(&file, &sheet, move |loaded, total| {
                session.update(|s| {
                    s.apply(token, SessionEvent::TransportProgress { loaded, total });
                });
            })
            .await;

        let event = match result {
            Ok(outcome) => SessionEvent::UploadCompleted(outcome),
            Err(e) => SessionEvent::UploadFailed(e.detail_or("Import failed")),
        };
        let refresh = session
            .try_update(|s| s.apply(token, event).refresh)
            .unwrap_or(false);
        if refresh {
            schedule_catalog_refresh();
        }
    });
}

/// Give the 100% state a beat on screen before the catalog reloads
fn schedule_catalog_refresh() {
    spawn_local(async move {
        sleep(Duration::from_millis(REFRESH_DELAY_MS as u64)).await;
        shared_store().notify_imported();
    });
}

/// Ease the displayed percentage toward `target`. A newer target aborts the
/// running animation and starts from wherever the display currently is.
fn animate_progress_to(
    displayed: RwSignal<f64>,
    target: f64,
    animation: &Rc<RefCell<Option<AbortHandle>>>,
) {
    if let Some(previous) = animation.borrow_mut().take() {
        previous.abort();
    }

    let mut animator = ProgressAnimator::new(displayed.get_untracked(), target);
    let (handle, registration) = AbortHandle::new_pair();
    *animation.borrow_mut() = Some(handle);

    let run = async move {
        loop {
            sleep(Duration::from_millis(ANIMATION_TICK_MS as u64)).await;
            let frame = animator.tick();
            displayed.set(frame.value);
            if frame.done {
                break;
            }
        }
    };
    spawn_local(async move {
        let _ = Abortable::new(run, registration).await;
    });
}

async fn load_products() {
    products_loading().set(true);
    match shared_store().load().await {
        Ok(list) => {
            page_state().update(|p| p.set_total_items(list.len()));
            products().set(list);
        }
        Err(e) => {
            // Keep whatever is on screen; the next change-feed notification
            // retries the reload
            get_logger().error(
                LogComponent::Presentation("App"),
                &format!("❌ Failed to load products: {e}"),
            );
        }
    }
    products_loading().set(false);
}

/// Row-level delete; the store notifies the change feed on success, which
/// reloads the list through the root listener
fn delete_product(id: u64) {
    spawn_local(async move {
        if let Err(e) = shared_store().delete(id).await {
            get_logger().error(
                LogComponent::Presentation("ProductsPanel"),
                &format!("❌ Failed to delete product #{id}: {e}"),
            );
        }
    });
}

fn stage_caption(stage: ImportStage) -> &'static str {
    match stage {
        ImportStage::Idle => "Idle",
        ImportStage::FileSelected => "File selected",
        ImportStage::SheetsLoading => "Reading sheets...",
        ImportStage::SheetsReady => "Sheets ready",
        ImportStage::PreviewLoading => "Loading preview...",
        ImportStage::PreviewReady => "Preview ready",
        ImportStage::Uploading => "Importing...",
        ImportStage::Completed => "Completed",
        ImportStage::Failed => "Failed",
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
