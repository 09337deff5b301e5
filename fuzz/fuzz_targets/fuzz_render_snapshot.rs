#![no_main]
use libfuzzer_sys::fuzz_target;
use vaultview::{AppConfig, MemoryHost, Snapshot, TabKind, TabView, WidgetHost};

/// Fuzz the render path with whatever snapshots parse.
///
/// Every tab is rendered twice, with and without a query taken from the
/// first entity name, into one host. Rendering must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = Snapshot::from_json(s) else {
        return;
    };
    let query = snapshot
        .items
        .first()
        .map(|e| e.name.chars().take(3).collect::<String>())
        .unwrap_or_default();

    let config = AppConfig::builder().ephemeral_state().build();
    let mut view = TabView::new(snapshot, &config);
    let mut host = MemoryHost::new();
    let container = host.create_container();
    for tab in TabKind::ALL {
        view.switch_tab(tab);
        view.set_query("");
        view.render_tab(&mut host, container);
        view.set_query(&query);
        view.render_tab(&mut host, container);
    }
});
