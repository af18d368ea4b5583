use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register the ledger counters.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("wagers_placed_total").absolute(0);
    counter!("wagers_rejected_total").absolute(0);
    counter!("wagers_settled_total").absolute(0);
    counter!("points_won_total").absolute(0);
    counter!("balances_reset_total").absolute(0);

    Ok(handle)
}

/// A handle that is not installed as the global recorder. Tests build many
/// routers in one process and only one recorder may be installed.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
