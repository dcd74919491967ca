use anyhow::Result;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

use sweepcore::prelude::SpectrumModel;

use crate::workflow::{Runner, ScanJobConfig};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that serves the latest spectrum snapshot over HTTP and accepts
/// scan jobs to run against the synthetic band.
pub struct SpectrumBridge {
    state: Arc<RwLock<SpectrumModel>>,
}

impl SpectrumBridge {
    pub fn new() -> Self {
        let state = Arc::new(RwLock::new(SpectrumModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());

        let get_route = warp::path("spectrum")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<SpectrumModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let scan_route = warp::path("scan")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and_then(
                |job: ScanJobConfig, state: Arc<RwLock<SpectrumModel>>| async move {
                    match Runner::new(job).execute() {
                        Ok(report) => {
                            let mut guard = state.write().unwrap();
                            *guard = report.model.clone();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "passes": report.passes_completed,
                                    "opens": report.squelch_opens,
                                    "loot": report.caught_frequencies(),
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("scan error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(scan_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &SpectrumModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[BRIDGE] {} columns, {} loot entries, {} passes",
            guard.column_dbm.len(),
            guard.loot.len(),
            guard.passes_completed
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[BRIDGE] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> SpectrumModel {
        self.state.read().unwrap().clone()
    }
}

impl Default for SpectrumBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rf::Carrier;

    #[test]
    fn bridge_updates_state_on_publish() {
        let mut cfg = ScanJobConfig::from_args(145_400_000, 145_600_000, 9, 2, 3);
        cfg.carriers = vec![Carrier {
            frequency_hz: 145_500_000,
            strength: 40,
            width_hz: 25_000,
        }];
        let bridge = SpectrumBridge::new();
        let report = Runner::new(cfg).execute().unwrap();
        bridge.publish(&report.model).unwrap();
        assert_eq!(bridge.snapshot().passes_completed, report.passes_completed);
    }
}
