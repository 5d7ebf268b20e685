//! Headless entrypoint for the printdesk client.
//!
//! Three surfaces share the same sync core:
//!
//! ```text
//! printdesk submit <shop-id> <file>...   upload a batch, then follow it
//! printdesk watch <shop-id>              recover a stored session, follow it
//! printdesk dashboard <shop-id>          owner roster (needs PRINTDESK_AUTH_TOKEN)
//! ```

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printdesk_api::PrintShopApi;
use printdesk_core::config::ClientConfig;
use printdesk_core::types::{LocalFile, PrintMode, PrintSide, ShopId, UploadSelection};
use printdesk_push::{PushChannel, PushClient, PushEvent};
use printdesk_sync::notice::TracingNoticeSink;
use printdesk_sync::{Dashboard, FileSessionStore, StatusProjection, SubmissionFlow};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printdesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env();
    tracing::info!(api_base = %config.api_base, push_url = %config.push_url, "Loaded configuration");

    let mut args = std::env::args().skip(1);
    let surface = args.next().unwrap_or_else(|| usage());
    let shop_id = ShopId(args.next().unwrap_or_else(|| usage()));
    let files: Vec<String> = args.collect();

    match surface.as_str() {
        "submit" => run_customer(config, shop_id, files).await,
        "watch" => run_customer(config, shop_id, vec![]).await,
        "dashboard" => run_dashboard(config, shop_id).await,
        _ => usage(),
    }
}

fn usage() -> ! {
    eprintln!("usage: printdesk <submit|watch|dashboard> <shop-id> [file...]");
    std::process::exit(2);
}

/// Customer surface: submit (optionally) and follow the batch status.
async fn run_customer(config: ClientConfig, shop_id: ShopId, files: Vec<String>) {
    let api = Arc::new(PrintShopApi::new(config.api_base.clone(), None));
    let store = Arc::new(FileSessionStore::new(config.data_dir.clone()));
    let notices = Arc::new(TracingNoticeSink);

    // Shop metadata is a read-only cached copy; a fetch failure degrades to
    // defaults rather than blocking the surface.
    let shop_accepting = match api.shop_details(&shop_id).await {
        Ok(shop) => {
            tracing::info!(shop = %shop.name, accepting = shop.accepting_uploads, "Shop loaded");
            shop.accepting_uploads
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not load shop metadata");
            true
        }
    };

    let mut flow = SubmissionFlow::new(
        api.clone(),
        store,
        notices,
        config.rules.clone(),
        shop_id.clone(),
    );
    let mut projection = StatusProjection::new(shop_accepting);

    // Cold start: a stored session short-circuits the upload form.
    if let Some(view) = flow.resume().await {
        tracing::info!(token = %view.token, status = ?view.status, "Resumed stored session");
        projection.set_view(view);
    }

    if !files.is_empty() && projection.view().is_none() {
        match build_selection(files, &config).await {
            Some(selection) => match flow.submit(&selection).await {
                Ok(view) => projection.set_view(view),
                Err(e) => {
                    tracing::error!(error = %e, "Submission failed");
                    return;
                }
            },
            None => return,
        }
    }

    if projection.view().is_none() {
        tracing::info!("No active submission to follow — pass files to submit");
        return;
    }

    follow_customer(config, shop_id, projection).await;
}

/// Read local metadata for the selected files.
async fn build_selection(files: Vec<String>, config: &ClientConfig) -> Option<UploadSelection> {
    let mut selected = Vec::new();
    for path in files {
        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Cannot read file");
                return None;
            }
        };
        let name = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        selected.push(LocalFile {
            name,
            path: path.into(),
            size: meta.len(),
        });
    }

    Some(UploadSelection {
        files: selected,
        mode: PrintMode::Monochrome,
        side: PrintSide::Single,
        copies: config.rules.default_copies,
    })
}

/// Follow push events for the customer projection until Ctrl-C.
async fn follow_customer(config: ClientConfig, shop_id: ShopId, mut projection: StatusProjection) {
    let channel = PushChannel::open(PushClient::new(shop_id, config.push_url.clone(), None));
    let mut events = channel.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) => {
                    apply_customer_event(&mut projection, &event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Push event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    channel.shutdown().await;
}

fn apply_customer_event(projection: &mut StatusProjection, event: &PushEvent) {
    projection.apply(event);
    if let Some(view) = projection.view() {
        tracing::info!(
            token = %view.token,
            status = ?view.status,
            shop_accepting = projection.shop_accepting,
            "Status",
        );
    }
}

/// Owner surface: mounted roster following the push echo until Ctrl-C.
async fn run_dashboard(config: ClientConfig, shop_id: ShopId) {
    let auth = config.auth_token.clone();
    if auth.is_none() {
        tracing::warn!("PRINTDESK_AUTH_TOKEN is not set — owner calls will be rejected");
    }

    let api = Arc::new(PrintShopApi::new(config.api_base.clone(), auth.clone()));
    let notices = Arc::new(TracingNoticeSink);

    let mut dashboard = match Dashboard::mount(api, notices, shop_id.clone()).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!(error = %e, "Dashboard mount failed");
            return;
        }
    };

    let channel = PushChannel::open(PushClient::new(
        shop_id,
        config.push_url.clone(),
        auth,
    ));
    let mut events = channel.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => match event {
                Ok(event) => {
                    dashboard.apply(&event);
                    let pending = dashboard
                        .filtered(printdesk_sync::StatusFilter::Pending, "")
                        .len();
                    tracing::info!(
                        jobs = dashboard.roster().jobs().len(),
                        pending,
                        accepting = dashboard.shop().accepting_uploads,
                        "Roster",
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Push event stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    channel.shutdown().await;
}
