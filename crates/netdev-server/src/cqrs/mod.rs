//! In-process dispatch of commands and queries

pub use mediator::DefaultAsyncMediator;

use crate::features::{audit_logs, devices, stats};
use crate::store::SharedStore;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(store: SharedStore) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Devices
        .add_handler({
            let store = store.clone();
            move |cmd: devices::CreateDeviceCommand| {
                let store = store.clone();
                async move { devices::commands::create::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd: devices::UpdateDeviceCommand| {
                let store = store.clone();
                async move { devices::commands::update::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd: devices::UpdateDeviceStatusCommand| {
                let store = store.clone();
                async move { devices::commands::update_status::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |cmd: devices::DeleteDeviceCommand| {
                let store = store.clone();
                async move { devices::commands::delete::handle(store, cmd).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query: devices::GetDeviceQuery| {
                let store = store.clone();
                async move { devices::queries::get::handle(store, query).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query: devices::ListDevicesQuery| {
                let store = store.clone();
                async move { devices::queries::list::handle(store, query).await }
            }
        })
        .add_handler({
            let store = store.clone();
            move |query: devices::DeviceLogsQuery| {
                let store = store.clone();
                async move { devices::queries::logs::handle(store, query).await }
            }
        })
        // Activity feed
        .add_handler({
            let store = store.clone();
            move |query: audit_logs::RecentLogsQuery| {
                let store = store.clone();
                async move { audit_logs::queries::recent::handle(store, query).await }
            }
        })
        // Stats
        .add_handler({
            let store = store.clone();
            move |query: stats::GetStatsQuery| {
                let store = store.clone();
                async move { stats::queries::get_stats::handle(store, query).await }
            }
        })
        .build()
}
