//! Application service — reconciles host instances with marketplace deals.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Every operation rebuilds its view from freshly fetched state. Only
//! settings validation aborts an operation; marketplace failures are logged
//! and degrade the result, because the host simply polls again.

use std::path::PathBuf;

use anyhow::Result;
use sonm_common::{CloudInstance, InstanceStatus};
use tracing::{debug, info, warn};

use crate::application::ports::{DescriptorWriter, Marketplace, SettingsSource};
use crate::domain::{
    DealStatus, Endpoint, Settings, bid_descriptor, classify, is_managed, parse_confirmed_id,
    parse_deal_list, running_task, supplier_id, task_descriptor,
};

/// Drives the host's instance lifecycle against the marketplace.
pub struct Reconciler<M, S, W> {
    market: M,
    settings: S,
    writer: W,
}

impl<M, S, W> Reconciler<M, S, W>
where
    M: Marketplace,
    S: SettingsSource,
    W: DescriptorWriter,
{
    pub fn new(market: M, settings: S, writer: W) -> Self {
        Self {
            market,
            settings,
            writer,
        }
    }

    /// List every accepted deal placed by this plugin as a host instance.
    ///
    /// Deals that lost their task get a new one started before this returns
    /// and are reported as `Pending`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the node endpoint or CLI path is blank.
    /// Marketplace failures never produce an error.
    pub async fn list_instances(&self) -> Result<Vec<CloudInstance>> {
        let settings = self.settings.load()?;
        let ep = settings.endpoint()?;
        let image = settings.image_name();

        let listing = self
            .market
            .deals_list(&ep)
            .await
            .and_then(|doc| parse_deal_list(&doc).map_err(anyhow::Error::from));
        let deals = match listing {
            Ok(deals) => deals,
            Err(e) => {
                warn!(error = %e, "listing deals failed");
                return Ok(Vec::new());
            }
        };

        let mut instances = Vec::new();
        for deal in deals.iter().filter(|d| d.status == DealStatus::Accepted) {
            let state = match self.market.deal_status(&ep, &deal.id).await {
                Ok(doc) => classify(&doc, &image),
                Err(e) => {
                    warn!(deal_id = %deal.id, error = %e, "fetching deal status failed, skipping deal");
                    continue;
                }
            };
            debug!(deal_id = %deal.id, ?state, "classified deal");

            if state.needs_start() {
                info!(deal_id = %deal.id, "deal has no task, starting one");
                self.start_task(&settings, &ep, &deal.id).await;
            }
            if let Some(status) = state.instance_status() {
                instances.push(CloudInstance::sonm(&deal.id, status));
            }
        }
        Ok(instances)
    }

    /// Place `count` market orders from one bid descriptor.
    ///
    /// Individual order failures are logged and skipped; the result holds one
    /// `Pending` instance per order the marketplace confirmed with an id.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the node endpoint, CLI path, or price is blank.
    pub async fn create_instances(
        &self,
        hardware_id: &str,
        image_id: &str,
        count: usize,
    ) -> Result<Vec<CloudInstance>> {
        let settings = self.settings.load()?;
        let ep = settings.endpoint()?;
        let price = settings.price()?;
        let supplier = settings.supplier();
        info!(hardware_id, image_id, count, supplier = ?supplier, "creating market orders");

        let Some(bid) = self.write_descriptor(&bid_descriptor(&settings).render()) else {
            return Ok(Vec::new());
        };

        let mut created = Vec::new();
        for attempt in 1..=count {
            let result = self
                .market
                .market_create(&ep, &price, &bid, supplier.as_deref())
                .await
                .and_then(|doc| parse_confirmed_id(&doc).map_err(anyhow::Error::from));
            match result {
                Ok(order_id) => {
                    info!(attempt, %order_id, "market order placed");
                    created.push(CloudInstance::sonm(&order_id, InstanceStatus::Pending));
                }
                Err(e) => warn!(attempt, error = %e, "creating market order failed"),
            }
        }
        info!(requested = count, placed = created.len(), "market orders done");
        Ok(created)
    }

    /// Finish the given deals. Returns the ids the marketplace accepted.
    ///
    /// # Errors
    ///
    /// Returns an error only if the settings cannot be loaded.
    pub async fn terminate_instances(&self, ids: &[String]) -> Result<Vec<String>> {
        let settings = self.settings.load()?;
        let Some(ep) = endpoint_or_skip(&settings, "terminate") else {
            return Ok(Vec::new());
        };

        let mut finished = Vec::new();
        for id in ids {
            match self.market.deal_finish(&ep, id).await {
                Ok(_) => {
                    info!(deal_id = %id, "deal finished");
                    finished.push(id.clone());
                }
                Err(e) => warn!(deal_id = %id, error = %e, "finishing deal failed"),
            }
        }
        Ok(finished)
    }

    /// Stop the plugin's running task in each deal. Returns the ids a stop
    /// was issued for; unmanaged deals and deals without a running task are
    /// skipped silently.
    ///
    /// # Errors
    ///
    /// Returns an error only if the settings cannot be loaded.
    pub async fn stop_instances(&self, ids: &[String]) -> Result<Vec<String>> {
        let settings = self.settings.load()?;
        let Some(ep) = endpoint_or_skip(&settings, "stop") else {
            return Ok(Vec::new());
        };
        let image = settings.image_name();

        let mut stopped = Vec::new();
        for id in ids {
            let doc = match self.market.deal_status(&ep, id).await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(deal_id = %id, error = %e, "fetching deal status failed");
                    continue;
                }
            };
            if !is_managed(&doc) {
                debug!(deal_id = %id, "deal not managed by this plugin, not stopping");
                continue;
            }
            let Some(task_id) = running_task(&doc, &image) else {
                debug!(deal_id = %id, "no running task to stop");
                continue;
            };
            let Some(supplier) = supplier_id(&doc) else {
                warn!(deal_id = %id, "deal status has no SupplierID, cannot stop task");
                continue;
            };
            match self.market.task_stop(&ep, supplier, task_id).await {
                Ok(_) => {
                    info!(deal_id = %id, task_id, "task stopped");
                    stopped.push(id.clone());
                }
                Err(e) => warn!(deal_id = %id, task_id, error = %e, "stopping task failed"),
            }
        }
        Ok(stopped)
    }

    /// Start the plugin's task in each deal that does not already run it.
    /// Returns the ids for which the marketplace confirmed a new task.
    ///
    /// # Errors
    ///
    /// Returns an error only if the settings cannot be loaded.
    pub async fn start_instances(&self, ids: &[String]) -> Result<Vec<String>> {
        let settings = self.settings.load()?;
        let Some(ep) = endpoint_or_skip(&settings, "start") else {
            return Ok(Vec::new());
        };
        let image = settings.image_name();

        let mut started = Vec::new();
        for id in ids {
            let doc = match self.market.deal_status(&ep, id).await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(deal_id = %id, error = %e, "fetching deal status failed");
                    continue;
                }
            };
            if !is_managed(&doc) {
                info!(deal_id = %id, "deal not managed by this plugin, not starting");
                continue;
            }
            if let Some(task_id) = running_task(&doc, &image) {
                debug!(deal_id = %id, task_id, "task already running");
                continue;
            }
            if self.start_task(&settings, &ep, id).await {
                started.push(id.clone());
            }
        }
        Ok(started)
    }

    /// Reboot is not supported by the marketplace; this is a deliberate no-op.
    pub fn reboot_instances(&self, ids: &[String]) -> Vec<String> {
        info!(count = ids.len(), "reboot is not supported, ignoring request");
        Vec::new()
    }

    /// Launch the plugin's task in `deal_id`. Returns whether the marketplace
    /// confirmed it with a task id.
    async fn start_task(&self, settings: &Settings, ep: &Endpoint, deal_id: &str) -> bool {
        let Some(descriptor) = self.write_descriptor(&task_descriptor(settings).render()) else {
            return false;
        };
        let result = self
            .market
            .task_start(ep, deal_id, &descriptor, &settings.task_timeout())
            .await
            .and_then(|doc| parse_confirmed_id(&doc).map_err(anyhow::Error::from));
        match result {
            Ok(task_id) => {
                info!(deal_id, %task_id, "task started");
                true
            }
            Err(e) => {
                warn!(deal_id, error = %e, "starting task failed");
                false
            }
        }
    }

    fn write_descriptor(&self, contents: &str) -> Option<PathBuf> {
        match self.writer.write(contents) {
            Ok(path) => {
                debug!(path = %path.display(), "descriptor written");
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "writing descriptor failed");
                None
            }
        }
    }
}

fn endpoint_or_skip(settings: &Settings, operation: &str) -> Option<Endpoint> {
    match settings.endpoint() {
        Ok(ep) => Some(ep),
        Err(e) => {
            warn!(operation, error = %e, "marketplace not configured, skipping");
            None
        }
    }
}
