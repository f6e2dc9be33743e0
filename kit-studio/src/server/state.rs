use kit_core::{KitError, MarketingKit, Result};
use kit_engine::{ImageGenerator, KitOrchestrator};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub type SharedGenerator = Arc<dyn ImageGenerator>;

/// Long-running operations guarded by the busy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SourceImage,
    Kit,
}

/// Snapshot of the busy flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyStatus {
    pub generating_source_image: bool,
    pub generating_kit: bool,
}

impl BusyStatus {
    pub fn any(&self) -> bool {
        self.generating_source_image || self.generating_kit
    }
}

/// Two flags that are never set at the same time.
#[derive(Debug, Default)]
pub struct BusyFlags {
    status: Mutex<BusyStatus>,
}

impl BusyFlags {
    /// Claim `op`, or fail with [`KitError::Busy`] while anything is in flight.
    pub fn try_acquire(self: &Arc<Self>, op: Operation) -> Result<BusyPermit> {
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        if status.any() {
            return Err(KitError::Busy);
        }
        match op {
            Operation::SourceImage => status.generating_source_image = true,
            Operation::Kit => status.generating_kit = true,
        }
        Ok(BusyPermit { flags: Arc::clone(self), op })
    }

    pub fn status(&self) -> BusyStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn release(&self, op: Operation) {
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        match op {
            Operation::SourceImage => status.generating_source_image = false,
            Operation::Kit => status.generating_kit = false,
        }
    }
}

/// Clears its flag when dropped, including when the handler future is cancelled.
#[derive(Debug)]
pub struct BusyPermit {
    flags: Arc<BusyFlags>,
    op: Operation,
}

impl Drop for BusyPermit {
    fn drop(&mut self) {
        self.flags.release(self.op);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when the server started without credentials.
    pub orchestrator: Option<Arc<KitOrchestrator<SharedGenerator>>>,
    pub busy: Arc<BusyFlags>,
    /// Last successfully generated kit.
    pub latest_kit: Arc<RwLock<Option<MarketingKit>>>,
}

impl AppState {
    pub fn new(generator: SharedGenerator) -> Self {
        Self::with_orchestrator(Some(Arc::new(KitOrchestrator::new(generator))))
    }

    /// State for a server that refuses generation until configured.
    pub fn unconfigured() -> Self {
        Self::with_orchestrator(None)
    }

    fn with_orchestrator(orchestrator: Option<Arc<KitOrchestrator<SharedGenerator>>>) -> Self {
        Self {
            orchestrator,
            busy: Arc::new(BusyFlags::default()),
            latest_kit: Arc::new(RwLock::new(None)),
        }
    }
}
