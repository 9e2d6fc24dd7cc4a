//! Suspension primitive used between tasks

use crate::types::AppResult;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend the current run for `duration`
    async fn pause(&self, duration: Duration) -> AppResult<()>;
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) -> AppResult<()> {
        tokio::time::sleep(duration).await;
        Ok(())
    }
}
