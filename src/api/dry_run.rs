use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::{ApiCall, Telegram};
use crate::error::ApiResult;

/// Invoker that logs each call instead of sending it and answers `true`.
#[derive(Debug, Clone, Default)]
pub struct DryRun;

#[async_trait]
impl Telegram for DryRun {
    async fn invoke(&self, call: ApiCall) -> ApiResult<Value> {
        info!(method = call.method(), "dry run: {:?}", call);
        Ok(Value::Bool(true))
    }
}
