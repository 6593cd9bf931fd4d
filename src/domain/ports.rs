use crate::domain::account::Account;
use crate::domain::verdict::Verdict;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// The top-level payload, as handed over by the schema-validation boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    pub accounts: Vec<Account>,
    pub instruction: String,
}

/// Entry point the transport adapters depend on.
///
/// The production engine is pure and never fails; the `Result` belongs to
/// the port so transports can host fallible implementations too.
#[async_trait]
pub trait InstructionService: Send + Sync {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Verdict>;
}

pub type SharedInstructionService = Arc<dyn InstructionService>;
