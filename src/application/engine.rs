use crate::application::parser::{self, ParseFailure};
use crate::application::response;
use crate::application::rules::{self, Decision};
use crate::domain::instruction::PartialInstruction;
use crate::domain::ports::{EvaluationRequest, InstructionService};
use crate::domain::verdict::Verdict;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

/// The instruction intake pipeline.
///
/// Pure over its inputs: accounts and the instruction string come in by
/// value, every derived structure is fresh, and nothing is shared between
/// calls. Parsing, business rules, and response assembly run strictly in
/// order, each stage short-circuiting on its first failure.
#[derive(Debug, Default, Clone)]
pub struct InstructionEngine;

impl InstructionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates against the current UTC calendar date.
    pub fn evaluate(&self, request: &EvaluationRequest) -> Verdict {
        self.evaluate_at(request, Utc::now().date_naive())
    }

    /// Evaluates against an explicit `today`, so the pending/successful
    /// split is reproducible in tests.
    pub fn evaluate_at(&self, request: &EvaluationRequest, today: NaiveDate) -> Verdict {
        let parsed = match parser::parse(&request.instruction) {
            Ok(parsed) => parsed,
            Err(ParseFailure::Unparseable) => return response::unparseable(),
            Err(ParseFailure::Rejected { partial, rejection }) => {
                return response::rejected(partial, rejection, Vec::new());
            }
        };

        match rules::decide(&parsed, &request.accounts, today) {
            Decision::Reject {
                rejection,
                snapshots,
            } => response::rejected(PartialInstruction::from(&parsed), rejection, snapshots),
            Decision::Approve {
                pending_until,
                snapshots,
            } => response::settled(&parsed, pending_until, snapshots),
        }
    }
}

#[async_trait]
impl InstructionService for InstructionEngine {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Verdict> {
        Ok(self.evaluate_at(&request, Utc::now().date_naive()))
    }
}
