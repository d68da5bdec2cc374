//! JSON export of a plan for external renderers.

use serde::Serialize;

use crate::error::Result;
use crate::model::{DispensingPlan, PlanStats};

#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(flatten)]
    plan: &'a DispensingPlan,
    stats: PlanStats,
}

/// Serialize the plan and its statistics as pretty-printed JSON.
pub fn export_json(plan: &DispensingPlan) -> Result<String> {
    let document = ExportDocument {
        plan,
        stats: plan.stats(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
