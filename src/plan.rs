//! The business-plan input form
//!
//! Field set and validation rules for the consolidated plan inputs: plan
//! identity, budget, cost structure and the fiscal horizon. Variable costs
//! are a ratio of sales (0 to 1); months are 1 to 12 with the horizon end
//! strictly after its start.

use crate::form::{Form, FormField};
use crate::validation::{Rule, RuleSet};

pub const NAME: &str = "name";
pub const BUDGET: &str = "budget";
pub const FIXED_COSTS: &str = "fixed_costs";
pub const VARIABLE_COST_RATIO: &str = "variable_cost_ratio";
pub const FISCAL_START_MONTH: &str = "fiscal_start_month";
pub const FISCAL_END_MONTH: &str = "fiscal_end_month";

/// The plan input form with its default values
pub fn plan_inputs_form() -> Form {
    Form::new(vec![
        FormField::text(NAME, "Plan name"),
        FormField::number(BUDGET, "Annual budget", 0.0),
        FormField::number(FIXED_COSTS, "Fixed costs", 0.0),
        FormField::number(VARIABLE_COST_RATIO, "Variable cost ratio", 0.0),
        FormField::number(FISCAL_START_MONTH, "Fiscal start month", 1.0),
        FormField::number(FISCAL_END_MONTH, "Fiscal end month", 12.0),
    ])
}

/// Validation rules for the plan input form
pub fn plan_rules() -> RuleSet {
    RuleSet::new()
        .with(Rule::required(NAME))
        .with(Rule::numeric(BUDGET))
        .with(Rule::min(BUDGET, 0.0))
        .with(Rule::numeric(FIXED_COSTS))
        .with(Rule::min(FIXED_COSTS, 0.0))
        .with(Rule::numeric(VARIABLE_COST_RATIO))
        .with(Rule::min(VARIABLE_COST_RATIO, 0.0))
        .with(Rule::max(VARIABLE_COST_RATIO, 1.0))
        .with(Rule::numeric(FISCAL_START_MONTH))
        .with(Rule::min(FISCAL_START_MONTH, 1.0))
        .with(Rule::max(FISCAL_START_MONTH, 12.0))
        .with(Rule::numeric(FISCAL_END_MONTH))
        .with(Rule::min(FISCAL_END_MONTH, 1.0))
        .with(Rule::max(FISCAL_END_MONTH, 12.0))
        .with(Rule::after(
            FISCAL_END_MONTH,
            FISCAL_START_MONTH,
            "must be after fiscal start month",
        ))
}
