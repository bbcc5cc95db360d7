use serde::{Deserialize, Serialize};

/// Budget attached to a customer through `budget_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetTable {
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub soft_budget: Option<f64>,
    #[serde(default)]
    pub tpm_limit: Option<i64>,
    #[serde(default)]
    pub rpm_limit: Option<i64>,
    #[serde(default)]
    pub budget_duration: Option<String>,
}

/// Billable end user of the gateway (snapshot from `/customer/list`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub user_id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub allowed_model_region: Option<String>,
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub budget_id: Option<String>,
    #[serde(default, rename = "litellm_budget_table", alias = "budget")]
    pub budget: Option<BudgetTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatus {
    Active,
    Blocked,
}

impl CustomerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Blocked => "Blocked",
        }
    }
}

impl Customer {
    pub fn status(&self) -> CustomerStatus {
        if self.blocked {
            CustomerStatus::Blocked
        } else {
            CustomerStatus::Active
        }
    }

    /// Spending ceiling; absent when there is no budget or it has no maximum
    pub fn max_budget(&self) -> Option<f64> {
        self.budget.as_ref().and_then(|b| b.max_budget)
    }

    /// Case-insensitive match of `needle` (already lowercased) on id or alias
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.user_id.to_lowercase().contains(needle)
            || self
                .alias
                .as_deref()
                .map(|a| a.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}
