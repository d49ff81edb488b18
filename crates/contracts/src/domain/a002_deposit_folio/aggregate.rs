use serde::{Deserialize, Serialize};

use crate::shared::format::{format_deadline, NOT_AVAILABLE};

/// Ответ cashiering API (`/csh/v1/hotels/{hotelId}/depositFolio`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositFolioData {
    #[serde(default)]
    pub reservation_deposit_folios_info: Vec<DepositFolioInfo>,
    #[serde(default)]
    pub trx_codes_info: Vec<serde_json::Value>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositFolioInfo {
    #[serde(default)]
    pub policy_summary_info: Option<PolicySummaryInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummaryInfo {
    #[serde(default)]
    pub deposit_policies: Vec<DepositPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPolicy {
    #[serde(default)]
    pub revenue_type: Option<String>,
    #[serde(default)]
    pub policy: Option<PolicyRule>,
    #[serde(default)]
    pub amount_due: Option<Money>,
    #[serde(default)]
    pub policy_id: Option<PolicyId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(default)]
    pub deadline: Option<Deadline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    #[serde(default)]
    pub absolute_deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyId {
    #[serde(default)]
    pub id: String,
}

/// Строка депозитной политики для таблицы выбора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositPolicyLine {
    pub policy_id: String,
    pub revenue_type: String,
    pub deadline: String,
    pub amount_due: f64,
}

impl DepositFolioData {
    /// Policies of the first deposit folio, shaped for display.
    pub fn policy_lines(&self) -> Vec<DepositPolicyLine> {
        self.reservation_deposit_folios_info
            .first()
            .and_then(|info| info.policy_summary_info.as_ref())
            .map(|summary| {
                summary
                    .deposit_policies
                    .iter()
                    .map(DepositPolicyLine::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl From<&DepositPolicy> for DepositPolicyLine {
    fn from(policy: &DepositPolicy) -> Self {
        let deadline = policy
            .policy
            .as_ref()
            .and_then(|p| p.deadline.as_ref())
            .and_then(|d| d.absolute_deadline.as_deref());
        Self {
            policy_id: policy
                .policy_id
                .as_ref()
                .map(|p| p.id.clone())
                .unwrap_or_default(),
            revenue_type: policy
                .revenue_type
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            deadline: format_deadline(deadline),
            amount_due: policy.amount_due.as_ref().map(|m| m.amount).unwrap_or(0.0),
        }
    }
}
