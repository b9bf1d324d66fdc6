use serde::{Deserialize, Serialize};

/// A priced subscription tier. Fetched for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Plan {
    pub name: Option<String>,
    pub pricing: Option<String>,
    pub currency_symbol: Option<String>,
    pub duration: Option<String>,
}

/// Keywords identifying the POS / website add-on plan.
const ADDON_KEYWORDS: &[&str] = &["odoo", "pos", "website"];

/// Lowercase and keep only `a-z`, `0-9`, `+` and whitespace.
pub fn normalize_plan_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '+' || c.is_whitespace())
        .collect()
}

fn normalized(plan: &Plan) -> String {
    normalize_plan_name(plan.name.as_deref().unwrap_or(""))
}

/// First plan whose normalized name mentions "listing".
pub fn find_listing_plan(plans: &[Plan]) -> Option<&Plan> {
    plans.iter().find(|p| normalized(p).contains("listing"))
}

/// First plan whose normalized name mentions odoo, pos or website.
pub fn find_addon_plan(plans: &[Plan]) -> Option<&Plan> {
    plans.iter().find(|p| {
        let n = normalized(p);
        ADDON_KEYWORDS.iter().any(|k| n.contains(k))
    })
}

/// `{currency_symbol}{pricing}{duration}`, trimmed. No plan gives `""`.
pub fn format_plan_price(plan: Option<&Plan>) -> String {
    let Some(plan) = plan else {
        return String::new();
    };
    format!(
        "{}{}{}",
        plan.currency_symbol.as_deref().unwrap_or(""),
        plan.pricing.as_deref().unwrap_or(""),
        plan.duration.as_deref().unwrap_or(""),
    )
    .trim()
    .to_string()
}

/// The two read-only price displays on the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlanPrices {
    pub listing: String,
    pub addon: String,
}

impl PlanPrices {
    pub fn from_plans(plans: &[Plan]) -> Self {
        Self {
            listing: format_plan_price(find_listing_plan(plans)),
            addon: format_plan_price(find_addon_plan(plans)),
        }
    }
}
