use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side analysis of one position, scored from -10 (exit) to 10 (add).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOpportunity {
    pub ticker: String,
    pub opportunity_score: Decimal,
    #[serde(default, rename = "weight_percent")]
    pub weight_percent: Option<Decimal>,
    #[serde(default, rename = "pl_percent")]
    pub pl_percent: Option<Decimal>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl PositionOpportunity {
    pub fn band(&self) -> OpportunityBand {
        OpportunityBand::from_score(self.opportunity_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpportunityBand {
    ConsiderExiting,
    ConsiderReducing,
    Watch,
    Neutral,
    Slight,
    Good,
    Strong,
}

impl OpportunityBand {
    pub fn from_score(score: Decimal) -> Self {
        if score >= dec!(7) {
            OpportunityBand::Strong
        } else if score >= dec!(4) {
            OpportunityBand::Good
        } else if score >= dec!(1) {
            OpportunityBand::Slight
        } else if score > dec!(-1) {
            OpportunityBand::Neutral
        } else if score > dec!(-4) {
            OpportunityBand::Watch
        } else if score > dec!(-7) {
            OpportunityBand::ConsiderReducing
        } else {
            OpportunityBand::ConsiderExiting
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpportunityBand::Strong => "Strong Opportunity",
            OpportunityBand::Good => "Good Opportunity",
            OpportunityBand::Slight => "Slight Opportunity",
            OpportunityBand::Neutral => "Neutral",
            OpportunityBand::Watch => "Watch",
            OpportunityBand::ConsiderReducing => "Consider Reducing",
            OpportunityBand::ConsiderExiting => "Consider Exiting",
        }
    }
}

impl fmt::Display for OpportunityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
