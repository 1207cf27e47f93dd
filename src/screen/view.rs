use super::state::{ScreenModel, ScreenState};
use crate::holdings::HoldingRecord;
use crate::portfolio::PortfolioTotals;
use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "Holdings";
pub const ERROR_MESSAGE: &str = "Error fetching data";
pub const RETRY_LABEL: &str = "Retry";

const CURRENT_VALUE: &str = "Current Value";
const TOTAL_INVESTMENT: &str = "Total Investment";
const TODAYS_PNL: &str = "Today's Profit & Loss";
const TOTAL_PNL: &str = "Profit & Loss";

/// Framework-free description of the holdings screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub title: &'static str,
    pub body: Body,
    /// Only present when there are totals to show.
    pub summary: Option<SummaryPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Body {
    Loading,
    Holdings { rows: Vec<HoldingRow> },
    Error { message: &'static str, retry: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    pub symbol: String,
    pub quantity: String,
    pub ltp: String,
    pub pnl: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPanel {
    pub expanded: bool,
    /// Detail rows; empty while collapsed.
    pub details: Vec<SummaryRow>,
    pub total: SummaryRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

/// Turn the current screen model into a view.
pub fn render(model: &ScreenModel) -> View {
    let (body, summary) = match &model.state {
        ScreenState::Initial => (Body::Loading, None),
        ScreenState::Failure => (
            Body::Error {
                message: ERROR_MESSAGE,
                retry: RETRY_LABEL,
            },
            None,
        ),
        ScreenState::Success { snapshot } => (
            Body::Holdings {
                rows: snapshot.holdings().iter().map(holding_row).collect(),
            },
            Some(summary_panel(snapshot.totals(), model.portfolio_expanded)),
        ),
    };

    View {
        title: TITLE,
        body,
        summary,
    }
}

fn holding_row(h: &HoldingRecord) -> HoldingRow {
    HoldingRow {
        symbol: h.symbol.clone(),
        quantity: h.quantity.to_string(),
        // Debug keeps the trailing ".0" on whole prices.
        ltp: format!("LTP: ₹ {:?}", h.ltp),
        pnl: format!("P/L: ₹ {}", two_decimals(h.pnl())),
    }
}

fn summary_panel(totals: &PortfolioTotals, expanded: bool) -> SummaryPanel {
    let details = if expanded {
        vec![
            summary_row(CURRENT_VALUE, totals.current_value),
            summary_row(TOTAL_INVESTMENT, totals.total_investment),
            summary_row(TODAYS_PNL, totals.today_pnl),
        ]
    } else {
        Vec::new()
    };

    SummaryPanel {
        expanded,
        details,
        total: summary_row(TOTAL_PNL, totals.total_pnl),
    }
}

fn summary_row(label: &'static str, value: f64) -> SummaryRow {
    SummaryRow {
        label,
        value: format_amount(value),
    }
}

/// `₹` followed by the amount with two decimals, e.g. `₹-12.30`.
pub fn format_amount(value: f64) -> String {
    format!("₹{}", two_decimals(value))
}

/// Two decimal places; tiny losses keep their sign
/// (`-0.001` prints as `-0.00`).
fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;

        match &self.body {
            Body::Loading => writeln!(f, "Loading...")?,
            Body::Error { message, retry } => writeln!(f, "{message}\n[{retry}]")?,
            Body::Holdings { rows } => {
                for row in rows {
                    writeln!(f, "{:<16}{:>28}", row.symbol, row.ltp)?;
                    writeln!(f, "{:<16}{:>28}", row.quantity, row.pnl)?;
                    writeln!(f)?;
                }
            }
        }

        if let Some(summary) = &self.summary {
            writeln!(f, "{}", "-".repeat(44))?;
            for row in summary.details.iter().chain(std::iter::once(&summary.total)) {
                writeln!(f, "{:<28}{:>16}", row.label, row.value)?;
            }
        }
        Ok(())
    }
}
