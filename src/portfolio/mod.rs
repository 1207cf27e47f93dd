use crate::holdings::HoldingRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

impl HoldingRecord {
    /// Unrealised profit on this position: `quantity * (ltp - avg_price)`.
    pub fn pnl(&self) -> f64 {
        self.qty() * (self.ltp - self.avg_price)
    }

    pub fn current_value(&self) -> f64 {
        self.ltp * self.qty()
    }

    pub fn investment(&self) -> f64 {
        self.avg_price * self.qty()
    }

    /// `quantity * (close - ltp)`. Whether `close` is yesterday's close or
    /// a same-day reference price is up to the feed.
    pub fn today_pnl(&self) -> f64 {
        self.qty() * (self.close - self.ltp)
    }

    fn qty(&self) -> f64 {
        self.quantity as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub current_value: f64,
    pub total_investment: f64,
    pub today_pnl: f64,
    pub total_pnl: f64,
}

/// Reduce a holdings list to portfolio totals.
///
/// Sums run left to right in list order. An empty list gives all zeros.
pub fn aggregate(holdings: &[HoldingRecord]) -> PortfolioTotals {
    let mut current_value = 0.0;
    let mut total_investment = 0.0;
    let mut today_pnl = 0.0;

    for h in holdings {
        current_value += h.current_value();
        total_investment += h.investment();
        today_pnl += h.today_pnl();
    }

    PortfolioTotals {
        current_value,
        total_investment,
        today_pnl,
        total_pnl: current_value - total_investment,
    }
}

/// Result of one successful fetch: the holdings in server order and the
/// totals derived from them.
///
/// Totals are only ever computed here, so they always match `holdings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    holdings: Vec<HoldingRecord>,
    totals: PortfolioTotals,
    fetched_at: DateTime<Utc>,
}

impl PortfolioSnapshot {
    pub fn new(holdings: Vec<HoldingRecord>) -> Arc<Self> {
        let totals = aggregate(&holdings);
        Arc::new(Self {
            holdings,
            totals,
            fetched_at: Utc::now(),
        })
    }

    pub fn holdings(&self) -> &[HoldingRecord] {
        &self.holdings
    }

    pub fn totals(&self) -> &PortfolioTotals {
        &self.totals
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
