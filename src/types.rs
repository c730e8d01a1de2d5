use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ChartDataError;

/// Chart kinds served by the explorer chart API
///
/// Each variant maps to one `/api/chart/{kind}` endpoint and to one
/// transformer/options pair in the dispatch registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Stake ticket price over time
    TicketPrice,
    /// Live ticket pool size over time
    TicketPoolSize,
    /// Total value locked in the ticket pool over time
    TicketPoolValue,
    /// Average block size over time
    AvgBlockSize,
    /// Cumulative blockchain size over time
    BlockchainSize,
    /// Transactions per block, by height
    TxPerBlock,
    /// Transactions per day
    TxPerDay,
    /// Proof-of-work difficulty over time
    PowDifficulty,
    /// Total coin supply over time
    CoinSupply,
    /// Total fee per block, by height
    FeePerBlock,
    /// Duration between consecutive blocks
    DurationBtwBlocks,
    /// Ticket spend type (unspent/revoked/voted) per block
    TicketSpendType,
    /// Ticket output counts (solo/pooled/txsplit) per block
    TicketByOutputs,
}

impl ChartKind {
    /// Every chart kind, in dropdown order
    pub const ALL: [ChartKind; 13] = [
        ChartKind::TicketPrice,
        ChartKind::TicketPoolSize,
        ChartKind::TicketPoolValue,
        ChartKind::AvgBlockSize,
        ChartKind::BlockchainSize,
        ChartKind::TxPerBlock,
        ChartKind::TxPerDay,
        ChartKind::PowDifficulty,
        ChartKind::CoinSupply,
        ChartKind::FeePerBlock,
        ChartKind::DurationBtwBlocks,
        ChartKind::TicketSpendType,
        ChartKind::TicketByOutputs,
    ];

    /// The kebab-case identifier used in endpoint paths and selectors
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TicketPrice => "ticket-price",
            Self::TicketPoolSize => "ticket-pool-size",
            Self::TicketPoolValue => "ticket-pool-value",
            Self::AvgBlockSize => "avg-block-size",
            Self::BlockchainSize => "blockchain-size",
            Self::TxPerBlock => "tx-per-block",
            Self::TxPerDay => "tx-per-day",
            Self::PowDifficulty => "pow-difficulty",
            Self::CoinSupply => "coin-supply",
            Self::FeePerBlock => "fee-per-block",
            Self::DurationBtwBlocks => "duration-btw-blocks",
            Self::TicketSpendType => "ticket-spend-type",
            Self::TicketByOutputs => "ticket-by-outputs",
        }
    }

    /// API path for this chart kind, relative to the endpoint base URL
    #[must_use]
    pub fn api_path(self) -> String {
        format!("/api/chart/{}", self.as_str())
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartDataError::UnknownChartKind {
                value: s.to_string(),
            })
    }
}

/// Raw metrics payload returned by `/api/chart/{kind}`
///
/// A record of parallel sequences; index `i` across the sequences a chart
/// reads describes one logical sample (one block or one day). Endpoints
/// populate only the fields their chart needs, the rest deserialize empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsPayload {
    /// Unix timestamps in seconds
    #[serde(default)]
    pub time: Vec<i64>,
    /// Date strings for day-indexed charts
    #[serde(default)]
    pub timestr: Vec<String>,
    /// Integer x values (height for tx-per-block, seconds for duration-btw-blocks)
    #[serde(default)]
    pub value: Vec<u64>,
    /// Floating point y values
    #[serde(default)]
    pub valuef: Vec<f64>,
    /// Block sizes in bytes
    #[serde(default)]
    pub size: Vec<u64>,
    /// Floating point sizes (difficulty, pool size, fees)
    #[serde(default)]
    pub sizef: Vec<f64>,
    /// Cumulative chain size in bytes
    #[serde(default)]
    pub chainsize: Vec<u64>,
    /// Counts (transactions); carries the height for fee-per-block
    #[serde(default)]
    pub count: Vec<u64>,
    /// Block heights for the ticket charts
    #[serde(default)]
    pub height: Vec<u64>,
    /// Tickets still unspent at each height
    #[serde(default)]
    pub unspent: Vec<u64>,
    /// Tickets revoked at each height
    #[serde(default)]
    pub revoked: Vec<u64>,
    /// Tickets voted at each height
    #[serde(default)]
    pub voted: Vec<u64>,
    /// Solo ticket outputs at each height
    #[serde(default)]
    pub solo: Vec<u64>,
    /// Pooled ticket outputs at each height
    #[serde(default)]
    pub pooled: Vec<u64>,
    /// Split-transaction ticket outputs at each height
    #[serde(default)]
    pub txsplit: Vec<u64>,
}

impl MetricsPayload {
    /// True when every sequence is empty, i.e. the endpoint had nothing to plot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.timestr.is_empty()
            && self.value.is_empty()
            && self.valuef.is_empty()
            && self.size.is_empty()
            && self.sizef.is_empty()
            && self.chainsize.is_empty()
            && self.count.is_empty()
            && self.height.is_empty()
            && self.unspent.is_empty()
            && self.revoked.is_empty()
            && self.voted.is_empty()
            && self.solo.is_empty()
            && self.pooled.is_empty()
            && self.txsplit.is_empty()
    }
}

/// X-axis value of a plot point: a timestamp or an integer height
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotX {
    /// UTC instant, serialized as epoch milliseconds
    Timestamp(DateTime<Utc>),
    /// Integer x value (block height; seconds for the duration chart)
    Height(u64),
}

impl PlotX {
    /// Build a timestamp x from a raw unix-seconds field
    #[must_use]
    pub fn from_unix_seconds(secs: i64) -> Self {
        let millis = secs.saturating_mul(1000);
        Self::Timestamp(DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH))
    }

    /// Epoch milliseconds, when this x is a timestamp
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Timestamp(ts) => Some(ts.timestamp_millis()),
            Self::Height(_) => None,
        }
    }

    /// The raw integer, when this x is a height
    #[must_use]
    pub fn as_height(&self) -> Option<u64> {
        match self {
            Self::Height(h) => Some(*h),
            Self::Timestamp(_) => None,
        }
    }
}

/// One plot-ready sample: an x value followed by one or more y values
///
/// Serializes to the `[x, y, ...]` wire tuple the charting frontend
/// consumes, with timestamps rendered as epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: PlotX,
    pub ys: Vec<f64>,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: PlotX, ys: Vec<f64>) -> Self {
        Self { x, ys }
    }

    /// Single-series point at a unix-seconds timestamp
    #[must_use]
    pub fn at_time(secs: i64, y: f64) -> Self {
        Self::new(PlotX::from_unix_seconds(secs), vec![y])
    }

    /// Single-series point at an integer height
    #[must_use]
    pub fn at_height(height: u64, y: f64) -> Self {
        Self::new(PlotX::Height(height), vec![y])
    }

    /// Multi-series point at an integer height, values in series order
    #[must_use]
    pub fn stacked(height: u64, ys: Vec<f64>) -> Self {
        Self::new(PlotX::Height(height), ys)
    }

    /// First y value (0.0 for a degenerate empty tuple)
    #[must_use]
    pub fn y(&self) -> f64 {
        self.ys.first().copied().unwrap_or(0.0)
    }
}

impl Serialize for PlotPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(1 + self.ys.len()))?;
        match self.x {
            PlotX::Timestamp(ts) => seq.serialize_element(&ts.timestamp_millis())?,
            PlotX::Height(h) => seq.serialize_element(&h)?,
        }
        for y in &self.ys {
            seq.serialize_element(y)?;
        }
        seq.end()
    }
}
