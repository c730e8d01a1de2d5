//! Pure series transformers
//!
//! One function per chart kind, each a single O(n) pass reshaping the raw
//! parallel arrays of a [`MetricsPayload`] into ordered plot tuples. Paired
//! sequences are walked in lockstep, so a malformed shorter sequence bounds
//! the output instead of panicking. No aggregation, no sorting.

#![allow(clippy::cast_precision_loss)]

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{MetricsPayload, PlotPoint, PlotX};

/// Ticket price over time: (time, valuef)
pub fn ticket_price(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.valuef)
        .map(|(&secs, &price)| PlotPoint::at_time(secs, price))
        .collect()
}

/// Ticket pool size over time: (time, sizef)
pub fn ticket_pool_size(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.sizef)
        .map(|(&secs, &size)| PlotPoint::at_time(secs, size))
        .collect()
}

/// Ticket pool value over time: (time, valuef)
pub fn ticket_pool_value(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.valuef)
        .map(|(&secs, &value)| PlotPoint::at_time(secs, value))
        .collect()
}

/// Average block size over time: (time, size)
pub fn avg_block_size(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.size)
        .map(|(&secs, &size)| PlotPoint::at_time(secs, size as f64))
        .collect()
}

/// Cumulative blockchain size over time: (time, chainsize)
pub fn blockchain_size(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.chainsize)
        .map(|(&secs, &size)| PlotPoint::at_time(secs, size as f64))
        .collect()
}

/// Transactions per block, by height: (value, count)
pub fn tx_per_block(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.value
        .iter()
        .zip(&data.count)
        .map(|(&height, &count)| PlotPoint::at_height(height, count as f64))
        .collect()
}

/// Transactions per day: (timestr, count)
///
/// Samples whose date string does not parse are skipped, mirroring the
/// zero-duration guard below.
pub fn tx_per_day(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.timestr
        .iter()
        .zip(&data.count)
        .filter_map(|(day, &count)| {
            parse_day(day).map(|ts| PlotPoint::new(PlotX::Timestamp(ts), vec![count as f64]))
        })
        .collect()
}

/// Proof-of-work difficulty over time: (time, sizef)
pub fn pow_difficulty(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.sizef)
        .map(|(&secs, &difficulty)| PlotPoint::at_time(secs, difficulty))
        .collect()
}

/// Total coin supply over time: (time, valuef)
pub fn coin_supply(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.time
        .iter()
        .zip(&data.valuef)
        .map(|(&secs, &supply)| PlotPoint::at_time(secs, supply))
        .collect()
}

/// Total fee per block: (count, sizef)
///
/// The endpoint packs the block height into `count` for this chart.
pub fn fee_per_block(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.count
        .iter()
        .zip(&data.sizef)
        .map(|(&height, &fee)| PlotPoint::at_height(height, fee))
        .collect()
}

/// Duration between consecutive blocks: (value, valuef)
///
/// Zero-duration samples are degenerate or missing data and are dropped.
pub fn duration_btw_blocks(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.value
        .iter()
        .zip(&data.valuef)
        .filter(|(&duration, _)| duration != 0)
        .map(|(&duration, &count)| PlotPoint::at_height(duration, count))
        .collect()
}

/// Ticket spend type per block: (height, unspent/revoked/voted)
pub fn ticket_spend_type(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.height
        .iter()
        .zip(&data.unspent)
        .zip(&data.revoked)
        .zip(&data.voted)
        .map(|(((&height, &unspent), &revoked), &voted)| {
            PlotPoint::stacked(height, vec![unspent as f64, revoked as f64, voted as f64])
        })
        .collect()
}

/// Ticket output counts per block: (height, solo/pooled/txsplit)
pub fn ticket_by_outputs(data: &MetricsPayload) -> Vec<PlotPoint> {
    data.height
        .iter()
        .zip(&data.solo)
        .zip(&data.pooled)
        .zip(&data.txsplit)
        .map(|(((&height, &solo), &pooled), &txsplit)| {
            PlotPoint::stacked(height, vec![solo as f64, pooled as f64, txsplit as f64])
        })
        .collect()
}

/// Parse a day-indexed x value: `%Y-%m-%d` or RFC 3339
fn parse_day(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
