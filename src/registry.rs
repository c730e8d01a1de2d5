//! Chart dispatch registry
//!
//! Data-driven table mapping each [`ChartKind`] to its transformer and
//! options template, so every pair is testable on its own instead of
//! living inside one big selection statement.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::options::{self, ChartOptions, Color};
use crate::transform;
use crate::types::{ChartKind, MetricsPayload, PlotPoint};

/// One registry entry: a chart kind with its transformer and options template
pub struct ChartDef {
    pub kind: ChartKind,
    /// Reshapes the raw payload into plot tuples
    pub transform: fn(&MetricsPayload) -> Vec<PlotPoint>,
    /// Produces a fresh options record for every redraw
    pub options: fn() -> ChartOptions,
}

/// The full registry, one entry per chart kind, in dropdown order
pub static CHARTS: [ChartDef; 13] = [
    ChartDef {
        kind: ChartKind::TicketPrice,
        transform: transform::ticket_price,
        options: ticket_price_options,
    },
    ChartDef {
        kind: ChartKind::TicketPoolSize,
        transform: transform::ticket_pool_size,
        options: ticket_pool_size_options,
    },
    ChartDef {
        kind: ChartKind::TicketPoolValue,
        transform: transform::ticket_pool_value,
        options: ticket_pool_value_options,
    },
    ChartDef {
        kind: ChartKind::AvgBlockSize,
        transform: transform::avg_block_size,
        options: avg_block_size_options,
    },
    ChartDef {
        kind: ChartKind::BlockchainSize,
        transform: transform::blockchain_size,
        options: blockchain_size_options,
    },
    ChartDef {
        kind: ChartKind::TxPerBlock,
        transform: transform::tx_per_block,
        options: tx_per_block_options,
    },
    ChartDef {
        kind: ChartKind::TxPerDay,
        transform: transform::tx_per_day,
        options: tx_per_day_options,
    },
    ChartDef {
        kind: ChartKind::PowDifficulty,
        transform: transform::pow_difficulty,
        options: pow_difficulty_options,
    },
    ChartDef {
        kind: ChartKind::CoinSupply,
        transform: transform::coin_supply,
        options: coin_supply_options,
    },
    ChartDef {
        kind: ChartKind::FeePerBlock,
        transform: transform::fee_per_block,
        options: fee_per_block_options,
    },
    ChartDef {
        kind: ChartKind::DurationBtwBlocks,
        transform: transform::duration_btw_blocks,
        options: duration_btw_blocks_options,
    },
    ChartDef {
        kind: ChartKind::TicketSpendType,
        transform: transform::ticket_spend_type,
        options: ticket_spend_type_options,
    },
    ChartDef {
        kind: ChartKind::TicketByOutputs,
        transform: transform::ticket_by_outputs,
        options: ticket_by_outputs_options,
    },
];

static BY_KIND: Lazy<HashMap<ChartKind, &'static ChartDef>> =
    Lazy::new(|| CHARTS.iter().map(|def| (def.kind, def)).collect());

/// Look up the registry entry for a chart kind
#[must_use]
pub fn chart_def(kind: ChartKind) -> &'static ChartDef {
    BY_KIND[&kind]
}

/// Run the transformer and options template for one chart kind
#[must_use]
pub fn prepare_chart(kind: ChartKind, payload: &MetricsPayload) -> (Vec<PlotPoint>, ChartOptions) {
    let def = chart_def(kind);
    ((def.transform)(payload), (def.options)())
}

fn ticket_price_options() -> ChartOptions {
    options::base_options(
        &["Date", "Price"],
        true,
        "Price (Decred)",
        "Date",
        "Ticket Price Chart",
        false,
        false,
    )
}

fn ticket_pool_size_options() -> ChartOptions {
    options::base_options(
        &["Date", "Ticket Pool Size"],
        false,
        "Ticket Pool Size",
        "Date",
        "Ticket Pool Size Chart",
        true,
        false,
    )
}

fn ticket_pool_value_options() -> ChartOptions {
    options::base_options(
        &["Date", "Ticket Pool Value"],
        true,
        "Ticket Pool Value",
        "Date",
        "Ticket Pool Value Chart",
        true,
        false,
    )
}

fn avg_block_size_options() -> ChartOptions {
    options::base_options(
        &["Date", "Block Size"],
        false,
        "Block Size",
        "Date",
        "Average Block Size Chart",
        true,
        false,
    )
}

fn blockchain_size_options() -> ChartOptions {
    options::base_options(
        &["Date", "BlockChain Size"],
        true,
        "BlockChain Size",
        "Date",
        "BlockChain Size Chart",
        false,
        true,
    )
}

fn tx_per_block_options() -> ChartOptions {
    options::base_options(
        &["Block Height", "Number of Transactions Per Block"],
        false,
        "Number of Transactions",
        "Block Height",
        "Number of Transactions Per Block Chart",
        false,
        false,
    )
}

fn tx_per_day_options() -> ChartOptions {
    options::base_options(
        &["Date", "Number of Transactions Per Day"],
        true,
        "Number of Transactions",
        "Date",
        "Number of Transactions Per Day Chart",
        true,
        false,
    )
}

fn pow_difficulty_options() -> ChartOptions {
    options::base_options(
        &["Date", "Difficulty"],
        true,
        "Difficulty",
        "Date",
        "PoW Difficulty Chart",
        true,
        false,
    )
}

fn coin_supply_options() -> ChartOptions {
    options::base_options(
        &["Date", "Coin Supply"],
        true,
        "Coin Supply",
        "Date",
        "Total Coin Supply Chart",
        true,
        false,
    )
}

fn fee_per_block_options() -> ChartOptions {
    options::base_options(
        &["Block Height", "Total Fee"],
        false,
        "Total Fee (DCR)",
        "Block Height",
        "Total Fee Per Block Chart",
        true,
        false,
    )
}

fn duration_btw_blocks_options() -> ChartOptions {
    options::base_options(
        &["Block Height", "Duration Between Block"],
        false,
        "Duration Between Block (Seconds)",
        "Block Height",
        "Duration Between Blocks Chart",
        false,
        false,
    )
}

fn ticket_spend_type_options() -> ChartOptions {
    options::base_options(
        &["Block Height", "Unspent", "Revoked", "Voted"],
        false,
        "Tickets Spend Type",
        "Block Height",
        "Tickets Spend Types Chart",
        false,
        false,
    )
    .with_bar_style(vec![Color::ORANGE, Color::RED, Color::GREEN])
}

fn ticket_by_outputs_options() -> ChartOptions {
    options::base_options(
        &["Block Height", "Solo", "Pooled", "TxSplit"],
        false,
        "Tickets By Outputs",
        "Block Height",
        "Tickets By Output Count Chart",
        false,
        false,
    )
    .with_bar_style(vec![Color::ORANGE, Color::GREEN, Color::PURPLE])
}
