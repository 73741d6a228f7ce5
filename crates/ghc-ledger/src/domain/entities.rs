//! # Domain Entities
//!
//! Core entities for the ledger: credit batches and per-wallet aggregates.
//!
//! ## Persisted Layout
//!
//! Field names serialize in camelCase (`energySource`, `ghcBalance`, ...) so a
//! snapshot matches the layout the marketplace UI has always written.
//!
//! JSON has no NaN or infinity, so such amounts are written as `null`. Amount
//! fields read `null` back as zero (`price` as absent) so a snapshot holding
//! one still loads.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use std::fmt;
use std::str::FromStr;

/// Opaque wallet identifier. No cryptographic identity is attached.
pub type Wallet = String;

/// Identifier of a credit batch (`BATCH-...`).
pub type BatchId = String;

/// Lifecycle state of a batch.
///
/// `Pending` on registration; `Certified` / `Rejected` by a certifier;
/// `Sold` only through a purchase, and terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BatchStatus {
    #[default]
    Pending,
    Certified,
    Rejected,
    Sold,
}

impl BatchStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [BatchStatus; 4] = [
        BatchStatus::Pending,
        BatchStatus::Certified,
        BatchStatus::Rejected,
        BatchStatus::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "Pending",
            BatchStatus::Certified => "Certified",
            BatchStatus::Rejected => "Rejected",
            BatchStatus::Sold => "Sold",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BatchStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown batch status: {}", s))
    }
}

/// A claimed lot of hydrogen production, the unit of trade.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Batch {
    /// Unique identifier assigned at registration.
    pub id: BatchId,
    /// Wallet of the registering producer. Never changes.
    pub producer: Wallet,
    /// Credit quantity.
    #[serde_as(as = "DefaultOnNull")]
    pub volume: f64,
    /// Free-form energy category ("Solar", "Wind", ...).
    pub energy_source: String,
    /// Opaque reference to the production proof document.
    pub proof: String,
    pub status: BatchStatus,
    /// Unit price, set by the certifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Purchasing wallet. Present iff `status == Sold`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Wallet>,
}

impl Batch {
    /// Price usable for a sale: present, non-zero and a number.
    pub fn sale_price(&self) -> Option<f64> {
        self.price.filter(|p| *p != 0.0 && !p.is_nan())
    }

    /// Total value of the batch at its current price (zero when unpriced).
    pub fn total_value(&self) -> f64 {
        self.volume * self.price.unwrap_or(0.0)
    }

    /// Whether `buyer` and `status` agree (`buyer` set iff `Sold`).
    pub fn buyer_matches_status(&self) -> bool {
        self.buyer.is_some() == (self.status == BatchStatus::Sold)
    }
}

/// Registration input for a new batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub producer: Wallet,
    pub volume: f64,
    pub energy_source: String,
    pub proof: String,
}

impl NewBatch {
    pub fn new(
        producer: impl Into<Wallet>,
        volume: f64,
        energy_source: impl Into<String>,
        proof: impl Into<String>,
    ) -> Self {
        Self {
            producer: producer.into(),
            volume,
            energy_source: energy_source.into(),
            proof: proof.into(),
        }
    }

    /// Build the `Pending` batch this registration produces.
    pub fn into_batch(self, id: BatchId) -> Batch {
        Batch {
            id,
            producer: self.producer,
            volume: self.volume,
            energy_source: self.energy_source,
            proof: self.proof,
            status: BatchStatus::Pending,
            price: None,
            buyer: None,
        }
    }
}

/// Aggregate view of one wallet, maintained incrementally on purchases.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    /// Credits acquired through purchases.
    #[serde_as(as = "DefaultOnNull")]
    pub ghc_balance: f64,
    /// Amount paid as buyer.
    #[serde_as(as = "DefaultOnNull")]
    pub total_spent: f64,
    /// Batches bought, most recent first, as they were before the sale.
    pub purchase_history: Vec<Batch>,
    /// Amount earned as producer.
    #[serde_as(as = "DefaultOnNull")]
    pub total_revenue: f64,
    pub batches_sold: u64,
}

impl UserData {
    /// Record a purchase of `batch` by this wallet.
    pub(crate) fn record_purchase(&mut self, batch: &Batch, price: f64) {
        self.ghc_balance += batch.volume;
        self.total_spent += batch.volume * price;
        self.purchase_history.insert(0, batch.clone());
    }

    /// Record a sale of `batch` produced by this wallet.
    pub(crate) fn record_sale(&mut self, batch: &Batch, price: f64) {
        self.total_revenue += batch.volume * price;
        self.batches_sold += 1;
    }
}
