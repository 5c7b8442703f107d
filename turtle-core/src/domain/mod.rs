//! Domain types for the turtle engine.

pub mod bar;
pub mod ids;
pub mod ledger;
pub mod order;
pub mod trade;

pub use bar::Bar;
pub use ids::SignalId;
pub use ledger::{LedgerEntry, PositionLedger};
pub use order::{Direction, Offset, Order};
pub use trade::{OpenPosition, Trade};

/// Symbol type alias
pub type Symbol = String;
