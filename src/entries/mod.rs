//! Player entries: the wide per-player rows edited on the entries form,
//! the normalized join records they decompose into, and the fee/count
//! calculator over them.

pub mod counts;
pub mod models;
pub mod rows;

pub use counts::{bracket_entry_fee, entry_counts};
pub use models::{BrktEntry, DivEntry, ElimEntry, EntryBundle, EntryRow, Player, PotEntry};
pub use rows::explode_rows;
