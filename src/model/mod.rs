mod league;
mod table;

pub use league::*;
pub use table::*;

pub(crate) use table::parse_number;
