pub mod banquet;
pub use banquet::*;

pub mod clean;
pub use clean::*;

pub mod tiers;
pub use tiers::*;

pub mod segments;
pub use segments::*;

pub mod select;
pub use select::*;

pub mod table;
pub use table::*;

pub mod directives;
pub use directives::*;

pub mod parse_error;
pub use parse_error::*;
