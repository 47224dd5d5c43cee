mod market_cap;

pub use market_cap::*;
