//! Personal-finance calculators that sit next to the strategy pipeline:
//! tax regime comparison, return projection, retirement and pension planning.

pub mod pension;
pub mod retirement;
pub mod returns;
pub mod tax_regime;
