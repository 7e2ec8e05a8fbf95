mod expense;
mod ledger;
mod money;

pub use expense::*;
pub use ledger::*;
pub use money::*;
