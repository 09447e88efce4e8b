#[macro_use]
mod knowledge_base;
pub use knowledge_base::*;

mod clause;
pub use clause::*;

mod search;
pub use search::*;
