//! Command-bar interpreter: decides per keystroke and per submit whether the
//! text is arithmetic, a bookmark lookup or a web search.

pub mod evaluator;
pub mod render;
pub mod router;
pub mod session;

pub use evaluator::{evaluate, CalculatorState, Evaluation};
pub use router::{category_counts, decide, route, MatchResult, RoutePolicy, RouteResult};
pub use session::CommandBar;
