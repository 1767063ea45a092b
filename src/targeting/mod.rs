pub mod evaluator;
pub mod group;
pub mod pool;
pub mod predicate;
pub mod predicates;

pub use evaluator::TargetingEvaluator;
pub use group::{TargetingGroup, TargetingGroupRecord};
pub use pool::PredicatePool;
pub use predicate::{Inverse, PredicateResult, TargetingPredicate};
pub use predicates::{PredicateKind, PredicateSpec};
