//! Page-level and document-level text repair applied to backend output.

pub mod dedupe;
pub mod normalize;
pub mod repetition;

pub use dedupe::dedupe;
pub use normalize::normalize;
pub use repetition::suppress;
