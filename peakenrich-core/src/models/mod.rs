pub mod condition;
pub mod expression;
pub mod gene;
pub mod peak;
pub mod peak_table;

// re-export for cleaner imports
pub use self::condition::{Condition, total_peak_count};
pub use self::expression::ExpressionRecord;
pub use self::gene::{AnnotationRow, GeneRecord};
pub use self::peak::{Peak, Strand};
pub use self::peak_table::{PeakTable, SampleDepth};
