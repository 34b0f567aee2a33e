pub mod task_chain;

pub use task_chain::TaskChain;

use ahash::AHashSet;
pub type SmallKeyHashSet<K> = AHashSet<K>;

// Re-exports.
pub use glam;
pub use parking_lot;
