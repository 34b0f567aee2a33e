use crate::{
    dirty_sets::{DirtySetSizes, DirtySets, MAX_DIRTY_SET_SIZE},
    BlockIndex, ConsumerClass, TrackerConfig,
};

use blocktrack_core::TaskChain;

/// Tracks which blocks each downstream consumer still has to reprocess.
///
/// Producers report mutated blocks with [`add_blocks_to_update`](Self::add_blocks_to_update). Each consumer periodically fetches
/// its pending blocks with [`blocks_to_update`](Self::blocks_to_update) and acknowledges them with
/// [`mark_blocks_as_updated`](Self::mark_blocks_as_updated), which only clears that consumer's view.
///
/// Mutations run asynchronously, one at a time and in call order. A mutating call only waits for the previous mutation, not for
/// its own. Queries wait for the outstanding mutation, so they see the effect of every call made before them.
///
/// # Overload
///
/// A dirty set that grows past [`MAX_DIRTY_SET_SIZE`] is cleared and an error is logged. The affected consumer silently loses
/// the dropped blocks; nothing tells it to fall back to a full rescan.
pub struct BlocksToUpdateTracker {
    config: TrackerConfig,
    sets: TaskChain<DirtySets>,
}

impl BlocksToUpdateTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            sets: TaskChain::with_thread_name(
                DirtySets::new(config.has_freespace_layer()),
                "blocks-to-update",
            ),
        }
    }

    pub fn has_freespace_layer(&self) -> bool {
        self.config.has_freespace_layer()
    }

    /// Marks `blocks` as dirty for every consumer (freespace only if there is a freespace layer).
    pub fn add_blocks_to_update(&self, blocks: &[BlockIndex]) {
        let blocks = blocks.to_vec();
        log::debug!("Adding {} blocks to update", blocks.len());
        self.sets.submit(move |sets| {
            sets.insert(&blocks);
            sets.vent_oversized(MAX_DIRTY_SET_SIZE);
        });
    }

    /// Forgets `blocks` for every consumer. Blocks that aren't dirty are ignored.
    pub fn remove_blocks_to_update(&self, blocks: &[BlockIndex]) {
        let blocks = blocks.to_vec();
        log::debug!("Removing {} blocks to update", blocks.len());
        self.sets.submit(move |sets| sets.remove(&blocks));
    }

    /// Returns a copy of the blocks `consumer` has not yet reprocessed, in no particular order.
    pub fn blocks_to_update(&self, consumer: ConsumerClass) -> Vec<BlockIndex> {
        self.sets
            .read(|sets| sets.get(consumer).iter().copied().collect())
    }

    /// Clears the dirty set of `consumer` only.
    pub fn mark_blocks_as_updated(&self, consumer: ConsumerClass) {
        log::debug!("Marking {} blocks as updated", consumer);
        self.sets.submit(move |sets| sets.clear(consumer));
    }

    pub fn num_blocks_to_update(&self, consumer: ConsumerClass) -> usize {
        self.sets.read(|sets| sets.get(consumer).len())
    }

    pub fn dirty_set_sizes(&self) -> DirtySetSizes {
        self.sets.read(DirtySets::sizes)
    }

    /// Blocks until the outstanding mutation (if any) has been applied.
    pub fn wait_for_pending(&self) {
        self.sets.wait();
    }
}

impl Default for BlocksToUpdateTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
