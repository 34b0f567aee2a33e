use crate::{BlockIndex, ConsumerClass};

use blocktrack_core::SmallKeyHashSet;

/// A dirty set holding more than this many blocks is assumed to belong to a stalled consumer and gets cleared.
pub const MAX_DIRTY_SET_SIZE: usize = 100_000;

/// One set of pending blocks per [`ConsumerClass`].
///
/// A block present in a set has been mutated since that consumer last cleared its set.
#[derive(Default)]
pub struct DirtySets {
    esdf: SmallKeyHashSet<BlockIndex>,
    mesh: SmallKeyHashSet<BlockIndex>,
    freespace: SmallKeyHashSet<BlockIndex>,
    layer_streamer: SmallKeyHashSet<BlockIndex>,
    has_freespace_layer: bool,
}

impl DirtySets {
    pub fn new(has_freespace_layer: bool) -> Self {
        Self {
            has_freespace_layer,
            ..Default::default()
        }
    }

    pub fn get(&self, consumer: ConsumerClass) -> &SmallKeyHashSet<BlockIndex> {
        match consumer {
            ConsumerClass::Esdf => &self.esdf,
            ConsumerClass::Mesh => &self.mesh,
            ConsumerClass::Freespace => &self.freespace,
            ConsumerClass::LayerStreamer => &self.layer_streamer,
        }
    }

    fn get_mut(&mut self, consumer: ConsumerClass) -> &mut SmallKeyHashSet<BlockIndex> {
        match consumer {
            ConsumerClass::Esdf => &mut self.esdf,
            ConsumerClass::Mesh => &mut self.mesh,
            ConsumerClass::Freespace => &mut self.freespace,
            ConsumerClass::LayerStreamer => &mut self.layer_streamer,
        }
    }

    /// The sets that producers write to. Freespace is skipped when there is no freespace layer.
    fn active_consumers(has_freespace_layer: bool) -> impl Iterator<Item = ConsumerClass> {
        ConsumerClass::ALL
            .into_iter()
            .filter(move |&c| c != ConsumerClass::Freespace || has_freespace_layer)
    }

    pub fn insert(&mut self, blocks: &[BlockIndex]) {
        for consumer in Self::active_consumers(self.has_freespace_layer) {
            self.get_mut(consumer).extend(blocks.iter().copied());
        }
    }

    pub fn remove(&mut self, blocks: &[BlockIndex]) {
        for consumer in Self::active_consumers(self.has_freespace_layer) {
            let set = self.get_mut(consumer);
            for block in blocks {
                set.remove(block);
            }
        }
    }

    pub fn clear(&mut self, consumer: ConsumerClass) {
        self.get_mut(consumer).clear();
    }

    /// Clears every set that holds more than `max_size` blocks and logs an error for each one. Returns the cleared consumers.
    ///
    /// Consumers of a cleared set will not hear about the dropped blocks again until something mutates them.
    pub fn vent_oversized(&mut self, max_size: usize) -> Vec<ConsumerClass> {
        let mut vented = Vec::new();
        for consumer in ConsumerClass::ALL {
            let set = self.get_mut(consumer);
            if set.len() > max_size {
                log::error!(
                    "Dirty set {} is too large: {} > {}. This should normally not happen. Clearing the set",
                    consumer,
                    set.len(),
                    max_size
                );
                set.clear();
                vented.push(consumer);
            }
        }
        vented
    }

    pub fn sizes(&self) -> DirtySetSizes {
        DirtySetSizes {
            esdf: self.esdf.len(),
            mesh: self.mesh.len(),
            freespace: self.freespace.len(),
            layer_streamer: self.layer_streamer.len(),
        }
    }
}

/// A snapshot of how many blocks each consumer has pending.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DirtySetSizes {
    pub esdf: usize,
    pub mesh: usize,
    pub freespace: usize,
    pub layer_streamer: usize,
}

impl DirtySetSizes {
    pub fn get(&self, consumer: ConsumerClass) -> usize {
        match consumer {
            ConsumerClass::Esdf => self.esdf,
            ConsumerClass::Mesh => self.mesh,
            ConsumerClass::Freespace => self.freespace,
            ConsumerClass::LayerStreamer => self.layer_streamer,
        }
    }

    pub fn total(&self) -> usize {
        self.esdf + self.mesh + self.freespace + self.layer_streamer
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
