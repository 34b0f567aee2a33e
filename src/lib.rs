//! Dirty-block tracking for a real-time mapping pipeline.
//!
//! Map integrators report which blocks they mutated, and each downstream stage (distance field, mesh, freespace, layer
//! streaming) fetches and acknowledges its own pending blocks independently. See [`BlocksToUpdateTracker`].

mod config;

pub use config::Config;

pub use blocktrack_map::*;

/// Builds a tracker from the `tracker` section of `config`.
pub fn tracker_from_config(config: &Config) -> BlocksToUpdateTracker {
    log::debug!("Creating blocks-to-update tracker with {:?}", config.tracker);
    BlocksToUpdateTracker::new(config.tracker)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use blocktrack_map::glam::IVec3;
    use std::collections::HashSet;

    #[test]
    fn consumers_drain_independently_on_their_own_schedules() {
        let config =
            Config::from_ron_str("(tracker: (projective_layer_type: TsdfWithFreespace))").unwrap();
        let tracker = tracker_from_config(&config);
        assert!(tracker.has_freespace_layer());

        // Frame 1: integrate two blocks; the mesher runs every frame, the ESDF every other frame.
        tracker.add_blocks_to_update(&[IVec3::new(0, 0, 0), IVec3::new(1, 0, 0)]);
        assert_eq!(tracker.num_blocks_to_update(ConsumerClass::Mesh), 2);
        tracker.mark_blocks_as_updated(ConsumerClass::Mesh);

        // Frame 2: one more block, and one block gets deallocated.
        tracker.add_blocks_to_update(&[IVec3::new(0, 1, 0)]);
        tracker.remove_blocks_to_update(&[IVec3::new(1, 0, 0)]);

        let mesh: HashSet<_> = tracker
            .blocks_to_update(ConsumerClass::Mesh)
            .into_iter()
            .collect();
        let esdf: HashSet<_> = tracker
            .blocks_to_update(ConsumerClass::Esdf)
            .into_iter()
            .collect();
        assert_eq!(mesh, [IVec3::new(0, 1, 0)].iter().copied().collect());
        assert_eq!(
            esdf,
            [IVec3::new(0, 0, 0), IVec3::new(0, 1, 0)]
                .iter()
                .copied()
                .collect()
        );
        tracker.mark_blocks_as_updated(ConsumerClass::Mesh);
        tracker.mark_blocks_as_updated(ConsumerClass::Esdf);

        let sizes = tracker.dirty_set_sizes();
        assert_eq!(sizes.mesh + sizes.esdf, 0);
        assert_eq!(sizes.freespace, 2);
        assert_eq!(sizes.layer_streamer, 2);
    }
}
