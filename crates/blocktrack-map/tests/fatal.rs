//! Unknown consumer tags must take the whole process down. Each test re-runs itself in a child process with
//! `BLOCKTRACK_DEATH_TEST` set and expects the child to die.

use blocktrack_map::{glam::IVec3, BlocksToUpdateTracker, ConsumerClass, TrackerConfig};

use std::env;
use std::process::Command;

const DEATH_TEST_VAR: &str = "BLOCKTRACK_DEATH_TEST";

fn run_in_child(test_name: &str) -> std::process::ExitStatus {
    Command::new(env::current_exe().unwrap())
        .args(["--exact", test_name, "--test-threads=1", "--nocapture"])
        .env(DEATH_TEST_VAR, test_name)
        .status()
        .unwrap()
}

fn in_child(test_name: &str) -> bool {
    env::var(DEATH_TEST_VAR).map_or(false, |v| v == test_name)
}

#[test]
fn query_with_unknown_tag_aborts() {
    const NAME: &str = "query_with_unknown_tag_aborts";
    if in_child(NAME) {
        let tracker = BlocksToUpdateTracker::new(TrackerConfig::with_freespace(true));
        tracker.add_blocks_to_update(&[IVec3::ONE]);
        let _ = tracker.blocks_to_update(ConsumerClass::from_tag(4));
        // Reaching this point means the process survived, which the parent treats as success and fails on.
        return;
    }
    let status = run_in_child(NAME);
    assert!(!status.success(), "child exited normally: {:?}", status);
}

#[test]
fn acknowledge_with_unknown_tag_aborts() {
    const NAME: &str = "acknowledge_with_unknown_tag_aborts";
    if in_child(NAME) {
        let tracker = BlocksToUpdateTracker::default();
        tracker.mark_blocks_as_updated(ConsumerClass::from_tag(u8::MAX));
        return;
    }
    let status = run_in_child(NAME);
    assert!(!status.success(), "child exited normally: {:?}", status);
}

#[test]
fn known_tags_do_not_abort() {
    const NAME: &str = "known_tags_do_not_abort";
    if in_child(NAME) {
        let tracker = BlocksToUpdateTracker::default();
        for tag in 0..4 {
            tracker.mark_blocks_as_updated(ConsumerClass::from_tag(tag));
            let _ = tracker.blocks_to_update(ConsumerClass::from_tag(tag));
        }
        return;
    }
    assert!(run_in_child(NAME).success());
}
