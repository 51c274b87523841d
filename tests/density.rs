//! End-to-end id density checks through the library surface.

use td::record::{Collection, TaskRecord};
use td::store::Store;
use td::tracker::Tracker;

fn record(text: &str) -> TaskRecord {
    TaskRecord {
        kind: "Todo".to_string(),
        description: text.to_string(),
        deadline: None,
    }
}

fn open_tracker(dir: &tempfile::TempDir) -> Tracker {
    let store = Store::open(dir.path().to_path_buf()).expect("store");
    Tracker::open(store).expect("tracker")
}

fn assert_dense(tracker: &Tracker, collection: Collection) {
    let tasks = tracker.list(collection).expect("list");
    for (position, task) in tasks.iter().enumerate() {
        assert_eq!(task.identifier, position as u64);
    }
    assert_eq!(tracker.next_id(collection), tasks.len() as u64);
}

#[test]
fn ids_stay_dense_across_mixed_operations() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut tracker = open_tracker(&dir);

    for text in ["a", "b", "c", "d", "e"] {
        tracker
            .add(Collection::Uncompleted, &record(text))
            .expect("add");
    }

    tracker.delete(Collection::Uncompleted, 0).expect("delete");
    tracker.complete(2).expect("complete");
    tracker
        .add(Collection::Uncompleted, &record("f"))
        .expect("add");
    tracker.delete(Collection::Uncompleted, 1).expect("delete");
    tracker.complete(0).expect("complete");

    assert_dense(&tracker, Collection::Uncompleted);
    assert_dense(&tracker, Collection::Completed);
}

#[test]
fn reopening_the_store_preserves_ids_and_order() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut tracker = open_tracker(&dir);
        for text in ["first", "second", "third"] {
            tracker
                .add(Collection::Uncompleted, &record(text))
                .expect("add");
        }
        tracker.delete(Collection::Uncompleted, 1).expect("delete");
    }

    let tracker = open_tracker(&dir);
    assert_dense(&tracker, Collection::Uncompleted);

    let texts: Vec<String> = tracker
        .list(Collection::Uncompleted)
        .expect("list")
        .into_iter()
        .map(|task| task.record.description)
        .collect();
    assert_eq!(texts, ["first", "third"]);
}

#[test]
fn ids_are_collection_local_across_many_completions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut tracker = open_tracker(&dir);

    for index in 0..4 {
        tracker
            .add(Collection::Uncompleted, &record(&format!("task {index}")))
            .expect("add");
    }

    // Always complete the head, so completed order mirrors add order.
    for _ in 0..4 {
        tracker.complete(0).expect("complete");
    }

    assert_eq!(tracker.next_id(Collection::Uncompleted), 0);
    assert_eq!(tracker.next_id(Collection::Completed), 4);
    assert_dense(&tracker, Collection::Completed);

    let texts: Vec<String> = tracker
        .list(Collection::Completed)
        .expect("list")
        .into_iter()
        .map(|task| task.record.description)
        .collect();
    assert_eq!(texts, ["task 0", "task 1", "task 2", "task 3"]);
}
