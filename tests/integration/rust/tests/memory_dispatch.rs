//! Heap, freeze semantics and the collection-cycle counter, driven through
//! dispatch where the operations are user-visible.

use std::sync::Arc;

use core_types::{ErrorKind, Value};
use memory_manager::{read_cycle_count, Heap};
use method_dispatch::TypeRegistry;

#[test]
fn test_cycle_counter_is_monotonic_across_collections() {
    let heap = Heap::new();
    let mut last = read_cycle_count();
    for _ in 0..5 {
        let garbage = heap.allocate("Object");
        let _ = garbage;
        heap.collect(&[]);
        let now = read_cycle_count();
        // Other tests may collect concurrently; the counter only grows.
        assert!(now > last);
        last = now;
    }
}

#[test]
fn test_collection_follows_object_references() {
    let heap = Heap::new();
    let root = heap.allocate("Object");
    let kept = heap.allocate("Object");
    let lost = heap.allocate("Object");
    heap.set_field(root, "child", Value::ObjectRef(kept)).unwrap();

    let reclaimed = heap.collect(&[root]);
    assert_eq!(reclaimed, 1);
    assert!(heap.class_of(kept).is_ok());
    assert!(heap.class_of(lost).is_err());
}

#[test]
fn test_frozen_receiver_rejects_writes_but_keeps_reading() {
    let heap = Arc::new(Heap::new());
    let registry = TypeRegistry::with_core_types(Arc::clone(&heap));

    let id = heap.allocate("Object");
    heap.set_field(id, "capacity", Value::integer(10)).unwrap();
    let receiver = Value::ObjectRef(id);

    registry.call(&receiver, "freeze", &[]).unwrap();

    let err = heap.set_field(id, "capacity", Value::integer(20)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::FrozenMutation);
    assert_eq!(err.kind.class_name(), "FrozenError");

    // Reads and dispatch still work on a frozen object.
    assert_eq!(heap.get_field(id, "capacity").unwrap(), Some(Value::integer(10)));
    assert_eq!(registry.call(&receiver, "class", &[]).unwrap(), Value::str("Object"));
    // Freezing again is a no-op, not an error.
    registry.call(&receiver, "freeze", &[]).unwrap();
}

#[test]
fn test_collection_does_not_disturb_dispatch_state() {
    let heap = Arc::new(Heap::new());
    let registry = TypeRegistry::with_core_types(Arc::clone(&heap));
    let object = registry.type_id("Object").unwrap();
    let node = registry.define_type("Node", Some(object));
    registry.define_method(node, "kind", |_, _| Ok(Value::str("node")));

    let survivor = heap.allocate("Node");
    for _ in 0..50 {
        let _ = heap.allocate("Node");
    }
    heap.collect(&[survivor]);

    assert_eq!(heap.len(), 1);
    assert_eq!(
        registry.call(&Value::ObjectRef(survivor), "kind", &[]).unwrap(),
        Value::str("node")
    );
}
