//! Snapshot serialization: the persisted state layout must survive an
//! encode/decode cycle and a restored queue must be indistinguishable from
//! the original.

use strait_core::{FifoSnapshot, StraitFifo};

fn busy_fifo() -> StraitFifo<u64> {
    let mut fifo: StraitFifo<u64> = StraitFifo::new(4).unwrap();
    for value in 0..11u64 {
        assert!(fifo.producer_tick(true, value));
    }
    for _ in 0..6 {
        let _ = fifo.consumer_tick(true);
    }
    fifo
}

#[test]
fn snapshot_survives_binary_serialization() {
    let fifo = busy_fifo();
    let snapshot = fifo.snapshot();

    let bytes = bincode::serialize(&snapshot).expect("serialize snapshot");
    let decoded: FifoSnapshot<u64> = bincode::deserialize(&bytes).expect("deserialize snapshot");
    assert_eq!(decoded, snapshot);

    let mut original = fifo;
    let mut restored = StraitFifo::restore(decoded).unwrap();
    for step in 0..100u64 {
        assert_eq!(
            original.producer_tick(step % 2 == 0, step),
            restored.producer_tick(step % 2 == 0, step)
        );
        assert_eq!(
            original.consumer_tick(step % 3 != 0),
            restored.consumer_tick(step % 3 != 0)
        );
    }
    assert_eq!(original.snapshot(), restored.snapshot());
}

#[test]
fn snapshot_layout_carries_all_registers() {
    let fifo = busy_fifo();
    let snapshot = fifo.snapshot();

    assert_eq!(snapshot.address_bits, 4);
    assert_eq!(snapshot.storage.len(), 16);
    assert_eq!(snapshot.producer.binary, 11);
    assert_eq!(snapshot.consumer.flag, fifo.is_empty());
    assert_eq!(snapshot.producer.flag, fifo.is_full());
    // The encoded register is derived but persisted, because it is the one
    // that actually crosses the boundary.
    assert_eq!(
        snapshot.producer.encoded,
        strait_core::gray::encode(snapshot.producer.binary)
    );
}
