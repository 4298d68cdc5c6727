#![no_main]
use libfuzzer_sys::{
    arbitrary::{Arbitrary, Unstructured},
    fuzz_target,
};
use llmap::{Error, LongLongMap, SliceMemory};
use std::collections::HashMap;

#[derive(Arbitrary, Debug)]
enum Op {
    Put(i64, i64),
    Get(i64),
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    let Ok(slots) = <u8 as Arbitrary>::arbitrary(&mut unstructured) else {
        return;
    };
    let capacity = u64::from(slots.max(1));
    let size = capacity * llmap::SLOT_SIZE;

    let Ok(ops) = <Vec<Op> as Arbitrary>::arbitrary(&mut unstructured) else {
        return;
    };

    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; size as usize]), 0, size).unwrap();
    let mut model = HashMap::<i64, i64>::new();

    for op in ops {
        match op {
            // Key 0 shares its marker with empty slots, keep it out of the model
            Op::Put(0, _) | Op::Get(0) => {}
            Op::Put(key, value) => match map.put(key, value) {
                Ok(prev) => {
                    assert_eq!(model.insert(key, value).unwrap_or(0), prev);
                }
                Err(Error::OutOfCapacity { capacity: c }) => {
                    assert_eq!(capacity, c);
                    assert!(!model.contains_key(&key));
                    assert_eq!(capacity, model.len() as u64);
                }
                Err(e) => panic!("unexpected error: {e}"),
            },
            Op::Get(key) => {
                assert_eq!(model.get(&key).copied().unwrap_or(0), map.get(key));
            }
        }
    }

    assert_eq!(model.len() as u64, map.occupied_slots());
});
