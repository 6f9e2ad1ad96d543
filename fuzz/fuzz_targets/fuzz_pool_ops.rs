#![no_main]

use libfuzzer_sys::fuzz_target;
use rug::{Assign, Integer};

use mpcache_gmp::IntegerKind;
use mpcache_pool::{HandleKind, HandlePool, PoolConfig};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First two bytes pick the bounds, the rest is a script of operations.
    let config = PoolConfig::new(usize::from(data[0] % 16), usize::from(data[1]) * 4).unwrap();
    let pool = HandlePool::<IntegerKind>::new(config).unwrap();
    let mut held: Vec<Integer> = Vec::new();

    for &byte in &data[2..] {
        match byte % 4 {
            0 => held.push(pool.acquire(usize::from(byte) * 8).unwrap()),
            1 => {
                if let Some(value) = held.pop() {
                    pool.release(value);
                }
            }
            2 => {
                if let Some(value) = held.last_mut() {
                    value.assign(Integer::from(1) << (u32::from(byte) * 16));
                }
            }
            _ => {
                let max_count = usize::from(byte % 8);
                pool.configure(max_count, usize::from(byte) * 2).unwrap();
            }
        }
        let config = pool.current_config();
        assert!(pool.len() <= config.max_count());
    }

    for value in held {
        pool.release(value);
    }
    let config = pool.current_config();
    assert!(pool.len() <= config.max_count());
    for value in pool.drain() {
        assert!(IntegerKind::capacity_of(&value) <= config.max_capacity());
    }
});
