#![no_main]

use libfuzzer_sys::fuzz_target;

use mpcache_gmp::{apply, BinaryOp, PoolContext};
use mpcache_pool::PoolConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((lhs, rhs)) = text.split_once(' ') else {
        return;
    };
    let ctx = PoolContext::new(PoolConfig::new(2, 64).unwrap()).unwrap();

    // Arbitrary literals must either compute or fail cleanly.
    for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div] {
        let _ = apply(&ctx, op, lhs.into(), rhs.into());
    }
    assert!(ctx.integers().len() <= 2);
    assert!(ctx.rationals().len() <= 2);
});
