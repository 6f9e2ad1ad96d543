//! Shared fixtures for the workspace-level integration tests.

use serde::Deserialize;

use mpcache_gmp::{BinaryOp, Rank};

/// One arithmetic case from `tests/testdata/arithmetic_golden.json`.
#[derive(Debug, Deserialize)]
pub struct GoldenCase {
    /// Operator symbol: `+`, `-`, `*` or `/`.
    pub op: String,
    /// Left operand as a decimal literal.
    pub lhs: String,
    /// Right operand as a decimal literal.
    pub rhs: String,
    /// Expected result rank, absent when the case must fail.
    #[serde(default)]
    pub rank: Option<Rank>,
    /// Exact textual result for integer and rational cases.
    #[serde(default)]
    pub exact: Option<String>,
    /// Approximate value for float cases.
    #[serde(default)]
    pub approx: Option<f64>,
    /// Expected error: `division_by_zero` or `parse`.
    #[serde(default)]
    pub error: Option<String>,
}

impl GoldenCase {
    /// The operator this case exercises.
    pub fn binary_op(&self) -> BinaryOp {
        match self.op.as_str() {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            other => panic!("unknown operator {other:?} in golden data"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    cases: Vec<GoldenCase>,
}

/// Load every golden arithmetic case.
pub fn load_golden_cases() -> Vec<GoldenCase> {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/arithmetic_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    let data: GoldenData = serde_json::from_str(&data).expect("failed to parse golden JSON");
    data.cases
}
