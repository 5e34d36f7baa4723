use serde_json::Number;

use crate::ir::ScalarKind;

/// Integral values (including `1.0`) are `int`; everything else is `double`.
pub fn classify(n: &Number) -> ScalarKind {
    if n.is_i64() || n.is_u64() {
        return ScalarKind::Int;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => ScalarKind::Int,
        _ => ScalarKind::Double,
    }
}
