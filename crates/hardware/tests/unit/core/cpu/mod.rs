
/// Jumps, LOOP, CALL and RET.
pub mod control_flow;

/// Fetch, decode, status gating and `run` accounting.
pub mod execution;
