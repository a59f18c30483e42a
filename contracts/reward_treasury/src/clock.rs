use soroban_sdk::Env;

/// Current ledger timestamp in seconds.
///
/// This is the only time source the contract reads. Tests drive it through
/// `env.ledger().set_timestamp(..)`.
pub fn now(env: &Env) -> u64 {
    env.ledger().timestamp()
}

/// Timestamp `delay` seconds from now, saturating at `u64::MAX`.
pub fn after(env: &Env, delay: u64) -> u64 {
    now(env).saturating_add(delay)
}

/// True once the ledger clock has reached `at`.
pub fn has_reached(env: &Env, at: u64) -> bool {
    now(env) >= at
}
