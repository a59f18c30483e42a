use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PAUSED: Symbol = symbol_short!("PAUSED");

// ── Administrator ────────────────────────────────────────────────────────────

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

/// Guard for every privileged operation.
///
/// Requires `caller` to have authorised the invocation and to be the stored
/// administrator. Fails with `NotInitialized` before `initialize`.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let admin = get_admin(env)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ── Pause flag ───────────────────────────────────────────────────────────────

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Only signed claims consult this; treasury management and emergency
/// claims ignore the flag.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}
