//! # Claim ledger
//!
//! Per-user claim bookkeeping and the global claim counters.
//!
//! User records live in persistent storage under `(epoch, user)`. A reset
//! advances the epoch, so every record of the previous epoch becomes
//! unreachable and reads back as zero in the same write that clears the
//! global counters. Nothing is iterated and no partial reset is possible.
//!
//! New users start at nonce `0`; the nonce a calculator must sign is always
//! [`current_nonce`].

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{clock, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const EPOCH: Symbol = symbol_short!("EPOCH");
const TOTAL_CLAIMS: Symbol = symbol_short!("TOT_CLMS");
const TOTAL_AMOUNT: Symbol = symbol_short!("TOT_AMT");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum LedgerKey {
    User(u32, Address),
}

// ── Types ────────────────────────────────────────────────────────────────────

/// Claim history of one user within the current epoch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserClaimRecord {
    pub cumulative_claimed: i128,
    pub nonce: u64,
    pub last_claim_time: u64,
    pub has_interacted: bool,
}

impl UserClaimRecord {
    pub fn empty() -> Self {
        UserClaimRecord {
            cumulative_claimed: 0,
            nonce: 0,
            last_claim_time: 0,
            has_interacted: false,
        }
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn user_key(env: &Env, user: &Address) -> LedgerKey {
    LedgerKey::User(epoch(env), user.clone())
}

fn store_record(env: &Env, user: &Address, record: &UserClaimRecord) {
    let key = user_key(env, user);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Add one claim of `amount` to the global counters.
fn bump_totals(env: &Env, amount: i128) -> Result<(), ContractError> {
    let claims = total_claims_processed(env)
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let total = total_amount_claimed(env)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&TOTAL_CLAIMS, &claims);
    env.storage().instance().set(&TOTAL_AMOUNT, &total);
    Ok(())
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn epoch(env: &Env) -> u32 {
    env.storage().instance().get(&EPOCH).unwrap_or(0)
}

pub fn get_record(env: &Env, user: &Address) -> UserClaimRecord {
    env.storage()
        .persistent()
        .get(&user_key(env, user))
        .unwrap_or_else(UserClaimRecord::empty)
}

pub fn current_nonce(env: &Env, user: &Address) -> u64 {
    get_record(env, user).nonce
}

pub fn total_claims_processed(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_CLAIMS).unwrap_or(0)
}

pub fn total_amount_claimed(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_AMOUNT).unwrap_or(0)
}

/// Check that adding `amount` keeps the user within the lifetime cap.
pub fn ensure_within_cap(
    record: &UserClaimRecord,
    amount: i128,
    absolute_max_claim: i128,
) -> Result<(), ContractError> {
    if amount > absolute_max_claim {
        return Err(ContractError::ExceedsMaximum);
    }
    let projected = record
        .cumulative_claimed
        .checked_add(amount)
        .ok_or(ContractError::ExceedsMaximum)?;
    if projected > absolute_max_claim {
        return Err(ContractError::ExceedsMaximum);
    }
    Ok(())
}

// ── Writes ───────────────────────────────────────────────────────────────────

/// Record a signed claim: cumulative total, nonce, timestamp and the
/// interaction flag all advance together.
///
/// Only called from the commit step of `claim_rewards`, after every check
/// has passed.
pub fn record_claim(
    env: &Env,
    user: &Address,
    amount: i128,
) -> Result<UserClaimRecord, ContractError> {
    let mut record = get_record(env, user);
    record.cumulative_claimed = record
        .cumulative_claimed
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    record.nonce = record
        .nonce
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;
    record.last_claim_time = clock::now(env);
    record.has_interacted = true;

    bump_totals(env, amount)?;
    store_record(env, user, &record);
    Ok(record)
}

/// Record an administrator payout. The user's nonce and cumulative total
/// are left untouched; only the interaction flag and global counters move.
pub fn record_emergency_claim(
    env: &Env,
    user: &Address,
    amount: i128,
) -> Result<UserClaimRecord, ContractError> {
    let mut record = get_record(env, user);
    record.has_interacted = true;

    bump_totals(env, amount)?;
    store_record(env, user, &record);
    Ok(record)
}

/// Start a new epoch and zero the global counters. Returns the new epoch.
pub fn reset_all(env: &Env) -> Result<u32, ContractError> {
    let next = epoch(env)
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&EPOCH, &next);
    env.storage().instance().set(&TOTAL_CLAIMS, &0u64);
    env.storage().instance().set(&TOTAL_AMOUNT, &0i128);
    Ok(next)
}

// ── Tests ────────────────────────────────────────────────────────────────────
