//! # Calculator registry
//!
//! Tracks which off-chain signers ("calculators") may certify claims.
//!
//! Admission is slow and revocation is fast:
//!
//! ```text
//! Unauthorized ──propose──▶ PendingActivation ──activate (after delay)──▶ Authorized
//!       │                        ▲      │                                    │
//!       │                        └──────┘ propose (timer restarts)           │
//!       └──────────────revoke (any state, immediate)──────▶ Revoked ◀─────────┘
//! ```
//!
//! Records are never removed; a revoked calculator stays on file as
//! `Revoked` and can only return through a fresh proposal.

use soroban_sdk::{contracttype, BytesN, Env};

use crate::{clock, ContractError};

/// Seconds between `propose_calculator` and the earliest successful
/// `activate_calculator`.
pub const ACTIVATION_DELAY: u64 = 3_600;

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Types ────────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalculatorStatus {
    Unauthorized,
    PendingActivation,
    Authorized,
    Revoked,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalculatorRecord {
    /// 20-byte secp256k1 signer address.
    pub identity: BytesN<20>,
    pub status: CalculatorStatus,
    /// Only meaningful while `PendingActivation`.
    pub activation_eligible_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum RegistryKey {
    Calculator(BytesN<20>),
}

// ── Storage helpers ──────────────────────────────────────────────────────────

fn calculator_key(identity: &BytesN<20>) -> RegistryKey {
    RegistryKey::Calculator(identity.clone())
}

fn load(env: &Env, identity: &BytesN<20>) -> Option<CalculatorRecord> {
    env.storage().persistent().get(&calculator_key(identity))
}

fn store(env: &Env, record: &CalculatorRecord) {
    let key = calculator_key(&record.identity);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Create or overwrite a pending record whose timer starts now.
///
/// Re-proposing an already authorized calculator demotes it back to
/// `PendingActivation`.
pub fn propose(env: &Env, identity: &BytesN<20>) -> CalculatorRecord {
    let record = CalculatorRecord {
        identity: identity.clone(),
        status: CalculatorStatus::PendingActivation,
        activation_eligible_at: clock::after(env, ACTIVATION_DELAY),
        updated_at: clock::now(env),
    };
    store(env, &record);
    record
}

/// Promote a pending calculator once its activation delay has elapsed.
pub fn activate(env: &Env, identity: &BytesN<20>) -> Result<CalculatorRecord, ContractError> {
    let mut record = load(env, identity).ok_or(ContractError::CalculatorNotPending)?;
    if record.status != CalculatorStatus::PendingActivation {
        return Err(ContractError::CalculatorNotPending);
    }
    if !clock::has_reached(env, record.activation_eligible_at) {
        return Err(ContractError::DelayNotElapsed);
    }

    record.status = CalculatorStatus::Authorized;
    record.updated_at = clock::now(env);
    store(env, &record);
    Ok(record)
}

/// Move `identity` to `Revoked` whatever its current state, including
/// identities the registry has never seen.
pub fn revoke(env: &Env, identity: &BytesN<20>) -> CalculatorRecord {
    let activation_eligible_at = load(env, identity)
        .map(|r| r.activation_eligible_at)
        .unwrap_or(0);
    let record = CalculatorRecord {
        identity: identity.clone(),
        status: CalculatorStatus::Revoked,
        activation_eligible_at,
        updated_at: clock::now(env),
    };
    store(env, &record);
    record
}

pub fn get(env: &Env, identity: &BytesN<20>) -> Option<CalculatorRecord> {
    load(env, identity)
}

pub fn status_of(env: &Env, identity: &BytesN<20>) -> CalculatorStatus {
    load(env, identity)
        .map(|r| r.status)
        .unwrap_or(CalculatorStatus::Unauthorized)
}

pub fn is_authorized(env: &Env, identity: &BytesN<20>) -> bool {
    status_of(env, identity) == CalculatorStatus::Authorized
}

// ── Tests ────────────────────────────────────────────────────────────────────
