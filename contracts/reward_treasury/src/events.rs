#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub absolute_max_claim: i128,
    pub initial_funding: i128,
    pub timestamp: u64,
}

/// Fired when a signed claim is committed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimCommittedEvent {
    pub user: Address,
    pub amount: i128,
    /// Nonce the claim was signed over.
    pub nonce: u64,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired when the administrator pays out through `emergency_claim`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyClaimEvent {
    pub admin: Address,
    pub user: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired on deposits into and withdrawals out of the treasury.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasuryMovementEvent {
    pub admin: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub admin: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Fired when `reset_all_states` opens a new epoch.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatesResetEvent {
    pub admin: Address,
    pub epoch: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalculatorProposedEvent {
    pub identity: BytesN<20>,
    pub activation_eligible_at: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalculatorChangedEvent {
    pub identity: BytesN<20>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    absolute_max_claim: i128,
    initial_funding: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            absolute_max_claim,
            initial_funding,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claim_committed(
    env: &Env,
    user: Address,
    amount: i128,
    nonce: u64,
    new_balance: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIM"), user.clone()),
        ClaimCommittedEvent {
            user,
            amount,
            nonce,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_claim(
    env: &Env,
    admin: Address,
    user: Address,
    amount: i128,
    new_balance: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_CLM"), user.clone()),
        EmergencyClaimEvent {
            admin,
            user,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposit(env: &Env, admin: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"),),
        TreasuryMovementEvent {
            admin,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdraw(env: &Env, admin: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"),),
        TreasuryMovementEvent {
            admin,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseChangedEvent {
            admin,
            paused: true,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseChangedEvent {
            admin,
            paused: false,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_states_reset(env: &Env, admin: Address, epoch: u32) {
    env.events().publish(
        (symbol_short!("RESET"),),
        StatesResetEvent {
            admin,
            epoch,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_calculator_proposed(
    env: &Env,
    identity: BytesN<20>,
    activation_eligible_at: u64,
) {
    env.events().publish(
        (symbol_short!("CALC_PRP"), identity.clone()),
        CalculatorProposedEvent {
            identity,
            activation_eligible_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_calculator_activated(env: &Env, identity: BytesN<20>) {
    env.events().publish(
        (symbol_short!("CALC_ACT"), identity.clone()),
        CalculatorChangedEvent {
            identity,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_calculator_revoked(env: &Env, identity: BytesN<20>) {
    env.events().publish(
        (symbol_short!("CALC_REV"), identity.clone()),
        CalculatorChangedEvent {
            identity,
            timestamp: env.ledger().timestamp(),
        },
    );
}
