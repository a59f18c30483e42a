#![no_std]

//! Signed-claim reward treasury.
//!
//! The contract holds a pooled balance of one token and pays portions of it
//! to users who present a claim signed by an authorized calculator. Each
//! claim is bound to the user's current nonce and the epoch, so a signature
//! pays out at most once, and every payout is capped per claim and per
//! epoch.
//!
//! Every entry point either commits all of its writes or returns an error
//! with none of them applied.

pub mod access;
pub mod clock;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod treasury;
pub mod verifier;

pub use errors::{ContractError, ErrorCategory};
pub use ledger::UserClaimRecord;
pub use registry::{CalculatorRecord, CalculatorStatus, ACTIVATION_DELAY};

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Public-facing types ──────────────────────────────────────────────────────

/// Deploy-time configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractConfig {
    pub admin: Address,
    /// SEP-41 token whose balance the treasury pools.
    pub token: Address,
    /// Hard ceiling for a single claim and for a user's total within an epoch.
    pub absolute_max_claim: i128,
}

/// Snapshot returned by `get_contract_stats`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractStats {
    pub balance: i128,
    pub total_claims_processed: u64,
    pub total_amount_claimed: i128,
    pub absolute_max_claim: i128,
    pub paused: bool,
    pub epoch: u32,
}

/// Returned by every committed payout.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimReceipt {
    pub user: Address,
    pub amount: i128,
    /// Nonce the claim consumed; for emergency claims the user's unchanged
    /// current nonce.
    pub nonce: u64,
    pub new_balance: i128,
    pub timestamp: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardTreasuryContract;

#[contractimpl]
impl RewardTreasuryContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `token`              – SEP-41 token held by the treasury.
    /// * `absolute_max_claim` – immutable per-claim and per-epoch user cap.
    /// * `initial_funding`    – amount pulled from `admin` into custody; may be 0.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        absolute_max_claim: i128,
        initial_funding: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&CONFIG) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        if absolute_max_claim <= 0 || initial_funding < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let cfg = ContractConfig {
            admin: admin.clone(),
            token: token.clone(),
            absolute_max_claim,
        };
        env.storage().instance().set(&CONFIG, &cfg);
        access::set_admin(&env, &admin);
        treasury::init(&env, absolute_max_claim);

        if initial_funding > 0 {
            treasury::pull_in(&env, &token, &admin, initial_funding);
            treasury::credit(&env, initial_funding)?;
        }
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, admin, token, absolute_max_claim, initial_funding);

        Ok(())
    }

    // ── Claims ──────────────────────────────────────────────────────────────

    /// Pay `claimed_total` to `user` against a calculator signature over
    /// `(user, claimed_total, current_nonce(user), epoch)`.
    ///
    /// Checks run in a fixed order and nothing is written until all of them
    /// pass: pause, amount, cap, signature decoding, signer authorization,
    /// solvency.
    pub fn claim_rewards(
        env: Env,
        user: Address,
        claimed_total: i128,
        signature: Bytes,
    ) -> Result<ClaimReceipt, ContractError> {
        let cfg = Self::load_config(&env)?;
        user.require_auth();

        // 1. Validate.
        access::require_not_paused(&env)?;
        if claimed_total <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let record = ledger::get_record(&env, &user);
        ledger::ensure_within_cap(&record, claimed_total, cfg.absolute_max_claim)?;

        let epoch = ledger::epoch(&env);
        let digest = verifier::claim_digest(&env, &user, claimed_total, record.nonce, epoch)?;
        let signer = verifier::recover_signer(&env, &digest, &signature)?;
        if !registry::is_authorized(&env, &signer) {
            return Err(ContractError::UnauthorizedSigner);
        }
        treasury::ensure_solvent(&env, claimed_total)?;

        // 2. Commit.
        let new_balance = treasury::debit(&env, claimed_total)?;
        ledger::record_claim(&env, &user, claimed_total)?;
        Self::extend_instance_ttl(&env);

        // 3. Pay out.
        treasury::pay_out(&env, &cfg.token, &user, claimed_total);

        events::publish_claim_committed(
            &env,
            user.clone(),
            claimed_total,
            record.nonce,
            new_balance,
        );

        Ok(ClaimReceipt {
            user,
            amount: claimed_total,
            nonce: record.nonce,
            new_balance,
            timestamp: clock::now(&env),
        })
    }

    /// Administrator payout that skips signature and nonce checks.
    ///
    /// Ignores the pause flag. Marks the user as having interacted and
    /// counts toward the global totals, but leaves the user's nonce and
    /// cumulative total untouched.
    pub fn emergency_claim(
        env: Env,
        admin: Address,
        user: Address,
        amount: i128,
    ) -> Result<ClaimReceipt, ContractError> {
        let cfg = Self::load_config(&env)?;
        access::require_admin(&env, &admin)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        treasury::ensure_solvent(&env, amount)?;

        let new_balance = treasury::debit(&env, amount)?;
        let record = ledger::record_emergency_claim(&env, &user, amount)?;
        Self::extend_instance_ttl(&env);

        treasury::pay_out(&env, &cfg.token, &user, amount);

        events::publish_emergency_claim(&env, admin, user.clone(), amount, new_balance);

        Ok(ClaimReceipt {
            user,
            amount,
            nonce: record.nonce,
            new_balance,
            timestamp: clock::now(&env),
        })
    }

    // ── Calculator management ───────────────────────────────────────────────

    /// Start (or restart) the activation timer for `identity`.
    pub fn propose_calculator(
        env: Env,
        admin: Address,
        identity: BytesN<20>,
    ) -> Result<CalculatorRecord, ContractError> {
        access::require_admin(&env, &admin)?;

        let record = registry::propose(&env, &identity);

        events::publish_calculator_proposed(&env, identity, record.activation_eligible_at);

        Ok(record)
    }

    /// Authorize a pending calculator once `ACTIVATION_DELAY` has elapsed.
    pub fn activate_calculator(
        env: Env,
        admin: Address,
        identity: BytesN<20>,
    ) -> Result<CalculatorRecord, ContractError> {
        access::require_admin(&env, &admin)?;

        let record = registry::activate(&env, &identity)?;

        events::publish_calculator_activated(&env, identity);

        Ok(record)
    }

    /// Revoke `identity` immediately, whatever its current state.
    pub fn revoke_calculator(
        env: Env,
        admin: Address,
        identity: BytesN<20>,
    ) -> Result<CalculatorRecord, ContractError> {
        access::require_admin(&env, &admin)?;

        let record = registry::revoke(&env, &identity);

        events::publish_calculator_revoked(&env, identity);

        Ok(record)
    }

    // ── Treasury management ─────────────────────────────────────────────────

    /// Pull `amount` tokens from `admin` into custody and credit the pool.
    /// Returns the new balance.
    pub fn deposit_treasury(env: Env, admin: Address, amount: i128) -> Result<i128, ContractError> {
        let cfg = Self::load_config(&env)?;
        access::require_admin(&env, &admin)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        treasury::pull_in(&env, &cfg.token, &admin, amount);
        let new_balance = treasury::credit(&env, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_deposit(&env, admin, amount, new_balance);

        Ok(new_balance)
    }

    /// Send `amount` tokens from the pool to `admin`; `0` withdraws the
    /// entire balance. Returns the amount withdrawn.
    pub fn withdraw(env: Env, admin: Address, amount: i128) -> Result<i128, ContractError> {
        let cfg = Self::load_config(&env)?;
        access::require_admin(&env, &admin)?;

        let amount = treasury::resolve_withdrawal(&env, amount)?;
        let new_balance = treasury::debit(&env, amount)?;
        Self::extend_instance_ttl(&env);

        treasury::pay_out(&env, &cfg.token, &admin, amount);

        events::publish_withdraw(&env, admin, amount, new_balance);

        Ok(amount)
    }

    // ── Control plane ───────────────────────────────────────────────────────

    pub fn pause(env: Env, admin: Address) -> Result<(), ContractError> {
        access::require_admin(&env, &admin)?;
        access::set_paused(&env, true);
        events::publish_paused(&env, admin);
        Ok(())
    }

    pub fn unpause(env: Env, admin: Address) -> Result<(), ContractError> {
        access::require_admin(&env, &admin)?;
        access::set_paused(&env, false);
        events::publish_unpaused(&env, admin);
        Ok(())
    }

    /// Zero every user record and the global counters by opening a new
    /// epoch. The treasury balance is not touched. Returns the new epoch.
    ///
    /// Nonces restart at 0, but claim digests are bound to the epoch, so
    /// signatures issued before the reset stay spent.
    pub fn reset_all_states(env: Env, admin: Address) -> Result<u32, ContractError> {
        access::require_admin(&env, &admin)?;

        let epoch = ledger::reset_all(&env)?;
        Self::extend_instance_ttl(&env);

        events::publish_states_reset(&env, admin, epoch);

        Ok(epoch)
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn get_user_stats(env: Env, user: Address) -> UserClaimRecord {
        ledger::get_record(&env, &user)
    }

    pub fn get_contract_stats(env: Env) -> Result<ContractStats, ContractError> {
        let absolute_max_claim = treasury::absolute_max_claim(&env)?;
        Ok(ContractStats {
            balance: treasury::balance(&env),
            total_claims_processed: ledger::total_claims_processed(&env),
            total_amount_claimed: ledger::total_amount_claimed(&env),
            absolute_max_claim,
            paused: access::is_paused(&env),
            epoch: ledger::epoch(&env),
        })
    }

    /// The nonce a calculator must sign into the user's next claim.
    pub fn current_nonce(env: Env, user: Address) -> u64 {
        ledger::current_nonce(&env, &user)
    }

    /// Whether a claim of `amount` by `user` would pass every check except
    /// the signature.
    pub fn can_claim(env: Env, user: Address, amount: i128) -> bool {
        let Ok(max) = treasury::absolute_max_claim(&env) else {
            return false;
        };
        if access::is_paused(&env) || amount <= 0 {
            return false;
        }
        let record = ledger::get_record(&env, &user);
        ledger::ensure_within_cap(&record, amount, max).is_ok()
            && treasury::ensure_solvent(&env, amount).is_ok()
    }

    /// Digest a calculator must sign for `user` to claim `claimed_total`
    /// at the user's current nonce in the current epoch.
    pub fn get_claim_digest(
        env: Env,
        user: Address,
        claimed_total: i128,
    ) -> Result<BytesN<32>, ContractError> {
        let nonce = ledger::current_nonce(&env, &user);
        let digest =
            verifier::claim_digest(&env, &user, claimed_total, nonce, ledger::epoch(&env))?;
        Ok(digest.into())
    }

    pub fn is_authorized(env: Env, identity: BytesN<20>) -> bool {
        registry::is_authorized(&env, &identity)
    }

    pub fn get_calculator(env: Env, identity: BytesN<20>) -> Option<CalculatorRecord> {
        registry::get(&env, &identity)
    }

    pub fn get_activation_delay() -> u64 {
        ACTIVATION_DELAY
    }

    pub fn is_paused(env: Env) -> bool {
        access::is_paused(&env)
    }

    pub fn get_epoch(env: Env) -> u32 {
        ledger::epoch(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        access::get_admin(&env)
    }

    pub fn get_config(env: Env) -> Result<ContractConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&CONFIG)
    }

    pub fn version() -> u32 {
        1
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn load_config(env: &Env) -> Result<ContractConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_registry;
