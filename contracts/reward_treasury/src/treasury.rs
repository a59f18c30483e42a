use soroban_sdk::{symbol_short, token, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const BALANCE: Symbol = symbol_short!("BALANCE");
const MAX_CLAIM: Symbol = symbol_short!("MAX_CLM");

// ── Setup ────────────────────────────────────────────────────────────────────

/// Fix the per-claim ceiling. Written once by `initialize`, never again.
pub fn init(env: &Env, absolute_max_claim: i128) {
    env.storage().instance().set(&MAX_CLAIM, &absolute_max_claim);
    env.storage().instance().set(&BALANCE, &0i128);
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn balance(env: &Env) -> i128 {
    env.storage().instance().get(&BALANCE).unwrap_or(0)
}

pub fn absolute_max_claim(env: &Env) -> Result<i128, ContractError> {
    env.storage()
        .instance()
        .get(&MAX_CLAIM)
        .ok_or(ContractError::NotInitialized)
}

fn checked_balance(env: &Env) -> Result<i128, ContractError> {
    let current = balance(env);
    if current < 0 {
        return Err(ContractError::BalanceInvariantViolated);
    }
    Ok(current)
}

/// Fail with `InsufficientBalance` unless the pool covers `amount`.
pub fn ensure_solvent(env: &Env, amount: i128) -> Result<(), ContractError> {
    if amount > checked_balance(env)? {
        return Err(ContractError::InsufficientBalance);
    }
    Ok(())
}

/// Translate a withdrawal request into a concrete amount.
///
/// `0` means "everything"; an empty treasury has nothing to withdraw.
pub fn resolve_withdrawal(env: &Env, requested: i128) -> Result<i128, ContractError> {
    if requested < 0 {
        return Err(ContractError::InvalidAmount);
    }
    let current = checked_balance(env)?;
    let amount = if requested == 0 { current } else { requested };
    if amount == 0 || amount > current {
        return Err(ContractError::InsufficientBalance);
    }
    Ok(amount)
}

// ── Writes ───────────────────────────────────────────────────────────────────

/// Increase the pooled balance. Returns the new balance.
pub fn credit(env: &Env, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let next = checked_balance(env)?
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&BALANCE, &next);
    Ok(next)
}

/// Decrease the pooled balance. Returns the new balance.
pub fn debit(env: &Env, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let current = checked_balance(env)?;
    if amount > current {
        return Err(ContractError::InsufficientBalance);
    }
    let next = current - amount;
    env.storage().instance().set(&BALANCE, &next);
    Ok(next)
}

// ── Custody ──────────────────────────────────────────────────────────────────

/// Move `amount` of the pooled asset from `from` into contract custody.
pub fn pull_in(env: &Env, asset: &Address, from: &Address, amount: i128) {
    token::Client::new(env, asset).transfer(from, &env.current_contract_address(), &amount);
}

/// Pay `amount` of the pooled asset out of contract custody to `to`.
///
/// Always the last step of an operation: it runs after every ledger write so
/// a failing transfer aborts the whole invocation.
pub fn pay_out(env: &Env, asset: &Address, to: &Address, amount: i128) {
    token::Client::new(env, asset).transfer(&env.current_contract_address(), to, &amount);
}

// ── Tests ────────────────────────────────────────────────────────────────────
