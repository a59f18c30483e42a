#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address,
};

use crate::test::{authorize, setup, Calculator};
use crate::{CalculatorStatus, ContractError, ACTIVATION_DELAY};

#[test]
fn test_activation_is_delayed() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let identity = Calculator::from_seed(7).identity(&env);
    assert_eq!(client.get_activation_delay(), ACTIVATION_DELAY);

    let record = client.propose_calculator(&admin, &identity);
    assert_eq!(record.status, CalculatorStatus::PendingActivation);
    assert_eq!(record.activation_eligible_at, 1_000 + ACTIVATION_DELAY);

    let res = client.try_activate_calculator(&admin, &identity);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::DelayNotElapsed);
    assert!(!client.is_authorized(&identity));

    env.ledger().set_timestamp(1_000 + ACTIVATION_DELAY);
    let record = client.activate_calculator(&admin, &identity);
    assert_eq!(record.status, CalculatorStatus::Authorized);
    assert!(client.is_authorized(&identity));
}

#[test]
fn test_pending_calculator_cannot_sign() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let calc = Calculator::from_seed(7);
    client.propose_calculator(&admin, &calc.identity(&env));
    let user = Address::generate(&env);

    let sig = calc.sign_claim(&env, &client, &user, 10);
    let res = client.try_claim_rewards(&user, &10, &sig);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::UnauthorizedSigner);
}

#[test]
fn test_revocation_is_immediate() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let calc = Calculator::from_seed(7);
    let identity = authorize(&env, &client, &admin, &calc);
    let user = Address::generate(&env);

    let sig = calc.sign_claim(&env, &client, &user, 10);
    let record = client.revoke_calculator(&admin, &identity);
    assert_eq!(record.status, CalculatorStatus::Revoked);
    assert!(!client.is_authorized(&identity));

    let res = client.try_claim_rewards(&user, &10, &sig);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::UnauthorizedSigner);
}

#[test]
fn test_revoke_pending_blocks_activation() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let identity = Calculator::from_seed(7).identity(&env);

    client.propose_calculator(&admin, &identity);
    client.revoke_calculator(&admin, &identity);

    env.ledger().set_timestamp(1_000 + ACTIVATION_DELAY);
    let res = client.try_activate_calculator(&admin, &identity);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::CalculatorNotPending);
}

#[test]
fn test_revoked_calculator_can_be_readmitted() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let calc = Calculator::from_seed(7);
    let identity = authorize(&env, &client, &admin, &calc);
    client.revoke_calculator(&admin, &identity);

    let identity_again = authorize(&env, &client, &admin, &calc);
    assert_eq!(identity, identity_again);
    assert_eq!(
        client.get_calculator(&identity).unwrap().status,
        CalculatorStatus::Authorized
    );

    let user = Address::generate(&env);
    let sig = calc.sign_claim(&env, &client, &user, 10);
    client.claim_rewards(&user, &10, &sig);
}

#[test]
fn test_reproposing_authorized_calculator_suspends_it() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let calc = Calculator::from_seed(7);
    let identity = authorize(&env, &client, &admin, &calc);

    client.propose_calculator(&admin, &identity);
    assert!(!client.is_authorized(&identity));
    assert_eq!(
        client.get_calculator(&identity).unwrap().status,
        CalculatorStatus::PendingActivation
    );
}

#[test]
fn test_registry_requires_admin() {
    let (env, client, _admin, _token) = setup(100_000, 100_000);
    let intruder = Address::generate(&env);
    let identity = Calculator::from_seed(7).identity(&env);

    let res = client.try_propose_calculator(&intruder, &identity);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);

    let res = client.try_activate_calculator(&intruder, &identity);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);

    let res = client.try_revoke_calculator(&intruder, &identity);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);

    assert!(client.get_calculator(&identity).is_none());
}

#[test]
fn test_multiple_calculators_are_independent() {
    let (env, client, admin, _token) = setup(100_000, 100_000);
    let first = Calculator::from_seed(7);
    let second = Calculator::from_seed(8);
    let first_id = authorize(&env, &client, &admin, &first);
    let second_id = authorize(&env, &client, &admin, &second);

    client.revoke_calculator(&admin, &first_id);
    assert!(client.is_authorized(&second_id));

    let user = Address::generate(&env);
    let sig = second.sign_claim(&env, &client, &user, 10);
    client.claim_rewards(&user, &10, &sig);
}
