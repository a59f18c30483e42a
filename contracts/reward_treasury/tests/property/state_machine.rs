//! Replay protection and epoch resets.
//!
//! Invariants tested:
//! - Each signature pays out once: replaying any earlier signature fails
//! - The nonce advances by exactly one per committed signed claim
//! - After `reset_all_states` every record and counter reads zero and the
//!   next claim is signed at nonce 0
//! - Signatures spent before a reset cannot be replayed after it

use proptest::prelude::*;
use reward_treasury::{ContractError, UserClaimRecord};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::common::{setup_funded, sign_claim};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_signatures_never_replay(
        amounts in prop::collection::vec(1i128..=1_000, 1..8),
    ) {
        let ctx = setup_funded(1_000_000, 1_000_000);
        let user = Address::generate(&ctx.env);
        let mut used = Vec::new();

        for (i, amount) in amounts.iter().enumerate() {
            let sig = sign_claim(&ctx, &user, *amount);
            let receipt = ctx.client.claim_rewards(&user, amount, &sig);
            prop_assert_eq!(receipt.nonce, i as u64);
            prop_assert_eq!(ctx.client.current_nonce(&user), i as u64 + 1);
            used.push((*amount, sig));
        }

        let balance = ctx.client.get_contract_stats().balance;
        for (amount, sig) in used.iter() {
            let result = ctx.client.try_claim_rewards(&user, amount, sig);
            prop_assert_eq!(result.unwrap_err().unwrap(), ContractError::UnauthorizedSigner);
        }
        prop_assert_eq!(ctx.client.get_contract_stats().balance, balance);
        prop_assert_eq!(ctx.client.current_nonce(&user), amounts.len() as u64);
    }

    #[test]
    fn prop_reset_is_complete(
        claims in prop::collection::vec((0usize..4, 1i128..=500), 1..10),
        emergencies in prop::collection::vec((0usize..4, 1i128..=500), 0..4),
    ) {
        let ctx = setup_funded(10_000, 1_000_000);
        let users: Vec<Address> = (0..4).map(|_| Address::generate(&ctx.env)).collect();

        let mut spent = Vec::new();
        for (who, amount) in claims {
            let sig = sign_claim(&ctx, &users[who], amount);
            ctx.client.claim_rewards(&users[who], &amount, &sig);
            spent.push((who, amount, sig));
        }
        for (who, amount) in emergencies {
            ctx.client.emergency_claim(&ctx.admin, &users[who], &amount);
        }
        let balance = ctx.client.get_contract_stats().balance;

        ctx.client.reset_all_states(&ctx.admin);

        for user in users.iter() {
            prop_assert_eq!(ctx.client.get_user_stats(user), UserClaimRecord::empty());
            prop_assert_eq!(ctx.client.current_nonce(user), 0);
        }
        let stats = ctx.client.get_contract_stats();
        prop_assert_eq!(stats.total_claims_processed, 0);
        prop_assert_eq!(stats.total_amount_claimed, 0);
        prop_assert_eq!(stats.balance, balance);

        for (who, amount, sig) in spent.iter() {
            let result = ctx.client.try_claim_rewards(&users[*who], amount, sig);
            prop_assert_eq!(result.unwrap_err().unwrap(), ContractError::UnauthorizedSigner);
        }
        prop_assert_eq!(ctx.client.get_contract_stats().balance, balance);

        let sig = sign_claim(&ctx, &users[0], 1);
        prop_assert_eq!(ctx.client.claim_rewards(&users[0], &1, &sig).nonce, 0);
    }
}
