#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reward_treasury::{RewardTreasuryContract, RewardTreasuryContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Bytes, BytesN, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32 },
    Withdraw { amount: u32 },
    Claim { user: u8, amount: i64, signature: Vec<u8> },
    Emergency { user: u8, amount: i64 },
    Propose { identity: [u8; 20] },
    Activate { identity: [u8; 20] },
    Revoke { identity: [u8; 20] },
    Advance { seconds: u16 },
    TogglePause,
    Reset,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RewardTreasuryContract, ());
    let client = RewardTreasuryContractClient::new(&env, &contract_id);
    let tokens = TokenClient::new(&env, &token);

    let admin = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&admin, &i128::from(u64::MAX));
    client.initialize(&admin, &token, &1_000_000i128, &100_000i128);

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let mut expected: i128 = 100_000;

    // Signatures are arbitrary bytes, so claims should only ever fail.
    // Admin payouts and treasury movements must keep the books in step
    // with the token contract.
    for action in actions {
        match action {
            FuzzAction::Deposit { amount } => {
                if let Ok(Ok(_)) = client.try_deposit_treasury(&admin, &i128::from(amount)) {
                    expected += i128::from(amount);
                }
            }
            FuzzAction::Withdraw { amount } => {
                if let Ok(Ok(out)) = client.try_withdraw(&admin, &i128::from(amount)) {
                    expected -= out;
                }
            }
            FuzzAction::Claim { user, amount, signature } => {
                let user = &users[user as usize % users.len()];
                let sig = Bytes::from_slice(&env, &signature);
                let res = client.try_claim_rewards(user, &i128::from(amount), &sig);
                assert!(res.is_err(), "forged signature paid out");
            }
            FuzzAction::Emergency { user, amount } => {
                let user = &users[user as usize % users.len()];
                if let Ok(Ok(receipt)) = client.try_emergency_claim(&admin, user, &i128::from(amount)) {
                    assert!(amount > 0);
                    expected -= receipt.amount;
                }
            }
            FuzzAction::Propose { identity } => {
                let _ = client.try_propose_calculator(&admin, &BytesN::from_array(&env, &identity));
            }
            FuzzAction::Activate { identity } => {
                let _ = client.try_activate_calculator(&admin, &BytesN::from_array(&env, &identity));
            }
            FuzzAction::Revoke { identity } => {
                let _ = client.try_revoke_calculator(&admin, &BytesN::from_array(&env, &identity));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
            FuzzAction::TogglePause => {
                if client.is_paused() {
                    client.unpause(&admin);
                } else {
                    client.pause(&admin);
                }
            }
            FuzzAction::Reset => {
                client.reset_all_states(&admin);
            }
        }

        let stats = client.get_contract_stats();
        assert_eq!(stats.balance, expected);
        assert!(stats.balance >= 0);
        assert_eq!(tokens.balance(&contract_id), expected);
    }
});
