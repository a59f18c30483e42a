#![allow(dead_code)]

use k256::ecdsa::{RecoveryId, SigningKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use reward_treasury::{verifier, RewardTreasuryContract, RewardTreasuryContractClient, ACTIVATION_DELAY};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Bytes, BytesN, Env,
};

pub const ADMIN_MINT: i128 = 1_000_000_000_000;

pub struct TestContext {
    pub env: Env,
    pub client: RewardTreasuryContractClient<'static>,
    pub admin: Address,
    pub token: Address,
    pub calculator: SigningKey,
}

/// Deploys a funded treasury with one authorized calculator.
pub fn setup_funded(absolute_max_claim: i128, initial_funding: i128) -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(RewardTreasuryContract, ());
    let client = RewardTreasuryContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    StellarAssetClient::new(&env, &token).mint(&admin, &ADMIN_MINT);
    client.initialize(&admin, &token, &absolute_max_claim, &initial_funding);

    let calculator = SigningKey::from_slice(&[7u8; 32]).unwrap();
    let identity = identity_of(&env, &calculator);
    client.propose_calculator(&admin, &identity);
    env.ledger().set_timestamp(1_000 + ACTIVATION_DELAY);
    client.activate_calculator(&admin, &identity);

    TestContext {
        env,
        client,
        admin,
        token,
        calculator,
    }
}

pub fn identity_of(env: &Env, key: &SigningKey) -> BytesN<20> {
    let point = key.verifying_key().to_encoded_point(false);
    let mut raw = [0u8; 65];
    raw.copy_from_slice(point.as_bytes());
    verifier::identity_from_public_key(env, &BytesN::from_array(env, &raw))
}

/// Signature over the claim `user` can submit next for `amount`.
pub fn sign_claim(ctx: &TestContext, user: &Address, amount: i128) -> Bytes {
    let digest = ctx.client.get_claim_digest(user, &amount);
    let (sig, recid) = ctx
        .calculator
        .sign_prehash_recoverable(&digest.to_array())
        .unwrap();
    let (sig, recid) = match sig.normalize_s() {
        Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
        None => (sig, recid),
    };
    let mut raw = [0u8; 65];
    raw[..64].copy_from_slice(&sig.to_bytes());
    raw[64] = 27 + recid.to_byte();
    Bytes::from_array(&ctx.env, &raw)
}
