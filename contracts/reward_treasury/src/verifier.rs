//! # Claim signature verification
//!
//! Recovers the calculator that signed a claim. Pure: no storage access and
//! no authorization decision, the caller checks the recovered identity
//! against the registry.
//!
//! ## Digest protocol `claim_rewards_v2`
//!
//! ```text
//! message = "claim_rewards_v2"      16 bytes  ASCII tag
//!         || user strkey             56 bytes  ASCII, G… or C… address
//!         || claimed_total           16 bytes  i128 big-endian
//!         || nonce                    8 bytes  u64 big-endian
//!         || epoch                    4 bytes  u32 big-endian
//! digest  = keccak256(message)
//! ```
//!
//! Nonces restart at 0 after a reset, so the epoch is part of the message:
//! a signature is only ever valid within the epoch it was issued for.
//!
//! Signatures are 65 bytes, `r(32) || s(32) || v(1)` with `v` in
//! `{0, 1, 27, 28}`. Only low-s signatures are accepted, and `r` must be the
//! x-coordinate of a curve point.
//!
//! The signer identity is the last 20 bytes of keccak256 over the
//! uncompressed public key without its `0x04` prefix.
//!
//! Any change to this layout must ship under a new tag; signers and the
//! contract have to agree byte for byte.

use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, FieldBytes};
use soroban_sdk::{crypto::Hash, Address, Bytes, BytesN, Env};

use crate::ContractError;

pub const CLAIM_DIGEST_TAG: &[u8; 16] = b"claim_rewards_v2";
pub const STRKEY_LEN: usize = 56;
pub const SIGNATURE_LEN: u32 = 65;

/// secp256k1 group order `n`, big-endian.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `n / 2`, the largest canonical `s`.
const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d,
    0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

/// A signature that passed every encoding check and can be handed to the
/// host for recovery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedSignature {
    pub rs: BytesN<64>,
    pub recovery_id: u32,
}

// ── Digest ───────────────────────────────────────────────────────────────────

/// Build the `claim_rewards_v2` preimage.
pub fn claim_message(
    env: &Env,
    user: &Address,
    claimed_total: i128,
    nonce: u64,
    epoch: u32,
) -> Result<Bytes, ContractError> {
    let strkey = user.to_string();
    if strkey.len() as usize != STRKEY_LEN {
        return Err(ContractError::UnsupportedAddress);
    }
    let mut user_bytes = [0u8; STRKEY_LEN];
    strkey.copy_into_slice(&mut user_bytes);

    let mut msg = Bytes::new(env);
    msg.extend_from_array(CLAIM_DIGEST_TAG);
    msg.extend_from_array(&user_bytes);
    msg.extend_from_array(&claimed_total.to_be_bytes());
    msg.extend_from_array(&nonce.to_be_bytes());
    msg.extend_from_array(&epoch.to_be_bytes());
    Ok(msg)
}

pub fn claim_digest(
    env: &Env,
    user: &Address,
    claimed_total: i128,
    nonce: u64,
    epoch: u32,
) -> Result<Hash<32>, ContractError> {
    let msg = claim_message(env, user, claimed_total, nonce, epoch)?;
    Ok(env.crypto().keccak256(&msg))
}

// ── Signature decoding ───────────────────────────────────────────────────────

fn is_zero(scalar: &[u8; 32]) -> bool {
    scalar.iter().all(|b| *b == 0)
}

/// Whether `r` is the x-coordinate of a secp256k1 point. The host traps on
/// recovery otherwise.
fn lifts_to_curve(r: &[u8; 32], recovery_id: u32) -> bool {
    let x = FieldBytes::from(*r);
    let y_is_odd = Choice::from((recovery_id & 1) as u8);
    AffinePoint::decompress(&x, y_is_odd).is_some().into()
}

/// Reject malformed encodings, out-of-range scalars and high-s malleable
/// signatures, with `MalformedSignature`.
pub fn parse_signature(env: &Env, signature: &Bytes) -> Result<ParsedSignature, ContractError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(ContractError::MalformedSignature);
    }
    let mut raw = [0u8; 65];
    signature.copy_into_slice(&mut raw);

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..64]);

    let recovery_id = match raw[64] {
        0 | 1 => raw[64] as u32,
        27 | 28 => (raw[64] - 27) as u32,
        _ => return Err(ContractError::MalformedSignature),
    };
    if is_zero(&r) || r >= CURVE_ORDER {
        return Err(ContractError::MalformedSignature);
    }
    if is_zero(&s) || s > HALF_CURVE_ORDER {
        return Err(ContractError::MalformedSignature);
    }
    if !lifts_to_curve(&r, recovery_id) {
        return Err(ContractError::MalformedSignature);
    }

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&raw[..64]);
    Ok(ParsedSignature {
        rs: BytesN::from_array(env, &rs),
        recovery_id,
    })
}

// ── Recovery ─────────────────────────────────────────────────────────────────

/// 20-byte identity of an uncompressed secp256k1 public key.
pub fn identity_from_public_key(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let hash: BytesN<32> = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &key[1..]))
        .into();
    let hash = hash.to_array();
    let mut identity = [0u8; 20];
    identity.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &identity)
}

/// Recover the identity that signed `digest`.
pub fn recover_signer(
    env: &Env,
    digest: &Hash<32>,
    signature: &Bytes,
) -> Result<BytesN<20>, ContractError> {
    let parsed = parse_signature(env, signature)?;
    let public_key = env
        .crypto()
        .secp256k1_recover(digest, &parsed.rs, parsed.recovery_id);
    Ok(identity_from_public_key(env, &public_key))
}

// ── Tests ────────────────────────────────────────────────────────────────────
