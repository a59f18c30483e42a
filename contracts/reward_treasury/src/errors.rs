use soroban_sdk::contracterror;

/// Error codes returned by every reward-treasury entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
/// | 50 – 59 | Treasury resources             |
///
/// Discriminants are part of the public interface: off-chain callers match on
/// them, so existing values must never be renumbered.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// Caller is not the administrator.
    Unauthorized = 10,
    /// The recovered claim signer is not an authorized calculator.
    UnauthorizedSigner = 11,
    /// `activate_calculator` called before the activation delay elapsed.
    DelayNotElapsed = 12,
    /// `activate_calculator` called for a calculator that is not pending.
    CalculatorNotPending = 13,

    // ── Validation (30–39) ───────────────────────────────────
    /// Wrong length, bad recovery id, zero/out-of-range scalar or high-s.
    MalformedSignature = 30,
    /// Per-claim or lifetime cap exceeded.
    ExceedsMaximum = 31,
    /// Amount must be strictly positive (zero is only valid for `withdraw`).
    InvalidAmount = 32,
    /// Address has no fixed-width strkey encoding usable in a claim digest.
    UnsupportedAddress = 33,

    // ── Contract state (40–49) ───────────────────────────────
    Paused = 40,

    // ── Resources (50–59) ────────────────────────────────────
    InsufficientBalance = 50,
    ArithmeticOverflow = 51,
    /// Stored balance was found negative. Fatal: the call aborts.
    BalanceInvariantViolated = 52,
}

/// Coarse classification used by callers to decide whether resubmission
/// makes sense.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Lifecycle,
    Authorization,
    Validation,
    State,
    Resource,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Lifecycle
            }
            ContractError::Unauthorized
            | ContractError::UnauthorizedSigner
            | ContractError::DelayNotElapsed
            | ContractError::CalculatorNotPending => ErrorCategory::Authorization,
            ContractError::MalformedSignature
            | ContractError::ExceedsMaximum
            | ContractError::InvalidAmount
            | ContractError::UnsupportedAddress => ErrorCategory::Validation,
            ContractError::Paused => ErrorCategory::State,
            ContractError::InsufficientBalance
            | ContractError::ArithmeticOverflow
            | ContractError::BalanceInvariantViolated => ErrorCategory::Resource,
        }
    }
}
