use cosmwasm_std::{OverflowError, StdError, Uint128, Uint256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Overflow(#[from] OverflowError),

    #[error("unauthorized")]
    Unauthorized {},

    #[error("win ratio must be at most 1000000, got {value}")]
    RatioOutOfRange { value: u64 },

    #[error("win probability must be at most 1000000, got {value}")]
    ProbabilityOutOfRange { value: u64 },

    #[error("win probability 0 can never win")]
    ZeroWinProbability {},

    #[error("no deposit sent in denom {denom}")]
    NoDeposit { denom: String },

    #[error("token {token_id} is not registered")]
    TokenNotRegistered { token_id: u64 },

    #[error("token {token_id} is already registered")]
    TokenAlreadyRegistered { token_id: u64 },

    #[error("this asset is already registered as token {token_id}")]
    AssetAlreadyRegistered { token_id: u64 },

    #[error("registration fee must be exactly {expected}{denom}")]
    WrongOptInFee { expected: Uint128, denom: String },

    #[error("the game uses a different token kind")]
    TokenKindMismatch {},

    #[error("the game for this asset does not exist")]
    GameNotFound {},

    #[error("did not find the game you are playing")]
    PlayNotFound {},

    #[error("your previous play has not been claimed yet")]
    PlayPending {},

    #[error("this play is already resolved")]
    PlayAlreadyResolved {},

    #[error("potential win {requested} exceeds half of the game balance ({max})")]
    ExposureTooLarge { max: Uint256, requested: Uint256 },

    #[error("game balance {available} is less than requested {requested}")]
    InsufficientGameBalance {
        available: Uint256,
        requested: Uint256,
    },

    #[error("withdrawable surplus {available} is less than requested {requested}")]
    InsufficientSurplus {
        available: Uint256,
        requested: Uint256,
    },

    /// Ledger accounting broke an invariant. Unreachable in correct operation.
    #[error("accounting invariant violated: {0}")]
    Accounting(&'static str),
}
