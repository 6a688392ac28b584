use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Uint128, Uint256};

pub use crate::state::TokenKind;

#[cw_serde]
pub struct InstantiateMsg {
    /// Denom of the chain's native coin (token id 0).
    pub denom: String,
    /// Native fee for registering a new token id. Defaults to 10_000_000.
    pub opt_in_fee: Option<Uint128>,
    /// Native balance the contract must keep out of admin withdrawals.
    /// Defaults to zero.
    pub native_reserve: Option<Uint256>,
}

/// Identifies a game: games are keyed by (creator, token id).
#[cw_serde]
pub struct GameKey {
    pub creator: String,
    pub token_id: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Create a game, or top up and re-price an existing one. The deposit
    // rides along: native/fungible in funds, contract tokens via allowance.
    CreateGameWithNativeToken {
        win_ratio: u64,
    },
    CreateGameWithFungibleToken {
        token_id: u64,
        win_ratio: u64,
    },
    CreateGameWithContractToken {
        token_id: u64,
        amount: Uint256,
        win_ratio: u64,
    },
    // Start a play against an existing game. One outstanding play per player.
    StartGameWithNativeToken {
        game: GameKey,
        win_probability: u64,
    },
    StartGameWithFungibleToken {
        game: GameKey,
        win_probability: u64,
    },
    StartGameWithContractToken {
        game: GameKey,
        amount: Uint256,
        win_probability: u64,
    },
    // Resolve the sender's outstanding play against the block seed.
    ClaimGame {},
    // Game owners withdraw from their pool; the deployer withdraws surplus
    // not owed to any game or play. Amount zero means "everything available".
    Withdraw {
        receiver: String,
        amount: Uint256,
        token_id: u64,
    },
    // Permissionless, fee-gated registration of a new token id.
    RegisterToken {
        token_id: u64,
        kind: TokenKind,
    },
    // Deployer-only version bump.
    UpdateVersion {
        version: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    GetConfig {},
    #[returns(GameResponse)]
    GetGame { creator: String, token_id: u64 },
    #[returns(PlayResponse)]
    GetPlay { player: String },
    #[returns(LiabilityResponse)]
    GetLiability { token_id: u64 },
    #[returns(Vec<GameListItem>)]
    ListGames {
        start_after: Option<GameKey>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub denom: String,
    pub deployer: String,
    pub opt_in_fee: Uint128,
    pub native_reserve: Uint256,
    pub version: String,
}

#[cw_serde]
pub struct GameResponse {
    pub creator: String,
    pub token_id: u64,
    pub kind: TokenKind,
    pub balance: Uint256,
    pub created_at_time: u64,
    pub created_at_round: u64,
    pub last_played_time: u64,
    pub last_win_time: u64,
    pub last_win_amount: Uint256,
    pub biggest_win_time: u64,
    pub biggest_win_amount: Uint256,
    pub win_ratio: u64,
}

#[cw_serde]
pub struct PlayResponse {
    pub owner: String,
    pub state: String,
    pub win_probability: u64,
    pub round: u64,
    pub deposit: Uint256,
    pub token_id: u64,
    pub game_creator: String,
}

#[cw_serde]
pub struct LiabilityResponse {
    pub token_id: u64,
    pub total: Uint256,
}

#[cw_serde]
pub struct GameListItem {
    pub creator: String,
    pub token_id: u64,
    pub balance: Uint256,
    pub win_ratio: u64,
    pub last_played_time: u64,
    pub biggest_win_amount: Uint256,
}
