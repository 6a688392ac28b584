use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

/// Token id of the chain's native coin. Always registered, never in TOKENS.
pub const NATIVE_TOKEN_ID: u64 = 0;

#[cw_serde]
pub struct Config {
    /// Denom of the native coin (token id 0).
    pub denom: String,
    /// Original deployer. May update the version and withdraw protocol surplus.
    pub deployer: Addr,
    /// Flat native fee charged for registering a new token id.
    pub opt_in_fee: Uint128,
    /// Native balance the contract must keep; excluded from admin withdrawals.
    pub native_reserve: Uint256,
}

/// How a token id moves value on this chain.
#[cw_serde]
pub enum TokenKind {
    Native,
    /// A bank denom distinct from the native coin.
    Fungible { denom: String },
    /// A cw20-style token contract (transfer / transfer_from / balance).
    Contract { address: Addr },
}

#[cw_serde]
pub struct Game {
    /// Liquidity pool backing wins, in the game token's base units.
    pub balance: Uint256,
    pub token_id: u64,
    pub kind: TokenKind,
    pub created_at_time: u64,
    pub created_at_round: u64,
    pub last_played_time: u64,
    pub last_win_time: u64,
    pub last_win_amount: Uint256,
    pub biggest_win_time: u64,
    pub biggest_win_amount: Uint256,
    /// Creator-chosen multiplier on every player's probability,
    /// fixed-point over 1_000_000. Public; games compete on it.
    pub win_ratio: u64,
    pub owner: Addr,
}

#[cw_serde]
pub enum PlayState {
    Initiated,
    Won,
    Lost,
}

/// One outstanding play per player. Overwritten by the next start once resolved.
#[cw_serde]
pub struct Play {
    pub state: PlayState,
    /// Player-chosen win probability, fixed-point over 1_000_000.
    pub win_probability: u64,
    /// Height at which the play was started. Randomness is sampled at round + 2
    /// and the claim window closes at round + 100.
    pub round: u64,
    pub deposit: Uint256,
    pub token_id: u64,
    pub game_creator: Addr,
    pub owner: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const VERSION: Item<String> = Item::new("version");

/// Games keyed by (token id, creator).
pub const GAMES: Map<(u64, &Addr), Game> = Map::new("games");
/// In-flight plays keyed by player.
pub const PLAYS: Map<&Addr, Play> = Map::new("plays");
/// Per-token sum of everything owed to games and plays. Bounds admin withdrawals.
pub const LIABILITIES: Map<u64, Uint256> = Map::new("liabilities");
/// Registered token ids. Immutable once set.
pub const TOKENS: Map<u64, TokenKind> = Map::new("tokens");
