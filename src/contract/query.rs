#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdResult, Uint256};
use cw_storage_plus::Bound;

use crate::msg::{
    ConfigResponse, GameKey, GameListItem, GameResponse, LiabilityResponse, PlayResponse, QueryMsg,
};
use crate::state::{CONFIG, GAMES, LIABILITIES, PLAYS, VERSION};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetGame { creator, token_id } => {
            to_json_binary(&query_game(deps, creator, token_id)?)
        }
        QueryMsg::GetPlay { player } => to_json_binary(&query_play(deps, player)?),
        QueryMsg::GetLiability { token_id } => to_json_binary(&query_liability(deps, token_id)?),
        QueryMsg::ListGames { start_after, limit } => {
            to_json_binary(&query_list_games(deps, start_after, limit)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let version = VERSION.load(deps.storage)?;
    Ok(ConfigResponse {
        denom: config.denom,
        deployer: config.deployer.to_string(),
        opt_in_fee: config.opt_in_fee,
        native_reserve: config.native_reserve,
        version,
    })
}

fn query_game(deps: Deps, creator: String, token_id: u64) -> StdResult<GameResponse> {
    let creator = deps.api.addr_validate(&creator)?;
    let game = GAMES.load(deps.storage, (token_id, &creator))?;
    Ok(GameResponse {
        creator: game.owner.to_string(),
        token_id: game.token_id,
        kind: game.kind,
        balance: game.balance,
        created_at_time: game.created_at_time,
        created_at_round: game.created_at_round,
        last_played_time: game.last_played_time,
        last_win_time: game.last_win_time,
        last_win_amount: game.last_win_amount,
        biggest_win_time: game.biggest_win_time,
        biggest_win_amount: game.biggest_win_amount,
        win_ratio: game.win_ratio,
    })
}

fn query_play(deps: Deps, player: String) -> StdResult<PlayResponse> {
    let player = deps.api.addr_validate(&player)?;
    let play = PLAYS.load(deps.storage, &player)?;
    Ok(PlayResponse {
        owner: play.owner.to_string(),
        state: format!("{:?}", play.state),
        win_probability: play.win_probability,
        round: play.round,
        deposit: play.deposit,
        token_id: play.token_id,
        game_creator: play.game_creator.to_string(),
    })
}

fn query_liability(deps: Deps, token_id: u64) -> StdResult<LiabilityResponse> {
    let total = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or(Uint256::zero());
    Ok(LiabilityResponse { token_id, total })
}

fn query_list_games(
    deps: Deps,
    start_after: Option<GameKey>,
    limit: Option<u32>,
) -> StdResult<Vec<GameListItem>> {
    let max_limit = limit.unwrap_or(30).min(100) as usize;
    let start_addr = start_after
        .as_ref()
        .map(|key| deps.api.addr_validate(&key.creator))
        .transpose()?;
    let start = match (&start_after, &start_addr) {
        (Some(key), Some(addr)) => Some(Bound::exclusive((key.token_id, addr))),
        _ => None,
    };

    GAMES
        .range(deps.storage, start, None, Order::Ascending)
        .take(max_limit)
        .map(|item| {
            let ((token_id, creator), game) = item?;
            Ok(GameListItem {
                creator: creator.to_string(),
                token_id,
                balance: game.balance,
                win_ratio: game.win_ratio,
                last_played_time: game.last_played_time,
                biggest_win_amount: game.biggest_win_amount,
            })
        })
        .collect()
}
