use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::payout;
use crate::seed;
use crate::state::{Game, Play, PlayState, CONFIG, GAMES, LIABILITIES, PLAYS};

/// Rounds after the play's round in which a claim is still honored. Past the
/// window the deposit is forfeited to the game, same accounting as a loss.
pub const CLAIM_WINDOW_ROUNDS: u64 = 100;

/// The randomness for a play is the block seed two rounds after it started,
/// unknown to every party while the play transaction could still be reordered.
pub const SEED_OFFSET_ROUNDS: u64 = 2;

/// Resolves the sender's outstanding play against the block seed.
/// A win pays out immediately; a loss (or an expired claim window) feeds the
/// deposit, minus the protocol's cut of the creator edge, back into the game.
pub fn execute_claim_game(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut play = PLAYS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::PlayNotFound {})?;
    if play.state != PlayState::Initiated {
        return Err(ContractError::PlayAlreadyResolved {});
    }

    let creator = play.game_creator.clone();
    let token_id = play.token_id;
    let mut game = GAMES
        .may_load(deps.storage, (token_id, &creator))?
        .ok_or(ContractError::Accounting("play references a missing game"))?;

    if env.block.height > play.round + CLAIM_WINDOW_ROUNDS {
        let response = resolve_as_loss(deps, &env, &info, game, play)?;
        return Ok(response.add_attribute("reason", "timeout"));
    }

    let seed = seed::query_block_seed(deps.as_ref(), play.round + SEED_OFFSET_ROUNDS)?;
    let roll = seed::roll_from_seed(&seed);
    let threshold = payout::compose_probability(play.win_probability, game.win_ratio);

    if roll >= threshold {
        let response = resolve_as_loss(deps, &env, &info, game, play)?;
        return Ok(response
            .add_attribute("roll", roll.to_string())
            .add_attribute("threshold", threshold.to_string())
            .add_attribute("seed", hex::encode(&seed)));
    }

    // win: the payout is the deposit scaled by the inverse of the player's
    // chosen probability, never by the composed one
    let win = payout::win_amount(play.deposit, play.win_probability)?;
    let now = env.block.time.seconds();
    game.last_win_amount = win;
    game.last_win_time = now;
    if win > game.biggest_win_amount {
        game.biggest_win_amount = win;
        game.biggest_win_time = now;
    }

    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    let remaining_liability = liability
        .checked_sub(win)
        .map_err(|_| ContractError::Accounting("liability cannot cover the win"))?;
    let remaining_balance = game
        .balance
        .checked_sub(win)
        .map_err(|_| ContractError::Accounting("game balance cannot cover the win"))?;
    LIABILITIES.save(deps.storage, token_id, &remaining_liability)?;
    game.balance = remaining_balance;
    GAMES.save(deps.storage, (token_id, &creator), &game)?;

    play.state = PlayState::Won;
    PLAYS.save(deps.storage, &info.sender, &play)?;

    let transfer = game.kind.transfer_msg(&config.denom, &play.owner, win)?;
    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "claim_game")
        .add_attribute("outcome", "won")
        .add_attribute("win_amount", win)
        .add_attribute("roll", roll.to_string())
        .add_attribute("threshold", threshold.to_string())
        .add_attribute("seed", hex::encode(&seed)))
}

/// Loss settlement. The creator won the deposit, so the protocol charges its
/// fee on the creator's theoretical edge; the rest grows the game pool.
fn resolve_as_loss(
    deps: DepsMut,
    _env: &Env,
    info: &MessageInfo,
    mut game: Game,
    mut play: Play,
) -> Result<Response, ContractError> {
    let token_id = play.token_id;
    let creator = play.game_creator.clone();

    let fee = payout::loss_fee(play.deposit, game.win_ratio)?;

    // the fee belongs to the protocol, not to any game
    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    let remaining = liability
        .checked_sub(fee)
        .map_err(|_| ContractError::Accounting("liability below loss fee"))?;
    LIABILITIES.save(deps.storage, token_id, &remaining)?;

    // fee is at most 20% of the deposit, the subtraction cannot underflow
    game.balance = game.balance.checked_add(play.deposit - fee)?;
    GAMES.save(deps.storage, (token_id, &creator), &game)?;

    play.state = PlayState::Lost;
    PLAYS.save(deps.storage, &info.sender, &play)?;

    Ok(Response::new()
        .add_attribute("action", "claim_game")
        .add_attribute("outcome", "lost")
        .add_attribute("deposit", play.deposit)
        .add_attribute("fee", fee))
}
