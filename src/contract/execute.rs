#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    Addr, DepsMut, Env, MessageInfo, Order, Response, StdError, Storage, Uint256,
};

use crate::contract::claim::execute_claim_game;
use crate::error::ContractError;
use crate::msg::{ExecuteMsg, GameKey};
use crate::payout;
use crate::state::{
    Config, Game, Play, PlayState, TokenKind, CONFIG, GAMES, LIABILITIES, NATIVE_TOKEN_ID, PLAYS,
    TOKENS, VERSION,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateGameWithNativeToken { win_ratio } => {
            execute_create_game_native(deps, env, info, win_ratio)
        }
        ExecuteMsg::CreateGameWithFungibleToken { token_id, win_ratio } => {
            execute_create_game_fungible(deps, env, info, token_id, win_ratio)
        }
        ExecuteMsg::CreateGameWithContractToken {
            token_id,
            amount,
            win_ratio,
        } => execute_create_game_contract(deps, env, info, token_id, amount, win_ratio),
        ExecuteMsg::StartGameWithNativeToken {
            game,
            win_probability,
        } => execute_start_game_native(deps, env, info, game, win_probability),
        ExecuteMsg::StartGameWithFungibleToken {
            game,
            win_probability,
        } => execute_start_game_fungible(deps, env, info, game, win_probability),
        ExecuteMsg::StartGameWithContractToken {
            game,
            amount,
            win_probability,
        } => execute_start_game_contract(deps, env, info, game, amount, win_probability),
        ExecuteMsg::ClaimGame {} => execute_claim_game(deps, env, info),
        ExecuteMsg::Withdraw {
            receiver,
            amount,
            token_id,
        } => execute_withdraw(deps, env, info, receiver, amount, token_id),
        ExecuteMsg::RegisterToken { token_id, kind } => {
            execute_register_token(deps, info, token_id, kind)
        }
        ExecuteMsg::UpdateVersion { version } => execute_update_version(deps, info, version),
    }
}

/// Deposit carried in `info.funds` for the given denom. Funds are always sent
/// by `info.sender`, so the "app caller must equal transfer sender" rule holds
/// by construction here.
fn funds_in_denom(info: &MessageInfo, denom: &str) -> Result<Uint256, ContractError> {
    let amount = info
        .funds
        .iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or_default();
    if amount.is_zero() {
        return Err(ContractError::NoDeposit {
            denom: denom.to_string(),
        });
    }
    Ok(amount)
}

/// Resolves a token id to its registered kind. Id 0 is always the native coin.
pub fn registered_kind(storage: &dyn Storage, token_id: u64) -> Result<TokenKind, ContractError> {
    if token_id == NATIVE_TOKEN_ID {
        return Ok(TokenKind::Native);
    }
    TOKENS
        .may_load(storage, token_id)?
        .ok_or(ContractError::TokenNotRegistered { token_id })
}

pub fn execute_create_game_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    win_ratio: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = funds_in_denom(&info, &config.denom)?;
    create_or_fund_game(
        deps,
        env,
        info,
        NATIVE_TOKEN_ID,
        TokenKind::Native,
        amount,
        win_ratio,
    )
}

pub fn execute_create_game_fungible(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    win_ratio: u64,
) -> Result<Response, ContractError> {
    let kind = registered_kind(deps.storage, token_id)?;
    let denom = match &kind {
        TokenKind::Fungible { denom } => denom.clone(),
        _ => return Err(ContractError::TokenKindMismatch {}),
    };
    let amount = funds_in_denom(&info, &denom)?;
    create_or_fund_game(deps, env, info, token_id, kind, amount, win_ratio)
}

pub fn execute_create_game_contract(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    amount: Uint256,
    win_ratio: u64,
) -> Result<Response, ContractError> {
    let kind = registered_kind(deps.storage, token_id)?;
    let address = match &kind {
        TokenKind::Contract { address } => address.clone(),
        _ => return Err(ContractError::TokenKindMismatch {}),
    };
    if amount.is_zero() {
        return Err(ContractError::NoDeposit {
            denom: address.to_string(),
        });
    }
    create_or_fund_game(deps, env, info, token_id, kind, amount, win_ratio)
}

/// Shared create-or-fund core: fee extraction, liability bookkeeping and the
/// game upsert are identical across the three token kinds.
fn create_or_fund_game(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    kind: TokenKind,
    amount: Uint256,
    win_ratio: u64,
) -> Result<Response, ContractError> {
    if win_ratio > payout::SCALE {
        return Err(ContractError::RatioOutOfRange { value: win_ratio });
    }

    // 2.5% protocol fee stays in the contract's aggregate balance; only the
    // net deposit is owed back to the game
    let net = payout::net_of_fee(amount);

    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    LIABILITIES.save(deps.storage, token_id, &liability.checked_add(net)?)?;

    let key = (token_id, &info.sender);
    let game = match GAMES.may_load(deps.storage, key)? {
        Some(mut game) => {
            if game.kind != kind {
                return Err(ContractError::TokenKindMismatch {});
            }
            game.balance = game.balance.checked_add(net)?;
            game.win_ratio = win_ratio;
            game
        }
        None => Game {
            balance: net,
            token_id,
            kind: kind.clone(),
            created_at_time: env.block.time.seconds(),
            created_at_round: env.block.height,
            last_played_time: 0,
            last_win_time: 0,
            last_win_amount: Uint256::zero(),
            biggest_win_time: 0,
            biggest_win_amount: Uint256::zero(),
            win_ratio,
            owner: info.sender.clone(),
        },
    };
    GAMES.save(deps.storage, key, &game)?;

    let mut response = Response::new()
        .add_attribute("action", "create_or_fund_game")
        .add_attribute("creator", info.sender.clone())
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("net_deposit", net)
        .add_attribute("win_ratio", win_ratio.to_string())
        .add_attribute("balance", game.balance);

    // contract tokens deposit through a pre-approved allowance
    if let Some(msg) = kind.transfer_from_msg(&info.sender, &env.contract.address, amount)? {
        response = response.add_message(msg);
    }
    Ok(response)
}

pub fn execute_start_game_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    game: GameKey,
    win_probability: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = funds_in_denom(&info, &config.denom)?;
    start_game(deps, env, info, game, TokenKind::Native, amount, win_probability)
}

pub fn execute_start_game_fungible(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    game: GameKey,
    win_probability: u64,
) -> Result<Response, ContractError> {
    let kind = registered_kind(deps.storage, game.token_id)?;
    let denom = match &kind {
        TokenKind::Fungible { denom } => denom.clone(),
        _ => return Err(ContractError::TokenKindMismatch {}),
    };
    let amount = funds_in_denom(&info, &denom)?;
    start_game(deps, env, info, game, kind, amount, win_probability)
}

pub fn execute_start_game_contract(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    game: GameKey,
    amount: Uint256,
    win_probability: u64,
) -> Result<Response, ContractError> {
    let kind = registered_kind(deps.storage, game.token_id)?;
    let address = match &kind {
        TokenKind::Contract { address } => address.clone(),
        _ => return Err(ContractError::TokenKindMismatch {}),
    };
    if amount.is_zero() {
        return Err(ContractError::NoDeposit {
            denom: address.to_string(),
        });
    }
    start_game(deps, env, info, game, kind, amount, win_probability)
}

fn start_game(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    key: GameKey,
    kind: TokenKind,
    amount: Uint256,
    win_probability: u64,
) -> Result<Response, ContractError> {
    if win_probability > payout::SCALE {
        return Err(ContractError::ProbabilityOutOfRange {
            value: win_probability,
        });
    }
    // probability 0 can never win and would divide by zero in the payout,
    // so it is not a playable input
    if win_probability == 0 {
        return Err(ContractError::ZeroWinProbability {});
    }

    let creator = deps.api.addr_validate(&key.creator)?;
    let token_id = key.token_id;
    let mut game = GAMES
        .may_load(deps.storage, (token_id, &creator))?
        .ok_or(ContractError::GameNotFound {})?;
    if game.kind != kind {
        return Err(ContractError::TokenKindMismatch {});
    }

    if let Some(previous) = PLAYS.may_load(deps.storage, &info.sender)? {
        if previous.state == PlayState::Initiated {
            return Err(ContractError::PlayPending {});
        }
    }

    // worst-case payout if the play wins; a single bet may never demand more
    // than half of the pool
    let candidate = payout::win_amount(amount, win_probability)?;
    let max_win = game.balance / Uint256::from(2u64);
    if candidate > max_win {
        return Err(ContractError::ExposureTooLarge {
            max: max_win,
            requested: candidate,
        });
    }

    game.last_played_time = env.block.time.seconds();
    GAMES.save(deps.storage, (token_id, &creator), &game)?;

    // the full deposit is owed until resolution, fees are settled on loss
    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    LIABILITIES.save(deps.storage, token_id, &liability.checked_add(amount)?)?;

    let play = Play {
        state: PlayState::Initiated,
        win_probability,
        round: env.block.height,
        deposit: amount,
        token_id,
        game_creator: creator.clone(),
        owner: info.sender.clone(),
    };
    PLAYS.save(deps.storage, &info.sender, &play)?;

    let mut response = Response::new()
        .add_attribute("action", "start_game")
        .add_attribute("player", info.sender.clone())
        .add_attribute("creator", creator)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("deposit", amount)
        .add_attribute("win_probability", win_probability.to_string())
        .add_attribute("round", play.round.to_string());

    if let Some(msg) = kind.transfer_from_msg(&info.sender, &env.contract.address, amount)? {
        response = response.add_message(msg);
    }
    Ok(response)
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receiver: String,
    amount: Uint256,
    token_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let receiver = deps.api.addr_validate(&receiver)?;

    if let Some(mut game) = GAMES.may_load(deps.storage, (token_id, &info.sender))? {
        return withdraw_from_game(deps, config, info, receiver, amount, token_id, &mut game);
    }

    // no game for this caller and token: only the deployer may sweep surplus
    if info.sender != config.deployer {
        return Err(ContractError::GameNotFound {});
    }
    withdraw_surplus(deps, env, config, receiver, amount, token_id)
}

/// Game-owner withdrawal. Amount zero empties the pool. The protocol keeps
/// a 2.5% exit fee, which is why the liability drops by less than the balance.
fn withdraw_from_game(
    deps: DepsMut,
    config: Config,
    info: MessageInfo,
    receiver: Addr,
    amount: Uint256,
    token_id: u64,
    game: &mut Game,
) -> Result<Response, ContractError> {
    let gross = if amount.is_zero() { game.balance } else { amount };
    if gross.is_zero() {
        return Err(ContractError::Std(StdError::msg("nothing to withdraw")));
    }
    if gross > game.balance {
        return Err(ContractError::InsufficientGameBalance {
            available: game.balance,
            requested: gross,
        });
    }
    let net = payout::net_of_fee(gross);

    game.balance = game.balance.checked_sub(gross)?;
    GAMES.save(deps.storage, (token_id, &info.sender), game)?;

    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    let remaining = liability
        .checked_sub(net)
        .map_err(|_| ContractError::Accounting("liability below owner withdrawal"))?;
    LIABILITIES.save(deps.storage, token_id, &remaining)?;

    let transfer = game.kind.transfer_msg(&config.denom, &receiver, net)?;
    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "withdraw")
        .add_attribute("path", "owner")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("receiver", receiver)
        .add_attribute("net_amount", net)
        .add_attribute("remaining_balance", game.balance))
}

/// Deployer withdrawal of protocol earnings: whatever the contract actually
/// holds beyond the native reserve and everything owed to games and plays.
fn withdraw_surplus(
    deps: DepsMut,
    env: Env,
    config: Config,
    receiver: Addr,
    amount: Uint256,
    token_id: u64,
) -> Result<Response, ContractError> {
    let kind = registered_kind(deps.storage, token_id)?;
    let holdings = kind.balance_of(&deps.querier, &config.denom, &env.contract.address)?;
    let reserve = if token_id == NATIVE_TOKEN_ID {
        config.native_reserve
    } else {
        Uint256::zero()
    };
    let liability = LIABILITIES
        .may_load(deps.storage, token_id)?
        .unwrap_or_default();
    let available = holdings.saturating_sub(reserve).saturating_sub(liability);

    let to_withdraw = if amount.is_zero() { available } else { amount };
    if to_withdraw > available {
        return Err(ContractError::InsufficientSurplus {
            available,
            requested: to_withdraw,
        });
    }
    if to_withdraw.is_zero() {
        return Err(ContractError::Std(StdError::msg("nothing to withdraw")));
    }

    let transfer = kind.transfer_msg(&config.denom, &receiver, to_withdraw)?;
    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "withdraw")
        .add_attribute("path", "admin")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("receiver", receiver)
        .add_attribute("amount", to_withdraw))
}

pub fn execute_register_token(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    kind: TokenKind,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let paid = info
        .funds
        .iter()
        .find(|c| c.denom == config.denom)
        .map(|c| c.amount)
        .unwrap_or_default();
    if paid != Uint256::from(config.opt_in_fee) {
        return Err(ContractError::WrongOptInFee {
            expected: config.opt_in_fee,
            denom: config.denom,
        });
    }

    if token_id == NATIVE_TOKEN_ID || TOKENS.has(deps.storage, token_id) {
        return Err(ContractError::TokenAlreadyRegistered { token_id });
    }

    let kind = match kind {
        TokenKind::Native => return Err(ContractError::TokenKindMismatch {}),
        TokenKind::Fungible { denom } => {
            if denom.is_empty() || denom == config.denom {
                return Err(ContractError::Std(StdError::msg(
                    "denom is empty or reserved for the native token",
                )));
            }
            TokenKind::Fungible { denom }
        }
        TokenKind::Contract { address } => TokenKind::Contract {
            address: deps.api.addr_validate(address.as_str())?,
        },
    };

    // one id per asset: liabilities are tracked per id while holdings are per
    // denom, so an alias id would show the full shared holding as surplus
    for item in TOKENS.range(deps.storage, None, None, Order::Ascending) {
        let (existing_id, existing) = item?;
        if existing == kind {
            return Err(ContractError::AssetAlreadyRegistered {
                token_id: existing_id,
            });
        }
    }
    TOKENS.save(deps.storage, token_id, &kind)?;

    Ok(Response::new()
        .add_attribute("action", "register_token")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("registrant", info.sender))
}

pub fn execute_update_version(
    deps: DepsMut,
    info: MessageInfo,
    version: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.deployer {
        return Err(ContractError::Unauthorized {});
    }
    VERSION.save(deps.storage, &version)?;

    Ok(Response::new()
        .add_attribute("action", "update_version")
        .add_attribute("version", version))
}
