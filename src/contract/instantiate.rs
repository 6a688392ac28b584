#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::state::{Config, CONFIG, VERSION};

const CONTRACT_NAME: &str = "crates.io:satoshi-dice";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registering a new token id costs 10 native tokens unless configured otherwise.
const DEFAULT_OPT_IN_FEE: u128 = 10_000_000;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let config = Config {
        denom: msg.denom.clone(),
        deployer: info.sender.clone(),
        opt_in_fee: msg.opt_in_fee.unwrap_or(Uint128::new(DEFAULT_OPT_IN_FEE)),
        native_reserve: msg.native_reserve.unwrap_or_default(),
    };
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    VERSION.save(deps.storage, &CONTRACT_VERSION.to_string())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("denom", msg.denom)
        .add_attribute("deployer", info.sender))
}
