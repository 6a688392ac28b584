use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint256, WasmMsg,
};

use crate::state::TokenKind;

/// The subset of the cw20-style token interface the contract drives.
#[cw_serde]
pub enum TokenContractMsg {
    Transfer {
        recipient: String,
        amount: Uint256,
    },
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint256,
    },
}

#[cw_serde]
pub enum TokenContractQuery {
    Balance { address: String },
}

#[cw_serde]
pub struct TokenBalanceResponse {
    pub balance: Uint256,
}

impl TokenKind {
    /// Builds the outbound transfer for this token kind. `native_denom` is the
    /// chain's native coin denom from the config.
    pub fn transfer_msg(
        &self,
        native_denom: &str,
        recipient: &Addr,
        amount: Uint256,
    ) -> StdResult<CosmosMsg> {
        let msg = match self {
            TokenKind::Native => BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![Coin {
                    denom: native_denom.to_string(),
                    amount,
                }],
            }
            .into(),
            TokenKind::Fungible { denom } => BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![Coin {
                    denom: denom.clone(),
                    amount,
                }],
            }
            .into(),
            TokenKind::Contract { address } => WasmMsg::Execute {
                contract_addr: address.to_string(),
                msg: to_json_binary(&TokenContractMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount,
                })?,
                funds: vec![],
            }
            .into(),
        };
        Ok(msg)
    }

    /// Pulls an allowance-approved deposit from `owner` into the contract.
    /// Bank-denominated kinds deposit through `info.funds` instead, so this
    /// yields a message only for contract tokens.
    pub fn transfer_from_msg(
        &self,
        owner: &Addr,
        contract: &Addr,
        amount: Uint256,
    ) -> StdResult<Option<CosmosMsg>> {
        match self {
            TokenKind::Contract { address } => Ok(Some(
                WasmMsg::Execute {
                    contract_addr: address.to_string(),
                    msg: to_json_binary(&TokenContractMsg::TransferFrom {
                        owner: owner.to_string(),
                        recipient: contract.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                }
                .into(),
            )),
            _ => Ok(None),
        }
    }

    /// Actual on-chain holdings of `account` in this token. For contract
    /// tokens this asks the token contract itself, so admin withdrawals are
    /// bounded by a real balance rather than trust.
    pub fn balance_of(
        &self,
        querier: &QuerierWrapper,
        native_denom: &str,
        account: &Addr,
    ) -> StdResult<Uint256> {
        match self {
            TokenKind::Native => Ok(querier.query_balance(account, native_denom)?.amount),
            TokenKind::Fungible { denom } => Ok(querier.query_balance(account, denom)?.amount),
            TokenKind::Contract { address } => {
                let response: TokenBalanceResponse = querier.query_wasm_smart(
                    address,
                    &TokenContractQuery::Balance {
                        address: account.to_string(),
                    },
                )?;
                Ok(response.balance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::from_json;

    #[test]
    fn native_transfer_is_a_bank_send() {
        let kind = TokenKind::Native;
        let msg = kind
            .transfer_msg("udice", &Addr::unchecked("winner"), Uint256::from(500u64))
            .unwrap();
        match msg {
            CosmosMsg::Bank(BankMsg::Send { to_address, amount }) => {
                assert_eq!(to_address, "winner");
                assert_eq!(amount, vec![Coin::new(Uint256::from(500u64), "udice")]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn fungible_transfer_uses_registered_denom() {
        let kind = TokenKind::Fungible {
            denom: "factory/creator/gold".to_string(),
        };
        let msg = kind
            .transfer_msg("udice", &Addr::unchecked("winner"), Uint256::from(7u64))
            .unwrap();
        match msg {
            CosmosMsg::Bank(BankMsg::Send { amount, .. }) => {
                assert_eq!(amount[0].denom, "factory/creator/gold");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn contract_transfer_calls_the_token_contract() {
        let kind = TokenKind::Contract {
            address: Addr::unchecked("token_contract"),
        };
        let msg = kind
            .transfer_msg("udice", &Addr::unchecked("winner"), Uint256::from(9u64))
            .unwrap();
        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr, msg, ..
            }) => {
                assert_eq!(contract_addr, "token_contract");
                let parsed: TokenContractMsg = from_json(&msg).unwrap();
                assert_eq!(
                    parsed,
                    TokenContractMsg::Transfer {
                        recipient: "winner".to_string(),
                        amount: Uint256::from(9u64),
                    }
                );
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn only_contract_tokens_emit_transfer_from() {
        let owner = Addr::unchecked("player");
        let contract = Addr::unchecked("dice");
        assert!(TokenKind::Native
            .transfer_from_msg(&owner, &contract, Uint256::one())
            .unwrap()
            .is_none());
        let kind = TokenKind::Contract {
            address: Addr::unchecked("token_contract"),
        };
        assert!(kind
            .transfer_from_msg(&owner, &contract, Uint256::one())
            .unwrap()
            .is_some());
    }
}
