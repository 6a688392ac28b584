use cosmwasm_std::Uint256;

use crate::error::ContractError;

/// Denominator of every fixed-point probability and ratio in the contract.
pub const SCALE: u64 = 1_000_000;

/// Protocol fee divisor: 1/40 = 2.5% on deposits and owner withdrawals.
pub const FEE_DIVISOR: u64 = 40;

/// Protocol fee on an amount entering or leaving a game pool.
pub fn extract_fee(amount: Uint256) -> Uint256 {
    amount / Uint256::from(FEE_DIVISOR)
}

/// Amount left after the protocol fee.
pub fn net_of_fee(amount: Uint256) -> Uint256 {
    // fee is a floor of amount / 40, so it never exceeds amount
    amount - extract_fee(amount)
}

/// Effective win threshold: the player's chosen probability scaled down by the
/// creator's public win ratio. Both fixed-point over SCALE, as is the result.
pub fn compose_probability(player_probability: u64, win_ratio: u64) -> u64 {
    ((player_probability as u128 * win_ratio as u128) / SCALE as u128) as u64
}

/// Payout owed on a win: deposit multiplied by the inverse probability.
/// A probability of zero means the player can never win, so there is no payout
/// to compute; callers must reject it before a play is ever accepted.
pub fn win_amount(deposit: Uint256, win_probability: u64) -> Result<Uint256, ContractError> {
    if win_probability == 0 {
        return Err(ContractError::ZeroWinProbability {});
    }
    let scaled = deposit.checked_mul(Uint256::from(SCALE))?;
    Ok(scaled / Uint256::from(win_probability))
}

/// Fee the protocol keeps from a lost deposit: 20% of the creator's theoretical
/// edge (SCALE - win_ratio), applied to the deposit.
pub fn loss_fee(deposit: Uint256, win_ratio: u64) -> Result<Uint256, ContractError> {
    let profit_ratio = SCALE.saturating_sub(win_ratio);
    let fee_ratio = profit_ratio / 5;
    let scaled = deposit.checked_mul(Uint256::from(fee_ratio))?;
    Ok(scaled / Uint256::from(SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_is_two_and_a_half_percent_floored() {
        assert_eq!(extract_fee(Uint256::from(1_000_000u64)), Uint256::from(25_000u64));
        assert_eq!(extract_fee(Uint256::from(40u64)), Uint256::from(1u64));
        assert_eq!(extract_fee(Uint256::from(39u64)), Uint256::zero());
        assert_eq!(net_of_fee(Uint256::from(1_000_000u64)), Uint256::from(975_000u64));
        assert_eq!(net_of_fee(Uint256::from(39u64)), Uint256::from(39u64));
    }

    #[test]
    fn probabilities_compose_multiplicatively() {
        // 20% player odds on a 90% ratio game -> 18%
        assert_eq!(compose_probability(200_000, 900_000), 180_000);
        assert_eq!(compose_probability(1_000_000, 1_000_000), 1_000_000);
        assert_eq!(compose_probability(500_000, 0), 0);
        assert_eq!(compose_probability(0, 1_000_000), 0);
        // floor division
        assert_eq!(compose_probability(1, 999_999), 0);
    }

    #[test]
    fn win_amount_is_inverse_probability() {
        let d = Uint256::from(100u64);
        assert_eq!(win_amount(d, 1_000_000).unwrap(), Uint256::from(100u64));
        assert_eq!(win_amount(d, 500_000).unwrap(), Uint256::from(200u64));
        assert_eq!(win_amount(d, 100_000).unwrap(), Uint256::from(1_000u64));
    }

    #[test]
    fn win_amount_rejects_zero_probability() {
        let err = win_amount(Uint256::from(100u64), 0).unwrap_err();
        assert!(matches!(err, ContractError::ZeroWinProbability {}));
    }

    #[test]
    fn win_amount_survives_deposits_beyond_u128() {
        // deposit * 1_000_000 does not fit in 128 bits; Uint256 must carry it
        let deposit = Uint256::from(u128::MAX);
        let expected = Uint256::from(u128::MAX)
            .checked_mul(Uint256::from(1_000_000u64))
            .unwrap()
            / Uint256::from(250_000u64);
        assert_eq!(win_amount(deposit, 250_000).unwrap(), expected);
    }

    #[test]
    fn loss_fee_is_a_fifth_of_the_edge() {
        // winRatio 90%: edge 100_000, feeRatio 20_000, fee on 100 = 2
        assert_eq!(
            loss_fee(Uint256::from(100u64), 900_000).unwrap(),
            Uint256::from(2u64)
        );
        // winRatio 100%: no edge, no fee
        assert_eq!(
            loss_fee(Uint256::from(1_000_000u64), 1_000_000).unwrap(),
            Uint256::zero()
        );
        // winRatio 0: full edge, 20% of the deposit
        assert_eq!(
            loss_fee(Uint256::from(1_000u64), 0).unwrap(),
            Uint256::from(200u64)
        );
    }
}
