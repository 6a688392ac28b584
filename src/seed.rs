use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128, Uint256};
use prost::Message;

use crate::payout::SCALE;

/// Path of the chain randomness beacon query. The beacon publishes one
/// verifiable 256-bit seed per block, available once the block has closed.
pub const BLOCK_SEED_QUERY_PATH: &str = "/beacon.v1.Query/BlockSeed";

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct QueryBlockSeedRequest {
    #[prost(uint64, tag = "1")]
    pub height: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct QueryBlockSeedResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub seed: Vec<u8>,
}

/// Fetches the block seed published at `height` from the beacon module.
/// Fails while the block is still open or once it has left the beacon window.
pub fn query_block_seed(deps: Deps, height: u64) -> StdResult<Vec<u8>> {
    let request = QueryBlockSeedRequest { height };
    let response = deps.querier.query_grpc(
        String::from(BLOCK_SEED_QUERY_PATH),
        Binary::new(request.encode_to_vec()),
    )?;
    let decoded = QueryBlockSeedResponse::decode(response.as_slice())
        .map_err(|e| StdError::msg(format!("invalid block seed response: {e}")))?;
    Ok(decoded.seed)
}

/// Reduces a seed to a uniform value in [0, 1_000_000). The seed is read as a
/// big-endian 256-bit integer; shorter seeds are left-padded with zeros.
pub fn roll_from_seed(seed: &[u8]) -> u64 {
    let mut buf = [0u8; 32];
    let n = seed.len().min(32);
    buf[32 - n..].copy_from_slice(&seed[seed.len() - n..]);
    let remainder = Uint256::from_be_bytes(buf) % Uint256::from(SCALE);
    // remainder < 1_000_000, the narrowing cannot fail
    Uint128::try_from(remainder)
        .map(|v| v.u128() as u64)
        .unwrap_or_default()
}
