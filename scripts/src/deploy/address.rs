use alloy::primitives::{keccak256, Address};
use ethers::{prelude::U256, utils::rlp};

/// Predict the address of a contract created by `deployer` at `nonce`,
/// the last 20 bytes of `keccak256(rlp([deployer, nonce]))`
pub fn predict_contract_address(deployer: Address, nonce: u64) -> Address {
    let mut stream = rlp::RlpStream::new();
    stream.begin_list(2);
    stream.append(&deployer.to_vec());
    stream.append(&U256::from(nonce));
    let hash = keccak256(&stream.out());

    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_predict_contract_address() {
        let deployer = address!("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        assert_eq!(
            predict_contract_address(deployer, 0),
            address!("cd234a471b72ba2f1ccf0a70fcaba648a5eecd8d")
        );
        assert_eq!(
            predict_contract_address(deployer, 1),
            address!("343c43a37d37dff08ae8c4a11544c718abb4fcf8")
        );
    }
}
