// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use crate::infrastructure::data::router_abi::{IAccount, IEntryPoint};
use crate::infrastructure::network::provider::HttpProvider;
use alloy::primitives::aliases::U192;
use alloy::primitives::{Address, B256, Bytes, U256, keccak256};
use alloy::signers::SignerSync;
use alloy::signers::local::PrivateKeySigner;
use alloy_sol_types::{SolCall, SolValue};

/// The smart account's execution context: its on-chain address, the active
/// validator key, and the entry point it is registered against. Constructed
/// once at startup; the process is single-shot so there is no teardown.
pub struct SmartAccount {
    signer: PrivateKeySigner,
    address: Address,
    entry_point: Address,
    chain_id: u64,
    provider: HttpProvider,
}

/// Field set of a v0.7 packed user operation, before the signature.
#[derive(Debug, Clone)]
pub struct PackedFields {
    pub sender: Address,
    pub nonce: U256,
    pub call_data: Bytes,
    pub call_gas_limit: u128,
    pub verification_gas_limit: u128,
    pub pre_verification_gas: U256,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
}

/// Two u128 halves packed into one bytes32, high half first.
fn pack_u128_pair(hi: u128, lo: u128) -> B256 {
    let mut out = [0u8; 32];
    out[..16].copy_from_slice(&hi.to_be_bytes());
    out[16..].copy_from_slice(&lo.to_be_bytes());
    B256::from(out)
}

impl SmartAccount {
    pub fn new(
        signer: PrivateKeySigner,
        address: Address,
        entry_point: Address,
        chain_id: u64,
        provider: HttpProvider,
    ) -> Self {
        Self {
            signer,
            address,
            entry_point,
            chain_id,
            provider,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    /// Current sequential nonce on the default key, read from the entry point.
    pub async fn nonce(&self) -> Result<U256, AppError> {
        IEntryPoint::new(self.entry_point, self.provider.clone())
            .getNonce(self.address, U192::ZERO)
            .call()
            .await
            .map_err(|e| AppError::Connection(format!("Entry point nonce fetch failed: {e}")))
    }

    /// Wraps a target call into the account's `execute` payload. `value` is
    /// attached native currency and rides inside the calldata, not the op.
    pub fn execute_calldata(target: Address, value: U256, data: &[u8]) -> Vec<u8> {
        IAccount::executeCall {
            dest: target,
            value,
            func: Bytes::copy_from_slice(data),
        }
        .abi_encode()
    }

    /// The canonical v0.7 userOpHash: keccak over the abi-encoded packed
    /// fields (dynamic members pre-hashed), bound to entry point + chain id.
    pub fn user_op_hash(&self, fields: &PackedFields) -> B256 {
        let account_gas_limits =
            pack_u128_pair(fields.verification_gas_limit, fields.call_gas_limit);
        let gas_fees = pack_u128_pair(fields.max_priority_fee_per_gas, fields.max_fee_per_gas);
        let empty_hash = keccak256([0u8; 0]);

        let packed = (
            fields.sender,
            fields.nonce,
            empty_hash, // initCode: the account is already deployed
            keccak256(&fields.call_data),
            account_gas_limits,
            fields.pre_verification_gas,
            gas_fees,
            empty_hash, // paymasterAndData
        )
            .abi_encode();

        keccak256(
            (keccak256(packed), self.entry_point, U256::from(self.chain_id)).abi_encode(),
        )
    }

    /// Signs the userOpHash under the active validator key (EIP-191 prefix,
    /// the ECDSA validator convention).
    pub fn sign_user_op_hash(&self, hash: &B256) -> Result<Vec<u8>, AppError> {
        let sig = self
            .signer
            .sign_message_sync(hash.as_slice())
            .map_err(|e| AppError::Submission(format!("User operation signing failed: {e}")))?;
        Ok(sig.as_bytes().to_vec())
    }

    /// Placeholder ECDSA signature used only for gas estimation.
    pub fn dummy_signature() -> Vec<u8> {
        let mut sig = vec![0xffu8; 65];
        sig[64] = 0x1c;
        sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::network::provider::ConnectionFactory;

    fn test_account() -> SmartAccount {
        let provider = ConnectionFactory::http("http://127.0.0.1:8545").unwrap();
        SmartAccount::new(
            PrivateKeySigner::random(),
            Address::from([0xaa; 20]),
            Address::from([0xee; 20]),
            8453,
            provider,
        )
    }

    fn test_fields() -> PackedFields {
        PackedFields {
            sender: Address::from([0xaa; 20]),
            nonce: U256::from(7u64),
            call_data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
            call_gas_limit: 200_000,
            verification_gas_limit: 100_000,
            pre_verification_gas: U256::from(50_000u64),
            max_priority_fee_per_gas: 1_500_000_000,
            max_fee_per_gas: 30_000_000_000,
        }
    }

    #[test]
    fn packs_u128_halves_big_endian() {
        let packed = pack_u128_pair(1, 2);
        assert_eq!(packed[15], 1);
        assert_eq!(packed[31], 2);
        assert!(packed[..15].iter().all(|b| *b == 0));
    }

    #[test]
    fn hash_is_deterministic_and_field_sensitive() {
        let account = test_account();
        let fields = test_fields();
        let h1 = account.user_op_hash(&fields);
        let h2 = account.user_op_hash(&fields);
        assert_eq!(h1, h2);

        let mut bumped = fields.clone();
        bumped.nonce = U256::from(8u64);
        assert_ne!(h1, account.user_op_hash(&bumped));

        let mut refee = fields;
        refee.max_fee_per_gas += 1;
        assert_ne!(h1, account.user_op_hash(&refee));
    }

    #[test]
    fn hash_binds_chain_id() {
        let provider = ConnectionFactory::http("http://127.0.0.1:8545").unwrap();
        let signer = PrivateKeySigner::random();
        let a = SmartAccount::new(
            signer.clone(),
            Address::from([0xaa; 20]),
            Address::from([0xee; 20]),
            1,
            provider.clone(),
        );
        let b = SmartAccount::new(
            signer,
            Address::from([0xaa; 20]),
            Address::from([0xee; 20]),
            8453,
            provider,
        );
        let fields = test_fields();
        assert_ne!(a.user_op_hash(&fields), b.user_op_hash(&fields));
    }

    #[test]
    fn execute_calldata_roundtrips() {
        let data = vec![0x01, 0x02, 0x03];
        let encoded = SmartAccount::execute_calldata(
            Address::from([0x11; 20]),
            U256::from(5u64),
            &data,
        );
        let decoded = IAccount::executeCall::abi_decode(&encoded).expect("decode execute");
        assert_eq!(decoded.dest, Address::from([0x11; 20]));
        assert_eq!(decoded.value, U256::from(5u64));
        assert_eq!(decoded.func.as_ref(), data.as_slice());
    }

    #[test]
    fn dummy_signature_is_ecdsa_shaped() {
        let sig = SmartAccount::dummy_signature();
        assert_eq!(sig.len(), 65);
        assert_eq!(sig[64], 0x1c);
    }
}
