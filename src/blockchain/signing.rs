//! Provider-backed message signing with local signer verification.
//!
//! The provider is not trusted: every signature is recovered locally and
//! rejected unless it recovers to the active account.

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Address, Bytes, Signature};

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, MessageSignature, TypedDataSignature,
};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

fn parse_signature(raw: &Bytes) -> BlockchainResult<Signature> {
    Signature::from_raw(raw).map_err(|e| {
        BlockchainError::Signature(format!("malformed signature from provider: {}", e))
    })
}

/// Recovery byte in the 27/28 form wallets return.
fn recovery_byte(signature: &Signature) -> u8 {
    27 + u8::from(signature.v())
}

fn verify_signer(kind: &'static str, expected: Address, recovered: Address) -> BlockchainResult<()> {
    let verified = expected == recovered;
    metrics::record_signature(kind, verified);
    if verified {
        Ok(())
    } else {
        tracing::warn!(%expected, %recovered, kind, "Provider returned signature for a different signer");
        Err(BlockchainError::SignerMismatch { expected, recovered })
    }
}

impl Wallet {
    /// Ask the provider to `personal_sign` `message` with the active account.
    pub async fn sign_message(&self, message: impl AsRef<[u8]>) -> BlockchainResult<MessageSignature> {
        let account = self.checksummed_account()?;
        let message = message.as_ref();

        tracing::debug!(%account, len = message.len(), "Requesting personal_sign");
        let signature = self
            .client()
            .personal_sign(Bytes::copy_from_slice(message), account)
            .await?;

        let parsed = parse_signature(&signature)?;
        let recovered = parsed
            .recover_address_from_msg(message)
            .map_err(|e| BlockchainError::Signature(e.to_string()))?;
        verify_signer("personal_sign", account, recovered)?;

        Ok(MessageSignature {
            signature,
            r: parsed.r(),
            s: parsed.s(),
            v: recovery_byte(&parsed),
            from: recovered,
        })
    }

    /// Ask the provider to sign EIP-712 `typed_data` with the active account.
    pub async fn sign_typed_data(&self, typed_data: &TypedData) -> BlockchainResult<TypedDataSignature> {
        let account = self.checksummed_account()?;
        let message_hash = typed_data
            .eip712_signing_hash()
            .map_err(|e| BlockchainError::Signature(format!("cannot hash typed data: {}", e)))?;

        tracing::debug!(%account, %message_hash, "Requesting typed data signature");
        let signature = self.client().sign_typed_data(account, typed_data).await?;

        let parsed = parse_signature(&signature)?;
        let recovered = parsed
            .recover_address_from_prehash(&message_hash)
            .map_err(|e| BlockchainError::Signature(e.to_string()))?;
        verify_signer("typed_data", account, recovered)?;

        Ok(TypedDataSignature {
            signature,
            r: parsed.r(),
            s: parsed.s(),
            v: recovery_byte(&parsed),
            from: recovered,
            message_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::signers::local::PrivateKeySigner;
    use alloy::signers::SignerSync;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_and_recover() {
        let signer: PrivateKeySigner = TEST_PRIVATE_KEY.parse().unwrap();
        let sig = signer.sign_message_sync(b"hello").unwrap();
        let raw = Bytes::from(sig.as_bytes().to_vec());

        let parsed = parse_signature(&raw).unwrap();
        assert_eq!(parsed.r(), sig.r());
        assert!(matches!(recovery_byte(&parsed), 27 | 28));
        assert_eq!(
            parsed.recover_address_from_msg(b"hello").unwrap(),
            signer.address()
        );
    }

    #[test]
    fn test_malformed_signature() {
        let err = parse_signature(&Bytes::from(vec![1u8; 10])).unwrap_err();
        assert!(err.to_string().contains("malformed signature"));
    }

    #[test]
    fn test_verify_signer_mismatch() {
        let err = verify_signer("personal_sign", Address::ZERO, Address::repeat_byte(1)).unwrap_err();
        assert!(matches!(err, BlockchainError::SignerMismatch { .. }));
        assert!(verify_signer("personal_sign", Address::ZERO, Address::ZERO).is_ok());
    }
}
