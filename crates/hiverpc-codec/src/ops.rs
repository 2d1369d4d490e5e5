//! Operation variants and their wire encoders.
//!
//! Each operation's opcode byte is its canonical name's position in
//! [`OPERATION_ORDER`]. That ordering is a protocol constant: reassigning a
//! position would change the bytes every signer in the network produces.

use serde::{Deserialize, Serialize};

use hiverpc_core::error::FormatError;

use crate::asset::put_asset;
use crate::keys::KeyCodec;
use crate::wire::{put_str, put_str_array, put_uvarint};

/// The chain's canonical operation list. Index = wire opcode.
pub const OPERATION_ORDER: [&str; 50] = [
    "vote",
    "comment",
    "transfer",
    "transfer_to_vesting",
    "withdraw_vesting",
    "limit_order_create",
    "limit_order_cancel",
    "feed_publish",
    "convert",
    "account_create",
    "account_update",
    "witness_update",
    "account_witness_vote",
    "account_witness_proxy",
    "pow",
    "custom",
    "report_over_production",
    "delete_comment",
    "custom_json",
    "comment_options",
    "set_withdraw_vesting_route",
    "limit_order_create2",
    "claim_account",
    "create_claimed_account",
    "request_account_recovery",
    "recover_account",
    "change_recovery_account",
    "escrow_transfer",
    "escrow_dispute",
    "escrow_release",
    "pow2",
    "escrow_approve",
    "transfer_to_savings",
    "transfer_from_savings",
    "cancel_transfer_from_savings",
    "custom_binary",
    "decline_voting_rights",
    "reset_account",
    "set_reset_account",
    "claim_reward_balance",
    "delegate_vesting_shares",
    "account_create_with_delegation",
    "witness_set_properties",
    "account_update2",
    "create_proposal",
    "update_proposal_votes",
    "remove_proposal",
    "update_proposal",
    "collateralized_convert",
    "recurrent_transfer",
];

/// Look up the wire opcode for a canonical operation name.
pub fn op_id(name: &str) -> Option<u8> {
    OPERATION_ORDER
        .iter()
        .position(|&entry| entry == name)
        .map(|index| index as u8)
}

/// Cast a vote on a post or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    pub weight: i16,
}

/// Arbitrary JSON payload, authorised by account or posting authorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    pub required_auths: Vec<String>,
    pub required_posting_auths: Vec<String>,
    pub id: String,
    pub json: String,
}

/// Claim pending reward balances. The three amounts are asset strings in
/// fixed order: liquid token, backed token, vesting token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    pub account: String,
    pub reward_hive: String,
    pub reward_hbd: String,
    pub reward_vests: String,
}

/// Move tokens between accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub memo: String,
}

/// An authority structure: a weight threshold and ordered account/key
/// weight lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authority {
    pub weight_threshold: u32,
    pub account_auths: Vec<(String, u16)>,
    pub key_auths: Vec<(String, u16)>,
}

/// Replace an account's authorities, memo key and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub account: String,
    pub owner: Option<Authority>,
    pub active: Option<Authority>,
    pub posting: Option<Authority>,
    pub memo_key: String,
    pub json_metadata: String,
}

/// A transaction operation, closed over the variants this codec encodes.
///
/// Adding a variant means adding its struct, its encode arm, and nothing
/// else — dispatch is an exhaustive match, and the opcode comes from the
/// canonical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Operation {
    Vote(VoteOperation),
    CustomJson(CustomJsonOperation),
    ClaimRewardBalance(ClaimRewardBalanceOperation),
    Transfer(TransferOperation),
    AccountUpdate(AccountUpdateOperation),
}

impl Operation {
    /// The variant's canonical name in the protocol operation table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vote(_) => "vote",
            Self::CustomJson(_) => "custom_json",
            Self::ClaimRewardBalance(_) => "claim_reward_balance",
            Self::Transfer(_) => "transfer",
            Self::AccountUpdate(_) => "account_update",
        }
    }

    /// Encode the operation: one opcode byte, then the variant payload.
    ///
    /// `keys` is only consulted for variants that carry a public key
    /// (`account_update`'s memo key). Any failure aborts the whole encoding
    /// with nothing written.
    pub fn encode(&self, keys: &dyn KeyCodec) -> Result<Vec<u8>, FormatError> {
        let opcode = op_id(self.name()).ok_or_else(|| FormatError::UnassignedOpcode {
            name: self.name().to_string(),
        })?;

        let mut buf = vec![opcode];
        match self {
            Self::Vote(op) => {
                put_str(&mut buf, &op.voter);
                put_str(&mut buf, &op.author);
                put_str(&mut buf, &op.permlink);
                buf.extend_from_slice(&op.weight.to_le_bytes());
            }
            Self::CustomJson(op) => {
                put_str_array(&mut buf, &op.required_auths)?;
                put_str_array(&mut buf, &op.required_posting_auths)?;
                put_str(&mut buf, &op.id);
                put_str(&mut buf, &op.json);
            }
            Self::ClaimRewardBalance(op) => {
                put_str(&mut buf, &op.account);
                put_asset(&mut buf, &op.reward_hive)?;
                put_asset(&mut buf, &op.reward_hbd)?;
                put_asset(&mut buf, &op.reward_vests)?;
            }
            Self::Transfer(op) => {
                put_str(&mut buf, &op.from);
                put_str(&mut buf, &op.to);
                put_asset(&mut buf, &op.amount)?;
                put_str(&mut buf, &op.memo);
            }
            Self::AccountUpdate(op) => {
                put_str(&mut buf, &op.account);
                put_optional_authority(&mut buf, op.owner.as_ref());
                put_optional_authority(&mut buf, op.active.as_ref());
                put_optional_authority(&mut buf, op.posting.as_ref());
                let memo_key = keys.decode_public_key(&op.memo_key)?;
                buf.extend_from_slice(memo_key.as_compressed());
                put_str(&mut buf, &op.json_metadata);
            }
        }
        Ok(buf)
    }
}

/// Present authorities are flagged with 0x01 and followed by the structure;
/// absent ones are a single 0x00 byte.
fn put_optional_authority(buf: &mut Vec<u8>, auth: Option<&Authority>) {
    match auth {
        Some(auth) => {
            buf.push(0x01);
            put_authority(buf, auth);
        }
        None => buf.push(0x00),
    }
}

fn put_authority(buf: &mut Vec<u8>, auth: &Authority) {
    buf.extend_from_slice(&auth.weight_threshold.to_le_bytes());
    put_uvarint(buf, auth.account_auths.len() as u64);
    for (account, weight) in &auth.account_auths {
        put_str(buf, account);
        buf.extend_from_slice(&weight.to_le_bytes());
    }
    // Keys in the auth list go on the wire as plain strings, unlike the
    // compressed memo key. Unverified against live captures; do not change
    // without a reference serialization to compare against.
    put_uvarint(buf, auth.key_auths.len() as u64);
    for (key, weight) in &auth.key_auths {
        put_str(buf, key);
        buf.extend_from_slice(&weight.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PublicKey;

    /// Stands in for the external key codec: "decodes" any key to a fixed
    /// compressed form so byte layouts can be asserted without crypto.
    struct StubKeys;

    impl KeyCodec for StubKeys {
        fn decode_public_key(&self, text: &str) -> Result<PublicKey, FormatError> {
            if text.is_empty() {
                return Err(FormatError::PublicKey {
                    key: text.to_string(),
                    reason: "empty".into(),
                });
            }
            Ok(PublicKey::from_compressed([0xab; 33]))
        }
    }

    fn vote_op() -> Operation {
        Operation::Vote(VoteOperation {
            voter: "xeroc".into(),
            author: "xeroc".into(),
            permlink: "piston".into(),
            weight: 10_000,
        })
    }

    #[test]
    fn opcode_table_positions() {
        assert_eq!(op_id("vote"), Some(0));
        assert_eq!(op_id("transfer"), Some(2));
        assert_eq!(op_id("account_update"), Some(10));
        assert_eq!(op_id("custom_json"), Some(18));
        assert_eq!(op_id("claim_reward_balance"), Some(39));
        assert_eq!(op_id("recurrent_transfer"), Some(49));
        assert_eq!(op_id("not_an_operation"), None);
    }

    #[test]
    fn vote_encoding() {
        let bytes = vote_op().encode(&StubKeys).unwrap();
        assert_eq!(
            hex::encode(&bytes),
            "00057865726f63057865726f6306706973746f6e1027"
        );
    }

    #[test]
    fn custom_json_encoding() {
        let op = Operation::CustomJson(CustomJsonOperation {
            required_auths: vec![],
            required_posting_auths: vec!["xeroc".into()],
            id: "test-id".into(),
            json: r#"{"testk":"testv"}"#.into(),
        });
        let bytes = op.encode(&StubKeys).unwrap();
        assert_eq!(bytes[0], 18);
        // empty auths, one posting auth, then the id and payload
        assert_eq!(&bytes[1..2], [0x00]);
        assert_eq!(&bytes[2..9], b"\x01\x05xeroc");
        assert_eq!(&bytes[9..17], b"\x07test-id");
        assert_eq!(&bytes[17..], b"\x11{\"testk\":\"testv\"}");
    }

    #[test]
    fn transfer_encoding() {
        let op = Operation::Transfer(TransferOperation {
            from: "alice".into(),
            to: "bob".into(),
            amount: "1.000 HIVE".into(),
            memo: "hi".into(),
        });
        let bytes = op.encode(&StubKeys).unwrap();
        assert_eq!(bytes[0], 2);
        let mut expected = vec![2u8];
        expected.extend_from_slice(b"\x05alice\x03bob");
        expected.extend_from_slice(&1000i64.to_le_bytes());
        expected.push(3);
        expected.extend_from_slice(b"STEEM\0\0");
        expected.extend_from_slice(b"\x02hi");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn claim_reward_balance_aborts_on_bad_asset() {
        let op = Operation::ClaimRewardBalance(ClaimRewardBalanceOperation {
            account: "alice".into(),
            reward_hive: "0.001 HIVE".into(),
            reward_hbd: "broken".into(),
            reward_vests: "0.000001 VESTS".into(),
        });
        let err = op.encode(&StubKeys).unwrap_err();
        assert!(matches!(err, FormatError::AssetFormat { .. }));
    }

    #[test]
    fn claim_reward_balance_asset_order() {
        let op = Operation::ClaimRewardBalance(ClaimRewardBalanceOperation {
            account: "a".into(),
            reward_hive: "0.002 HIVE".into(),
            reward_hbd: "0.001 HBD".into(),
            reward_vests: "0.000003 VESTS".into(),
        });
        let bytes = op.encode(&StubKeys).unwrap();
        assert_eq!(bytes[0], 39);
        // account, then the three assets back to back
        // each asset is 16 bytes: amount, precision, padded symbol
        let assets = &bytes[3..];
        assert_eq!(&assets[..8], &2i64.to_le_bytes());
        assert_eq!(&assets[16..24], &1i64.to_le_bytes());
        assert_eq!(&assets[32..40], &3i64.to_le_bytes());
    }

    #[test]
    fn account_update_without_authorities() {
        let op = Operation::AccountUpdate(AccountUpdateOperation {
            account: "sniperduel17".into(),
            owner: None,
            active: None,
            posting: None,
            memo_key: "STM6n4WcwyiC63udKYR8jDFuzG9T48dhy2Qb5sVmQ9MyNuKM7xE29".into(),
            json_metadata: r#"{"foo":"bar"}"#.into(),
        });
        let bytes = op.encode(&StubKeys).unwrap();
        assert_eq!(bytes[0], 10);
        let mut cursor = 1 + 1 + "sniperduel17".len();
        // each absent authority is exactly one zero byte
        assert_eq!(&bytes[cursor..cursor + 3], [0x00, 0x00, 0x00]);
        cursor += 3;
        assert_eq!(&bytes[cursor..cursor + 33], [0xab; 33]);
        cursor += 33;
        assert_eq!(&bytes[cursor..], b"\x0d{\"foo\":\"bar\"}");
    }

    #[test]
    fn present_authority_is_flag_plus_structure() {
        let op = Operation::AccountUpdate(AccountUpdateOperation {
            account: "a".into(),
            owner: Some(Authority {
                weight_threshold: 1,
                account_auths: vec![("bob".into(), 1)],
                key_auths: vec![],
            }),
            active: None,
            posting: None,
            memo_key: "STM6key".into(),
            json_metadata: String::new(),
        });
        let bytes = op.encode(&StubKeys).unwrap();
        let auth = &bytes[3..];
        assert_eq!(auth[0], 0x01);
        assert_eq!(&auth[1..5], &1u32.to_le_bytes());
        assert_eq!(auth[5], 0x01); // one account auth
        assert_eq!(&auth[6..10], b"\x03bob");
        assert_eq!(&auth[10..12], &1u16.to_le_bytes());
        assert_eq!(auth[12], 0x00); // no key auths
        // active and posting stay absent
        assert_eq!(&auth[13..15], [0x00, 0x00]);
    }

    #[test]
    fn bad_memo_key_aborts_encoding() {
        let op = Operation::AccountUpdate(AccountUpdateOperation {
            account: "a".into(),
            owner: None,
            active: None,
            posting: None,
            memo_key: String::new(),
            json_metadata: String::new(),
        });
        assert!(matches!(
            op.encode(&StubKeys),
            Err(FormatError::PublicKey { .. })
        ));
    }

    #[test]
    fn serde_json_shape_matches_node_style() {
        let text = serde_json::to_string(&vote_op()).unwrap();
        assert!(text.starts_with(r#"{"type":"vote","value":{"voter":"xeroc""#));
        let back: Operation = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vote_op());
    }
}
