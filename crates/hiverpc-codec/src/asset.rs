//! Asset amount codec: `"<decimal amount> <symbol>"` to wire form.

use hiverpc_core::error::FormatError;

/// Width of the NUL-padded symbol field on the wire.
const SYMBOL_WIDTH: usize = 7;

/// An asset amount scaled and canonicalised for serialization.
///
/// The wire form is the scaled amount as `i64` little-endian, one precision
/// byte, and the symbol left-justified and NUL-padded to seven bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub amount: i64,
    pub precision: u8,
    pub symbol: String,
}

impl Asset {
    /// Parse an asset string such as `"1.500 HIVE"`.
    ///
    /// The input must split into exactly two whitespace-separated tokens.
    /// Precision is 6 for the vesting token (VESTS) and 3 for everything
    /// else; the amount is scaled by `10^precision` and rounded. HIVE and
    /// HBD are substituted with their legacy wire names STEEM and SBD.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let mut tokens = input.split_whitespace();
        let (amount_str, symbol) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(amount), Some(symbol), None) => (amount, symbol),
            _ => {
                return Err(FormatError::AssetFormat {
                    input: input.to_string(),
                })
            }
        };

        let precision: u8 = if symbol == "VESTS" { 6 } else { 3 };

        let symbol = match symbol {
            "HIVE" => "STEEM",
            "HBD" => "SBD",
            other => other,
        };
        if symbol.len() > SYMBOL_WIDTH {
            return Err(FormatError::SymbolTooLong {
                symbol: symbol.to_string(),
            });
        }

        let amount: f64 = amount_str.parse().map_err(|_| FormatError::AmountParse {
            amount: amount_str.to_string(),
        })?;
        let scaled = (amount * 10f64.powi(i32::from(precision))).round() as i64;

        Ok(Self {
            amount: scaled,
            precision,
            symbol: symbol.to_string(),
        })
    }

    /// Append the wire form to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.amount.to_le_bytes());
        buf.push(self.precision);
        let mut field = [0u8; SYMBOL_WIDTH];
        field[..self.symbol.len()].copy_from_slice(self.symbol.as_bytes());
        buf.extend_from_slice(&field);
    }
}

/// Parse and append in one step.
pub(crate) fn put_asset(buf: &mut Vec<u8>, input: &str) -> Result<(), FormatError> {
    Asset::parse(input)?.write_to(buf);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hive_maps_to_legacy_steem() {
        let asset = Asset::parse("1.500 HIVE").unwrap();
        assert_eq!(asset.amount, 1500);
        assert_eq!(asset.precision, 3);
        assert_eq!(asset.symbol, "STEEM");

        let mut buf = Vec::new();
        asset.write_to(&mut buf);
        assert_eq!(&buf[..8], &1500i64.to_le_bytes());
        assert_eq!(buf[8], 3);
        assert_eq!(&buf[9..], b"STEEM\0\0");
    }

    #[test]
    fn vests_uses_precision_six() {
        let asset = Asset::parse("2.000000 VESTS").unwrap();
        assert_eq!(asset.amount, 2_000_000);
        assert_eq!(asset.precision, 6);

        let mut buf = Vec::new();
        asset.write_to(&mut buf);
        assert_eq!(buf[8], 6);
        assert_eq!(&buf[9..], b"VESTS\0\0");
    }

    #[test]
    fn hbd_maps_to_sbd() {
        let asset = Asset::parse("1.0 HBD").unwrap();
        assert_eq!(asset.amount, 1000);
        assert_eq!(asset.symbol, "SBD");

        let mut buf = Vec::new();
        asset.write_to(&mut buf);
        assert_eq!(&buf[9..], b"SBD\0\0\0\0");
    }

    #[test]
    fn single_token_is_a_format_error() {
        let err = Asset::parse("bad").unwrap_err();
        assert!(matches!(err, FormatError::AssetFormat { .. }));
    }

    #[test]
    fn three_tokens_is_a_format_error() {
        let err = Asset::parse("1.0 HIVE extra").unwrap_err();
        assert!(matches!(err, FormatError::AssetFormat { .. }));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = Asset::parse("lots HIVE").unwrap_err();
        assert!(matches!(err, FormatError::AmountParse { .. }));
    }

    #[test]
    fn oversized_symbol_is_rejected() {
        let err = Asset::parse("1.0 TOOLONGSYM").unwrap_err();
        assert!(matches!(err, FormatError::SymbolTooLong { .. }));
    }

    #[test]
    fn fractional_scaling_rounds() {
        // 0.0005 at precision 3 lands exactly between integers; round() away
        // from zero gives 1.
        let asset = Asset::parse("0.0005 STEEM").unwrap();
        assert_eq!(asset.amount, 1);
    }

    #[test]
    fn negative_amounts_are_preserved() {
        let asset = Asset::parse("-3.141 STEEM").unwrap();
        assert_eq!(asset.amount, -3141);
    }
}
