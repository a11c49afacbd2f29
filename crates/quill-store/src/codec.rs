use bincode::Options;
use quill_types::Article;

use crate::error::{StoreError, StoreResult};

/// Converts an [`Article`] to and from its stored byte form.
///
/// The encoding is bincode with fixed-width integers. It is private to the
/// store: only this service reads what it writes, so it is not a wire
/// contract.
pub struct ArticleCodec;

impl ArticleCodec {
    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
    }

    pub fn encode(article: &Article) -> StoreResult<Vec<u8>> {
        Self::options()
            .serialize(article)
            .map_err(|e| StoreError::Codec(e.to_string()))
    }

    /// Decode stored bytes. Truncated input, invalid UTF-8 in the name, or
    /// trailing bytes after the record all fail with [`StoreError::Codec`].
    pub fn decode(data: &[u8]) -> StoreResult<Article> {
        Self::options()
            .deserialize(data)
            .map_err(|e| StoreError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decode_empty_fails() {
        let err = ArticleCodec::decode(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn decode_truncated_fails() {
        let bytes = ArticleCodec::encode(&Article::new(1, "hello")).unwrap();
        let err = ArticleCodec::decode(&bytes[..bytes.len() - 2]).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn decode_trailing_bytes_fails() {
        let mut bytes = ArticleCodec::encode(&Article::new(1, "hello")).unwrap();
        bytes.push(0);
        let err = ArticleCodec::decode(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn decode_invalid_utf8_fails() {
        let mut bytes = ArticleCodec::encode(&Article::new(1, "ab")).unwrap();
        let n = bytes.len();
        bytes[n - 1] = 0xff;
        assert!(ArticleCodec::decode(&bytes).is_err());
    }

    proptest! {
        #[test]
        fn roundtrip(id in any::<i64>(), name in ".*") {
            let article = Article::new(id, name);
            let bytes = ArticleCodec::encode(&article).unwrap();
            prop_assert_eq!(ArticleCodec::decode(&bytes).unwrap(), article);
        }
    }
}
