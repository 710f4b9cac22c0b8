//! Serde adapters for byte buffers

/// Serialize byte buffers as standard Base64 strings.
///
/// Works for `Vec<u8>` and fixed-size arrays such as `[u8; 32]`; decoding a
/// string of the wrong length into an array is a deserialization error.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Envelope {
///     #[serde(with = "platform::encoding::base64_bytes")]
///     image: [u8; 4],
/// }
/// ```
pub mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::crypto::{from_base64, to_base64};

    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        serializer.serialize_str(&to_base64(bytes.as_ref()))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: TryFrom<Vec<u8>>,
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let bytes = from_base64(&encoded).map_err(de::Error::custom)?;
        let len = bytes.len();
        T::try_from(bytes)
            .map_err(|_| de::Error::invalid_length(len, &"a buffer of the expected length"))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Fixed {
        #[serde(with = "super::base64_bytes")]
        digest: [u8; 4],
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dynamic {
        #[serde(with = "super::base64_bytes")]
        bytes: Vec<u8>,
    }

    #[test]
    fn test_fixed_array_as_base64() {
        let value = Fixed {
            digest: [0x61, 0x62, 0x63, 0x64],
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"digest":"YWJjZA=="}"#);

        let decoded: Fixed = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_vec_as_base64() {
        let json = r#"{"bytes":"aGVsbG8="}"#;
        let decoded: Dynamic = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.bytes, b"hello");
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let json = r#"{"digest":"aGVsbG8="}"#;
        assert!(serde_json::from_str::<Fixed>(json).is_err());
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let json = r#"{"bytes":"not base64!"}"#;
        assert!(serde_json::from_str::<Dynamic>(json).is_err());
    }
}
