use serde::de::{Deserialize, Deserializer, Error};

/// Accept only strings usable as a single URL path segment: non-empty and
/// without any `/`.
pub fn path_segment<'a, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'a>,
{
    String::deserialize(deserializer).and_then(|s| {
        if s.is_empty() {
            Err(Error::custom("invalid path segment: empty"))
        } else if s.contains('/') {
            Err(Error::custom(format!("invalid path segment: {}", s)))
        } else {
            Ok(s)
        }
    })
}

#[test]
fn test_path_segment() {
    #[derive(Debug, PartialEq, Eq, serde::Deserialize)]
    struct T {
        #[serde(deserialize_with = "path_segment")]
        val: String,
    }

    assert_eq!(
        serde_json::from_str::<T>(r#"{"val": "abc123"}"#).unwrap(),
        T {
            val: "abc123".into()
        },
    );

    assert!(serde_json::from_str::<T>(r#"{"val": ""}"#).is_err());
    assert!(serde_json::from_str::<T>(r#"{"val": "a/b"}"#).is_err());
    assert!(serde_json::from_str::<T>(r#"{"val": 1}"#).is_err());
}
