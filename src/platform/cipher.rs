//! Signature cipher records
//!
//! Some format descriptors carry no direct URL; instead the watch page
//! embeds a `signatureCipher` attribute, itself form-urlencoded with the
//! obfuscated signature (`s`), the query parameter name to attach it under
//! (`sp`) and the bare stream URL (`url`). Decrypting the signature
//! requires evaluating the per-session player script and is deliberately
//! out of scope; the record is kept so `info` can show cipher-gated
//! formats and the downloader can skip them.

/// Default query parameter name when the descriptor does not name one.
const DEFAULT_SIGNATURE_PARAM: &str = "signature";

/// A parsed signature cipher descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCipher {
    /// Bare stream URL without the signature
    pub url: String,
    /// Query parameter the signature must be attached under
    pub signature_param: String,
    /// The (still obfuscated) signature value
    pub signature: String,
}

impl SignatureCipher {
    /// Parse the form-urlencoded `signatureCipher` attribute.
    ///
    /// Returns `None` when the `url` field is missing.
    pub fn parse(raw: &str) -> Option<SignatureCipher> {
        let mut url = None;
        let mut signature = String::new();
        let mut signature_param = None;

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "url" => url = Some(value.into_owned()),
                "s" => signature = value.into_owned(),
                "sp" => signature_param = Some(value.into_owned()),
                _ => {}
            }
        }

        Some(SignatureCipher {
            url: url?,
            signature_param: signature_param
                .unwrap_or_else(|| DEFAULT_SIGNATURE_PARAM.to_string()),
            signature,
        })
    }

    /// The stream URL with the signature attached.
    ///
    /// Only valid once the signature has been deciphered; with the raw
    /// signature the CDN rejects the request.
    pub fn build_url(&self) -> String {
        format!("{}&{}={}", self.url, self.signature_param, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let raw = "s=AOq0QJ8wRQIg&sp=sig&url=https%3A%2F%2Frr1.googlevideo.com%2Fvideoplayback%3Fexpire%3D123";
        let cipher = SignatureCipher::parse(raw).unwrap();

        assert_eq!(cipher.signature, "AOq0QJ8wRQIg");
        assert_eq!(cipher.signature_param, "sig");
        assert_eq!(
            cipher.url,
            "https://rr1.googlevideo.com/videoplayback?expire=123"
        );
    }

    #[test]
    fn test_parse_defaults_signature_param() {
        let raw = "s=abc&url=https%3A%2F%2Fexample.com%2Fstream";
        let cipher = SignatureCipher::parse(raw).unwrap();
        assert_eq!(cipher.signature_param, "signature");
    }

    #[test]
    fn test_parse_missing_url() {
        assert!(SignatureCipher::parse("s=abc&sp=sig").is_none());
    }

    #[test]
    fn test_build_url() {
        let cipher = SignatureCipher {
            url: "https://example.com/stream?a=1".to_string(),
            signature_param: "sig".to_string(),
            signature: "SIGVALUE".to_string(),
        };
        assert_eq!(
            cipher.build_url(),
            "https://example.com/stream?a=1&sig=SIGVALUE"
        );
    }

    #[test]
    fn test_build_url_default_param() {
        let cipher = SignatureCipher {
            url: "https://example.com/stream".to_string(),
            signature_param: "signature".to_string(),
            signature: "abc".to_string(),
        };
        assert_eq!(
            cipher.build_url(),
            "https://example.com/stream&signature=abc"
        );
    }
}
