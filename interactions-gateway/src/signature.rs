use ed25519_dalek::{PublicKey, Signature, Verifier, SIGNATURE_LENGTH};

/// Maximum age, in seconds, before a signed request is considered stale.
pub const FRESHNESS_WINDOW_SECS: i64 = 5;

/// Checks a webhook signature over `timestamp || raw_body` against the
/// configured verify key. The body is verified byte-for-byte as received;
/// it is never re-serialized. Returns false on any malformed input.
///
/// Only staleness is enforced: a timestamp from the future verifies.
pub fn verify(
    public_key: &PublicKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
    now: i64,
) -> bool {
    let mut bytes = [0u8; SIGNATURE_LENGTH];
    if hex::decode_to_slice(signature_hex, &mut bytes).is_err() {
        return false;
    }
    let signature = Signature::new(bytes);

    let signed_at: i64 = match timestamp.parse() {
        Ok(signed_at) => signed_at,
        Err(_) => return false,
    };
    if now - signed_at > FRESHNESS_WINDOW_SECS {
        return false;
    }

    let message: Vec<u8> = timestamp.bytes().chain(body.iter().copied()).collect();

    public_key.verify(&message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{ExpandedSecretKey, SecretKey};

    const NOW: i64 = 1700000000;

    fn keypair(seed: u8) -> (SecretKey, PublicKey) {
        let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
        let public = PublicKey::from(&secret);
        (secret, public)
    }

    fn sign(seed: u8, timestamp: &str, body: &[u8]) -> String {
        let (secret, public) = keypair(seed);
        let expanded = ExpandedSecretKey::from(&secret);

        let message: Vec<u8> = timestamp.bytes().chain(body.iter().copied()).collect();
        hex::encode(expanded.sign(&message, &public).to_bytes())
    }

    #[test]
    fn test_valid_signature() {
        let (_, public) = keypair(1);
        let timestamp = NOW.to_string();
        let signature = sign(1, &timestamp, b"{\"type\":1}");

        assert!(verify(&public, &signature, &timestamp, b"{\"type\":1}", NOW));
    }

    #[test]
    fn test_tampered_body() {
        let (_, public) = keypair(1);
        let timestamp = NOW.to_string();
        let signature = sign(1, &timestamp, b"{\"type\":1}");

        assert!(!verify(&public, &signature, &timestamp, b"{\"type\":2}", NOW));
    }

    #[test]
    fn test_tampered_timestamp() {
        let (_, public) = keypair(1);
        let signature = sign(1, &NOW.to_string(), b"{}");

        let other = (NOW - 1).to_string();
        assert!(!verify(&public, &signature, &other, b"{}", NOW));
    }

    #[test]
    fn test_wrong_key() {
        let (_, public) = keypair(2);
        let timestamp = NOW.to_string();
        let signature = sign(1, &timestamp, b"{}");

        assert!(!verify(&public, &signature, &timestamp, b"{}", NOW));
    }

    #[test]
    fn test_stale_timestamp_rejected_despite_valid_signature() {
        let (_, public) = keypair(1);
        let timestamp = (NOW - 10).to_string();
        let signature = sign(1, &timestamp, b"{}");

        assert!(!verify(&public, &signature, &timestamp, b"{}", NOW));
    }

    #[test]
    fn test_staleness_boundary() {
        let (_, public) = keypair(1);

        let timestamp = (NOW - FRESHNESS_WINDOW_SECS).to_string();
        let signature = sign(1, &timestamp, b"{}");
        assert!(verify(&public, &signature, &timestamp, b"{}", NOW));

        let timestamp = (NOW - FRESHNESS_WINDOW_SECS - 1).to_string();
        let signature = sign(1, &timestamp, b"{}");
        assert!(!verify(&public, &signature, &timestamp, b"{}", NOW));
    }

    // There is deliberately no lower bound: future timestamps verify. This
    // pins the current policy so a change to it has to be intentional.
    #[test]
    fn test_future_timestamp_accepted() {
        let (_, public) = keypair(1);
        let timestamp = (NOW + 3600).to_string();
        let signature = sign(1, &timestamp, b"{}");

        assert!(verify(&public, &signature, &timestamp, b"{}", NOW));
    }

    #[test]
    fn test_signature_not_hex() {
        let (_, public) = keypair(1);
        let bad = "z".repeat(SIGNATURE_LENGTH * 2);

        assert!(!verify(&public, &bad, &NOW.to_string(), b"{}", NOW));
    }

    #[test]
    fn test_signature_wrong_length() {
        let (_, public) = keypair(1);
        let timestamp = NOW.to_string();
        let truncated = &sign(1, &timestamp, b"{}")[..64];

        assert!(!verify(&public, truncated, &timestamp, b"{}", NOW));
    }

    #[test]
    fn test_timestamp_not_an_integer() {
        let (_, public) = keypair(1);
        let signature = sign(1, "not-a-number", b"{}");

        assert!(!verify(&public, &signature, "not-a-number", b"{}", NOW));
    }
}
