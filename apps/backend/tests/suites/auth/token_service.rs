// Properties of issued tokens: round trip, tamper detection and expiry on
// the real system clock.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use catalog_backend::auth::{
    ManualClock, TokenError, TokenIssuer, TokenService, TokenValidator,
};
use catalog_backend::SecurityConfig;
use proptest::prelude::*;

use crate::support::test_security;

fn manual_service() -> TokenService {
    TokenService::with_clock(
        &test_security(),
        Arc::new(ManualClock::at_unix(1_700_000_000)),
    )
}

fn resign_parts(header: &str, payload: &[u8], signature: &[u8]) -> String {
    format!(
        "{header}.{}.{}",
        URL_SAFE_NO_PAD.encode(payload),
        URL_SAFE_NO_PAD.encode(signature)
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn issued_tokens_validate_to_their_subject(subject in "[A-Za-z0-9_@.-]{1,64}") {
        let service = manual_service();
        let issued = service.issue(&subject).unwrap();
        prop_assert_eq!(service.validate(&issued.token).unwrap(), subject);
    }

    #[test]
    fn flipping_any_signature_bit_is_detected(index in 0usize..32, bit in 0u8..8) {
        let service = manual_service();
        let token = service.issue("user-1").unwrap().token;
        let parts: Vec<&str> = token.split('.').collect();

        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let mut signature = URL_SAFE_NO_PAD.decode(parts[2]).unwrap();
        let i = index % signature.len();
        signature[i] ^= 1 << bit;

        let tampered = resign_parts(parts[0], &payload, &signature);
        prop_assert_eq!(service.validate(&tampered), Err(TokenError::BadSignature));
    }
}

#[test]
fn rewritten_subject_fails_signature() {
    let service = manual_service();
    let token = service.issue("user-1").unwrap().token;
    let parts: Vec<&str> = token.split('.').collect();

    let mut claims: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
    claims["sub"] = "admin".into();
    let payload = serde_json::to_vec(&claims).unwrap();
    let signature = URL_SAFE_NO_PAD.decode(parts[2]).unwrap();

    assert_eq!(
        service.validate(&resign_parts(parts[0], &payload, &signature)),
        Err(TokenError::BadSignature)
    );
}

#[test]
fn token_from_another_secret_is_rejected() {
    let other = SecurityConfig::new("a-completely-different-secret-value!").unwrap();
    let token = TokenService::new(&other).issue("user-1").unwrap().token;
    assert_eq!(
        TokenService::new(&test_security()).validate(&token),
        Err(TokenError::BadSignature)
    );
}

#[test]
fn alg_none_is_rejected_before_signature() {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-1","exp":4102444800}"#);
    let token = format!("{header}.{payload}.");
    assert_eq!(
        manual_service().validate(&token),
        Err(TokenError::UnexpectedAlgorithm)
    );
}

#[test]
fn one_second_token_expires_on_the_system_clock() {
    let security = test_security().with_token_ttl(Duration::from_secs(1));
    let service = TokenService::new(&security);
    let token = service.issue("user-1").unwrap().token;

    assert_eq!(service.validate(&token).unwrap(), "user-1");
    std::thread::sleep(Duration::from_secs(2));
    assert_eq!(service.validate(&token), Err(TokenError::Expired));
}
