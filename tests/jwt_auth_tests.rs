// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that session tokens in the expected format can be
//! decoded with the middleware's claims type and validation settings.

use daybook::middleware::auth::Claims;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

mod common;

#[test]
fn test_jwt_roundtrip() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let user_id = Uuid::new_v4();

    let token = common::create_test_jwt(user_id, signing_key);

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, user_id.to_string());
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_subject_parses_as_uuid() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let user_id = Uuid::new_v4();

    let token = common::create_test_jwt(user_id, signing_key);

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let parsed: Uuid = token_data
        .claims
        .sub
        .parse()
        .expect("sub claim should be a UUID");
    assert_eq!(parsed, user_id);
}

#[test]
fn test_jwt_wrong_key_fails() {
    let token = common::create_test_jwt(Uuid::new_v4(), b"test_signing_key_32_bytes_long!!");

    let key = DecodingKey::from_secret(b"different_key_32_bytes_long!!!!!");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}
