//! Benchmarks for the token and digest hot paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use warden_auth_core::{ArgonHasher, AuthConfig, CredentialHasher, TokenIssuer};
use warden_types::UserId;

fn bench_config() -> AuthConfig {
    AuthConfig::try_new(
        "bench-access-secret-0123456789abcdef",
        15 * 60 * 1000,
        "bench-refresh-secret-0123456789abcdef",
        7 * 24 * 3600 * 1000,
        "http://localhost:3000/auth",
        false,
    )
    .unwrap()
}

fn bench_token_operations(c: &mut Criterion) {
    let issuer = TokenIssuer::new(&bench_config());

    c.bench_function("issue_pair", |b| {
        b.iter(|| issuer.issue_pair(black_box(UserId(42))).unwrap());
    });

    let pair = issuer.issue_pair(UserId(42)).unwrap();

    c.bench_function("decode_access", |b| {
        b.iter(|| issuer.decode_access(black_box(&pair.access_token)).unwrap());
    });

    c.bench_function("decode_refresh", |b| {
        b.iter(|| issuer.decode_refresh(black_box(&pair.refresh_token)).unwrap());
    });
}

fn bench_digest_operations(c: &mut Criterion) {
    let hasher = ArgonHasher;
    let issuer = TokenIssuer::new(&bench_config());
    let pair = issuer.issue_pair(UserId(42)).unwrap();

    c.bench_function("argon2_hash_refresh_token", |b| {
        b.iter(|| hasher.hash(black_box(&pair.refresh_token)).unwrap());
    });

    let digest = hasher.hash(&pair.refresh_token).unwrap();

    c.bench_function("argon2_verify_refresh_token", |b| {
        b.iter(|| {
            hasher
                .verify(black_box(&pair.refresh_token), black_box(&digest))
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_token_operations, bench_digest_operations);
criterion_main!(benches);
