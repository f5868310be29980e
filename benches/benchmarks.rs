use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twitch_release::config::{ClientConfig, DEFAULT_BASE_URI};
use twitch_release::metadata::{ChangelogType, Metadata, ReleaseType};
use twitch_release::release::{interpret_response, UPLOAD_ENDPOINT};

fn endpoint_uri(c: &mut Criterion) {
    let config = ClientConfig::new(DEFAULT_BASE_URI, "wow", "111111", "token").unwrap();

    c.bench_function("endpoint_uri", |b| {
        b.iter(|| config.endpoint_uri(black_box(UPLOAD_ENDPOINT)).unwrap())
    });
}

fn metadata_json(c: &mut Criterion) {
    let metadata = Metadata {
        changelog: "- fixed tooltips\n".repeat(64),
        changelog_type: ChangelogType::Markdown,
        display_name: "addon-1.2.0".to_string(),
        game_versions: vec![7350, 8020, 8536],
        release_type: ReleaseType::Release,
    };

    c.bench_function("metadata_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&metadata)).unwrap())
    });
}

fn response(c: &mut Criterion) {
    c.bench_function("interpret_response", |b| {
        b.iter(|| interpret_response(black_box(201), black_box(r#"{"id": 42}"#)).unwrap())
    });
}

criterion_group!(benches, endpoint_uri, metadata_json, response);
criterion_main!(benches);
