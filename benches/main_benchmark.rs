use criterion::{Criterion, criterion_group, criterion_main};
use kiln::build::{BuildProfile, Settings, map_to_artifact, plan, scan};
use kiln::config::KilnConfig;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};

const MOCK_CONFIG: &str = r#"
[project]
name = "benchmark_project"
compiler = "clang"

[paths]
include = ["include", "vendor", "third_party/sdl"]

[build]
flag_helpers = []
cflags = ["-std=c11"]
jobs = 8
"#;

fn setup_tree() -> PathBuf {
    let root = std::env::temp_dir().join("kiln_bench_tree");
    if !root.exists() {
        for dir in 0..10 {
            let sub = root.join("src").join(format!("module_{dir}"));
            fs::create_dir_all(&sub).unwrap();
            for file in 0..20 {
                fs::write(sub.join(format!("unit_{file}.c")), "int x;\n").unwrap();
                fs::write(sub.join(format!("unit_{file}.h")), "extern int x;\n").unwrap();
            }
        }
    }
    root
}

fn bench_config_parse(c: &mut Criterion) {
    c.bench_function("parse_kiln_toml", |b| {
        b.iter(|| {
            let _: KilnConfig = toml::from_str(black_box(MOCK_CONFIG)).unwrap();
        })
    });
}

fn bench_map_to_artifact(c: &mut Criterion) {
    let source = Path::new("./src/game/world/chunk_loader.c");
    c.bench_function("map_to_artifact", |b| {
        b.iter(|| {
            map_to_artifact(
                black_box(source),
                Path::new("./src"),
                Path::new("./obj"),
                ".o",
            )
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let root = setup_tree();
    let src = root.join("src");
    c.bench_function("scan_200_sources", |b| {
        b.iter(|| scan(black_box(&[&src]), ".c", None))
    });
}

fn bench_plan(c: &mut Criterion) {
    let root = setup_tree();
    let config: KilnConfig = toml::from_str(MOCK_CONFIG).unwrap();
    let settings = Settings::from_config(&root, &config, BuildProfile::Debug).unwrap();
    let sources = scan(&[&settings.source_root], ".c", None);
    c.bench_function("plan_200_sources", |b| {
        b.iter(|| plan(black_box(&settings), black_box(&sources)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_config_parse,
    bench_map_to_artifact,
    bench_scan,
    bench_plan
);
criterion_main!(benches);
