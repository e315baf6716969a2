//! Byte-exact comparisons of generated files against `tests/goldens/`.
//!
//! Set `GAPIC_BLESS=1` to rewrite the stored files from the current output.

use std::path::{Path, PathBuf};

use gapic_codegen::testing;
use gapic_codegen_rust::{Generator, LanguageCodegen};
use gapic_core::{File, Transport};
use gapic_descriptor::{GeneratorConfig, GeneratorSection, ServiceConfig};
use gapic_model::GapicContext;

/// Fixtures whose whole output is kept under `tests/goldens/<fixture>/`.
const FIXTURES: &[&str] = &["echo", "library"];

fn fixture(name: &str) -> GapicContext {
    match name {
        "echo" => testing::echo_model(),
        "library" => testing::library_model(),
        other => panic!("unknown fixture {other}"),
    }
}

fn golden_path(fixture: &str, path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/goldens")
        .join(fixture)
        .join(path)
}

/// Paths of the stored golden files of `fixture`, relative to its directory.
fn stored(fixture: &str) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap().flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }
    let root = golden_path(fixture, "");
    let mut out = Vec::new();
    if root.exists() {
        walk(&root, &root, &mut out);
    }
    out.sort();
    out
}

#[test]
fn test_goldens() {
    let bless = std::env::var_os("GAPIC_BLESS").is_some();
    for name in FIXTURES {
        let files = Generator::new().render(&fixture(name)).unwrap();
        for file in &files {
            let golden = golden_path(name, &file.path().to_string_lossy());
            if bless {
                std::fs::create_dir_all(golden.parent().unwrap()).unwrap();
                std::fs::write(&golden, file.content()).unwrap();
                continue;
            }
            let expected = std::fs::read_to_string(&golden)
                .unwrap_or_else(|e| panic!("{}: {e}; run with GAPIC_BLESS=1", golden.display()));
            testing::assert_content_eq(&expected, file.content());
        }

        let mut generated: Vec<PathBuf> = files.iter().map(|f| f.path().to_path_buf()).collect();
        generated.sort();
        assert_eq!(stored(name), generated, "stale goldens for {name}");
    }
}

fn assert_parses(files: &[File]) {
    for file in files {
        if let Err(e) = syn::parse_file(file.content()) {
            panic!("{} does not parse: {e}\n{}", file.path().display(), file.content());
        }
    }
}

#[test]
fn test_every_file_parses() {
    assert_parses(&Generator::new().render(&testing::echo_model()).unwrap());
    for transport in [Transport::Grpc, Transport::Rest, Transport::GrpcRest] {
        let config = GeneratorConfig {
            generator: GeneratorSection {
                transport: Some(transport),
                ..GeneratorSection::default()
            },
            ..GeneratorConfig::default()
        };
        let model = testing::model(testing::LIBRARY_PROTO, ServiceConfig::default(), config);
        assert_parses(&Generator::new().render(&model).unwrap());
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let first = Generator::new().render(&testing::echo_model()).unwrap();
    let second = Generator::new().render(&testing::echo_model()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_generate_writes_then_reports_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let model = testing::library_model();

    let first = Generator::new().generate(&model, dir.path()).unwrap();
    assert!(first.unchanged.is_empty());
    assert!(first.written.contains(&"src/resources.rs".to_string()));
    assert!(dir.path().join("samples/library_service_client/get_shelf.rs").exists());

    let second = Generator::new().generate(&model, dir.path()).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), first.written.len());
}
