use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SUBDIRS: [&str; 3] = ["Histogramas", "Imagens_transformadas", "Funcoes_Transformacao"];

/// Working directory laid out the way the default batch expects
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("input")).expect("Failed to create input dir");
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_input(&self, name: &str, seed: u32) -> PathBuf {
        let path = self.path().join("input").join(name);
        GrayImage::from_fn(64, 48, |x, y| Luma([((x * 3 + y * seed) % 256) as u8]))
            .save(&path)
            .expect("Failed to write input image");
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_graylevel-transforms"))
            .args(args)
            .current_dir(self.path())
            .env_remove("GRAYLEVEL_OUTPUT_DIR")
            .env_remove("GRAYLEVEL_INPUT_DIR")
            .env_remove("GRAYLEVEL_MANIFEST")
            .output()
            .expect("Failed to run graylevel-transforms")
    }

    fn output_files(&self, subdir: &str) -> Vec<String> {
        let dir = self.path().join("output").join(subdir);
        let mut names: Vec<String> = fs::read_dir(&dir)
            .unwrap_or_else(|_| panic!("Missing {}", dir.display()))
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[test]
fn test_default_batch_writes_output_tree() {
    let ws = Workspace::new();
    for (i, name) in ["input1.tif", "input2.tif", "input3.tif", "input4.tif"].iter().enumerate() {
        ws.write_input(name, i as u32 + 1);
    }

    let output = ws.run(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    for subdir in SUBDIRS {
        assert!(ws.path().join("output").join(subdir).is_dir(), "{} missing", subdir);
    }

    let images = ws.output_files("Imagens_transformadas");
    assert_eq!(images.len(), 16);
    assert!(images.contains(&"input3_gamma_transform.png".to_string()));

    let histograms = ws.output_files("Histogramas");
    assert_eq!(histograms.len(), 16);
    assert!(histograms.contains(&"input1_hist_eq.png".to_string()));

    assert_eq!(ws.output_files("Funcoes_Transformacao").len(), 4);

    // Only the fourth input gets local equalization
    assert_eq!(
        ws.output_files("EqualizacaoLocal"),
        vec!["input4_local_equalization.png".to_string()]
    );
}

#[test]
fn test_missing_input_is_skipped() {
    let ws = Workspace::new();
    ws.write_input("input1.tif", 1);
    ws.write_input("input3.tif", 3);

    let output = ws.run(&[]);
    assert!(output.status.success());

    let images = ws.output_files("Imagens_transformadas");
    assert!(images.iter().any(|n| n.starts_with("input1_")));
    assert!(images.iter().any(|n| n.starts_with("input3_")));
    assert!(!images.iter().any(|n| n.starts_with("input2_")));
    assert!(!ws.path().join("output").join("EqualizacaoLocal").exists());

    let logs = String::from_utf8_lossy(&output.stdout).to_string()
        + &String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("input2.tif"), "Expected an error mentioning input2.tif");
}

#[test]
fn test_manifest_selects_inputs() {
    let ws = Workspace::new();
    let photo = ws.write_input("photo.png", 5);
    let manifest = ws.path().join("batch.json");
    fs::write(
        &manifest,
        format!(
            r#"[{{"path": {:?}, "local_equalization": true}}]"#,
            photo.display().to_string()
        ),
    )
    .unwrap();

    let output = ws.run(&["--manifest", "batch.json", "--output-dir", "output"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        ws.output_files("Funcoes_Transformacao"),
        vec!["photo_funcao_transformacao_eq.png".to_string()]
    );
    assert_eq!(
        ws.output_files("EqualizacaoLocal"),
        vec!["photo_local_equalization.png".to_string()]
    );
}

#[test]
fn test_invalid_manifest_fails() {
    let ws = Workspace::new();
    fs::write(ws.path().join("batch.json"), "not json").unwrap();

    let output = ws.run(&["--manifest", "batch.json"]);

    assert!(!output.status.success());
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = Workspace::new();
    ws.write_input("input4.tif", 7);

    assert!(ws.run(&[]).status.success());
    let chart = ws.path().join("output/Histogramas/input4_hist_log.png");
    let local = ws.path().join("output/EqualizacaoLocal/input4_local_equalization.png");
    let first = (fs::read(&chart).unwrap(), fs::read(&local).unwrap());

    assert!(ws.run(&[]).status.success());
    let second = (fs::read(&chart).unwrap(), fs::read(&local).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_transformed_images_keep_input_size() {
    let ws = Workspace::new();
    ws.write_input("input1.tif", 2);

    assert!(ws.run(&[]).status.success());

    for name in ["input1_original.png", "input1_log_transform.png", "input1_global_equalization.png"] {
        let img = image::open(ws.path().join("output/Imagens_transformadas").join(name)).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48), "{}", name);
    }
}

fn run_viewer(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_viewer"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run viewer")
}

#[test]
fn test_viewer_previews_image() {
    let ws = Workspace::new();
    GrayImage::from_pixel(40, 20, Luma([0]))
        .save(ws.path().join("teste.png"))
        .unwrap();

    let output = run_viewer(ws.path(), &["--width", "20"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.lines().all(|l| l == "@".repeat(20)));
}

#[test]
fn test_viewer_reports_decode_failure() {
    let ws = Workspace::new();

    let output = run_viewer(ws.path(), &["missing.png"]);

    assert_eq!(output.status.code(), Some(2));
}
