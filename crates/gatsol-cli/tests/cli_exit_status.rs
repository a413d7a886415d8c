#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{TempDir, tempdir};

struct Install {
    root: TempDir,
    predict_dir: PathBuf,
    fasta: PathBuf,
    out: PathBuf,
}

impl Install {
    fn new() -> Self {
        let root = tempdir().unwrap();
        let predict_dir = root.path().join("Predict");
        fs::create_dir_all(predict_dir.join("tools")).unwrap();
        fs::create_dir_all(predict_dir.join("NEED_to_PREPARE/pdb")).unwrap();
        fs::write(predict_dir.join("NEED_to_PREPARE/pdb/seq1.pdb"), "END\n").unwrap();

        let fasta = root.path().join("input.fasta");
        fs::write(&fasta, ">seq1\nMKTAYIAKQR\n").unwrap();

        Self {
            out: root.path().join("results.csv"),
            predict_dir,
            fasta,
            root,
        }
    }

    fn predict(&self, extra: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gatsolkit"))
            .current_dir(self.root.path())
            .arg("predict")
            .arg("--fasta")
            .arg(&self.fasta)
            .arg("--out")
            .arg(&self.out)
            .arg("--predict-dir")
            .arg(&self.predict_dir)
            .args(extra)
            .output()
            .unwrap()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_fake_pipeline(tools: &Path, table: &str) {
    fs::write(
        tools.join("fake_predict.sh"),
        format!("cat > ../Output.csv <<'CSV'\n{}CSV\n", table),
    )
    .unwrap();
}

#[test]
fn failing_pipeline_exits_with_code_one() {
    let install = Install::new();

    let output = install.predict(&["-S", "pipeline.command=false"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("pipeline execution error"));
    assert!(!install.out.exists());
}

#[test]
fn missing_structure_exits_with_code_one_and_names_the_id() {
    let install = Install::new();
    fs::write(&install.fasta, ">seq1\nMKT\n>seq9\nAGV\n").unwrap();

    let output = install.predict(&["-S", "pipeline.command=true"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("missing structure asset"));
    assert!(err.contains("seq9"));
}

#[test]
fn successful_run_exits_zero_and_writes_table() {
    let install = Install::new();
    write_fake_pipeline(
        &install.predict_dir.join("tools"),
        "id,sequence,Solubility_hat\nseq1,MKTAYIAKQR,0.734\n",
    );

    let output = install.predict(&["-S", "pipeline.command=sh fake_predict.sh"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Done. Results written to"));
    let table = fs::read_to_string(&install.out).unwrap();
    assert!(table.contains("seq1,MKTAYIAKQR,GATSol,0.734,NA,NA"));
}
