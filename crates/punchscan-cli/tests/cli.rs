use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PUNCH_CLOCKS: &str = "Punch Clocks
Order Number: SO24-02365-21800
Elapsed Time: 04h:10m:00s
6/6/2025 11:23:00 AM - 6/6/2025 3:33:00 PM
Greg Clark

Order Number: SO02-11105-21723
Elapsed Time: 07h:51m:00s
6/5/2025 7:23:00 AM - 6/5/2025 3:14:00 PM
Greg Clark";

const LABOR_REPORT: &str = "Labor Collection Report
Dear Greg Clark,
Order Number  Labor Type  Start Time  End Time  Hours
SO24-02365-21800 RegularTime 6/6/2025 10:23:00 AM 6/6/2025 2:33:00 PM 4 Hours 10 Minutes
SO02-11105-21723 RegularTime 6/5/2025 7:23 AM 6/5/2025 3:14 PM 7 Hours 51 Minutes
Total Hours 12 Hours 1 Minutes";

/// Command with the user config directory pointed into the temp dir.
fn punchscan(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("punchscan").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .current_dir(dir.path());
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn parse_punch_clock_text_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "screen.txt", PUNCH_CLOCKS);

    punchscan(&dir)
        .args(["parse", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"parsed\""))
        .stdout(predicate::str::contains("SO24-02365-21800"))
        .stdout(predicate::str::contains("Greg Clark"))
        .stdout(predicate::str::contains("4.17"))
        .stdout(predicate::str::contains("\"punch_clocks\""));
}

#[test]
fn parse_labor_report_as_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "report.txt", LABOR_REPORT);

    punchscan(&dir)
        .args(["parse", &input, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "employee_name,identifier,kind,date,start,end,duration_hours,labor_type,source_format,demo",
        ))
        .stdout(predicate::str::contains(
            "Greg Clark,SO02-11105-21723,service_order,2025-06-05",
        ))
        .stdout(predicate::str::contains("RegularTime,labor_collection,false"));
}

#[test]
fn parse_text_output_shows_total() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "screen.txt", PUNCH_CLOCKS);

    punchscan(&dir)
        .args(["parse", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 12.02h in 2 entries"));
}

#[test]
fn parse_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "screen.txt", PUNCH_CLOCKS);
    let output = dir.path().join("out.json");

    punchscan(&dir)
        .args(["parse", &input, "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("SO02-11105-21723"));
}

#[test]
fn parse_rejects_unknown_hint() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "screen.txt", PUNCH_CLOCKS);

    punchscan(&dir)
        .args(["parse", &input, "--hint", "spreadsheet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format hint: spreadsheet"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    punchscan(&dir)
        .args(["parse", "nowhere.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn parse_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "notes.docx", PUNCH_CLOCKS);

    punchscan(&dir)
        .args(["parse", &input])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn parse_nothing_found_is_empty_not_error() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "prose.txt", "The quick brown fox\njumps over the lazy dog");

    punchscan(&dir)
        .args(["parse", &input, "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No time entries found."));
}

#[test]
fn parse_strict_fails_on_empty_result() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "prose.txt", "The quick brown fox\njumps over the lazy dog");

    punchscan(&dir)
        .args(["parse", &input, "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no time entries found"));
}

#[test]
fn parse_demo_returns_tagged_entry() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "prose.txt", "nothing useful here");

    punchscan(&dir)
        .args(["parse", &input, "--demo", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo Employee,DEMO-NO-ENTRIES"))
        .stdout(predicate::str::contains(",true"))
        .stderr(predicate::str::contains("Demo entry returned"));
}

#[test]
fn classify_reports_formats() {
    let dir = TempDir::new().unwrap();
    let punch = write(dir.path(), "punch.txt", PUNCH_CLOCKS);
    let labor = write(dir.path(), "labor.txt", LABOR_REPORT);

    punchscan(&dir)
        .args(["classify", &labor])
        .assert()
        .success()
        .stdout("labor_collection\n");

    punchscan(&dir)
        .args(["classify", &punch, &labor])
        .assert()
        .success()
        .stdout(predicate::str::contains("punch.txt\tpunch_clocks"))
        .stdout(predicate::str::contains("labor.txt\tlabor_collection"));
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    write(&inputs, "a.txt", PUNCH_CLOCKS);
    write(&inputs, "b.txt", LABOR_REPORT);
    write(&inputs, "c.txt", "nothing here");
    let out = dir.path().join("out");

    let pattern = format!("{}/*.txt", inputs.display());
    punchscan(&dir)
        .args(["batch", &pattern, "--summary", "-j", "2", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files to process"))
        .stdout(predicate::str::contains("Summary written to"));

    assert!(out.join("a.json").exists());
    assert!(out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status,format,entries,total_hours"));
    assert!(lines[1].starts_with("a.txt,parsed,punch_clocks,2,12.02"));
    assert!(lines[2].starts_with("b.txt,parsed,labor_collection,2,12.02"));
    assert!(lines[3].starts_with("c.txt,parsed,generic,0,0"));
}

#[test]
fn batch_outputs_for_shared_stem_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    write(&inputs, "a.txt", PUNCH_CLOCKS);
    write(&inputs, "a.text", LABOR_REPORT);
    let out = dir.path().join("out");

    let pattern = format!("{}/a.*", inputs.display());
    punchscan(&dir)
        .args(["batch", &pattern, "-o"])
        .arg(&out)
        .assert()
        .success();

    let punch = fs::read_to_string(out.join("a.txt.json")).unwrap();
    let labor = fs::read_to_string(out.join("a.text.json")).unwrap();
    assert!(punch.contains("\"punch_clocks\""));
    assert!(labor.contains("\"labor_collection\""));
    assert!(!out.join("a.json").exists());
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    punchscan(&dir)
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("punchscan.json");
    let config = config.to_string_lossy().into_owned();

    punchscan(&dir)
        .args(["--config", &config, "config", "init"])
        .assert()
        .success();

    punchscan(&dir)
        .args(["--config", &config, "config", "set", "extraction.strict", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set extraction.strict = true"));

    punchscan(&dir)
        .args(["--config", &config, "config", "get", "extraction.strict"])
        .assert()
        .success()
        .stdout("true\n");

    punchscan(&dir)
        .args(["--config", &config, "config", "set", "extraction.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn config_file_drives_parse() {
    let dir = TempDir::new().unwrap();
    let config = write(
        dir.path(),
        "punchscan.json",
        r#"{"extraction": {"demo_fallback": true}}"#,
    );
    let input = write(dir.path(), "prose.txt", "nothing useful here");

    punchscan(&dir)
        .args(["--config", &config, "parse", &input])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"demo\""));
}
