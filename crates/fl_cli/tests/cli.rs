use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

use fl_io::layout::SeasonPaths;

fn write(path: &Path, v: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(v).unwrap()).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn sheet(drivers: [&str; 5], boost: &str, perks: Value) -> Value {
    json!({
        "Driver 1": drivers[0], "Driver 2": drivers[1], "Driver 3": drivers[2],
        "Driver 4": drivers[3], "Driver 5": drivers[4],
        "Constructor 1": "X", "Constructor 2": "Y",
        "DRS Boost": boost, "Extra DRS": "None",
        "Penalties": 0, "Perks": perks
    })
}

/// Two teams, one completed race of two.
fn season(root: &Path) -> SeasonPaths {
    let p = SeasonPaths::new(root, "2024");
    write(
        &p.info(),
        &json!({ "2024": {
            "Races": ["Bahrain", "Jeddah"],
            "Managers": { "Ann": ["Ann GP"], "Ben": ["Ben Racing"] },
            "Team": ["Driver 1", "Driver 2", "Driver 3", "Driver 4", "Driver 5",
                     "Constructor 1", "Constructor 2", "DRS Boost", "Extra DRS", "Penalties", "Perks"]
        }}),
    );
    write(
        &p.lineup_results(),
        &json!({
            "Driver Points": { "A": [10], "B": [-5], "C": [3], "D": [0], "E": [-1], "F": [6] },
            "Driver Values": { "A": [30], "B": [10], "C": [8], "D": [6], "E": [5], "F": [7] },
            "Team Points": { "X": [4], "Y": [-2] },
            "Team Values": { "X": [20], "Y": [12] }
        }),
    );
    // Ann: 10-5+3+0-1+4-2 = 9, boost A +10 = 19
    write(
        &p.team_sheets("Ann", "Ann GP"),
        &json!({ "Bahrain": sheet(["A", "B", "C", "D", "E"], "A", json!("None")) }),
    );
    // Ben: 10+3+0-1+6+4-2 = 20, no negatives drops -1 and -2 = 23
    write(
        &p.team_sheets("Ben", "Ben Racing"),
        &json!({ "Bahrain": sheet(["A", "C", "D", "E", "F"], "None", json!("No Negative")) }),
    );
    p
}

fn fl(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fl").unwrap();
    cmd.arg("--root").arg(root).arg("--year").arg("2024").arg("-q");
    cmd
}

#[test]
fn score_writes_documents_then_skips() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());

    fl(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("scored 1 races for 2 teams"));

    for path in p.outputs() {
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert!(p.run_record().is_file());

    let check = read(&p.manager_check());
    let order: Vec<_> = check.as_object().unwrap().keys().cloned().collect();
    assert_eq!(order, vec!["Ben Racing", "Ann GP"]);
    assert_eq!(check["Ben Racing"], json!(23.0));
    assert_eq!(read(&p.manager_results())["Team Points"]["Ann"]["Ann GP"], json!([19.0]));

    fl(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("outputs up to date"));

    fl(dir.path())
        .args(["score", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scored 1 races"));
}

#[test]
fn record_from_another_engine_version_recomputes() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());
    fl(dir.path()).arg("score").assert().success();

    let mut record = read(&p.run_record());
    record["engine_version"] = json!("0.0.1-old");
    write(&p.run_record(), &record);

    fl(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("scored 1 races"));
    assert_eq!(read(&p.run_record())["engine_version"], json!(env!("CARGO_PKG_VERSION")));
}

#[test]
fn documents_follow_info_order() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());
    let mut info = read(&p.info());
    info["2024"]["Managers"] = json!({ "Ben": ["Ben Racing"], "Ann": ["Ann GP"] });
    write(&p.info(), &info);

    fl(dir.path()).arg("score").assert().success();
    let results = read(&p.manager_results());
    let order: Vec<_> = results["Manager Points"].as_object().unwrap().keys().cloned().collect();
    assert_eq!(order, vec!["Ben", "Ann"]);
}

#[test]
fn league_check_mismatch_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());
    write(&p.league_check(), &json!({ "Ann GP": 19, "Ben Racing": 22 }));

    fl(dir.path())
        .arg("score")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("Ben Racing: computed 23.00, league 22.00"));

    // skipped run still checks the stored standings
    fl(dir.path())
        .arg("score")
        .assert()
        .code(3)
        .stdout(predicate::str::contains("outputs up to date"));

    write(&p.league_check(), &json!({ "Ann GP": 19, "Ben Racing": 23 }));
    fl(dir.path())
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("league check ok (2 teams)"));
}

#[test]
fn standings_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    season(dir.path());

    fl(dir.path())
        .args(["standings", "--top", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ben Racing").and(predicate::str::contains("Ann GP").not()));
}

#[test]
fn validate_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());

    fl(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("inputs ok: 1 of 2 races completed, 2 teams"));
    assert!(!p.managers_dir().exists());
}

#[test]
fn error_buckets_map_to_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    fl(dir.path()).arg("validate").assert().code(4);

    let p = season(dir.path());
    let path = p.team_sheets("Ann", "Ann GP");
    let mut v = read(&path);
    v["Bahrain"]["Perks"] = json!("Turbo Boost");
    write(&path, &v);
    fl(dir.path())
        .arg("validate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Ann GP"));

    v["Bahrain"]["Perks"] = json!("None");
    v["Bahrain"]["Driver 2"] = json!("Zed");
    write(&path, &v);
    fl(dir.path()).arg("validate").assert().code(5);
}

#[test]
fn week_carries_sheets_forward() {
    let dir = tempfile::tempdir().unwrap();
    let p = season(dir.path());

    fl(dir.path())
        .args(["week", "--race", "Jeddah"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann / Ann GP: carried forward from Bahrain"));
    let ann = read(&p.team_sheets("Ann", "Ann GP"));
    assert_eq!(ann["Jeddah"], ann["Bahrain"]);

    fl(dir.path())
        .args(["week", "--race", "Jeddah"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ben / Ben Racing: kept"));

    fl(dir.path()).args(["week", "--race", "Monaco"]).assert().code(2);
}
