use std::process::Command;

#[derive(Debug)]
struct Report {
    ac_capacity_mw: f64,
    modules: u64,
    annual_energy_mwh: f64,
    avg_capacity_factor_pct: f64,
}

#[test]
fn presets_run_via_cli_and_scale_with_load() {
    let baseline = run_and_parse(&["--preset", "baseline"]);
    let small = run_and_parse(&["--preset", "small_site"]);
    let hyperscale = run_and_parse(&["--preset", "hyperscale"]);

    assert!((baseline.ac_capacity_mw - 30.0).abs() < 0.01, "{baseline:?}");
    assert_eq!(baseline.modules, 62_400);

    // 1.1 / 0.25 = 4.4 MWac, 15 / 0.15 = 100 MWac
    assert!((small.ac_capacity_mw - 4.4).abs() < 0.01, "{small:?}");
    assert!((hyperscale.ac_capacity_mw - 100.0).abs() < 0.01, "{hyperscale:?}");

    assert!(small.annual_energy_mwh < baseline.annual_energy_mwh);
    assert!(baseline.annual_energy_mwh < hyperscale.annual_energy_mwh);
}

#[test]
fn scenario_files_run_via_cli() {
    let alberta = run_and_parse(&["--scenario", "scenarios/baseline.toml"]);
    let southern = run_and_parse(&["--scenario", "scenarios/southern_site.toml"]);

    assert_eq!(alberta.modules, 62_400);
    assert!(southern.annual_energy_mwh > 0.0);
    assert!(
        (alberta.avg_capacity_factor_pct - southern.avg_capacity_factor_pct).abs() > 1e-6,
        "different sites should yield different capacity factors: {alberta:?} {southern:?}"
    );
}

#[test]
fn overrides_apply_after_preset() {
    let report = run_and_parse(&["--preset", "baseline", "--load-mw", "2.5"]);
    assert!((report.ac_capacity_mw - 15.0).abs() < 0.01, "{report:?}");
}

#[test]
fn zero_capacity_factor_fails_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-plant-sizer"))
        .args(["--capacity-factor", "0"])
        .output()
        .expect("pv-plant-sizer process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("load.capacity_factor"), "stderr={stderr}");
}

#[test]
fn zero_load_fails_cleanly() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-plant-sizer"))
        .args(["--load-mw", "0"])
        .output()
        .expect("pv-plant-sizer process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("load.load_mw"), "stderr={stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-plant-sizer"))
        .args(["--preset", "nonexistent"])
        .output()
        .expect("pv-plant-sizer process should run");
    assert!(!output.status.success());
}

fn run_and_parse(args: &[&str]) -> Report {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-plant-sizer"))
        .args(args)
        .output()
        .expect("pv-plant-sizer process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_report(&stdout)
}

fn parse_report(stdout: &str) -> Report {
    Report {
        ac_capacity_mw: parse_value(stdout, "Solar AC capacity:"),
        modules: parse_value(stdout, "PV modules:") as u64,
        annual_energy_mwh: parse_value(stdout, "Annual energy:"),
        avg_capacity_factor_pct: parse_value(stdout, "Avg capacity factor:"),
    }
}

/// First number after `label` on the line that starts with it.
fn parse_value(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|l| l.starts_with(label))
        .unwrap_or_else(|| panic!("missing \"{label}\" line in output:\n{stdout}"));
    line[label.len()..]
        .split_whitespace()
        .next()
        .map(|v| v.trim_end_matches('%'))
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("unparseable value in line: {line}"))
}
