//! Plain-text renderers for the terminal.

use std::fmt::Write as _;

use fl_pipeline::{CheckReport, Standing, Standings};

/// Fixed-width standings table. `top` limits the number of rows.
pub fn standings_table(s: &Standings, top: Option<usize>) -> String {
    let rows: &[Standing] = match top {
        Some(n) => s.top(n),
        None => &s.rows,
    };
    let team_w = rows.iter().map(|r| r.team.as_str().chars().count()).max().unwrap_or(0).max(4);
    let mgr_w = rows.iter().map(|r| r.manager.as_str().chars().count()).max().unwrap_or(0).max(7);

    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<team_w$}  {:<mgr_w$}  {:>8}", "Pos", "Team", "Manager", "Points");
    for r in rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<team_w$}  {:<mgr_w$}  {:>8.2}",
            r.position,
            r.team.as_str(),
            r.manager.as_str(),
            r.points
        );
    }
    out
}

/// One line per mismatch, or a single "ok" line.
pub fn check_summary(c: &CheckReport) -> String {
    if c.is_clean() {
        return format!("league check ok ({} teams)\n", c.checked);
    }
    let fmt = |x: Option<f64>| x.map_or_else(|| "missing".to_string(), |v| format!("{v:.2}"));
    let mut out = format!("league check: {} mismatch(es)\n", c.mismatches.len());
    for m in &c.mismatches {
        let _ = writeln!(out, "  {}: computed {}, league {}", m.team, fmt(m.computed), fmt(m.official));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_pipeline::Mismatch;

    fn standings() -> Standings {
        Standings {
            rows: vec![
                Standing { position: 1, manager: "Ann".parse().unwrap(), team: "Ann GP".parse().unwrap(), points: 40.0 },
                Standing { position: 2, manager: "Ben".parse().unwrap(), team: "Ben Racing".parse().unwrap(), points: 36.5 },
            ],
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let t = standings_table(&standings(), None);
        let lines: Vec<_> = t.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Pos"));
        assert!(lines[1].contains("Ann GP") && lines[1].ends_with("40.00"));
        assert!(lines[2].ends_with("36.50"));
    }

    #[test]
    fn top_limits_rows() {
        assert_eq!(standings_table(&standings(), Some(1)).lines().count(), 2);
    }

    #[test]
    fn summary_lists_mismatches() {
        let clean = CheckReport { checked: 2, mismatches: vec![] };
        assert_eq!(check_summary(&clean), "league check ok (2 teams)\n");

        let bad = CheckReport {
            checked: 2,
            mismatches: vec![Mismatch { team: "Ben Racing".into(), computed: Some(36.0), official: None }],
        };
        assert!(check_summary(&bad).contains("Ben Racing: computed 36.00, league missing"));
    }
}
