//! Run record: digest of the inputs that produced the current outputs.
//!
//! Read-through only. A matching digest lets a caller skip recomputation;
//! a missing or unreadable record simply means "recompute".

use serde::{Deserialize, Serialize};

use crate::canonical_json::write_pretty_file;
use crate::hasher::is_sha256_hex;
use crate::layout::SeasonPaths;
use crate::loader::read_json_opt;
use crate::{IoError, IoResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub engine_version: String,
    pub year: String,
    pub completed_races: usize,
    pub inputs_sha256: String,
}

impl RunRecord {
    pub fn load(paths: &SeasonPaths) -> IoResult<Option<RunRecord>> {
        let path = paths.run_record();
        let Some(v) = read_json_opt(&path, "run record")? else {
            return Ok(None);
        };
        match serde_json::from_value::<RunRecord>(v) {
            Ok(r) if is_sha256_hex(&r.inputs_sha256) => Ok(Some(r)),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable run record");
                Ok(None)
            }
        }
    }

    pub fn write(&self, paths: &SeasonPaths) -> IoResult<()> {
        let path = paths.run_record();
        let v = serde_json::to_value(self).map_err(|e| IoError::json(&path, e))?;
        write_pretty_file(&path, &v)
    }

    /// Outputs are current when the same engine produced them from the same
    /// inputs and every output file exists.
    pub fn is_current(&self, paths: &SeasonPaths, engine_version: &str, inputs_sha256: &str) -> bool {
        self.engine_version == engine_version
            && self.inputs_sha256 == inputs_sha256
            && self.year == paths.year()
            && paths.outputs().iter().all(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::sha256_hex;

    fn record(digest: String) -> RunRecord {
        RunRecord {
            engine_version: "0.1.0".into(),
            year: "2024".into(),
            completed_races: 3,
            inputs_sha256: digest,
        }
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = SeasonPaths::new(dir.path(), "2024");
        let r = record(sha256_hex(b"inputs"));
        r.write(&p).unwrap();
        assert_eq!(RunRecord::load(&p).unwrap(), Some(r.clone()));
        // outputs not written yet
        assert!(!r.is_current(&p, "0.1.0", &sha256_hex(b"inputs")));
    }

    #[test]
    fn garbage_record_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let p = SeasonPaths::new(dir.path(), "2024");
        record("not-a-digest".into()).write(&p).unwrap();
        assert_eq!(RunRecord::load(&p).unwrap(), None);
    }

    #[test]
    fn current_requires_matching_digest_and_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let p = SeasonPaths::new(dir.path(), "2024");
        for out in p.outputs() {
            std::fs::create_dir_all(out.parent().unwrap()).unwrap();
            std::fs::write(&out, "{}").unwrap();
        }
        let d = sha256_hex(b"inputs");
        let r = record(d.clone());
        assert!(r.is_current(&p, "0.1.0", &d));
        assert!(!r.is_current(&p, "0.1.0", &sha256_hex(b"changed")));
    }

    #[test]
    fn record_from_another_engine_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let p = SeasonPaths::new(dir.path(), "2024");
        for out in p.outputs() {
            std::fs::create_dir_all(out.parent().unwrap()).unwrap();
            std::fs::write(&out, "{}").unwrap();
        }
        let d = sha256_hex(b"inputs");
        let r = RunRecord { engine_version: "0.0.1-old".into(), ..record(d.clone()) };
        assert!(!r.is_current(&p, "0.1.0", &d));
        assert!(r.is_current(&p, "0.0.1-old", &d));
    }
}
