#![allow(dead_code)]

use std::path::{Path, PathBuf};

use simmodel::fields::Fields;

pub const DIODE_LIBRARY: &str = r#"* diodes and a filter
.model 1N4148 D(Is=2.52n Rs=.568 N=1.752 Cjo=4p M=.4 tt=20n)
.subckt rc_filter in out gnd params: r=1k c=10n
R1 in out {r}
C1 out gnd {c}
.ends rc_filter
"#;

pub fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs.iter().copied().collect()
}

/// Writes `text` to `name` inside `dir` and returns the full path.
pub fn write_library(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}
