//! `goa exports` — print the mapped export records as JSON.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use goa_codegen_lib::MapOptions;
use goa_ir::ExportRecord;

use crate::pipeline;

pub fn collect(go_file: &Path, map: &MapOptions) -> Result<Vec<ExportRecord>> {
    let mut input = File::open(go_file)
        .with_context(|| format!("could not open '{}'", go_file.display()))?;
    pipeline::collect_exports(&mut input, map)
}

pub fn run(go_file: &Path, map: &MapOptions) -> Result<()> {
    let exports = collect(go_file, map)?;
    println!("{}", serde_json::to_string_pretty(&exports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_serialize_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let go_file = dir.path().join("api.go");
        std::fs::write(
            &go_file,
            "package api\n// goa-export Sum\nfunc Sum(a, b int) int { return a + b }\n",
        )
        .unwrap();

        let exports = collect(&go_file, &MapOptions::default()).unwrap();
        let json = serde_json::to_value(&exports).unwrap();
        assert_eq!(json[0]["exported_name"], "Sum");
        assert_eq!(json[0]["params"][1]["name"], "b");
        assert_eq!(json[0]["params"][1]["id"], 3);
        assert_eq!(json[0]["results"][0]["name"], "f_2");
    }
}
