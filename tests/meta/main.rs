//! Structural checks keeping `tests/unit/` in step with `src/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Harness entry points and module lists carry no tests of their own
    const STRUCTURAL_FILES: [&str; 3] = ["main.rs", "lib.rs", "mod.rs"];

    fn is_structural(relative: &str) -> bool {
        let name = Path::new(relative)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        STRUCTURAL_FILES.contains(&name)
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();
            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    fn source_and_unit_paths() -> (BTreeSet<String>, BTreeSet<String>) {
        let src_dir = Path::new("src");
        let unit_dir = Path::new("tests/unit");
        let src = collect_relative_paths(src_dir, src_dir).unwrap();
        let unit = collect_relative_paths(unit_dir, unit_dir).unwrap_or_default();
        (src, unit)
    }

    // Tests every source module has a unit test file at the mirrored path
    // Verified by deleting tests/unit/morph/seam.rs
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src, unit) = source_and_unit_paths();
        let missing: Vec<_> = src
            .iter()
            .filter(|path| !is_structural(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    // Tests no unit test file outlives its source module
    // Verified by adding tests/unit/morph/unused.rs
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src, unit) = source_and_unit_paths();
        let orphaned: Vec<_> = unit
            .iter()
            .filter(|path| !is_structural(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    fn files_without_tests(dir: &Path, found: &mut Vec<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                files_without_tests(&path, found)?;
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(".rs") || STRUCTURAL_FILES.contains(&name) {
                continue;
            }
            if !fs::read_to_string(&path)?.contains("#[test]") {
                found.push(format!("  - {}", path.display()));
            }
        }
        Ok(())
    }

    // Tests every non-structural test file defines at least one test
    // Verified by emptying tests/unit/io/json.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let mut found = Vec::new();
        files_without_tests(Path::new("tests"), &mut found).unwrap();

        assert!(
            found.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            found.join("\n")
        );
    }
}
