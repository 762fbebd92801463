use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::assembler::GeneratedFile;

/// Writes each file under `root`, creating parent directories as needed.
///
/// Plain overwrite per file with no rollback: a failure midway leaves the
/// files already written in place.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(root)
        .with_context(|| format!("failed to create output directory '{}'", root.display()))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(&target, &file.content)
            .with_context(|| format!("failed to write '{}'", target.display()))?;
        tracing::debug!(path = %target.display(), bytes = file.content.len(), "Wrote file");
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::FileRole;
    use tempfile::tempdir;

    fn file(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            content: content.to_string(),
            role: FileRole::SubAgent,
        }
    }

    #[test]
    fn creates_nested_directories_and_overwrites() {
        let dir = tempdir().expect("tempdir should create");
        let root = dir.path().join("project");
        std::fs::create_dir_all(root.join("writer")).expect("precreate should work");
        std::fs::write(root.join("writer/agent.py"), "old").expect("seed should write");

        let written = write_files(
            &root,
            &[file("researcher/agent.py", "r = 1\n"), file("writer/agent.py", "w = 2\n")],
        )
        .expect("write should succeed");

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(root.join("researcher/agent.py")).expect("read back"),
            "r = 1\n"
        );
        assert_eq!(
            std::fs::read_to_string(root.join("writer/agent.py")).expect("read back"),
            "w = 2\n"
        );
    }

    #[test]
    fn blocked_path_reports_filesystem_context() {
        let dir = tempdir().expect("tempdir should create");
        let root = dir.path().join("project");
        std::fs::create_dir_all(&root).expect("root should create");
        std::fs::write(root.join("researcher"), "not a directory").expect("blocker should write");

        let err = write_files(
            &root,
            &[file("main.py", "print()\n"), file("researcher/agent.py", "x\n")],
        )
        .expect_err("file in place of a directory");

        assert!(format!("{err:#}").contains("failed to create directory"));
        assert!(root.join("main.py").exists());
    }
}
