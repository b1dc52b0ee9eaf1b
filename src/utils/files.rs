use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions (lowercase, without the dot) picked up in directory mode
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// Create a directory (and its parents) if it does not exist yet
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        println!("Created directory: {}", dir.display());
    }
    Ok(())
}

/// Check if a file is an image file based on its extension
pub fn is_image_file(path: &Path) -> bool {
    if let Some(extension) = path.extension() {
        let ext = extension.to_string_lossy().to_lowercase();
        IMAGE_EXTENSIONS.contains(&ext.as_str())
    } else {
        false
    }
}

/// List the image files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn list_image_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.is_file() && is_image_file(&path) {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Recursively collect every regular file under `root` whose name ends with `suffix`.
///
/// Symlinked directories are not followed. Results are sorted.
pub fn find_files_with_suffix(root: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();

            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() && entry.file_name().to_string_lossy().ends_with(suffix)
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// `path` with `suffix` appended to its final component (`a/b.js` -> `a/b.js.backup`)
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Inverse of [`append_suffix`]. Returns `None` when `path` does not end with
/// `suffix` or when nothing would be left of the file name.
pub fn strip_suffix(path: &Path, suffix: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(suffix)?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(stem))
}

/// Display `path` relative to `base` when possible, falling back to the full path
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_image_file_ignores_case() {
        assert!(is_image_file(Path::new("photo.JPG")));
        assert!(is_image_file(Path::new("scan.Tiff")));
        assert!(is_image_file(Path::new("dir/depth.png")));
        assert!(!is_image_file(Path::new("clip.mov")));
        assert!(!is_image_file(Path::new("picture.webp")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_list_image_files_is_flat_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), "x").unwrap();
        fs::write(dir.path().join("a.JPEG"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.png"), "x").unwrap();

        let files = list_image_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPEG", "b.png"]);
    }

    #[test]
    fn test_find_files_with_suffix_recurses() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("js/infinidepth")).unwrap();
        fs::write(dir.path().join("index.html.backup"), "x").unwrap();
        fs::write(dir.path().join("js/infinidepth/config.js.backup"), "x").unwrap();
        fs::write(dir.path().join("js/infinidepth/config.js"), "x").unwrap();
        fs::create_dir(dir.path().join("old.backup")).unwrap();

        let found = find_files_with_suffix(dir.path(), ".backup").unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("index.html.backup"),
                dir.path().join("js/infinidepth/config.js.backup"),
            ]
        );
    }

    #[test]
    fn test_suffix_helpers() {
        let path = Path::new("js/infinidepth/config.js");
        let backup = append_suffix(path, ".backup");
        assert_eq!(backup, PathBuf::from("js/infinidepth/config.js.backup"));
        assert_eq!(strip_suffix(&backup, ".backup"), Some(path.to_path_buf()));

        // Only the trailing suffix is removed
        let odd = Path::new("notes.backup.txt.backup");
        assert_eq!(
            strip_suffix(odd, ".backup"),
            Some(PathBuf::from("notes.backup.txt"))
        );
        assert_eq!(strip_suffix(Path::new(".backup"), ".backup"), None);
        assert_eq!(strip_suffix(path, ".backup"), None);
    }

    #[test]
    fn test_display_relative() {
        let base = Path::new("/site");
        assert_eq!(
            display_relative(Path::new("/site/js/showcase.js"), base),
            "js/showcase.js"
        );
        assert_eq!(display_relative(Path::new("/other/a.js"), base), "/other/a.js");
    }
}
