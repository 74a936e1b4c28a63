//! Filesystem side of the classifier: finding mails on disk and turning
//! a single mail into a bag of words.

use std::{
    collections::{hash_map::Entry, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{
    error::{Error, Result},
    tokenize::{decode, tokenize},
};

/// Bag of words for a single document.
pub type WordCounts = HashMap<String, u64>;

/// Recursively collects every regular file under `root`. Symlinks are
/// followed when they point at files. A symlink to a directory or a
/// dangling symlink is an error. The result is sorted so reports come
/// out in a stable order.
pub fn list_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(root.as_ref(), &mut files)?;
    files.sort();
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;

        if file_type.is_dir() {
            visit(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        } else if file_type.is_symlink() {
            let metadata = fs::metadata(&path).map_err(|e| Error::io(&path, e))?;
            if !metadata.is_file() {
                let source = io::Error::new(io::ErrorKind::Other, "symlink to a non-file");
                return Err(Error::io(path, source));
            }
            files.push(path);
        } else {
            warn!("Skipping special file {}", path.display());
        }
    }

    Ok(())
}

/// Reads a document's raw bytes.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Adds one to the count of every word in `words`.
pub fn count_words<'a, I>(words: I, counts: &mut WordCounts)
where
    I: IntoIterator<Item = &'a str>,
{
    for word in words {
        match counts.entry(word.to_string()) {
            Entry::Occupied(entry) => *entry.into_mut() += 1,
            Entry::Vacant(entry) => {
                entry.insert(1);
            }
        }
    }
}

/// Builds the bag of words for the document at `path`.
pub fn word_counts<P: AsRef<Path>>(path: P) -> Result<WordCounts> {
    let bytes = read_document(path)?;
    let mut counts = WordCounts::new();
    count_words(tokenize(&decode(&bytes)), &mut counts);
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_nested_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();
        fs::write(dir.path().join("a/one.txt"), "x").unwrap();
        fs::write(dir.path().join("a/b/two.txt"), "x").unwrap();

        let files = list_files(dir.path()).unwrap();
        let mut names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a/b/two.txt"),
                PathBuf::from("a/one.txt"),
                PathBuf::from("top.txt"),
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_files(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = word_counts(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("real")).unwrap();
        fs::write(dir.path().join("real/mail.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("corpus")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("corpus/link")).unwrap();

        let err = list_files(dir.path().join("corpus")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_listed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mail.txt"), "x").unwrap();
        fs::create_dir_all(dir.path().join("corpus")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("mail.txt"), dir.path().join("corpus/link")).unwrap();

        let files = list_files(dir.path().join("corpus")).unwrap();
        assert_eq!(files, vec![dir.path().join("corpus/link")]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("link")).unwrap();

        let err = list_files(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn count_words_accumulates() {
        let mut counts = WordCounts::new();
        count_words(["win", "free", "win"], &mut counts);
        count_words(["win"], &mut counts);
        assert_eq!(counts["win"], 3);
        assert_eq!(counts["free"], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn counts_words_of_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.txt");
        fs::write(&path, "Subject: free free FREE\n\nwin 2 free").unwrap();

        let counts = word_counts(&path).unwrap();
        assert_eq!(counts.len(), 4);
        assert_eq!(counts["free"], 3);
        assert_eq!(counts["FREE"], 1);
        assert_eq!(counts["win"], 1);
        assert_eq!(counts["Subject"], 1);
    }

    #[test]
    fn empty_document_has_no_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  42 -- !!").unwrap();
        assert!(word_counts(&path).unwrap().is_empty());
    }
}
