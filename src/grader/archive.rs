//! 压缩包解压

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::utils::file_magic::is_zip;

#[derive(Debug)]
pub enum ArchiveError {
    /// 文件不是有效的 zip 压缩包
    NotAnArchive(PathBuf),
    /// 读取或写入失败
    Io(io::Error),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::NotAnArchive(path) => {
                write!(f, "{} is not a zip archive", path.display())
            }
            ArchiveError::Io(e) => write!(f, "archive I/O failed: {e}"),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<io::Error> for ArchiveError {
    fn from(err: io::Error) -> Self {
        ArchiveError::Io(err)
    }
}

fn from_zip_error(path: &Path, err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) => ArchiveError::Io(e),
        _ => ArchiveError::NotAnArchive(path.to_path_buf()),
    }
}

/// 判断文件是否为 zip 压缩包，不修改文件系统
pub fn is_archive(path: &Path) -> bool {
    open_archive(path).is_ok()
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, ArchiveError> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 4];
    let read = file.read(&mut magic)?;
    if !is_zip(&magic[..read]) {
        return Err(ArchiveError::NotAnArchive(path.to_path_buf()));
    }

    // 重新打开，ZipArchive 从文件末尾读取中央目录
    let file = File::open(path)?;
    ZipArchive::new(file).map_err(|e| from_zip_error(path, e))
}

// 解压阶段的错误：压缩包已通过校验，格式错误按读写失败处理
fn from_extract_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) => ArchiveError::Io(e),
        other => ArchiveError::Io(io::Error::new(io::ErrorKind::InvalidData, other)),
    }
}

// 所有条目都必须落在解压目录之内
fn check_entry_names(archive: &mut ZipArchive<File>) -> Result<(), ArchiveError> {
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(from_extract_error)?;
        if entry.enclosed_name().is_none() {
            return Err(ArchiveError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsafe entry name: {}", entry.name()),
            )));
        }
    }
    Ok(())
}

/// 将压缩包解压到 `dest`，返回条目数
///
/// `dest` 不存在时会创建，已存在的同名文件直接覆盖。
/// 文件不是压缩包时返回 [`ArchiveError::NotAnArchive`]，且不会创建任何文件。
/// 条目路径会跳出 `dest` 时返回 [`ArchiveError::Io`]，同样不写入任何文件。
pub fn extract(path: &Path, dest: &Path) -> Result<usize, ArchiveError> {
    let mut archive = open_archive(path)?;
    let entries = archive.len();
    debug!("Extracting {} entries from {}", entries, path.display());

    check_entry_names(&mut archive)?;

    fs::create_dir_all(dest)?;
    archive.extract(dest).map_err(from_extract_error)?;

    info!(
        "Extracted {} entries from {} into {}",
        entries,
        path.display(),
        dest.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn write_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, body) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn list_files(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.is_dir() {
                for inner in list_files(&path) {
                    names.push(format!("{}/{}", entry.file_name().to_string_lossy(), inner));
                }
            } else {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        names
    }

    #[test]
    fn test_extract_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("submission.zip");
        write_archive(
            &archive,
            &[("main.py", "print('hi')\n"), ("lib/util.py", "X = 1\n")],
        );

        let dest = tmp.path().join("out");
        assert!(is_archive(&archive));
        assert_eq!(extract(&archive, &dest).unwrap(), 2);
        assert_eq!(list_files(&dest), vec!["lib/util.py", "main.py"]);
        assert_eq!(
            fs::read_to_string(dest.join("main.py")).unwrap(),
            "print('hi')\n"
        );
    }

    #[test]
    fn test_extract_twice_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("submission.zip");
        write_archive(&archive, &[("a.txt", "one"), ("b.txt", "two")]);

        let dest = tmp.path().join("out");
        extract(&archive, &dest).unwrap();
        fs::write(dest.join("a.txt"), "changed").unwrap();
        extract(&archive, &dest).unwrap();

        assert_eq!(list_files(&dest), vec!["a.txt", "b.txt"]);
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "one");
    }

    #[test]
    fn test_not_an_archive_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let bogus = tmp.path().join("notes.zip");
        fs::write(&bogus, "just some text").unwrap();

        let dest = tmp.path().join("out");
        let err = extract(&bogus, &dest).unwrap_err();
        assert!(matches!(err, ArchiveError::NotAnArchive(_)));
        assert!(!dest.exists());
        assert!(!is_archive(&bogus));
    }

    #[test]
    fn test_truncated_archive_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("submission.zip");
        write_archive(&archive, &[("a.txt", "one")]);
        let bytes = fs::read(&archive).unwrap();
        fs::write(&archive, &bytes[..bytes.len() / 2]).unwrap();

        let dest = tmp.path().join("out");
        assert!(matches!(
            extract(&archive, &dest),
            Err(ArchiveError::NotAnArchive(_))
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn test_escaping_entry_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("submission.zip");
        write_archive(&archive, &[("ok.txt", "fine"), ("../escape.txt", "gotcha")]);

        let dest = tmp.path().join("out");
        let err = extract(&archive, &dest).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(!dest.exists());
        assert!(!tmp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = extract(&tmp.path().join("missing.zip"), &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, ArchiveError::Io(_)));
    }
}
