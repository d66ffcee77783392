use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{SubmissionService, load_target};
use crate::config::AppConfig;
use crate::errors::CodetaError;
use crate::grader::archive::{self, ArchiveError};
use crate::middlewares::RequestContext;
use crate::services::{assignments::AssignmentPath, require_user};
use crate::utils::file_magic::validate_magic_bytes;
use crate::utils::url::{assignment_url, course_url};
use crate::views;

const ARCHIVE_EXTENSION: &str = ".zip";

/// 上传失败的原因，对应提示消息
#[derive(Debug, PartialEq)]
enum UploadRejection {
    NoFile,
    MultipleFiles,
    WrongExtension,
    NotAZip,
    TooLarge,
}

impl UploadRejection {
    fn message(&self) -> &'static str {
        match self {
            UploadRejection::NoFile => "Please choose a zip archive to upload.",
            UploadRejection::MultipleFiles => "Only one file can be uploaded at a time.",
            UploadRejection::WrongExtension => "Only .zip archives can be submitted.",
            UploadRejection::NotAZip => "That file is not a zip archive.",
            UploadRejection::TooLarge => "That file is too large.",
        }
    }
}

fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 学生提交的解压目录
///
/// 用户名必须是单个普通路径段，否则拒绝。
pub fn submission_dir(
    upload_dir: &str,
    course_id: i64,
    assignment_id: i64,
    username: &str,
) -> Result<PathBuf, CodetaError> {
    let mut components = Path::new(username).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(Path::new(upload_dir)
            .join("submissions")
            .join(course_id.to_string())
            .join(assignment_id.to_string())
            .join(username)),
        _ => Err(CodetaError::file_operation(format!(
            "Username is not a valid directory name: {username:?}"
        ))),
    }
}

// 将 multipart 中的 file 字段写入 archive_path
async fn receive_archive(
    payload: &mut Multipart,
    archive_path: &Path,
    max_size: usize,
) -> Result<Result<usize, UploadRejection>, CodetaError> {
    let mut received: Option<usize> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(CodetaError::file_operation(format!(
                    "Malformed multipart body: {e}"
                )));
            }
        };
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if received.is_some() {
            let _ = fs::remove_file(archive_path);
            return Ok(Err(UploadRejection::MultipleFiles));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        if original_name.is_empty() {
            continue;
        }
        if extension_of(&original_name) != ARCHIVE_EXTENSION {
            return Ok(Err(UploadRejection::WrongExtension));
        }

        let mut f = File::create(archive_path)?;
        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| CodetaError::file_operation(e.to_string()))?;

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, ARCHIVE_EXTENSION) {
                    drop(f);
                    let _ = fs::remove_file(archive_path);
                    return Ok(Err(UploadRejection::NotAZip));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                drop(f);
                let _ = fs::remove_file(archive_path);
                return Ok(Err(UploadRejection::TooLarge));
            }
            f.write_all(&data)?;
        }

        if first_chunk {
            // 空文件
            drop(f);
            let _ = fs::remove_file(archive_path);
            return Ok(Err(UploadRejection::NotAZip));
        }
        received = Some(total_size);
    }

    Ok(received.ok_or(UploadRejection::NoFile))
}

pub async fn handle_upload(
    _service: &SubmissionService,
    ctx: &RequestContext,
    path: AssignmentPath<'_>,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let target = match load_target(ctx, &path).await? {
        Ok(target) => target,
        Err(resp) => return Ok(resp),
    };
    let user = match require_user(ctx) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 接收上传期间不占用数据库连接
    ctx.session().close().await;

    let submit_url = assignment_url(
        path.owner,
        &target.course.title,
        &target.assignment.title,
        "submit",
    );

    let config = AppConfig::get();
    let archive_dir = Path::new(&config.upload.dir).join("archives");
    if let Err(e) = fs::create_dir_all(&archive_dir) {
        error!("{}", CodetaError::file_operation(format!("{e}")));
        return Ok(views::redirect_with_flash(
            &submit_url,
            "There was an error saving your submission, please try again later.",
        ));
    }

    let stored_name = format!("{}-{}.zip", chrono::Utc::now().timestamp(), Uuid::new_v4());
    let archive_path = archive_dir.join(stored_name);

    let size = match receive_archive(&mut payload, &archive_path, config.upload.max_size).await {
        Ok(Ok(size)) => size,
        Ok(Err(rejection)) => {
            info!(
                "User: {} - submission to {} rejected: {:?}",
                user.username, target.assignment.assignment_id, rejection
            );
            return Ok(views::redirect_with_flash(&submit_url, rejection.message()));
        }
        Err(e) => {
            error!("Failed to receive submission from {}: {}", user.username, e);
            let _ = fs::remove_file(&archive_path);
            return Ok(views::redirect_with_flash(
                &submit_url,
                "There was an error saving your submission, please try again later.",
            ));
        }
    };

    let dest = match submission_dir(
        &config.upload.dir,
        target.course.course_id,
        target.assignment.assignment_id,
        &user.username,
    ) {
        Ok(dest) => dest,
        Err(e) => {
            error!("{}", e);
            let _ = fs::remove_file(&archive_path);
            return Ok(views::redirect_with_flash(
                &submit_url,
                "There was an error saving your submission, please try again later.",
            ));
        }
    };

    // 解压在阻塞线程池中执行
    let source = archive_path.clone();
    let extracted = web::block(move || archive::extract(&source, &dest)).await;

    match extracted {
        Ok(Ok(entries)) => {
            info!(
                "User: {} - submitted {} bytes ({} entries) for assignment {}",
                user.username, size, entries, target.assignment.assignment_id
            );
            Ok(views::redirect_with_flash(
                &course_url(path.owner, &target.course.title),
                format!(
                    "Submitted {} files for {}.",
                    entries, target.assignment.title
                ),
            ))
        }
        Ok(Err(ArchiveError::NotAnArchive(_))) => {
            warn!("Submission {} is not a valid archive", archive_path.display());
            let _ = fs::remove_file(&archive_path);
            Ok(views::redirect_with_flash(
                &submit_url,
                "That file is not a valid zip archive.",
            ))
        }
        Ok(Err(e)) => {
            error!("Failed to extract {}: {}", archive_path.display(), e);
            Ok(views::redirect_with_flash(
                &submit_url,
                "There was an error unpacking your submission, please try again later.",
            ))
        }
        Err(e) => {
            error!("Extraction task failed: {}", e);
            Ok(views::redirect_with_flash(
                &submit_url,
                "There was an error unpacking your submission, please try again later.",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("hw1.ZIP"), ".zip");
        assert_eq!(extension_of("hw1.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
    }

    #[test]
    fn test_submission_dir_layout() {
        let dir = submission_dir("uploads", 3, 7, "test_student").unwrap();
        assert_eq!(
            dir,
            Path::new("uploads/submissions/3/7/test_student").to_path_buf()
        );
    }

    #[test]
    fn test_submission_dir_stays_inside_upload_dir() {
        for username in ["../../../../escape", "a/b", "..", ".", "/etc", ""] {
            assert!(
                submission_dir("uploads", 3, 7, username).is_err(),
                "{username}"
            );
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            UploadRejection::WrongExtension.message(),
            "Only .zip archives can be submitted."
        );
        assert_eq!(
            UploadRejection::NoFile.message(),
            "Please choose a zip archive to upload."
        );
    }
}
