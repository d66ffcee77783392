#[macro_use]
mod common;

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test;
use codeta::config::AppConfig;
use codeta::services::submissions::upload::submission_dir;
use common::{
    enroll, flash_messages, location, memory_provider, seed_assignment, seed_course, seed_user,
};
use zip::write::{FileOptions, ZipWriter};

const BOUNDARY: &str = "codeta-test-boundary";
const SUBMIT_URL: &str = "/test_instructor/test_course/test_asn/submit";

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// 单个 file 字段的 multipart 请求体
fn multipart_body(filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    write!(
        body,
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .unwrap();
    body.extend_from_slice(data);
    write!(body, "\r\n--{BOUNDARY}--\r\n").unwrap();
    body
}

fn upload_request(session: Cookie<'static>, body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(SUBMIT_URL)
        .cookie(session)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

fn file_count(dir: &Path) -> usize {
    if !dir.exists() {
        return 0;
    }
    fs::read_dir(dir).unwrap().count()
}

#[actix_web::test]
async fn test_submission_upload_flow() {
    // 本文件只有这一个用例，在第一次读取配置之前指定上传目录
    let uploads = tempfile::tempdir().unwrap();
    unsafe {
        std::env::set_var("CODETA_UPLOAD__DIR", uploads.path());
    }
    let upload_dir = AppConfig::get().upload.dir.clone();
    assert_eq!(Path::new(&upload_dir), uploads.path());

    let provider = memory_provider().await;
    let owner = seed_user(&provider, "test_instructor").await;
    let student = seed_user(&provider, "test_student").await;
    seed_user(&provider, "outsider").await;
    let course = seed_course(&provider, &owner, "test_course").await;
    let assignment = seed_assignment(&provider, &course, "test_asn").await;
    enroll(&provider, &course, &student).await;
    let app = test_app!(provider);

    let archive = zip_bytes(&[("main.py", "print('hi')\n"), ("README", "hw1\n")]);
    let dest = submission_dir(
        &upload_dir,
        course.course_id,
        assignment.assignment_id,
        "test_student",
    )
    .unwrap();
    let archives = uploads.path().join("archives");

    // 未选课的学生
    let outsider = login!(app, "outsider");
    let resp = test::call_service(
        &app,
        upload_request(outsider, multipart_body("hw1.zip", &archive)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/outsider/");
    assert_eq!(
        flash_messages(&resp),
        ["You are not enrolled in that course.".to_string()]
    );
    assert_eq!(file_count(&archives), 0);

    let session = login!(app, "test_student");

    // 扩展名错误
    let resp = test::call_service(
        &app,
        upload_request(session.clone(), multipart_body("hw1.txt", &archive)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), SUBMIT_URL);
    assert_eq!(
        flash_messages(&resp),
        ["Only .zip archives can be submitted.".to_string()]
    );

    // 扩展名正确但内容不是压缩包
    let resp = test::call_service(
        &app,
        upload_request(session.clone(), multipart_body("hw1.zip", b"just some text")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_messages(&resp),
        ["That file is not a zip archive.".to_string()]
    );
    assert_eq!(file_count(&archives), 0);
    assert!(!dest.exists());

    // 损坏的 multipart 请求体
    let resp = test::call_service(
        &app,
        upload_request(session.clone(), b"this is not multipart\r\n".to_vec()).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_messages(&resp),
        ["There was an error saving your submission, please try again later.".to_string()]
    );
    assert!(!dest.exists());

    // 正常提交
    let resp = test::call_service(
        &app,
        upload_request(session, multipart_body("hw1.zip", &archive)).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/test_instructor/test_course/");
    assert_eq!(
        flash_messages(&resp),
        ["Submitted 2 files for test_asn.".to_string()]
    );
    assert_eq!(file_count(&archives), 1);
    assert_eq!(
        fs::read_to_string(dest.join("main.py")).unwrap(),
        "print('hi')\n"
    );
    assert_eq!(fs::read_to_string(dest.join("README")).unwrap(), "hw1\n");
}
