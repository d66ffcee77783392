/// 压缩包的魔术字节
const ZIP_LOCAL_HEADER: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const ZIP_EMPTY_ARCHIVE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
const ZIP_SPANNED_ARCHIVE: [u8; 4] = [0x50, 0x4B, 0x07, 0x08];

/// 判断数据是否以 zip 魔术字节开头
pub fn is_zip(data: &[u8]) -> bool {
    data.starts_with(&ZIP_LOCAL_HEADER)
        || data.starts_with(&ZIP_EMPTY_ARCHIVE)
        || data.starts_with(&ZIP_SPANNED_ARCHIVE)
}

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".zip"）
///
/// # Returns
/// * `true` - 魔术字节匹配
/// * `false` - 魔术字节不匹配或不接受该类型
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".zip" => is_zip(data),
        // 只接受 zip 提交
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_magic() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00];
        assert!(validate_magic_bytes(&zip_header, ".zip"));
        assert!(validate_magic_bytes(&zip_header, ".ZIP"));
        assert!(!validate_magic_bytes(&zip_header, ".tar"));
    }

    #[test]
    fn test_empty_archive_magic() {
        assert!(is_zip(&[0x50, 0x4B, 0x05, 0x06]));
    }

    #[test]
    fn test_not_zip() {
        assert!(!validate_magic_bytes(b"%PDF-1.4", ".zip"));
        assert!(!validate_magic_bytes(b"PK", ".zip"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".zip"));
    }
}
