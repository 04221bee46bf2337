use bytes::Bytes;

/// 10 MiB
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const OBJECT_KEY_PREFIX: &str = "health-tracker";

#[derive(Debug, Clone)]
pub struct UploadImageInput {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Keeps ASCII letters, digits, `.`, `-` and `_`; anything else becomes `_`.
/// Path separators never survive, so the key stays flat.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();

    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn object_key(unix_millis: i64, filename: &str) -> String {
    format!(
        "{OBJECT_KEY_PREFIX}-{unix_millis}-{}",
        sanitize_filename(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_paths_and_unicode() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\photos\\my tongue.JPG"), "my_tongue.JPG");
        assert_eq!(sanitize_filename("舌头.png"), "__.png");
    }

    #[test]
    fn object_key_has_prefix_and_timestamp() {
        assert_eq!(
            object_key(1_715_000_000_000, "tongue.jpg"),
            "health-tracker-1715000000000-tongue.jpg"
        );
    }
}
