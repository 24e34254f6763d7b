use std::path::{Path, PathBuf};

pub const EMAILS_FILE: &str = "emails.txt";

pub fn emails_text(emails: &[String]) -> String {
    emails.join("\n")
}

/// Writes `emails.txt` into `dir` and returns its path.
pub fn write_emails(dir: &Path, emails: &[String]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EMAILS_FILE);
    std::fs::write(&path, emails_text(emails))?;
    tracing::info!(path = %path.display(), count = emails.len(), "emails exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_address_per_line_without_trailing_newline() {
        let emails = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        assert_eq!(emails_text(&emails), "a@example.com\nb@example.com");
        assert_eq!(emails_text(&[]), "");
    }

    #[test]
    fn writes_emails_txt() {
        let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
        let dir = std::env::temp_dir().join(format!("rehber-export-{}-{nanos}", std::process::id()));

        let path = write_emails(&dir, &["a@example.com".to_string()]).unwrap();

        assert_eq!(path.file_name().unwrap(), EMAILS_FILE);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a@example.com");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
