extern crate hex;
extern crate sha1;

use sha1::{Digest, Sha1};

/// Git blob id of `content`: SHA-1 over `blob <len>\0<utf-8 bytes>`.
/// Matches the `sha` GitHub reports for tree entries.
pub fn blob_sha(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", bytes.len()).as_bytes());
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_git_hash_object() {
        // printf '' | git hash-object --stdin
        assert_eq!(blob_sha(""), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391");
        // printf 'hello world\n' | git hash-object --stdin
        assert_eq!(
            blob_sha("hello world\n"),
            "3b18e512dba79e4c8300dd08aeb37f8e728b8dad"
        );
    }

    #[test]
    fn counts_bytes_not_chars() {
        assert_ne!(blob_sha("다희"), blob_sha("ab"));
        assert_eq!(blob_sha("다희").len(), 40);
    }
}
