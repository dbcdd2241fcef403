use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

/// gzip 压缩
pub fn zip_data(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder
        .finish()
        .map_err(|e| anyhow::anyhow!("Gzip encode error: {}", e))
}

/// gzip 解压
pub fn unzip_data(data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| anyhow::anyhow!("Gzip decode error: {}", e))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_unzip_roundtrip() {
        let data = br#"{"items":[{"lat":51.05,"lon":13.74}]}"#;
        let zipped = zip_data(data).unwrap();
        assert_ne!(zipped.as_slice(), data.as_slice());

        let unzipped = unzip_data(&zipped).unwrap();
        assert_eq!(unzipped.as_slice(), data.as_slice());
    }

    #[test]
    fn test_zip_empty() {
        // 空输入也会带上 gzip 头部
        let zipped = zip_data(b"").unwrap();
        assert!(!zipped.is_empty());
        assert!(unzip_data(&zipped).unwrap().is_empty());
    }

    #[test]
    fn test_unzip_invalid_data() {
        assert!(unzip_data(b"not gzip data").is_err());
    }
}
