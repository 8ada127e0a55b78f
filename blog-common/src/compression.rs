use std::io::{self, Read};
use flate2::{Compression, write::GzEncoder, read::GzDecoder};

/// 魔数常量 - 用于标识快照文件格式
pub const MAGIC_BYTES: &[u8] = b"BLGDB";

/// 头部长度：魔数 + 版本号(2) + 原始数据大小(4)
const HEADER_LEN: usize = MAGIC_BYTES.len() + 2 + 4;

/// 当前快照格式版本
pub const SNAPSHOT_VERSION: [u8; 2] = [1, 0];

/// 将对象序列化为二进制格式
pub fn to_binary<T: serde::Serialize>(obj: &T) -> Result<Vec<u8>, io::Error> {
    bincode::serde::encode_to_vec(obj, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("序列化失败: {}", e)))
}

/// 从二进制格式反序列化对象
pub fn from_binary<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, io::Error> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("反序列化失败: {}", e)))
        .map(|(value, _)| value)
}

/// 将对象序列化为压缩的二进制格式
pub fn to_compressed<T: serde::Serialize>(obj: &T, version: [u8; 2]) -> Result<Vec<u8>, io::Error> {
    let binary = to_binary(obj)?;
    let data_len = u32::try_from(binary.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidData, format!("数据过大: {} 字节", binary.len()))
    })?;

    let mut output = Vec::with_capacity(HEADER_LEN + binary.len() / 2);
    output.extend_from_slice(MAGIC_BYTES);
    output.extend_from_slice(&version);
    output.extend_from_slice(&data_len.to_le_bytes());

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    std::io::Write::write_all(&mut encoder, &binary)?;
    output.extend_from_slice(&encoder.finish()?);

    Ok(output)
}

/// 从压缩的二进制格式反序列化对象，只接受当前主版本及以下
pub fn from_compressed<T: for<'a> serde::de::Deserialize<'a>>(data: &[u8]) -> Result<T, io::Error> {
    from_compressed_with_max_version(data, SNAPSHOT_VERSION[0])
}

/// 从压缩的二进制格式反序列化对象，允许指定支持的最大版本
pub fn from_compressed_with_max_version<T: for<'a> serde::de::Deserialize<'a>>(
    data: &[u8],
    max_version: u8,
) -> Result<T, io::Error> {
    read_header(data, max_version)?;

    let size_offset = MAGIC_BYTES.len() + 2;
    let mut size_bytes = [0u8; 4];
    size_bytes.copy_from_slice(&data[size_offset..size_offset + 4]);
    let original_size = u32::from_le_bytes(size_bytes) as usize;

    let mut decoder = GzDecoder::new(&data[HEADER_LEN..]);
    let mut decompressed_data = Vec::with_capacity(original_size);
    decoder.read_to_end(&mut decompressed_data)?;

    if decompressed_data.len() != original_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("解压后数据大小不匹配: 期望 {} 字节, 实际 {} 字节",
                    original_size, decompressed_data.len())
        ));
    }

    from_binary(&decompressed_data)
}

/// 校验头部并返回版本号
pub fn read_header(data: &[u8], max_version: u8) -> Result<[u8; 2], io::Error> {
    if data.len() < HEADER_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("数据太短，无法解析: {} 字节", data.len())
        ));
    }

    if &data[0..MAGIC_BYTES.len()] != MAGIC_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "无效的文件格式：魔数不匹配"
        ));
    }

    let version_offset = MAGIC_BYTES.len();
    let version = [data[version_offset], data[version_offset + 1]];

    if version[0] > max_version {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("不支持的版本: {}.{}", version[0], version[1])
        ));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredBlog;

    fn sample() -> Vec<StoredBlog> {
        vec![StoredBlog {
            id: "a1".into(),
            title: "Hello".into(),
            content: "World".into(),
            author: "Ann".into(),
            tags: vec!["intro".into()],
            image: None,
            created_at_ms: Some(1_700_000_000_000),
            updated_at_ms: None,
        }]
    }

    #[test]
    fn snapshot_header_layout() {
        let data = to_compressed(&sample(), SNAPSHOT_VERSION).unwrap();
        assert_eq!(&data[..5], MAGIC_BYTES);
        assert_eq!(read_header(&data, 1).unwrap(), [1, 0]);

        let decoded: Vec<StoredBlog> = from_compressed(&data).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn rejects_bad_magic_and_short_input() {
        let err = from_compressed::<Vec<StoredBlog>>(b"NOPE").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let mut data = to_compressed(&sample(), SNAPSHOT_VERSION).unwrap();
        data[0] = b'X';
        let err = from_compressed::<Vec<StoredBlog>>(&data).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_newer_major_version() {
        let data = to_compressed(&sample(), [2, 0]).unwrap();
        let err = from_compressed::<Vec<StoredBlog>>(&data).unwrap_err();
        assert!(err.to_string().contains("2.0"));
        assert!(from_compressed_with_max_version::<Vec<StoredBlog>>(&data, 2).is_ok());
    }

    #[test]
    fn rejects_size_mismatch() {
        let mut data = to_compressed(&sample(), SNAPSHOT_VERSION).unwrap();
        let size_offset = MAGIC_BYTES.len() + 2;
        data[size_offset] = data[size_offset].wrapping_add(1);
        assert!(from_compressed::<Vec<StoredBlog>>(&data).is_err());
    }
}
