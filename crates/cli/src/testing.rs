//! Fixtures shared by the CLI tests.

/// A WOFF file holding one uncompressed table.
pub fn stored_woff(tag: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"wOFF");
    out.extend_from_slice(b"OTTO");
    out.extend_from_slice(&((44 + 20 + data.len()) as u32).to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&[0; 30]);
    out.extend_from_slice(tag);
    out.extend_from_slice(&64u32.to_be_bytes());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(&0x1234_5678u32.to_be_bytes());
    out.extend_from_slice(data);
    out
}
