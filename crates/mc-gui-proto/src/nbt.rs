//! Little-endian NBT used for item user data (display name, lore, enchantments).
//!
//! Only the tag types item meta needs are supported. Compounds are ordered
//! so the encoded bytes are deterministic.

use std::collections::BTreeMap;

use bytes::BufMut;
#[cfg(test)]
use bytes::Buf;

#[cfg(test)]
use crate::error::ProtoError;

pub type NbtCompound = BTreeMap<String, NbtTag>;

const TAG_END: u8 = 0;
const TAG_BYTE: u8 = 1;
const TAG_SHORT: u8 = 2;
const TAG_INT: u8 = 3;
const TAG_STRING: u8 = 8;
const TAG_LIST: u8 = 9;
const TAG_COMPOUND: u8 = 10;

#[cfg(test)]
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
}

impl NbtTag {
    fn type_id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => TAG_BYTE,
            NbtTag::Short(_) => TAG_SHORT,
            NbtTag::Int(_) => TAG_INT,
            NbtTag::String(_) => TAG_STRING,
            NbtTag::List(_) => TAG_LIST,
            NbtTag::Compound(_) => TAG_COMPOUND,
        }
    }
}

/// Accessors for checking decoded user data.
#[cfg(test)]
impl NbtTag {
    pub fn as_short(&self) -> Option<i16> {
        match self {
            NbtTag::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NbtTag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[NbtTag]> {
        match self {
            NbtTag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&NbtCompound> {
        match self {
            NbtTag::Compound(c) => Some(c),
            _ => None,
        }
    }
}

/// Write an unnamed root compound.
pub fn write_root(buf: &mut impl BufMut, root: &NbtCompound) {
    buf.put_u8(TAG_COMPOUND);
    write_str(buf, "");
    write_compound(buf, root);
}

/// Read an unnamed (or named, name discarded) root compound.
#[cfg(test)]
pub(crate) fn read_root(buf: &mut impl Buf) -> Result<NbtCompound, ProtoError> {
    ensure(buf, 1)?;
    let tag = buf.get_u8();
    if tag != TAG_COMPOUND {
        return Err(ProtoError::InvalidData(format!(
            "expected root compound, got tag {tag}"
        )));
    }
    read_str(buf)?;
    read_compound(buf, 0)
}

fn write_str(buf: &mut impl BufMut, s: &str) {
    buf.put_u16_le(s.len() as u16);
    buf.put_slice(s.as_bytes());
}

fn write_compound(buf: &mut impl BufMut, compound: &NbtCompound) {
    for (name, tag) in compound {
        buf.put_u8(tag.type_id());
        write_str(buf, name);
        write_payload(buf, tag);
    }
    buf.put_u8(TAG_END);
}

fn write_payload(buf: &mut impl BufMut, tag: &NbtTag) {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16_le(*v),
        NbtTag::Int(v) => buf.put_i32_le(*v),
        NbtTag::String(s) => write_str(buf, s),
        NbtTag::List(items) => {
            let elem = items.first().map(NbtTag::type_id).unwrap_or(TAG_END);
            buf.put_u8(elem);
            buf.put_i32_le(items.len() as i32);
            for item in items {
                write_payload(buf, item);
            }
        }
        NbtTag::Compound(c) => write_compound(buf, c),
    }
}

#[cfg(test)]
fn ensure(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

#[cfg(test)]
fn read_str(buf: &mut impl Buf) -> Result<String, ProtoError> {
    ensure(buf, 2)?;
    let len = buf.get_u16_le() as usize;
    ensure(buf, len)?;
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| ProtoError::InvalidUtf8)
}

#[cfg(test)]
fn read_compound(buf: &mut impl Buf, depth: usize) -> Result<NbtCompound, ProtoError> {
    let mut compound = NbtCompound::new();
    loop {
        ensure(buf, 1)?;
        let tag = buf.get_u8();
        if tag == TAG_END {
            return Ok(compound);
        }
        let name = read_str(buf)?;
        let value = read_payload(buf, tag, depth + 1)?;
        compound.insert(name, value);
    }
}

#[cfg(test)]
fn read_payload(buf: &mut impl Buf, tag: u8, depth: usize) -> Result<NbtTag, ProtoError> {
    if depth > MAX_DEPTH {
        return Err(ProtoError::InvalidData("NBT nesting too deep".into()));
    }
    match tag {
        TAG_BYTE => {
            ensure(buf, 1)?;
            Ok(NbtTag::Byte(buf.get_i8()))
        }
        TAG_SHORT => {
            ensure(buf, 2)?;
            Ok(NbtTag::Short(buf.get_i16_le()))
        }
        TAG_INT => {
            ensure(buf, 4)?;
            Ok(NbtTag::Int(buf.get_i32_le()))
        }
        TAG_STRING => Ok(NbtTag::String(read_str(buf)?)),
        TAG_LIST => {
            ensure(buf, 5)?;
            let elem = buf.get_u8();
            let len = buf.get_i32_le();
            if len < 0 {
                return Err(ProtoError::InvalidData(format!("negative list length {len}")));
            }
            let mut items = Vec::with_capacity(len.min(1024) as usize);
            for _ in 0..len {
                items.push(read_payload(buf, elem, depth + 1)?);
            }
            Ok(NbtTag::List(items))
        }
        TAG_COMPOUND => Ok(NbtTag::Compound(read_compound(buf, depth)?)),
        other => Err(ProtoError::InvalidData(format!("unsupported NBT tag {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn empty_root_bytes() {
        let mut buf = BytesMut::new();
        write_root(&mut buf, &NbtCompound::new());
        // TAG_Compound, u16 name length 0, TAG_End
        assert_eq!(&buf[..], &[10, 0, 0, 0]);
    }

    #[test]
    fn display_compound_reads_back() {
        let mut display = NbtCompound::new();
        display.insert("Name".into(), NbtTag::String("Confirm".into()));
        display.insert(
            "Lore".into(),
            NbtTag::List(vec![NbtTag::String("line".into())]),
        );
        let mut root = NbtCompound::new();
        root.insert("display".into(), NbtTag::Compound(display));
        root.insert("Unbreakable".into(), NbtTag::Byte(1));

        let mut buf = BytesMut::new();
        write_root(&mut buf, &root);
        let decoded = read_root(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, root);
        let name = decoded["display"].as_compound().unwrap()["Name"].as_str();
        assert_eq!(name, Some("Confirm"));
    }

    #[test]
    fn empty_list_uses_end_type() {
        let mut root = NbtCompound::new();
        root.insert("ench".into(), NbtTag::List(Vec::new()));
        let mut buf = BytesMut::new();
        write_root(&mut buf, &root);
        let decoded = read_root(&mut buf.freeze()).unwrap();
        assert_eq!(decoded["ench"].as_list().map(|l| l.len()), Some(0));
    }

    #[test]
    fn truncated_input_fails() {
        let data: &[u8] = &[10, 0, 0, 1, 1, 0];
        assert!(read_root(&mut &data[..]).is_err());
    }
}
