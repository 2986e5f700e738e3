//! Big-endian, 4-byte aligned encoding of the StdHep building blocks
use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const ALIGN: usize = 4;

fn padding(len: usize) -> usize {
    (ALIGN - len % ALIGN) % ALIGN
}

pub(crate) fn write_i32<W: Write>(w: &mut W, value: i32) -> io::Result<()> {
    w.write_i32::<BigEndian>(value)
}

pub(crate) fn write_len<W: Write>(w: &mut W, len: usize) -> io::Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "array too long"))?;
    w.write_u32::<BigEndian>(len)
}

pub(crate) fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    write_len(w, s.len())?;
    w.write_all(s.as_bytes())?;
    w.write_all(&[0; ALIGN][..padding(s.len())])
}

pub(crate) fn write_i32_array<W: Write>(w: &mut W, values: &[i32]) -> io::Result<()> {
    write_len(w, values.len())?;
    values.iter().try_for_each(|&v| w.write_i32::<BigEndian>(v))
}

pub(crate) fn write_f64_array<W: Write>(w: &mut W, values: &[f64]) -> io::Result<()> {
    write_len(w, values.len())?;
    values.iter().try_for_each(|&v| w.write_f64::<BigEndian>(v))
}

pub(crate) fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    r.read_i32::<BigEndian>()
}

fn read_len<R: Read>(r: &mut R) -> io::Result<usize> {
    Ok(r.read_u32::<BigEndian>()? as usize)
}

pub(crate) fn read_string<R: Read>(r: &mut R) -> io::Result<String> {
    let len = read_len(r)?;
    let mut buf = vec![0; len + padding(len)];
    r.read_exact(&mut buf)?;
    buf.truncate(len);
    String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

pub(crate) fn read_i32_array<R: Read>(r: &mut R) -> io::Result<Vec<i32>> {
    let len = read_len(r)?;
    (0..len).map(|_| r.read_i32::<BigEndian>()).collect()
}

pub(crate) fn read_f64_array<R: Read>(r: &mut R) -> io::Result<Vec<f64>> {
    let len = read_len(r)?;
    (0..len).map(|_| r.read_f64::<BigEndian>()).collect()
}
