use crate::error::FixError;
use crate::options::Options;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::io::{self, Write};

/// Indented output with `": "` between key and value, optionally ASCII-only strings.
pub struct CanonicalFormatter<'a> {
    pretty: PrettyFormatter<'a>,
    ensure_ascii: bool,
}

impl<'a> CanonicalFormatter<'a> {
    pub fn new(indent: &'a [u8], ensure_ascii: bool) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(indent),
            ensure_ascii,
        }
    }
}

impl Formatter for CanonicalFormatter<'_> {
    #[inline]
    fn begin_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.begin_array(w)
    }
    #[inline]
    fn end_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_array(w)
    }
    #[inline]
    fn begin_array_value<W: ?Sized + Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(w, first)
    }
    #[inline]
    fn end_array_value<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(w)
    }
    #[inline]
    fn begin_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.begin_object(w)
    }
    #[inline]
    fn end_object<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_object(w)
    }
    #[inline]
    fn begin_object_key<W: ?Sized + Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(w, first)
    }
    #[inline]
    fn begin_object_value<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(w)
    }
    #[inline]
    fn end_object_value<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(w)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        w: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.ensure_ascii || fragment.is_ascii() {
            return w.write_all(fragment.as_bytes());
        }
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            w.write_all(&fragment.as_bytes()[start..i])?;
            write_unicode_escape(w, c)?;
            start = i + c.len_utf8();
        }
        w.write_all(&fragment.as_bytes()[start..])
    }
}

#[inline]
fn write_unicode_escape<W: ?Sized + Write>(w: &mut W, c: char) -> io::Result<()> {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        write!(w, "\\u{:04x}", unit)?;
    }
    Ok(())
}

/// Serialize `value` in canonical form into `writer`. No trailing newline.
pub fn write_canonical<W: Write>(
    value: &Value,
    opts: &Options,
    writer: &mut W,
) -> Result<(), FixError> {
    let indent = vec![b' '; opts.indent];
    let mut ser = Serializer::with_formatter(writer, CanonicalFormatter::new(&indent, opts.ensure_ascii));
    value.serialize(&mut ser).map_err(FixError::Serialize)
}

/// Serialize `value` in canonical form.
pub fn to_canonical_string(value: &Value, opts: &Options) -> Result<String, FixError> {
    let mut buf = Vec::with_capacity(128);
    write_canonical(value, opts, &mut buf)?;
    String::from_utf8(buf).map_err(|e| {
        FixError::Serialize(serde_json::Error::io(io::Error::new(
            io::ErrorKind::InvalidData,
            e,
        )))
    })
}
