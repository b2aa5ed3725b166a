//! Serde serializer writing GraphQL input syntax.
//!
//! Struct fields, map keys and unit enum variants are written bare, with the
//! `__name__` delimiter stripped. Strings are always written as quoted JSON
//! literals, so user values pass through untouched.

use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde::ser::{self, Impossible};
use thiserror::Error;

/// Input rendering failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InputError(String);

impl ser::Error for InputError {
    fn custom<T: Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Render `value` as GraphQL input text.
pub fn to_graphql_input<T: Serialize + ?Sized>(value: &T) -> Result<String, InputError> {
    let mut writer = InputWriter {
        out: String::with_capacity(128),
    };
    value.serialize(&mut writer)?;
    Ok(writer.out)
}

fn delimiter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^__(\w+)__$").expect("valid delimiter pattern"))
}

/// `__name__` becomes `name`; anything else is returned as is.
fn strip_delimiter(name: &str) -> &str {
    delimiter_pattern()
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map_or(name, |inner| inner.as_str())
}

struct InputWriter {
    out: String,
}

impl InputWriter {
    fn display(&mut self, value: impl Display) {
        self.out.push_str(&value.to_string());
    }

    fn name(&mut self, name: &str) {
        self.out.push_str(strip_delimiter(name));
    }
}

fn unsupported(kind: &str) -> InputError {
    InputError(format!("{kind} cannot be written as GraphQL input"))
}

impl<'a> ser::Serializer for &'a mut InputWriter {
    type Ok = ();
    type Error = InputError;
    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Impossible<(), InputError>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Impossible<(), InputError>;

    fn serialize_bool(self, v: bool) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<(), InputError> {
        self.display(v);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), InputError> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), InputError> {
        if !v.is_finite() {
            return Err(unsupported("non-finite float"));
        }
        self.display(v);
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<(), InputError> {
        self.serialize_str(v.encode_utf8(&mut [0; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<(), InputError> {
        let quoted = serde_json::to_string(v).map_err(|err| InputError(err.to_string()))?;
        self.out.push_str(&quoted);
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), InputError> {
        Err(unsupported("byte string"))
    }

    fn serialize_none(self) -> Result<(), InputError> {
        self.out.push_str("null");
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), InputError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), InputError> {
        self.serialize_none()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), InputError> {
        self.serialize_none()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<(), InputError> {
        self.name(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), InputError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<(), InputError> {
        self.out.push('{');
        self.name(variant);
        self.out.push_str(": ");
        value.serialize(&mut *self)?;
        self.out.push('}');
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a>, InputError> {
        Ok(Compound::open(self, '['))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound<'a>, InputError> {
        Ok(Compound::open(self, '['))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, InputError> {
        Ok(Compound::open(self, '['))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, InputError> {
        Err(unsupported("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a>, InputError> {
        Ok(Compound::open(self, '{'))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, InputError> {
        Ok(Compound::open(self, '{'))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, InputError> {
        Err(unsupported("struct variant"))
    }
}

struct Compound<'a> {
    writer: &'a mut InputWriter,
    first: bool,
}

impl<'a> Compound<'a> {
    fn open(writer: &'a mut InputWriter, open: char) -> Self {
        writer.out.push(open);
        Self {
            writer,
            first: true,
        }
    }

    fn separator(&mut self) {
        if self.first {
            self.first = false;
        } else {
            self.writer.out.push_str(", ");
        }
    }

    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        self.separator();
        value.serialize(&mut *self.writer)
    }

    fn close(self, end: char) {
        self.writer.out.push(end);
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = InputError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        self.element(value)
    }

    fn end(self) -> Result<(), InputError> {
        self.close(']');
        Ok(())
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = InputError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        self.element(value)
    }

    fn end(self) -> Result<(), InputError> {
        self.close(']');
        Ok(())
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = InputError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        self.element(value)
    }

    fn end(self) -> Result<(), InputError> {
        self.close(']');
        Ok(())
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = InputError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), InputError> {
        self.separator();
        match serde_json::to_value(key).map_err(|err| InputError(err.to_string()))? {
            serde_json::Value::String(key) => {
                self.writer.name(&key);
                Ok(())
            }
            _ => Err(unsupported("non-string map key")),
        }
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), InputError> {
        self.writer.out.push_str(": ");
        value.serialize(&mut *self.writer)
    }

    fn end(self) -> Result<(), InputError> {
        self.close('}');
        Ok(())
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = InputError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), InputError> {
        self.separator();
        self.writer.name(key);
        self.writer.out.push_str(": ");
        value.serialize(&mut *self.writer)
    }

    fn end(self) -> Result<(), InputError> {
        self.close('}');
        Ok(())
    }
}
