//! Synthetic stream builder for decoder tests.

#![allow(dead_code)]

pub const STRING: u8 = 0x01;
pub const INT32: u8 = 0x02;
pub const END: u8 = 0x08;

#[derive(Debug, Clone)]
pub enum Value<'a> {
    Text(&'a str),
    Int(u32),
}

#[derive(Debug, Default)]
pub struct StreamBuilder {
    bytes: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn text(self, key: &str, value: &str) -> Self {
        self.raw(&[STRING])
            .raw(key.as_bytes())
            .raw(&[0])
            .raw(value.as_bytes())
            .raw(&[0])
    }

    pub fn int(self, key: &str, value: u32) -> Self {
        self.raw(&[INT32])
            .raw(key.as_bytes())
            .raw(&[0])
            .raw(&value.to_le_bytes())
    }

    pub fn field(self, key: &str, value: &Value<'_>) -> Self {
        match value {
            Value::Text(text) => self.text(key, text),
            Value::Int(int) => self.int(key, *int),
        }
    }

    pub fn end(self) -> Self {
        self.raw(&[END])
    }

    pub fn record(self, fields: &[(&str, Value<'_>)]) -> Self {
        fields
            .iter()
            .fold(self, |builder, (key, value)| builder.field(key, value))
            .end()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
